//! JSON configuration for the `lookup` binary.
//!
//! The file lives at `$LOOKUP_CONFIG_PATH` when set, otherwise at
//! `<config_dir>/lookup/lookup.json`. A missing file yields defaults; command
//! line flags are layered on top by `main`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs_next::{config_dir, home_dir};
use lookup_engine::LookupSettings;
use lookup_types::FieldConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "LOOKUP_CONFIG_PATH";

pub const CONFIG_FILE_NAME: &str = "lookup.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Contents of `lookup.json`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LookupConfig {
    pub field: FieldConfig,
    /// Initially bound record id.
    pub value: Option<String>,
    pub debounce_ms: Option<u64>,
    pub min_search_length: Option<usize>,
    pub min_selected_id_length: Option<usize>,
    /// Base URL of the HTTP search service.
    pub api_base: Option<String>,
    /// JSON file of records served locally instead of the HTTP service.
    pub fixture: Option<PathBuf>,
    /// Log file path; defaults to `<config_dir>/lookup/lookup.log`.
    pub log_file: Option<PathBuf>,
}

impl LookupConfig {
    /// Load the configuration from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
        match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).map_err(|source| ConfigError::Parse { path, source }),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    pub fn settings(&self) -> LookupSettings {
        let defaults = LookupSettings::default();
        LookupSettings {
            debounce: self.debounce_ms.map(Duration::from_millis).unwrap_or(defaults.debounce),
            min_search_length: self.min_search_length.unwrap_or(defaults.min_search_length),
            min_selected_id_length: self.min_selected_id_length.unwrap_or(defaults.min_selected_id_length),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| config_root().join("lookup.log"))
    }
}

fn config_root() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("lookup")
}

pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    config_root().join(CONFIG_FILE_NAME)
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let path = path.trim();
    if path == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = LookupConfig::load(Some(&dir.path().join("absent.json"))).expect("defaults");
        assert_eq!(config.field, FieldConfig::default());
        assert_eq!(config.settings(), LookupSettings::default());
    }

    #[test]
    fn parses_field_and_tunables() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"field":{{"sobjectName":"Contact","title":"Name","subtitle":"Email","required":true}},"debounceMs":150,"fixture":"contacts.json"}}"#
        )
        .expect("write");

        let config = LookupConfig::load(Some(file.path())).expect("config");
        assert_eq!(config.field.sobject_name, "Contact");
        assert_eq!(config.field.subtitle, "Email");
        assert!(config.field.required);
        assert_eq!(config.settings().debounce, Duration::from_millis(150));
        assert_eq!(config.settings().min_search_length, 3);
        assert_eq!(config.fixture, Some(PathBuf::from("contacts.json")));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write");
        let error = LookupConfig::load(Some(file.path())).expect_err("parse error");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn expands_home_prefix() {
        let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
        assert_eq!(expand_tilde("~/lookup.json"), home.join("lookup.json"));
        assert_eq!(expand_tilde(" /etc/lookup.json "), PathBuf::from("/etc/lookup.json"));
    }
}
