mod config;

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use lookup_api::HttpSearchService;
use lookup_engine::{LookupController, SearchService, StaticSearchService};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::LookupConfig;

/// Search for a record by typing and pick one from the suggestions.
#[derive(Debug, Parser)]
#[command(name = "lookup", version, about)]
struct Cli {
    /// Record type to search (for example `Account`).
    #[arg(long)]
    object: Option<String>,
    /// Field shown as each option's label.
    #[arg(long)]
    title: Option<String>,
    /// Field shown as each option's secondary text.
    #[arg(long)]
    subtitle: Option<String>,
    #[arg(long)]
    icon: Option<String>,
    /// Label rendered above the input.
    #[arg(long)]
    label: Option<String>,
    #[arg(long)]
    placeholder: Option<String>,
    #[arg(long)]
    required: bool,
    #[arg(long)]
    read_only: bool,
    /// Record id bound at startup; resolved by id before the first frame.
    #[arg(long)]
    value: Option<String>,
    #[arg(long, env = "LOOKUP_API_BASE")]
    api_base: Option<String>,
    /// Serve records from a local JSON array instead of the HTTP service.
    #[arg(long)]
    fixture: Option<PathBuf>,
    /// Alternate configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    debounce_ms: Option<u64>,
}

impl Cli {
    /// Layer command line flags over the file configuration.
    fn apply(self, mut config: LookupConfig) -> LookupConfig {
        let field = &mut config.field;
        if let Some(object) = self.object {
            field.sobject_name = object;
        }
        if let Some(title) = self.title {
            field.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            field.subtitle = subtitle;
        }
        if let Some(label) = self.label {
            field.field_label = label;
        }
        field.icon_name = self.icon.or(field.icon_name.take());
        field.placeholder = self.placeholder.or(field.placeholder.take());
        field.required |= self.required;
        field.read_only |= self.read_only;

        config.value = self.value.or(config.value);
        config.api_base = self.api_base.or(config.api_base);
        config.fixture = self.fixture.or(config.fixture);
        config.debounce_ms = self.debounce_ms.or(config.debounce_ms);
        config
    }
}

fn init_tracing(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn build_service(config: &LookupConfig) -> Result<Arc<dyn SearchService>> {
    if let Some(fixture) = config.fixture.as_deref() {
        info!(fixture = %fixture.display(), "serving records from fixture");
        let service = StaticSearchService::from_json_file(fixture)?;
        return Ok(Arc::new(service));
    }
    let service = match config.api_base.as_deref() {
        Some(base_url) => HttpSearchService::with_env_token(base_url)?,
        None => HttpSearchService::new_from_env()?,
    };
    info!(base_url = %service.base_url(), "using HTTP search service");
    Ok(Arc::new(service))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let file_config = LookupConfig::load(cli.config.as_deref())?;
    let config = cli.apply(file_config);
    init_tracing(&config.log_path())?;

    let service = build_service(&config)?;
    let (events, event_receiver) = mpsc::unbounded_channel();
    let mut controller = LookupController::new(config.field.clone(), config.settings(), service, events);
    if let Some(value) = config.value.clone() {
        controller = controller.with_value(value);
    }

    let selected = lookup_tui::run(controller, event_receiver).await?;
    info!(selected = ?selected, "lookup finished");
    if let Some(id) = selected {
        println!("{id}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn flags_override_file_values() {
        let mut file_config = LookupConfig::default();
        file_config.field.sobject_name = "Account".into();
        file_config.field.placeholder = Some("Find an account".into());
        file_config.debounce_ms = Some(500);

        let cli = Cli::try_parse_from(["lookup", "--object", "Contact", "--required", "--debounce-ms", "120"]).expect("args");
        let config = cli.apply(file_config);

        assert_eq!(config.field.sobject_name, "Contact");
        assert_eq!(config.field.placeholder.as_deref(), Some("Find an account"));
        assert!(config.field.required);
        assert_eq!(config.settings().debounce, Duration::from_millis(120));
    }

    #[test]
    fn fixture_flag_selects_static_service() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fixture = dir.path().join("records.json");
        fs::write(&fixture, r#"[{"Id":"001000000000001","Name":"Acme"}]"#).expect("write fixture");

        let cli = Cli::try_parse_from(["lookup", "--fixture", fixture.to_str().expect("utf8 path")]).expect("args");
        let config = cli.apply(LookupConfig::default());
        assert!(build_service(&config).is_ok());
    }

    #[test]
    fn rejects_insecure_remote_api_base() {
        let cli = Cli::try_parse_from(["lookup", "--api-base", "http://example.com/lookup"]).expect("args");
        let config = cli.apply(LookupConfig::default());
        assert!(build_service(&config).is_err());
    }
}
