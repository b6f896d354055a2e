use serde::{Deserialize, Serialize};

use crate::Searcher;

/// Externally supplied, read-only configuration of a lookup field.
///
/// Every key is optional when deserialized; missing keys fall back to the
/// defaults below so a partial configuration file is always usable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Object the search service looks records up in.
    pub sobject_name: String,
    /// Icon shown next to the field label and each option row.
    pub icon_name: Option<String>,
    /// Label rendered above the input.
    pub field_label: String,
    /// Record field used as the option label and the selected input text.
    pub title: String,
    /// Record field used as the option sublabel.
    pub subtitle: String,
    /// Placeholder shown while the input is empty.
    pub placeholder: Option<String>,
    pub read_only: bool,
    pub required: bool,
    /// Message surfaced when validity is reported on an invalid field.
    pub message_when_input_error: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            sobject_name: String::new(),
            icon_name: None,
            field_label: "Search".into(),
            title: "Name".into(),
            subtitle: "Id".into(),
            placeholder: None,
            read_only: false,
            required: false,
            message_when_input_error: "Please select a record.".into(),
        }
    }
}

impl FieldConfig {
    /// Build the searcher for a given term using the configured object and fields.
    pub fn searcher(&self, search_term: &str) -> Searcher {
        Searcher::new(search_term, &self.sobject_name, &self.title, &self.subtitle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_configuration_keeps_defaults() {
        let config: FieldConfig = serde_json::from_str(r#"{"sobjectName":"Contact","required":true}"#).expect("config");
        assert_eq!(config.sobject_name, "Contact");
        assert!(config.required);
        assert_eq!(config.title, "Name");
        assert_eq!(config.subtitle, "Id");
        assert_eq!(config.field_label, "Search");
    }

    #[test]
    fn searcher_uses_configured_fields() {
        let config = FieldConfig {
            sobject_name: "Account".into(),
            title: "Name".into(),
            subtitle: "Industry".into(),
            ..FieldConfig::default()
        };
        let searcher = config.searcher("acm");
        assert_eq!(searcher.search_term, "acm");
        assert_eq!(searcher.object_name, "Account");
        assert_eq!(searcher.fields, ["Name".to_string(), "Industry".to_string()]);
    }
}
