use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of an informational notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationVariant::Info => "info",
            NotificationVariant::Success => "success",
            NotificationVariant::Warning => "warning",
            NotificationVariant::Error => "error",
        };
        f.write_str(label)
    }
}

/// Transient toast raised by the controller (never a validation error).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub variant: NotificationVariant,
    pub message: String,
}

impl Notification {
    /// Toast raised when a search completes with no results.
    pub fn no_records_found() -> Self {
        Self {
            title: "Info".into(),
            variant: NotificationVariant::Info,
            message: "No records found, please refine your search.".into(),
        }
    }
}

/// Signals the controller emits to its embedding context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupEvent {
    /// A record was selected; the payload is empty when the selection was cleared.
    Selected(String),
    /// Informational toast to present to the user.
    Notify(Notification),
}
