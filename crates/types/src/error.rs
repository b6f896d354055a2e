//! Error types shared by the engine, the API client and the TUI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inline error tied to the lookup input.
///
/// Validation errors are never thrown; they are stored on the controller and
/// rendered next to the field until input resumes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<&SearchError> for ValidationError {
    fn from(error: &SearchError) -> Self {
        Self::new(error.to_string())
    }
}

/// Failure raised by any of the search service calls.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search request failed: {message}")]
    Transport { message: String },

    #[error("Search service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not read search results: {message}")]
    Decode { message: String },

    #[error("Search service unavailable: {message}")]
    Unavailable { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_carries_display_text() {
        let error = SearchError::Status {
            status: 503,
            body: "maintenance".into(),
        };
        assert_eq!(ValidationError::from(&error).message, "Search service returned 503: maintenance");
    }
}
