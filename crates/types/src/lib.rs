//! Shared type definitions for the lookup widget.
//!
//! These types cross every crate boundary in the workspace: the engine stores
//! candidate records and emits events, the API crate serializes searchers, and
//! the TUI renders notifications and validation errors.

mod config;
mod error;
mod event;
mod record;
mod searcher;

pub use config::FieldConfig;
pub use error::{SearchError, ValidationError};
pub use event::{LookupEvent, Notification, NotificationVariant};
pub use record::{CandidateRecord, ID_FIELD, decode_candidates, sort_by_title};
pub use searcher::Searcher;
