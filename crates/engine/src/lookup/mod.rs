//! Lookup controller: state machine, request sequencing, debounce and driver.
//!
//! Modules:
//! - `state`: canonical lookup state and pure transitions
//! - `effects`: keys, messages and effects exchanged with the driver
//! - `sequencer`: monotonic request tickets guarding against stale responses
//! - `debounce`: cancellable timer handle
//! - `controller`: async driver executing effects against a search service
//! - `settings`: debounce and length thresholds

mod controller;
mod debounce;
mod effects;
mod sequencer;
mod settings;
mod state;

pub use controller::LookupController;
pub use debounce::Debouncer;
pub use effects::{FetchRequest, LookupEffect, LookupKey, LookupMsg};
pub use sequencer::{FetchKind, FetchTicket, RequestSequencer};
pub use settings::{DEFAULT_DEBOUNCE, LookupSettings};
pub use state::{LookupPhase, LookupState};
