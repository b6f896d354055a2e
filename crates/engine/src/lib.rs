//! Lookup engine: the interaction core of the typeahead widget.
//!
//! The engine turns keystrokes and asynchronous search results into a
//! consistent selection experience. It is organised leaf-first:
//!
//! - [`options`]: option rows and the option list, stateless render delegates
//! - [`service`]: the search service boundary and in-memory implementations
//! - [`lookup`]: the controller state machine and its async driver

pub mod lookup;
pub mod options;
pub mod service;

pub use lookup::{LookupController, LookupKey, LookupMsg, LookupPhase, LookupSettings, LookupState};
pub use options::{OptionList, OptionRow};
pub use service::{NullSearchService, SearchService, StaticSearchService};
