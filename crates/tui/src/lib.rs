//! # Lookup TUI Library
//!
//! Terminal front end for the lookup widget. It renders the search input,
//! the option list and notifications with Ratatui, maps Crossterm key and
//! focus events onto the lookup controller, and drives the controller's
//! timers and search responses from a single async event loop.
//!
//! ## Architecture
//!
//! - `app`: front-end state wrapped around the controller (toasts, throbber)
//! - `keys`: key event to lookup action mapping
//! - `ui::runtime`: terminal lifecycle and the event loop
//! - `ui::lookup_view`: rendering of input, options, errors and toasts

mod app;
mod keys;
mod ui;

use anyhow::Result;
use lookup_engine::LookupController;
use lookup_types::LookupEvent;
use tokio::sync::mpsc;

pub use app::App;

/// Runs the lookup TUI until the user exits.
///
/// `events` must be the receiving end of the channel the controller was
/// created with. Returns the selected record id at exit, if any.
///
/// # Errors
///
/// Fails on terminal setup or teardown errors and on unreadable input.
pub async fn run(controller: LookupController, events: mpsc::UnboundedReceiver<LookupEvent>) -> Result<Option<String>> {
    ui::runtime::run_app(App::new(controller), events).await
}
