use std::time::Duration;

use lookup_types::{LookupEvent, SearchError, Searcher};

use super::sequencer::FetchTicket;

/// Keys the lookup reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupKey {
    Char(char),
    Backspace,
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
}

/// A fetch the driver must perform against the search service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub searcher: Searcher,
}

/// Side effects requested by [`LookupState`](super::LookupState) handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupEffect {
    /// Replace any pending debounce timer with one firing `generation` after `delay`.
    ScheduleSearch { generation: u64, delay: Duration },
    /// Abort the pending debounce timer, if any.
    CancelSearch,
    /// Dispatch a request to the search service.
    Fetch(FetchRequest),
    /// Forward a signal to the embedding context.
    Emit(LookupEvent),
}

/// Inputs processed by the lookup state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupMsg {
    Key(LookupKey),
    /// Whole-text replacement, as reported by hosts that own the text buffer.
    InputChanged(String),
    Focus,
    Blur,
    /// Externally bound value pushed in by the parent.
    SetValue(String),
    Clear,
    /// Selection signal bubbled up from the option list.
    Selected(String),
    DebounceElapsed(u64),
    FetchCompleted {
        ticket: FetchTicket,
        result: Result<String, SearchError>,
    },
}
