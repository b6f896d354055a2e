use std::time::Duration;

/// Quiet period between the last keystroke and the dispatched search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Tunables of the lookup state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupSettings {
    pub debounce: Duration,
    /// Shortest input (in characters) that triggers a search.
    pub min_search_length: usize,
    /// Shortest selected id (in characters) accepted by `check_validity`.
    pub min_selected_id_length: usize,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_search_length: 3,
            min_selected_id_length: 15,
        }
    }
}

impl LookupSettings {
    pub(crate) fn min_length_message(&self) -> String {
        format!("Minimum {} characters", self.min_search_length)
    }
}
