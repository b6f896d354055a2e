//! Lookup interaction state machine.
//!
//! `LookupState` holds only canonical data: input text, candidate set, active
//! id, selection, validation error and focus. Popup visibility, read-only
//! display and the coarse [`LookupPhase`] are derived on demand so they can
//! never drift from their inputs.
//!
//! Handlers are synchronous and return [`LookupEffect`]s; timers and network
//! calls are executed by the driver (see `controller`). Stale timer firings
//! are recognised by their debounce generation and stale responses by their
//! request sequence, so both are ignored here even if the driver lets them
//! through.

use lookup_types::{CandidateRecord, FieldConfig, LookupEvent, Notification, NotificationVariant, ValidationError, decode_candidates, sort_by_title};
use tracing::{debug, info, warn};

use crate::options::OptionList;

use super::{
    LookupSettings,
    effects::{FetchRequest, LookupEffect, LookupKey, LookupMsg},
    sequencer::{FetchKind, FetchTicket, RequestSequencer},
};

/// Coarse state derived from the canonical fields, in precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupPhase {
    /// A validation error is surfaced.
    Invalid,
    /// A confirmed record is present.
    Selected,
    /// A debounce timer is pending or a request is in flight.
    Searching,
    /// Candidates are available and nothing is selected.
    Listing,
    /// No candidates and no selection.
    Empty,
}

#[derive(Clone, Debug)]
pub struct LookupState {
    config: FieldConfig,
    settings: LookupSettings,
    /// Externally bound value (record id) pushed in by the parent.
    value: Option<String>,
    input: String,
    records: Vec<CandidateRecord>,
    active_id: Option<String>,
    selected_id: String,
    selected_record: Option<CandidateRecord>,
    error: Option<ValidationError>,
    focused: bool,
    requests: RequestSequencer,
    /// Bumped on every scheduled search; only the newest timer may fire.
    search_generation: u64,
    search_pending: bool,
    /// Kind of the fetch awaiting a response, if any.
    in_flight: Option<FetchKind>,
}

impl LookupState {
    pub fn new(config: FieldConfig, settings: LookupSettings) -> Self {
        Self {
            config,
            settings,
            value: None,
            input: String::new(),
            records: Vec::new(),
            active_id: None,
            selected_id: String::new(),
            selected_record: None,
            error: None,
            focused: false,
            requests: RequestSequencer::default(),
            search_generation: 0,
            search_pending: false,
            in_flight: None,
        }
    }

    /// Bind an initial value before mounting.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.value = (!value.is_empty()).then_some(value);
        self
    }

    // ===== SELECTORS =====

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn settings(&self) -> &LookupSettings {
        &self.settings
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    pub fn selected_record(&self) -> Option<&CandidateRecord> {
        self.selected_record.as_ref()
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// View of the candidate set for rendering and selection.
    pub fn option_list(&self) -> OptionList<'_> {
        OptionList::new(&self.records, &self.config.title, &self.config.subtitle, self.active_id.as_deref())
    }

    pub fn show_listbox(&self) -> bool {
        self.focused && !self.records.is_empty() && self.selected_record.is_none()
    }

    pub fn is_read_only(&self) -> bool {
        self.config.read_only || self.selected_record.is_some()
    }

    pub fn show_clear(&self) -> bool {
        self.selected_record.is_some() || !self.input.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.search_pending || self.in_flight.is_some()
    }

    pub fn phase(&self) -> LookupPhase {
        if self.error.is_some() {
            LookupPhase::Invalid
        } else if self.selected_record.is_some() {
            LookupPhase::Selected
        } else if self.is_loading() {
            LookupPhase::Searching
        } else if !self.records.is_empty() {
            LookupPhase::Listing
        } else {
            LookupPhase::Empty
        }
    }

    /// Passes when the field is optional or the selected id looks like a real id.
    pub fn check_validity(&self) -> bool {
        !self.config.required || self.selected_id.chars().count() >= self.settings.min_selected_id_length
    }

    // ===== TRANSITIONS =====

    /// Dispatch a message to its handler.
    pub fn update(&mut self, msg: LookupMsg) -> Vec<LookupEffect> {
        match msg {
            LookupMsg::Key(key) => self.handle_key(key),
            LookupMsg::InputChanged(text) => self.set_input_text(text),
            LookupMsg::Focus => {
                self.focus();
                Vec::new()
            }
            LookupMsg::Blur => {
                self.blur();
                Vec::new()
            }
            LookupMsg::SetValue(value) => self.set_value(value),
            LookupMsg::Clear => self.clear(),
            LookupMsg::Selected(id) => self.select(&id),
            LookupMsg::DebounceElapsed(generation) => self.debounce_elapsed(generation),
            LookupMsg::FetchCompleted { ticket, result } => self.fetch_completed(ticket, result),
        }
    }

    /// Resolve the initial record set: the bound value when present, else recents.
    pub fn mount(&mut self) -> Vec<LookupEffect> {
        match self.value.clone() {
            Some(id) => vec![self.dispatch(FetchKind::ById(id))],
            None => vec![self.dispatch(FetchKind::Recent)],
        }
    }

    pub fn handle_key(&mut self, key: LookupKey) -> Vec<LookupEffect> {
        self.error = None;
        match key {
            LookupKey::ArrowUp => {
                self.cycle_active(false);
                Vec::new()
            }
            LookupKey::ArrowDown => {
                self.cycle_active(true);
                Vec::new()
            }
            LookupKey::Enter => self.select_item(),
            LookupKey::Escape => self.clear(),
            LookupKey::Char(character) => {
                if self.is_read_only() {
                    return Vec::new();
                }
                self.input.push(character);
                self.input_changed()
            }
            LookupKey::Backspace => {
                if self.is_read_only() || self.input.pop().is_none() {
                    return Vec::new();
                }
                self.input_changed()
            }
        }
    }

    /// Replace the whole input text, as a host-owned text box reports it.
    pub fn set_input_text(&mut self, text: impl Into<String>) -> Vec<LookupEffect> {
        self.error = None;
        if self.is_read_only() {
            return Vec::new();
        }
        self.input = text.into();
        self.input_changed()
    }

    fn input_changed(&mut self) -> Vec<LookupEffect> {
        let length = self.input.chars().count();
        if length >= self.settings.min_search_length {
            self.search_generation += 1;
            self.search_pending = true;
            return vec![LookupEffect::ScheduleSearch {
                generation: self.search_generation,
                delay: self.settings.debounce,
            }];
        }

        let mut effects = self.cancel_search();
        if length == 0 {
            self.records.clear();
            self.active_id = None;
            effects.push(self.dispatch(FetchKind::Recent));
        } else {
            if self.in_flight == Some(FetchKind::Query) {
                self.requests.invalidate();
                self.in_flight = None;
            }
            self.error = Some(ValidationError::new(self.settings.min_length_message()));
        }
        effects
    }

    fn cancel_search(&mut self) -> Vec<LookupEffect> {
        if !self.search_pending {
            return Vec::new();
        }
        self.search_pending = false;
        vec![LookupEffect::CancelSearch]
    }

    fn debounce_elapsed(&mut self, generation: u64) -> Vec<LookupEffect> {
        if !self.search_pending || generation != self.search_generation {
            debug!(generation, current = self.search_generation, "ignoring superseded debounce timer");
            return Vec::new();
        }
        self.search_pending = false;
        vec![self.dispatch(FetchKind::Query)]
    }

    fn dispatch(&mut self, kind: FetchKind) -> LookupEffect {
        let search_term = match kind {
            FetchKind::Query => self.input.as_str(),
            FetchKind::Recent | FetchKind::ById(_) => "",
        };
        let searcher = self.config.searcher(search_term);
        self.error = None;
        self.in_flight = Some(kind.clone());
        let ticket = self.requests.issue(kind);
        debug!(
            sequence = ticket.sequence,
            kind = %ticket.kind,
            object = %searcher.object_name,
            search_term = %searcher.search_term,
            "lookup fetch dispatched"
        );
        LookupEffect::Fetch(FetchRequest { ticket, searcher })
    }

    fn fetch_completed(&mut self, ticket: FetchTicket, result: Result<String, lookup_types::SearchError>) -> Vec<LookupEffect> {
        if !self.requests.is_current(&ticket) {
            debug!(
                sequence = ticket.sequence,
                latest = self.requests.latest(),
                kind = %ticket.kind,
                "discarding stale lookup response"
            );
            return Vec::new();
        }
        self.in_flight = None;

        let records = match result.and_then(|payload| decode_candidates(&payload)) {
            Ok(records) => records,
            Err(error) => {
                warn!(kind = %ticket.kind, error = %error, "lookup fetch failed");
                self.error = Some(ValidationError::from(&error));
                return Vec::new();
            }
        };

        match ticket.kind {
            FetchKind::Query => {
                let mut records = records;
                sort_by_title(&mut records, &self.config.title);
                info!(record_count = records.len(), "lookup search completed");
                self.replace_records(records);
                if self.records.is_empty() {
                    return vec![LookupEffect::Emit(LookupEvent::Notify(Notification::no_records_found()))];
                }
                Vec::new()
            }
            FetchKind::Recent => {
                debug!(record_count = records.len(), "lookup recent records loaded");
                self.replace_records(records);
                Vec::new()
            }
            FetchKind::ById(id) => {
                let Some(record) = records.into_iter().next() else {
                    warn!(id = %id, "bound value did not resolve to a record");
                    return vec![LookupEffect::Emit(LookupEvent::Notify(Notification {
                        title: "Warning".into(),
                        variant: NotificationVariant::Warning,
                        message: format!("No record found for {id}."),
                    }))];
                };
                self.input = record.field_text(&self.config.title);
                self.selected_id = record.id();
                self.selected_record = Some(record.clone());
                self.replace_records(vec![record]);
                Vec::new()
            }
        }
    }

    fn replace_records(&mut self, records: Vec<CandidateRecord>) {
        self.records = records;
        self.active_id = None;
    }

    /// Move the active id forward or backward through the candidate ids, wrapping.
    pub fn cycle_active(&mut self, forwards: bool) {
        let ids: Vec<String> = self.records.iter().map(CandidateRecord::id).collect();
        if ids.is_empty() {
            return;
        }
        let current = self
            .active_id
            .as_ref()
            .and_then(|active| ids.iter().position(|id| id == active));
        let next = match current {
            None => 0,
            Some(index) if forwards => (index + 1) % ids.len(),
            Some(index) => (index + ids.len() - 1) % ids.len(),
        };
        self.active_id = ids.into_iter().nth(next);
    }

    /// Ask the option list to select its active (or sole) item.
    pub fn select_item(&mut self) -> Vec<LookupEffect> {
        if self.records.is_empty() {
            return Vec::new();
        }
        let selections = self.option_list().select_active(None);
        selections.iter().flat_map(|id| self.select(id)).collect()
    }

    /// Confirm the candidate with `id`, as signalled by the option list.
    pub fn select(&mut self, id: &str) -> Vec<LookupEffect> {
        let Some(record) = self.records.iter().find(|record| record.id() == id).cloned() else {
            warn!(id = %id, "selection does not match any candidate");
            return Vec::new();
        };
        info!(id = %id, "lookup record selected");
        let mut effects = self.cancel_search();
        self.requests.invalidate();
        self.in_flight = None;
        self.error = None;
        self.input = record.field_text(&self.config.title);
        self.selected_id = id.to_string();
        self.selected_record = Some(record);
        self.records.clear();
        self.active_id = None;
        effects.push(LookupEffect::Emit(LookupEvent::Selected(self.selected_id.clone())));
        effects
    }

    /// Drop the selection and text, reload recents and tell the parent the value is empty.
    pub fn clear(&mut self) -> Vec<LookupEffect> {
        if self.config.read_only {
            return Vec::new();
        }
        let mut effects = self.reset_selection();
        effects.push(LookupEffect::Emit(LookupEvent::Selected(String::new())));
        effects
    }

    fn reset_selection(&mut self) -> Vec<LookupEffect> {
        let mut effects = self.cancel_search();
        self.selected_id.clear();
        self.selected_record = None;
        self.input.clear();
        self.error = None;
        self.active_id = None;
        effects.push(self.dispatch(FetchKind::Recent));
        effects
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Close the popup and, for required fields, surface validity.
    pub fn blur(&mut self) {
        self.focused = false;
        if self.config.required {
            self.report_validity();
        }
    }

    /// Run [`check_validity`](Self::check_validity) and surface the configured message on failure.
    pub fn report_validity(&mut self) -> bool {
        let valid = self.check_validity();
        self.error = if valid {
            None
        } else {
            Some(ValidationError::new(self.config.message_when_input_error.clone()))
        };
        valid
    }

    /// Push a new bound value. A non-empty id triggers a lookup-by-id; an
    /// empty id drops the current selection without signalling the parent.
    pub fn set_value(&mut self, value: impl Into<String>) -> Vec<LookupEffect> {
        let value = value.into();
        if value.is_empty() {
            self.value = None;
            if self.selected_record.is_none() && self.selected_id.is_empty() {
                return Vec::new();
            }
            return self.reset_selection();
        }
        if self.value.as_deref() == Some(value.as_str()) && self.selected_id == value {
            return Vec::new();
        }
        self.value = Some(value.clone());
        let mut effects = self.cancel_search();
        effects.push(self.dispatch(FetchKind::ById(value)));
        effects
    }
}
