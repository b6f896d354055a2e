//! Async driver for [`LookupState`].
//!
//! The controller executes the effects returned by the state machine: it owns
//! the single debounce timer, spawns search-service calls, and funnels timer
//! firings and responses back through one channel so every state mutation
//! happens on the caller's task, one message at a time.

use std::sync::Arc;

use lookup_types::{FieldConfig, LookupEvent};
use tokio::sync::mpsc;
use tracing::debug;

use super::{
    Debouncer, LookupSettings, LookupState,
    effects::{FetchRequest, LookupEffect, LookupKey, LookupMsg},
    sequencer::FetchKind,
};
use crate::service::SearchService;

pub struct LookupController {
    state: LookupState,
    service: Arc<dyn SearchService>,
    debouncer: Debouncer,
    sender: mpsc::UnboundedSender<LookupMsg>,
    receiver: mpsc::UnboundedReceiver<LookupMsg>,
    events: mpsc::UnboundedSender<LookupEvent>,
}

impl std::fmt::Debug for LookupController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupController")
            .field("state", &self.state)
            .field("debounce_pending", &self.debouncer.is_pending())
            .finish()
    }
}

impl LookupController {
    /// Create a controller. Outward signals are delivered on `events`.
    pub fn new(
        config: FieldConfig,
        settings: LookupSettings,
        service: Arc<dyn SearchService>,
        events: mpsc::UnboundedSender<LookupEvent>,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            state: LookupState::new(config, settings),
            service,
            debouncer: Debouncer::new(),
            sender,
            receiver,
            events,
        }
    }

    /// Bind an initial value; takes effect on [`mount`](Self::mount).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.state = self.state.with_value(value);
        self
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    // The operations below spawn Tokio tasks and must run inside a runtime.

    pub fn mount(&mut self) {
        let effects = self.state.mount();
        self.apply(effects);
    }

    pub fn handle_key(&mut self, key: LookupKey) {
        self.process_message(LookupMsg::Key(key));
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.process_message(LookupMsg::InputChanged(text.into()));
    }

    pub fn focus(&mut self) {
        self.process_message(LookupMsg::Focus);
    }

    pub fn blur(&mut self) {
        self.process_message(LookupMsg::Blur);
    }

    /// Push the externally bound value; a non-empty id triggers a lookup-by-id.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.process_message(LookupMsg::SetValue(value.into()));
    }

    pub fn clear(&mut self) {
        self.process_message(LookupMsg::Clear);
    }

    /// Select the candidate with `id`, as a pointer click on a row would.
    pub fn select(&mut self, id: impl Into<String>) {
        self.process_message(LookupMsg::Selected(id.into()));
    }

    pub fn check_validity(&self) -> bool {
        self.state.check_validity()
    }

    pub fn report_validity(&mut self) -> bool {
        self.state.report_validity()
    }

    /// Wait for the next timer firing or service response.
    pub async fn next_message(&mut self) -> Option<LookupMsg> {
        self.receiver.recv().await
    }

    /// Feed one message through the state machine and execute its effects.
    pub fn process_message(&mut self, msg: LookupMsg) {
        let effects = self.state.update(msg);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<LookupEffect>) {
        for effect in effects {
            match effect {
                LookupEffect::ScheduleSearch { generation, delay } => {
                    let sender = self.sender.clone();
                    self.debouncer.schedule(delay, async move {
                        let _ = sender.send(LookupMsg::DebounceElapsed(generation));
                    });
                }
                LookupEffect::CancelSearch => self.debouncer.cancel(),
                LookupEffect::Fetch(request) => self.spawn_fetch(request),
                LookupEffect::Emit(event) => {
                    if self.events.send(event).is_err() {
                        debug!("lookup event listener dropped");
                    }
                }
            }
        }
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let FetchRequest { ticket, searcher } = request;
            let result = match &ticket.kind {
                FetchKind::Recent => service.fetch_recent(&searcher).await,
                FetchKind::Query => service.fetch_by_query(&searcher).await,
                FetchKind::ById(id) => service.fetch_by_id(&searcher, id).await,
            };
            let _ = sender.send(LookupMsg::FetchCompleted { ticket, result });
        });
    }
}
