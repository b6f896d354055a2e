//! Front-end state wrapped around the lookup controller.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEvent};
use lookup_engine::LookupController;
use lookup_types::{LookupEvent, Notification};
use tracing::{debug, info};

use crate::keys::{KeyAction, map_key};

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Clone, Debug)]
struct Toast {
    notification: Notification,
    shown_at: Instant,
}

/// Application state for the terminal front end.
///
/// The controller owns every piece of lookup state; the app only adds what a
/// terminal needs on top: toasts, the throbber frame and the exit flag.
#[derive(Debug)]
pub struct App {
    pub controller: LookupController,
    toast: Option<Toast>,
    /// Last id signalled through `LookupEvent::Selected` (empty after a clear).
    last_selected: Option<String>,
    pub throbber_idx: usize,
    should_exit: bool,
}

impl App {
    pub fn new(controller: LookupController) -> Self {
        Self {
            controller,
            toast: None,
            last_selected: None,
            throbber_idx: 0,
            should_exit: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn last_selected(&self) -> Option<&str> {
        self.last_selected.as_deref().filter(|id| !id.is_empty())
    }

    pub fn toast(&self) -> Option<&Notification> {
        self.toast.as_ref().map(|toast| &toast.notification)
    }

    /// Route a raw terminal event. Returns true when the screen should redraw.
    pub fn handle_terminal_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::FocusGained => {
                self.controller.focus();
                true
            }
            Event::FocusLost => {
                self.controller.blur();
                true
            }
            Event::Resize(_, _) => true,
            Event::Mouse(_) | Event::Paste(_) => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match map_key(key) {
            KeyAction::Exit => {
                self.should_exit = true;
                false
            }
            KeyAction::ToggleFocus => {
                if self.controller.state().is_focused() {
                    self.controller.blur();
                } else {
                    self.controller.focus();
                }
                true
            }
            KeyAction::Lookup(lookup_key) => {
                if !self.controller.state().is_focused() {
                    return false;
                }
                self.controller.handle_key(lookup_key);
                true
            }
            KeyAction::Ignore => false,
        }
    }

    /// Apply a signal emitted by the controller.
    pub fn handle_lookup_event(&mut self, event: LookupEvent) {
        match event {
            LookupEvent::Selected(id) => {
                info!(id = %id, "lookup selection changed");
                self.last_selected = Some(id);
            }
            LookupEvent::Notify(notification) => {
                debug!(variant = %notification.variant, message = %notification.message, "showing toast");
                self.toast = Some(Toast {
                    notification,
                    shown_at: Instant::now(),
                });
            }
        }
    }

    /// Advance animations and expire toasts. Returns true when something visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| now.duration_since(toast.shown_at) >= TOAST_DURATION)
        {
            self.toast = None;
            changed = true;
        }
        if self.controller.state().is_loading() {
            self.throbber_idx = self.throbber_idx.wrapping_add(1);
            changed = true;
        } else if self.throbber_idx != 0 {
            self.throbber_idx = 0;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use lookup_engine::{LookupSettings, NullSearchService};
    use lookup_types::FieldConfig;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn app() -> App {
        let (events, _receiver) = mpsc::unbounded_channel();
        let controller = LookupController::new(FieldConfig::default(), LookupSettings::default(), Arc::new(NullSearchService), events);
        App::new(controller)
    }

    #[test]
    fn keys_are_ignored_until_focused() {
        let mut app = app();
        assert!(!app.handle_key(KeyEvent::from(KeyCode::Char('a'))));
        assert_eq!(app.controller.state().input(), "");

        assert!(app.handle_key(KeyEvent::from(KeyCode::Tab)));
        assert!(app.controller.state().is_focused());
        app.handle_key(KeyEvent::from(KeyCode::Char('a')));
        assert_eq!(app.controller.state().input(), "a");
    }

    #[test]
    fn control_c_requests_exit() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_exit());
    }

    #[test]
    fn toasts_expire_after_their_duration() {
        let mut app = app();
        app.handle_lookup_event(LookupEvent::Notify(Notification::no_records_found()));
        assert!(app.toast().is_some());
        assert!(!app.tick(Instant::now()));
        assert!(app.tick(Instant::now() + TOAST_DURATION));
        assert!(app.toast().is_none());
    }

    #[test]
    fn cleared_selection_reports_none() {
        let mut app = app();
        app.handle_lookup_event(LookupEvent::Selected("001".into()));
        assert_eq!(app.last_selected(), Some("001"));
        app.handle_lookup_event(LookupEvent::Selected(String::new()));
        assert_eq!(app.last_selected(), None);
    }
}
