//! Key bindings for the lookup field.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lookup_engine::LookupKey;

/// What a key press means to the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Lookup(LookupKey),
    /// Move focus in or out of the field (blur runs validation).
    ToggleFocus,
    Exit,
    Ignore,
}

/// Map a Crossterm key event to a [`KeyAction`].
///
/// Only presses and repeats count; release events are ignored so terminals
/// reporting both do not double every keystroke.
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if control => KeyAction::Exit,
        KeyCode::Char(_) if control || key.modifiers.contains(KeyModifiers::ALT) => KeyAction::Ignore,
        KeyCode::Char(character) => KeyAction::Lookup(LookupKey::Char(character)),
        KeyCode::Backspace => KeyAction::Lookup(LookupKey::Backspace),
        KeyCode::Up => KeyAction::Lookup(LookupKey::ArrowUp),
        KeyCode::Down => KeyAction::Lookup(LookupKey::ArrowDown),
        KeyCode::Enter => KeyAction::Lookup(LookupKey::Enter),
        KeyCode::Esc => KeyAction::Lookup(LookupKey::Escape),
        KeyCode::Tab | KeyCode::BackTab => KeyAction::ToggleFocus,
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), KeyAction::Lookup(LookupKey::ArrowDown));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), KeyAction::Lookup(LookupKey::ArrowUp));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), KeyAction::Lookup(LookupKey::Escape));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Tab)), KeyAction::ToggleFocus);
    }

    #[test]
    fn control_c_exits_and_other_chords_are_ignored() {
        assert_eq!(map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), KeyAction::Exit);
        assert_eq!(map_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)), KeyAction::Ignore);
        assert_eq!(map_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)), KeyAction::Lookup(LookupKey::Char('A')));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut key = KeyEvent::from(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), KeyAction::Ignore);
    }
}
