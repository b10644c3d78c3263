//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings for the unfocused trace view. Keys
/// typed into a focused search box never go through this map.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers are compared; event kind and lock state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Vim-style scrolling
        keys.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::ScrollDown);
        keys.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::ScrollUp);
        keys.bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::ScrollToTop);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom);
        keys.bind(KeyCode::Char('G'), KeyModifiers::NONE, KeyAction::ScrollToBottom);
        keys.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::ScrollToTop);
        keys.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::ScrollToBottom);

        // Arrow key scrolling
        keys.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::ScrollUp);
        keys.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::ScrollDown);

        // Page navigation
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        keys.bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        keys.bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);

        // Header navigation
        keys.bind(KeyCode::Char(']'), KeyModifiers::NONE, KeyAction::NextHeader);
        keys.bind(KeyCode::Char('['), KeyModifiers::NONE, KeyAction::PrevHeader);

        // View
        keys.bind(KeyCode::Char('f'), KeyModifiers::NONE, KeyAction::CycleFinalOnly);
        keys.bind(KeyCode::Char('a'), KeyModifiers::NONE, KeyAction::ToggleAnnotations);
        keys.bind(KeyCode::Char('w'), KeyModifiers::NONE, KeyAction::ToggleWrap);

        // Search
        keys.bind(KeyCode::Char('/'), KeyModifiers::NONE, KeyAction::StartSearch);
        keys.bind(KeyCode::Char('f'), KeyModifiers::CONTROL, KeyAction::StartSearch);
        keys.bind(KeyCode::Char('n'), KeyModifiers::NONE, KeyAction::NextMatch);
        keys.bind(KeyCode::Char('N'), KeyModifiers::SHIFT, KeyAction::PrevMatch);
        keys.bind(KeyCode::Char('N'), KeyModifiers::NONE, KeyAction::PrevMatch);
        keys.bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::ClearSearch);

        // Application controls
        keys.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn brackets_map_to_header_navigation() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Char(']'), KeyModifiers::NONE)),
            Some(KeyAction::NextHeader)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('['), KeyModifiers::NONE)),
            Some(KeyAction::PrevHeader)
        );
    }

    #[test]
    fn uppercase_n_maps_to_prev_match_with_or_without_shift() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Char('N'), KeyModifiers::SHIFT)),
            Some(KeyAction::PrevMatch)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('N'), KeyModifiers::NONE)),
            Some(KeyAction::PrevMatch)
        );
    }

    #[test]
    fn ctrl_c_and_q_quit() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn plain_f_cycles_final_only_and_ctrl_f_searches() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Char('f'), KeyModifiers::NONE)),
            Some(KeyAction::CycleFinalOnly)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('f'), KeyModifiers::CONTROL)),
            Some(KeyAction::StartSearch)
        );
    }

    #[test]
    fn lookup_ignores_event_kind_and_state() {
        let bindings = KeyBindings::default();
        let mut event = key(KeyCode::Char('w'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Repeat;
        event.state = KeyEventState::CAPS_LOCK;

        assert_eq!(bindings.get(event), Some(KeyAction::ToggleWrap));
    }

    #[test]
    fn unbound_key_is_none() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }
}
