//! Keyboard input for the dashboard.
//!
//! Maps raw key events to [`AppEvent`]s. Anything unmapped is
//! [`AppEvent::None`] and only wakes the loop for a refresh.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Application-level events that can trigger state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Focus the next panel (VM, network, pool, then VM again)
    NextPanel,
    /// Move the cursor up
    NavigateUp,
    /// Move the cursor down
    NavigateDown,
    /// Start the selected resource
    Start,
    /// Stop the selected resource
    Stop,
    /// Leave the dashboard
    Quit,
    /// No action needed
    None,
}

/// Input handler for converting key events to app events.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Create a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Handle a key event and return the corresponding app event.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppEvent {
        // Release and repeat events arrive on some platforms; act on presses only.
        if key.kind != KeyEventKind::Press {
            return AppEvent::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppEvent::Quit;
        }

        match key.code {
            KeyCode::Tab => AppEvent::NextPanel,
            KeyCode::Up => AppEvent::NavigateUp,
            KeyCode::Down => AppEvent::NavigateDown,
            KeyCode::F(1) => AppEvent::Start,
            KeyCode::F(2) => AppEvent::Stop,
            KeyCode::F(10) => AppEvent::Quit,
            _ => AppEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_hotkeys() {
        let mut handler = InputHandler::new();

        assert_eq!(handler.handle_key(key_event(KeyCode::Tab)), AppEvent::NextPanel);
        assert_eq!(handler.handle_key(key_event(KeyCode::F(1))), AppEvent::Start);
        assert_eq!(handler.handle_key(key_event(KeyCode::F(2))), AppEvent::Stop);
        assert_eq!(handler.handle_key(key_event(KeyCode::F(10))), AppEvent::Quit);
    }

    #[test]
    fn test_navigation_keys() {
        let mut handler = InputHandler::new();

        assert_eq!(handler.handle_key(key_event(KeyCode::Up)), AppEvent::NavigateUp);
        assert_eq!(handler.handle_key(key_event(KeyCode::Down)), AppEvent::NavigateDown);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut handler = InputHandler::new();

        assert_eq!(
            handler.handle_key(key_event_with_mods(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            AppEvent::Quit
        );
        assert_eq!(handler.handle_key(key_event(KeyCode::Char('c'))), AppEvent::None);
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut handler = InputHandler::new();

        for code in [KeyCode::Char('q'), KeyCode::Esc, KeyCode::Enter, KeyCode::F(3), KeyCode::Left] {
            assert_eq!(handler.handle_key(key_event(code)), AppEvent::None);
        }
    }

    #[test]
    fn test_release_is_ignored() {
        let mut handler = InputHandler::new();
        let release = KeyEvent {
            code: KeyCode::F(1),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(handler.handle_key(release), AppEvent::None);
    }
}
