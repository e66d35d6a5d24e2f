//! Keyboard shortcut handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use devpulse_core::series::MetricKey;

/// TUI keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Cancel,
    SelectMetric(MetricKey),
    CycleTeam,
    PreviousRange,
    NextRange,
    Refresh,
    Export,
    SwitchTable,
    ToggleLogs,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Home,
    End,
    None,
}

/// Map a key event to an action.
#[must_use]
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Cancel,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('1') => KeyAction::SelectMetric(MetricKey::Lines),
        KeyCode::Char('2') => KeyAction::SelectMetric(MetricKey::Acceptance),
        KeyCode::Char('3') => KeyAction::SelectMetric(MetricKey::Suggestions),
        KeyCode::Char('t') => KeyAction::CycleTeam,
        KeyCode::Char('[') => KeyAction::PreviousRange,
        KeyCode::Char(']') => KeyAction::NextRange,
        KeyCode::Char('r') => KeyAction::Refresh,
        KeyCode::Char('e') => KeyAction::Export,
        KeyCode::Tab => KeyAction::SwitchTable,
        KeyCode::Char('l') => KeyAction::ToggleLogs,
        KeyCode::Up => KeyAction::ScrollUp,
        KeyCode::Down => KeyAction::ScrollDown,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        KeyCode::Home => KeyAction::Home,
        KeyCode::End => KeyAction::End,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyAction {
        map_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn quit_keys() {
        assert_eq!(key(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(key(KeyCode::Esc), KeyAction::Quit);
    }

    #[test]
    fn ctrl_c_cancels() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event), KeyAction::Cancel);
        assert_eq!(key(KeyCode::Char('c')), KeyAction::None);
    }

    #[test]
    fn metric_keys() {
        assert_eq!(
            key(KeyCode::Char('1')),
            KeyAction::SelectMetric(MetricKey::Lines)
        );
        assert_eq!(
            key(KeyCode::Char('2')),
            KeyAction::SelectMetric(MetricKey::Acceptance)
        );
        assert_eq!(
            key(KeyCode::Char('3')),
            KeyAction::SelectMetric(MetricKey::Suggestions)
        );
        assert_eq!(key(KeyCode::Char('4')), KeyAction::None);
    }

    #[test]
    fn control_keys() {
        assert_eq!(key(KeyCode::Char('t')), KeyAction::CycleTeam);
        assert_eq!(key(KeyCode::Char('[')), KeyAction::PreviousRange);
        assert_eq!(key(KeyCode::Char(']')), KeyAction::NextRange);
        assert_eq!(key(KeyCode::Char('r')), KeyAction::Refresh);
        assert_eq!(key(KeyCode::Char('e')), KeyAction::Export);
        assert_eq!(key(KeyCode::Tab), KeyAction::SwitchTable);
        assert_eq!(key(KeyCode::Char('l')), KeyAction::ToggleLogs);
    }

    #[test]
    fn scroll_keys() {
        assert_eq!(key(KeyCode::Up), KeyAction::ScrollUp);
        assert_eq!(key(KeyCode::Down), KeyAction::ScrollDown);
        assert_eq!(key(KeyCode::PageUp), KeyAction::PageUp);
        assert_eq!(key(KeyCode::PageDown), KeyAction::PageDown);
        assert_eq!(key(KeyCode::Home), KeyAction::Home);
        assert_eq!(key(KeyCode::End), KeyAction::End);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key(event), KeyAction::None);
    }

    #[test]
    fn unknown_key() {
        assert_eq!(key(KeyCode::Char('z')), KeyAction::None);
    }
}
