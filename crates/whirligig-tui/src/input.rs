use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::keymap::key_name;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Forward a released key to the track
    KeyUp(String),
    /// Native scroll by this many steps (negative is leftwards)
    FreeScroll(i32),
    /// Jump straight to a slide, like a custom pagination control
    GoTo(usize),
    Next,
    Prev,
    Press(u16, u16),
    Drag(u16, u16),
    Release(u16, u16),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Left, KeyModifiers::SHIFT) => Action::FreeScroll(-1),
        (KeyCode::Right, KeyModifiers::SHIFT) => Action::FreeScroll(1),

        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::Next,
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::Prev,

        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::GoTo(c as usize - '1' as usize)
        }

        (code, _) => key_name(code).map(Action::KeyUp).unwrap_or(Action::None),
    }
}

/// Handle a mouse event and return the corresponding action
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => Action::FreeScroll(1),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => Action::FreeScroll(-1),
        MouseEventKind::Down(MouseButton::Left) => Action::Press(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => Action::Drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => Action::Release(mouse.column, mouse.row),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_arrows_become_key_up() {
        assert_eq!(
            handle_key_event(key(KeyCode::Right, KeyModifiers::NONE)),
            Action::KeyUp("ArrowRight".to_string())
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('l'), KeyModifiers::NONE)),
            Action::KeyUp("l".to_string())
        );
    }

    #[test]
    fn test_shift_arrows_free_scroll() {
        assert_eq!(
            handle_key_event(key(KeyCode::Left, KeyModifiers::SHIFT)),
            Action::FreeScroll(-1)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Right, KeyModifiers::SHIFT)),
            Action::FreeScroll(1)
        );
    }

    #[test]
    fn test_digits_jump() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('1'), KeyModifiers::NONE)),
            Action::GoTo(0)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('9'), KeyModifiers::NONE)),
            Action::GoTo(8)
        );
    }

    #[test]
    fn test_mouse_actions() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown)),
            Action::FreeScroll(1)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left))),
            Action::Press(12, 4)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left))),
            Action::Release(12, 4)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved)),
            Action::None
        );
    }
}
