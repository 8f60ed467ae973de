//! Key mapping from terminal events to game inputs.

use crate::types::{Direction, FormInput, GameAction, ReplayDecision};
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Direction keys: arrows, vim (hjkl) and WASD.
pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Direction::Up)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Direction::Right)
        }
        _ => None,
    }
}

/// Map keyboard input on the play screen to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if let Some(dir) = direction_for(key.code) {
        return Some(GameAction::Move(dir));
    }
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('f') | KeyCode::Char('F') => {
            Some(GameAction::Flip)
        }
        KeyCode::Char('.') => Some(GameAction::Resolve),
        _ => None,
    }
}

/// Map keyboard input on the settings form.
pub fn handle_form_key(key: KeyEvent) -> Option<FormInput> {
    match key.code {
        KeyCode::Enter => Some(FormInput::Submit),
        KeyCode::Esc => Some(FormInput::Cancel),
        KeyCode::Tab | KeyCode::Down => Some(FormInput::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(FormInput::PrevField),
        KeyCode::Backspace => Some(FormInput::Backspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(FormInput::Char(c))
        }
        _ => None,
    }
}

/// Map keyboard input on the end-of-round question.
///
/// Only an explicit `y` accepts. Enter also flips tiles, so a held Enter from
/// the last flip must not skip the report.
pub fn handle_replay_key(key: KeyEvent) -> Option<ReplayDecision> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(ReplayDecision::Accept),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(ReplayDecision::Decline),
        _ => None,
    }
}

/// Terminal cell of a left-button press, if this is one.
pub fn mouse_click(event: MouseEvent) -> Option<(u16, u16)> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((event.column, event.row)),
        _ => None,
    }
}

/// Ctrl+C, honoured on every screen.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Check if key should quit the game (play and intro screens).
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) || is_interrupt(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::Move(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(GameAction::Move(Direction::Right))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::Move(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(GameAction::Move(Direction::Down))
        );

        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('H'))),
            Some(GameAction::Move(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('w'))),
            Some(GameAction::Move(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('J'))),
            Some(GameAction::Move(Direction::Down))
        );
    }

    #[test]
    fn test_flip_keys() {
        for code in [KeyCode::Enter, KeyCode::Char(' '), KeyCode::Char('f')] {
            assert_eq!(handle_key_event(KeyEvent::from(code)), Some(GameAction::Flip));
        }
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('.'))),
            Some(GameAction::Resolve)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_form_keys() {
        assert_eq!(
            handle_form_key(KeyEvent::from(KeyCode::Char('7'))),
            Some(FormInput::Char('7'))
        );
        // Letters are typed, not treated as movement.
        assert_eq!(
            handle_form_key(KeyEvent::from(KeyCode::Char('j'))),
            Some(FormInput::Char('j'))
        );
        assert_eq!(handle_form_key(KeyEvent::from(KeyCode::Tab)), Some(FormInput::NextField));
        assert_eq!(handle_form_key(KeyEvent::from(KeyCode::Up)), Some(FormInput::PrevField));
        assert_eq!(handle_form_key(KeyEvent::from(KeyCode::Enter)), Some(FormInput::Submit));
        assert_eq!(handle_form_key(KeyEvent::from(KeyCode::Esc)), Some(FormInput::Cancel));
        assert_eq!(
            handle_form_key(KeyEvent::from(KeyCode::Backspace)),
            Some(FormInput::Backspace)
        );
        assert_eq!(
            handle_form_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_replay_keys() {
        assert_eq!(
            handle_replay_key(KeyEvent::from(KeyCode::Char('y'))),
            Some(ReplayDecision::Accept)
        );
        assert_eq!(
            handle_replay_key(KeyEvent::from(KeyCode::Char('N'))),
            Some(ReplayDecision::Decline)
        );
        assert_eq!(handle_replay_key(KeyEvent::from(KeyCode::Char('q'))), None);
        // Flip keys carried over from the last tile are ignored.
        for code in [KeyCode::Enter, KeyCode::Char(' '), KeyCode::Char('f')] {
            assert_eq!(handle_replay_key(KeyEvent::from(code)), None);
        }
    }

    #[test]
    fn test_mouse_click() {
        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 3,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(mouse_click(down), Some((12, 3)));

        let right = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..down
        };
        assert_eq!(mouse_click(right), None);

        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            ..down
        };
        assert_eq!(mouse_click(moved), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(!is_interrupt(KeyEvent::from(KeyCode::Char('c'))));
    }
}
