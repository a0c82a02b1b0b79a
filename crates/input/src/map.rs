//! Key and mouse mapping from terminal events to game actions.

use crate::types::{BoardGeometry, GameAction};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// What the host loop should do with one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Action(GameAction),
    Quit,
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Enter
        | KeyCode::Char('s')
        | KeyCode::Char('S')
        | KeyCode::Char('r')
        | KeyCode::Char('R') => Some(GameAction::Start),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Map a left-button mouse event to a gesture at the matching board-space point.
///
/// Other buttons and plain motion without a pressed button are ignored.
pub fn handle_mouse_event(mouse: MouseEvent, geometry: &BoardGeometry) -> Option<GameAction> {
    let point = || geometry.to_board_point(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(GameAction::BeginDrag(point())),
        MouseEventKind::Drag(MouseButton::Left) => Some(GameAction::MoveDrag(point())),
        MouseEventKind::Up(MouseButton::Left) => Some(GameAction::EndDrag(point())),
        _ => None,
    }
}

/// Map any terminal event.
pub fn handle_event(event: &Event, geometry: &BoardGeometry) -> Option<InputEvent> {
    match event {
        Event::Key(key) if should_quit(*key) => Some(InputEvent::Quit),
        Event::Key(key) => handle_key_event(*key).map(InputEvent::Action),
        Event::Mouse(mouse) => handle_mouse_event(*mouse, geometry).map(InputEvent::Action),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoardPoint;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn geometry() -> BoardGeometry {
        BoardGeometry {
            origin_x: 2,
            origin_y: 1,
            cell_w: 5,
            cell_h: 2,
            cell_size: 100,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_start_keys() {
        for code in [
            KeyCode::Enter,
            KeyCode::Char('s'),
            KeyCode::Char('S'),
            KeyCode::Char('r'),
            KeyCode::Char('R'),
        ] {
            assert_eq!(
                handle_key_event(KeyEvent::from(code)),
                Some(GameAction::Start)
            );
        }
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = KeyEvent::from(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(key), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }

    #[test]
    fn test_left_button_gesture() {
        let g = geometry();
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 2, 1), &g),
            Some(GameAction::BeginDrag(BoardPoint::new(10, 25)))
        );
        assert!(matches!(
            handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 9, 4), &g),
            Some(GameAction::MoveDrag(_))
        ));
        assert!(matches!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 9, 4), &g),
            Some(GameAction::EndDrag(_))
        ));
    }

    #[test]
    fn test_other_mouse_events_ignored() {
        let g = geometry();
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 3, 3), &g),
            None
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved, 3, 3), &g),
            None
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollUp, 3, 3), &g),
            None
        );
    }

    #[test]
    fn test_handle_event_dispatch() {
        let g = geometry();
        assert_eq!(
            handle_event(&Event::Key(KeyEvent::from(KeyCode::Char('q'))), &g),
            Some(InputEvent::Quit)
        );
        assert_eq!(
            handle_event(&Event::Key(KeyEvent::from(KeyCode::Enter)), &g),
            Some(InputEvent::Action(GameAction::Start))
        );
        assert_eq!(handle_event(&Event::FocusGained, &g), None);
    }
}
