//! Terminal events through the view geometry into a controlled session.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use tui_sumten::adapter::{Controller, ManualTicks};
use tui_sumten::core::{ScriptedCells, Session};
use tui_sumten::input::{handle_event, InputEvent};
use tui_sumten::term::{AnchorY, GameView, Viewport};
use tui_sumten::types::{GameAction, PhaseKind};

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Terminal position of the middle of board cell (row, col) in a top-anchored
/// default view: 1 column of border, cells 6 wide and 3 tall.
fn term_pos(row: u16, col: u16) -> (u16, u16) {
    (1 + col * 6 + 3, 1 + row * 3 + 1)
}

fn feed(
    controller: &mut Controller<ScriptedCells, ManualTicks>,
    view: &GameView,
    vp: Viewport,
    ev: Event,
) -> Option<InputEvent> {
    let mapped = handle_event(&ev, &view.geometry(vp));
    if let Some(InputEvent::Action(action)) = mapped {
        controller.dispatch(action).unwrap();
    }
    mapped
}

#[test]
fn mouse_drag_selects_cells_under_pointer() {
    let vp = Viewport::new(26, 14);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let mut controller = Controller::new(
        Session::new(ScriptedCells::constant(5)),
        ManualTicks::new(),
    );

    let enter = Event::Key(KeyEvent::from(KeyCode::Enter));
    assert_eq!(
        feed(&mut controller, &view, vp, enter),
        Some(InputEvent::Action(GameAction::Start))
    );
    assert_eq!(controller.snapshot().phase, PhaseKind::Running);

    let (x0, y0) = term_pos(1, 1);
    let (x1, y1) = term_pos(1, 2);
    feed(&mut controller, &view, vp, mouse(MouseEventKind::Down(MouseButton::Left), x0, y0));
    feed(&mut controller, &view, vp, mouse(MouseEventKind::Drag(MouseButton::Left), x1, y1));
    assert!(controller.snapshot().is_highlighted(1, 1));
    assert!(controller.snapshot().is_highlighted(1, 2));
    assert!(!controller.snapshot().is_highlighted(1, 3));

    feed(&mut controller, &view, vp, mouse(MouseEventKind::Up(MouseButton::Left), x1, y1));
    let snap = controller.snapshot();
    assert_eq!(snap.score, 10);
    assert_eq!(snap.combo, 1);
    assert_eq!(snap.matches, 1);
}

#[test]
fn drag_past_the_border_clamps_to_edge_cells() {
    let vp = Viewport::new(60, 20);
    let view = GameView::default();
    let mut controller = Controller::new(
        Session::new(ScriptedCells::constant(1)),
        ManualTicks::new(),
    );
    controller.start().unwrap();

    // From far top-left to far bottom-right selects the whole board.
    feed(&mut controller, &view, vp, mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
    feed(&mut controller, &view, vp, mouse(MouseEventKind::Up(MouseButton::Left), 59, 19));

    let commit = controller.snapshot().last_commit.unwrap();
    assert_eq!(commit.sum, 16);
    assert_eq!(commit.rect.area(), 16);
}

#[test]
fn quit_keys_are_not_actions() {
    let vp = Viewport::new(26, 14);
    let view = GameView::default();
    let mut controller = Controller::new(
        Session::new(ScriptedCells::constant(5)),
        ManualTicks::new(),
    );

    let q = Event::Key(KeyEvent::from(KeyCode::Char('q')));
    assert_eq!(feed(&mut controller, &view, vp, q), Some(InputEvent::Quit));
    let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(feed(&mut controller, &view, vp, ctrl_c), Some(InputEvent::Quit));
    assert_eq!(controller.snapshot().phase, PhaseKind::Idle);
}

#[test]
fn gestures_before_start_are_ignored() {
    let vp = Viewport::new(26, 14);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let mut controller = Controller::new(
        Session::new(ScriptedCells::constant(5)),
        ManualTicks::new(),
    );

    let (x, y) = term_pos(0, 0);
    feed(&mut controller, &view, vp, mouse(MouseEventKind::Down(MouseButton::Left), x, y));
    feed(&mut controller, &view, vp, mouse(MouseEventKind::Up(MouseButton::Left), x, y));
    let snap = controller.snapshot();
    assert_eq!(snap.phase, PhaseKind::Idle);
    assert!(snap.last_commit.is_none());
    assert!(snap.drag.is_none());
}
