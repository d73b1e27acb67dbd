//! The terminal application updater.

use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

/// The available directions to move the cursor to.
#[derive(Debug, PartialEq)]
pub enum MoveCursorDirection {
    Up,
    Left,
    Down,
    Right,
}

pub fn update(app: &mut App, key_event: KeyEvent) {
    use MoveCursorDirection::*;

    match key_event.code {
        KeyCode::Up | KeyCode::Char('i') | KeyCode::Char('w') => app.move_cursor(Up),
        KeyCode::Left | KeyCode::Char('j') | KeyCode::Char('a') => app.move_cursor(Left),
        KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('s') => app.move_cursor(Down),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => app.move_cursor(Right),
        KeyCode::Enter | KeyCode::Char(' ') => app.dig_or_restart_or_confirm_leave(),
        KeyCode::Char('f') => app.toggle_flag(),
        KeyCode::Char('c') => {
            if key_event.modifiers == KeyModifiers::CONTROL {
                app.quit();
            } else {
                app.chord();
            }
        }
        KeyCode::Char('n') => app.new_game(),
        KeyCode::Esc | KeyCode::Char('q') => app.confirm_or_cancel_leave_or_leave(),
        _ => {}
    };
}

pub fn update_mouse(app: &mut App, mouse_event: MouseEvent) {
    let (column, row) = (mouse_event.column, mouse_event.row);

    match mouse_event.kind {
        MouseEventKind::Down(button) => app.mouse_down(button, column, row),
        MouseEventKind::Up(button) => app.mouse_up(button, column, row),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => app.mouse_moved(column, row),
        _ => {}
    };
}

#[cfg(test)]
mod test {
    use super::{update, update_mouse};
    use crate::app::App;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::layout::Rect;
    use tilesweep::{GameConfig, GameSession, MineField};

    fn create_stub_app() -> App {
        let config = GameConfig::new(3, 3, 1).unwrap();
        let mut app = App::new(config);
        app.session = GameSession::with_field(config, MineField::with_mines(3, 3, [(2, 2)]));
        app.grid_area = Rect::new(0, 0, 15, 9);
        app.visible_columns_amount = 3;
        app.visible_rows_amount = 3;
        app
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
    fn ctrl_c_quits_right_away() {
        let mut app = create_stub_app();
        update(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(app.should_quit);
    }

    #[test]
    fn keys_move_the_cursor_and_flag() {
        let mut app = create_stub_app();
        update(&mut app, KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        update(&mut app, KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE));
        update(&mut app, KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE));

        assert_eq!(app.cursor_position, (1, 1));
        assert!(app.session.field().get(1, 1).unwrap().is_flagged());
    }

    #[test]
    fn mouse_events_are_dispatched_by_kind() {
        let mut app = create_stub_app();
        update_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Right), 12, 7));
        assert!(app.session.field().get(2, 2).unwrap().is_flagged());

        update_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert!(app.session.field().all_safe_revealed());
    }
}
