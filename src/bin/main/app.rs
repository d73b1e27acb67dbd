//! The terminal application

use crate::game_ui::{render_game, CELL_HEIGHT, CELL_WIDTH};
use crate::tui::Render;
use crate::update::MoveCursorDirection::{self, Down, Left, Right, Up};
use crossterm::event::MouseButton;
use ratatui::{layout::Rect, Frame};
use std::cmp;
use tilesweep::{GameConfig, GameSession};

/// The board position reported to the session when the pointer is outside of the visible grid.
const OFF_BOARD: (i32, i32) = (-1, -1);

/// The terminal application
#[derive(Debug)]
pub struct App {
    /// The game instance.
    pub session: GameSession,
    /// The amount of rows that should be rendered in the field. Must always be less or equal to the total amount of
    /// rows.
    pub visible_rows_amount: u16,
    /// The amount of columns that should be rendered in the field. Must always be less or equal to the total amount of
    /// columns.
    pub visible_columns_amount: u16,
    /// The window is a sliding frame-view into the field. This is used when the field is too big to be displayed in the
    /// given container.
    ///
    /// The values represent the first column/row (respectively) from which the visible amount of columns/rows is
    /// displayed.
    pub window_offset: (u16, u16),
    /// The position `(x, y)` of the currently selected tile relative to the whole field.
    pub cursor_position: (u16, u16),
    /// Where the visible tiles have been drawn last time. Used to map the mouse events onto the board.
    pub grid_area: Rect,
    /// Where the new-game button has been drawn last time.
    pub retry_button_area: Rect,
    /// Whether the cancel key was pressed and now the app's waiting for a confirmation from the user to quit.
    pub awaiting_leave_confirmation: bool,
    /// Indicates that the main application loop should be broken on the next tick and thus the app should quit.
    pub should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        App {
            session: GameSession::new(config),
            visible_rows_amount: 0,
            visible_columns_amount: 0,
            window_offset: (0, 0),
            cursor_position: (0, 0),
            grid_area: Rect::default(),
            retry_button_area: Rect::default(),
            awaiting_leave_confirmation: false,
            should_quit: false,
        }
    }

    pub fn move_cursor(&mut self, direction: MoveCursorDirection) {
        // don't move the cursor when the game's already finished
        if self.session.show_retry() {
            return;
        }

        let (field_width, field_height) = self.field_size();
        let (cx, cy) = self.cursor_position;

        self.cursor_position = match direction {
            Up => (cx, cy.saturating_sub(1)),
            Left => (cx.saturating_sub(1), cy),
            Down => (cx, cmp::min(cy.saturating_add(1), field_height.saturating_sub(1))),
            Right => (cmp::min(cx.saturating_add(1), field_width.saturating_sub(1)), cy),
        };

        let (ox, oy) = self.window_offset;

        self.window_offset = (
            scroll_to_cursor(self.cursor_position.0, ox, self.visible_columns_amount, field_width),
            scroll_to_cursor(self.cursor_position.1, oy, self.visible_rows_amount, field_height),
        );
    }

    /// Keeps the window inside the field after the visible amounts have changed (e.g. on a resize).
    pub fn clamp_window_offset(&mut self) {
        let (field_width, field_height) = self.field_size();
        let (ox, oy) = self.window_offset;

        self.window_offset = (
            cmp::min(ox, field_width.saturating_sub(self.visible_columns_amount)),
            cmp::min(oy, field_height.saturating_sub(self.visible_rows_amount)),
        );
    }

    /// Digs the selected tile, starts a new game if the current one has ended, or confirms the leave.
    pub fn dig_or_restart_or_confirm_leave(&mut self) {
        if self.awaiting_leave_confirmation {
            self.quit();
        } else if self.session.show_retry() {
            self.new_game();
        } else {
            let (x, y) = self.cursor_board_position();
            self.session.on_left_click(x, y);
        }
    }

    pub fn toggle_flag(&mut self) {
        let (x, y) = self.cursor_board_position();
        self.session.on_right_click(x, y);
    }

    /// The keyboard counterpart of pressing and releasing the middle button over the selected tile.
    pub fn chord(&mut self) {
        let (x, y) = self.cursor_board_position();
        self.session.on_middle_press(x, y);
        self.session.on_middle_release(x, y);
    }

    pub fn new_game(&mut self) {
        self.session.on_new_game_request();
        self.awaiting_leave_confirmation = false;
    }

    pub fn confirm_or_cancel_leave_or_leave(&mut self) {
        if self.session.show_retry() {
            // if the game has ended, just leave without asking for confirmation
            self.quit();
        } else {
            // otherwise, ask for confirmation
            self.awaiting_leave_confirmation = !self.awaiting_leave_confirmation;
        }
    }

    /// Quit the application altogether.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn mouse_down(&mut self, button: MouseButton, column: u16, row: u16) {
        if self.awaiting_leave_confirmation {
            return;
        }

        if button == MouseButton::Left && contains(self.retry_button_area, column, row) {
            self.new_game();
            return;
        }

        let Some((x, y)) = self.tile_at(column, row) else {
            return;
        };

        self.cursor_position = (x as u16, y as u16);

        match button {
            MouseButton::Left => {
                self.session.on_left_click(x, y);
            }
            MouseButton::Right => {
                self.session.on_right_click(x, y);
            }
            MouseButton::Middle => {
                self.session.on_middle_press(x, y);
            }
        }
    }

    pub fn mouse_up(&mut self, button: MouseButton, column: u16, row: u16) {
        if button == MouseButton::Middle {
            let (x, y) = self.tile_at(column, row).unwrap_or(OFF_BOARD);
            self.session.on_middle_release(x, y);
        }
    }

    pub fn mouse_moved(&mut self, column: u16, row: u16) {
        match self.tile_at(column, row) {
            Some((x, y)) => {
                if !self.session.show_retry() {
                    self.cursor_position = (x as u16, y as u16);
                }

                self.session.on_hover(x, y);
            }
            None => self.session.on_hover(OFF_BOARD.0, OFF_BOARD.1),
        }
    }

    /// Maps a terminal cell onto the board position of the tile drawn there (if any).
    pub fn tile_at(&self, column: u16, row: u16) -> Option<(i32, i32)> {
        if !contains(self.grid_area, column, row) {
            return None;
        }

        let x = (column - self.grid_area.x) / CELL_WIDTH + self.window_offset.0;
        let y = (row - self.grid_area.y) / CELL_HEIGHT + self.window_offset.1;

        let (field_width, field_height) = self.field_size();
        (x < field_width && y < field_height).then_some((x as i32, y as i32))
    }

    fn cursor_board_position(&self) -> (i32, i32) {
        (self.cursor_position.0 as i32, self.cursor_position.1 as i32)
    }

    fn field_size(&self) -> (u16, u16) {
        let field = self.session.field();
        (field.width(), field.height())
    }
}

impl Render for App {
    fn render(&mut self, frame: &mut Frame) {
        render_game(self, frame);
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

/// Returns the window offset along a single axis which keeps the cursor visible, with a margin of one tile from the
/// window's edges when there's room for it.
fn scroll_to_cursor(cursor: u16, offset: u16, visible_amount: u16, total_amount: u16) -> u16 {
    let max_offset = total_amount.saturating_sub(visible_amount);

    let offset = if visible_amount < 3 {
        cursor
    } else if cursor.saturating_add(2) > offset.saturating_add(visible_amount) {
        cursor.saturating_add(2) - visible_amount
    } else if cursor < offset.saturating_add(1) {
        cursor.saturating_sub(1)
    } else {
        offset
    };

    cmp::min(offset, max_offset)
}

#[cfg(test)]
mod test {
    use super::{scroll_to_cursor, App};
    use crossterm::event::MouseButton;
    use ratatui::layout::Rect;
    use tilesweep::{GameConfig, GameSession, GameState, MineField};

    // "mine", "mine", "none"
    // "none", "none", "mine"
    // "none", "none", "none"
    fn create_stub_app() -> App {
        let field = MineField::with_mines(3, 3, [(0, 0), (1, 0), (2, 1)]);
        let mut app = App::new(GameConfig::new(3, 3, 3).unwrap());
        app.session = GameSession::with_field(GameConfig::new(3, 3, 3).unwrap(), field);
        // the grid is drawn at (10, 5), every tile is 5 columns wide and 3 rows high
        app.grid_area = Rect::new(10, 5, 15, 9);
        app.retry_button_area = Rect::new(0, 0, 6, 3);
        app.visible_columns_amount = 3;
        app.visible_rows_amount = 3;
        app
    }

    #[test]
    fn terminal_cells_are_mapped_onto_tiles() {
        let app = create_stub_app();

        assert_eq!(app.tile_at(10, 5), Some((0, 0)));
        assert_eq!(app.tile_at(14, 7), Some((0, 0)));
        assert_eq!(app.tile_at(15, 8), Some((1, 1)));
        assert_eq!(app.tile_at(24, 13), Some((2, 2)));
        assert_eq!(app.tile_at(9, 5), None);
        assert_eq!(app.tile_at(25, 5), None);
        assert_eq!(app.tile_at(10, 14), None);
    }

    #[test]
    fn the_window_offset_is_added_to_the_mapped_tiles() {
        let mut app = create_stub_app();
        app.window_offset = (1, 0);
        app.visible_columns_amount = 2;
        app.grid_area = Rect::new(10, 5, 10, 9);

        assert_eq!(app.tile_at(10, 5), Some((1, 0)));
        assert_eq!(app.tile_at(19, 5), Some((2, 0)));
    }

    #[test]
    fn mouse_buttons_dig_and_flag() {
        let mut app = create_stub_app();

        app.mouse_down(MouseButton::Right, 10, 5);
        assert!(app.session.field().get(0, 0).unwrap().is_flagged());

        app.mouse_down(MouseButton::Left, 20, 5);
        assert!(app.session.field().get(2, 0).unwrap().is_revealed());
        assert_eq!(app.cursor_position, (2, 0));

        app.mouse_down(MouseButton::Left, 15, 5);
        assert_eq!(app.session.state(), GameState::Over);
    }

    #[test]
    fn a_middle_button_chord_runs_where_it_is_released() {
        let mut app = create_stub_app();
        app.mouse_down(MouseButton::Right, 10, 5);
        app.mouse_down(MouseButton::Right, 15, 5);
        app.mouse_down(MouseButton::Right, 20, 8);
        app.mouse_down(MouseButton::Left, 15, 8);

        app.mouse_down(MouseButton::Middle, 10, 11);
        app.mouse_moved(15, 8);
        assert_eq!(app.session.chord_preview(), Some((1, 1)));

        app.mouse_up(MouseButton::Middle, 15, 8);
        assert_eq!(app.session.state(), GameState::Won);
    }

    #[test]
    fn a_chord_released_off_the_board_does_nothing() {
        let mut app = create_stub_app();
        app.mouse_down(MouseButton::Left, 20, 5);

        app.mouse_down(MouseButton::Middle, 20, 5);
        app.mouse_up(MouseButton::Middle, 0, 20);

        assert_eq!(app.session.chord_preview(), None);
        assert_eq!(app.session.field().revealed_safe_count(), 1);
    }

    #[test]
    fn the_face_button_starts_a_new_game() {
        let mut app = create_stub_app();
        app.mouse_down(MouseButton::Left, 10, 5);
        assert_eq!(app.session.state(), GameState::Over);

        app.mouse_down(MouseButton::Left, 2, 1);
        assert_eq!(app.session.state(), GameState::Playing);
    }

    #[test]
    fn the_keyboard_controls_follow_the_cursor() {
        let mut app = create_stub_app();
        app.toggle_flag();
        assert!(app.session.field().get(0, 0).unwrap().is_flagged());

        app.move_cursor(super::Right);
        app.move_cursor(super::Right);
        app.move_cursor(super::Right);
        assert_eq!(app.cursor_position, (2, 0));

        app.dig_or_restart_or_confirm_leave();
        assert!(app.session.field().get(2, 0).unwrap().is_revealed());
    }

    #[test]
    fn leaving_an_ongoing_game_asks_for_a_confirmation() {
        let mut app = create_stub_app();

        app.confirm_or_cancel_leave_or_leave();
        assert!(app.awaiting_leave_confirmation && !app.should_quit);

        app.dig_or_restart_or_confirm_leave();
        assert!(app.should_quit);
    }

    #[test]
    fn the_window_scrolls_with_a_margin() {
        // 10 tiles, 5 visible
        assert_eq!(scroll_to_cursor(3, 0, 5, 10), 0);
        assert_eq!(scroll_to_cursor(4, 0, 5, 10), 1);
        assert_eq!(scroll_to_cursor(9, 4, 5, 10), 5);
        assert_eq!(scroll_to_cursor(5, 5, 5, 10), 4);
        assert_eq!(scroll_to_cursor(0, 1, 5, 10), 0);
    }
}
