//! The game session: the field of the ongoing game, its status and the input handlers the frontends call into.

use crate::config::GameConfig;
use crate::field::{
    generator::generate,
    reveal::{dig, run_chord},
    MineField,
};
use rand::thread_rng;
use tracing::{debug, trace};

/// The status of a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    /// An ongoing game.
    Playing,
    /// A mine has been revealed. The whole field is shown and the game waits for a new-game request.
    Over,
    /// Every tile without a mine has been revealed.
    Won,
}

/// The struct representing a Minesweeper game itself.
///
/// The session exclusively owns its field and replaces it wholesale on a new-game request. All the input handlers
/// take board-space coordinates (the frontend is the one to map its pointer positions onto the board) and accept
/// out-of-bounds positions as no-ops.
#[derive(Debug)]
pub struct GameSession {
    /// The configuration every new field of the session is generated from.
    config: GameConfig,
    /// The field used in the game.
    field: MineField,
    /// The game status.
    state: GameState,
    /// Whether the chording button is being held.
    chord_active: bool,
    /// The last board position reported by the frontend.
    hovered: Option<(i32, i32)>,
}

impl GameSession {
    /// Starts a new game on a freshly generated field.
    pub fn new(config: GameConfig) -> Self {
        let field = generate(&config, &mut thread_rng());
        GameSession::with_field(config, field)
    }

    /// Starts a new game on the provided field.
    ///
    /// Further new-game requests still generate their fields from the `config`.
    pub fn with_field(config: GameConfig, field: MineField) -> Self {
        GameSession {
            config,
            field,
            state: GameState::Playing,
            chord_active: false,
            hovered: None,
        }
    }

    pub fn field(&self) -> &MineField {
        &self.field
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whether the frontend should offer to start a new game, i.e. whether the game has ended.
    pub fn show_retry(&self) -> bool {
        self.state != GameState::Playing
    }

    /// The center of the chord being held (if any).
    pub fn chord_preview(&self) -> Option<(i32, i32)> {
        if self.chord_active {
            self.hovered
        } else {
            None
        }
    }

    /// The positions the frontend should render as pressed while a chord is being held: the hidden unflagged tiles of
    /// the 3*3 block around the chord's center.
    pub fn chord_highlight(&self) -> Vec<(i32, i32)> {
        let Some((x, y)) = self.chord_preview() else {
            return Vec::new();
        };

        std::iter::once((x, y))
            .chain(self.field.neighbours(x, y))
            .filter(|&(x, y)| {
                self.field
                    .get(x, y)
                    .is_some_and(|tile| !tile.is_revealed() && !tile.is_flagged())
            })
            .collect()
    }

    /// Digs the tile under the pointer.
    pub fn on_left_click(&mut self, x: i32, y: i32) -> GameState {
        if self.state != GameState::Playing {
            return self.state;
        }

        trace!(x, y, "dig");
        let mine_hit = dig(&mut self.field, x, y);
        self.update_state(mine_hit)
    }

    /// Toggles the flag of the tile under the pointer.
    pub fn on_right_click(&mut self, x: i32, y: i32) -> GameState {
        if self.state != GameState::Playing {
            return self.state;
        }

        trace!(x, y, "toggle flag");
        self.field.toggle_flag(x, y);
        self.state
    }

    /// Starts holding a chord at the tile under the pointer.
    pub fn on_middle_press(&mut self, x: i32, y: i32) -> GameState {
        if self.state != GameState::Playing {
            return self.state;
        }

        self.chord_active = true;
        self.hovered = Some((x, y));
        self.state
    }

    /// Follows the pointer. While a chord is being held, its center moves along.
    pub fn on_hover(&mut self, x: i32, y: i32) {
        self.hovered = Some((x, y));
    }

    /// Releases the chord and runs it at the tile under the pointer.
    pub fn on_middle_release(&mut self, x: i32, y: i32) -> GameState {
        self.chord_active = false;
        self.hovered = Some((x, y));

        if self.state != GameState::Playing {
            return self.state;
        }

        trace!(x, y, "chord");
        let mine_hit = run_chord(&mut self.field, x, y);
        self.update_state(mine_hit)
    }

    /// Throws the current field away and starts over on a new one generated from the same configuration.
    pub fn on_new_game_request(&mut self) -> GameState {
        self.field = generate(&self.config, &mut thread_rng());
        self.state = GameState::Playing;
        self.chord_active = false;
        self.hovered = None;

        debug!("new game started");
        self.state
    }

    /// A private helper that updates the game status after a dig or a chord.
    ///
    /// A revealed mine ends the game even if every safe tile has been revealed by the same move.
    fn update_state(&mut self, mine_hit: bool) -> GameState {
        if mine_hit {
            self.field.reveal_all_for_game_over();
            self.state = GameState::Over;
            debug!("a mine has been revealed, the game is over");
        } else if self.field.all_safe_revealed() {
            self.state = GameState::Won;
            debug!("every safe tile has been revealed, the game is won");
        }

        self.state
    }
}

#[cfg(test)]
mod test {
    use super::{GameSession, GameState};
    use crate::{config::GameConfig, field::MineField};

    // "mine", "mine", "none"
    // "none", "none", "mine"
    // "none", "none", "none"
    fn create_stub_session() -> GameSession {
        let field = MineField::with_mines(3, 3, [(0, 0), (1, 0), (2, 1)]);
        GameSession::with_field(GameConfig::new(3, 3, 3).unwrap(), field)
    }

    #[test]
    fn a_new_session_is_playing_on_a_generated_field() {
        let session = GameSession::new(GameConfig::new(10, 6, 8).unwrap());

        assert_eq!(session.state(), GameState::Playing);
        assert!(!session.show_retry());
        assert_eq!((session.field().width(), session.field().height()), (10, 6));
        assert!(session.field().placed_mines() <= 8);
        assert_eq!(session.config(), &GameConfig::new(10, 6, 8).unwrap());
    }

    #[test]
    fn left_click_on_a_safe_tile_keeps_playing() {
        let mut session = create_stub_session();

        assert_eq!(session.on_left_click(2, 0), GameState::Playing);
        assert!(session.field().get(2, 0).unwrap().is_revealed());
    }

    #[test]
    fn left_click_on_a_mine_ends_the_game() {
        let mut session = create_stub_session();
        session.on_right_click(0, 1);

        assert_eq!(session.on_left_click(1, 0), GameState::Over);
        assert!(session.show_retry());

        // The whole field is shown, the wrong flag is marked as such.
        let field = session.field();
        assert!(field.get(0, 0).unwrap().is_revealed());
        assert!(field.get(2, 1).unwrap().is_revealed());
        assert!(field.get(0, 1).unwrap().is_mismatched_flag());
    }

    #[test]
    fn revealing_every_safe_tile_wins_the_game() {
        let mut session = create_stub_session();

        session.on_left_click(0, 2);
        assert_eq!(session.on_left_click(2, 0), GameState::Playing);

        assert_eq!(session.on_left_click(2, 2), GameState::Won);
        assert!(session.show_retry());
    }

    #[test]
    fn a_mine_hit_takes_precedence_over_the_win() {
        // Losing reveals the only safe tile, which must not turn the game into a won one.
        let field = MineField::with_mines(2, 1, [(0, 0)]);
        let mut session = GameSession::with_field(GameConfig::new(2, 1, 1).unwrap(), field);

        assert_eq!(session.on_left_click(0, 0), GameState::Over);
        assert!(session.field().all_safe_revealed());
        assert_eq!(session.state(), GameState::Over);
    }

    #[test]
    fn right_click_toggles_the_flag() {
        let mut session = create_stub_session();

        session.on_right_click(1, 1);
        assert!(session.field().get(1, 1).unwrap().is_flagged());
        assert_eq!(session.field().placed_flags(), 1);

        session.on_right_click(1, 1);
        assert!(!session.field().get(1, 1).unwrap().is_flagged());
        assert_eq!(session.field().placed_flags(), 0);
    }

    #[test]
    fn left_click_on_a_flagged_tile_has_no_effect() {
        let mut session = create_stub_session();
        session.on_right_click(0, 0);

        assert_eq!(session.on_left_click(0, 0), GameState::Playing);
        assert!(session.field().get(0, 0).unwrap().is_flagged());
        assert!(!session.field().get(0, 0).unwrap().is_revealed());
    }

    #[test]
    fn clicks_out_of_bounds_have_no_effect() {
        let mut session = create_stub_session();
        let before = session.field().clone();

        session.on_left_click(-1, 5);
        session.on_right_click(3, 0);
        session.on_middle_press(10, 10);
        session.on_middle_release(10, 10);

        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.field(), &before);
    }

    #[test]
    fn handlers_are_inert_once_the_game_is_over() {
        let mut session = create_stub_session();
        session.on_left_click(0, 0);
        let before = session.field().clone();

        assert_eq!(session.on_left_click(2, 2), GameState::Over);
        assert_eq!(session.on_right_click(2, 0), GameState::Over);
        assert_eq!(session.on_middle_press(1, 1), GameState::Over);
        assert_eq!(session.chord_preview(), None);
        assert_eq!(session.on_middle_release(1, 1), GameState::Over);

        assert_eq!(session.field(), &before);
    }

    #[test]
    fn the_chord_is_previewed_while_held_and_runs_on_release() {
        let mut session = create_stub_session();
        session.on_right_click(0, 0);
        session.on_right_click(1, 0);
        session.on_right_click(2, 1);
        session.on_left_click(1, 1);

        session.on_middle_press(0, 2);
        assert_eq!(session.chord_preview(), Some((0, 2)));

        session.on_hover(1, 1);
        assert_eq!(session.chord_preview(), Some((1, 1)));
        assert_eq!(session.chord_highlight(), [(0, 1), (2, 0), (2, 2), (1, 2), (0, 2)]);

        assert_eq!(session.on_middle_release(1, 1), GameState::Won);
        assert_eq!(session.chord_preview(), None);
        assert!(session.chord_highlight().is_empty());
    }

    #[test]
    fn a_chord_around_a_wrong_flag_ends_the_game() {
        let mut session = create_stub_session();
        session.on_right_click(0, 0);
        session.on_right_click(1, 0);
        session.on_right_click(0, 2);
        session.on_left_click(1, 1);

        session.on_middle_press(1, 1);
        assert_eq!(session.on_middle_release(1, 1), GameState::Over);
        assert!(session.show_retry());

        let field = session.field();
        assert!(field.get(2, 1).unwrap().is_revealed());
        assert!(field.get(0, 2).unwrap().is_mismatched_flag());
    }

    #[test]
    fn hovering_without_a_chord_previews_nothing() {
        let mut session = create_stub_session();
        session.on_hover(1, 1);

        assert_eq!(session.chord_preview(), None);
        assert!(session.chord_highlight().is_empty());
    }

    #[test]
    fn a_chord_released_on_a_hidden_tile_has_no_effect() {
        let mut session = create_stub_session();

        session.on_middle_press(1, 1);
        assert_eq!(session.on_middle_release(1, 1), GameState::Playing);
        assert_eq!(session.field().revealed_safe_count(), 0);
    }

    #[test]
    fn a_new_game_request_starts_over() {
        let mut session = create_stub_session();
        session.on_left_click(0, 0);
        session.on_middle_press(1, 1);
        assert_eq!(session.state(), GameState::Over);

        assert_eq!(session.on_new_game_request(), GameState::Playing);

        let field = session.field();
        assert_eq!((field.width(), field.height()), (3, 3));
        assert!(field.tiles().all(|(_, tile)| !tile.is_revealed() && !tile.is_flagged()));
        assert_eq!(field.placed_flags(), 0);
        assert!(!session.show_retry());
        assert_eq!(session.chord_preview(), None);
    }
}
