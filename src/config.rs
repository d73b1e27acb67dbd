//! The board configuration a game gets generated from.

use crate::error::ConfigError;

pub const DEFAULT_WIDTH: u16 = 18;
pub const DEFAULT_HEIGHT: u16 = 18;
pub const DEFAULT_MINE_COUNT: u32 = 18 * 18 / 8;

/// The dimensions of the board and the number of mines requested for it.
///
/// A `GameConfig` can only be obtained through [`GameConfig::new`] (or [`Default`]), so the dimensions and the mine
/// count held by it are always positive. The mine count is allowed to exceed the number of tiles: the generator copes
/// with that by placing fewer mines.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GameConfig {
    width: u16,
    height: u16,
    mine_count: u32,
}

impl GameConfig {
    /// Validates the requested configuration.
    ///
    /// Fails with [`ConfigError::ZeroWidth`], [`ConfigError::ZeroHeight`] or [`ConfigError::ZeroMines`] if the
    /// respective value is zero.
    pub fn new(width: u16, height: u16, mine_count: u32) -> Result<Self, ConfigError> {
        if width == 0 {
            Err(ConfigError::ZeroWidth)
        } else if height == 0 {
            Err(ConfigError::ZeroHeight)
        } else if mine_count == 0 {
            Err(ConfigError::ZeroMines)
        } else {
            Ok(GameConfig {
                width,
                height,
                mine_count,
            })
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// The number of mines requested. The number actually placed is [`crate::MineField::placed_mines`].
    pub fn mine_count(&self) -> u32 {
        self.mine_count
    }

    /// The total number of tiles on the board.
    pub fn tiles_amount(&self) -> u32 {
        self.width as u32 * self.height as u32
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            mine_count: DEFAULT_MINE_COUNT,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ConfigError, GameConfig};

    #[test]
    fn create_config_correct_params() {
        let config = GameConfig::new(9, 4, 5).unwrap();

        assert_eq!(config.width(), 9);
        assert_eq!(config.height(), 4);
        assert_eq!(config.mine_count(), 5);
        assert_eq!(config.tiles_amount(), 36);
    }

    #[test]
    fn create_config_fails_on_zero_dimensions() {
        assert_eq!(GameConfig::new(0, 4, 5), Err(ConfigError::ZeroWidth));
        assert_eq!(GameConfig::new(4, 0, 5), Err(ConfigError::ZeroHeight));
    }

    #[test]
    fn create_config_fails_without_mines() {
        assert_eq!(GameConfig::new(4, 4, 0), Err(ConfigError::ZeroMines));
    }

    #[test]
    fn more_mines_than_tiles_is_accepted() {
        assert!(GameConfig::new(3, 3, 100).is_ok());
    }

    #[test]
    fn the_default_config_is_an_eighth_mined() {
        let config = GameConfig::default();
        assert_eq!(config.mine_count(), config.tiles_amount() / 8);
    }
}
