use thiserror::Error;

/// Everything that can be wrong with a requested board configuration.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("The board must be at least one column wide")]
    ZeroWidth,
    #[error("The board must be at least one row high")]
    ZeroHeight,
    #[error("The board must hold at least one mine")]
    ZeroMines,
}
