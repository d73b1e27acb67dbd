pub mod config;
pub mod error;
pub mod field;
pub mod session;

pub use config::GameConfig;
pub use error::ConfigError;
pub use field::{generator::generate, reveal, tile::Tile, MineField};
pub use session::{GameSession, GameState};
