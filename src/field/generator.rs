//! Random board generation.

use super::MineField;
use crate::config::GameConfig;
use rand::Rng;
use tracing::debug;

/// Generates a new field with randomly distributed mines.
///
/// The mines are placed by sampling random positions and skipping those that are mined already. The sampling gives up
/// after `2 * mine_count` draws, so the generation always terminates, even when more mines are requested than there
/// are tiles. The price is that fewer mines than requested may get placed: [`MineField::placed_mines`] is the
/// authoritative number of mines of the field.
///
/// Once the mines are in place, every non-mined tile gets the number of mines around it.
pub fn generate<R: Rng>(config: &GameConfig, rng: &mut R) -> MineField {
    let (width, height) = (config.width(), config.height());
    let mut field = MineField::empty(width, height);

    let draws_budget = config.mine_count().saturating_mul(2);
    let mut draws = 0;

    while field.placed_mines() < config.mine_count() && draws < draws_budget {
        draws += 1;

        let x = rng.gen_range(0..width) as i32;
        let y = rng.gen_range(0..height) as i32;

        field.place_mine(x, y);
    }

    field.update_adjacent_mine_counts();

    debug!(
        width,
        height,
        requested_mines = config.mine_count(),
        placed_mines = field.placed_mines(),
        draws,
        "generated a new field"
    );

    field
}
