pub mod generator;
pub mod reveal;
pub mod tile;

use std::fmt::{Debug, Display, Formatter};
use tile::Tile;

/// The offsets of the 8 neighbours of a tile in the order they get visited: W, NW, N, NE, E, SE, S, SW.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// The field representation.
///
/// The field is a grid (a 2D vector) of tiles along with the counters derived from it. The top level of the grid
/// represents rows and the nested vector of each row represents tiles, so a tile at `(x, y)` lives at `grid[y][x]`.
///
/// The coordinates accepted by the methods are signed: anything outside of the grid is answered with `None` (or a
/// no-op) rather than a failure, so that the neighbour-scanning code could treat the border uniformly.
#[derive(Clone, PartialEq, Eq)]
pub struct MineField {
    grid: Vec<Vec<Tile>>,
    /// The number of mines actually placed. May be less than the number requested from the generator.
    placed_mines: u32,
    /// Always equal to the number of currently flagged tiles.
    placed_flags: u32,
    /// The number of revealed tiles without a mine.
    revealed_safe: u32,
}

impl MineField {
    /// Creates a field of hidden empty tiles without any mines.
    pub(crate) fn empty(width: u16, height: u16) -> Self {
        MineField {
            grid: vec![vec![Tile::default(); width as usize]; height as usize],
            placed_mines: 0,
            placed_flags: 0,
            revealed_safe: 0,
        }
    }

    /// Creates a field with mines at the given positions and the adjacent mine counts derived from them.
    ///
    /// Out-of-bounds and repeated positions are skipped. This is the way to set up a known board; random boards come
    /// from [`generator::generate`].
    pub fn with_mines(width: u16, height: u16, mines: impl IntoIterator<Item = (i32, i32)>) -> Self {
        let mut field = MineField::empty(width, height);

        mines.into_iter().for_each(|(x, y)| {
            field.place_mine(x, y);
        });

        field.update_adjacent_mine_counts();
        field
    }

    /// The number of columns.
    pub fn width(&self) -> u16 {
        self.grid.first().map(|row| row.len()).unwrap_or(0) as u16
    }

    /// The number of rows.
    pub fn height(&self) -> u16 {
        self.grid.len() as u16
    }

    pub fn tiles_amount(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }

    pub fn placed_mines(&self) -> u32 {
        self.placed_mines
    }

    pub fn placed_flags(&self) -> u32 {
        self.placed_flags
    }

    /// The number of mines minus the number of flags. Goes negative when the player over-flags.
    pub fn mines_left(&self) -> i64 {
        self.placed_mines as i64 - self.placed_flags as i64
    }

    pub fn revealed_safe_count(&self) -> u32 {
        self.revealed_safe
    }

    /// Checks that every tile without a mine has been revealed.
    ///
    /// This is effectively the win-condition for the game.
    pub fn all_safe_revealed(&self) -> bool {
        self.revealed_safe == self.tiles_amount() - self.placed_mines
    }

    /// Returns a read-only tile reference by its position or [`None`] if there's no tile at the given position.
    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.grid
            .get(usize::try_from(y).ok()?)?
            .get(usize::try_from(x).ok()?)
    }

    /// Returns a mutable tile reference by its position or [`None`] if there's no tile at the given position.
    fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.grid
            .get_mut(usize::try_from(y).ok()?)?
            .get_mut(usize::try_from(x).ok()?)
    }

    /// Returns the positions of the in-bounds neighbours of the given position in the W, NW, N, NE, E, SE, S, SW
    /// order.
    pub fn neighbours(
        &self,
        x: i32,
        y: i32,
    ) -> impl DoubleEndedIterator<Item = (i32, i32)> + '_ {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| Some((x.checked_add(dx)?, y.checked_add(dy)?)))
            .filter(move |&(nx, ny)| self.get(nx, ny).is_some())
    }

    /// Iterates over all the tiles along with their positions, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = ((i32, i32), &Tile)> {
        self.grid.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, tile)| ((x as i32, y as i32), tile))
        })
    }

    /// Mines the tile at the given position. Returns `false` if there's no such tile or it's mined already.
    pub(crate) fn place_mine(&mut self, x: i32, y: i32) -> bool {
        match self.get_mut(x, y) {
            Some(tile) if !tile.is_mine() => {
                tile.mine();
                self.placed_mines += 1;
                true
            }
            _ => false,
        }
    }

    /// Stores in every non-mined tile the number of mines around it.
    pub(crate) fn update_adjacent_mine_counts(&mut self) {
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                if self.get(x, y).is_some_and(Tile::is_mine) {
                    continue;
                }

                let adjacent_mine_count = self
                    .neighbours(x, y)
                    .filter(|&(nx, ny)| self.get(nx, ny).is_some_and(Tile::is_mine))
                    .count() as u8;

                if let Some(tile) = self.get_mut(x, y) {
                    tile.set_adjacent_mine_count(adjacent_mine_count);
                }
            }
        }
    }

    /// Reveals the tile at the given position and drops its flag (if any). Returns the updated tile or [`None`] if
    /// there's no tile at the given position.
    ///
    /// Revealing an already revealed tile changes nothing.
    pub fn reveal_tile(&mut self, x: i32, y: i32) -> Option<Tile> {
        let tile = self.get_mut(x, y)?;
        let (was_flagged, was_revealed) = (tile.is_flagged(), tile.is_revealed());

        tile.reveal();
        let tile = *tile;

        if was_flagged {
            self.placed_flags -= 1;
        }

        if !was_revealed && !tile.is_mine() {
            self.revealed_safe += 1;
        }

        Some(tile)
    }

    /// Toggles the flag of the tile at the given position.
    ///
    /// Won't produce any effect if there's no such tile or it's already revealed. Returns whether the flag has been
    /// toggled.
    pub fn toggle_flag(&mut self, x: i32, y: i32) -> bool {
        let Some(tile) = self.get_mut(x, y) else {
            return false;
        };

        if !tile.toggle_flag() {
            return false;
        }

        if tile.is_flagged() {
            self.placed_flags += 1;
        } else {
            self.placed_flags -= 1;
        }

        true
    }

    /// Reveals the whole field once the game is lost.
    ///
    /// The flagged tiles stay flagged: the ones without a mine get marked as mismatched flags, the correctly flagged
    /// mines stay hidden under their flags. Everything else gets revealed.
    pub fn reveal_all_for_game_over(&mut self) {
        self.grid.iter_mut().flatten().for_each(|tile| {
            if !tile.is_flagged() {
                tile.reveal();
            } else if !tile.is_mine() {
                tile.mark_mismatched_flag();
            }
        });

        self.revealed_safe = self
            .grid
            .iter()
            .flatten()
            .filter(|tile| tile.is_revealed() && !tile.is_mine())
            .count() as u32;
    }
}

impl Debug for MineField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.grid.iter() {
            for tile in row {
                write!(f, "{:?} ", tile)?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

impl Display for MineField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for x in 0..self.width() {
            write!(f, "{:^3}", x)?;
        }

        writeln!(f)?;

        for (y, row) in self.grid.iter().enumerate() {
            write!(f, "{:^3}", y)?;

            for tile in row {
                write!(f, "{:^3}", tile.to_string())?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
