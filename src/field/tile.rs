use std::fmt::{Debug, Display, Formatter};

/// The representation of a single tile of the field.
///
/// A tile is a set of independent facets: whether it holds a mine, whether it's been revealed or flagged by the player
/// and how many mines there are around it. A tile is never revealed and flagged at the same time.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Tile {
    /// The number of mines among the up-to-8 neighbours. Always 0 for a mined tile.
    adjacent_mine_count: u8,
    /// Set once at generation.
    is_mine: bool,
    is_flagged: bool,
    /// Once set, it stays set for the rest of the game.
    is_revealed: bool,
    /// Set when the game is lost for the tiles which were flagged without holding a mine.
    is_mismatched_flag: bool,
}

impl Tile {
    /// Returns the amount of mines around the tile. Meaningless for a mined tile.
    pub fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub fn is_mismatched_flag(&self) -> bool {
        self.is_mismatched_flag
    }

    /// Checks whether the tile is empty: not mined and without any mines around. Digging an empty tile digs its
    /// neighbours as well.
    pub fn is_empty(&self) -> bool {
        !self.is_mine && self.adjacent_mine_count == 0
    }

    pub(crate) fn mine(&mut self) {
        self.is_mine = true;
        self.adjacent_mine_count = 0;
    }

    pub(crate) fn set_adjacent_mine_count(&mut self, adjacent_mine_count: u8) {
        self.adjacent_mine_count = adjacent_mine_count;
    }

    /// Reveals the tile, dropping its flag if there was one.
    pub(crate) fn reveal(&mut self) {
        self.is_revealed = true;
        self.is_flagged = false;
    }

    /// Won't produce any effect if the tile is already revealed. Returns whether the flag has been toggled.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        if self.is_revealed {
            return false;
        }

        self.is_flagged = !self.is_flagged;
        true
    }

    pub(crate) fn mark_mismatched_flag(&mut self) {
        self.is_mismatched_flag = true;
    }
}

/// The `Debug` implementation shows what the tile holds regardless of its state.
impl Debug for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_mine {
            write!(f, "*")
        } else if self.adjacent_mine_count == 0 {
            write!(f, ".")
        } else {
            write!(f, "{}", self.adjacent_mine_count)
        }
    }
}

/// The `Display` implementation represents the tile the way the player sees it.
impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_mismatched_flag {
            write!(f, "X")
        } else if self.is_flagged {
            write!(f, "F")
        } else if !self.is_revealed {
            write!(f, "#")
        } else {
            write!(f, "{:?}", self)
        }
    }
}
