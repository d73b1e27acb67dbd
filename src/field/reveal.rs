//! Digging and chording.

use super::{tile::Tile, MineField};

/// Reveals the tile at the given position and, if it turns out to be empty, floods the connected empty region along
/// with its numbered border. Returns `true` if any mine has been revealed on the way.
///
/// Every visited tile goes through the same rules, in order:
///
/// - a flagged or an already revealed tile is left as is;
/// - otherwise it gets revealed (a mine is recorded as hit);
/// - a numbered tile or a mine stops the flood;
/// - an empty tile continues it into all 8 neighbours (W, NW, N, NE, E, SE, S, SW).
///
/// The flood doesn't stop at the first mine: the whole reachable region is always visited. An out-of-bounds position
/// changes nothing and returns `false`.
///
/// The flood runs on an explicit stack rather than recursion, so the size of the region is only limited by the size of
/// the field. The neighbours are pushed in reverse so that they get visited in the same order a recursive descent would
/// visit them.
pub fn dig(field: &mut MineField, x: i32, y: i32) -> bool {
    let mut mine_hit = false;
    let mut pending = vec![(x, y)];

    while let Some((x, y)) = pending.pop() {
        let Some(tile) = field.get(x, y) else {
            continue;
        };

        if tile.is_flagged() || tile.is_revealed() {
            continue;
        }

        let Some(tile) = field.reveal_tile(x, y) else {
            continue;
        };

        if tile.is_mine() {
            mine_hit = true;
            continue;
        }

        if !tile.is_empty() {
            continue;
        }

        pending.extend(field.neighbours(x, y).rev());
    }

    mine_hit
}

/// Digs all the unflagged neighbours of a revealed tile, provided that the number of flags around it is exactly the
/// tile's number. Returns `true` if any mine has been revealed.
///
/// Is an equivalent of the middle-click in the classic game.
///
/// The method won't produce any effect if the position is out of bounds, if the center tile is not revealed or if the
/// number of flags around it differs from its number in either direction. All the unflagged neighbours get dug even
/// after one of them has revealed a mine.
pub fn run_chord(field: &mut MineField, center_x: i32, center_y: i32) -> bool {
    let Some(center) = field.get(center_x, center_y).copied() else {
        return false;
    };

    if !center.is_revealed() {
        return false;
    }

    let neighbours = field.neighbours(center_x, center_y).collect::<Vec<_>>();

    let flagged_neighbours_amount = neighbours
        .iter()
        .filter(|&&(x, y)| field.get(x, y).is_some_and(Tile::is_flagged))
        .count();

    if flagged_neighbours_amount != center.adjacent_mine_count() as usize {
        return false;
    }

    let mut mine_hit = false;

    for (x, y) in neighbours {
        if field.get(x, y).is_some_and(Tile::is_flagged) {
            continue;
        }

        mine_hit |= dig(field, x, y);
    }

    mine_hit
}
