//! Bit primitives: generalized shifts and Kogge-Stone ray fills along the
//! four orthogonal and four diagonal directions.

use crate::types::{Bitboard, Square, FILE_A, FILE_H};

/// The eight ray directions used by sliding-piece fills and by the
/// direction-golem pin-corridor computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

pub const RAY_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

pub const ORTHOGONAL: [Direction; 4] = [Direction::North, Direction::South, Direction::East, Direction::West];
pub const DIAGONAL: [Direction; 4] = [
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

/// A single step in `dir`, clipped at board edges (no wraparound).
#[inline]
#[must_use]
pub const fn shift_one(bb: Bitboard, dir: Direction) -> Bitboard {
    match dir {
        Direction::North => Bitboard(bb.0 << 8),
        Direction::South => Bitboard(bb.0 >> 8),
        Direction::East => Bitboard((bb.0 & !FILE_H.0) << 1),
        Direction::West => Bitboard((bb.0 & !FILE_A.0) >> 1),
        Direction::NorthEast => Bitboard((bb.0 & !FILE_H.0) << 9),
        Direction::NorthWest => Bitboard((bb.0 & !FILE_A.0) << 7),
        Direction::SouthEast => Bitboard((bb.0 & !FILE_H.0) >> 7),
        Direction::SouthWest => Bitboard((bb.0 & !FILE_A.0) >> 9),
    }
}

/// Kogge-Stone-style fill: flood `sliders` through `open` squares along
/// `dir`. Each pass propagates the frontier one more step and ORs it into
/// the flood; since no ray is longer than 7 squares, 7 passes saturate
/// (later passes are no-ops once the frontier runs out of open squares).
#[must_use]
pub fn occ_fill(sliders: Bitboard, open: Bitboard, dir: Direction) -> Bitboard {
    let mut flood = sliders;
    let mut gen = sliders;
    for _ in 0..7 {
        gen = shift_one(gen, dir) & open;
        if gen.is_empty() {
            break;
        }
        flood |= gen;
    }
    flood
}

/// Attacks of `sliders` through `occupied`, i.e. the fill plus the first
/// blocking square in `dir` (or the board edge).
#[must_use]
pub fn sliding_attacks(sliders: Bitboard, occupied: Bitboard, dir: Direction) -> Bitboard {
    shift_one(occ_fill(sliders, !occupied, dir), dir)
}

/// Full line (both directions) through each square on an otherwise empty
/// board, excluding the square itself — horizontal, vertical, diagonal
/// and anti-diagonal. Used by the move generator as pin corridors: the
/// set of squares sharing a rank/file/diagonal with a given square.
pub struct LineFills {
    pub horizontal: [Bitboard; 64],
    pub vertical: [Bitboard; 64],
    pub diagonal: [Bitboard; 64],
    pub anti_diagonal: [Bitboard; 64],
}

fn build_line_fills() -> LineFills {
    let mut horizontal = [Bitboard::EMPTY; 64];
    let mut vertical = [Bitboard::EMPTY; 64];
    let mut diagonal = [Bitboard::EMPTY; 64];
    let mut anti_diagonal = [Bitboard::EMPTY; 64];

    for i in 0..64u8 {
        let sq = Square(i);
        let from = Bitboard::from_square(sq);
        horizontal[i as usize] = sliding_attacks(from, Bitboard::EMPTY, Direction::East)
            | sliding_attacks(from, Bitboard::EMPTY, Direction::West);
        vertical[i as usize] = sliding_attacks(from, Bitboard::EMPTY, Direction::North)
            | sliding_attacks(from, Bitboard::EMPTY, Direction::South);
        diagonal[i as usize] = sliding_attacks(from, Bitboard::EMPTY, Direction::NorthEast)
            | sliding_attacks(from, Bitboard::EMPTY, Direction::SouthWest);
        anti_diagonal[i as usize] = sliding_attacks(from, Bitboard::EMPTY, Direction::NorthWest)
            | sliding_attacks(from, Bitboard::EMPTY, Direction::SouthEast);
    }

    LineFills {
        horizontal,
        vertical,
        diagonal,
        anti_diagonal,
    }
}

pub static LINE_FILLS: once_cell::sync::Lazy<LineFills> = once_cell::sync::Lazy::new(build_line_fills);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn north_fill_from_a1_is_a_file() {
        let a1 = Bitboard::from_square(Square(0));
        let filled = sliding_attacks(a1, Bitboard::EMPTY, Direction::North);
        assert_eq!(filled.popcount(), 7);
        assert_eq!(filled, crate::types::FILE_A & !a1);
    }

    #[test]
    fn east_fill_stops_at_blocker() {
        let a1 = Bitboard::from_square(Square(0));
        let blocker = Bitboard::from_square(Square(3)); // d1
        let occ = a1 | blocker;
        let attacks = sliding_attacks(a1, occ, Direction::East);
        // b1, c1, d1 (includes the blocker itself, stops there)
        assert_eq!(attacks, Bitboard::from_square(Square(1)) | Bitboard::from_square(Square(2)) | blocker);
    }

    #[test]
    fn line_fill_through_center_square() {
        let sq = Square::new(3, 3); // d4
        let horiz = LINE_FILLS.horizontal[sq.index()];
        assert_eq!(horiz.popcount(), 7);
        assert!(!horiz.contains(sq));
    }
}
