//! Knight, king and pawn attack tables: constant per-square lookups.

use crate::types::{Bitboard, Color, Square};

fn knight_attacks_from(sq: Square) -> Bitboard {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    const DELTAS: [(i32, i32); 8] = [
        (1, 2), (2, 1), (2, -1), (1, -2),
        (-1, -2), (-2, -1), (-2, 1), (-1, 2),
    ];
    let mut bb = Bitboard::EMPTY;
    for (df, dr) in DELTAS {
        let f = file + df;
        let r = rank + dr;
        if (0..8).contains(&f) && (0..8).contains(&r) {
            bb = bb.set(Square::new(r as u8, f as u8));
        }
    }
    bb
}

fn king_attacks_from(sq: Square) -> Bitboard {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    let mut bb = Bitboard::EMPTY;
    for df in -1..=1 {
        for dr in -1..=1 {
            if df == 0 && dr == 0 {
                continue;
            }
            let f = file + df;
            let r = rank + dr;
            if (0..8).contains(&f) && (0..8).contains(&r) {
                bb = bb.set(Square::new(r as u8, f as u8));
            }
        }
    }
    bb
}

fn pawn_attacks_from(sq: Square, color: Color) -> Bitboard {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    let dr = match color {
        Color::White => 1,
        Color::Black => -1,
    };
    let mut bb = Bitboard::EMPTY;
    for df in [-1, 1] {
        let f = file + df;
        let r = rank + dr;
        if (0..8).contains(&f) && (0..8).contains(&r) {
            bb = bb.set(Square::new(r as u8, f as u8));
        }
    }
    bb
}

pub struct LeaperTables {
    pub knight: [Bitboard; 64],
    pub king: [Bitboard; 64],
    /// Indexed `[square][color]`.
    pub pawn: [[Bitboard; 2]; 64],
}

fn build() -> LeaperTables {
    let mut knight = [Bitboard::EMPTY; 64];
    let mut king = [Bitboard::EMPTY; 64];
    let mut pawn = [[Bitboard::EMPTY; 2]; 64];
    for i in 0..64u8 {
        let sq = Square(i);
        knight[i as usize] = knight_attacks_from(sq);
        king[i as usize] = king_attacks_from(sq);
        pawn[i as usize][Color::White.index()] = pawn_attacks_from(sq, Color::White);
        pawn[i as usize][Color::Black.index()] = pawn_attacks_from(sq, Color::Black);
    }
    LeaperTables { knight, king, pawn }
}

pub static LEAPERS: once_cell::sync::Lazy<LeaperTables> = once_cell::sync::Lazy::new(build);

#[inline]
#[must_use]
pub fn knight_attacks(sq: Square) -> Bitboard {
    LEAPERS.knight[sq.index()]
}

#[inline]
#[must_use]
pub fn king_attacks(sq: Square) -> Bitboard {
    LEAPERS.king[sq.index()]
}

#[inline]
#[must_use]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    LEAPERS.pawn[sq.index()][color.index()]
}
