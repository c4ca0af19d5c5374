//! Piece and colour encodings.
//!
//! Numbered so that colour is a range test rather than a field lookup:
//! 0-5 are the black pieces, 6-11 the white ones, in `{p,n,b,r,q,k}`
//! order. `Piece::index() < 6` is black, `>= 6` is white.

use std::fmt;

/// A coloured chess piece, or one of the bitboard-array sentinels.
///
/// Discriminants match the data model exactly: `0..=5` black, `6..=11`
/// white, then the three union sentinels and `no_piece`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Piece {
    BlackPawn = 0,
    BlackKnight = 1,
    BlackBishop = 2,
    BlackRook = 3,
    BlackQueen = 4,
    BlackKing = 5,
    WhitePawn = 6,
    WhiteKnight = 7,
    WhiteBishop = 8,
    WhiteRook = 9,
    WhiteQueen = 10,
    WhiteKing = 11,
}

/// Bitboard-array slots that are not a single piece type: the per-colour
/// unions, the combined union, and "no piece on this square".
pub const BPIECES: usize = 12;
pub const WPIECES: usize = 13;
pub const ALLPIECES: usize = 14;
pub const NO_PIECE: u8 = 15;

/// Number of real per-piece bitboard slots (0..=11).
pub const NUM_PIECES: usize = 12;
/// Number of kinds of piece ignoring colour (pawn..king).
pub const NUM_KINDS: usize = 6;

pub const ALL_PIECES: [Piece; 12] = [
    Piece::BlackPawn,
    Piece::BlackKnight,
    Piece::BlackBishop,
    Piece::BlackRook,
    Piece::BlackQueen,
    Piece::BlackKing,
    Piece::WhitePawn,
    Piece::WhiteKnight,
    Piece::WhiteBishop,
    Piece::WhiteRook,
    Piece::WhiteQueen,
    Piece::WhiteKing,
];

impl Piece {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Build a piece from a raw bitboard-array index (0..=11).
    #[inline]
    #[must_use]
    pub const fn from_index(idx: u8) -> Piece {
        match idx {
            0 => Piece::BlackPawn,
            1 => Piece::BlackKnight,
            2 => Piece::BlackBishop,
            3 => Piece::BlackRook,
            4 => Piece::BlackQueen,
            5 => Piece::BlackKing,
            6 => Piece::WhitePawn,
            7 => Piece::WhiteKnight,
            8 => Piece::WhiteBishop,
            9 => Piece::WhiteRook,
            10 => Piece::WhiteQueen,
            11 => Piece::WhiteKing,
            _ => panic!("piece index out of range"),
        }
    }

    /// Colour is a range test on the index, per the data model.
    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        if (self as u8) < 6 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Colour-independent piece kind, 0=pawn .. 5=king.
    #[inline]
    #[must_use]
    pub const fn kind(self) -> usize {
        (self as usize) % 6
    }

    #[inline]
    #[must_use]
    pub const fn new(kind: usize, color: Color) -> Piece {
        Piece::from_index((kind as u8) + color.piece_offset())
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        match self.kind() {
            0 => 100,
            1 => 320,
            2 => 330,
            3 => 500,
            4 => 900,
            5 => 20_000,
            _ => unreachable!(),
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => 0,
            'n' => 1,
            'b' => 2,
            'r' => 3,
            'q' => 4,
            'k' => 5,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        let base = match self.kind() {
            0 => 'p',
            1 => 'n',
            2 => 'b',
            3 => 'r',
            4 => 'q',
            5 => 'k',
            _ => unreachable!(),
        };
        match self.color() {
            Color::Black => base,
            Color::White => base.to_ascii_uppercase(),
        }
    }

    /// The four promotion targets, knight..queen, for a given colour.
    #[must_use]
    pub const fn promotion_piece(kind_index: u8, color: Color) -> Piece {
        // kind_index: 0=knight,1=bishop,2=rook,3=queen (matches move-code order)
        Piece::new((kind_index + 1) as usize, color)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Side to move / side owning a piece. `black=0`, `white=1`, matching the
/// data model so `xor 1` flips sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

pub const NO_COLOR: u8 = 2;

impl Color {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Offset added to a piece kind (0..=5) to get the bitboard-array index.
    #[inline]
    #[must_use]
    const fn piece_offset(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => 6,
        }
    }

    /// The sentinel slot (`bpieces`/`wpieces`) holding this colour's union.
    #[inline]
    #[must_use]
    pub const fn union_slot(self) -> usize {
        match self {
            Color::Black => BPIECES,
            Color::White => WPIECES,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Black => "black",
            Color::White => "white",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_is_range_test() {
        for p in ALL_PIECES {
            if p.index() < 6 {
                assert_eq!(p.color(), Color::Black);
            } else {
                assert_eq!(p.color(), Color::White);
            }
        }
    }

    #[test]
    fn xor_one_flips_side() {
        assert_eq!(Color::Black as u8 ^ 1, Color::White as u8);
        assert_eq!(Color::White as u8 ^ 1, Color::Black as u8);
    }

    #[test]
    fn from_char_roundtrip() {
        for c in ['p', 'n', 'b', 'r', 'q', 'k', 'P', 'N', 'B', 'R', 'Q', 'K'] {
            let piece = Piece::from_char(c).unwrap();
            assert_eq!(piece.to_char(), c);
        }
    }

    #[test]
    fn new_matches_index() {
        assert_eq!(Piece::new(0, Color::Black), Piece::BlackPawn);
        assert_eq!(Piece::new(5, Color::White), Piece::WhiteKing);
        assert_eq!(Piece::new(0, Color::White).index(), 6);
    }

    #[test]
    fn values_are_standard() {
        assert_eq!(Piece::BlackPawn.value(), 100);
        assert_eq!(Piece::WhiteQueen.value(), 900);
    }
}
