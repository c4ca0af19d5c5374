//! Zobrist hashing: 768 piece-square keys, 4 castling keys, 8 en-passant
//! file keys, 1 side-to-move key, all drawn once from a fixed seed.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::types::{Color, Piece, Square, ALL_PIECES};

/// Fixed seed so the key set — and therefore every hash value — is
/// reproducible across runs and builds.
const ZOBRIST_SEED: u64 = 1_234_567_890;

pub struct ZobristKeys {
    /// Indexed by `Piece::index()` then `Square::index()`.
    piece_square: [[u64; 64]; 12],
    castling: [u64; 4],
    en_passant_file: [u64; 8],
    side_to_move: u64,
}

fn build_keys() -> ZobristKeys {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
    let mut piece_square = [[0u64; 64]; 12];
    for piece in ALL_PIECES {
        for sq in 0..64usize {
            piece_square[piece.index()][sq] = rng.next_u64();
        }
    }
    let mut castling = [0u64; 4];
    for key in &mut castling {
        *key = rng.next_u64();
    }
    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.next_u64();
    }
    ZobristKeys {
        piece_square,
        castling,
        en_passant_file,
        side_to_move: rng.next_u64(),
    }
}

static KEYS: Lazy<ZobristKeys> = Lazy::new(build_keys);

#[inline]
#[must_use]
pub fn piece_square_key(piece: Piece, sq: Square) -> u64 {
    KEYS.piece_square[piece.index()][sq.index()]
}

/// One key per castling-right bit (wking/wqueen/bking/bqueen), XORed
/// individually for each set bit per §3's invariant.
#[inline]
#[must_use]
pub fn castling_bit_key(bit_index: u32) -> u64 {
    KEYS.castling[bit_index as usize]
}

#[inline]
#[must_use]
pub fn en_passant_file_key(file: u8) -> u64 {
    KEYS.en_passant_file[file as usize]
}

#[inline]
#[must_use]
pub fn side_to_move_key() -> u64 {
    KEYS.side_to_move
}

/// XOR of the keys for every bit set in `rights` (0..=15).
#[must_use]
pub fn castling_key(rights: u8) -> u64 {
    let mut key = 0u64;
    for bit in 0..4 {
        if rights & (1 << bit) != 0 {
            key ^= castling_bit_key(bit);
        }
    }
    key
}

#[inline]
#[must_use]
pub fn color_key(color: Color) -> u64 {
    match color {
        Color::White => side_to_move_key(),
        Color::Black => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic_across_calls() {
        assert_eq!(piece_square_key(Piece::WhiteKnight, Square(12)), piece_square_key(Piece::WhiteKnight, Square(12)));
    }

    #[test]
    fn distinct_pieces_get_distinct_keys() {
        assert_ne!(
            piece_square_key(Piece::WhitePawn, Square(20)),
            piece_square_key(Piece::BlackPawn, Square(20))
        );
    }

    #[test]
    fn castling_key_is_xor_of_set_bits() {
        let both = castling_key(0b0011);
        assert_eq!(both, castling_bit_key(0) ^ castling_bit_key(1));
    }
}
