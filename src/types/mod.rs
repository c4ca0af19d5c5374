//! Pure data types shared by every other module: bitboards, squares,
//! pieces, moves, castling rights. No precomputed tables, no `Board`
//! reference — these are included everywhere without creating a cycle.

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter, FILES, FILE_A, FILE_H, RANKS, RANK_1, RANK_2, RANK_4, RANK_5, RANK_7, RANK_8};
pub use castling::{CastlingRights, ALL_RIGHTS, BKING_SIDE, BQUEEN_SIDE, CASTLE_MASK, WKING_SIDE, WQUEEN_SIDE};
pub use moves::{
    Move, MoveList, ScoredMove, ScoredMoveList, BISHOP_PROMO, BISHOP_PROMO_CAPTURE, CAPTURE,
    DOUBLE_PUSH, EP_CAPTURE, KING_CASTLE, KNIGHT_PROMO, KNIGHT_PROMO_CAPTURE, MAX_MOVES, MAX_PLY,
    NULL_MOVE, QUEEN_CASTLE, QUEEN_PROMO, QUEEN_PROMO_CAPTURE, QUIET, ROOK_PROMO,
    ROOK_PROMO_CAPTURE,
};
pub use piece::{Color, Piece, ALL_PIECES, ALLPIECES, BPIECES, NO_COLOR, NO_PIECE, NUM_KINDS, NUM_PIECES, WPIECES};
pub use square::{Square, NO_SQUARE};
