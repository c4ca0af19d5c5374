//! Precomputed attack data: leaper tables, magic-bitboard sliders, and
//! the line-fill tables used as pin corridors. Everything here is
//! initialized once (on first access, via `once_cell::sync::Lazy`) and
//! never mutated again.

pub mod fills;
mod leapers;
mod magic;

pub use fills::{Direction, LINE_FILLS};
pub use leapers::{king_attacks, knight_attacks, pawn_attacks};
pub use magic::{bishop_attacks, queen_attacks, rook_attacks, xray_bishop, xray_rook};
