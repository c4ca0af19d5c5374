//! A UCI-compatible chess engine: bitboard position representation,
//! single-pass legal move generation, alpha-beta search, and a static
//! evaluator, wired together through a small process-wide `Engine`.

pub mod attack_tables;
pub mod board;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod search;
pub mod see;
pub mod transposition_table;
pub mod types;
pub mod uci;
pub mod zobrist;
