//! The mutable position and everything that touches it directly: state,
//! FEN I/O, and the recoverable parse-error types.

pub mod error;
pub mod fen;
pub mod state;

pub use error::{FenError, MoveParseError};
pub use fen::{load_fen, make_move_uci, parse_move, to_fen, STARTPOS_FEN};
pub use state::{Board, RepetitionTable, UnmakeInfo, MAX_STATE_STACK};
