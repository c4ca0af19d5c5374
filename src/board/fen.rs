//! FEN load/serialize and UCI pure-coordinate move parsing.

use crate::board::error::{FenError, MoveParseError};
use crate::board::state::Board;
use crate::movegen;
use crate::types::{Color, Move, Piece, Square, ALL_RIGHTS, BKING_SIDE, BQUEEN_SIDE, NO_SQUARE, WKING_SIDE, WQUEEN_SIDE};

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string into a fresh `Board`. `load_fen` is the only
/// legal entry point for constructing a non-empty position (besides the
/// default empty constructor), per the lifecycle invariant.
pub fn load_fen(fen: &str) -> Result<Board, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(FenError::TooFewParts { found: fields.len() });
    }

    let mut board = Board::empty();

    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRank { rank: ranks.len() });
    }
    // FEN lists rank 8 first; XOR the running square index by 56 per
    // consumed rank to convert into little-endian rank-file order.
    let mut sq_idx: u8 = 0;
    for rank_str in &ranks {
        let mut files_seen = 0u32;
        for c in rank_str.chars() {
            if let Some(empty_count) = c.to_digit(10) {
                sq_idx += empty_count as u8;
                files_seen += empty_count;
            } else {
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let sq = Square(sq_idx ^ 56);
                board.put_piece(piece, sq);
                sq_idx += 1;
                files_seen += 1;
            }
        }
        if files_seen != 8 {
            return Err(FenError::TooManyFiles {
                rank: (sq_idx / 8) as usize,
                files: files_seen as usize,
            });
        }
    }

    board.side_to_move = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => {
            return Err(FenError::InvalidSideToMove {
                found: other.to_string(),
            })
        }
    };

    let mut rights = 0u8;
    if fields[2] != "-" {
        for c in fields[2].chars() {
            rights |= match c {
                'K' => WKING_SIDE,
                'Q' => WQUEEN_SIDE,
                'k' => BKING_SIDE,
                'q' => BQUEEN_SIDE,
                other => return Err(FenError::InvalidCastling { char: other }),
            };
        }
    }
    board.castling_rights = rights & ALL_RIGHTS;

    board.en_passant_square = if fields.len() > 3 && fields[3] != "-" {
        Square::from_algebraic(fields[3]).ok_or_else(|| FenError::InvalidEnPassant {
            found: fields[3].to_string(),
        })?
    } else {
        NO_SQUARE
    };

    board.halfmove_clock = fields.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);
    board.fullmove_number = fields.get(5).and_then(|s| s.parse().ok()).unwrap_or(1);

    if board.piece_bb(Piece::WhiteKing).is_empty() {
        return Err(FenError::MissingKing { color: "white" });
    }
    if board.piece_bb(Piece::BlackKing).is_empty() {
        return Err(FenError::MissingKing { color: "black" });
    }

    board.hash_key = board.gen_pos_key();
    board.is_in_check = movegen::king_in_check(&board, board.side_to_move);
    board.repetitions.increment(board.hash_key);

    Ok(board)
}

/// Serialize the current position back to FEN.
#[must_use]
pub fn to_fen(board: &Board) -> String {
    let mut placement = String::new();
    for rank in (0..8u8).rev() {
        let mut empty_run = 0u32;
        for file in 0..8u8 {
            let sq = Square::new(rank, file);
            match board.piece_at(sq) {
                None => empty_run += 1,
                Some(piece) => {
                    if empty_run > 0 {
                        placement.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    placement.push(piece.to_char());
                }
            }
        }
        if empty_run > 0 {
            placement.push_str(&empty_run.to_string());
        }
        if rank != 0 {
            placement.push('/');
        }
    }

    let side = match board.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };

    let mut castling = String::new();
    if board.castling_rights & WKING_SIDE != 0 {
        castling.push('K');
    }
    if board.castling_rights & WQUEEN_SIDE != 0 {
        castling.push('Q');
    }
    if board.castling_rights & BKING_SIDE != 0 {
        castling.push('k');
    }
    if board.castling_rights & BQUEEN_SIDE != 0 {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let ep = if board.en_passant_square == NO_SQUARE {
        "-".to_string()
    } else {
        board.en_passant_square.to_string()
    };

    format!(
        "{placement} {side} {castling} {ep} {} {}",
        board.halfmove_clock, board.fullmove_number
    )
}

/// Parse pure-coordinate notation against the currently legal move list,
/// accepting both standard (`e1g1`) and the non-standard rook-destination
/// (`e1h1`) castling spellings.
pub fn parse_move(board: &mut Board, notation: &str) -> Result<Move, MoveParseError> {
    let bytes = notation.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return Err(MoveParseError::InvalidLength { len: bytes.len() });
    }
    let from = Square::from_algebraic(&notation[0..2]).ok_or_else(|| MoveParseError::InvalidSquare {
        notation: notation.to_string(),
    })?;
    let mut to = Square::from_algebraic(&notation[2..4]).ok_or_else(|| MoveParseError::InvalidSquare {
        notation: notation.to_string(),
    })?;
    let promotion = if bytes.len() == 5 {
        Some(bytes[4] as char)
    } else {
        None
    };

    // Accept e1h1/e1a1/e8h8/e8a8 as the castling king-move spelling.
    if let Some(piece) = board.piece_at(from) {
        if piece.kind() == 5 {
            let home_rank = piece.color() == Color::White;
            let rank_ok = (home_rank && from.rank() == 0) || (!home_rank && from.rank() == 7);
            if rank_ok && from.file() == 4 {
                if to.file() == 7 {
                    to = Square::new(from.rank(), 6);
                } else if to.file() == 0 {
                    to = Square::new(from.rank(), 2);
                }
            }
        }
    }

    let mut list = crate::types::MoveList::new();
    movegen::generate_all(board, &mut list);
    for &mv in list.as_slice() {
        if mv.from() != from || mv.to() != to {
            continue;
        }
        if mv.is_promotion() {
            let expected = match mv.promotion_kind() {
                0 => 'n',
                1 => 'b',
                2 => 'r',
                _ => 'q',
            };
            if promotion != Some(expected) {
                continue;
            }
        } else if promotion.is_some() {
            continue;
        }
        return Ok(mv);
    }
    Err(MoveParseError::IllegalMove {
        notation: notation.to_string(),
    })
}

/// Parse and apply one pure-coordinate move, returning its undo record.
pub fn make_move_uci(board: &mut Board, notation: &str) -> Result<crate::board::state::UnmakeInfo, MoveParseError> {
    let mv = parse_move(board, notation)?;
    Ok(board.make_move(mv))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_round_trips() {
        let board = load_fen(STARTPOS_FEN).unwrap();
        assert_eq!(to_fen(&board), STARTPOS_FEN);
    }

    #[test]
    fn kiwipete_round_trips() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0";
        let board = load_fen(fen).unwrap();
        assert_eq!(to_fen(&board), fen);
    }

    #[test]
    fn rejects_missing_king() {
        let fen = "8/8/8/8/8/8/8/7k w - - 0 1";
        assert!(matches!(load_fen(fen), Err(FenError::MissingKing { .. })));
    }

    #[test]
    fn parses_uci_move_against_legal_list() {
        let mut board = load_fen(STARTPOS_FEN).unwrap();
        let mv = parse_move(&mut board, "e2e4").unwrap();
        assert_eq!(mv.from(), Square::new(1, 4));
        assert_eq!(mv.to(), Square::new(3, 4));
        assert!(mv.is_double_push());
    }
}
