//! Static evaluation: material, piece-square tables, pawn structure, and
//! phase-dependent king safety. Returns centipawns from the side to
//! move's perspective; callers negate for the opponent.

mod pst;

use crate::board::state::Board;
use crate::types::{Bitboard, Color, Piece, Square, FILES};

const ENDGAME_NON_PAWN_THRESHOLD: u32 = 7;

const DOUBLED_PAWN_PENALTY: i32 = -10;
const TRIPLED_PAWN_EXTRA_PENALTY: i32 = -15;
const ISOLATED_PAWN_PENALTY: i32 = -15;
const HALF_ISOLATED_PAWN_PENALTY: i32 = -7;
const PASSED_PAWN_BONUS: i32 = 20;
const OPEN_FILE_ROOK_BONUS: i32 = 15;
const HALF_OPEN_FILE_ROOK_BONUS: i32 = 8;

fn pst_value(piece: Piece, sq: Square) -> i32 {
    let table = &pst::TABLES;
    let kind_table = match piece.kind() {
        0 => &table.pawn,
        1 => &table.knight,
        2 => &table.bishop,
        3 => &table.rook,
        4 => &table.queen,
        _ => unreachable!("king uses the phase-dependent tables directly"),
    };
    match piece.color() {
        Color::Black => kind_table[sq.index()],
        Color::White => kind_table[sq.flip_rank().index()],
    }
}

fn king_pst_value(color: Color, sq: Square, endgame: bool) -> i32 {
    let table = if endgame { &pst::TABLES.king_eg } else { &pst::TABLES.king_mg };
    match color {
        Color::Black => table[sq.index()],
        Color::White => table[sq.flip_rank().index()],
    }
}

fn is_endgame(board: &Board) -> bool {
    let non_pawn_non_king = board.piece_bb(Piece::WhiteKnight)
        | board.piece_bb(Piece::BlackKnight)
        | board.piece_bb(Piece::WhiteBishop)
        | board.piece_bb(Piece::BlackBishop)
        | board.piece_bb(Piece::WhiteRook)
        | board.piece_bb(Piece::BlackRook)
        | board.piece_bb(Piece::WhiteQueen)
        | board.piece_bb(Piece::BlackQueen);
    non_pawn_non_king.popcount() <= ENDGAME_NON_PAWN_THRESHOLD
}

fn adjacent_files_mask(file: u8) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    if file > 0 {
        mask |= FILES[(file - 1) as usize];
    }
    if file < 7 {
        mask |= FILES[(file + 1) as usize];
    }
    mask
}

fn ahead_mask(rank: u8, color: Color) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    match color {
        Color::White => {
            for r in (rank + 1)..8 {
                mask |= crate::types::RANKS[r as usize];
            }
        }
        Color::Black => {
            for r in 0..rank {
                mask |= crate::types::RANKS[r as usize];
            }
        }
    }
    mask
}

pub(crate) fn pawn_structure(board: &Board, color: Color) -> i32 {
    let own_pawns = board.piece_bb(Piece::new(0, color));
    let enemy_pawns = board.piece_bb(Piece::new(0, color.opponent()));
    let mut score = 0;

    for file in 0..8u8 {
        let on_file = (own_pawns & FILES[file as usize]).popcount();
        if on_file >= 2 {
            score += DOUBLED_PAWN_PENALTY;
        }
        if on_file >= 3 {
            score += TRIPLED_PAWN_EXTRA_PENALTY;
        }
    }

    for sq in own_pawns.iter() {
        let neighbours = adjacent_files_mask(sq.file());
        let left_has = sq.file() > 0 && !(own_pawns & FILES[(sq.file() - 1) as usize]).is_empty();
        let right_has = sq.file() < 7 && !(own_pawns & FILES[(sq.file() + 1) as usize]).is_empty();
        if !left_has && !right_has {
            score += ISOLATED_PAWN_PENALTY;
        } else if !left_has || !right_has {
            score += HALF_ISOLATED_PAWN_PENALTY;
        }

        let front_span = ahead_mask(sq.rank(), color) & (neighbours | FILES[sq.file() as usize]);
        if (enemy_pawns & front_span).is_empty() {
            score += PASSED_PAWN_BONUS;
        }
    }

    score
}

fn rook_files(board: &Board, color: Color) -> i32 {
    let white_pawns = board.piece_bb(Piece::WhitePawn);
    let black_pawns = board.piece_bb(Piece::BlackPawn);
    let own_pawns = board.piece_bb(Piece::new(0, color));
    let mut score = 0;
    for sq in board.piece_bb(Piece::new(3, color)).iter() {
        let file_mask = FILES[sq.file() as usize];
        let all_pawns_on_file = (white_pawns | black_pawns) & file_mask;
        if all_pawns_on_file.is_empty() {
            score += OPEN_FILE_ROOK_BONUS;
        } else if (own_pawns & file_mask).is_empty() {
            score += HALF_OPEN_FILE_ROOK_BONUS;
        }
    }
    score
}

fn material_and_pst(board: &Board, color: Color, endgame: bool) -> i32 {
    let mut score = 0;
    for kind in 0..5usize {
        let piece = Piece::new(kind, color);
        for sq in board.piece_bb(piece).iter() {
            score += piece.value() + pst_value(piece, sq);
        }
    }
    score += Piece::new(5, color).value() + king_pst_value(color, board.king_square(color), endgame);
    score
}

/// Centipawn score from `board.side_to_move`'s perspective.
#[must_use]
pub fn evaluate(board: &Board) -> i32 {
    let endgame = is_endgame(board);
    let white = material_and_pst(board, Color::White, endgame)
        + pawn_structure(board, Color::White)
        + rook_files(board, Color::White);
    let black = material_and_pst(board, Color::Black, endgame)
        + pawn_structure(board, Color::Black)
        + rook_files(board, Color::Black);
    let score = white - black;
    match board.side_to_move {
        Color::White => score,
        Color::Black => -score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::load_fen;

    #[test]
    fn startpos_is_balanced() {
        let board = load_fen(crate::board::fen::STARTPOS_FEN).unwrap();
        assert_eq!(evaluate(&board), 0);
    }

    #[test]
    fn extra_queen_is_a_large_advantage() {
        let board = load_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(evaluate(&board) > 800);
    }

    #[test]
    fn doubled_pawns_are_penalized() {
        let spread = load_fen("4k3/8/8/8/8/8/PP6/4K3 w - - 0 1").unwrap();
        let doubled = load_fen("4k3/8/8/8/8/P7/P7/4K3 w - - 0 1").unwrap();
        assert!(pawn_structure(&doubled, Color::White) < pawn_structure(&spread, Color::White));
    }

    #[test]
    fn isolated_pawn_is_penalized_versus_supported() {
        let isolated = load_fen("4k3/8/8/8/8/8/P1P5/4K3 w - - 0 1").unwrap();
        let supported = load_fen("4k3/8/8/8/8/8/PPP5/4K3 w - - 0 1").unwrap();
        assert!(pawn_structure(&isolated, Color::White) < pawn_structure(&supported, Color::White));
    }
}
