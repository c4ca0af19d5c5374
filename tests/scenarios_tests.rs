//! End-to-end scenarios: mate-in-one, stalemate, en passant under pin,
//! threefold repetition, and castling blocked by attack.

use std::sync::atomic::AtomicBool;

use chess_engine::board::fen::{load_fen, parse_move, STARTPOS_FEN};
use chess_engine::engine::time::TimeConfig;
use chess_engine::movegen::generate_all;
use chess_engine::search::{run_search, SearchParams, SearchTables};
use chess_engine::transposition_table::TranspositionTable;
use chess_engine::types::{MoveList, Square};

fn search_to_depth(fen: &str, depth: u32) -> chess_engine::types::Move {
    let mut board = load_fen(fen).unwrap();
    let mut tt = TranspositionTable::with_size_mb(1);
    let mut tables = SearchTables::new();
    let stop = AtomicBool::new(false);
    let params = SearchParams {
        max_depth: Some(depth),
        ..Default::default()
    };
    run_search(&mut board, &mut tt, &mut tables, &stop, params, TimeConfig::default(), |_| {})
}

#[test]
fn mate_in_one_rook_delivers_mate() {
    let mv = search_to_depth("4k3/8/4K3/8/8/8/8/6R1 w - - 0 1", 3);
    assert_eq!(mv.from(), Square::new(0, 6));
    assert_eq!(mv.to(), Square::new(7, 6));
}

#[test]
fn stalemate_has_no_moves_and_is_not_check() {
    let board = load_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let mut list = MoveList::new();
    generate_all(&board, &mut list);
    assert!(list.is_empty());
    assert!(!board.is_in_check);
}

#[test]
fn en_passant_under_horizontal_pin_is_not_generated() {
    let board = load_fen("8/8/8/K2pP2r/8/8/8/8 w - d6 0 1").unwrap();
    let mut list = MoveList::new();
    generate_all(&board, &mut list);
    let from = Square::new(4, 4);
    let to = Square::new(5, 3);
    assert!(!list.as_slice().iter().any(|m| m.from() == from && m.to() == to && m.is_ep_capture()));
}

#[test]
fn threefold_repetition_is_detected() {
    let mut board = load_fen(STARTPOS_FEN).unwrap();
    let moves = ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"];
    for notation in moves {
        let mv = parse_move(&board, notation).unwrap();
        board.make_move(mv);
    }
    assert!(board.is_rep());
    assert!(board.is_draw());
}

#[test]
fn castling_allowed_then_blocked_by_rook_attack() {
    let open = load_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
    let mut list = MoveList::new();
    generate_all(&open, &mut list);
    assert!(list
        .as_slice()
        .iter()
        .any(|m| m.from() == Square::new(0, 4) && m.to() == Square::new(0, 6) && m.is_king_castle()));

    let attacked = load_fen("r3k2r/pppp1ppp/8/4r3/8/8/PPPP1PPP/R3K2R w KQkq - 0 1").unwrap();
    let mut list = MoveList::new();
    generate_all(&attacked, &mut list);
    assert!(!list
        .as_slice()
        .iter()
        .any(|m| m.from() == Square::new(0, 4) && m.to() == Square::new(0, 6) && m.is_king_castle()));
}

#[test]
fn incremental_hash_matches_from_scratch_across_a_move_sequence() {
    let mut board = load_fen(STARTPOS_FEN).unwrap();
    for notation in ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"] {
        let mv = parse_move(&board, notation).unwrap();
        board.make_move(mv);
        assert_eq!(board.hash_key, board.gen_pos_key());
    }
}
