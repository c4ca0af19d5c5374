//! Full perft table: castling, en passant with discovered check, double
//! pins, and promotions, each exercised to the depth the position is
//! named for.

use chess_engine::board::fen::load_fen;

#[test]
fn startpos_perft_depth_four() {
    let mut board = load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    assert_eq!(board.perft(1), 20);
    assert_eq!(board.perft(2), 400);
    assert_eq!(board.perft(3), 8_902);
    assert_eq!(board.perft(4), 197_281);
}

#[test]
fn kiwipete_perft_depth_three() {
    let mut board = load_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0").unwrap();
    assert_eq!(board.perft(1), 48);
    assert_eq!(board.perft(2), 2_039);
    assert_eq!(board.perft(3), 97_862);
}

#[test]
fn discovered_check_position_perft_depth_three() {
    let mut board = load_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(board.perft(1), 14);
    assert_eq!(board.perft(2), 191);
    assert_eq!(board.perft(3), 2_812);
}

#[test]
fn double_pin_promotion_position_perft_depth_three() {
    let mut board = load_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8").unwrap();
    assert_eq!(board.perft(1), 44);
    assert_eq!(board.perft(2), 1_486);
    assert_eq!(board.perft(3), 62_379);
}
