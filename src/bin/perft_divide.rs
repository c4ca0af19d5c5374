//! Standalone perft-divide utility: prints the leaf count contributed by
//! each root move, for diffing against a reference engine during debugging.

use std::env;
use std::time::Instant;

use chess_engine::board::fen::load_fen;
use chess_engine::types::MoveList;

const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn main() {
    let mut args = env::args().skip(1);
    let fen = args.next().unwrap_or_else(|| KIWIPETE_FEN.to_string());
    let depth: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    let mut board = load_fen(&fen).expect("invalid FEN");
    println!("perft divide depth {depth}");
    let start = Instant::now();

    let mut root_moves = MoveList::new();
    chess_engine::movegen::generate_all(&board, &mut root_moves);

    let mut total = 0u64;
    for &mv in root_moves.as_slice() {
        let undo = board.make_move(mv);
        let nodes = if depth > 1 { board.perft(depth - 1) } else { 1 };
        board.unmake_last_move(undo);
        println!("  {}: {}", mv.to_uci(None), nodes);
        total += nodes;
    }

    println!("total {} in {:?}", total, start.elapsed());
}
