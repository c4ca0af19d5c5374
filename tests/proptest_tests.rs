//! Property-based tests for move make/unmake and SEE, using `proptest` to
//! drive random legal move sequences from the start position.

use proptest::prelude::*;
use rand::prelude::*;

use chess_engine::board::fen::{load_fen, to_fen, STARTPOS_FEN};
use chess_engine::board::state::{Board, UnmakeInfo};
use chess_engine::movegen::generate_all;
use chess_engine::see::see;
use chess_engine::types::{Move, MoveList, Piece};

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=20usize
}

fn random_move_sequence(board: &mut Board, rng: &mut StdRng, num_moves: usize) -> Vec<(Move, UnmakeInfo)> {
    let mut history = Vec::with_capacity(num_moves);
    for _ in 0..num_moves {
        let mut moves = MoveList::new();
        generate_all(board, &mut moves);
        if moves.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..moves.len());
        let mv = moves.as_slice()[idx];
        let undo = board.make_move(mv);
        history.push((mv, undo));
    }
    history
}

proptest! {
    /// make_move followed by unmake_last_move restores hash, FEN, and the
    /// repetition table exactly, for any prefix of a random legal game.
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = load_fen(STARTPOS_FEN).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        let initial_hash = board.hash_key;
        let initial_fen = to_fen(&board);
        let initial_rep_count = board.repetitions.get(initial_hash);

        let history = random_move_sequence(&mut board, &mut rng, num_moves);

        for (_, undo) in history.into_iter().rev() {
            board.unmake_last_move(undo);
        }

        prop_assert_eq!(board.hash_key, initial_hash);
        prop_assert_eq!(to_fen(&board), initial_fen);
        prop_assert_eq!(board.repetitions.get(initial_hash), initial_rep_count);
    }

    /// The incremental hash kept on `Board` always matches a from-scratch
    /// recomputation, after every move in a random legal game.
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = load_fen(STARTPOS_FEN).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let mut moves = MoveList::new();
            generate_all(&board, &mut moves);
            if moves.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..moves.len());
            let mv = moves.as_slice()[idx];
            board.make_move(mv);

            prop_assert_eq!(board.hash_key, board.gen_pos_key());
        }
    }

    /// Rendering a reached position to FEN and reloading it reproduces the
    /// same hash and side to move.
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = load_fen(STARTPOS_FEN).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        random_move_sequence(&mut board, &mut rng, num_moves);

        let fen = to_fen(&board);
        let restored = load_fen(&fen).unwrap();

        prop_assert_eq!(restored.hash_key, board.hash_key);
        prop_assert_eq!(restored.side_to_move, board.side_to_move);
        prop_assert_eq!(restored.castling_rights, board.castling_rights);
        prop_assert_eq!(restored.en_passant_square, board.en_passant_square);
    }

    /// SEE of a capture never exceeds the value of the piece sitting on the
    /// target square (the most a single exchange can net is what's there).
    #[test]
    fn prop_see_bounded_by_victim(seed in seed_strategy(), num_moves in 0..15usize) {
        let mut board = load_fen(STARTPOS_FEN).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        random_move_sequence(&mut board, &mut rng, num_moves);

        let mut moves = MoveList::new();
        generate_all(&board, &mut moves);
        for &mv in moves.iter() {
            if mv.is_capture() && !mv.is_ep_capture() {
                if let Some(victim) = board.piece_at(mv.to()) {
                    let gain = see(&board, mv);
                    prop_assert!(
                        gain <= victim.value(),
                        "SEE {} exceeds victim value {} for {}",
                        gain,
                        victim.value(),
                        mv
                    );
                }
            }
        }
    }

    /// SEE of an undefended capture equals the captured piece's value.
    #[test]
    fn prop_see_undefended_equals_value(_seed in seed_strategy()) {
        let board = load_fen("8/8/8/3p4/4N3/8/8/8 w - - 0 1").unwrap();
        let mut moves = MoveList::new();
        generate_all(&board, &mut moves);

        for &mv in moves.iter() {
            if mv.is_capture() {
                prop_assert_eq!(see(&board, mv), Piece::BlackPawn.value());
            }
        }
    }
}
