//! Benchmarks for chess engine performance.

use std::sync::atomic::AtomicBool;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_engine::board::fen::{load_fen, STARTPOS_FEN};
use chess_engine::eval::evaluate;
use chess_engine::movegen::generate_all;
use chess_engine::search::{run_search, SearchParams, SearchTables};
use chess_engine::transposition_table::{TranspositionTable, DEFAULT_TT_MB};
use chess_engine::types::MoveList;

const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const MIDDLEGAME_FEN: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut board = load_fen(STARTPOS_FEN).unwrap();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| board.perft(black_box(depth)))
        });
    }

    let mut kiwipete = load_fen(KIWIPETE_FEN).unwrap();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = load_fen(STARTPOS_FEN).unwrap();
    group.bench_function("startpos", |b| {
        b.iter(|| {
            let mut list = MoveList::new();
            generate_all(&startpos, &mut list);
            black_box(list.len())
        })
    });

    let middlegame = load_fen(MIDDLEGAME_FEN).unwrap();
    group.bench_function("middlegame", |b| {
        b.iter(|| {
            let mut list = MoveList::new();
            generate_all(&middlegame, &mut list);
            black_box(list.len())
        })
    });

    let kiwipete = load_fen(KIWIPETE_FEN).unwrap();
    group.bench_function("kiwipete", |b| {
        b.iter(|| {
            let mut list = MoveList::new();
            generate_all(&kiwipete, &mut list);
            black_box(list.len())
        })
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    let stop = AtomicBool::new(false);

    for depth in [3, 4, 5] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut board = load_fen(STARTPOS_FEN).unwrap();
                let mut tt = TranspositionTable::with_size_mb(DEFAULT_TT_MB);
                let mut tables = SearchTables::new();
                let params = SearchParams {
                    max_depth: Some(depth),
                    ..Default::default()
                };
                run_search(
                    &mut board,
                    &mut tt,
                    &mut tables,
                    &stop,
                    params,
                    chess_engine::engine::time::TimeConfig::default(),
                    |_| {},
                )
            })
        });
    }

    for depth in [3, 4] {
        group.bench_with_input(BenchmarkId::new("tactical", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut board = load_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4").unwrap();
                let mut tt = TranspositionTable::with_size_mb(DEFAULT_TT_MB);
                let mut tables = SearchTables::new();
                let params = SearchParams {
                    max_depth: Some(depth),
                    ..Default::default()
                };
                run_search(
                    &mut board,
                    &mut tt,
                    &mut tables,
                    &stop,
                    params,
                    chess_engine::engine::time::TimeConfig::default(),
                    |_| {},
                )
            })
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    let positions = [
        ("startpos", STARTPOS_FEN),
        ("middlegame", MIDDLEGAME_FEN),
        ("endgame", "8/5k2/8/8/8/8/5K2/4R3 w - - 0 1"),
    ];

    for (name, fen) in positions {
        let board = load_fen(fen).unwrap();
        group.bench_with_input(BenchmarkId::new("position", name), &board, |b, board| {
            b.iter(|| black_box(evaluate(board)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_search, bench_eval);
criterion_main!(benches);
