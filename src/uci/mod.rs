//! Universal Chess Interface command loop: reads commands from stdin,
//! drives one `Engine`, and writes `info`/`bestmove` lines to stdout.

pub mod options;

use std::io::{self, BufRead, Write};

use crate::board::fen::{load_fen, parse_move, STARTPOS_FEN};
use crate::engine::Engine;
use crate::search::{InfoLine, SearchParams};
use crate::types::Move;

use options::{parse_setoption, UciOptionAction, UciOptions};

fn format_info(info: &InfoLine) -> String {
    let mut out = format!("info depth {} nodes {} time {}", info.depth, info.nodes, info.time_ms);
    if let Some(mate) = info.score_mate {
        out.push_str(&format!(" score mate {mate}"));
    } else if let Some(cp) = info.score_cp {
        out.push_str(&format!(" score cp {cp}"));
    }
    let nps = if info.time_ms > 0 { info.nodes * 1000 / info.time_ms } else { 0 };
    out.push_str(&format!(" nps {nps}"));
    if !info.pv.is_empty() {
        out.push_str(" pv");
        for mv in info.pv {
            out.push(' ');
            out.push_str(&mv.to_uci(None));
        }
    }
    out
}

fn handle_position(engine: &mut Engine, parts: &[&str]) {
    let mut i = 1;
    if i >= parts.len() {
        return;
    }
    let board = if parts[i] == "startpos" {
        i += 1;
        load_fen(STARTPOS_FEN)
    } else if parts[i] == "fen" {
        i += 1;
        let start = i;
        while i < parts.len() && parts[i] != "moves" {
            i += 1;
        }
        load_fen(&parts[start..i].join(" "))
    } else {
        return;
    };
    let Ok(mut board) = board else {
        eprintln!("info string invalid position");
        return;
    };
    if i < parts.len() && parts[i] == "moves" {
        i += 1;
        while i < parts.len() {
            match parse_move(&board, parts[i]) {
                Ok(mv) => {
                    board.make_move(mv);
                }
                Err(e) => {
                    eprintln!("info string invalid move {}: {e}", parts[i]);
                    break;
                }
            }
            i += 1;
        }
    }
    engine.set_board(board);
}

fn parse_go(parts: &[&str]) -> (SearchParams, Option<u32>) {
    let mut params = SearchParams::default();
    let mut perft_depth = None;
    let mut i = 1;
    while i < parts.len() {
        match parts[i] {
            "depth" => {
                i += 1;
                params.max_depth = parts.get(i).and_then(|v| v.parse().ok());
            }
            "nodes" => {
                i += 1;
                params.max_nodes = parts.get(i).and_then(|v| v.parse().ok());
            }
            "movetime" => {
                i += 1;
                params.move_time_ms = parts.get(i).and_then(|v| v.parse().ok());
            }
            "wtime" => {
                i += 1;
                params.wtime_ms = parts.get(i).and_then(|v| v.parse().ok());
            }
            "btime" => {
                i += 1;
                params.btime_ms = parts.get(i).and_then(|v| v.parse().ok());
            }
            "winc" => {
                i += 1;
                params.winc_ms = parts.get(i).and_then(|v| v.parse().ok());
            }
            "binc" => {
                i += 1;
                params.binc_ms = parts.get(i).and_then(|v| v.parse().ok());
            }
            "movestogo" => {
                i += 1;
                params.movestogo = parts.get(i).and_then(|v| v.parse().ok());
            }
            "infinite" => {
                params.infinite = true;
            }
            "perft" => {
                i += 1;
                perft_depth = parts.get(i).and_then(|v| v.parse().ok());
            }
            _ => {}
        }
        i += 1;
    }
    (params, perft_depth)
}

fn run_perft(engine: &mut Engine, depth: u32) {
    let mut board = engine.board().clone();
    let start = std::time::Instant::now();
    let nodes = board.perft(depth);
    let elapsed = start.elapsed();
    println!("info string perft depth {depth} nodes {nodes} time {:?}", elapsed);
}

fn print_best_move(mv: Move) {
    println!("bestmove {}", mv.to_uci(None));
    let _ = io::stdout().flush();
}

pub fn run_uci_loop() {
    let mut engine = Engine::new();
    let mut options = UciOptions::new();
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        match parts[0] {
            "uci" => options.print(),
            "isready" => println!("readyok"),
            "ucinewgame" => engine.new_game(),
            "setoption" => {
                if let Some((name, value)) = parse_setoption(&parts) {
                    if let Some(UciOptionAction::ReinitHash(mb)) = options.apply_setoption(&name, value.as_deref()) {
                        engine.resize_hash(mb);
                    }
                }
            }
            "position" => handle_position(&mut engine, &parts),
            "go" => {
                let (params, perft_depth) = parse_go(&parts);
                if let Some(depth) = perft_depth {
                    run_perft(&mut engine, depth);
                    continue;
                }
                engine.set_time_config(options.time_config());
                engine.start_search(
                    params,
                    |info| println!("{}", format_info(&info)),
                    print_best_move,
                );
            }
            "stop" => engine.signal_stop(),
            "d" => println!("{}", crate::board::fen::to_fen(engine.board())),
            "eval" => println!("info string eval {}", crate::eval::evaluate(engine.board())),
            "quit" => {
                engine.stop_search();
                break;
            }
            _ => {}
        }
        let _ = io::stdout().flush();
    }
}
