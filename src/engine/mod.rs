//! Process-wide engine state: the board, transposition table, and search
//! scratch tables as explicit long-lived objects, plus the background
//! search thread and cooperative stop flag that the UCI loop drives.

pub mod time;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::board::state::Board;
use crate::search::{run_search, InfoLine, SearchParams, SearchTables};
use crate::transposition_table::{TranspositionTable, DEFAULT_TT_MB};
use crate::types::Move;

const SEARCH_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Transposition table and search scratch tables, shared between the UCI
/// thread and the background search thread under one lock.
pub struct SearchState {
    pub tt: TranspositionTable,
    pub tables: SearchTables,
}

impl SearchState {
    #[must_use]
    pub fn new(tt_mb: usize) -> SearchState {
        SearchState {
            tt: TranspositionTable::with_size_mb(tt_mb),
            tables: SearchTables::new(),
        }
    }

    pub fn new_search(&mut self) {
        self.tt.new_search();
    }

    pub fn resize_hash(&mut self, mb: usize) {
        self.tt = TranspositionTable::with_size_mb(mb);
    }

    pub fn clear(&mut self) {
        self.tt.clear();
        self.tables.clear();
    }
}

/// A running background search: the stop flag the UCI thread can flip and
/// the join handle to wait for completion on.
pub struct SearchJob {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl SearchJob {
    pub fn stop_and_wait(self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.handle.join();
    }

    pub fn signal_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// The engine: current position, shared search state, and the job handle
/// for whichever search is currently running (if any).
pub struct Engine {
    board: Board,
    state: Arc<Mutex<SearchState>>,
    job: Option<SearchJob>,
    time_config: time::TimeConfig,
}

impl Engine {
    #[must_use]
    pub fn new() -> Engine {
        Engine {
            board: crate::board::fen::load_fen(crate::board::fen::STARTPOS_FEN)
                .expect("startpos FEN always parses"),
            state: Arc::new(Mutex::new(SearchState::new(DEFAULT_TT_MB))),
            job: None,
            time_config: time::TimeConfig::default(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn set_board(&mut self, board: Board) {
        self.stop_search();
        self.board = board;
    }

    pub fn new_game(&mut self) {
        self.stop_search();
        self.board =
            crate::board::fen::load_fen(crate::board::fen::STARTPOS_FEN).expect("startpos FEN always parses");
        self.state.lock().clear();
    }

    pub fn resize_hash(&mut self, mb: usize) {
        self.stop_search();
        self.state.lock().resize_hash(mb);
    }

    pub fn set_time_config(&mut self, config: time::TimeConfig) {
        self.time_config = config;
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.job.is_some()
    }

    pub fn stop_search(&mut self) {
        if let Some(job) = self.job.take() {
            job.stop_and_wait();
        }
    }

    pub fn signal_stop(&mut self) {
        if let Some(job) = &self.job {
            job.signal_stop();
        }
    }

    /// Start a search in the background. `on_info` fires once per
    /// completed depth, `on_done` once when the search produces its move.
    pub fn start_search<I, D>(&mut self, params: SearchParams, mut on_info: I, on_done: D)
    where
        I: FnMut(InfoLine) + Send + 'static,
        D: FnOnce(Move) + Send + 'static,
    {
        self.stop_search();
        self.state.lock().new_search();

        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);
        let mut board = self.board.clone();
        let state = Arc::clone(&self.state);
        let time_config = self.time_config;

        let handle = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let mut guard = state.lock();
                let SearchState { tt, tables } = &mut *guard;
                let best = run_search(&mut board, tt, tables, &stop_clone, params, time_config, |info| {
                    on_info(info);
                });
                drop(guard);
                on_done(best);
            })
            .expect("failed to spawn search thread");

        self.job = Some(SearchJob { stop, handle });
    }

    /// Block until the current search (if any) reports its move via a
    /// prior `start_search` call; used by `go` without background polling
    /// when the caller wants a synchronous result (e.g. tests, `perft`).
    pub fn wait_for_search(&mut self) {
        if let Some(job) = self.job.take() {
            job.stop_and_wait();
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_starts_at_startpos() {
        let engine = Engine::new();
        assert_eq!(engine.board().hash_key, engine.board().gen_pos_key());
    }

    #[test]
    fn search_produces_a_legal_move() {
        use std::sync::mpsc;

        let mut engine = Engine::new();
        let (tx, rx) = mpsc::channel();
        let params = SearchParams {
            max_depth: Some(2),
            ..Default::default()
        };
        engine.start_search(params, |_| {}, move |mv| {
            let _ = tx.send(mv);
        });
        let mv = rx.recv().unwrap();
        engine.wait_for_search();
        assert!(!mv.is_null());
    }
}
