//! Alpha-beta search: iterative deepening with aspiration windows, PVS,
//! null-move pruning, late-move reductions, futility pruning, quiescence
//! with delta/SEE pruning, and killer/history/PV move ordering, all
//! coordinated through a shared transposition table.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::board::state::Board;
use crate::eval::evaluate;
use crate::see::see;
use crate::transposition_table::{Bound, TranspositionTable, MATE_THRESHOLD, MATE_VALUE};
use crate::types::{Move, MoveList, ScoredMoveList, MAX_PLY, NULL_MOVE};

const INFINITY: i32 = MATE_VALUE + MAX_PLY as i32;
const NULL_MOVE_BASE_REDUCTION: i32 = 3;
const NULL_MOVE_DEEP_REDUCTION: i32 = 4;
const FUTILITY_MARGIN_PER_PLY: i32 = 120;
const ASPIRATION_WINDOW: i32 = 25;
const ASPIRATION_WIDEN_STEP: i32 = 50;
const NODES_PER_TIME_CHECK: u64 = 2048;

/// MVV-LVA: rows are victim kind (pawn..queen, no king), columns attacker
/// kind (pawn..king). Favours capturing the most valuable victim with the
/// least valuable attacker.
const MVV_LVA: [[i32; 6]; 5] = {
    let values = [100, 320, 330, 500, 900, 20_000];
    let mut table = [[0i32; 6]; 5];
    let mut victim = 0;
    while victim < 5 {
        let mut attacker = 0;
        while attacker < 6 {
            table[victim][attacker] = values[victim] * 10 - values[attacker] / 100;
            attacker += 1;
        }
        victim += 1;
    }
    table
};

/// Triangular PV table, killer slots, and the history heuristic: the
/// search-wide state that lives across one `run_search` call (and, for
/// history, decays rather than resets between iterations).
pub struct SearchTables {
    pv_table: Vec<Move>,
    pv_length: [usize; MAX_PLY],
    killers: [[Move; 2]; MAX_PLY],
    history: Vec<i32>,
}

fn pv_index(ply: usize) -> usize {
    (ply * (2 * MAX_PLY + 1 - ply)) / 2
}

impl SearchTables {
    #[must_use]
    pub fn new() -> SearchTables {
        SearchTables {
            pv_table: vec![NULL_MOVE; (MAX_PLY * MAX_PLY + MAX_PLY) / 2],
            pv_length: [0; MAX_PLY],
            killers: [[NULL_MOVE; 2]; MAX_PLY],
            history: vec![0; 64 * 64 * 2],
        }
    }

    pub fn clear(&mut self) {
        self.pv_table.iter_mut().for_each(|m| *m = NULL_MOVE);
        self.pv_length = [0; MAX_PLY];
        self.killers = [[NULL_MOVE; 2]; MAX_PLY];
        self.history.iter_mut().for_each(|h| *h = 0);
    }

    fn decay_history(&mut self) {
        self.history.iter_mut().for_each(|h| *h /= 2);
    }

    fn history_index(from: usize, to: usize, side: usize) -> usize {
        (from * 64 + to) * 2 + side
    }

    fn history_score(&self, from: usize, to: usize, side: usize) -> i32 {
        self.history[Self::history_index(from, to, side)]
    }

    fn bump_history(&mut self, from: usize, to: usize, side: usize, depth: i32) {
        let idx = Self::history_index(from, to, side);
        self.history[idx] += depth * depth;
    }

    fn update_pv(&mut self, ply: usize, mv: Move) {
        let base = pv_index(ply);
        self.pv_table[base] = mv;
        if ply + 1 < MAX_PLY {
            let child_base = pv_index(ply + 1);
            let child_len = self.pv_length[ply + 1];
            for i in 0..child_len {
                self.pv_table[base + 1 + i] = self.pv_table[child_base + i];
            }
            self.pv_length[ply] = child_len + 1;
        } else {
            self.pv_length[ply] = 1;
        }
    }

    #[must_use]
    pub fn principal_variation(&self) -> &[Move] {
        &self.pv_table[pv_index(0)..pv_index(0) + self.pv_length[0]]
    }

    fn set_killer(&mut self, ply: usize, mv: Move) {
        if self.killers[ply][0] != mv {
            self.killers[ply][1] = self.killers[ply][0];
            self.killers[ply][0] = mv;
        }
    }
}

impl Default for SearchTables {
    fn default() -> Self {
        SearchTables::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchParams {
    pub max_depth: Option<u32>,
    pub max_nodes: Option<u64>,
    pub move_time_ms: Option<u64>,
    pub infinite: bool,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub depth_reached: u32,
}

pub struct InfoLine<'a> {
    pub depth: u32,
    pub nodes: u64,
    pub time_ms: u64,
    pub score_cp: Option<i32>,
    pub score_mate: Option<i32>,
    pub pv: &'a [Move],
}

struct SearchContext<'a> {
    tt: &'a mut TranspositionTable,
    tables: &'a mut SearchTables,
    stop: &'a AtomicBool,
    start: Instant,
    hard_deadline: Option<Instant>,
    nodes: u64,
    max_nodes: Option<u64>,
    stopped: bool,
}

impl SearchContext<'_> {
    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if self.stop.load(Ordering::Relaxed) {
            self.stopped = true;
            return true;
        }
        if let Some(max_nodes) = self.max_nodes {
            if self.nodes >= max_nodes {
                self.stopped = true;
                return true;
            }
        }
        if self.nodes % NODES_PER_TIME_CHECK == 0 {
            if let Some(deadline) = self.hard_deadline {
                if Instant::now() >= deadline {
                    self.stopped = true;
                    return true;
                }
            }
        }
        false
    }
}

fn score_move(
    board: &Board,
    mv: Move,
    ply: usize,
    tables: &SearchTables,
    hash_move: Option<Move>,
    prev_pv_move: Option<Move>,
) -> i32 {
    if Some(mv) == prev_pv_move {
        return 1000;
    }
    if Some(mv) == hash_move {
        return 900;
    }
    if mv.is_capture() {
        let victim_kind = board.piece_at(mv.to()).map(|p| p.kind()).unwrap_or(0);
        let attacker_kind = board.piece_at(mv.from()).map(|p| p.kind()).unwrap_or(0);
        return 800 + MVV_LVA[victim_kind][attacker_kind];
    }
    if mv.is_promotion() {
        return 800;
    }
    if mv == tables.killers[ply][0] {
        return 700;
    }
    if mv == tables.killers[ply][1] {
        return 600;
    }
    let side = board.side_to_move.index();
    tables.history_score(mv.from().index(), mv.to().index(), side)
}

fn order_into(
    board: &Board,
    list: &MoveList,
    ply: usize,
    tables: &SearchTables,
    hash_move: Option<Move>,
    prev_pv_move: Option<Move>,
    scored: &mut ScoredMoveList,
) {
    scored.clear();
    for &mv in list.as_slice() {
        let s = score_move(board, mv, ply, tables, hash_move, prev_pv_move);
        scored.push(mv, s);
    }
}

fn has_non_pawn_material(board: &Board) -> bool {
    use crate::types::Piece;
    let side = board.side_to_move;
    !(board.piece_bb(Piece::new(1, side))
        | board.piece_bb(Piece::new(2, side))
        | board.piece_bb(Piece::new(3, side))
        | board.piece_bb(Piece::new(4, side)))
    .is_empty()
}

fn quiescence(board: &mut Board, mut alpha: i32, beta: i32, ply: usize, ctx: &mut SearchContext) -> i32 {
    ctx.nodes += 1;
    if ctx.should_stop() {
        return 0;
    }
    let stand_pat = evaluate(board);
    if stand_pat >= beta {
        return stand_pat;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }
    if ply >= MAX_PLY - 1 {
        return stand_pat;
    }

    let mut list = MoveList::new();
    if board.is_in_check {
        crate::movegen::generate_all(board, &mut list);
    } else {
        crate::movegen::generate_captures(board, &mut list);
    }

    let mut scored = ScoredMoveList::new();
    order_into(board, &list, ply, ctx.tables, None, None, &mut scored);

    let mut best = stand_pat;
    for i in 0..scored.len() {
        let mv = scored.pick_best(i).mv;

        if !board.is_in_check && mv.is_capture() {
            let delta_margin = if mv.is_promotion() { 775 } else { 975 };
            if stand_pat + delta_margin < alpha {
                continue;
            }
            if see(board, mv) < 0 {
                continue;
            }
        }

        let undo = board.make_move(mv);
        let score = -quiescence(board, -beta, -alpha, ply + 1, ctx);
        board.unmake_last_move(undo);

        if ctx.stopped {
            return best;
        }
        if score > best {
            best = score;
        }
        if score >= beta {
            return score;
        }
        if score > alpha {
            alpha = score;
        }
    }
    best
}

#[allow(clippy::too_many_arguments)]
fn search(
    board: &mut Board,
    mut depth: i32,
    ply: usize,
    mut alpha: i32,
    beta: i32,
    pv_node: bool,
    null_allowed: bool,
    ctx: &mut SearchContext,
) -> i32 {
    if ply >= MAX_PLY - 1 {
        return evaluate(board);
    }
    ctx.tables.pv_length[ply] = 0;

    if board.is_in_check {
        depth += 1;
    }
    if depth <= 0 {
        return quiescence(board, alpha, beta, ply, ctx);
    }

    ctx.nodes += 1;
    if ctx.should_stop() {
        return 0;
    }

    if ply > 0 && board.is_draw() {
        return 0;
    }

    let hash_move = ctx.tt.hash_move(board.hash_key);
    if let Some(entry) = ctx.tt.probe(board.hash_key, depth as i16, ply as i32) {
        if !pv_node {
            match entry.bound {
                Bound::Exact => return entry.score,
                Bound::Lower if entry.score >= beta => return entry.score,
                Bound::Upper if entry.score < alpha => return entry.score,
                _ => {}
            }
        } else if entry.bound == Bound::Exact {
            return entry.score;
        }
    }

    let mut list = MoveList::new();
    crate::movegen::generate_all(board, &mut list);

    if list.is_empty() {
        return if board.is_in_check {
            -MATE_VALUE + ply as i32
        } else {
            0
        };
    }

    let static_eval = evaluate(board);

    if !board.is_in_check
        && !pv_node
        && null_allowed
        && depth > 2
        && has_non_pawn_material(board)
        && static_eval >= beta
    {
        let reduction = if depth > 6 {
            NULL_MOVE_DEEP_REDUCTION
        } else {
            NULL_MOVE_BASE_REDUCTION
        };
        let undo = board.make_null_move();
        let score = -search(board, depth - 1 - reduction, ply + 1, -beta, -beta + 1, false, false, ctx);
        board.unmake_last_move(undo);
        if ctx.stopped {
            return 0;
        }
        if score >= beta {
            return score;
        }
    }

    let futile = !board.is_in_check
        && !pv_node
        && depth <= 3
        && static_eval + FUTILITY_MARGIN_PER_PLY * depth * depth <= alpha;

    let mut scored = ScoredMoveList::new();
    order_into(board, &list, ply, ctx.tables, hash_move, None, &mut scored);

    let mut best_score = -INFINITY;
    let mut best_move = NULL_MOVE;
    let mut moves_searched = 0i32;
    let mut alpha_raised = false;

    for i in 0..scored.len() {
        let mv = scored.pick_best(i).mv;
        let is_quiet = !mv.is_capture() && !mv.is_promotion();

        if futile && is_quiet && moves_searched > 0 {
            moves_searched += 1;
            continue;
        }

        let undo = board.make_move(mv);
        let gives_check = board.is_in_check;

        let mut reduction = 0;
        if !pv_node && depth > 3 && moves_searched > 3 && is_quiet && !gives_check {
            reduction = if moves_searched > 8 { 4 } else { 3 };
        }

        let score = if moves_searched == 0 {
            -search(board, depth - 1, ply + 1, -beta, -alpha, pv_node, true, ctx)
        } else {
            let reduced_depth = (depth - 1 - reduction).max(0);
            let mut s = -search(board, reduced_depth, ply + 1, -alpha - 1, -alpha, false, true, ctx);
            if s > alpha && (reduction > 0 || pv_node) {
                s = -search(board, depth - 1, ply + 1, -beta, -alpha, pv_node, true, ctx);
            }
            s
        };

        board.unmake_last_move(undo);
        moves_searched += 1;

        if ctx.stopped {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = mv;
        }
        if score > alpha {
            alpha = score;
            alpha_raised = true;
            ctx.tables.update_pv(ply, mv);
        }
        if score >= beta {
            if is_quiet {
                ctx.tables.set_killer(ply, mv);
                ctx.tables
                    .bump_history(mv.from().index(), mv.to().index(), board.side_to_move.index(), depth);
            }
            ctx.tt.store(board.hash_key, mv, depth as i16, ply as i32, score, Bound::Lower);
            return score;
        }
    }

    let bound = if alpha_raised { Bound::Exact } else { Bound::Upper };
    ctx.tt.store(board.hash_key, best_move, depth as i16, ply as i32, best_score, bound);
    best_score
}

fn search_root(board: &mut Board, depth: i32, mut alpha: i32, beta: i32, prev_pv_move: Option<Move>, ctx: &mut SearchContext) -> (i32, Move) {
    ctx.tables.pv_length[0] = 0;
    let mut list = MoveList::new();
    crate::movegen::generate_all(board, &mut list);
    if list.is_empty() {
        return (0, NULL_MOVE);
    }

    let hash_move = ctx.tt.hash_move(board.hash_key);
    let mut scored = ScoredMoveList::new();
    order_into(board, &list, 0, ctx.tables, hash_move, prev_pv_move, &mut scored);

    let mut best_move = scored.pick_best(0).mv;
    let mut best_score = -INFINITY;
    let mut moves_searched = 0;

    for i in 0..scored.len() {
        let mv = if i == 0 { best_move } else { scored.pick_best(i).mv };
        let undo = board.make_move(mv);
        let score = if moves_searched == 0 {
            -search(board, depth - 1, 1, -beta, -alpha, true, true, ctx)
        } else {
            let mut s = -search(board, depth - 1, 1, -alpha - 1, -alpha, false, true, ctx);
            if s > alpha {
                s = -search(board, depth - 1, 1, -beta, -alpha, true, true, ctx);
            }
            s
        };
        board.unmake_last_move(undo);
        moves_searched += 1;

        if ctx.stopped {
            break;
        }
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
        if score > alpha {
            alpha = score;
            ctx.tables.update_pv(0, mv);
        }
    }

    let bound = if best_score <= alpha { Bound::Upper } else { Bound::Exact };
    ctx.tt.store(board.hash_key, best_move, depth as i16, 0, best_score, bound);
    (best_score, best_move)
}

/// Iterative deepening driver. Calls `on_info` once per completed depth
/// and returns the final best move (falling back to the first legal root
/// move if the search never completes a depth).
pub fn run_search(
    board: &mut Board,
    tt: &mut TranspositionTable,
    tables: &mut SearchTables,
    stop: &AtomicBool,
    params: SearchParams,
    time_config: crate::engine::time::TimeConfig,
    mut on_info: impl FnMut(InfoLine),
) -> Move {
    let start = Instant::now();
    tables.pv_length = [0; MAX_PLY];
    tables.decay_history();

    let control = if let Some(ms) = params.move_time_ms {
        crate::engine::time::TimeControl::MoveTime { time_ms: ms }
    } else if params.infinite || (params.max_depth.is_some() && params.wtime_ms.is_none()) {
        if params.infinite {
            crate::engine::time::TimeControl::Infinite
        } else {
            crate::engine::time::TimeControl::Depth(params.max_depth.unwrap())
        }
    } else if let Some(nodes) = params.max_nodes {
        crate::engine::time::TimeControl::Nodes(nodes)
    } else {
        let time_left = match board.side_to_move {
            crate::types::Color::White => params.wtime_ms,
            crate::types::Color::Black => params.btime_ms,
        };
        let inc = match board.side_to_move {
            crate::types::Color::White => params.winc_ms.unwrap_or(0),
            crate::types::Color::Black => params.binc_ms.unwrap_or(0),
        };
        match time_left {
            Some(time_left_ms) => crate::engine::time::TimeControl::Incremental {
                time_left_ms,
                inc_ms: inc,
                movestogo: params.movestogo,
            },
            None => crate::engine::time::TimeControl::Infinite,
        }
    };

    let budget_ms = crate::engine::time::move_time_budget_ms(control, time_config);
    let hard_deadline = budget_ms.map(|ms| start + crate::engine::time::hard_limit(ms, time_config));

    let mut fallback_move = {
        let mut list = MoveList::new();
        crate::movegen::generate_all(board, &mut list);
        if list.is_empty() {
            return NULL_MOVE;
        }
        list[0]
    };

    let max_depth = params.max_depth.unwrap_or(MAX_PLY as u32 - 1);
    let mut window = ASPIRATION_WINDOW;
    let mut alpha = -INFINITY;
    let mut beta = INFINITY;
    let mut prev_pv_move: Option<Move> = None;
    let mut best_move = fallback_move;
    let mut last_score = 0;

    let mut ctx = SearchContext {
        tt,
        tables,
        stop,
        start,
        hard_deadline,
        nodes: 0,
        max_nodes: params.max_nodes,
        stopped: false,
    };

    let mut depth = 1i32;
    while depth as u32 <= max_depth {
        let mut fail_count = 0;
        let (score, mv) = loop {
            let (s, m) = search_root(board, depth, alpha, beta, prev_pv_move, &mut ctx);
            if ctx.stopped {
                break (s, m);
            }
            if s <= alpha {
                fail_count += 1;
                alpha = (alpha - ASPIRATION_WIDEN_STEP * fail_count).max(-INFINITY);
                continue;
            }
            if s >= beta {
                fail_count += 1;
                beta = (beta + ASPIRATION_WIDEN_STEP * fail_count).min(INFINITY);
                continue;
            }
            break (s, m);
        };

        if ctx.stopped && depth > 1 {
            break;
        }

        last_score = score;
        if !mv.is_null() {
            best_move = mv;
            fallback_move = mv;
        }
        prev_pv_move = Some(best_move);
        window = ASPIRATION_WINDOW;
        alpha = score - window;
        beta = score + window;

        let pv = ctx.tables.principal_variation();
        let elapsed_ms = start.elapsed().as_millis() as u64;
        let (score_cp, score_mate) = if score.abs() >= MATE_THRESHOLD {
            let plies_to_mate = MATE_VALUE - score.abs();
            let moves_to_mate = (plies_to_mate + 1) / 2;
            (None, Some(if score > 0 { moves_to_mate } else { -moves_to_mate }))
        } else {
            (Some(score), None)
        };
        on_info(InfoLine {
            depth: depth as u32,
            nodes: ctx.nodes,
            time_ms: elapsed_ms,
            score_cp,
            score_mate,
            pv,
        });

        if ctx.stopped {
            break;
        }
        depth += 1;
    }

    let _ = last_score;
    best_move
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::load_fen;

    #[test]
    fn finds_mate_in_one() {
        let mut board = load_fen("4k3/8/4K3/8/8/8/8/6R1 w - - 0 1").unwrap();
        let mut tt = TranspositionTable::with_size_mb(1);
        let mut tables = SearchTables::new();
        let stop = AtomicBool::new(false);
        let params = SearchParams {
            max_depth: Some(3),
            ..Default::default()
        };
        let mv = run_search(&mut board, &mut tt, &mut tables, &stop, params, crate::engine::time::TimeConfig::default(), |_| {});
        assert_eq!(mv.from(), crate::types::Square::new(0, 6));
        assert_eq!(mv.to(), crate::types::Square::new(7, 6));
    }

    #[test]
    fn stalemate_node_scores_zero_via_quiescence_path() {
        let mut board = load_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let mut tt = TranspositionTable::with_size_mb(1);
        let mut tables = SearchTables::new();
        let stop = AtomicBool::new(false);
        let mut ctx = SearchContext {
            tt: &mut tt,
            tables: &mut tables,
            stop: &stop,
            start: Instant::now(),
            hard_deadline: None,
            nodes: 0,
            max_nodes: None,
            stopped: false,
        };
        let score = search(&mut board, 1, 0, -INFINITY, INFINITY, true, true, &mut ctx);
        assert_eq!(score, 0);
    }
}
