//! Shared transposition table: a power-of-two direct-mapped array of
//! depth-preferred entries, with mate scores stored ply-adjusted so a
//! mate found at one depth reads back correctly at another.

use crate::types::{Move, NULL_MOVE};

pub const MIN_TT_SIZE_MB: usize = 1;
pub const MAX_TT_SIZE_MB: usize = 1024;
pub const DEFAULT_TT_MB: usize = 64;

/// Scores at or beyond this magnitude are mate scores and need ply
/// adjustment on store/retrieve.
pub const MATE_THRESHOLD: i32 = 900_000;
pub const MATE_VALUE: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
#[repr(align(64))]
pub struct TtEntry {
    pub key: u64,
    pub hash_move: Move,
    pub depth: i16,
    pub age: u16,
    pub score: i32,
    pub bound: Bound,
    occupied: bool,
}

impl Default for TtEntry {
    fn default() -> Self {
        TtEntry {
            key: 0,
            hash_move: NULL_MOVE,
            depth: -1,
            age: 0,
            score: 0,
            bound: Bound::Exact,
            occupied: false,
        }
    }
}

fn mate_score_to_tt(score: i32, ply: i32) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply
    } else if score <= -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

fn mate_score_from_tt(score: i32, ply: i32) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply
    } else if score <= -MATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}

pub struct TranspositionTable {
    entries: Vec<TtEntry>,
    mask: u64,
    age: u16,
}

fn round_down_to_power_of_two(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    1usize << (usize::BITS - 1 - n.leading_zeros())
}

impl TranspositionTable {
    #[must_use]
    pub fn with_size_mb(size_mb: usize) -> TranspositionTable {
        let clamped = size_mb.clamp(MIN_TT_SIZE_MB, MAX_TT_SIZE_MB);
        let bytes = clamped * 1024 * 1024;
        let entry_count = round_down_to_power_of_two((bytes / std::mem::size_of::<TtEntry>()).max(1));
        TranspositionTable {
            entries: vec![TtEntry::default(); entry_count],
            mask: (entry_count - 1) as u64,
            age: 0,
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key & self.mask) as usize
    }

    #[must_use]
    pub fn probe(&self, key: u64, depth: i16, ply: i32) -> Option<TtEntry> {
        let entry = &self.entries[self.index(key)];
        if entry.occupied && entry.key == key && entry.depth >= depth {
            let mut out = *entry;
            out.score = mate_score_from_tt(out.score, ply);
            Some(out)
        } else {
            None
        }
    }

    /// Returns the stored hash move for ordering even when depth is too
    /// shallow to trust the score.
    #[must_use]
    pub fn hash_move(&self, key: u64) -> Option<Move> {
        let entry = &self.entries[self.index(key)];
        if entry.occupied && entry.key == key && !entry.hash_move.is_null() {
            Some(entry.hash_move)
        } else {
            None
        }
    }

    pub fn store(&mut self, key: u64, hash_move: Move, depth: i16, ply: i32, score: i32, bound: Bound) {
        let idx = self.index(key);
        let slot = &mut self.entries[idx];
        let replace = !slot.occupied || slot.age != self.age || slot.depth <= depth;
        if replace {
            *slot = TtEntry {
                key,
                hash_move,
                depth,
                age: self.age,
                score: mate_score_to_tt(score, ply),
                bound,
                occupied: true,
            };
        }
    }

    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            *entry = TtEntry::default();
        }
        self.age = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
