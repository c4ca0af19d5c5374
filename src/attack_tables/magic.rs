//! Plain magic bitboards for rook and bishop attacks.
//!
//! For each square a *movement mask* strips the board edges, a *magic*
//! multiplier and *shift* map every subset of that mask to a unique index
//! `(v * magic) >> (64 - shift)`, and a dense per-square table holds the
//! attack bitboard for each subset (computed once by ray-casting through
//! that subset as occupancy).
//!
//! The magics themselves are found once at startup by randomized search
//! (the standard technique — see e.g. the `find_magics` approach also
//! used elsewhere in this corpus) rather than hand-transcribed, seeded
//! deterministically so the same numbers are rediscovered on every run.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::fills::{occ_fill, sliding_attacks, Direction};
use crate::types::{Bitboard, Square, FILE_A, FILE_H, RANK_1, RANK_8};

const MAGIC_SEARCH_SEED: u64 = 0x6D61_6769_635F_7365;

/// Board-edge-stripped movement mask: squares beyond the mask can never
/// block an attack, so they don't need to be part of the hashed subset.
/// Orthogonal rays only lose the edge in their own axis — a rook on the
/// a-file still needs its full vertical mask — while diagonal rays lose
/// the whole border, since they leave their starting file or rank after
/// a single step.
fn rook_mask(sq: Square) -> Bitboard {
    let from = Bitboard::from_square(sq);
    let rank_open = !(RANK_1 | RANK_8);
    let file_open = !(FILE_A | FILE_H);
    let mask = occ_fill(from, rank_open, Direction::North)
        | occ_fill(from, rank_open, Direction::South)
        | occ_fill(from, file_open, Direction::East)
        | occ_fill(from, file_open, Direction::West);
    mask & !from
}

fn bishop_mask(sq: Square) -> Bitboard {
    let from = Bitboard::from_square(sq);
    let open = !(FILE_A | FILE_H | RANK_1 | RANK_8);
    let mask = super::fills::DIAGONAL
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | occ_fill(from, open, dir));
    mask & !from
}

fn rook_attacks_slow(sq: Square, occupied: Bitboard) -> Bitboard {
    let from = Bitboard::from_square(sq);
    super::fills::ORTHOGONAL
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | sliding_attacks(from, occupied, dir))
}

fn bishop_attacks_slow(sq: Square, occupied: Bitboard) -> Bitboard {
    let from = Bitboard::from_square(sq);
    super::fills::DIAGONAL
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | sliding_attacks(from, occupied, dir))
}

/// Enumerate every subset of `mask` via the carry-rippler trick.
fn subsets(mask: Bitboard) -> Vec<Bitboard> {
    let mut out = Vec::with_capacity(1 << mask.popcount());
    let mut subset = 0u64;
    loop {
        out.push(Bitboard(subset));
        subset = subset.wrapping_sub(mask.0) & mask.0;
        if subset == 0 {
            break;
        }
    }
    out
}

struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    table: Vec<Bitboard>,
}

impl MagicEntry {
    #[inline]
    fn index(&self, occupied: Bitboard) -> usize {
        let blockers = (occupied & self.mask).0;
        ((blockers.wrapping_mul(self.magic)) >> (64 - self.shift)) as usize
    }

    #[inline]
    fn attacks(&self, occupied: Bitboard) -> Bitboard {
        self.table[self.index(occupied)]
    }
}

fn find_magic(
    sq: Square,
    mask: Bitboard,
    slow_attacks: impl Fn(Square, Bitboard) -> Bitboard,
    rng: &mut StdRng,
) -> MagicEntry {
    let shift = mask.popcount();
    let blocker_sets = subsets(mask);
    let reference: Vec<Bitboard> = blocker_sets.iter().map(|&b| slow_attacks(sq, b)).collect();

    loop {
        // Sparse candidates (AND of a few random draws) find magics faster.
        let magic = rng.next_u64() & rng.next_u64() & rng.next_u64();
        if (mask.0.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        let mut table = vec![None; 1usize << shift];
        let mut ok = true;
        for (blockers, &attacks) in blocker_sets.iter().zip(reference.iter()) {
            let idx = ((blockers.0.wrapping_mul(magic)) >> (64 - shift)) as usize;
            match table[idx] {
                None => table[idx] = Some(attacks),
                Some(existing) if existing == attacks => {}
                Some(_) => {
                    ok = false;
                    break;
                }
            }
        }
        if !ok {
            continue;
        }

        return MagicEntry {
            mask,
            magic,
            shift,
            table: table.into_iter().map(|o| o.unwrap_or(Bitboard::EMPTY)).collect(),
        };
    }
}

pub struct MagicTables {
    rook: Vec<MagicEntry>,
    bishop: Vec<MagicEntry>,
}

fn build_magic_tables() -> MagicTables {
    let mut rng = StdRng::seed_from_u64(MAGIC_SEARCH_SEED);
    let mut rook = Vec::with_capacity(64);
    let mut bishop = Vec::with_capacity(64);
    for i in 0..64u8 {
        let sq = Square(i);
        rook.push(find_magic(sq, rook_mask(sq), rook_attacks_slow, &mut rng));
        bishop.push(find_magic(sq, bishop_mask(sq), bishop_attacks_slow, &mut rng));
    }
    MagicTables { rook, bishop }
}

pub static MAGICS: once_cell::sync::Lazy<MagicTables> = once_cell::sync::Lazy::new(build_magic_tables);

#[inline]
#[must_use]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    MAGICS.rook[sq.index()].attacks(occupied)
}

#[inline]
#[must_use]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    MAGICS.bishop[sq.index()].attacks(occupied)
}

#[inline]
#[must_use]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// X-ray attacks: the rook's attack set extended through the first
/// blocker, used by static exchange evaluation to reveal attackers
/// behind the piece that just captured.
#[must_use]
pub fn xray_rook(sq: Square, occupied: Bitboard) -> Bitboard {
    let attacks = rook_attacks(sq, occupied);
    attacks ^ rook_attacks(sq, occupied ^ (occupied & attacks))
}

#[must_use]
pub fn xray_bishop(sq: Square, occupied: Bitboard) -> Bitboard {
    let attacks = bishop_attacks(sq, occupied);
    attacks ^ bishop_attacks(sq, occupied ^ (occupied & attacks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_attacks_match_slow_rays_on_sample_occupancies() {
        for &sq_idx in &[0u8, 27, 63, 35] {
            let sq = Square(sq_idx);
            for occ_bits in [0u64, 0x0000_1000_0010_0000, 0xFFFF_FFFF_FFFF_FFFF] {
                let occ = Bitboard(occ_bits);
                assert_eq!(rook_attacks(sq, occ), rook_attacks_slow(sq, occ));
            }
        }
    }

    #[test]
    fn bishop_attacks_match_slow_rays_on_sample_occupancies() {
        for &sq_idx in &[0u8, 27, 63, 18] {
            let sq = Square(sq_idx);
            for occ_bits in [0u64, 0x0000_1000_0010_0000, 0xFFFF_FFFF_FFFF_FFFF] {
                let occ = Bitboard(occ_bits);
                assert_eq!(bishop_attacks(sq, occ), bishop_attacks_slow(sq, occ));
            }
        }
    }

    #[test]
    fn queen_is_rook_union_bishop() {
        let sq = Square::new(3, 3);
        let occ = Bitboard(0x0010_0000_0800_0000);
        assert_eq!(queen_attacks(sq, occ), rook_attacks(sq, occ) | bishop_attacks(sq, occ));
    }
}
