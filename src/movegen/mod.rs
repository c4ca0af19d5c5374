//! Single-pass legal move generation ("direction golem"): one bottom-up
//! computation produces the enemy attack union, the pin corridors along
//! each of the four line families, and the checking pieces, then every
//! piece type emits moves already filtered to be fully legal. Callers
//! never need to re-verify king safety.

use crate::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks, Direction, LINE_FILLS,
};
use crate::board::state::Board;
use crate::types::{
    Bitboard, Color, Move, MoveList, Piece, Square, BISHOP_PROMO, BISHOP_PROMO_CAPTURE, CAPTURE, DOUBLE_PUSH,
    EP_CAPTURE, KING_CASTLE, KNIGHT_PROMO, KNIGHT_PROMO_CAPTURE, NO_SQUARE, QUEEN_CASTLE, QUEEN_PROMO,
    QUEEN_PROMO_CAPTURE, QUIET, ROOK_PROMO, ROOK_PROMO_CAPTURE, BKING_SIDE, BQUEEN_SIDE, WKING_SIDE, WQUEEN_SIDE,
};

/// Fill every square a `by_color` piece attacks on the real board. Used to
/// test "is a single square attacked", e.g. for `is_in_check`.
#[must_use]
pub fn square_attacked_by(board: &Board, sq: Square, by_color: Color) -> bool {
    let occ = board.occupied();
    if !(knight_attacks(sq) & board.piece_bb(Piece::new(1, by_color))).is_empty() {
        return true;
    }
    if !(king_attacks(sq) & board.piece_bb(Piece::new(5, by_color))).is_empty() {
        return true;
    }
    // Reversal trick: squares a `by_color` pawn would attack FROM are the
    // same set as where a pawn of the opposite colour sitting on `sq`
    // would attack TO, by diagonal symmetry.
    if !(pawn_attacks(sq, by_color.opponent()) & board.piece_bb(Piece::new(0, by_color))).is_empty() {
        return true;
    }
    let rooks_queens = board.piece_bb(Piece::new(3, by_color)) | board.piece_bb(Piece::new(4, by_color));
    if !(rook_attacks(sq, occ) & rooks_queens).is_empty() {
        return true;
    }
    let bishops_queens = board.piece_bb(Piece::new(2, by_color)) | board.piece_bb(Piece::new(4, by_color));
    if !(bishop_attacks(sq, occ) & bishops_queens).is_empty() {
        return true;
    }
    false
}

#[must_use]
pub fn king_in_check(board: &Board, color: Color) -> bool {
    square_attacked_by(board, board.king_square(color), color.opponent())
}

fn enemy_attack_union(board: &Board, by_color: Color, occ_without_king: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for sq in board.piece_bb(Piece::new(1, by_color)).iter() {
        attacks |= knight_attacks(sq);
    }
    attacks |= king_attacks(board.king_square(by_color));
    for sq in board.piece_bb(Piece::new(0, by_color)).iter() {
        attacks |= pawn_attacks(sq, by_color);
    }
    let rooks_queens = board.piece_bb(Piece::new(3, by_color)) | board.piece_bb(Piece::new(4, by_color));
    for sq in rooks_queens.iter() {
        attacks |= rook_attacks(sq, occ_without_king);
    }
    let bishops_queens = board.piece_bb(Piece::new(2, by_color)) | board.piece_bb(Piece::new(4, by_color));
    for sq in bishops_queens.iter() {
        attacks |= bishop_attacks(sq, occ_without_king);
    }
    attacks
}

/// Squares strictly between `king_sq` and an aligned slider `checker_sq`,
/// excluding both endpoints. Only sliders can be aligned; a knight or pawn
/// checker yields an empty set (no blocking square exists).
fn between(king_sq: Square, checker_sq: Square) -> Bitboard {
    let dir = if king_sq.rank() == checker_sq.rank() {
        if checker_sq.file() > king_sq.file() {
            Direction::East
        } else {
            Direction::West
        }
    } else if king_sq.file() == checker_sq.file() {
        if checker_sq.rank() > king_sq.rank() {
            Direction::North
        } else {
            Direction::South
        }
    } else if (king_sq.rank() as i32 - checker_sq.rank() as i32) == (king_sq.file() as i32 - checker_sq.file() as i32) {
        if checker_sq.rank() > king_sq.rank() {
            Direction::NorthEast
        } else {
            Direction::SouthWest
        }
    } else if (king_sq.rank() as i32 + king_sq.file() as i32) == (checker_sq.rank() as i32 + checker_sq.file() as i32) {
        if checker_sq.rank() > king_sq.rank() {
            Direction::NorthWest
        } else {
            Direction::SouthEast
        }
    } else {
        return Bitboard::EMPTY;
    };
    let king_bb = Bitboard::from_square(king_sq);
    let checker_bb = Bitboard::from_square(checker_sq);
    let ray = crate::attack_tables::fills::sliding_attacks(king_bb, checker_bb, dir);
    ray & !checker_bb
}

/// Four named line families used as pin corridors, each a pair of
/// opposite `Direction`s plus the enemy slider kind that pins along them.
struct PinFamily {
    d1: Direction,
    d2: Direction,
    line_fills: fn(Square) -> Bitboard,
}

fn horizontal_line(sq: Square) -> Bitboard {
    LINE_FILLS.horizontal[sq.index()]
}
fn vertical_line(sq: Square) -> Bitboard {
    LINE_FILLS.vertical[sq.index()]
}
fn diagonal_line(sq: Square) -> Bitboard {
    LINE_FILLS.diagonal[sq.index()]
}
fn anti_diagonal_line(sq: Square) -> Bitboard {
    LINE_FILLS.anti_diagonal[sq.index()]
}

struct PinInfo {
    pinned: Bitboard,
    pin_ray: [Bitboard; 64],
}

fn compute_pins(board: &Board, us: Color, them: Color, king_sq: Square, occ: Bitboard) -> PinInfo {
    let king_bb = Bitboard::from_square(king_sq);
    let occ_without_king = occ & !king_bb;
    let rooks_queens = board.piece_bb(Piece::new(3, them)) | board.piece_bb(Piece::new(4, them));
    let bishops_queens = board.piece_bb(Piece::new(2, them)) | board.piece_bb(Piece::new(4, them));

    let families = [
        (
            PinFamily {
                d1: Direction::East,
                d2: Direction::West,
                line_fills: horizontal_line,
            },
            rooks_queens,
        ),
        (
            PinFamily {
                d1: Direction::North,
                d2: Direction::South,
                line_fills: vertical_line,
            },
            rooks_queens,
        ),
        (
            PinFamily {
                d1: Direction::NorthEast,
                d2: Direction::SouthWest,
                line_fills: diagonal_line,
            },
            bishops_queens,
        ),
        (
            PinFamily {
                d1: Direction::NorthWest,
                d2: Direction::SouthEast,
                line_fills: anti_diagonal_line,
            },
            bishops_queens,
        ),
    ];

    let mut pinned = Bitboard::EMPTY;
    let mut pin_ray = [Bitboard::EMPTY; 64];
    for (family, enemy_sliders) in families {
        let king_ray = crate::attack_tables::fills::sliding_attacks(king_bb, occ, family.d1)
            | crate::attack_tables::fills::sliding_attacks(king_bb, occ, family.d2);
        let enemy_ray = crate::attack_tables::fills::sliding_attacks(enemy_sliders, occ_without_king, family.d1)
            | crate::attack_tables::fills::sliding_attacks(enemy_sliders, occ_without_king, family.d2);
        let in_between = king_ray & enemy_ray & board.color_occupied(us);
        for sq in in_between.iter() {
            pinned |= Bitboard::from_square(sq);
            pin_ray[sq.index()] = (family.line_fills)(king_sq);
        }
    }
    PinInfo { pinned, pin_ray }
}

fn compute_checkers(board: &Board, us: Color, them: Color, king_sq: Square, occ: Bitboard) -> Bitboard {
    let rooks_queens = board.piece_bb(Piece::new(3, them)) | board.piece_bb(Piece::new(4, them));
    let bishops_queens = board.piece_bb(Piece::new(2, them)) | board.piece_bb(Piece::new(4, them));
    (rook_attacks(king_sq, occ) & rooks_queens)
        | (bishop_attacks(king_sq, occ) & bishops_queens)
        | (knight_attacks(king_sq) & board.piece_bb(Piece::new(1, them)))
        | (pawn_attacks(king_sq, us) & board.piece_bb(Piece::new(0, them)))
}

fn push_promotions(out: &mut MoveList, from: Square, to: Square, capture: bool) {
    let codes: [u16; 4] = if capture {
        [
            KNIGHT_PROMO_CAPTURE,
            BISHOP_PROMO_CAPTURE,
            ROOK_PROMO_CAPTURE,
            QUEEN_PROMO_CAPTURE,
        ]
    } else {
        [KNIGHT_PROMO, BISHOP_PROMO, ROOK_PROMO, QUEEN_PROMO]
    };
    for code in codes {
        out.push(Move::encode(from, to, code));
    }
}

fn generate<const CAPTURES_ONLY: bool>(board: &Board, out: &mut MoveList) {
    out.clear();
    let us = board.side_to_move;
    let them = us.opponent();
    let own = board.color_occupied(us);
    let enemy = board.color_occupied(them);
    let occ = board.occupied();
    let king_sq = board.king_square(us);
    let king_bb = Bitboard::from_square(king_sq);
    let occ_without_king = occ & !king_bb;

    let enemy_attacks = enemy_attack_union(board, them, occ_without_king);
    let pins = compute_pins(board, us, them, king_sq, occ);
    let checkers = compute_checkers(board, us, them, king_sq, occ);
    let num_checkers = checkers.popcount();
    let in_check = num_checkers > 0;
    let dbl_check = num_checkers >= 2;

    let block_squares = if num_checkers == 1 {
        between(king_sq, checkers.lsb())
    } else {
        Bitboard::EMPTY
    };
    let check_resolution = checkers | block_squares;

    let mut target_mask = if dbl_check {
        Bitboard::EMPTY
    } else if in_check {
        check_resolution & !own
    } else {
        !own
    };
    if CAPTURES_ONLY {
        target_mask &= enemy;
    }

    // King moves: always legal to consider, even in double check.
    let mut king_dest = king_attacks(king_sq) & !own & !enemy_attacks;
    if CAPTURES_ONLY {
        king_dest &= enemy;
    }
    for to in king_dest.iter() {
        let code = if enemy.contains(to) { CAPTURE } else { QUIET };
        out.push(Move::encode(king_sq, to, code));
    }

    if dbl_check {
        return;
    }

    // Knights: a pinned knight can never move without exposing the king.
    for from in board.piece_bb(Piece::new(1, us)).iter() {
        if pins.pinned.contains(from) {
            continue;
        }
        for to in (knight_attacks(from) & target_mask).iter() {
            let code = if enemy.contains(to) { CAPTURE } else { QUIET };
            out.push(Move::encode(from, to, code));
        }
    }

    // Sliders: bishops, rooks, queens.
    for kind in [2usize, 3, 4] {
        for from in board.piece_bb(Piece::new(kind, us)).iter() {
            let alignment = if pins.pinned.contains(from) {
                pins.pin_ray[from.index()]
            } else {
                Bitboard::ALL
            };
            let attacks = match kind {
                2 => bishop_attacks(from, occ),
                3 => rook_attacks(from, occ),
                _ => queen_attacks(from, occ),
            };
            for to in (attacks & target_mask & alignment).iter() {
                let code = if enemy.contains(to) { CAPTURE } else { QUIET };
                out.push(Move::encode(from, to, code));
            }
        }
    }

    generate_pawn_moves::<CAPTURES_ONLY>(board, us, them, occ, enemy, &pins, target_mask, check_resolution, in_check, out);

    if !CAPTURES_ONLY && !in_check {
        generate_castling(board, us, enemy_attacks, occ, out);
    }
}

#[allow(clippy::too_many_arguments)]
fn generate_pawn_moves<const CAPTURES_ONLY: bool>(
    board: &Board,
    us: Color,
    them: Color,
    occ: Bitboard,
    enemy: Bitboard,
    pins: &PinInfo,
    target_mask: Bitboard,
    check_resolution: Bitboard,
    in_check: bool,
    out: &mut MoveList,
) {
    let (start_rank, promo_rank, step): (u8, u8, i32) = match us {
        Color::White => (1, 7, 8),
        Color::Black => (6, 0, -8),
    };

    for from in board.piece_bb(Piece::new(0, us)).iter() {
        let alignment = if pins.pinned.contains(from) {
            pins.pin_ray[from.index()]
        } else {
            Bitboard::ALL
        };

        let push_idx = from.0 as i32 + step;
        if (0..64).contains(&push_idx) {
            let push_sq = Square(push_idx as u8);
            if !occ.contains(push_sq) {
                if alignment.contains(push_sq) {
                    if push_sq.rank() == promo_rank {
                        push_promotions(out, from, push_sq, false);
                    } else if !CAPTURES_ONLY && target_mask.contains(push_sq) {
                        out.push(Move::encode(from, push_sq, QUIET));
                    }
                }
                if from.rank() == start_rank {
                    let double_idx = push_idx + step;
                    let double_sq = Square(double_idx as u8);
                    if !occ.contains(double_sq)
                        && alignment.contains(double_sq)
                        && target_mask.contains(double_sq)
                        && !CAPTURES_ONLY
                    {
                        out.push(Move::encode(from, double_sq, DOUBLE_PUSH));
                    }
                }
            }
        }

        let ep_sq = board.en_passant_square;
        let ep_bb = if ep_sq == NO_SQUARE {
            Bitboard::EMPTY
        } else {
            Bitboard::from_square(ep_sq)
        };
        for to in (pawn_attacks(from, us) & (enemy | ep_bb) & alignment).iter() {
            if to == ep_sq && ep_sq != NO_SQUARE {
                if is_ep_legal(board, us, them, from, to, check_resolution, in_check) {
                    out.push(Move::encode(from, to, EP_CAPTURE));
                }
            } else if target_mask.contains(to) {
                if to.rank() == promo_rank {
                    push_promotions(out, from, to, true);
                } else {
                    out.push(Move::encode(from, to, CAPTURE));
                }
            }
        }
    }
}

fn is_ep_legal(
    board: &Board,
    us: Color,
    them: Color,
    from: Square,
    to: Square,
    check_resolution: Bitboard,
    in_check: bool,
) -> bool {
    let captured_sq = match us {
        Color::White => Square(to.0 - 8),
        Color::Black => Square(to.0 + 8),
    };
    if in_check && !check_resolution.contains(captured_sq) && !check_resolution.contains(to) {
        return false;
    }
    let king_sq = board.king_square(us);
    if king_sq.rank() != from.rank() {
        return true;
    }
    let occ_after = board.occupied() & !Bitboard::from_square(from) & !Bitboard::from_square(captured_sq);
    let king_bb = Bitboard::from_square(king_sq);
    let horizontal = crate::attack_tables::fills::sliding_attacks(king_bb, occ_after, Direction::East)
        | crate::attack_tables::fills::sliding_attacks(king_bb, occ_after, Direction::West);
    let rooks_queens = board.piece_bb(Piece::new(3, them)) | board.piece_bb(Piece::new(4, them));
    (horizontal & rooks_queens).is_empty()
}

fn generate_castling(board: &Board, us: Color, enemy_attacks: Bitboard, occ: Bitboard, out: &mut MoveList) {
    let empty = |squares: &[Square]| squares.iter().all(|&s| !occ.contains(s));
    let safe = |squares: &[Square]| squares.iter().all(|&s| !enemy_attacks.contains(s));
    match us {
        Color::White => {
            if board.castling_rights & WKING_SIDE != 0
                && empty(&[Square::new(0, 5), Square::new(0, 6)])
                && safe(&[Square::new(0, 5), Square::new(0, 6)])
            {
                out.push(Move::encode(Square::new(0, 4), Square::new(0, 6), KING_CASTLE));
            }
            if board.castling_rights & WQUEEN_SIDE != 0
                && empty(&[Square::new(0, 1), Square::new(0, 2), Square::new(0, 3)])
                && safe(&[Square::new(0, 2), Square::new(0, 3)])
            {
                out.push(Move::encode(Square::new(0, 4), Square::new(0, 2), QUEEN_CASTLE));
            }
        }
        Color::Black => {
            if board.castling_rights & BKING_SIDE != 0
                && empty(&[Square::new(7, 5), Square::new(7, 6)])
                && safe(&[Square::new(7, 5), Square::new(7, 6)])
            {
                out.push(Move::encode(Square::new(7, 4), Square::new(7, 6), KING_CASTLE));
            }
            if board.castling_rights & BQUEEN_SIDE != 0
                && empty(&[Square::new(7, 1), Square::new(7, 2), Square::new(7, 3)])
                && safe(&[Square::new(7, 2), Square::new(7, 3)])
            {
                out.push(Move::encode(Square::new(7, 4), Square::new(7, 2), QUEEN_CASTLE));
            }
        }
    }
}

/// Write every legal move for the side to move into `out`.
pub fn generate_all(board: &Board, out: &mut MoveList) {
    generate::<false>(board, out);
}

/// Write only captures, en-passant captures and promotions (quiet
/// promotions included too, a deliberate implementation choice); no
/// castles, no quiet non-promotion moves.
pub fn generate_captures(board: &Board, out: &mut MoveList) {
    generate::<true>(board, out);
}
