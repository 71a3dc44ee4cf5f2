//! Fully legal move generation, drops included.
//!
//! Checks and pins are resolved up front from the king's square, so no move
//! is ever played and taken back to test legality:
//! 1. the danger set is every square the enemy attacks with our king lifted
//!    off the board, so sliders x-ray through it;
//! 2. checkers come from projecting each attack pattern out of the king
//!    square, and the same slider projection finds pinned pieces;
//! 3. with two checkers only the king moves; with one, other moves must
//!    capture the checker or land between it and the king; with none,
//!    castling and every other move are available;
//! 4. pinned pieces only move along the line through the king.

use crate::attacks::*;
use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(128);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();

    let us = pos.side_to_move();
    let them = us.other();
    let bb = pos.bitboards();
    let ours = bb.color(us);
    let theirs = bb.color(them);
    let occupied = ours | theirs;
    let ksq = pos.king_sq(us);

    let danger = danger_squares(pos, us, ksq);

    // King moves never depend on pins or the number of checkers
    for to in king_attacks(ksq) & !ours & !danger {
        out.push(Move::with_kind(ksq, to, capture_or_quiet(theirs, to)));
    }

    let mut checkers = (knight_attacks(ksq) & bb.pieces(them, PieceKind::Knight))
        | (pawn_attacks(ksq, us) & bb.pieces(them, PieceKind::Pawn));

    // Sliders seen from the king through our own pieces: nothing of ours in
    // between means check, exactly one means that piece is pinned.
    let candidates = (rook_attacks(ksq, theirs) & bb.orthogonal_sliders(them))
        | (bishop_attacks(ksq, theirs) & bb.diagonal_sliders(them));
    let mut pinned = Bitboard::EMPTY;
    for s in candidates {
        let blockers = between(ksq, s) & ours;
        if blockers.is_empty() {
            checkers.set(s);
        } else if !blockers.more_than_one() {
            pinned |= blockers;
        }
    }

    let (capture_mask, quiet_mask) = match checkers.popcount() {
        0 => {
            gen_castles(pos, us, ksq, occupied, danger, out);
            (theirs, !occupied)
        }
        1 => {
            let Some(checker) = checkers.lsb() else {
                return;
            };
            (checkers, between(ksq, checker))
        }
        _ => return,
    };

    gen_en_passant(pos, us, ksq, out);

    // Pinned sliders and pawns may still move along the pin line, but never
    // while in check.
    if checkers.is_empty() {
        for s in pinned {
            let Some(piece) = pos.piece_at(s) else {
                continue;
            };
            let ray = line(ksq, s);
            match piece.kind {
                PieceKind::Pawn => gen_pawn(s, us, occupied, theirs & ray, !occupied & ray, out),
                PieceKind::Knight | PieceKind::King => {}
                kind => {
                    let targets = piece_attacks(kind, us, s, occupied) & ray & !ours;
                    push_targets(s, targets, theirs, out);
                }
            }
        }
    }

    let free = !pinned;
    for s in bb.pieces(us, PieceKind::Pawn) & free {
        gen_pawn(s, us, occupied, capture_mask, quiet_mask, out);
    }
    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ] {
        for s in bb.pieces(us, kind) & free {
            let targets = piece_attacks(kind, us, s, occupied) & (capture_mask | quiet_mask);
            push_targets(s, targets, theirs, out);
        }
    }

    // Drops fill empty squares; in check only interposing squares qualify.
    let drop_mask = quiet_mask & !occupied;
    for kind in pos.pocket().kinds(us) {
        let targets = match kind {
            PieceKind::Pawn => drop_mask & !Bitboard::BACK_RANKS,
            _ => drop_mask,
        };
        for to in targets {
            out.push(Move::drop(kind, to));
        }
    }
}

/// Squares the enemy attacks, with our king removed from the blockers.
fn danger_squares(pos: &Position, us: Color, ksq: u8) -> Bitboard {
    let them = us.other();
    let bb = pos.bitboards();
    let occupied = bb.occupied() ^ Bitboard::from_square(ksq);

    let pawns = bb.pieces(them, PieceKind::Pawn);
    let mut danger = match them {
        Color::White => pawns.north_east() | pawns.north_west(),
        Color::Black => pawns.south_east() | pawns.south_west(),
    };
    danger |= king_attacks(pos.king_sq(them));
    for s in bb.pieces(them, PieceKind::Knight) {
        danger |= knight_attacks(s);
    }
    for s in bb.diagonal_sliders(them) {
        danger |= bishop_attacks(s, occupied);
    }
    for s in bb.orthogonal_sliders(them) {
        danger |= rook_attacks(s, occupied);
    }
    danger
}

#[inline]
fn capture_or_quiet(theirs: Bitboard, to: u8) -> MoveKind {
    if theirs.contains(to) {
        MoveKind::Capture
    } else {
        MoveKind::Quiet
    }
}

fn push_targets(from: u8, targets: Bitboard, theirs: Bitboard, out: &mut Vec<Move>) {
    for to in targets {
        out.push(Move::with_kind(from, to, capture_or_quiet(theirs, to)));
    }
}

fn push_promotions(from: u8, to: u8, capture: bool, out: &mut Vec<Move>) {
    for kind in PieceKind::PROMOTIONS {
        let mk = if capture {
            MoveKind::PromotionCapture(kind)
        } else {
            MoveKind::Promotion(kind)
        };
        out.push(Move::with_kind(from, to, mk));
    }
}

/// Pushes onto `quiet_mask`, captures onto `capture_mask`. En passant is
/// generated separately.
fn gen_pawn(
    from: u8,
    us: Color,
    occupied: Bitboard,
    capture_mask: Bitboard,
    quiet_mask: Bitboard,
    out: &mut Vec<Move>,
) {
    let (step, start_rank, last_rank): (i8, i8, i8) = match us {
        Color::White => (8, 1, 7),
        Color::Black => (-8, 6, 0),
    };
    let promotes = |to: u8| rank_of(to) == last_rank;

    let one = (from as i8 + step) as u8;
    if !occupied.contains(one) {
        if quiet_mask.contains(one) {
            if promotes(one) {
                push_promotions(from, one, false, out);
            } else {
                out.push(Move::new(from, one));
            }
        }
        if rank_of(from) == start_rank {
            let two = (one as i8 + step) as u8;
            if !occupied.contains(two) && quiet_mask.contains(two) {
                out.push(Move::with_kind(from, two, MoveKind::DoublePush));
            }
        }
    }

    for to in pawn_attacks(from, us) & capture_mask {
        if promotes(to) {
            push_promotions(from, to, true, out);
        } else {
            out.push(Move::with_kind(from, to, MoveKind::Capture));
        }
    }
}

/// En passant, verified by lifting both pawns off the board and checking
/// that nothing then attacks our king. This covers the checker being the
/// double-pushed pawn, ordinary pins and the horizontal two-pawn pin.
fn gen_en_passant(pos: &Position, us: Color, ksq: u8, out: &mut Vec<Move>) {
    let Some(ep) = pos.en_passant() else {
        return;
    };
    let them = us.other();
    let bb = pos.bitboards();
    let victim = match us {
        Color::White => ep - 8,
        Color::Black => ep + 8,
    };
    if !bb.pieces(them, PieceKind::Pawn).contains(victim) {
        return;
    }
    for from in pawn_attacks(ep, them) & bb.pieces(us, PieceKind::Pawn) {
        let occupied = (bb.occupied() ^ Bitboard::from_square(from) ^ Bitboard::from_square(victim))
            | Bitboard::from_square(ep);
        let attackers =
            pos.attackers_to(ksq, occupied) & bb.color(them) & !Bitboard::from_square(victim);
        if attackers.is_empty() {
            out.push(Move::with_kind(from, ep, MoveKind::EnPassant));
        }
    }
}

fn gen_castles(
    pos: &Position,
    us: Color,
    ksq: u8,
    occupied: Bitboard,
    danger: Bitboard,
    out: &mut Vec<Move>,
) {
    let rights = pos.castling();
    let base: u8 = match us {
        Color::White => 0,
        Color::Black => 56,
    };
    if ksq != base + 4 {
        return;
    }
    let rooks = pos.bitboards().pieces(us, PieceKind::Rook);

    // f and g must be empty and safe
    let king_side_path = Bitboard(0x60) << base;
    if rights.king_side(us)
        && rooks.contains(base + 7)
        && (occupied & king_side_path).is_empty()
        && (danger & king_side_path).is_empty()
    {
        out.push(Move::with_kind(ksq, base + 6, MoveKind::CastleKing));
    }

    // b, c and d must be empty; only c and d must be safe
    let queen_side_path = Bitboard(0x0E) << base;
    let queen_side_safe = Bitboard(0x0C) << base;
    if rights.queen_side(us)
        && rooks.contains(base)
        && (occupied & queen_side_path).is_empty()
        && (danger & queen_side_safe).is_empty()
    {
        out.push(Move::with_kind(ksq, base + 2, MoveKind::CastleQueen));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
