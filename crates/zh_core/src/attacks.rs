//! Pre-computed attack tables for move generation, check/pin detection and
//! the evaluator's attack maps.
//!
//! This module contains:
//! - Leaper tables (knight, king, pawn per color)
//! - Ray tables and classical sliding attacks
//! - `BETWEEN` and `LINE` square-pair tables used to resolve checks and pins
//!
//! Everything is built in `const` context, so the tables are immutable and
//! ready before the first lookup.

use crate::bitboard::Bitboard;
use crate::types::{Color, PieceKind};

const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut bb = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let f = file + deltas[i].0;
            let r = rank + deltas[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                bb |= 1u64 << (r * 8 + f) as u32;
            }
            i += 1;
        }
        table[sq] = Bitboard(bb);
        sq += 1;
    }
    table
}

/// Pre-computed knight attacks for each square.
pub static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&[
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
]);

/// Pre-computed king attacks for each square.
pub static KING_ATTACKS: [Bitboard; 64] = leaper_table(&[
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
]);

/// Pawn captures, indexed by `[color][square]`.
pub static PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&[(-1, 1), (1, 1)]),
    leaper_table(&[(-1, -1), (1, -1)]),
];

/// Get pawn attacks for a given color and square.
#[inline(always)]
pub fn pawn_attacks(sq: u8, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.idx()][sq as usize]
}

/// Get knight attacks for a given square.
#[inline(always)]
pub fn knight_attacks(sq: u8) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

/// Get king attacks for a given square.
#[inline(always)]
pub fn king_attacks(sq: u8) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

// =============================================================================
// Sliding piece attacks (classical ray approach)
// =============================================================================

/// Step deltas `(file, rank)` for each ray direction.
/// Directions: 0=N, 1=NE, 2=E, 3=SE, 4=S, 5=SW, 6=W, 7=NW
const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const fn build_rays() -> [[Bitboard; 64]; 8] {
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (df, dr) = DIRECTIONS[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut f = (sq % 8) as i8 + df;
            let mut r = (sq / 8) as i8 + dr;
            let mut bb = 0u64;
            while f >= 0 && f < 8 && r >= 0 && r < 8 {
                bb |= 1u64 << (r * 8 + f) as u32;
                f += df;
                r += dr;
            }
            rays[dir][sq] = Bitboard(bb);
            sq += 1;
        }
        dir += 1;
    }
    rays
}

const RAY_TABLE: [[Bitboard; 64]; 8] = build_rays();

/// Pre-computed ray attacks in each direction.
/// RAYS[direction][square] gives all squares in that direction from sq (not including sq).
pub static RAYS: [[Bitboard; 64]; 8] = RAY_TABLE;

#[inline(always)]
fn positive_ray(dir: usize, sq: u8, occupied: Bitboard) -> Bitboard {
    let ray = RAYS[dir][sq as usize];
    match (ray & occupied).lsb() {
        // Include the blocker, exclude everything beyond
        Some(blocker) => ray & !RAYS[dir][blocker as usize],
        None => ray,
    }
}

#[inline(always)]
fn negative_ray(dir: usize, sq: u8, occupied: Bitboard) -> Bitboard {
    let ray = RAYS[dir][sq as usize];
    let blockers = ray & occupied;
    if blockers.is_empty() {
        return ray;
    }
    // For negative rays the nearest blocker is the highest square
    let blocker = 63 - blockers.0.leading_zeros() as u8;
    ray & !RAYS[dir][blocker as usize]
}

/// Calculate bishop attacks given a square and occupied squares.
#[inline]
pub fn bishop_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    positive_ray(1, sq, occupied)
        | positive_ray(7, sq, occupied)
        | negative_ray(3, sq, occupied)
        | negative_ray(5, sq, occupied)
}

/// Calculate rook attacks given a square and occupied squares.
#[inline]
pub fn rook_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    positive_ray(0, sq, occupied)
        | positive_ray(2, sq, occupied)
        | negative_ray(4, sq, occupied)
        | negative_ray(6, sq, occupied)
}

/// Calculate queen attacks (union of bishop and rook attacks).
#[inline]
pub fn queen_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

/// Squares attacked by a piece of `kind` and `color` standing on `sq`.
#[inline]
pub fn piece_attacks(kind: PieceKind, color: Color, sq: u8, occupied: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Pawn => pawn_attacks(sq, color),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occupied),
        PieceKind::Rook => rook_attacks(sq, occupied),
        PieceKind::Queen => queen_attacks(sq, occupied),
        PieceKind::King => king_attacks(sq),
    }
}

// =============================================================================
// Square-pair tables
// =============================================================================

/// `BETWEEN[a][b]`: squares strictly between `a` and `b` when they share a
/// rank, file or diagonal; empty otherwise.
pub static BETWEEN: [[Bitboard; 64]; 64] = {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let mut a = 0;
    while a < 64 {
        let mut dir = 0;
        while dir < 8 {
            let (df, dr) = DIRECTIONS[dir];
            let mut f = (a % 8) as i8 + df;
            let mut r = (a / 8) as i8 + dr;
            let mut path = 0u64;
            while f >= 0 && f < 8 && r >= 0 && r < 8 {
                let b = (r * 8 + f) as usize;
                table[a][b] = Bitboard(path);
                path |= 1u64 << b;
                f += df;
                r += dr;
            }
            dir += 1;
        }
        a += 1;
    }
    table
};

/// `LINE[a][b]`: the full board line through `a` and `b` (both included)
/// when they are aligned; empty otherwise.
pub static LINE: [[Bitboard; 64]; 64] = {
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let mut a = 0;
    while a < 64 {
        let mut dir = 0;
        while dir < 8 {
            let (df, dr) = DIRECTIONS[dir];
            let opposite = (dir + 4) % 8;
            let line = RAY_TABLE[dir][a].0 | RAY_TABLE[opposite][a].0 | (1u64 << a);
            let mut f = (a % 8) as i8 + df;
            let mut r = (a / 8) as i8 + dr;
            while f >= 0 && f < 8 && r >= 0 && r < 8 {
                table[a][(r * 8 + f) as usize] = Bitboard(line);
                f += df;
                r += dr;
            }
            dir += 1;
        }
        a += 1;
    }
    table
};

#[inline(always)]
pub fn between(a: u8, b: u8) -> Bitboard {
    BETWEEN[a as usize][b as usize]
}

#[inline(always)]
pub fn line(a: u8, b: u8) -> Bitboard {
    LINE[a as usize][b as usize]
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
