//! Dense action indices for moves.
//!
//! Every move maps to `origin * 81 + slot`, giving 64 × 81 = 5184 actions.
//! Drops use the target square as their origin. Slots per origin square:
//!
//! | slots  | meaning                                                   |
//! |--------|-----------------------------------------------------------|
//! | 0..56  | slide: `direction * 7 + distance - 1`                     |
//! | 56..64 | knight jump                                               |
//! | 64..76 | promotion: `64 + (abs(to - from) - 7) + piece * 3` (N,B,R,Q) |
//! | 76..81 | drop: P, N, B, R, Q                                       |

use crate::board::Position;
use crate::movegen::legal_moves;
use crate::types::*;

pub const SLOTS_PER_SQUARE: usize = 81;
pub const ACTION_SIZE: usize = 64 * SLOTS_PER_SQUARE;

const KNIGHT_BASE: usize = 56;
const PROMOTION_BASE: usize = 64;
const DROP_BASE: usize = 76;

/// Slide directions `(file, rank)` in slot order: up, down, left, right,
/// up-left, up-right, down-left, down-right.
const SLIDE_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
];

/// Knight jumps `(file, rank)` in slot order.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-1, 2),
    (1, 2),
    (-1, -2),
    (1, -2),
    (-2, 1),
    (-2, -1),
    (2, 1),
    (2, -1),
];

/// What an action index describes, independent of the position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Any non-promotion board move (quiet, capture, castle, en passant).
    Board,
    Promotion(PieceKind),
    Drop(PieceKind),
}

impl ActionKind {
    pub fn of(mv: Move) -> ActionKind {
        match mv.kind {
            MoveKind::Drop(k) => ActionKind::Drop(k),
            MoveKind::Promotion(k) | MoveKind::PromotionCapture(k) => ActionKind::Promotion(k),
            _ => ActionKind::Board,
        }
    }
}

fn promotion_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::Knight => 0,
        PieceKind::Bishop => 1,
        PieceKind::Rook => 2,
        _ => 3,
    }
}

/// Action index of `mv`. Board moves must be a slide or a knight jump, which
/// holds for everything the legal generator produces.
pub fn encode(mv: Move) -> usize {
    let origin = mv.from as usize * SLOTS_PER_SQUARE;
    match ActionKind::of(mv) {
        ActionKind::Drop(k) => origin + DROP_BASE + k.idx(),
        ActionKind::Promotion(k) => {
            let span = (mv.to as i16 - mv.from as i16).unsigned_abs() as usize;
            origin + PROMOTION_BASE + (span - 7) + promotion_index(k) * 3
        }
        ActionKind::Board => {
            let df = file_of(mv.to) - file_of(mv.from);
            let dr = rank_of(mv.to) - rank_of(mv.from);
            if let Some(j) = KNIGHT_JUMPS.iter().position(|&d| d == (df, dr)) {
                return origin + KNIGHT_BASE + j;
            }
            let distance = df.abs().max(dr.abs());
            debug_assert!(distance > 0, "null board move cannot be encoded");
            let step = (df.signum(), dr.signum());
            let dir = SLIDE_DIRECTIONS
                .iter()
                .position(|&d| d == step)
                .unwrap_or_default();
            origin + dir * 7 + (distance.max(1) as usize - 1)
        }
    }
}

/// Origin, destination and category of an action index, or `None` when the
/// index is out of range or points off the board.
pub fn decode(index: usize) -> Option<(u8, u8, ActionKind)> {
    if index >= ACTION_SIZE {
        return None;
    }
    let from = (index / SLOTS_PER_SQUARE) as u8;
    let slot = index % SLOTS_PER_SQUARE;
    let (f, r) = (file_of(from), rank_of(from));

    match slot {
        s if s < KNIGHT_BASE => {
            let (df, dr) = SLIDE_DIRECTIONS[s / 7];
            let dist = (s % 7) as i8 + 1;
            let to = sq(f + df * dist, r + dr * dist)?;
            Some((from, to, ActionKind::Board))
        }
        s if s < PROMOTION_BASE => {
            let (df, dr) = KNIGHT_JUMPS[s - KNIGHT_BASE];
            let to = sq(f + df, r + dr)?;
            Some((from, to, ActionKind::Board))
        }
        s if s < DROP_BASE => {
            let offset = s - PROMOTION_BASE;
            let kind = PieceKind::PROMOTIONS[offset / 3];
            let span = (offset % 3) as i8 + 7;
            // White promotes from rank 7, Black from rank 2
            let to = match r {
                6 => from as i8 + span,
                1 => from as i8 - span,
                _ => return None,
            };
            let to = u8::try_from(to).ok().filter(|&t| t < 64)?;
            if (file_of(to) - f).abs() > 1 {
                return None;
            }
            Some((from, to, ActionKind::Promotion(kind)))
        }
        s => {
            let kind = PieceKind::from_idx(s - DROP_BASE)?;
            Some((from, from, ActionKind::Drop(kind)))
        }
    }
}

impl Position {
    /// The legal move whose action index is `index`, if any.
    pub fn move_from_action(&self, index: usize) -> Option<Move> {
        legal_moves(self).into_iter().find(|&mv| encode(mv) == index)
    }
}

#[cfg(test)]
#[path = "encoding_tests.rs"]
mod encoding_tests;
