//! Game termination and the scalar end-of-game score used by search.

use crate::board::Position;
use crate::movegen::legal_moves;
use crate::types::{Color, PieceKind};

/// Score for a side that has won.
pub const WIN_SCORE: f32 = 1.0;
/// Score for a side that has lost.
pub const LOSS_SCORE: f32 = -1.0;
/// Draw sentinel. Non-zero so it can be told apart from "game continues".
pub const DRAW_SCORE: f32 = 1e-4;
/// The game is not over.
pub const ONGOING_SCORE: f32 = 0.0;

/// Occurrences of the same signature that end the game.
pub const FIVEFOLD: u32 = 5;
/// Half-moves without a capture, pawn move or drop that end the game.
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    FivefoldRepetition,
    InsufficientMaterial,
    SeventyFiveMoves,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_draw(self) -> bool {
        self.winner().is_none()
    }

    /// PGN result token.
    pub fn result_token(self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

impl Position {
    /// How the game ended, or `None` while it continues.
    pub fn outcome(&self) -> Option<Outcome> {
        if legal_moves(self).is_empty() {
            let stm = self.side_to_move();
            return Some(if self.in_check(stm) {
                Outcome::Checkmate {
                    winner: stm.other(),
                }
            } else {
                Outcome::Stalemate
            });
        }
        if self.is_fivefold_repetition() {
            return Some(Outcome::FivefoldRepetition);
        }
        let rules = self.draw_rules();
        if rules.insufficient_material && self.is_insufficient_material() {
            return Some(Outcome::InsufficientMaterial);
        }
        if rules.seventy_five_moves && self.halfmove_clock() >= SEVENTY_FIVE_MOVE_PLIES {
            return Some(Outcome::SeventyFiveMoves);
        }
        None
    }

    /// `WIN_SCORE`/`LOSS_SCORE` relative to `color` on checkmate,
    /// `DRAW_SCORE` on any draw, `ONGOING_SCORE` otherwise.
    pub fn end_score(&self, color: Color) -> f32 {
        match self.outcome() {
            Some(Outcome::Checkmate { winner }) if winner == color => WIN_SCORE,
            Some(Outcome::Checkmate { .. }) => LOSS_SCORE,
            Some(_) => DRAW_SCORE,
            None => ONGOING_SCORE,
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move()) && legal_moves(self).is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move()) && legal_moves(self).is_empty()
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetition_count() >= FIVEFOLD
    }

    /// Only the two kings remain and both pockets are empty.
    pub fn is_insufficient_material(&self) -> bool {
        let bb = self.bitboards();
        bb.occupied() == bb.kind(PieceKind::King)
            && self.pocket().is_empty(Color::White)
            && self.pocket().is_empty(Color::Black)
    }
}
