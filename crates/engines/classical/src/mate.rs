//! Short forced-mate search run before the statistical search.
//!
//! The attacking side may only play checking moves, the defending side may
//! play anything. A line counts only when every defence loses.

use zh_core::{legal_moves_into, Move, Position};

/// Deepest line searched, in plies (mate in two).
pub const MATE_SEARCH_DEPTH: u8 = 3;

/// Depth-bounded mate prover.
#[derive(Debug, Clone)]
pub struct MateSearch {
    max_depth: u8,
    nodes: u64,
}

impl Default for MateSearch {
    fn default() -> Self {
        Self::new(MATE_SEARCH_DEPTH)
    }
}

impl MateSearch {
    pub fn new(max_depth: u8) -> Self {
        Self { max_depth, nodes: 0 }
    }

    /// Positions visited by the last call to [`MateSearch::find`].
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// A move that forces mate for the side to move, shortest first.
    pub fn find(&mut self, pos: &Position) -> Option<Move> {
        self.nodes = 0;
        let mut tmp = pos.clone();
        let mut depth = 1;
        while depth <= self.max_depth {
            if let Some(mv) = self.attack(&mut tmp, depth) {
                return Some(mv);
            }
            depth += 2;
        }
        None
    }

    /// Attacker to move: a checking move after which every defence loses.
    fn attack(&mut self, pos: &mut Position, depth: u8) -> Option<Move> {
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);

        for mv in moves {
            pos.make_move(mv);
            self.nodes += 1;
            let mates = pos.in_check(pos.side_to_move()) && self.defence_fails(pos, depth - 1);
            pos.unmake_move(mv);
            if mates {
                return Some(mv);
            }
        }
        None
    }

    /// Defender to move: true when no reply escapes.
    fn defence_fails(&mut self, pos: &mut Position, depth: u8) -> bool {
        let mut replies = Vec::with_capacity(64);
        legal_moves_into(pos, &mut replies);

        if replies.is_empty() {
            return pos.in_check(pos.side_to_move());
        }
        if depth < 2 || pos.is_fivefold_repetition() {
            return false;
        }

        for reply in replies {
            pos.make_move(reply);
            self.nodes += 1;
            let refuted = self.attack(pos, depth - 1).is_none();
            pos.unmake_move(reply);
            if refuted {
                return false;
            }
        }
        true
    }
}

/// Run a default-depth mate search.
pub fn find_mate_move(pos: &Position) -> Option<Move> {
    MateSearch::default().find(pos)
}

#[cfg(test)]
#[path = "mate_tests.rs"]
mod mate_tests;
