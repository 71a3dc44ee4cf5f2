pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod encoding;
pub mod error;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod rules;
pub mod san;
pub mod time_control;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export game rules (not engine-specific)
pub use attacks::*;
pub use bitboard::*;
pub use board::*;
pub use encoding::{decode, encode, ActionKind, ACTION_SIZE};
pub use error::{FenError, MoveParseError};
pub use fen::STARTPOS_FEN;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use rules::*;
pub use san::move_to_san;
pub use time_control::*;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

use std::time::Duration;

// =============================================================================
// Engine trait
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation of the chosen move in centipawns from the mover's perspective
    pub score: i32,
    /// Simulations (or nodes) searched
    pub nodes: u64,
    /// Wall-clock time spent
    pub elapsed: Duration,
    /// Whether the search stopped before its budget was spent
    pub stopped: bool,
}

impl SearchResult {
    /// Nodes per second, 0 when no time was measured.
    pub fn nps(&self) -> u64 {
        let ms = self.elapsed.as_millis() as u64;
        if ms == 0 {
            0
        } else {
            self.nodes * 1000 / ms
        }
    }
}

/// Trait that all engines must implement.
///
/// Front ends and the match runner drive engines only through this trait.
pub trait Engine: Send {
    /// Choose a move in the given position.
    ///
    /// # Arguments
    /// * `pos` - The current position to analyze
    /// * `limits` - Simulation, time or clock limits
    ///
    /// # Returns
    /// SearchResult containing best move, score, and statistics
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name for protocol identification
    fn name(&self) -> &str;

    /// Returns the engine's author for protocol identification
    fn author(&self) -> &str {
        "ML-chess"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}

    /// Optional: Set an option. Returns true if the option was recognized and accepted.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
