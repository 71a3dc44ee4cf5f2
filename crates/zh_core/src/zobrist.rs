//! Zobrist hashing for crazyhouse positions.
//!
//! The key is updated incrementally on every put/remove of a piece and every
//! pocket count change, so apply/undo stay O(1) in hashing work.
//!
//! The hash is composed of random values for:
//! - Each piece on each square (12 pieces × 64 squares)
//! - Each pocket count per color and droppable kind (2 × 5 × 62)
//! - Side to move
//! - Castling rights and en-passant file
//! - The repetition count, used only when fingerprinting search-tree nodes

use crate::types::{Color, Piece, PieceKind};

/// Highest number of a single kind one pocket can hold: every non-king
/// piece in the game. Captures only move material, so no count goes past it.
pub const MAX_POCKET: usize = 62;

/// Distinct repetition counts folded into a fingerprint; higher counts share the last key.
pub const REPETITION_BUCKETS: usize = 5;

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// Indexed by [color][droppable kind][count]; the zero-count entry is 0.
    pub pocket: [[[u64; MAX_POCKET + 1]; 5]; 2],
    /// Random value for black to move (XOR when black's turn)
    pub side_to_move: u64,
    /// Random values for castling rights [wk, wq, bk, bq]
    pub castling: [u64; 4],
    /// Random values for en passant file (0-7)
    pub en_passant: [u64; 8],
    /// Indexed by min(count, REPETITION_BUCKETS) - 1; the first occurrence is 0.
    pub repetition: [u64; REPETITION_BUCKETS],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate Zobrist keys using xorshift64 with a fixed seed.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x123456789ABCDEF0u64; // Fixed seed

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut piece = 0;
            while piece < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][piece][sq] = state;
                    sq += 1;
                }
                piece += 1;
            }
            color += 1;
        }

        let mut pocket = [[[0u64; MAX_POCKET + 1]; 5]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 5 {
                let mut count = 1;
                while count <= MAX_POCKET {
                    state = xorshift64(state);
                    pocket[color][kind][count] = state;
                    count += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        let mut repetition = [0u64; REPETITION_BUCKETS];
        let mut i = 1;
        while i < REPETITION_BUCKETS {
            state = xorshift64(state);
            repetition[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            pocket,
            side_to_move,
            castling,
            en_passant,
            repetition,
        }
    }

    /// Get the Zobrist key for a piece on a square.
    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// Key for holding exactly `count` pieces of `kind` in `color`'s pocket.
    #[inline(always)]
    pub fn pocket_key(&self, color: Color, kind: PieceKind, count: u8) -> u64 {
        self.pocket[color.idx()][kind.idx()][count as usize]
    }

    /// Get the Zobrist key for castling right index (0=wk, 1=wq, 2=bk, 3=bq).
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    /// Get the Zobrist key for en passant on a file (0-7).
    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }

    #[inline(always)]
    pub fn repetition_key(&self, count: u32) -> u64 {
        let bucket = (count as usize).clamp(1, REPETITION_BUCKETS) - 1;
        self.repetition[bucket]
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
