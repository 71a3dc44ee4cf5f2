//! Input planes for a policy/value network.
//!
//! The position is encoded as 34 planes of 64 squares, always from
//! White's point of view (a1 = index 0):
//! - Planes 0-11: White P..K, then Black P..K, 1.0 where the piece stands
//! - Planes 12-13: earlier occurrences of the position, scaled
//! - Planes 14-23: pocket counts, White P..Q then Black P..Q, scaled
//! - Planes 24-25: promoted pieces of White, then Black
//! - Plane 26: en-passant target square
//! - Plane 27: all ones when White is to move
//! - Plane 28: fullmove number, scaled
//! - Planes 29-32: castling rights WK, WQ, BK, BQ
//! - Plane 33: halfmove clock, scaled

use zh_core::{Color, PieceKind, Position};

pub const NUM_PLANES: usize = 34;
pub const NUM_FEATURES: usize = NUM_PLANES * 64;

pub const REPETITIONS_NORM: f32 = 500.0;
pub const FULLMOVES_NORM: f32 = 500.0;
pub const POCKET_COUNT_NORM: f32 = 32.0;
pub const HALFMOVES_NORM: f32 = 40.0;

pub const REPETITION_PLANE: usize = 12;
pub const POCKET_PLANE: usize = 14;
pub const PROMOTED_PLANE: usize = 24;
pub const EN_PASSANT_PLANE: usize = 26;
pub const SIDE_PLANE: usize = 27;
pub const FULLMOVE_PLANE: usize = 28;
pub const CASTLING_PLANE: usize = 29;
pub const HALFMOVE_PLANE: usize = 33;

fn fill(features: &mut [f32], plane: usize, value: f32) {
    features[plane * 64..(plane + 1) * 64].fill(value);
}

/// Encode a position as a flat `34 * 64` vector.
pub fn encode_planes(pos: &Position) -> Vec<f32> {
    let mut features = vec![0.0f32; NUM_FEATURES];
    let bitboards = pos.bitboards();

    for (color_offset, color) in [(0, Color::White), (6, Color::Black)] {
        for kind in PieceKind::ALL {
            let plane = color_offset + kind.idx();
            for sq in bitboards.pieces(color, kind) {
                features[plane * 64 + sq as usize] = 1.0;
                if pos.is_promoted(sq) {
                    let promoted = PROMOTED_PLANE + color.idx();
                    features[promoted * 64 + sq as usize] = 1.0;
                }
            }
        }
    }

    let earlier = pos.repetition_count().saturating_sub(1) as f32 / REPETITIONS_NORM;
    fill(&mut features, REPETITION_PLANE, earlier);
    fill(&mut features, REPETITION_PLANE + 1, earlier);

    for (color_offset, color) in [(0, Color::White), (5, Color::Black)] {
        for kind in PieceKind::DROPPABLE {
            let count = pos.pocket().count(color, kind) as f32 / POCKET_COUNT_NORM;
            fill(&mut features, POCKET_PLANE + color_offset + kind.idx(), count);
        }
    }

    if let Some(ep) = pos.en_passant() {
        features[EN_PASSANT_PLANE * 64 + ep as usize] = 1.0;
    }

    if pos.side_to_move() == Color::White {
        fill(&mut features, SIDE_PLANE, 1.0);
    }

    fill(
        &mut features,
        FULLMOVE_PLANE,
        pos.fullmove_number() as f32 / FULLMOVES_NORM,
    );

    let castling = pos.castling();
    for (i, right) in [castling.wk, castling.wq, castling.bk, castling.bq]
        .into_iter()
        .enumerate()
    {
        if right {
            fill(&mut features, CASTLING_PLANE + i, 1.0);
        }
    }

    fill(
        &mut features,
        HALFMOVE_PLANE,
        pos.halfmove_clock() as f32 / HALFMOVES_NORM,
    );

    features
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod features_tests;
