use super::*;
use crate::types::{Color, PieceKind};

#[test]
fn test_zobrist_keys_unique() {
    // Every non-zero key must be distinct
    let mut seen = std::collections::HashSet::new();

    for color in 0..2 {
        for piece in 0..6 {
            for sq in 0..64 {
                let key = ZOBRIST.pieces[color][piece][sq];
                assert!(seen.insert(key), "Duplicate piece key found");
            }
        }
        for kind in 0..5 {
            for count in 1..=MAX_POCKET {
                let key = ZOBRIST.pocket[color][kind][count];
                assert!(seen.insert(key), "Duplicate pocket key found");
            }
        }
    }

    assert!(
        seen.insert(ZOBRIST.side_to_move),
        "Side to move key collision"
    );
    for i in 0..4 {
        assert!(seen.insert(ZOBRIST.castling[i]), "Castling key collision");
    }
    for i in 0..8 {
        assert!(
            seen.insert(ZOBRIST.en_passant[i]),
            "En passant key collision"
        );
    }
    for i in 1..REPETITION_BUCKETS {
        assert!(
            seen.insert(ZOBRIST.repetition[i]),
            "Repetition key collision"
        );
    }
}

#[test]
fn test_empty_pocket_contributes_nothing() {
    for kind in PieceKind::DROPPABLE {
        assert_eq!(ZOBRIST.pocket_key(Color::White, kind, 0), 0);
        assert_eq!(ZOBRIST.pocket_key(Color::Black, kind, 0), 0);
    }
    assert_ne!(ZOBRIST.pocket_key(Color::White, PieceKind::Pawn, 1), 0);
}

#[test]
fn test_repetition_key_saturates() {
    assert_eq!(ZOBRIST.repetition_key(1), 0);
    assert_ne!(ZOBRIST.repetition_key(2), ZOBRIST.repetition_key(3));
    assert_eq!(
        ZOBRIST.repetition_key(REPETITION_BUCKETS as u32),
        ZOBRIST.repetition_key(40)
    );
}

#[test]
fn test_zobrist_piece_key() {
    let piece = Piece {
        color: Color::White,
        kind: PieceKind::Pawn,
    };
    let key1 = ZOBRIST.piece_key(piece, 0);
    let key2 = ZOBRIST.piece_key(piece, 1);
    assert_ne!(key1, key2);
}
