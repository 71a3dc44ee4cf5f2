//! Tests for game termination and end-of-game scoring
//!
//! This module covers:
//! - Checkmate (including drop mates)
//! - Stalemate
//! - Fivefold repetition
//! - The optional insufficient-material and 75-move rules

use zh_core::{
    parse_uci_move, Color, DrawRules, Outcome, Position, DRAW_SCORE, LOSS_SCORE, ONGOING_SCORE,
    WIN_SCORE,
};

fn play(pos: &mut Position, moves: &[&str]) {
    for txt in moves {
        let mv = parse_uci_move(pos, txt).unwrap_or_else(|e| panic!("{txt}: {e}"));
        pos.make_move(mv);
    }
}

// =============================================================================
// Checkmate Tests
// =============================================================================

#[test]
fn test_fools_mate_scores() {
    let pos =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();

    assert!(pos.is_checkmate());
    assert!(!pos.is_stalemate());
    assert_eq!(
        pos.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::Black
        })
    );
    assert_eq!(pos.end_score(Color::White), LOSS_SCORE, "loss for the mated side");
    assert_eq!(pos.end_score(Color::Black), WIN_SCORE, "win for the mating side");
}

#[test]
fn test_drop_mate_is_checkmate() {
    // Queen dropped on g7, protected by the h6 pawn
    let mut pos = Position::from_fen("6k1/8/7P/8/8/8/8/4K3[Q] w - - 0 1").unwrap();
    play(&mut pos, &["Q@g7"]);
    assert!(pos.is_checkmate());
    assert_eq!(pos.end_score(Color::White), WIN_SCORE);
}

#[test]
fn test_blockable_check_is_not_mate_with_pocket() {
    // Back-rank check that can only be met by interposing a dropped piece
    let pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1[n] b - - 0 1").unwrap();
    assert!(pos.in_check(Color::Black));
    assert!(!pos.is_checkmate());
    assert_eq!(pos.end_score(Color::Black), ONGOING_SCORE);
}

// =============================================================================
// Stalemate Tests
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king on a8, White queen on b6, White king on c7
    let pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();

    assert!(pos.is_stalemate());
    assert!(!pos.in_check(Color::Black), "Stalemate means king is not in check");
    assert_eq!(pos.outcome(), Some(Outcome::Stalemate));
    assert_eq!(pos.end_score(Color::Black), DRAW_SCORE);
    assert_eq!(pos.end_score(Color::White), DRAW_SCORE);
}

#[test]
fn test_pocket_piece_breaks_stalemate() {
    // Same picture, but Black can drop a piece
    let pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8[p] b - - 0 1").unwrap();
    assert!(!pos.is_stalemate());
    assert_eq!(pos.outcome(), None);
}

// =============================================================================
// Repetition Tests
// =============================================================================

#[test]
fn test_fivefold_repetition() {
    let mut pos = Position::startpos();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    for round in 1..4 {
        play(&mut pos, &shuffle);
        assert_eq!(pos.repetition_count(), round + 1);
        assert!(!pos.is_fivefold_repetition());
    }
    play(&mut pos, &shuffle);
    assert_eq!(pos.repetition_count(), 5);
    assert!(pos.is_fivefold_repetition());
    assert_eq!(pos.outcome(), Some(Outcome::FivefoldRepetition));
    assert_eq!(pos.end_score(Color::White), DRAW_SCORE);
}

#[test]
fn test_undo_rewinds_repetition_table() {
    let mut pos = Position::startpos();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for _ in 0..4 {
        play(&mut pos, &shuffle);
    }
    assert!(pos.is_fivefold_repetition());

    let last = pos.history().last().unwrap().mv;
    pos.unmake_move(last);
    assert_eq!(pos.repetition_count(), 4, "f6 position seen four times");
    play(&mut pos, &["f6g8"]);
    assert!(pos.is_fivefold_repetition());
}

#[test]
fn test_pocket_contents_distinguish_repetitions() {
    let a = Position::from_fen("4k3/8/8/8/8/8/8/4K3[N] w - - 0 1").unwrap();
    let b = Position::from_fen("4k3/8/8/8/8/8/8/4K3[B] w - - 0 1").unwrap();
    assert_ne!(a.repetition_key(), b.repetition_key());
}

// =============================================================================
// Optional Draw Rules
// =============================================================================

#[test]
fn test_insufficient_material_only_when_enabled() {
    let mut pos = Position::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1").unwrap();
    assert!(pos.is_insufficient_material());
    assert_eq!(pos.outcome(), None, "rule is off by default");

    pos.set_draw_rules(DrawRules {
        insufficient_material: true,
        ..DrawRules::default()
    });
    assert_eq!(pos.outcome(), Some(Outcome::InsufficientMaterial));
}

#[test]
fn test_bare_kings_with_pocket_are_not_insufficient() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/8[p] w - - 0 1").unwrap();
    assert!(!pos.is_insufficient_material());
}

#[test]
fn test_seventy_five_move_rule() {
    let mut pos = Position::from_fen("8/8/8/4k3/8/4K3/8/R7 w - - 150 90").unwrap();
    assert_eq!(pos.outcome(), None);
    pos.set_draw_rules(DrawRules {
        seventy_five_moves: true,
        ..DrawRules::default()
    });
    assert_eq!(pos.outcome(), Some(Outcome::SeventyFiveMoves));

    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/R7 w - - 149 90").unwrap();
    assert_eq!(pos.outcome(), None);
}
