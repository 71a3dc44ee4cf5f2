use super::*;
use crate::movegen::legal_moves;
use crate::uci::parse_uci_move;

fn play(pos: &mut Position, moves: &[&str]) {
    for txt in moves {
        let mv = parse_uci_move(pos, txt).unwrap();
        pos.make_move(mv);
    }
}

/// Every legal move, applied then undone, must restore the exact position.
fn assert_apply_undo_inverse(fen: &str) {
    let mut pos = Position::from_fen(fen).unwrap();
    let before = pos.clone();
    for mv in legal_moves(&pos) {
        pos.make_move(mv);
        assert_eq!(pos.repetition_key(), pos.compute_key(), "key drift after {mv:?}");
        pos.unmake_move(mv);
        assert_eq!(pos, before, "undo of {mv:?} did not restore {fen}");
        assert_eq!(pos.hash(), before.hash());
    }
}

#[test]
fn test_apply_undo_inverse_standard_positions() {
    assert_apply_undo_inverse(crate::fen::STARTPOS_FEN);
    assert_apply_undo_inverse(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    );
}

#[test]
fn test_apply_undo_inverse_with_pockets_and_promotions() {
    assert_apply_undo_inverse(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R[NPqb] w KQkq - 0 1",
    );
    assert_apply_undo_inverse("r3k3/1P6/8/8/8/7q~/8/R3K3[Pn] w Qq - 0 1");
    assert_apply_undo_inverse("4k3/8/8/3pP3/8/8/8/4K3[R] w - d6 0 1");
}

#[test]
fn test_capture_into_full_pocket_is_undone_exactly() {
    let fen = format!("4k3/8/8/8/8/8/2n5/N3K3[{}] w - - 0 1", "N".repeat(16));
    let mut pos = Position::from_fen(&fen).unwrap();
    let before = pos.clone();
    let mv = parse_uci_move(&pos, "a1c2").unwrap();

    pos.make_move(mv);
    assert_eq!(pos.pocket().count(Color::White, PieceKind::Knight), 17);
    assert_eq!(pos.repetition_key(), pos.compute_key());

    pos.unmake_move(mv);
    assert_eq!(pos.pocket().count(Color::White, PieceKind::Knight), 16);
    assert_eq!(pos, before);
    assert_eq!(pos.hash(), before.hash());
}

#[test]
fn test_capture_promoted_piece_pockets_a_pawn() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K1Rq~[] w - - 0 1").unwrap();
    assert!(pos.is_promoted(7));
    let mv = parse_uci_move(&pos, "g1h1").unwrap();
    assert_eq!(mv.kind, MoveKind::Capture);

    pos.make_move(mv);
    assert_eq!(pos.pocket().count(Color::White, PieceKind::Pawn), 1);
    assert_eq!(pos.pocket().count(Color::White, PieceKind::Queen), 0);

    pos.unmake_move(mv);
    assert!(pos.pocket().is_empty(Color::White));
    assert!(pos.is_promoted(7));
    assert_eq!(
        pos.piece_at(7),
        Some(Piece::new(Color::Black, PieceKind::Queen))
    );
}

#[test]
fn test_promotion_capture_tags_piece_and_pockets_victim() {
    let mut pos = Position::from_fen("r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mv = parse_uci_move(&pos, "b7a8n").unwrap();
    assert_eq!(mv.kind, MoveKind::PromotionCapture(PieceKind::Knight));

    pos.make_move(mv);
    assert!(pos.is_promoted(56));
    assert_eq!(pos.pocket().count(Color::White, PieceKind::Rook), 1);
    assert_eq!(pos.halfmove_clock(), 0);
}

#[test]
fn test_drop_updates_pocket_and_clock() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3[Nn] w - - 7 20").unwrap();
    let mv = parse_uci_move(&pos, "N@d4").unwrap();
    pos.make_move(mv);
    assert_eq!(pos.pocket().count(Color::White, PieceKind::Knight), 0);
    assert_eq!(pos.pocket().count(Color::Black, PieceKind::Knight), 1);
    assert_eq!(pos.halfmove_clock(), 0);
    assert!(!pos.is_promoted(27));
    assert_eq!(pos.side_to_move(), Color::Black);
}

#[test]
fn test_castling_rights_lost_on_rook_capture() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut pos, &["a1a8"]);
    let rights = pos.castling();
    assert!(!rights.wq && !rights.bq);
    assert!(rights.wk && rights.bk);
    assert_eq!(pos.pocket().count(Color::White, PieceKind::Rook), 1);
}

#[test]
fn test_repetition_counts_and_fingerprint() {
    let mut pos = Position::startpos();
    let start_hash = pos.hash();
    let start_fingerprint = pos.fingerprint();
    assert_eq!(pos.repetition_count(), 1);

    play(&mut pos, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert_eq!(pos.repetition_count(), 2);
    assert_eq!(pos.hash(), start_hash);
    assert_ne!(pos.fingerprint(), start_fingerprint);

    let last = pos.history().last().unwrap().mv;
    pos.unmake_move(last);
    play(&mut pos, &["f6g8"]);
    assert_eq!(pos.repetition_count(), 2);
}

#[test]
fn test_gives_check_and_fork() {
    let mut pos = Position::from_fen("r3k3/8/8/8/8/8/8/4K3[N] w - - 0 1").unwrap();
    let fork = parse_uci_move(&pos, "N@c7").unwrap();
    let single = parse_uci_move(&pos, "N@b6").unwrap();
    let check = parse_uci_move(&pos, "N@f6").unwrap();

    assert!(pos.gives_fork(fork));
    assert!(pos.gives_check(fork));
    assert!(!pos.gives_fork(single));
    assert!(!pos.gives_check(single));
    assert!(pos.gives_check(check));
    // Both probes leave the position untouched
    assert_eq!(pos.history().len(), 0);
}

#[test]
fn test_checkers_and_attacks() {
    let pos = Position::from_fen("4k3/8/8/8/8/5n2/8/r3K3 w - - 0 1").unwrap();
    assert_eq!(pos.checkers().popcount(), 2);
    assert!(pos.in_check(Color::White));
    assert!(!pos.in_check(Color::Black));
    assert!(pos.is_square_attacked(2, Color::Black)); // c1 on the rook's rank
}
