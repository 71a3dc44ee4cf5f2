use super::*;

#[test]
fn test_move_to_uci() {
    assert_eq!(move_to_uci(Move::new(12, 28)), "e2e4");
    assert_eq!(
        move_to_uci(Move::with_kind(52, 60, MoveKind::Promotion(PieceKind::Knight))),
        "e7e8n"
    );
    assert_eq!(move_to_uci(Move::drop(PieceKind::Pawn, 28)), "P@e4");
}

#[test]
fn test_parse_matches_legal_move_kind() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R[N] w KQ - 0 1").unwrap();
    assert_eq!(
        parse_uci_move(&pos, "e1g1").unwrap().kind,
        MoveKind::CastleKing
    );
    assert_eq!(
        parse_uci_move(&pos, "N@f3").unwrap(),
        Move::drop(PieceKind::Knight, 21)
    );
    assert_eq!(
        parse_uci_move(&pos, "n@f3").unwrap(),
        Move::drop(PieceKind::Knight, 21)
    );
}

#[test]
fn test_parse_rejects_bad_input() {
    let pos = Position::startpos();
    assert!(matches!(parse_uci_move(&pos, "e2"), Err(MoveParseError::Length(_))));
    assert!(matches!(parse_uci_move(&pos, "z2e4"), Err(MoveParseError::Square(_))));
    assert!(matches!(parse_uci_move(&pos, "e2e5"), Err(MoveParseError::Illegal(_))));
    assert!(matches!(parse_uci_move(&pos, "Q@e4"), Err(MoveParseError::Illegal(_))));
    assert!(matches!(parse_uci_move(&pos, "X@e4"), Err(MoveParseError::Piece(_))));
    assert!(matches!(parse_uci_move(&pos, "e2e4k"), Err(MoveParseError::Piece(_))));
}

#[test]
fn test_set_position_startpos_with_moves() {
    let mut pos = Position::default();
    set_position_from_uci(&mut pos, &["startpos", "moves", "e2e4", "d7d5", "e4d5"]).unwrap();
    assert_eq!(pos.side_to_move(), Color::Black);
    assert_eq!(pos.pocket().count(Color::White, PieceKind::Pawn), 1);
    assert_eq!(pos.history().len(), 3);
}

#[test]
fn test_set_position_fen_with_moves() {
    let mut pos = Position::default();
    let args = [
        "fen", "4k3/8/8/8/8/8/8/4K3[Q]", "w", "-", "-", "0", "1", "moves", "Q@e7",
    ];
    set_position_from_uci(&mut pos, &args).unwrap();
    assert_eq!(
        pos.piece_at(52),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );
    assert!(pos.in_check(Color::Black));
}

#[test]
fn test_set_position_stops_at_illegal_move() {
    let mut pos = Position::default();
    let err = set_position_from_uci(&mut pos, &["startpos", "moves", "e2e4", "e2e4"]);
    assert!(matches!(err, Err(MoveParseError::Illegal(_))));
    assert_eq!(pos.history().len(), 1);
}
