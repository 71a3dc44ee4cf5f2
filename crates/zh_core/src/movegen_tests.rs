use super::*;

fn moves_of(fen: &str) -> Vec<Move> {
    legal_moves(&Position::from_fen(fen).unwrap())
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let moves = moves_of("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    assert_eq!(moves.len(), 48);
}

#[test]
fn test_drops_fill_empty_squares() {
    // 5 king moves + 62 empty squares
    assert_eq!(moves_of("4k3/8/8/8/8/8/8/4K3[Q] w - - 0 1").len(), 67);
    // Pawns never drop on the first or last rank: 5 + 48
    assert_eq!(moves_of("4k3/8/8/8/8/8/8/4K3[P] w - - 0 1").len(), 53);
}

#[test]
fn test_slider_check_allows_interposing_drops() {
    let moves = moves_of("4k3/8/8/8/8/8/8/r3K3[N] w - - 0 1");
    let drops: Vec<u8> = moves.iter().filter(|m| m.is_drop()).map(|m| m.to).collect();
    assert_eq!(drops, vec![1, 2, 3]); // b1, c1, d1
    let king: Vec<u8> = moves.iter().filter(|m| !m.is_drop()).map(|m| m.to).collect();
    assert_eq!(king.len(), 3); // d2, e2, f2; d1 and f1 stay on the rook's rank
    assert!(!king.contains(&5), "x-ray through the king must cover f1");
}

#[test]
fn test_double_check_only_king_moves() {
    let moves = moves_of("4k3/8/8/8/8/5n2/8/r3K3[Q] w - - 0 1");
    let mut targets: Vec<u8> = moves.iter().map(|m| m.to).collect();
    targets.sort();
    assert_eq!(targets, vec![12, 13]); // e2, f2
    assert!(moves.iter().all(|m| m.from == 4 && !m.is_drop()));
}

#[test]
fn test_knight_check_blocks_drops() {
    // A knight check cannot be blocked
    let moves = moves_of("4k3/8/8/8/8/3n4/8/4K3[Q] w - - 0 1");
    assert!(moves.iter().all(|m| !m.is_drop()));
}

#[test]
fn test_pinned_pieces_stay_on_line() {
    // Bishop pinned on the e-file has no moves
    let moves = moves_of("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|m| m.from == 4));

    // Rook pinned on the e-file slides up to and including the pinner
    let moves = moves_of("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1");
    let rook: Vec<Move> = moves.iter().copied().filter(|m| m.from == 12).collect();
    assert_eq!(rook.len(), 5);
    assert!(rook.iter().all(|m| file_of(m.to) == 4));
    assert_eq!(moves.len(), 9);
}

#[test]
fn test_en_passant() {
    let moves = moves_of("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    assert!(
        moves
            .iter()
            .any(|m| m.kind == MoveKind::EnPassant && m.from == 36 && m.to == 43)
    );
}

#[test]
fn test_en_passant_horizontal_pin() {
    // Taking en passant would expose the king on a5 to the rook on h5
    let moves = moves_of("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
    assert!(moves.iter().all(|m| m.kind != MoveKind::EnPassant));
    assert_eq!(moves.len(), 6);
}

#[test]
fn test_en_passant_captures_checking_pawn() {
    // d5 pawn just pushed and checks the king on e4
    let moves = moves_of("4k3/8/8/3pP3/4K3/8/8/8 w - d6 0 1");
    assert!(moves.iter().any(|m| m.kind == MoveKind::EnPassant));
}

#[test]
fn test_castling_rules() {
    let both = moves_of("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(both.iter().any(|m| m.kind == MoveKind::CastleKing));
    assert!(both.iter().any(|m| m.kind == MoveKind::CastleQueen));

    // f1 attacked: no king-side castling
    let moves = moves_of("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(moves.iter().all(|m| m.kind != MoveKind::CastleKing));
    assert!(moves.iter().any(|m| m.kind == MoveKind::CastleQueen));

    // b1 attacked does not matter for the queen side
    let moves = moves_of("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(moves.iter().any(|m| m.kind == MoveKind::CastleQueen));

    // Never out of check
    let moves = moves_of("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(moves
        .iter()
        .all(|m| !matches!(m.kind, MoveKind::CastleKing | MoveKind::CastleQueen)));
}

#[test]
fn test_promotions_include_all_pieces() {
    let moves = moves_of("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let promos: Vec<PieceKind> = moves.iter().filter_map(|m| m.promotion()).collect();
    assert_eq!(promos.len(), 4);
    for kind in PieceKind::PROMOTIONS {
        assert!(promos.contains(&kind));
    }
}
