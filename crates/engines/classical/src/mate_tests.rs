use super::*;
use zh_core::{legal_moves, move_to_uci};

fn mate_of(fen: &str, depth: u8) -> Option<Move> {
    let pos = Position::from_fen(fen).unwrap();
    MateSearch::new(depth).find(&pos)
}

#[test]
fn test_back_rank_mate_in_one() {
    let mv = mate_of("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 1).unwrap();
    assert_eq!(move_to_uci(mv), "a1a8");
}

#[test]
fn test_drop_mate_in_one() {
    let fen = "6k1/8/7P/8/8/8/8/4K3[Q] w - - 0 1";
    let mut pos = Position::from_fen(fen).unwrap();
    let mv = find_mate_move(&pos).unwrap();
    assert_eq!(mv.dropped(), Some(zh_core::PieceKind::Queen));
    pos.make_move(mv);
    assert!(pos.is_checkmate());
}

#[test]
fn test_mate_in_two_with_rook_drops() {
    // R@a8+ Kh7 R@h1#; no single drop mates
    let fen = "7k/8/5K2/8/8/8/8/8[RR] w - - 0 1";
    assert!(mate_of(fen, 1).is_none());

    let mut pos = Position::from_fen(fen).unwrap();
    let mv = mate_of(fen, 3).unwrap();
    pos.make_move(mv);
    assert!(pos.in_check(pos.side_to_move()));
    for reply in legal_moves(&pos) {
        pos.make_move(reply);
        assert!(
            MateSearch::new(1).find(&pos).is_some(),
            "no mate after {}",
            move_to_uci(reply)
        );
        pos.unmake_move(reply);
    }
}

#[test]
fn test_quiet_positions_have_no_mate() {
    let mut search = MateSearch::default();
    assert!(search.find(&Position::startpos()).is_none());
    // No checks at all: each deepening pass only visits the root moves
    assert_eq!(search.nodes(), 40);
}

#[test]
fn test_defender_escape_refutes_line() {
    // Ra8+ is answered by Kh7 once the h7 pawn is gone
    assert!(mate_of("6k1/5pp1/8/8/8/8/8/R5K1 w - - 0 1", 1).is_none());
}
