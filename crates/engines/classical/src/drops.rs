//! Heuristic worth of a drop, as a fraction of the strongest prior.

use zh_core::{king_attacks, knight_attacks, relative_rank, Move, PieceKind, Position};

use crate::tables::{
    square_value, DROP_KING_DEFENSE_BONUS, DROP_KNIGHT_ATTACK_KING_BONUS, DROP_KNIGHT_RANK_BONUS,
    DROP_PAWN_LOCATION, DROP_ROOK_BACK_RANK_BONUS,
};

/// Score a drop for the side to move. Non-drops score 0.
///
/// Any piece landing next to its own king earns a defence bonus; pawns are
/// rewarded for landing deep, knights for eyeing the enemy king's ring or
/// sitting on the fifth rank, rooks for hitting the enemy back rank.
pub fn drop_score(pos: &Position, mv: Move) -> f64 {
    let Some(kind) = mv.dropped() else {
        return 0.0;
    };
    let us = pos.side_to_move();
    let them = us.other();
    let to = mv.to;

    let mut score = 0.0;
    if king_attacks(pos.king_sq(us)).contains(to) {
        score += DROP_KING_DEFENSE_BONUS;
    }

    match kind {
        PieceKind::Pawn => score += square_value(&DROP_PAWN_LOCATION, us, to),
        PieceKind::Knight => {
            if (king_attacks(pos.king_sq(them)) & knight_attacks(to)).any() {
                score += DROP_KNIGHT_ATTACK_KING_BONUS;
            }
            if relative_rank(us, to) == 4 {
                score += DROP_KNIGHT_RANK_BONUS;
            }
        }
        PieceKind::Rook => {
            if relative_rank(us, to) == 7 {
                score += DROP_ROOK_BACK_RANK_BONUS;
            }
        }
        PieceKind::Bishop | PieceKind::Queen | PieceKind::King => {}
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use zh_core::parse_uci_move;

    fn score(fen: &str, uci: &str) -> f64 {
        let pos = Position::from_fen(fen).unwrap();
        let mv = parse_uci_move(&pos, uci).unwrap();
        drop_score(&pos, mv)
    }

    #[test]
    fn test_pawn_drops_reward_depth() {
        let fen = "4k3/8/8/8/8/8/8/4K3[Pp] w - - 0 1";
        assert_eq!(score(fen, "P@a3"), 0.0);
        assert!((score(fen, "P@a7") - 0.20).abs() < 1e-9);
        let black = "4k3/8/8/8/8/8/8/4K3[Pp] b - - 0 1";
        assert!((score(black, "P@a2") - 0.20).abs() < 1e-9);
        assert!((score(black, "P@h4") - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_drop_next_to_own_king() {
        let fen = "4k3/8/8/8/8/8/8/4K3[B] w - - 0 1";
        assert!((score(fen, "B@d2") - DROP_KING_DEFENSE_BONUS).abs() < 1e-9);
        assert_eq!(score(fen, "B@a5"), 0.0);
    }

    #[test]
    fn test_knight_and_rook_drops() {
        let fen = "4k3/8/8/8/8/8/8/4K3[NR] w - - 0 1";
        // From f6 the knight covers d7 next to the black king
        assert!((score(fen, "N@f6") - DROP_KNIGHT_ATTACK_KING_BONUS).abs() < 1e-9);
        assert!((score(fen, "N@a5") - DROP_KNIGHT_RANK_BONUS).abs() < 1e-9);
        assert!((score(fen, "R@a8") - DROP_ROOK_BACK_RANK_BONUS).abs() < 1e-9);
        assert_eq!(score(fen, "R@a4"), 0.0);
    }

    #[test]
    fn test_board_moves_score_nothing() {
        let pos = Position::startpos();
        let mv = parse_uci_move(&pos, "e2e4").unwrap();
        assert_eq!(drop_score(&pos, mv), 0.0);
    }
}
