//! Standard algebraic notation for game records.

use crate::board::Position;
use crate::movegen::legal_moves;
use crate::types::*;

/// SAN for a legal move in `pos`: `Nbd7`, `exd5`, `e8=Q+`, `O-O`, `N@f3#`.
pub fn move_to_san(pos: &mut Position, mv: Move) -> String {
    let mut san = match mv.kind {
        MoveKind::CastleKing => "O-O".to_string(),
        MoveKind::CastleQueen => "O-O-O".to_string(),
        MoveKind::Drop(kind) => format!(
            "{}@{}",
            kind.to_char().to_ascii_uppercase(),
            sq_to_coord(mv.to)
        ),
        _ => board_move_san(pos, mv),
    };

    pos.make_move(mv);
    if pos.in_check(pos.side_to_move()) {
        san.push(if legal_moves(pos).is_empty() { '#' } else { '+' });
    }
    pos.unmake_move(mv);
    san
}

fn board_move_san(pos: &Position, mv: Move) -> String {
    let Some(piece) = pos.piece_at(mv.from) else {
        return crate::uci::move_to_uci(mv);
    };
    let mut san = String::new();
    let target = sq_to_coord(mv.to);

    if piece.kind == PieceKind::Pawn {
        if mv.is_capture() {
            san.push((b'a' + file_of(mv.from) as u8) as char);
            san.push('x');
        }
        san.push_str(&target);
        if let Some(promo) = mv.promotion() {
            san.push('=');
            san.push(promo.to_char().to_ascii_uppercase());
        }
        return san;
    }

    san.push(piece.kind.to_char().to_ascii_uppercase());

    // Other pieces of the same kind that could also reach the target
    let rivals: Vec<u8> = legal_moves(pos)
        .into_iter()
        .filter(|m| {
            !m.is_drop()
                && m.to == mv.to
                && m.from != mv.from
                && pos.piece_at(m.from) == Some(piece)
        })
        .map(|m| m.from)
        .collect();
    if !rivals.is_empty() {
        let same_file = rivals.iter().any(|&s| file_of(s) == file_of(mv.from));
        let same_rank = rivals.iter().any(|&s| rank_of(s) == rank_of(mv.from));
        let coord = sq_to_coord(mv.from);
        if !same_file {
            san.push_str(&coord[..1]);
        } else if !same_rank {
            san.push_str(&coord[1..]);
        } else {
            san.push_str(&coord);
        }
    }

    if mv.is_capture() {
        san.push('x');
    }
    san.push_str(&target);
    san
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uci::parse_uci_move;

    fn san_of(fen: &str, uci: &str) -> String {
        let mut pos = Position::from_fen(fen).unwrap();
        let mv = parse_uci_move(&pos, uci).unwrap();
        move_to_san(&mut pos, mv)
    }

    #[test]
    fn test_pawn_and_piece_moves() {
        let start = crate::fen::STARTPOS_FEN;
        assert_eq!(san_of(start, "e2e4"), "e4");
        assert_eq!(san_of(start, "g1f3"), "Nf3");
    }

    #[test]
    fn test_drop_with_mate() {
        let fen = "6k1/5ppp/8/8/8/8/8/R5K1[] w - - 0 1";
        assert_eq!(san_of(fen, "a1a8"), "Ra8#");
        let fen = "4k3/8/8/8/8/8/8/4K3[N] w - - 0 1";
        assert_eq!(san_of(fen, "N@f6"), "N@f6+");
    }

    #[test]
    fn test_disambiguation_by_file() {
        let fen = "4k3/8/8/8/8/8/4K3/R6R w - - 0 1";
        assert_eq!(san_of(fen, "a1d1"), "Rad1");
        assert_eq!(san_of(fen, "h1h8"), "Rh8+");
    }

    #[test]
    fn test_promotion_capture() {
        let fen = "1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        assert_eq!(san_of(fen, "a7b8q"), "axb8=Q+");
    }

    #[test]
    fn test_castling() {
        let fen = "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1";
        assert_eq!(san_of(fen, "e1g1"), "O-O");
        assert_eq!(san_of(fen, "e1c1"), "O-O-O");
    }
}
