use crate::{board::Position, error::MoveParseError, movegen::legal_moves, types::*};

/// Coordinate notation: `e2e4`, `e7e8q`, and `N@f3` for drops.
pub fn move_to_uci(mv: Move) -> String {
    if let Some(kind) = mv.dropped() {
        return format!(
            "{}@{}",
            kind.to_char().to_ascii_uppercase(),
            sq_to_coord(mv.to)
        );
    }
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promotion() {
        s.push(p.to_char());
    }
    s
}

/// Parse coordinate notation and match it against the legal moves, so the
/// returned move carries the right kind (castle, en passant, capture, ...).
pub fn parse_uci_move(pos: &Position, txt: &str) -> Result<Move, MoveParseError> {
    let legals = legal_moves(pos);

    if let Some((piece, square)) = txt.split_once('@') {
        let mut chars = piece.chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c),
            _ => None,
        }
        .ok_or_else(|| MoveParseError::Piece(txt.to_string()))?;
        let to = coord_to_sq(square).ok_or_else(|| MoveParseError::Square(txt.to_string()))?;
        return legals
            .into_iter()
            .find(|m| m.dropped() == Some(kind) && m.to == to)
            .ok_or_else(|| MoveParseError::Illegal(txt.to_string()));
    }

    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return Err(MoveParseError::Length(txt.to_string()));
    }
    let from = coord_to_sq(&txt[0..2]).ok_or_else(|| MoveParseError::Square(txt.to_string()))?;
    let to = coord_to_sq(&txt[2..4]).ok_or_else(|| MoveParseError::Square(txt.to_string()))?;
    let promo = match txt[4..].chars().next() {
        Some(c) => match PieceKind::from_char(c) {
            Some(k) if PieceKind::PROMOTIONS.contains(&k) => Some(k),
            _ => return Err(MoveParseError::Piece(txt.to_string())),
        },
        None => None,
    };

    legals
        .into_iter()
        .find(|m| !m.is_drop() && m.from == from && m.to == to && m.promotion() == promo)
        .ok_or_else(|| MoveParseError::Illegal(txt.to_string()))
}

/// Apply a `position` command's arguments:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
///
/// On error the position is left as it was before the failing move.
pub fn set_position_from_uci(pos: &mut Position, args: &[&str]) -> Result<(), MoveParseError> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let setup = &args[..moves_at.unwrap_or(args.len())];

    *pos = match setup.first() {
        Some(&"fen") => Position::from_fen(&setup[1..].join(" "))?,
        _ => Position::startpos(),
    };

    if let Some(i) = moves_at {
        for txt in &args[i + 1..] {
            let mv = parse_uci_move(pos, txt)?;
            pos.make_move(mv);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
