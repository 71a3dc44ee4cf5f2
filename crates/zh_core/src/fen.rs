//! FEN reading and writing with crazyhouse extensions.
//!
//! Pockets follow the board either in brackets (`.../RNBQKBNR[Qp] w ...`) or
//! as a ninth slash-separated section (`.../RNBQKBNR/Qp w ...`). A `~` after a
//! piece letter marks a promoted piece. Missing castling, en-passant and clock
//! fields default to `-`, `-`, `0` and `1`.

use crate::bitboard::Bitboard;
use crate::board::{CastlingRights, Position};
use crate::error::FenError;
use crate::types::*;
use crate::zobrist::MAX_POCKET;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[] w KQkq - 0 1";

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let (board_part, pocket_part) = split_pocket(parts[0])?;
        let mut pos = Position::empty();

        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            let mut last: Option<u8> = None;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                    last = None;
                } else if ch == '~' {
                    let Some(s) = last else {
                        return Err(FenError::PieceChar(ch));
                    };
                    if let Some(occ) = pos.occupant_at(s) {
                        pos.setup_square(
                            s,
                            Some(Occupant {
                                piece: occ.piece,
                                origin: Origin::Promoted,
                            }),
                        );
                    }
                } else {
                    let piece = Piece::from_char(ch).ok_or(FenError::PieceChar(ch))?;
                    let s = sq(file, rank).ok_or(FenError::RankWidth {
                        rank: rank_idx,
                        files: file as usize + 1,
                    })?;
                    pos.setup_square(s, Some(Occupant::native(piece)));
                    last = Some(s);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth {
                    rank: rank_idx,
                    files: file.max(0) as usize,
                });
            }
        }

        if let Some(pocket) = pocket_part {
            let mut counts = [[0usize; 5]; 2];
            for ch in pocket.chars().filter(|&c| c != '-') {
                let piece = Piece::from_char(ch).ok_or(FenError::PocketChar(ch))?;
                if piece.kind == PieceKind::King {
                    return Err(FenError::PocketChar(ch));
                }
                let slot = &mut counts[piece.color.idx()][piece.kind.idx()];
                *slot += 1;
                if *slot > MAX_POCKET {
                    return Err(FenError::PocketOverflow);
                }
            }
            for c in Color::ALL {
                for kind in PieceKind::DROPPABLE {
                    pos.setup_pocket(c, kind, counts[c.idx()][kind.idx()] as u8);
                }
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let mut castling = CastlingRights::NONE;
        let castle_part = parts.get(2).copied().unwrap_or("-");
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(FenError::CastlingChar(c)),
                }
            }
        }
        let castling = sanitize_castling(&pos, castling);

        let ep_part = parts.get(3).copied().unwrap_or("-");
        let en_passant = if ep_part == "-" {
            None
        } else {
            match coord_to_sq(ep_part) {
                Some(s) if rank_of(s) == 2 || rank_of(s) == 5 => Some(s),
                _ => return Err(FenError::EnPassant(ep_part.to_string())),
            }
        };

        let halfmove_clock = parse_counter(parts.get(4).copied().unwrap_or("0"))?;
        let fullmove_number = parse_counter(parts.get(5).copied().unwrap_or("1"))?.max(1);

        pos.setup_state(
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        );
        validate_pieces(&pos)?;
        pos.finish_setup();
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                let Some(s) = sq(file, rank) else { continue };
                match self.occupant_at(s) {
                    Some(occ) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(occ.piece.to_char());
                        if occ.origin == Origin::Promoted {
                            out.push('~');
                        }
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push('[');
        for c in Color::ALL {
            for kind in PieceKind::DROPPABLE.iter().rev() {
                let ch = Piece::new(c, *kind).to_char();
                for _ in 0..self.pocket().count(c, *kind) {
                    out.push(ch);
                }
            }
        }
        out.push(']');

        out.push(' ');
        out.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights = self.castling();
        if rights.is_empty() {
            out.push('-');
        } else {
            for (on, ch) in rights.flags().into_iter().zip(['K', 'Q', 'k', 'q']) {
                if on {
                    out.push(ch);
                }
            }
        }

        out.push(' ');
        match self.en_passant() {
            Some(s) => out.push_str(&sq_to_coord(s)),
            None => out.push('-'),
        }

        out.push_str(&format!(
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        ));
        out
    }
}

/// Split the board field into the placement and optional pocket sections.
fn split_pocket(field: &str) -> Result<(&str, Option<&str>), FenError> {
    if let Some(open) = field.find('[') {
        let pocket = field[open + 1..].trim_end_matches(']');
        return Ok((&field[..open], Some(pocket)));
    }
    let sections = field.matches('/').count();
    match sections {
        8 => match field.rfind('/') {
            Some(last) => Ok((&field[..last], Some(&field[last + 1..]))),
            None => Ok((field, None)),
        },
        _ => Ok((field, None)),
    }
}

fn parse_counter(txt: &str) -> Result<u32, FenError> {
    txt.parse().map_err(|_| FenError::Counter(txt.to_string()))
}

/// Keep only the castling rights whose king and rook stand on their home squares.
fn sanitize_castling(pos: &Position, mut rights: CastlingRights) -> CastlingRights {
    let at = |s: u8, c: Color, kind: PieceKind| pos.piece_at(s) == Some(Piece::new(c, kind));
    if !at(4, Color::White, PieceKind::King) {
        rights.clear(Color::White);
    }
    if !at(60, Color::Black, PieceKind::King) {
        rights.clear(Color::Black);
    }
    for corner in [0u8, 7, 56, 63] {
        let color = if corner < 8 { Color::White } else { Color::Black };
        if !at(corner, color, PieceKind::Rook) {
            rights.clear_corner(corner);
        }
    }
    rights
}

fn validate_pieces(pos: &Position) -> Result<(), FenError> {
    let mut kings = [0u32; 2];
    let mut material = Color::ALL
        .into_iter()
        .map(|c| pos.pocket().total(c) as usize)
        .sum::<usize>();
    let mut pawns_on_back_rank = false;
    for s in 0..64u8 {
        if let Some(p) = pos.piece_at(s) {
            match p.kind {
                PieceKind::King => kings[p.color.idx()] += 1,
                PieceKind::Pawn if Bitboard::BACK_RANKS.contains(s) => {
                    pawns_on_back_rank = true;
                    material += 1;
                }
                _ => material += 1,
            }
        }
    }
    if material > MAX_POCKET {
        return Err(FenError::PocketOverflow);
    }
    if kings != [1, 1] {
        return Err(FenError::KingCount);
    }
    if pawns_on_back_rank {
        return Err(FenError::PawnOnBackRank);
    }
    Ok(())
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
