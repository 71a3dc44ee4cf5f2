use std::collections::HashMap;

use crate::attacks::*;
use crate::bitboard::Bitboard;
use crate::types::*;
use crate::zobrist::{MAX_POCKET, ZOBRIST};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    pub fn king_side(self, c: Color) -> bool {
        match c {
            Color::White => self.wk,
            Color::Black => self.bk,
        }
    }

    pub fn queen_side(self, c: Color) -> bool {
        match c {
            Color::White => self.wq,
            Color::Black => self.bq,
        }
    }

    pub fn clear(&mut self, c: Color) {
        match c {
            Color::White => {
                self.wk = false;
                self.wq = false;
            }
            Color::Black => {
                self.bk = false;
                self.bq = false;
            }
        }
    }

    /// Drop the right tied to a rook's home corner.
    pub fn clear_corner(&mut self, sq: u8) {
        match sq {
            0 => self.wq = false,
            7 => self.wk = false,
            56 => self.bq = false,
            63 => self.bk = false,
            _ => {}
        }
    }

    /// Flags in [wk, wq, bk, bq] order.
    pub fn flags(self) -> [bool; 4] {
        [self.wk, self.wq, self.bk, self.bq]
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    fn hash(self) -> u64 {
        let mut h = 0;
        for (i, on) in self.flags().into_iter().enumerate() {
            if on {
                h ^= ZOBRIST.castling_key(i);
            }
        }
        h
    }
}

/// Per-color counts of droppable pieces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pocket {
    counts: [[u8; 5]; 2],
}

impl Pocket {
    #[inline]
    pub fn count(&self, c: Color, kind: PieceKind) -> u8 {
        match kind {
            PieceKind::King => 0,
            _ => self.counts[c.idx()][kind.idx()],
        }
    }

    pub fn is_empty(&self, c: Color) -> bool {
        self.counts[c.idx()].iter().all(|&n| n == 0)
    }

    pub fn total(&self, c: Color) -> u32 {
        self.counts[c.idx()].iter().map(|&n| n as u32).sum()
    }

    /// Droppable kinds `c` currently holds.
    pub fn kinds(&self, c: Color) -> impl Iterator<Item = PieceKind> + '_ {
        PieceKind::DROPPABLE
            .into_iter()
            .filter(move |&k| self.count(c, k) > 0)
    }
}

/// One bitboard per (color, kind) plus per-color unions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitboards {
    pieces: [[Bitboard; 6]; 2],
    colors: [Bitboard; 2],
}

impl Bitboards {
    #[inline(always)]
    pub fn pieces(&self, c: Color, kind: PieceKind) -> Bitboard {
        self.pieces[c.idx()][kind.idx()]
    }

    #[inline(always)]
    pub fn color(&self, c: Color) -> Bitboard {
        self.colors[c.idx()]
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// Pieces of `kind` of either color.
    #[inline(always)]
    pub fn kind(&self, kind: PieceKind) -> Bitboard {
        self.pieces[0][kind.idx()] | self.pieces[1][kind.idx()]
    }

    /// Bishops and queens of `c`.
    #[inline(always)]
    pub fn diagonal_sliders(&self, c: Color) -> Bitboard {
        self.pieces(c, PieceKind::Bishop) | self.pieces(c, PieceKind::Queen)
    }

    /// Rooks and queens of `c`.
    #[inline(always)]
    pub fn orthogonal_sliders(&self, c: Color) -> Bitboard {
        self.pieces(c, PieceKind::Rook) | self.pieces(c, PieceKind::Queen)
    }

    #[inline(always)]
    fn toggle(&mut self, piece: Piece, sq: u8) {
        let bb = Bitboard::from_square(sq);
        self.pieces[piece.color.idx()][piece.kind.idx()] ^= bb;
        self.colors[piece.color.idx()] ^= bb;
    }
}

/// Optional draw conditions on top of stalemate and fivefold repetition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawRules {
    /// Bare kings with empty pockets.
    pub insufficient_material: bool,
    /// 150 half-moves without a capture, pawn move or drop.
    pub seventy_five_moves: bool,
}

/// State needed to take back one move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Undo {
    pub mv: Move,
    pub captured: Option<Occupant>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub key: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Occupant>; 64],
    bitboards: Bitboards,
    pocket: Pocket,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<u8>, // square behind a pawn that just advanced 2
    halfmove_clock: u32,
    fullmove_number: u32,
    /// Pieces, pockets and side to move; the repetition signature.
    key: u64,
    history: Vec<Undo>,
    repetitions: HashMap<u64, u32>,
    draw_rules: DrawRules,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub(crate) fn empty() -> Self {
        Position {
            board: [None; 64],
            bitboards: Bitboards::default(),
            pocket: Pocket::default(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            key: 0,
            history: Vec::new(),
            repetitions: HashMap::new(),
            draw_rules: DrawRules::default(),
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            let f = f as u8;
            p.board[f as usize] = Some(Occupant::native(Piece::new(Color::White, kind)));
            p.board[(56 + f) as usize] = Some(Occupant::native(Piece::new(Color::Black, kind)));
            p.board[(8 + f) as usize] =
                Some(Occupant::native(Piece::new(Color::White, PieceKind::Pawn)));
            p.board[(48 + f) as usize] =
                Some(Occupant::native(Piece::new(Color::Black, PieceKind::Pawn)));
        }
        p.castling = CastlingRights::ALL;
        p.finish_setup();
        p
    }

    // -------------------------------------------------------------------------
    // Setup helpers (used by the FEN parser)
    // -------------------------------------------------------------------------

    pub(crate) fn setup_square(&mut self, sq: u8, occupant: Option<Occupant>) {
        self.board[sq as usize] = occupant;
    }

    pub(crate) fn setup_pocket(&mut self, c: Color, kind: PieceKind, count: u8) {
        self.pocket.counts[c.idx()][kind.idx()] = count;
    }

    pub(crate) fn setup_state(
        &mut self,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<u8>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) {
        self.side_to_move = side_to_move;
        self.castling = castling;
        self.en_passant = en_passant;
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    /// Rebuild bitboards and keys from the mailbox and start a fresh
    /// repetition table with the current position counted once.
    pub(crate) fn finish_setup(&mut self) {
        let mut bitboards = Bitboards::default();
        for sq in 0..64u8 {
            if let Some(occ) = self.board[sq as usize] {
                bitboards.toggle(occ.piece, sq);
            }
        }
        self.bitboards = bitboards;
        self.key = self.compute_key();
        self.history.clear();
        self.repetitions.clear();
        self.repetitions.insert(self.key, 1);
    }

    fn compute_key(&self) -> u64 {
        let mut key = 0u64;
        for sq in 0..64u8 {
            if let Some(occ) = self.board[sq as usize] {
                key ^= ZOBRIST.piece_key(occ.piece, sq);
            }
        }
        for c in Color::ALL {
            for kind in PieceKind::DROPPABLE {
                key ^= ZOBRIST.pocket_key(c, kind, self.pocket.count(c, kind));
            }
        }
        if self.side_to_move == Color::Black {
            key ^= ZOBRIST.side_to_move;
        }
        key
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn occupant_at(&self, sq: u8) -> Option<Occupant> {
        self.board[sq as usize]
    }

    #[inline]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize].map(|o| o.piece)
    }

    #[inline]
    pub fn is_promoted(&self, sq: u8) -> bool {
        matches!(self.board[sq as usize], Some(o) if o.origin == Origin::Promoted)
    }

    #[inline]
    pub fn bitboards(&self) -> &Bitboards {
        &self.bitboards
    }

    #[inline]
    pub fn pocket(&self) -> &Pocket {
        &self.pocket
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<u8> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Moves applied since the position was set up.
    pub fn history(&self) -> &[Undo] {
        &self.history
    }

    pub fn draw_rules(&self) -> DrawRules {
        self.draw_rules
    }

    pub fn set_draw_rules(&mut self, rules: DrawRules) {
        self.draw_rules = rules;
    }

    /// Zobrist key over pieces, pockets and side to move.
    #[inline]
    pub fn repetition_key(&self) -> u64 {
        self.key
    }

    /// Full position hash: the repetition key plus castling rights and en passant.
    pub fn hash(&self) -> u64 {
        let ep = self
            .en_passant
            .map_or(0, |sq| ZOBRIST.ep_key(file_of(sq) as u8));
        self.key ^ self.castling.hash() ^ ep
    }

    /// How many times the current signature has occurred on this game path.
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.get(&self.key).copied().unwrap_or(0)
    }

    /// Search-tree key: the full hash distinguished by repetition count.
    pub fn fingerprint(&self) -> u64 {
        self.hash() ^ ZOBRIST.repetition_key(self.repetition_count())
    }

    pub fn king_sq(&self, c: Color) -> u8 {
        match self.bitboards.pieces(c, PieceKind::King).lsb() {
            Some(sq) => sq,
            None => panic!("no {c:?} king on the board"),
        }
    }

    // -------------------------------------------------------------------------
    // Attacks
    // -------------------------------------------------------------------------

    /// Pieces of both colors attacking `sq` given `occupied` as blockers.
    pub fn attackers_to(&self, sq: u8, occupied: Bitboard) -> Bitboard {
        let bb = &self.bitboards;
        (pawn_attacks(sq, Color::White) & bb.pieces(Color::Black, PieceKind::Pawn))
            | (pawn_attacks(sq, Color::Black) & bb.pieces(Color::White, PieceKind::Pawn))
            | (knight_attacks(sq) & bb.kind(PieceKind::Knight))
            | (king_attacks(sq) & bb.kind(PieceKind::King))
            | (bishop_attacks(sq, occupied)
                & (bb.kind(PieceKind::Bishop) | bb.kind(PieceKind::Queen)))
            | (rook_attacks(sq, occupied) & (bb.kind(PieceKind::Rook) | bb.kind(PieceKind::Queen)))
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        (self.attackers_to(target, self.bitboards.occupied()) & self.bitboards.color(by)).any()
    }

    pub fn in_check(&self, c: Color) -> bool {
        self.is_square_attacked(self.king_sq(c), c.other())
    }

    /// Enemy pieces giving check to the side to move.
    pub fn checkers(&self) -> Bitboard {
        let us = self.side_to_move;
        self.attackers_to(self.king_sq(us), self.bitboards.occupied())
            & self.bitboards.color(us.other())
    }

    // -------------------------------------------------------------------------
    // Apply / undo
    // -------------------------------------------------------------------------

    #[inline]
    fn put(&mut self, sq: u8, occupant: Occupant) {
        self.board[sq as usize] = Some(occupant);
        self.bitboards.toggle(occupant.piece, sq);
        self.key ^= ZOBRIST.piece_key(occupant.piece, sq);
    }

    #[inline]
    fn remove(&mut self, sq: u8) -> Occupant {
        let Some(occupant) = self.board[sq as usize].take() else {
            panic!("no piece on {}", sq_to_coord(sq));
        };
        self.bitboards.toggle(occupant.piece, sq);
        self.key ^= ZOBRIST.piece_key(occupant.piece, sq);
        occupant
    }

    fn pocket_add(&mut self, c: Color, kind: PieceKind) {
        let slot = &mut self.pocket.counts[c.idx()][kind.idx()];
        let old = *slot;
        let new = old + 1;
        debug_assert!(new as usize <= MAX_POCKET, "pocket holds more than the game's material");
        *slot = new;
        self.key ^= ZOBRIST.pocket_key(c, kind, old) ^ ZOBRIST.pocket_key(c, kind, new);
    }

    fn pocket_remove(&mut self, c: Color, kind: PieceKind) {
        let slot = &mut self.pocket.counts[c.idx()][kind.idx()];
        let old = *slot;
        debug_assert!(old > 0, "dropping a {kind:?} that is not in the pocket");
        let new = old.saturating_sub(1);
        *slot = new;
        self.key ^= ZOBRIST.pocket_key(c, kind, old) ^ ZOBRIST.pocket_key(c, kind, new);
    }

    /// Apply a legal move. The move must come from the legal generator (or be
    /// matched against it); it is not validated here.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let mut undo = Undo {
            mv,
            captured: None,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            key: self.key,
        };
        self.en_passant = None;

        let irreversible = match mv.kind {
            MoveKind::Drop(kind) => {
                self.pocket_remove(us, kind);
                self.put(mv.to, Occupant::native(Piece::new(us, kind)));
                true
            }
            MoveKind::CastleKing | MoveKind::CastleQueen => {
                let (rook_from, rook_to) = castle_rook_squares(mv);
                let king = self.remove(mv.from);
                let rook = self.remove(rook_from);
                self.put(mv.to, king);
                self.put(rook_to, rook);
                self.castling.clear(us);
                false
            }
            _ => {
                let mover = self.remove(mv.from);
                let captured = match mv.kind {
                    MoveKind::EnPassant => Some(self.remove(en_passant_victim(mv.to, us))),
                    MoveKind::Capture | MoveKind::PromotionCapture(_) => Some(self.remove(mv.to)),
                    _ => None,
                };
                if let Some(cap) = captured {
                    self.pocket_add(us, cap.pocket_kind());
                    self.castling.clear_corner(mv.to);
                }
                undo.captured = captured;

                let placed = match mv.promotion() {
                    Some(kind) => Occupant {
                        piece: Piece::new(us, kind),
                        origin: Origin::Promoted,
                    },
                    None => mover,
                };
                self.put(mv.to, placed);

                match mover.piece.kind {
                    PieceKind::King => self.castling.clear(us),
                    PieceKind::Rook => self.castling.clear_corner(mv.from),
                    _ => {}
                }
                if mv.kind == MoveKind::DoublePush {
                    self.en_passant = Some((mv.from + mv.to) / 2);
                }
                mover.piece.kind == PieceKind::Pawn || captured.is_some()
            }
        };

        self.halfmove_clock = if irreversible {
            0
        } else {
            self.halfmove_clock + 1
        };
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = us.other();
        self.key ^= ZOBRIST.side_to_move;

        *self.repetitions.entry(self.key).or_insert(0) += 1;
        self.history.push(undo);
    }

    /// Take back `mv`, which must be the most recently applied move.
    pub fn unmake_move(&mut self, mv: Move) {
        let Some(undo) = self.history.pop() else {
            panic!("unmake_move without a matching make_move");
        };
        debug_assert_eq!(undo.mv, mv, "moves must be undone in LIFO order");

        if let Some(count) = self.repetitions.get_mut(&self.key) {
            *count -= 1;
            if *count == 0 {
                self.repetitions.remove(&self.key);
            }
        }

        self.key ^= ZOBRIST.side_to_move;
        self.side_to_move = self.side_to_move.other();
        let us = self.side_to_move;

        match mv.kind {
            MoveKind::Drop(kind) => {
                self.remove(mv.to);
                self.pocket_add(us, kind);
            }
            MoveKind::CastleKing | MoveKind::CastleQueen => {
                let (rook_from, rook_to) = castle_rook_squares(mv);
                let king = self.remove(mv.to);
                let rook = self.remove(rook_to);
                self.put(mv.from, king);
                self.put(rook_from, rook);
            }
            _ => {
                let placed = self.remove(mv.to);
                let mover = match mv.promotion() {
                    Some(_) => Occupant::native(Piece::new(us, PieceKind::Pawn)),
                    None => placed,
                };
                self.put(mv.from, mover);
                if let Some(cap) = undo.captured {
                    self.pocket_remove(us, cap.pocket_kind());
                    let sq = if mv.kind == MoveKind::EnPassant {
                        en_passant_victim(mv.to, us)
                    } else {
                        mv.to
                    };
                    self.put(sq, cap);
                }
            }
        }

        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        debug_assert_eq!(self.key, undo.key);
    }

    /// Whether `mv` leaves the opponent in check.
    pub fn gives_check(&mut self, mv: Move) -> bool {
        self.make_move(mv);
        let check = self.in_check(self.side_to_move);
        self.unmake_move(mv);
        check
    }

    /// Whether the moved (or dropped) piece attacks two or more enemy pieces
    /// after `mv`.
    pub fn gives_fork(&mut self, mv: Move) -> bool {
        self.make_move(mv);
        let them = self.side_to_move;
        let fork = match self.piece_at(mv.to) {
            Some(p) => {
                let attacks = piece_attacks(p.kind, p.color, mv.to, self.bitboards.occupied());
                (attacks & self.bitboards.color(them)).more_than_one()
            }
            None => false,
        };
        self.unmake_move(mv);
        fork
    }
}

/// Rook (from, to) for a castling move.
fn castle_rook_squares(mv: Move) -> (u8, u8) {
    match mv.kind {
        MoveKind::CastleQueen => (mv.to - 2, mv.to + 1),
        _ => (mv.to + 1, mv.to - 1),
    }
}

/// Square of the pawn captured en passant by `mover` landing on `to`.
fn en_passant_victim(to: u8, mover: Color) -> u8 {
    match mover {
        Color::White => to - 8,
        Color::Black => to + 8,
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
