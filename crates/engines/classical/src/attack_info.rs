//! Per-square attack and drop information for both colours.
//!
//! Rebuilt from scratch at the start of every evaluation; nothing is carried
//! between positions.

use zh_core::{pawn_attacks, piece_attacks, Bitboard, Color, PieceKind, Position};

/// What one colour can do to one square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquareInfo {
    /// Number of pieces attacking the square
    pub attackers: u8,
    /// Bit `kind.idx()` set when a piece of that kind attacks the square
    attacker_kinds: u8,
    /// Bit `kind.idx()` set when a piece of that kind could be dropped here
    drop_kinds: u8,
}

impl SquareInfo {
    #[inline]
    pub fn is_attacked(self) -> bool {
        self.attackers > 0
    }

    #[inline]
    pub fn attacked_by(self, kind: PieceKind) -> bool {
        self.attacker_kinds & (1 << kind.idx()) != 0
    }

    #[inline]
    pub fn droppable(self, kind: PieceKind) -> bool {
        self.drop_kinds & (1 << kind.idx()) != 0
    }

    fn add_attack(&mut self, kind: PieceKind) {
        self.attackers = self.attackers.saturating_add(1);
        self.attacker_kinds |= 1 << kind.idx();
    }

    fn add_drop(&mut self, kind: PieceKind) {
        self.drop_kinds |= 1 << kind.idx();
    }
}

/// Attack/drop info for every square, per colour.
#[derive(Debug, Clone)]
pub struct AttackInfo {
    squares: [[SquareInfo; 64]; 2],
}

impl AttackInfo {
    pub fn new(pos: &Position) -> Self {
        let mut squares = [[SquareInfo::default(); 64]; 2];
        let bb = pos.bitboards();
        let occupied = bb.occupied();
        let empty = !occupied;

        for c in Color::ALL {
            let table = &mut squares[c.idx()];
            for kind in PieceKind::ALL {
                for from in bb.pieces(c, kind) {
                    let targets = match kind {
                        PieceKind::Pawn => pawn_attacks(from, c),
                        _ => piece_attacks(kind, c, from, occupied),
                    };
                    for to in targets {
                        table[to as usize].add_attack(kind);
                    }
                }
            }

            for kind in PieceKind::DROPPABLE {
                if pos.pocket().count(c, kind) == 0 {
                    continue;
                }
                let targets = match kind {
                    PieceKind::Pawn => empty & !Bitboard::BACK_RANKS,
                    _ => empty,
                };
                for sq in targets {
                    table[sq as usize].add_drop(kind);
                }
            }
        }

        Self { squares }
    }

    #[inline]
    pub fn at(&self, c: Color, sq: u8) -> SquareInfo {
        self.squares[c.idx()][sq as usize]
    }

    /// Squares attacked by `c`.
    pub fn attacked(&self, c: Color) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for (sq, info) in self.squares[c.idx()].iter().enumerate() {
            if info.is_attacked() {
                bb.set(sq as u8);
            }
        }
        bb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_attack_counts() {
        let info = AttackInfo::new(&Position::startpos());
        // f3 is covered by the g1 knight and the e2 and g2 pawns
        let f3 = info.at(Color::White, 21);
        assert_eq!(f3.attackers, 3);
        assert!(f3.attacked_by(PieceKind::Knight));
        assert!(f3.attacked_by(PieceKind::Pawn));
        assert!(!f3.attacked_by(PieceKind::Bishop));
        assert!(!info.at(Color::Black, 21).is_attacked());
        assert_eq!(info.attacked(Color::White).popcount(), 22);
    }

    #[test]
    fn test_drop_squares_follow_pocket() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3[Pn] w - - 0 1").unwrap();
        let info = AttackInfo::new(&pos);
        assert!(info.at(Color::White, 20).droppable(PieceKind::Pawn));
        assert!(!info.at(Color::White, 0).droppable(PieceKind::Pawn));
        assert!(!info.at(Color::White, 20).droppable(PieceKind::Knight));
        assert!(info.at(Color::Black, 0).droppable(PieceKind::Knight));
        assert!(!info.at(Color::Black, 4).droppable(PieceKind::Knight));
    }
}
