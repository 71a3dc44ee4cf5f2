//! Hand-crafted crazyhouse evaluation.
//!
//! Five independent features, each switched on through an [`EvalFeatures`]
//! mask. Every feature is summed in centipawns from White's point of view,
//! turned to the side to move, then squashed onto the value scale of the
//! network ("Q", roughly -1..1) with [`cp_to_q`].

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};
use zh_core::{
    bishop_attacks, file_of, king_attacks, pawn_attacks, rank_of, relative_rank, sq, Bitboard,
    Color, PieceKind, Position,
};

use crate::attack_info::AttackInfo;
use crate::tables::*;

/// One evaluation feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalFeature {
    Material,
    PawnStructure,
    KingSafety,
    PiecePlacement,
    BoardControl,
}

impl EvalFeature {
    pub const ALL: [EvalFeature; 5] = [
        EvalFeature::Material,
        EvalFeature::PawnStructure,
        EvalFeature::KingSafety,
        EvalFeature::PiecePlacement,
        EvalFeature::BoardControl,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Suffix used by the line protocol (`Eval_<name>`).
    pub fn option_name(self) -> &'static str {
        match self {
            EvalFeature::Material => "Material",
            EvalFeature::PawnStructure => "PawnStructure",
            EvalFeature::KingSafety => "KingSafety",
            EvalFeature::PiecePlacement => "PiecePlacement",
            EvalFeature::BoardControl => "BoardControl",
        }
    }

    pub fn from_option_name(name: &str) -> Option<EvalFeature> {
        EvalFeature::ALL
            .into_iter()
            .find(|f| f.option_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for EvalFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option_name())
    }
}

/// Set of enabled evaluation features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EvalFeatures(u8);

impl EvalFeatures {
    pub const NONE: EvalFeatures = EvalFeatures(0);
    pub const ALL: EvalFeatures = EvalFeatures(0b1_1111);

    #[inline]
    pub fn contains(self, feature: EvalFeature) -> bool {
        self.0 & feature.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, feature: EvalFeature) {
        self.0 |= feature.bit();
    }

    #[inline]
    pub fn remove(&mut self, feature: EvalFeature) {
        self.0 &= !feature.bit();
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = EvalFeature> {
        EvalFeature::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl From<EvalFeature> for EvalFeatures {
    fn from(feature: EvalFeature) -> Self {
        EvalFeatures(feature.bit())
    }
}

impl FromIterator<EvalFeature> for EvalFeatures {
    fn from_iter<I: IntoIterator<Item = EvalFeature>>(iter: I) -> Self {
        let mut set = EvalFeatures::NONE;
        for f in iter {
            set.insert(f);
        }
        set
    }
}

impl<'a> FromIterator<&'a EvalFeature> for EvalFeatures {
    fn from_iter<I: IntoIterator<Item = &'a EvalFeature>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl BitOr for EvalFeatures {
    type Output = EvalFeatures;
    fn bitor(self, rhs: Self) -> Self {
        EvalFeatures(self.0 | rhs.0)
    }
}

impl BitOr<EvalFeature> for EvalFeatures {
    type Output = EvalFeatures;
    fn bitor(self, rhs: EvalFeature) -> Self {
        EvalFeatures(self.0 | rhs.bit())
    }
}

impl BitOrAssign<EvalFeature> for EvalFeatures {
    fn bitor_assign(&mut self, rhs: EvalFeature) {
        self.insert(rhs);
    }
}

/// Map a centipawn score onto the value scale.
#[inline]
pub fn cp_to_q(cp: f64) -> f64 {
    0.64018 * (0.00895 * cp).atan()
}

/// Map a value back to centipawns, for display.
#[inline]
pub fn q_to_cp(q: f64) -> i32 {
    (111.714640912 * (1.5620688421 * q).tan()) as i32
}

/// Feature-gated evaluator. Stateless between calls: the attack tables it
/// needs are rebuilt for every position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    features: EvalFeatures,
}

impl Evaluator {
    pub fn new(features: EvalFeatures) -> Self {
        Self { features }
    }

    pub fn features(&self) -> EvalFeatures {
        self.features
    }

    pub fn set_features(&mut self, features: EvalFeatures) {
        self.features = features;
    }

    /// Whether any feature is switched on.
    pub fn is_enabled(&self) -> bool {
        !self.features.is_empty()
    }

    /// Centipawns from the side to move's perspective.
    pub fn centipawns(&self, pos: &Position) -> f64 {
        if self.features.is_empty() {
            return 0.0;
        }
        let info = AttackInfo::new(pos);
        let terms = Terms { pos, info: &info };

        let mut cp = 0.0;
        for feature in self.features.iter() {
            cp += match feature {
                EvalFeature::Material => terms.both(Terms::material),
                EvalFeature::PawnStructure => terms.both(Terms::pawn_structure),
                EvalFeature::KingSafety => terms.both(Terms::king_safety),
                EvalFeature::PiecePlacement => terms.both(Terms::piece_placement),
                EvalFeature::BoardControl => terms.both(Terms::board_control),
            };
        }

        match pos.side_to_move() {
            Color::White => cp,
            Color::Black => -cp,
        }
    }

    /// Value in Q units from the side to move's perspective.
    pub fn evaluate(&self, pos: &Position) -> f32 {
        cp_to_q(self.centipawns(pos)) as f32
    }
}

// =============================================================================
// Feature terms
// =============================================================================

struct Terms<'a> {
    pos: &'a Position,
    info: &'a AttackInfo,
}

/// Squares strictly ahead of `from` on its file, seen from `c`.
fn forward_span(c: Color, from: u8) -> Bitboard {
    let step = if c == Color::White { 1 } else { -1 };
    let mut span = Bitboard::EMPTY;
    let mut rank = rank_of(from) + step;
    while let Some(s) = sq(file_of(from), rank) {
        span.set(s);
        rank += step;
    }
    span
}

/// The square directly in front of `from`, seen from `c`.
fn ahead(c: Color, from: u8) -> Option<u8> {
    let step = if c == Color::White { 1 } else { -1 };
    sq(file_of(from), rank_of(from) + step)
}

impl Terms<'_> {
    /// White's score minus Black's.
    fn both(&self, term: fn(&Self, Color) -> f64) -> f64 {
        term(self, Color::White) - term(self, Color::Black)
    }

    fn pieces(&self, c: Color, kind: PieceKind) -> Bitboard {
        self.pos.bitboards().pieces(c, kind)
    }

    fn count(&self, c: Color, kind: PieceKind) -> f64 {
        self.pieces(c, kind).popcount() as f64
    }

    fn material(&self, c: Color) -> f64 {
        let mut cp = 0.0;
        for kind in PieceKind::DROPPABLE {
            cp += BOARD_VALUE[kind.idx()] * self.count(c, kind);
            cp += POCKET_VALUE[kind.idx()] * self.pos.pocket().count(c, kind) as f64;
        }

        let bishops = self.pieces(c, PieceKind::Bishop);
        let light = (bishops & Bitboard::LIGHT_SQUARES).popcount();
        let dark = (bishops & Bitboard::DARK_SQUARES).popcount();
        cp += BISHOP_PAIR_BONUS * light.min(dark) as f64;

        let knights = self.count(c, PieceKind::Knight);
        if self.pieces(c, PieceKind::Queen).any() {
            cp += KNIGHT_QUEEN_BONUS * knights;
        }
        cp += BISHOP_ROOK_BONUS * self.count(c, PieceKind::Bishop).min(self.count(c, PieceKind::Rook));
        cp += KNIGHT_PAWN_BONUS * knights * self.count(c, PieceKind::Pawn);
        cp
    }

    fn pawn_structure(&self, c: Color) -> f64 {
        let them = c.other();
        let pawns = self.pieces(c, PieceKind::Pawn);
        let enemy = self.pieces(them, PieceKind::Pawn);
        let enemy_count = enemy.popcount() as f64;
        let mut cp = 0.0;

        for (file, mask) in Bitboard::FILES.iter().enumerate() {
            let on_file = pawns & *mask;
            if on_file.more_than_one() {
                cp += 0.5 * DOUBLED_PAWN_PENALTY[file];
            }

            // Only the most advanced pawn of a file can be passed
            let lead = match c {
                Color::White => on_file.msb(),
                Color::Black => on_file.lsb(),
            };
            let Some(lead) = lead else { continue };
            let front = forward_span(c, lead);
            if (front & enemy).any() {
                continue;
            }
            let mut guarded = Bitboard::EMPTY;
            for s in front {
                guarded |= pawn_attacks(s, c);
            }
            if (guarded & enemy).any() {
                continue;
            }

            let rank = (relative_rank(c, lead) - 1) as usize;
            let supported = self.info.at(c, lead).attacked_by(PieceKind::Pawn)
                && ahead(c, lead).is_some_and(|s| self.info.at(c, s).attacked_by(PieceKind::Pawn));
            let (hi, lo) = if supported {
                (PASSED_HI_SUPPORTED[rank], PASSED_LO_SUPPORTED[rank])
            } else {
                (PASSED_HI_UNSUPPORTED[rank], PASSED_LO_UNSUPPORTED[rank])
            };
            cp += hi - (hi - lo) / 8.0 * enemy_count;
        }

        for pawn in pawns {
            let here = Bitboard::from_square(pawn);
            let beside = here.east() | here.west();
            let behind = match c {
                Color::White => beside.south(),
                Color::Black => beside.north(),
            };
            let supporters = ((beside | behind) & pawns).popcount() as usize;
            if supporters >= 2 {
                continue;
            }
            let stopped = ahead(c, pawn).is_some_and(|s| enemy.contains(s)) as usize;
            let half_open = (forward_span(c, pawn) & enemy).is_empty() as usize;
            cp += ISOLATED_PAWN_PENALTY[supporters][stopped][half_open];
        }

        cp
    }

    /// (enemy step, own step) indices into the shelter table for one file.
    fn shelter_steps(&self, c: Color, file: usize) -> (usize, usize) {
        let mask = Bitboard::FILES[file];
        let own = self.pieces(c, PieceKind::Pawn) & mask;
        let enemy = self.pieces(c.other(), PieceKind::Pawn) & mask;

        let own_step = own
            .map(|s| relative_rank(c, s))
            .min()
            .map_or(0, |r| r.min(3) as usize);
        let enemy_step = enemy
            .map(|s| relative_rank(c, s))
            .max()
            .map_or(0, |r| (7 - r.max(4)) as usize);
        (enemy_step, own_step)
    }

    fn king_safety(&self, c: Color) -> f64 {
        let them = c.other();
        let king = self.pos.king_sq(c);
        let mut cp = -square_value(&KING_SQUARE_VULNERABILITY, c, king);

        let king_file = file_of(king) as usize;
        for file in king_file.saturating_sub(1)..=(king_file + 1).min(7) {
            let weight = if file == king_file { 2.0 } else { 1.0 };
            let (enemy_step, own_step) = self.shelter_steps(c, file);
            cp -= weight * SHELTER_VULNERABILITY[enemy_step][own_step];
        }

        let ring = king_attacks(king);
        let empty = !self.pos.bitboards().occupied();
        cp -= EMPTY_SQUARE_PENALTY * (ring & empty).popcount() as f64;

        for s in ring {
            let theirs = self.info.at(them, s);
            let net = theirs.attackers as i32 - self.info.at(c, s).attackers as i32;
            if net <= 0 {
                continue;
            }
            let weight: f64 = PieceKind::DROPPABLE
                .into_iter()
                .filter(|&k| theirs.attacked_by(k))
                .map(|k| BOARD_VALUE[k.idx()] / 100.0)
                .sum();
            cp -= net as f64 * weight;
        }

        if self.info.at(them, king).is_attacked() {
            cp -= CHECK_PENALTY;
        }

        let rights = self.pos.castling();
        cp += match (rights.king_side(c), rights.queen_side(c)) {
            (true, true) => FULL_CASTLING_BONUS,
            (true, false) => KING_SIDE_CASTLING_BONUS,
            (false, true) => QUEEN_SIDE_CASTLING_BONUS,
            (false, false) => 0.0,
        };
        cp
    }

    /// Outpost bonus: a piece in the enemy half that no enemy pawn can hit.
    fn strong_square(&self, c: Color, s: u8) -> f64 {
        let enemy_half = match c {
            Color::White => Bitboard::BLACK_HALF,
            Color::Black => Bitboard::WHITE_HALF,
        };
        if !enemy_half.contains(s) || self.info.at(c.other(), s).attacked_by(PieceKind::Pawn) {
            0.0
        } else if Bitboard::CENTER.contains(s) {
            STRONG_CENTER_SQUARE_BONUS
        } else {
            STRONG_SQUARE_BONUS
        }
    }

    fn piece_placement(&self, c: Color) -> f64 {
        let them = c.other();
        let occupied = self.pos.bitboards().occupied();
        let own_pawns = self.pieces(c, PieceKind::Pawn);
        let enemy_pawns = self.pieces(them, PieceKind::Pawn);
        let zone = king_zone(them, self.pos.king_sq(them));
        let mut cp = 0.0;

        for s in own_pawns {
            cp += square_value(&PAWN_SQUARE, c, s);
        }

        for s in self.pieces(c, PieceKind::Knight) {
            cp += KNIGHT_DISTANCE_BONUS[diamond_distance(them, zone, s)];
            cp += self.strong_square(c, s);
        }

        for s in self.pieces(c, PieceKind::Bishop) {
            cp += self.strong_square(c, s);
            let diagonals = bishop_attacks(s, occupied);
            for pawn in diagonals & own_pawns {
                if ahead(c, pawn).is_some_and(|a| occupied.contains(a)) {
                    cp += BISHOP_BLOCKED_PAWN_PENALTY;
                }
            }
            for pawn in diagonals & enemy_pawns {
                if !self.info.at(them, pawn).is_attacked() {
                    cp += BISHOP_WEAK_PAWN_BONUS;
                }
            }
        }

        for s in self.pieces(c, PieceKind::Rook) {
            cp += square_value(&ROOK_SQUARE, c, s);
            cp += ROOK_DISTANCE_BONUS[cross_distance(them, zone, s)];
            cp += self.strong_square(c, s);

            let file = Bitboard::FILES[file_of(s) as usize];
            let own = own_pawns & file;
            let enemy = enemy_pawns & file;
            // Enemy pawn closest to our side of the board
            let target = match c {
                Color::White => enemy.lsb(),
                Color::Black => enemy.msb(),
            };
            let weak = target.is_some_and(|p| !self.info.at(them, p).is_attacked());

            cp += match (own.any(), enemy.any()) {
                (false, false) => ROOK_OPEN_FILE_BONUS,
                (true, false) => ROOK_HALF_OPEN_FILE_BONUS,
                (false, true) => ROOK_HALF_OPEN_FILE_BONUS,
                (true, true) => 0.0,
            };
            if weak {
                cp += ROOK_WEAK_PAWN_BONUS;
            }
        }

        for s in self.pieces(c, PieceKind::Queen) {
            cp += square_value(&QUEEN_SQUARE, c, s);
            cp += QUEEN_DISTANCE_BONUS[diamond_distance(them, zone, s)];
            cp += self.strong_square(c, s);
        }

        cp + square_value(&KING_SQUARE, c, self.pos.king_sq(c))
    }

    fn board_control(&self, c: Color) -> f64 {
        let mut cp = 0.0;
        for s in self.pos.bitboards().color(c) {
            cp += square_value(&CONTROL_BONUS, c, s);
        }
        for s in 0..64u8 {
            cp += MOBILITY_BONUS * self.info.at(c, s).attackers as f64;
        }
        cp
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
