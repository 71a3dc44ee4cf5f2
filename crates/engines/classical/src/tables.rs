//! Evaluation constants in centipawns.
//!
//! Square tables are written from White's side, rank 1 first (a1 = index 0);
//! Black reads them through `mirror`.

use zh_core::{file_of, mirror, rank_of, Color};

// -----------------------------------------------------------------------------
// Material
// -----------------------------------------------------------------------------

/// Piece values on the board, P N B R Q K.
pub const BOARD_VALUE: [f64; 6] = [126.0, 254.0, 300.0, 302.0, 483.0, 0.0];
/// Piece values in the pocket, P N B R Q K.
pub const POCKET_VALUE: [f64; 6] = [103.0, 248.0, 238.0, 296.0, 447.0, 0.0];

pub const BISHOP_PAIR_BONUS: f64 = 20.0;
pub const KNIGHT_QUEEN_BONUS: f64 = 12.0;
pub const BISHOP_ROOK_BONUS: f64 = 10.0;
pub const KNIGHT_PAWN_BONUS: f64 = 4.8;

// -----------------------------------------------------------------------------
// Pawn structure
// -----------------------------------------------------------------------------

pub const DOUBLED_PAWN_PENALTY: [f64; 8] = [-20.0, -16.0, -16.0, -25.6, -25.6, -16.0, -16.0, -20.0];

/// Passed pawn bonuses by relative rank 2..7. `HI` applies when the enemy
/// has no pawns left, `LO` when all eight remain; counts in between are
/// interpolated.
pub const PASSED_HI_SUPPORTED: [f64; 6] = [14.8, 25.2, 50.0, 90.0, 140.0, 200.0];
pub const PASSED_HI_UNSUPPORTED: [f64; 6] = [10.0, 20.0, 30.0, 50.0, 90.0, 150.0];
pub const PASSED_LO_SUPPORTED: [f64; 6] = [14.8, 16.4, 23.6, 37.2, 87.2, 129.6];
pub const PASSED_LO_UNSUPPORTED: [f64; 6] = [13.6, 16.8, 14.8, 11.2, 10.0, 6.4];

/// `[supporters][stopped][half-open file]`
pub const ISOLATED_PAWN_PENALTY: [[[f64; 2]; 2]; 2] = [
    [[-12.0, -26.0], [-22.0, -36.0]],
    [[-4.0, -12.0], [-14.0, -22.0]],
];

// -----------------------------------------------------------------------------
// King safety
// -----------------------------------------------------------------------------

#[rustfmt::skip]
pub const KING_SQUARE_VULNERABILITY: [f64; 64] = [
     1.0,  0.0,  1.0,  3.0,  3.0,  1.0,  0.0,  1.0,
     2.0,  2.0,  3.0,  4.0,  4.0,  3.0,  2.0,  2.0,
     5.0,  6.0,  6.0,  8.0,  8.0,  6.0,  6.0,  5.0,
    10.0, 12.0, 14.0, 14.0, 14.0, 14.0, 12.0, 10.0,
    18.0, 18.0, 18.0, 18.0, 18.0, 18.0, 18.0, 18.0,
    24.0, 24.0, 24.0, 24.0, 24.0, 24.0, 24.0, 24.0,
    28.0, 28.0, 28.0, 28.0, 28.0, 28.0, 28.0, 28.0,
    32.0, 32.0, 32.0, 32.0, 32.0, 32.0, 32.0, 32.0,
];

/// Shelter penalty `[enemy pawn step][own pawn step]`, see `shelter_steps`.
pub const SHELTER_VULNERABILITY: [[f64; 4]; 4] = [
    [8.0, 1.0, 3.0, 6.0],
    [6.0, 0.0, 2.0, 3.0],
    [7.0, 0.0, 2.0, 3.0],
    [8.0, 1.0, 2.0, 4.0],
];

pub const EMPTY_SQUARE_PENALTY: f64 = 5.0;
pub const CHECK_PENALTY: f64 = 200.0;
pub const FULL_CASTLING_BONUS: f64 = 14.4;
pub const KING_SIDE_CASTLING_BONUS: f64 = 10.0;
pub const QUEEN_SIDE_CASTLING_BONUS: f64 = 7.2;

// -----------------------------------------------------------------------------
// Piece placement
// -----------------------------------------------------------------------------

#[rustfmt::skip]
pub const PAWN_SQUARE: [f64; 64] = [
     0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     4.0,  6.0,  2.0, -4.0, -6.0,  4.0,  8.0,  4.0,
    -2.0, -1.0,  0.0,  0.0,  0.0,  0.0, -1.0, -2.0,
    -2.0, -1.0,  0.0,  2.0,  2.0,  0.0, -1.0, -2.0,
     0.0,  0.0,  0.0,  3.0,  3.0,  0.0,  0.0,  0.0,
     0.0,  0.0,  0.0,  3.0,  3.0,  0.0,  0.0,  0.0,
     5.0,  6.0,  5.0,  5.0,  5.0,  5.0,  6.0,  5.0,
     0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
];

#[rustfmt::skip]
pub const ROOK_SQUARE: [f64; 64] = [
    1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0,
];

#[rustfmt::skip]
pub const QUEEN_SQUARE: [f64; 64] = [
    -16.0, -14.0, -10.0,  -4.0,  -8.0, -10.0, -14.0, -16.0,
    -12.0, -12.0, -10.0,  -8.0,  -8.0, -10.0, -12.0, -12.0,
    -20.0, -20.0, -20.0, -20.0, -20.0, -20.0, -20.0, -20.0,
    -20.0, -20.0, -20.0, -20.0, -20.0, -20.0, -20.0, -20.0,
    -20.0, -20.0, -20.0, -20.0, -20.0, -20.0, -20.0, -20.0,
    -20.0, -20.0, -20.0, -20.0, -20.0, -20.0, -20.0, -20.0,
    -10.0, -10.0, -10.0, -10.0, -10.0, -10.0, -10.0, -10.0,
    -10.0, -10.0, -10.0, -10.0, -10.0, -10.0, -10.0, -10.0,
];

#[rustfmt::skip]
pub const KING_SQUARE: [f64; 64] = [
      1.0,   2.0,   1.0,   0.0,   1.0,   0.0,   2.0,   1.0,
     -2.0,  -6.0, -11.0, -11.0, -11.0, -11.0,  -6.0,  -2.0,
    -10.0, -18.0, -25.0, -25.0, -25.0, -25.0, -25.0, -10.0,
    -18.0, -25.0, -35.0, -35.0, -35.0, -35.0, -25.0, -18.0,
    -25.0, -35.0, -35.0, -35.0, -35.0, -35.0, -35.0, -25.0,
    -25.0, -35.0, -35.0, -35.0, -35.0, -35.0, -35.0, -25.0,
    -18.0, -25.0, -25.0, -25.0, -25.0, -25.0, -25.0, -18.0,
    -10.0, -18.0, -25.0, -25.0, -25.0, -25.0, -18.0, -10.0,
];

/// Bonus by distance class (0 = closest) to the enemy king zone.
pub const KNIGHT_DISTANCE_BONUS: [f64; 8] = [6.4, 4.8, 3.2, 1.6, 0.0, -1.6, -3.2, -4.8];
pub const ROOK_DISTANCE_BONUS: [f64; 8] = [3.2, 2.4, 1.6, 0.8, 0.0, -0.8, -1.6, -2.4];
pub const QUEEN_DISTANCE_BONUS: [f64; 8] = [4.8, 3.6, 2.4, 1.2, 0.0, -1.2, -2.4, -3.6];

pub const STRONG_SQUARE_BONUS: f64 = 8.0;
pub const STRONG_CENTER_SQUARE_BONUS: f64 = 14.0;

pub const BISHOP_BLOCKED_PAWN_PENALTY: f64 = -6.0;
pub const BISHOP_WEAK_PAWN_BONUS: f64 = 8.0;

pub const ROOK_OPEN_FILE_BONUS: f64 = 10.0;
pub const ROOK_HALF_OPEN_FILE_BONUS: f64 = 6.0;
pub const ROOK_WEAK_PAWN_BONUS: f64 = 4.4;

// -----------------------------------------------------------------------------
// Board control
// -----------------------------------------------------------------------------

#[rustfmt::skip]
pub const CONTROL_BONUS: [f64; 64] = [
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 1.0, 3.0, 3.0, 3.0, 3.0, 1.0, 1.0,
    1.0, 1.0, 3.0, 3.0, 3.0, 3.0, 1.0, 1.0,
    2.0, 2.0, 4.0, 4.0, 4.0, 4.0, 2.0, 2.0,
    2.0, 2.0, 4.0, 4.0, 4.0, 4.0, 2.0, 2.0,
    2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0,
    2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0,
];

/// Bonus per attacked square.
pub const MOBILITY_BONUS: f64 = 1.0;

// -----------------------------------------------------------------------------
// Drop scoring (fractions of the best prior, not centipawns)
// -----------------------------------------------------------------------------

#[rustfmt::skip]
pub const DROP_PAWN_LOCATION: [f64; 64] = [
    0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00,
    0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00,
    0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00,
    0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00,
    0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05,
    0.10, 0.10, 0.10, 0.10, 0.10, 0.10, 0.10, 0.10,
    0.20, 0.20, 0.20, 0.20, 0.20, 0.20, 0.20, 0.20,
    0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00,
];

pub const DROP_KING_DEFENSE_BONUS: f64 = 0.25;
pub const DROP_KNIGHT_ATTACK_KING_BONUS: f64 = 0.10;
pub const DROP_KNIGHT_RANK_BONUS: f64 = 0.15;
pub const DROP_ROOK_BACK_RANK_BONUS: f64 = 0.20;

/// Read a White-oriented square table for `c`.
#[inline]
pub fn square_value(table: &[f64; 64], c: Color, sq: u8) -> f64 {
    match c {
        Color::White => table[sq as usize],
        Color::Black => table[mirror(sq) as usize],
    }
}

// -----------------------------------------------------------------------------
// King zones and distance classes
// -----------------------------------------------------------------------------

pub const KING_ZONES: usize = 8;

/// King zone of every square for a White king; Black mirrors it.
#[rustfmt::skip]
pub const KING_ZONE: [u8; 64] = [
    0, 0, 0, 1, 1, 2, 2, 2,
    0, 3, 3, 1, 1, 4, 4, 2,
    3, 3, 3, 3, 4, 4, 4, 4,
    5, 5, 5, 5, 6, 6, 6, 6,
    5, 5, 5, 5, 6, 6, 6, 6,
    7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7,
    7, 7, 7, 7, 7, 7, 7, 7,
];

/// Zone index of `c`'s king standing on `sq`.
#[inline]
pub fn king_zone(c: Color, sq: u8) -> usize {
    KING_ZONE[oriented(c, sq)] as usize
}

/// Distance classes from every square to every king zone of a White king.
/// Black zones are the vertical mirror, see `diamond_distance`.
pub struct ZoneDistances {
    /// Weighted towards files; used for knights and queens
    pub diamond: [[u8; 64]; KING_ZONES],
    /// The smaller of file and rank distance; used for rooks
    pub cross: [[u8; 64]; KING_ZONES],
}

const fn abs_diff(a: i8, b: i8) -> i32 {
    if a > b {
        (a - b) as i32
    } else {
        (b - a) as i32
    }
}

const fn min(a: i32, b: i32) -> i32 {
    if a < b {
        a
    } else {
        b
    }
}

const fn clamp_class(v: i32) -> u8 {
    if v < 0 {
        0
    } else if v > 7 {
        7
    } else {
        v as u8
    }
}

/// Brute force over all square pairs: the average weighted distance from a
/// square to the squares of each zone.
const fn build_zone_distances() -> ZoneDistances {
    let mut diamond = [[0u8; 64]; KING_ZONES];
    let mut cross = [[0u8; 64]; KING_ZONES];

    let mut zone = 0;
    while zone < KING_ZONES {
        let mut sq = 0u8;
        while sq < 64 {
            let (sx, sy) = (file_of(sq), rank_of(sq));
            let mut count = 0i32;
            let mut diamond_sum = 0i32;
            let mut cross_sum = 0i32;

            let mut s = 0u8;
            while s < 64 {
                if KING_ZONE[s as usize] as usize == zone {
                    let dx = abs_diff(sx, file_of(s));
                    let dy = abs_diff(sy, rank_of(s));
                    count += 1;
                    diamond_sum += 3 * dx + 2 * dy;
                    cross_sum += min(4 * dx, 3 * dy);
                }
                s += 1;
            }

            diamond[zone][sq as usize] = clamp_class(diamond_sum / (3 * count) - 1);
            cross[zone][sq as usize] = clamp_class(cross_sum / (2 * count));
            sq += 1;
        }
        zone += 1;
    }

    ZoneDistances { diamond, cross }
}

pub static ZONE_DISTANCES: ZoneDistances = build_zone_distances();

#[inline]
fn oriented(owner: Color, sq: u8) -> usize {
    match owner {
        Color::White => sq as usize,
        Color::Black => mirror(sq) as usize,
    }
}

/// Diamond distance class from `sq` to `zone` of `owner`'s king.
#[inline]
pub fn diamond_distance(owner: Color, zone: usize, sq: u8) -> usize {
    ZONE_DISTANCES.diamond[zone][oriented(owner, sq)] as usize
}

/// Cross distance class from `sq` to `zone` of `owner`'s king.
#[inline]
pub fn cross_distance(owner: Color, zone: usize, sq: u8) -> usize {
    ZONE_DISTANCES.cross[zone][oriented(owner, sq)] as usize
}
