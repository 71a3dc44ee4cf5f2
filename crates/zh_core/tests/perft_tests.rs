use std::time::Instant;

use rayon::prelude::*;

use zh_core::{perft, perft_divide, Position};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 1_000_000;

/// (FEN, [(depth, nodes)]). Up to depth 4 from the start position and depth 2
/// elsewhere no captured piece can be dropped yet, so the classic chess
/// numbers still hold.
const CASES: &[(&str, &[(u8, u64)])] = &[
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[(1, 20), (2, 400), (3, 8_902), (4, 197_281)],
    ),
    (
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[(1, 48), (2, 2_039)],
    ),
    ("8/2p5/3p4/KP5r/1R3p2/4P3/4k1P1/8 w - - 0 1", &[(1, 14), (2, 191)]),
    (
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[(1, 6), (2, 264)],
    ),
    (
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[(1, 44), (2, 1_486)],
    ),
    // Drops only
    ("4k3/8/8/8/8/8/8/4K3[Q] w - - 0 1", &[(1, 67)]),
    ("4k3/8/8/8/8/8/8/4K3[P] w - - 0 1", &[(1, 53)]),
];

#[test]
fn perft_reference_positions() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();

    CASES.par_iter().enumerate().for_each(|(idx, (fen, depths))| {
        let mut pos = Position::from_fen(fen).unwrap();
        for &(depth, expected) in depths.iter() {
            if !full && expected > NODE_LIMIT {
                continue;
            }
            let start = Instant::now();
            let nodes = perft(&mut pos, depth);
            assert_eq!(
                nodes, expected,
                "case {idx} depth {depth} ({fen}): expected {expected}, got {nodes} in {:?}",
                start.elapsed()
            );
        }
    });
}

#[test]
fn perft_leaves_position_untouched() {
    let mut pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R[Nn] w KQkq - 0 1",
    )
    .unwrap();
    let before = pos.clone();
    perft(&mut pos, 3);
    assert_eq!(pos, before);
}

#[test]
fn perft_divide_sums_to_total() {
    let mut pos = Position::startpos();
    let divide = perft_divide(&mut pos, 3);
    assert_eq!(divide.len(), 20);
    assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 8_902);
}
