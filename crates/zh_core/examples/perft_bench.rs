//! Perft benchmark over drop-heavy positions, for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p zh_core -- [depth] [fen]
//!
//! Without a FEN every built-in position is walked at the given depth
//! (default 4). Drops blow the tree up quickly; depth 5 takes minutes.

use std::env;
use std::time::{Duration, Instant};

use zh_core::{perft, perft_divide, Position};

const POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[] w KQkq - 0 1",
    ),
    (
        "Open game, knights in hand",
        "r1bqk2r/pppp1ppp/2n5/2b1p3/2B1P3/5Q2/PPPP1PPP/RNB1K2R[Nn] w KQkq - 0 5",
    ),
    (
        "Kiwipete with pockets",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R[PBpb] w KQkq - 0 1",
    ),
    (
        "King hunt",
        "r1b2rk1/ppp2p1p/2n3p1/3q4/3P4/2P2N2/P4PPP/R2QR1K1[BNPbp] b - - 0 14",
    ),
];

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    match args.get(2) {
        Some(fen) => run_single(fen, depth),
        None => run_all(depth),
    }
}

fn run_single(fen: &str, depth: u8) {
    let mut pos = match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("bad FEN: {e}");
            std::process::exit(1);
        }
    };

    println!("Position: {fen}");
    println!("Depth: {depth}");
    println!();

    let start = Instant::now();
    let divide = perft_divide(&mut pos, depth);
    let elapsed = start.elapsed();
    let nodes: u64 = divide.iter().map(|(_, n)| n).sum();

    for (mv, n) in &divide {
        println!("{mv}: {n}");
    }
    println!();
    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
}

fn run_all(depth: u8) {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in POSITIONS {
        let Ok(mut pos) = Position::from_fen(fen) else {
            println!("{name:.<30} invalid FEN, skipped");
            continue;
        };
        print!("{name:.<30}");

        let start = Instant::now();
        let nodes = perft(&mut pos, depth);
        let elapsed = start.elapsed();
        total_nodes += nodes;
        total_time += elapsed;

        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
}
