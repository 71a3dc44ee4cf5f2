//! Tournament CLI
//!
//! Run self-play matches between MCTS configurations, record them as PGN
//! and track Elo ratings.

use anyhow::{bail, Context, Result};
use mcts_engine::{MctsConfig, MctsEngine};
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tournament::{
    read_games, EloStats, EloTracker, MatchConfig, MatchResult, MatchRunner, PgnWriter, Player,
    TournamentConfig, TournamentResults,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const ELO_FILE: &str = "tournament_elo.json";

fn print_usage() {
    println!("Crazyhouse MCTS Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament match [--config1 FILE] [--config2 FILE] [--games N]");
    println!("                   [--sims N] [--movetime MS] [--max-plies N]");
    println!("                   [--pgn FILE] [--results FILE] [--seed N]");
    println!("  tournament pgn-stats <FILE> [--player NAME]");
    println!("  tournament leaderboard");
    println!();
    println!("Configurations are TOML files with the engine options; a missing");
    println!("--configN uses the defaults. Names are taken from the file stems.");
    println!();
    println!("Examples:");
    println!("  tournament match --config2 sma.toml --games 20 --sims 200 --pgn games.pgn");
    println!("  tournament pgn-stats games.pgn --player sma");
}

struct MatchArgs {
    config1: Option<PathBuf>,
    config2: Option<PathBuf>,
    num_games: u32,
    simulations: Option<u32>,
    move_time: Option<Duration>,
    max_plies: usize,
    pgn: Option<PathBuf>,
    results: Option<PathBuf>,
    seed: Option<u64>,
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{} needs a value", flag))
}

fn parse_match_args(args: &[String]) -> Result<MatchArgs> {
    let mut parsed = MatchArgs {
        config1: None,
        config2: None,
        num_games: 10,
        simulations: None,
        move_time: None,
        max_plies: 200,
        pgn: None,
        results: None,
        seed: None,
    };

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--config1" => parsed.config1 = Some(value_of(args, i, flag)?.into()),
            "--config2" => parsed.config2 = Some(value_of(args, i, flag)?.into()),
            "--games" | "-g" => {
                parsed.num_games = value_of(args, i, flag)?.parse().context("--games")?
            }
            "--sims" | "-s" => {
                parsed.simulations = Some(value_of(args, i, flag)?.parse().context("--sims")?)
            }
            "--movetime" => {
                let ms: u64 = value_of(args, i, flag)?.parse().context("--movetime")?;
                parsed.move_time = Some(Duration::from_millis(ms));
            }
            "--max-plies" => {
                parsed.max_plies = value_of(args, i, flag)?.parse().context("--max-plies")?
            }
            "--pgn" => parsed.pgn = Some(value_of(args, i, flag)?.into()),
            "--results" => parsed.results = Some(value_of(args, i, flag)?.into()),
            "--seed" => parsed.seed = Some(value_of(args, i, flag)?.parse().context("--seed")?),
            other => bail!("unknown argument: {}", other),
        }
        i += 2;
    }
    Ok(parsed)
}

fn load_player(path: Option<&Path>, fallback: &str, seed: Option<u64>) -> Result<Player> {
    let (name, config) = match path {
        Some(path) => {
            let config = MctsConfig::load(path)
                .with_context(|| format!("loading configuration {}", path.display()))?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| fallback.to_string());
            (name, config)
        }
        None => (fallback.to_string(), MctsConfig::default()),
    };
    let mut engine = MctsEngine::new(config);
    if let Some(seed) = seed {
        engine = engine.with_seed(seed);
    }
    Ok(Player::new(name, engine))
}

fn print_elo(result: &MatchResult) {
    let elo = result.elo();
    println!(
        "Score: {:.1}% ({:.1}% draws)",
        elo.point_ratio() * 100.0,
        elo.draw_ratio() * 100.0
    );
    println!("ELO difference: {:.2} +/- {:.2}", elo.diff(), elo.error_margin());
    println!("LOS: {:.2}%", elo.los());
}

fn run_match(args: &[String]) -> Result<()> {
    let args = parse_match_args(args)?;

    let mut player1 = load_player(args.config1.as_deref(), "default", args.seed)?;
    let player2_fallback = if args.config2.is_none() && args.config1.is_none() {
        "default-2"
    } else {
        "default"
    };
    let mut player2 = load_player(
        args.config2.as_deref(),
        player2_fallback,
        args.seed.map(|s| s.wrapping_add(1)),
    )?;

    println!("=== Match: {} vs {} ===", player1.name, player2.name);
    println!("Games: {}, Ply cap: {}", args.num_games, args.max_plies);
    println!();

    let config = MatchConfig {
        num_games: args.num_games,
        simulations: args.simulations,
        move_time: args.move_time,
        max_plies: args.max_plies,
        verbose: true,
        ..Default::default()
    };
    let runner = MatchRunner::new(config);
    let report = runner.run_match(&mut player1, &mut player2);
    let result = report.result;

    if let Some(path) = &args.pgn {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = PgnWriter::new(BufWriter::new(file));
        for game in &report.games {
            writer.write_game(game)?;
        }
        info!(path = %path.display(), games = report.games.len(), "PGN written");
    }

    println!();
    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws",
        player1.name, result.wins, result.losses, result.draws
    );
    print_elo(&result);

    if let Some(path) = &args.results {
        let mut results = TournamentResults::new(
            &format!("{} vs {}", player1.name, player2.name),
            TournamentConfig {
                games_per_match: args.num_games,
                simulations: args.simulations,
                max_plies_per_game: args.max_plies,
            },
        );
        results.add_match(&player1.name, &player2.name, result);
        results.save(path)?;
        println!("{}", results);
    }

    // Update Elo tracker
    let elo_path = Path::new(ELO_FILE);
    let mut tracker = EloTracker::load(elo_path).unwrap_or_default();
    tracker.record_match(&player1.name, &player2.name, result);
    tracker.print_leaderboard();
    tracker.save(elo_path).context("saving Elo tracker")?;
    Ok(())
}

fn pgn_stats(args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        bail!("pgn-stats requires a PGN file");
    };
    let player = match args.get(1).map(String::as_str) {
        Some("--player") => Some(value_of(args, 1, "--player")?.to_string()),
        Some(other) => bail!("unknown argument: {}", other),
        None => None,
    };

    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let games = read_games(&text)?;
    let Some(first) = games.first() else {
        bail!("{} contains no games", path);
    };
    let player = player.unwrap_or_else(|| first.white.clone());

    let mut result = MatchResult::new();
    for game in &games {
        let as_white = game.white == player;
        if !as_white && game.black != player {
            continue;
        }
        match (game.result.as_str(), as_white) {
            ("1-0", true) | ("0-1", false) => result.wins += 1,
            ("0-1", true) | ("1-0", false) => result.losses += 1,
            ("1/2-1/2", _) => result.draws += 1,
            _ => {}
        }
    }

    println!("=== {} in {} ===", player, path);
    println!(
        "{} games: {} wins, {} losses, {} draws",
        result.total_games(),
        result.wins,
        result.losses,
        result.draws
    );
    let stats = EloStats::new(result.wins, result.losses, result.draws);
    println!("ELO difference: {:.2} +/- {:.2}", stats.diff(), stats.error_margin());
    println!("LOS: {:.2}%", stats.los());
    Ok(())
}

fn show_leaderboard() {
    match EloTracker::load(Path::new(ELO_FILE)) {
        Ok(tracker) => tracker.print_leaderboard(),
        Err(_) => {
            println!("No tournament data found. Run some matches first!");
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "match" => run_match(&args[2..]),
        "pgn-stats" => pgn_stats(&args[2..]),
        "leaderboard" | "elo" => {
            show_leaderboard();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            bail!("unknown command: {}", other)
        }
    }
}
