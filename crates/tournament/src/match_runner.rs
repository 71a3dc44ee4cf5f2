//! Match runner for self-play between two MCTS configurations

use mcts_engine::MctsEngine;
use std::time::Duration;
use tracing::debug;
use zh_core::{move_to_san, Color, Engine, Position, SearchLimits};

use crate::elo::{GameResult, MatchResult};
use crate::pgn::{pgn_date_today, GameRecord};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Simulations per move (None = each engine's own setting)
    pub simulations: Option<u32>,
    /// Time per move, takes precedence over `simulations`
    pub move_time: Option<Duration>,
    /// Plies after which an unfinished game counts as a draw
    pub max_plies: usize,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Print progress during match
    pub verbose: bool,
    /// PGN `Event` tag
    pub event: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            simulations: None,
            move_time: None,
            max_plies: 200,
            alternate_colors: true,
            verbose: true,
            event: "Self-play".to_string(),
        }
    }
}

impl MatchConfig {
    /// Create search limits based on this config
    fn search_limits(&self) -> SearchLimits {
        match (self.move_time, self.simulations) {
            (Some(time), _) => SearchLimits::time(time),
            (None, Some(n)) => SearchLimits::simulations(n),
            (None, None) => SearchLimits::engine_default(),
        }
    }
}

/// An engine with the name it plays under.
pub struct Player {
    pub name: String,
    pub engine: MctsEngine,
}

impl Player {
    pub fn new(name: impl Into<String>, engine: MctsEngine) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }
}

/// Everything a finished match produced
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// From the first player's perspective
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two players
    ///
    /// Returns the result from player1's perspective and every game record
    pub fn run_match(&self, player1: &mut Player, player2: &mut Player) -> MatchReport {
        let mut result = MatchResult::new();
        let mut games = Vec::with_capacity(self.config.num_games as usize);

        for game_num in 0..self.config.num_games {
            // Alternate colors if configured
            let player1_white = !self.config.alternate_colors || game_num % 2 == 0;
            let round = game_num + 1;

            let (record, white_result) = if player1_white {
                self.play_game(player1, player2, round)
            } else {
                self.play_game(player2, player1, round)
            };
            let game_result = if player1_white {
                white_result
            } else {
                white_result.flipped()
            };
            result.record(game_result);

            if self.config.verbose {
                let color = if player1_white { "W" } else { "B" };
                println!(
                    "Game {}/{}: {} ({}) in {} plies - Score: {}-{}-{}",
                    round,
                    self.config.num_games,
                    record.result,
                    color,
                    record.moves.len(),
                    result.wins,
                    result.losses,
                    result.draws
                );
            }
            games.push(record);
        }

        MatchReport { result, games }
    }

    /// Play a single game, returns the record and the result from white's perspective
    pub fn play_game(
        &self,
        white: &mut Player,
        black: &mut Player,
        round: u32,
    ) -> (GameRecord, GameResult) {
        let mut pos = Position::startpos();
        white.engine.soft_reset();
        black.engine.soft_reset();

        let mut moves = Vec::new();
        let outcome = loop {
            if let Some(outcome) = pos.outcome() {
                break Some(outcome);
            }
            if moves.len() >= self.config.max_plies {
                debug!(round, plies = moves.len(), "ply cap reached, scoring a draw");
                break None;
            }

            let engine = match pos.side_to_move() {
                Color::White => &mut white.engine,
                Color::Black => &mut black.engine,
            };
            let Some(mv) = engine.search(&pos, self.config.search_limits()).best_move else {
                break pos.outcome();
            };
            moves.push(move_to_san(&mut pos, mv));
            pos.make_move(mv);
        };

        let white_result = match outcome.and_then(|o| o.winner()) {
            Some(Color::White) => GameResult::Win,
            Some(Color::Black) => GameResult::Loss,
            None => GameResult::Draw,
        };
        let token = outcome.map_or("1/2-1/2", |o| o.result_token());

        let record = GameRecord {
            event: self.config.event.clone(),
            site: "local".to_string(),
            date: pgn_date_today(),
            round: round.to_string(),
            white: white.name.clone(),
            black: black.name.clone(),
            result: token.to_string(),
            moves,
        };
        (record, white_result)
    }
}

/// Quick utility to run a single match at a fixed simulation count
pub fn quick_match(
    player1: &mut Player,
    player2: &mut Player,
    num_games: u32,
    simulations: u32,
) -> MatchResult {
    let config = MatchConfig {
        num_games,
        simulations: Some(simulations),
        verbose: false,
        ..Default::default()
    };
    MatchRunner::new(config).run_match(player1, player2).result
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
