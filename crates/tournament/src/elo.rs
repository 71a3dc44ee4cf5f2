//! Elo statistics for a match and rating tracking across runs

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::store::{read_json, write_json, StoreError};

/// Rating a configuration starts from
pub const DEFAULT_ELO: f64 = 1500.0;

/// Points at stake per game
pub const K_FACTOR: f64 = 32.0;

/// Result of a single game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// The same game seen from the other side.
    pub fn flipped(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

/// Result of a match (multiple games)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }

    pub fn elo(&self) -> EloStats {
        EloStats::new(self.wins, self.losses, self.draws)
    }
}

/// Rating difference implied by a win/loss/draw record, with a 95%
/// confidence margin and the likelihood of superiority.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloStats {
    wins: u32,
    losses: u32,
    draws: u32,
    mu: f64,
    stdev: f64,
}

impl EloStats {
    pub fn new(wins: u32, losses: u32, draws: u32) -> Self {
        let n = (wins + losses + draws) as f64;
        if n == 0.0 {
            return Self {
                wins,
                losses,
                draws,
                mu: 0.5,
                stdev: 0.0,
            };
        }

        let w = wins as f64 / n;
        let l = losses as f64 / n;
        let d = draws as f64 / n;
        let mu = w + d / 2.0;

        let dev_w = w * (1.0 - mu).powi(2);
        let dev_l = l * (0.0 - mu).powi(2);
        let dev_d = d * (0.5 - mu).powi(2);
        let stdev = (dev_w + dev_l + dev_d).sqrt() / n.sqrt();

        Self {
            wins,
            losses,
            draws,
            mu,
            stdev,
        }
    }

    fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Points scored over points available.
    pub fn point_ratio(&self) -> f64 {
        if self.games() == 0 {
            return 0.5;
        }
        self.mu
    }

    pub fn draw_ratio(&self) -> f64 {
        if self.games() == 0 {
            return 0.0;
        }
        self.draws as f64 / self.games() as f64
    }

    /// Elo difference for the observed score.
    pub fn diff(&self) -> f64 {
        elo_diff(self.mu)
    }

    /// Half-width of the 95% confidence interval of [`EloStats::diff`].
    pub fn error_margin(&self) -> f64 {
        let mu_min = self.mu + phi_inv(0.025) * self.stdev;
        let mu_max = self.mu + phi_inv(0.975) * self.stdev;
        (elo_diff(mu_max) - elo_diff(mu_min)) / 2.0
    }

    /// Likelihood of superiority in percent. Draws do not count.
    pub fn los(&self) -> f64 {
        let decisive = (self.wins + self.losses) as f64;
        if decisive == 0.0 {
            return 50.0;
        }
        let z = (self.wins as f64 - self.losses as f64) / (2.0 * decisive).sqrt();
        100.0 * (0.5 + 0.5 * libm::erf(z))
    }
}

/// Elo difference for an expected score `p`.
pub fn elo_diff(p: f64) -> f64 {
    -400.0 * (1.0 / p - 1.0).log10()
}

/// Winitzki's closed form; plenty for a 95% margin.
fn erf_inv(x: f64) -> f64 {
    let pi = std::f64::consts::PI;
    let a = 8.0 * (pi - 3.0) / (3.0 * pi * (4.0 - pi));
    let y = (1.0 - x * x).ln();
    let z = 2.0 / (pi * a) + y / 2.0;
    let ret = ((z * z - y / a).sqrt() - z).sqrt();
    if x < 0.0 {
        -ret
    } else {
        ret
    }
}

/// Quantile of the standard normal distribution.
fn phi_inv(p: f64) -> f64 {
    std::f64::consts::SQRT_2 * erf_inv(2.0 * p - 1.0)
}

/// A configuration's standing in the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub elo: f64,
    /// Lifetime record against every opponent
    pub record: MatchResult,
}

impl Default for PlayerRating {
    fn default() -> Self {
        Self {
            elo: DEFAULT_ELO,
            record: MatchResult::default(),
        }
    }
}

/// One match as it was folded into the ratings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player1: String,
    pub player2: String,
    pub result: MatchResult,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
    /// Points moved from player2 to player1
    pub rating_change: f64,
}

/// Ratings of named configurations, persisted as JSON between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EloTracker {
    pub players: BTreeMap<String, PlayerRating>,
    pub history: Vec<MatchRecord>,
}

impl EloTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        read_json(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json(path, self)
    }

    /// Current rating; unknown players sit at [`DEFAULT_ELO`].
    pub fn rating(&self, player: &str) -> f64 {
        self.players.get(player).map_or(DEFAULT_ELO, |p| p.elo)
    }

    /// Logistic expectation of `player1`'s score per game.
    pub fn expected_score(&self, player1: &str, player2: &str) -> f64 {
        let gap = self.rating(player2) - self.rating(player1);
        1.0 / (1.0 + 10.0_f64.powf(gap / 400.0))
    }

    /// Fold a match into both ratings. Returns the points player1 gained.
    pub fn record_match(&mut self, player1: &str, player2: &str, result: MatchResult) -> f64 {
        let games = result.total_games() as f64;
        let change = K_FACTOR * games * (result.score() - self.expected_score(player1, player2));

        let mirrored = MatchResult {
            wins: result.losses,
            losses: result.wins,
            draws: result.draws,
        };
        for (name, delta, seen) in [(player1, change, result), (player2, -change, mirrored)] {
            let entry = self.players.entry(name.to_string()).or_default();
            entry.elo += delta;
            entry.record.wins += seen.wins;
            entry.record.losses += seen.losses;
            entry.record.draws += seen.draws;
        }

        self.history.push(MatchRecord {
            player1: player1.to_string(),
            player2: player2.to_string(),
            result,
            timestamp: unix_seconds(),
            rating_change: change,
        });
        change
    }

    /// Players by descending rating.
    pub fn leaderboard(&self) -> Vec<(&str, &PlayerRating)> {
        let mut rows: Vec<_> = self.players.iter().map(|(n, r)| (n.as_str(), r)).collect();
        rows.sort_by(|a, b| b.1.elo.total_cmp(&a.1.elo));
        rows
    }

    pub fn print_leaderboard(&self) {
        println!("\n=== Configuration Leaderboard ===");
        println!("{:<30} {:>8} {:>6} {:>14}", "Configuration", "Elo", "Games", "W-L-D");
        println!("{}", "-".repeat(62));
        for (name, player) in self.leaderboard() {
            let r = player.record;
            println!(
                "{:<30} {:>8.1} {:>6} {:>14}",
                name,
                player.elo,
                r.total_games(),
                format!("{}-{}-{}", r.wins, r.losses, r.draws)
            );
        }
        println!();
    }
}

fn unix_seconds() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
