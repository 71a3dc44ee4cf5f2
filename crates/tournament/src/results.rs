//! Match summaries saved next to the PGN so runs can be compared later

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::elo::MatchResult;
use crate::store::{read_json, write_json, StoreError};

/// Settings every match in a run shared
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub games_per_match: u32,
    /// None when each configuration used its own simulation count
    pub simulations: Option<u32>,
    pub max_plies_per_game: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            games_per_match: 10,
            simulations: None,
            max_plies_per_game: 200,
        }
    }
}

/// One pairing with its statistics frozen at save time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub player1: String,
    pub player2: String,
    pub result: MatchResult,
    pub elo_diff: f64,
    pub error_margin: f64,
    pub los: f64,
}

impl MatchEntry {
    pub fn new(player1: &str, player2: &str, result: MatchResult) -> Self {
        let elo = result.elo();
        Self {
            player1: player1.to_string(),
            player2: player2.to_string(),
            result,
            elo_diff: elo.diff(),
            error_margin: elo.error_margin(),
            los: elo.los(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResults {
    pub name: String,
    pub config: TournamentConfig,
    pub matches: Vec<MatchEntry>,
}

impl TournamentResults {
    pub fn new(name: &str, config: TournamentConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
            matches: Vec::new(),
        }
    }

    pub fn add_match(&mut self, player1: &str, player2: &str, result: MatchResult) {
        self.matches.push(MatchEntry::new(player1, player2, result));
    }

    /// Everyone who played, in order of first appearance.
    pub fn participants(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.matches {
            for name in [entry.player1.as_str(), entry.player2.as_str()] {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json(path, self)
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        read_json(path)
    }
}

impl fmt::Display for TournamentResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Tournament: {} ===", self.name)?;
        writeln!(f, "Participants: {}", self.participants().join(", "))?;
        let budget = match self.config.simulations {
            Some(n) => format!("{} simulations/move", n),
            None => "configured budgets".to_string(),
        };
        writeln!(
            f,
            "{} games/match, {}, draw after {} plies",
            self.config.games_per_match, budget, self.config.max_plies_per_game
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<20} {:<20} {:>11} {:>18} {:>7}",
            "Player 1", "Player 2", "W-L-D", "Elo", "LOS"
        )?;
        writeln!(f, "{}", "-".repeat(80))?;
        for m in &self.matches {
            let r = m.result;
            writeln!(
                f,
                "{:<20} {:<20} {:>11} {:>18} {:>6.1}%",
                m.player1,
                m.player2,
                format!("{}-{}-{}", r.wins, r.losses, r.draws),
                format!("{:+.1} +/- {:.1}", m.elo_diff, m.error_margin),
                m.los
            )?;
        }
        Ok(())
    }
}
