//! Selection, backpropagation and final move choice.
//!
//! Each family is a closed enum; the engine dispatches with a `match`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tree::Node;

pub const C_INIT: f64 = 2.5;
pub const C_BASE: f64 = 19652.0;
pub const Q_INIT: f64 = 0.0;
pub const EPS: f64 = 1e-8;

pub const U_MIN: f64 = 0.25;
pub const U_INIT: f64 = 1.0;
pub const U_BASE: f64 = 1965.0;

pub const Q_THRESH_INIT: f64 = 0.5;
pub const Q_THRESH_MAX: f64 = 0.9;
pub const Q_THRESH_BASE: f64 = 1965.0;
pub const Q_FACTOR: f64 = 0.7;

/// How the move is picked once the search budget is spent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BestMoveStrategy {
    /// Most visited move
    #[default]
    Visits,
    /// Visits blended with the value of well-explored moves
    QValue,
}

/// How a move is picked while descending the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionStrategy {
    #[default]
    Puct,
    /// PUCT with a visit-dependent divisor that explores more early on
    Exploration,
}

/// How an edge's value is updated on the way back up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackpropStrategy {
    /// Running mean over all visits
    #[default]
    Average,
    /// Halfway between the old value and the new sample
    Sma,
}

/// Exploration constant for a state visited `n` times.
#[inline]
pub fn c_puct(n: u32) -> f64 {
    ((n as f64 + C_BASE + 1.0) / C_BASE).ln() + C_INIT
}

/// Exploration divisor offset used by [`ExpansionStrategy::Exploration`].
#[inline]
pub fn u_divisor(n: u32) -> f64 {
    U_MIN - (-(n as f64) / U_BASE).exp() * (U_MIN - U_INIT)
}

/// Fraction of the top visit count a move needs for its value to count.
#[inline]
pub fn q_threshold(n: u32) -> f64 {
    Q_THRESH_MAX - (-(n as f64) / Q_THRESH_BASE).exp() * (Q_THRESH_MAX - Q_THRESH_INIT)
}

impl ExpansionStrategy {
    /// Score of one edge given the parent's visit count.
    pub fn score(self, q: f64, prior: f64, visits: u32, parent_visits: u32) -> f64 {
        let c = c_puct(parent_visits);
        let n = parent_visits as f64;
        match self {
            ExpansionStrategy::Puct => {
                if visits > 0 {
                    q + c * prior * n.sqrt() / (1.0 + visits as f64)
                } else {
                    Q_INIT + c * prior * (n + EPS).sqrt()
                }
            }
            ExpansionStrategy::Exploration => {
                let u = u_divisor(parent_visits);
                if visits > 0 {
                    q + c * prior * n.sqrt() / (u + visits as f64)
                } else {
                    Q_INIT + c * prior * (n + EPS).sqrt() / u
                }
            }
        }
    }

    /// Index of the edge to descend into. The first best edge wins ties.
    pub fn select(self, node: &Node) -> usize {
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, edge) in node.edges.iter().enumerate() {
            let score = self.score(edge.q, edge.prior, edge.visits, node.visits);
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        best
    }
}

impl BackpropStrategy {
    /// New value of an edge that has been visited `visits` times before.
    #[inline]
    pub fn update(self, q: f64, visits: u32, v: f64) -> f64 {
        match self {
            BackpropStrategy::Average => (visits as f64 * q + v) / (visits as f64 + 1.0),
            BackpropStrategy::Sma => (q + v) / 2.0,
        }
    }
}

impl BestMoveStrategy {
    /// Index of the edge to play, ties broken at random. `None` for an
    /// empty node.
    pub fn choose<R: Rng + ?Sized>(self, node: &Node, rng: &mut R) -> Option<usize> {
        if node.edges.is_empty() {
            return None;
        }
        let scores: Vec<f64> = match self {
            BestMoveStrategy::Visits => node.edges.iter().map(|e| e.visits as f64).collect(),
            BestMoveStrategy::QValue => {
                let max_visits = node.edges.iter().map(|e| e.visits).max().unwrap_or(0);
                let threshold = (max_visits as f64 * q_threshold(node.visits)) as u32;
                let total = node.visits.max(1) as f64;
                node.edges
                    .iter()
                    .map(|e| {
                        let q = if e.visits < threshold {
                            0.0
                        } else {
                            (e.q + 1.0) / 2.0
                        };
                        (1.0 - Q_FACTOR) * (e.visits as f64 / total) + Q_FACTOR * q
                    })
                    .collect()
            }
        };

        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == best)
            .map(|(i, _)| i)
            .collect();
        match tied.len() {
            0 => None,
            1 => Some(tied[0]),
            n => Some(tied[rng.gen_range(0..n)]),
        }
    }
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod strategy_tests;
