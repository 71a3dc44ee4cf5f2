//! Prior enhancements applied when a state is first expanded.
//!
//! Each pass may lift the prior of under-weighted moves that meet a
//! condition, then renormalises only if something changed.

use rand::Rng;
use rand_distr::{Distribution, Gamma};
use serde::{Deserialize, Serialize};
use zh_classical::drop_score;
use zh_core::{Move, Position};

use crate::tree::Node;

pub const DIRICHLET_ALPHA: f64 = 0.2;
pub const DIRICHLET_WEIGHT: f64 = 0.25;
/// Only moves below this prior are boosted.
pub const BOOST_THRESHOLD: f64 = 0.1;
/// Boost as a fraction of the strongest prior.
pub const BOOST_FACTOR: f64 = 0.5;

/// One prior enhancement. Declaration order is the order they run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyEnhancement {
    Dirichlet,
    CheckingMoves,
    ForkingMoves,
    DroppingMoves,
    CapturingMoves,
}

impl PolicyEnhancement {
    pub const ALL: [PolicyEnhancement; 5] = [
        PolicyEnhancement::Dirichlet,
        PolicyEnhancement::CheckingMoves,
        PolicyEnhancement::ForkingMoves,
        PolicyEnhancement::DroppingMoves,
        PolicyEnhancement::CapturingMoves,
    ];

    /// Suffix used by the line protocol (`PE_<name>`).
    pub fn option_name(self) -> &'static str {
        match self {
            PolicyEnhancement::Dirichlet => "Dirichlet",
            PolicyEnhancement::CheckingMoves => "CheckingMoves",
            PolicyEnhancement::ForkingMoves => "ForkingMoves",
            PolicyEnhancement::DroppingMoves => "DroppingMoves",
            PolicyEnhancement::CapturingMoves => "CapturingMoves",
        }
    }

    pub fn from_option_name(name: &str) -> Option<PolicyEnhancement> {
        PolicyEnhancement::ALL
            .into_iter()
            .find(|p| p.option_name().eq_ignore_ascii_case(name))
    }

    /// Apply to a freshly expanded node. Returns whether any prior changed.
    pub fn apply<R: Rng + ?Sized>(self, node: &mut Node, pos: &mut Position, rng: &mut R) -> bool {
        match self {
            PolicyEnhancement::Dirichlet => add_dirichlet_noise(node, rng),
            PolicyEnhancement::CheckingMoves => {
                boost(node, |mv| pos.gives_check(mv).then_some(BOOST_FACTOR))
            }
            PolicyEnhancement::ForkingMoves => {
                boost(node, |mv| pos.gives_fork(mv).then_some(BOOST_FACTOR))
            }
            PolicyEnhancement::DroppingMoves => {
                boost(node, |mv| mv.is_drop().then(|| drop_score(pos, mv)))
            }
            PolicyEnhancement::CapturingMoves => {
                boost(node, |mv| mv.is_capture().then_some(BOOST_FACTOR))
            }
        }
    }
}

/// Mix Dirichlet noise over the legal moves into the priors.
fn add_dirichlet_noise<R: Rng + ?Sized>(node: &mut Node, rng: &mut R) -> bool {
    let Ok(gamma) = Gamma::new(DIRICHLET_ALPHA, 1.0) else {
        return false;
    };
    let noise: Vec<f64> = node.edges.iter().map(|_| gamma.sample(rng)).collect();
    let total: f64 = noise.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return false;
    }

    for (edge, eta) in node.edges.iter_mut().zip(&noise) {
        edge.prior = (edge.prior + DIRICHLET_WEIGHT * eta / total).max(0.0);
    }
    node.normalize_priors();
    true
}

/// Add `max_prior * factor` to every under-weighted move for which
/// `factor_of` returns a factor.
fn boost(node: &mut Node, mut factor_of: impl FnMut(Move) -> Option<f64>) -> bool {
    let max_prior = node.max_prior();
    let mut changed = false;
    for edge in &mut node.edges {
        if edge.prior >= BOOST_THRESHOLD {
            continue;
        }
        if let Some(factor) = factor_of(edge.mv).filter(|f| *f > 0.0) {
            edge.prior += max_prior * factor;
            changed = true;
        }
    }
    if changed {
        node.normalize_priors();
    }
    changed
}

#[cfg(test)]
#[path = "enhance_tests.rs"]
mod enhance_tests;
