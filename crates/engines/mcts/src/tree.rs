//! Search statistics keyed by position fingerprint.

use std::collections::HashMap;

use zh_core::Move;

/// Statistics of one move out of a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub mv: Move,
    /// Prior probability after enhancement
    pub prior: f64,
    /// Mean value from the mover's point of view
    pub q: f64,
    pub visits: u32,
}

impl Edge {
    pub fn new(mv: Move, prior: f64) -> Self {
        Self {
            mv,
            prior,
            q: 0.0,
            visits: 0,
        }
    }
}

/// An expanded state: its legal moves and total visit count.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub edges: Vec<Edge>,
    pub visits: u32,
}

impl Node {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges, visits: 0 }
    }

    /// Highest prior among the edges, 0 when empty.
    pub fn max_prior(&self) -> f64 {
        self.edges.iter().map(|e| e.prior).fold(0.0, f64::max)
    }

    /// Scale priors to sum to one. A zero sum leaves them untouched.
    pub fn normalize_priors(&mut self) {
        let sum: f64 = self.edges.iter().map(|e| e.prior).sum();
        if sum > 0.0 && sum.is_finite() {
            for edge in &mut self.edges {
                edge.prior /= sum;
            }
        }
    }
}

/// All expanded states of the current game.
#[derive(Debug, Default)]
pub struct Tree {
    nodes: HashMap<u64, Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: u64) -> Option<&Node> {
        self.nodes.get(&key)
    }

    pub fn get_mut(&mut self, key: u64) -> Option<&mut Node> {
        self.nodes.get_mut(&key)
    }

    pub fn contains(&self, key: u64) -> bool {
        self.nodes.contains_key(&key)
    }

    pub fn insert(&mut self, key: u64, node: Node) {
        self.nodes.insert(key, node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
