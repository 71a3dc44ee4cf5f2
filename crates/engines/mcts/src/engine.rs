//! The search driver: simulations, move choice and session lifecycle.
//!
//! One simulation descends the tree on a single working position with
//! `make_move`, expands the first unseen state with the predictor, then
//! backs the value up the path and undoes the moves it made.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use zh_classical::{q_to_cp, Evaluator, MateSearch, MATE_SEARCH_DEPTH};
use zh_core::{
    encode, legal_moves, move_to_uci, Engine, GameClock, Move, Outcome, Position, SearchLimits,
    SearchResult, TimeControl, DRAW_SCORE,
};

use crate::config::{ConfigError, MctsConfig};
use crate::enhance::PolicyEnhancement;
use crate::predictor::{Prediction, Predictor, UniformPredictor};
use crate::strategy::{BackpropStrategy, BestMoveStrategy, ExpansionStrategy};
use crate::time_manager::TimeManager;
use crate::tree::{Edge, Node, Tree};

/// Weight of the heuristic evaluation in a leaf's value.
pub const EVAL_FACTOR: f64 = 0.25;

/// How long a search may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Simulations(u32),
    Time(Duration),
}

/// Counters of the last decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub simulations: u32,
    pub elapsed: Duration,
    /// Value of the chosen move in centipawns, mover's view
    pub best_move_cp: i32,
}

impl SearchStats {
    pub fn nps(&self) -> u64 {
        let ms = self.elapsed.as_millis() as u64;
        if ms == 0 {
            0
        } else {
            self.simulations as u64 * 1000 / ms
        }
    }
}

/// PUCT tree search guided by a [`Predictor`].
pub struct MctsEngine {
    config: MctsConfig,

    // Settings in effect; the time-saving profile may swap some of them
    time_control: bool,
    variable_time_control: bool,
    num_sims: u32,
    best_move_strategy: BestMoveStrategy,
    expansion: ExpansionStrategy,
    backprop: BackpropStrategy,
    evaluator: Evaluator,
    enhancements: Vec<PolicyEnhancement>,

    predictor: Box<dyn Predictor>,
    tree: Tree,
    time: TimeManager,
    mate_search: MateSearch,
    rng: StdRng,
    stats: SearchStats,
    name: String,
}

impl Default for MctsEngine {
    fn default() -> Self {
        Self::new(MctsConfig::default())
    }
}

impl MctsEngine {
    /// Engine with a flat prior and neutral values.
    pub fn new(config: MctsConfig) -> Self {
        Self::with_predictor(config, Box::new(UniformPredictor))
    }

    pub fn with_predictor(config: MctsConfig, predictor: Box<dyn Predictor>) -> Self {
        let name = format!("ZhMcts-{}", predictor.name());
        let mut engine = Self {
            config,
            time_control: true,
            variable_time_control: false,
            num_sims: 0,
            best_move_strategy: BestMoveStrategy::default(),
            expansion: ExpansionStrategy::default(),
            backprop: BackpropStrategy::default(),
            evaluator: Evaluator::default(),
            enhancements: Vec::new(),
            predictor,
            tree: Tree::new(),
            time: TimeManager::new(),
            mate_search: MateSearch::new(MATE_SEARCH_DEPTH),
            rng: StdRng::from_entropy(),
            stats: SearchStats::default(),
            name,
        };
        engine.update_config();
        engine
    }

    /// Reseed the random source used for tie-breaks and noise.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Change one option. It takes effect at the next
    /// [`MctsEngine::apply_pending_config`] or [`MctsEngine::reset`].
    pub fn set_config_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        self.config.set_option(name, value)
    }

    /// Apply the configuration if an option changed since it was last applied.
    pub fn apply_pending_config(&mut self) {
        if self.config.is_changed() {
            self.update_config();
        }
    }

    /// Make the stored configuration the active one.
    pub fn update_config(&mut self) {
        let config = &self.config;
        self.time_control = config.time_control;
        self.variable_time_control = config.variable_time_control;
        self.num_sims = config.num_sims;
        self.best_move_strategy = config.best_move;
        self.expansion = config.expansion;
        self.backprop = config.backprop;
        self.evaluator.set_features(config.eval_mask());
        self.enhancements = config.policy_enhancements.clone();
        self.config.mark_applied();
        info!(
            time_control = self.time_control,
            num_sims = self.num_sims,
            best_move = ?self.best_move_strategy,
            expansion = ?self.expansion,
            backprop = ?self.backprop,
            enhancements = ?self.enhancements,
            "configuration applied"
        );
    }

    /// Forget the game and reapply the configuration.
    pub fn reset(&mut self) {
        self.soft_reset();
        self.update_config();
    }

    /// Forget the game but keep the active settings.
    pub fn soft_reset(&mut self) {
        self.tree.clear();
        self.time.reset();
        self.stats = SearchStats::default();
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn time_manager(&self) -> &TimeManager {
        &self.time
    }

    pub fn enhancements(&self) -> &[PolicyEnhancement] {
        &self.enhancements
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn time_control_active(&self) -> bool {
        self.time_control
    }

    /// Feed the game clock to the time manager.
    pub fn on_clock(&mut self, clock: GameClock) {
        if let Some(state) = self.time.on_clock(clock.remaining, clock.increment) {
            self.on_mode_switch(state);
        }
    }

    /// Use a fixed time for the next move.
    pub fn set_move_time(&mut self, move_time: Duration) {
        self.time.set_move_time(move_time);
    }

    /// Enter (`true`) or leave the low-time profile.
    fn on_mode_switch(&mut self, state: bool) {
        info!(low_time = state, "time-saving mode switch");
        if self.variable_time_control {
            self.time_control = state;
        }
        if self.config.time_saving_profile {
            if state {
                self.evaluator.set_features(self.config.ts_eval_mask());
                self.enhancements = self.config.ts_policy_enhancements.clone();
            } else {
                self.evaluator.set_features(self.config.eval_mask());
                self.enhancements = self.config.policy_enhancements.clone();
            }
        }
    }

    /// Budget from the active settings.
    pub fn budget(&self) -> Budget {
        match self.time.per_move() {
            Some(per_move) if self.time_control => Budget::Time(per_move),
            _ => Budget::Simulations(self.num_sims),
        }
    }

    /// Choose a move with the configured budget.
    pub fn best_move(&mut self, pos: &Position) -> Option<Move> {
        let budget = self.budget();
        self.best_move_with(pos, budget, &TimeControl::default())
    }

    /// Choose a move. `stop` lets another thread cut the search short.
    pub fn best_move_with(
        &mut self,
        pos: &Position,
        budget: Budget,
        stop: &TimeControl,
    ) -> Option<Move> {
        let start = Instant::now();
        self.stats = SearchStats::default();

        let moves = legal_moves(pos);
        match moves.len() {
            0 => return None,
            1 => return Some(moves[0]),
            _ => {}
        }

        if let Some(mv) = self.mate_search.find(pos) {
            self.stats.elapsed = start.elapsed();
            self.stats.best_move_cp = q_to_cp(1.0);
            debug!(best = %move_to_uci(mv), "forced mate found");
            return Some(mv);
        }

        let mut work = pos.clone();
        let mut root_win = None;
        match budget {
            Budget::Simulations(n) => {
                for _ in 0..n.max(1) {
                    root_win = self.simulate(&mut work);
                    self.stats.simulations += 1;
                    if root_win.is_some() || stop.check_time() {
                        break;
                    }
                }
            }
            Budget::Time(limit) => {
                let mut remaining = limit;
                loop {
                    let sim_start = Instant::now();
                    root_win = self.simulate(&mut work);
                    self.stats.simulations += 1;
                    remaining = remaining.saturating_sub(sim_start.elapsed());
                    if remaining.is_zero() || root_win.is_some() || stop.check_time() {
                        break;
                    }
                }
            }
        }

        let root = self.tree.get(pos.fingerprint());
        let chosen = match root_win {
            Some(idx) => root.map(|node| node.edges[idx]),
            None => root.and_then(|node| {
                self.best_move_strategy
                    .choose(node, &mut self.rng)
                    .map(|idx| node.edges[idx])
            }),
        };
        let best = chosen.map(|edge| edge.mv).unwrap_or(moves[0]);

        self.stats.elapsed = start.elapsed();
        self.stats.best_move_cp = chosen.map(|edge| q_to_cp(edge.q)).unwrap_or(0);
        debug!(
            simulations = self.stats.simulations,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            nps = self.stats.nps(),
            best = %move_to_uci(best),
            cp = self.stats.best_move_cp,
            "search finished"
        );
        Some(best)
    }

    /// One descend-expand-backup cycle from `pos`, which is restored
    /// before returning. Returns the root edge index when a root move
    /// turned out to mate.
    fn simulate(&mut self, pos: &mut Position) -> Option<usize> {
        let mut path: Vec<(u64, usize, Move)> = Vec::new();
        let mut mate = false;

        let mut v = loop {
            let key = pos.fingerprint();
            let Some(node) = self.tree.get(key) else {
                match pos.outcome() {
                    Some(Outcome::Checkmate { .. }) => {
                        mate = true;
                        break 1.0;
                    }
                    Some(_) => break -(DRAW_SCORE as f64),
                    None => break -self.expand(key, pos),
                }
            };
            if node.edges.is_empty() {
                break 0.0;
            }
            let idx = if node.edges.len() == 1 {
                0
            } else {
                self.expansion.select(node)
            };
            let mv = node.edges[idx].mv;
            path.push((key, idx, mv));
            pos.make_move(mv);
        };

        let root_win = if mate && path.len() == 1 {
            Some(path[0].1)
        } else {
            None
        };

        let backprop = self.backprop;
        for &(key, idx, mv) in path.iter().rev() {
            if let Some(node) = self.tree.get_mut(key) {
                let edge = &mut node.edges[idx];
                edge.q = if edge.visits == 0 {
                    v
                } else {
                    backprop.update(edge.q, edge.visits, v)
                };
                edge.visits += 1;
                node.visits += 1;
            }
            v = -v;
            pos.unmake_move(mv);
        }
        root_win
    }

    /// Store a new state and return its value for the side to move.
    fn expand(&mut self, key: u64, pos: &mut Position) -> f64 {
        let prediction = match self.predictor.predict(pos).and_then(Prediction::checked) {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(error = %e, "prediction failed, using a uniform prior");
                Prediction::uniform()
            }
        };

        let mut value = prediction.value as f64;
        if self.evaluator.is_enabled() {
            value = (1.0 - EVAL_FACTOR) * value + EVAL_FACTOR * self.evaluator.evaluate(pos) as f64;
        }

        let edges: Vec<Edge> = legal_moves(pos)
            .into_iter()
            .map(|mv| Edge::new(mv, prediction.policy[encode(mv)].max(0.0) as f64))
            .collect();
        let mut node = Node::new(edges);
        if node.edges.iter().map(|e| e.prior).sum::<f64>() > 0.0 {
            node.normalize_priors();
        } else {
            let flat = 1.0 / node.edges.len().max(1) as f64;
            for edge in &mut node.edges {
                edge.prior = flat;
            }
        }

        for kind in &self.enhancements {
            kind.apply(&mut node, pos, &mut self.rng);
        }

        self.tree.insert(key, node);
        value
    }
}

impl Engine for MctsEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        limits.start();
        if let Some(clock) = limits.clock {
            self.on_clock(clock);
        }
        if let Some(move_time) = limits.move_time {
            self.set_move_time(move_time);
        }
        let budget = match limits.simulations {
            Some(n) => Budget::Simulations(n),
            None => self.budget(),
        };

        let best_move = self.best_move_with(pos, budget, &limits.time_control);
        if best_move.is_some() {
            self.time.record_move();
        }

        SearchResult {
            best_move,
            score: self.stats.best_move_cp,
            nodes: self.stats.simulations as u64,
            elapsed: self.stats.elapsed,
            stopped: limits.should_stop(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) {
        self.reset();
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match self.set_config_option(name, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "option rejected");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
