//! Monte-Carlo tree search engine for crazyhouse
//!
//! The engine runs PUCT simulations over a tree of positions keyed by
//! fingerprint. Leaves are evaluated by a [`Predictor`] (a flat prior by
//! default, or an ONNX network with the `onnx` feature), optionally blended
//! with the hand-crafted evaluator from `zh_classical`.
//!
//! # Architecture
//!
//! - [`strategy`]: selection, backpropagation and final move choice
//! - [`enhance`]: prior boosts applied when a state is expanded
//! - [`time_manager`]: per-move budget from the game clock
//! - [`config`]: options settable from TOML or the line protocol
//!
//! ```ignore
//! let mut engine = MctsEngine::new(MctsConfig::default());
//! let mv = engine.best_move(&Position::startpos());
//! ```

pub mod config;
pub mod enhance;
pub mod features;
pub mod predictor;
pub mod strategy;
pub mod time_manager;
pub mod tree;

mod engine;

#[cfg(feature = "onnx")]
mod onnx;

pub use config::{ConfigError, MctsConfig};
pub use engine::{Budget, MctsEngine, SearchStats, EVAL_FACTOR};
pub use enhance::PolicyEnhancement;
pub use features::encode_planes;
#[cfg(feature = "onnx")]
pub use onnx::OnnxPredictor;
pub use predictor::{Prediction, Predictor, PredictorError, UniformPredictor};
pub use strategy::{BackpropStrategy, BestMoveStrategy, ExpansionStrategy};
pub use time_manager::TimeManager;
