//! Tournament runner for the crazyhouse MCTS engine
//!
//! This crate provides infrastructure for:
//! - Self-play matches between two MCTS configurations
//! - PGN game records (writer and reader)
//! - Elo difference, error margin and LOS for a match, and a rating
//!   tracker persisted across runs
//!
//! # Usage
//!
//! ```bash
//! # Default configuration against a TOML configuration, 20 games
//! cargo run -p tournament -- match --config2 sma.toml --games 20 --pgn games.pgn
//!
//! # Statistics of a recorded match
//! cargo run -p tournament -- pgn-stats games.pgn
//! ```

mod elo;
mod match_runner;
mod pgn;
mod results;
mod store;

pub use elo::*;
pub use match_runner::*;
pub use pgn::*;
pub use results::*;
pub use store::StoreError;
