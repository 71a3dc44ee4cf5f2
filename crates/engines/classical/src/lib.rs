//! Crazyhouse domain knowledge that needs no network.
//!
//! - [`Evaluator`]: hand-crafted evaluation, gated per feature, reported on
//!   the same value scale as the network so the two can be blended.
//! - [`drop_score`]: how promising a drop looks, used to boost drop priors.
//! - [`MateSearch`]: short forced-mate prover run ahead of the tree search.

mod attack_info;
mod drops;
mod eval;
mod mate;
pub mod tables;

pub use attack_info::{AttackInfo, SquareInfo};
pub use drops::drop_score;
pub use eval::{cp_to_q, q_to_cp, EvalFeature, EvalFeatures, Evaluator};
pub use mate::{find_mate_move, MateSearch, MATE_SEARCH_DEPTH};
