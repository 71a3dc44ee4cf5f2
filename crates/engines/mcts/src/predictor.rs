//! Policy/value evaluation of leaf positions.
//!
//! The search only talks to the [`Predictor`] trait. [`UniformPredictor`]
//! needs no model and is what the engine uses by default; with the `onnx`
//! feature a network can be loaded from a model file.

use std::path::PathBuf;

use thiserror::Error;
use zh_core::{Position, ACTION_SIZE};

#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("failed to load model {path}: {message}")]
    Load { path: PathBuf, message: String },
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("policy has {actual} entries, expected {expected}")]
    PolicyShape { expected: usize, actual: usize },
}

/// Network output for one position.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Probability per action index (see `zh_core::encode`)
    pub policy: Vec<f32>,
    /// Expected outcome for the side to move, in [-1, 1]
    pub value: f32,
}

impl Prediction {
    pub fn uniform() -> Self {
        Self {
            policy: vec![1.0 / ACTION_SIZE as f32; ACTION_SIZE],
            value: 0.0,
        }
    }

    /// Reject predictions whose policy does not cover the action space.
    pub fn checked(self) -> Result<Self, PredictorError> {
        if self.policy.len() != ACTION_SIZE {
            return Err(PredictorError::PolicyShape {
                expected: ACTION_SIZE,
                actual: self.policy.len(),
            });
        }
        Ok(self)
    }
}

pub trait Predictor: Send {
    fn predict(&mut self, pos: &Position) -> Result<Prediction, PredictorError>;

    /// Short label for logs and engine names.
    fn name(&self) -> &str;
}

/// Flat policy and a neutral value for every position.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPredictor;

impl Predictor for UniformPredictor {
    fn predict(&mut self, _pos: &Position) -> Result<Prediction, PredictorError> {
        Ok(Prediction::uniform())
    }

    fn name(&self) -> &str {
        "uniform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_prediction() {
        let prediction = UniformPredictor.predict(&Position::startpos()).unwrap();
        assert_eq!(prediction.policy.len(), ACTION_SIZE);
        assert_eq!(prediction.value, 0.0);
        let sum: f32 = prediction.policy.iter().sum();
        assert!((sum - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_checked_rejects_short_policy() {
        let short = Prediction {
            policy: vec![0.5; 10],
            value: 0.1,
        };
        assert!(matches!(
            short.checked(),
            Err(PredictorError::PolicyShape { actual: 10, .. })
        ));
        assert!(Prediction::uniform().checked().is_ok());
    }
}
