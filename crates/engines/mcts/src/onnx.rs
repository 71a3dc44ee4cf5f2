//! ONNX model loading and inference
//!
//! Requires the `onnx` feature. The model takes a `[1, 34, 64]` float
//! tensor and returns the policy (`[1, 5184]`) followed by the value.

use std::path::Path;

use tract_onnx::prelude::*;
use zh_core::Position;

use crate::features::{encode_planes, NUM_PLANES};
use crate::predictor::{Prediction, Predictor, PredictorError};

/// Policy/value network evaluated with tract.
pub struct OnnxPredictor {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>,
    name: String,
}

impl OnnxPredictor {
    /// Load an ONNX model from the given path.
    pub fn load(path: &Path) -> Result<Self, PredictorError> {
        let load_err = |e: TractError| PredictorError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(load_err)?
            .with_input_fact(0, f32::fact([1, NUM_PLANES, 64]).into())
            .map_err(load_err)?
            .into_optimized()
            .map_err(load_err)?
            .into_runnable()
            .map_err(load_err)?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "onnx".to_string());
        Ok(Self { model, name })
    }
}

impl Predictor for OnnxPredictor {
    fn predict(&mut self, pos: &Position) -> Result<Prediction, PredictorError> {
        let inference = |e: TractError| PredictorError::Inference(e.to_string());

        let input: Tensor =
            tract_ndarray::Array3::from_shape_vec((1, NUM_PLANES, 64), encode_planes(pos))
                .map_err(|e| PredictorError::Inference(e.to_string()))?
                .into();
        let outputs = self.model.run(tvec!(input.into())).map_err(inference)?;
        if outputs.len() < 2 {
            return Err(PredictorError::Inference(format!(
                "expected policy and value outputs, got {}",
                outputs.len()
            )));
        }

        let policy: Vec<f32> = outputs[0]
            .to_array_view::<f32>()
            .map_err(inference)?
            .iter()
            .copied()
            .collect();
        let value = outputs[1]
            .to_array_view::<f32>()
            .map_err(inference)?
            .iter()
            .next()
            .copied()
            .unwrap_or(0.0);

        Prediction { policy, value }.checked()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
