//! ONNX Runtime classifier backend

use crate::error::{PipelineError, Result};
use crate::models::classifier::{check_width, Classifier};
use crate::types::FraudLabel;
use ort::memory::Allocator;
use ort::session::{builder::GraphOptimizationLevel, Session, SessionOutputs};
use ort::value::{
    DowncastableTarget, DynMapValueType, DynSequenceValueType, DynValue, Tensor, ValueType,
};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Raw outputs of one session run.
#[derive(Debug, Clone, Copy)]
struct ModelOutput {
    label: Option<i64>,
    probabilities: [f64; 2],
}

/// Feature width from a model input shape such as `[-1, 16]`.
///
/// Symbolic or missing trailing dimensions fall back to `fallback`.
fn resolve_input_width(dims: &[i64], fallback: usize) -> usize {
    match dims.last() {
        Some(&width) if width > 0 => width as usize,
        _ => fallback,
    }
}

/// Classifier exported to ONNX (e.g. a random forest via skl2onnx).
///
/// A session run needs exclusive access, so runs are serialized
/// through a mutex.
pub struct OnnxClassifier {
    name: String,
    session: Mutex<Session>,
    input_name: String,
    label_output: Option<String>,
    proba_output: String,
    n_features: usize,
}

impl OnnxClassifier {
    /// Load an ONNX model.
    ///
    /// The feature width comes from the model's input shape; `fallback_width`
    /// is used only when that dimension is symbolic.
    pub fn load<P: AsRef<Path>>(
        path: P,
        fallback_width: usize,
        onnx_threads: usize,
    ) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::artifact_load("classifier", path, "file not found"));
        }

        info!(path = %path.display(), threads = onnx_threads, "Loading ONNX classifier");

        let session = Session::builder()
            .map_err(|e| PipelineError::artifact_load("classifier", path, e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PipelineError::artifact_load("classifier", path, e))?
            .with_intra_threads(onnx_threads)
            .map_err(|e| PipelineError::artifact_load("classifier", path, e))?
            .commit_from_file(path)
            .map_err(|e| PipelineError::artifact_load("classifier", path, e))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let input_dims: Vec<i64> = session
            .inputs
            .first()
            .and_then(|i| match &i.input_type {
                ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
                _ => None,
            })
            .unwrap_or_default();
        let n_features = resolve_input_width(&input_dims, fallback_width);

        let label_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("label"))
            .map(|o| o.name.clone());

        let proba_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob"))
            .or_else(|| session.outputs.iter().find(|o| !o.name.contains("label")))
            .map(|o| o.name.clone())
            .ok_or_else(|| {
                PipelineError::artifact_load("classifier", path, "model has no probability output")
            })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "onnx".to_string());

        info!(
            model = %name,
            input = %input_name,
            input_dims = ?input_dims,
            n_features = n_features,
            label_output = ?label_output,
            proba_output = %proba_output,
            "ONNX classifier loaded"
        );

        Ok(Self {
            name,
            session: Mutex::new(session),
            input_name,
            label_output,
            proba_output,
            n_features,
        })
    }

    /// Run the model once and collect label and probabilities.
    fn run(&self, features: &[f64]) -> Result<ModelOutput> {
        check_width(self, features)?;

        let shape = vec![1_i64, features.len() as i64];
        let data: Vec<f32> = features.iter().map(|&x| x as f32).collect();
        let input_tensor = Tensor::from_array((shape, data))
            .map_err(|e| PipelineError::Inference(format!("failed to create input tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| PipelineError::Inference(format!("lock error: {e}")))?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_tensor])
            .map_err(|e| PipelineError::Inference(e.to_string()))?;

        let probabilities = self.extract_probabilities(&outputs)?;
        let label = match &self.label_output {
            Some(name) => self.extract_label(&outputs, name)?,
            None => None,
        };

        debug!(model = %self.name, ?label, ?probabilities, "ONNX inference complete");

        Ok(ModelOutput {
            label,
            probabilities,
        })
    }

    fn extract_label(&self, outputs: &SessionOutputs, name: &str) -> Result<Option<i64>> {
        let Some(output) = outputs.get(name) else {
            return Ok(None);
        };
        let (_, data) = output
            .try_extract_tensor::<i64>()
            .map_err(|e| PipelineError::Inference(format!("label output: {e}")))?;
        Ok(data.first().copied())
    }

    /// Handles both tensor outputs (`zipmap=False`) and seq(map) outputs.
    fn extract_probabilities(&self, outputs: &SessionOutputs) -> Result<[f64; 2]> {
        let output = outputs.get(self.proba_output.as_str()).ok_or_else(|| {
            PipelineError::Inference(format!("missing output '{}'", self.proba_output))
        })?;

        if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
            let dims: Vec<i64> = shape.iter().copied().collect();
            let num_classes = dims.last().copied().unwrap_or(0);
            return match (num_classes, data) {
                (2, [p0, p1, ..]) => Ok([*p0 as f64, *p1 as f64]),
                // Single column holds P(fraud)
                (1, [p1, ..]) => Ok([1.0 - *p1 as f64, *p1 as f64]),
                _ => Err(PipelineError::Inference(format!(
                    "unexpected probability tensor shape {dims:?}"
                ))),
            };
        }

        if DynSequenceValueType::can_downcast(&output.dtype()) {
            return self.extract_from_sequence_map(output);
        }

        Err(PipelineError::Inference(format!(
            "unsupported probability output type {:?}",
            output.dtype()
        )))
    }

    /// Model label, or argmax of the probabilities when there is no label output.
    fn label_of(output: &ModelOutput) -> Result<FraudLabel> {
        match output.label {
            Some(class) => FraudLabel::from_class(class).ok_or_else(|| {
                PipelineError::Inference(format!("model returned unknown class {class}"))
            }),
            None if output.probabilities[1] > output.probabilities[0] => Ok(FraudLabel::Fraudulent),
            None => Ok(FraudLabel::NotFraudulent),
        }
    }

    /// Extract probabilities from seq(map(int64, float)), batch size 1.
    fn extract_from_sequence_map(&self, output: &DynValue) -> Result<[f64; 2]> {
        let allocator = Allocator::default();
        let sequence = output
            .downcast_ref::<DynSequenceValueType>()
            .map_err(|e| PipelineError::Inference(format!("probability sequence: {e}")))?;
        let maps = sequence
            .try_extract_sequence::<DynMapValueType>(&allocator)
            .map_err(|e| PipelineError::Inference(format!("probability sequence: {e}")))?;
        let first = maps
            .first()
            .ok_or_else(|| PipelineError::Inference("empty probability sequence".to_string()))?;
        let kv_pairs = first
            .try_extract_key_values::<i64, f32>()
            .map_err(|e| PipelineError::Inference(format!("probability map: {e}")))?;

        let mut probabilities = [None, None];
        for (class_id, prob) in kv_pairs {
            if let Some(label) = FraudLabel::from_class(class_id) {
                probabilities[label.class_index()] = Some(prob as f64);
            }
        }

        match probabilities {
            [Some(p0), Some(p1)] => Ok([p0, p1]),
            [Some(p0), None] => Ok([p0, 1.0 - p0]),
            [None, Some(p1)] => Ok([1.0 - p1, p1]),
            [None, None] => Err(PipelineError::Inference(
                "no class probabilities in map".to_string(),
            )),
        }
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &[f64]) -> Result<(FraudLabel, [f64; 2])> {
        let output = self.run(features)?;
        Ok((Self::label_of(&output)?, output.probabilities))
    }

    fn predict_label(&self, features: &[f64]) -> Result<FraudLabel> {
        Self::label_of(&self.run(features)?)
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2]> {
        Ok(self.run(features)?.probabilities)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn name(&self) -> &str {
        &self.name
    }
}
