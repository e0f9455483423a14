//! ONNX Runtime-backed inference engine.

use crate::core::config::{OrtGraphOptimizationLevel, OrtSessionConfig};
use crate::core::errors::{ClassifierError, ClassifyResult};
use crate::core::inference::InferenceEngine;
use crate::core::Tensor4D;
use crate::processors::InputTensor;
use ort::logging::LogLevel;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::value::TensorRef;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// Inference engine backed by an ONNX Runtime session.
///
/// The session is created once from a model file and reused for every
/// classification call. `Session::run` requires exclusive access, so the
/// session sits behind a mutex; the pipeline issues one call at a time.
pub struct OrtInfer {
    session: Mutex<Session>,
    input_name: String,
    output_name: Option<String>,
    model_path: PathBuf,
    model_name: String,
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtInfer {
    /// Creates a new OrtInfer with default session settings.
    ///
    /// The input tensor name defaults to the model's first declared input
    /// when `input_name` is `None`.
    pub fn new(
        model_path: impl AsRef<Path>,
        input_name: Option<&str>,
    ) -> Result<Self, ClassifierError> {
        let builder = Session::builder()?.with_log_level(LogLevel::Error)?;
        Self::from_builder(builder, model_path, input_name)
    }

    /// Creates a new OrtInfer, applying the session configuration.
    pub fn from_config(
        config: &OrtSessionConfig,
        model_path: impl AsRef<Path>,
        input_name: Option<&str>,
    ) -> Result<Self, ClassifierError> {
        let builder = Session::builder()?.with_log_level(LogLevel::Error)?;
        let builder = Self::apply_session_config(builder, config)?;
        Self::from_builder(builder, model_path, input_name)
    }

    fn apply_session_config(
        mut builder: SessionBuilder,
        config: &OrtSessionConfig,
    ) -> Result<SessionBuilder, ClassifierError> {
        if let Some(threads) = config.intra_threads {
            builder = builder.with_intra_threads(threads)?;
        }
        if let Some(threads) = config.inter_threads {
            builder = builder.with_inter_threads(threads)?;
        }
        if let Some(enabled) = config.parallel_execution {
            builder = builder.with_parallel_execution(enabled)?;
        }
        if let Some(level) = config.optimization_level {
            let level = match level {
                OrtGraphOptimizationLevel::DisableAll => GraphOptimizationLevel::Disable,
                OrtGraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
                OrtGraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
                OrtGraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
            };
            builder = builder.with_optimization_level(level)?;
        }
        Ok(builder)
    }

    fn from_builder(
        builder: SessionBuilder,
        model_path: impl AsRef<Path>,
        input_name: Option<&str>,
    ) -> Result<Self, ClassifierError> {
        let path = model_path.as_ref();
        let session = builder.commit_from_file(path).map_err(|e| {
            ClassifierError::invalid_input(format!(
                "failed to create ONNX session from '{}': {}",
                path.display(),
                e
            ))
        })?;

        let input_name = match input_name {
            Some(name) => name.to_string(),
            None => session
                .inputs
                .first()
                .map(|input| input.name.clone())
                .ok_or_else(|| {
                    ClassifierError::invalid_input(
                        "model declares no inputs - model may be invalid or corrupted",
                    )
                })?,
        };

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        info!(model = %model_name, path = %path.display(), "loaded ONNX model");

        Ok(OrtInfer {
            session: Mutex::new(session),
            input_name,
            output_name: None,
            model_path: path.to_path_buf(),
            model_name,
        })
    }

    /// Returns the model path associated with this engine.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Returns the model name associated with this engine.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the configured or discovered output tensor name.
    fn output_name(&self) -> Result<String, ClassifierError> {
        if let Some(ref name) = self.output_name {
            return Ok(name.clone());
        }
        let session = self.session.lock().map_err(|_| {
            ClassifierError::invalid_input("failed to acquire session lock")
        })?;
        session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| {
                ClassifierError::invalid_input(
                    "model declares no outputs - model may be invalid or corrupted",
                )
            })
    }

    /// Runs the session on a `(1, side, side, 3)` tensor and returns the
    /// flattened f32 output.
    pub fn infer_probabilities(&self, x: &Tensor4D) -> Result<Vec<f32>, ClassifierError> {
        let output_name = self.output_name()?;

        let input_tensor = TensorRef::from_array_view(x.view())
            .map_err(ClassifierError::inference_error)?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self.session.lock().map_err(|_| {
            ClassifierError::invalid_input("failed to acquire session lock")
        })?;

        let outputs = session
            .run(inputs)
            .map_err(ClassifierError::inference_error)?;

        let (output_shape, output_data) = outputs[output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(ClassifierError::inference_error)?;

        let expected_len: i64 = output_shape.iter().product();
        if output_data.len() as i64 != expected_len {
            return Err(ClassifierError::invalid_input(format!(
                "model '{}' output data size mismatch: shape {:?} declares {} values, got {}",
                self.model_name,
                output_shape,
                expected_len,
                output_data.len()
            )));
        }

        // Accept [N] or [1, N] outputs; anything batched beyond one frame is
        // outside this pipeline's contract.
        if output_shape.len() == 2 && output_shape[0] != 1 {
            return Err(ClassifierError::invalid_input(format!(
                "model '{}' returned a batch of {} predictions, expected 1",
                self.model_name, output_shape[0]
            )));
        }

        Ok(output_data.to_vec())
    }
}

impl InferenceEngine for OrtInfer {
    fn infer(&self, input: &InputTensor) -> ClassifyResult<Vec<f32>> {
        let tensor = input.to_array4()?;
        self.infer_probabilities(&tensor)
    }
}
