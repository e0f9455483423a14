//! The inference engine boundary.
//!
//! The pipeline treats inference as an opaque, synchronous, blocking
//! operation: given an encoded input tensor, the engine returns one
//! probability per label index. Implementations can bind to any local
//! inference runtime; [`OrtInfer`] binds to ONNX Runtime.

mod ort_infer;

pub use ort_infer::OrtInfer;

use crate::core::errors::ClassifyResult;
use crate::processors::InputTensor;

/// A synchronous inference engine producing per-label probabilities.
///
/// The engine is initialized once with a fixed model and only read by
/// subsequent classification calls. There are no partial results and no
/// cancellation: a call either returns the full probability vector or fails.
pub trait InferenceEngine: Send + Sync {
    /// Runs the model on an encoded input tensor and returns the raw
    /// per-label probability vector.
    fn infer(&self, input: &InputTensor) -> ClassifyResult<Vec<f32>>;
}
