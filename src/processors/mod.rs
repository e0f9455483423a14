//! Frame processing: tensor encoding and result ranking.
//!
//! These are the two transforms evaluated in sequence per frame: a decoded
//! bitmap becomes a model-ready tensor buffer, and the model's raw
//! probability vector becomes a bounded, ordered list of labeled results.

pub mod encode;
pub mod tensor;
pub mod topk;

pub use encode::TensorEncoder;
pub use tensor::InputTensor;
pub use topk::ResultRanker;
