//! # frame-classifier
//!
//! An on-device image classification pipeline: captured frames are encoded
//! into the tensor layout a pretrained classifier expects, run through an
//! ONNX model, and reduced to the top matching labels with confidence scores.
//!
//! ## Components
//!
//! - **Tensor encoding**: a decoded bitmap is resized to the model's square
//!   input resolution and converted to a flat buffer of normalized `f32`
//!   channel values in row-major R, G, B order.
//! - **Result ranking**: the model's per-label probability vector is filtered
//!   by a confidence threshold and reduced to the top-k labels in descending
//!   confidence order.
//! - **Inference**: an injectable [`core::inference::InferenceEngine`] trait
//!   with an ONNX Runtime implementation ([`core::inference::OrtInfer`]);
//!   the model is loaded once and reused across calls.
//!
//! ## Modules
//!
//! * [`core`] - Error handling, configuration, constants, and the inference boundary
//! * [`domain`] - `Recognition` results and the label table
//! * [`processors`] - Tensor encoding and top-k ranking
//! * [`pipeline`] - The classifier orchestrator and its builder
//! * [`utils`] - Image loading and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frame_classifier::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = ImageClassifierBuilder::new()
//!     .input_size(224)
//!     .top_k(3)
//!     .confidence_threshold(0.4)
//!     .label_file(Path::new("models/labels.txt"))
//!     .build(Path::new("models/mobilenet.onnx"))?;
//!
//! let image = load_image(Path::new("frame.jpg"))?;
//! for recognition in classifier.classify(&image)? {
//!     println!("{recognition}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use frame_classifier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::config::ClassifierConfig;
    pub use crate::core::inference::InferenceEngine;
    pub use crate::core::{ClassifierError, ClassifyResult};
    pub use crate::domain::{LabelTable, Recognition};
    pub use crate::pipeline::{ImageClassifier, ImageClassifierBuilder};
    pub use crate::utils::{init_tracing, load_image};
}
