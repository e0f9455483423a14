//! Core types for the classification pipeline.
//!
//! This module provides the error taxonomy, configuration layer, pipeline
//! constants, and the inference engine boundary.

pub mod config;
pub mod constants;
pub mod errors;
pub mod inference;

pub use errors::{ClassifierError, ClassifyResult};

/// 4D tensor type used at the inference boundary (NHWC for this pipeline).
pub type Tensor4D = ndarray::Array4<f32>;
