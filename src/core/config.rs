//! Configuration types for the classification pipeline.
//!
//! This module provides the classifier configuration (input resolution,
//! ranking parameters, resize filter) and the ONNX Runtime session
//! configuration (threading and optimization knobs).

use crate::core::constants::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_INPUT_SIZE, DEFAULT_INTRA_THREADS, DEFAULT_TOP_K,
};
use crate::core::errors::ClassifierError;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Resampling filters available for the pre-encoding resize.
///
/// The model does not require any particular resampling; the default is
/// `Nearest` (plain non-filtered scaling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeFilter {
    /// Nearest-neighbor sampling.
    Nearest,
    /// Linear (triangle) filter.
    Triangle,
    /// Cubic (Catmull-Rom) filter.
    CatmullRom,
    /// Gaussian filter.
    Gaussian,
    /// Lanczos filter with window 3.
    Lanczos3,
}

impl Default for ResizeFilter {
    fn default() -> Self {
        Self::Nearest
    }
}

impl ResizeFilter {
    /// Maps the filter to the `image` crate's resampling type.
    pub fn to_filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Graph optimization levels for ONNX Runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OrtGraphOptimizationLevel {
    /// Disable all optimizations.
    DisableAll,
    /// Enable basic optimizations.
    Level1,
    /// Enable extended optimizations.
    Level2,
    /// Enable all optimizations.
    Level3,
}

impl Default for OrtGraphOptimizationLevel {
    fn default() -> Self {
        Self::Level1
    }
}

/// Configuration for ONNX Runtime sessions.
///
/// The engine may parallelize internally across execution threads; from the
/// pipeline's perspective inference stays a single atomic, blocking call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrtSessionConfig {
    /// Number of threads used to parallelize execution within nodes.
    pub intra_threads: Option<usize>,
    /// Number of threads used to parallelize execution across nodes.
    pub inter_threads: Option<usize>,
    /// Enable parallel execution mode.
    pub parallel_execution: Option<bool>,
    /// Graph optimization level.
    pub optimization_level: Option<OrtGraphOptimizationLevel>,
}

impl OrtSessionConfig {
    /// Creates a new OrtSessionConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of intra-op threads.
    pub fn with_intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = Some(threads);
        self
    }

    /// Sets the number of inter-op threads.
    pub fn with_inter_threads(mut self, threads: usize) -> Self {
        self.inter_threads = Some(threads);
        self
    }

    /// Enables or disables parallel execution.
    pub fn with_parallel_execution(mut self, enabled: bool) -> Self {
        self.parallel_execution = Some(enabled);
        self
    }

    /// Sets the graph optimization level.
    pub fn with_optimization_level(mut self, level: OrtGraphOptimizationLevel) -> Self {
        self.optimization_level = Some(level);
        self
    }
}

/// Configuration for the image classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Square input resolution required by the model.
    pub input_size: u32,
    /// Maximum number of results returned per classification call.
    pub top_k: usize,
    /// Minimum confidence a label must reach to be reported (inclusive).
    pub confidence_threshold: f32,
    /// Resampling filter used for the pre-encoding resize.
    pub resize_filter: ResizeFilter,
    /// ONNX Runtime session configuration.
    pub ort_session: Option<OrtSessionConfig>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_INPUT_SIZE,
            top_k: DEFAULT_TOP_K,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            resize_filter: ResizeFilter::default(),
            ort_session: Some(
                OrtSessionConfig::new().with_intra_threads(DEFAULT_INTRA_THREADS),
            ),
        }
    }
}

impl ClassifierConfig {
    /// Creates a new ClassifierConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// * `input_size` is 0
    /// * `top_k` is 0
    /// * `confidence_threshold` is negative or not finite
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.input_size == 0 {
            return Err(ClassifierError::config_error(
                "input_size must be greater than 0",
            ));
        }

        if self.top_k == 0 {
            return Err(ClassifierError::config_error(
                "top_k must be greater than 0",
            ));
        }

        if !self.confidence_threshold.is_finite() || self.confidence_threshold < 0.0 {
            return Err(ClassifierError::config_error(format!(
                "confidence_threshold must be finite and non-negative, got {}",
                self.confidence_threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClassifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.input_size, 224);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.confidence_threshold, 0.4);
        assert_eq!(config.resize_filter, ResizeFilter::Nearest);
    }

    #[test]
    fn test_zero_input_size_rejected() {
        let config = ClassifierConfig {
            input_size: 0,
            ..ClassifierConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let config = ClassifierConfig {
            top_k: 0,
            ..ClassifierConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = ClassifierConfig {
            confidence_threshold: f32::NAN,
            ..ClassifierConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = ClassifierConfig {
            input_size: 299,
            top_k: 5,
            confidence_threshold: 0.25,
            resize_filter: ResizeFilter::Triangle,
            ort_session: Some(OrtSessionConfig::new().with_intra_threads(2)),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ClassifierConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.input_size, 299);
        assert_eq!(parsed.top_k, 5);
        assert_eq!(parsed.resize_filter, ResizeFilter::Triangle);
        assert_eq!(parsed.ort_session.unwrap().intra_threads, Some(2));
    }
}
