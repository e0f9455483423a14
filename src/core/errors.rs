//! Error types for the classification pipeline.
//!
//! This module defines the errors that can occur during a classification
//! call: image loading and encoding errors, inference errors, and
//! configuration errors. A call either returns a full result sequence or
//! fails with one of these; partial results are never produced.

use thiserror::Error;

/// Convenient result alias for classification operations.
pub type ClassifyResult<T> = Result<T, ClassifierError>;

/// Enum representing the errors that can occur in the classification pipeline.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Error occurred while decoding an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// The image presented for encoding does not match the model's required
    /// square input resolution.
    #[error("invalid dimensions: expected {expected}x{expected}, got {width}x{height}")]
    InvalidDimensions {
        /// The required side length.
        expected: u32,
        /// Actual image width.
        width: u32,
        /// Actual image height.
        height: u32,
    },

    /// Pixel extraction was impossible for the supplied frame data.
    #[error("unsupported pixel format: {message}")]
    UnsupportedPixelFormat {
        /// A message describing why pixel extraction failed.
        message: String,
    },

    /// The inference engine failed. Propagated unchanged and never retried.
    #[error("inference")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl ClassifierError {
    /// Creates a ClassifierError for a frame whose dimensions do not match
    /// the required square resolution.
    pub fn invalid_dimensions(expected: u32, width: u32, height: u32) -> Self {
        Self::InvalidDimensions {
            expected,
            width,
            height,
        }
    }

    /// Creates a ClassifierError for a frame whose pixels cannot be extracted.
    pub fn unsupported_pixel_format(message: impl Into<String>) -> Self {
        Self::UnsupportedPixelFormat {
            message: message.into(),
        }
    }

    /// Creates a ClassifierError wrapping an inference engine failure.
    pub fn inference_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Inference(Box::new(error))
    }

    /// Creates a ClassifierError for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a ClassifierError for configuration errors.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

/// Implementation of From<image::ImageError> for ClassifierError.
impl From<image::ImageError> for ClassifierError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = ClassifierError::invalid_dimensions(224, 640, 480);
        assert_eq!(
            err.to_string(),
            "invalid dimensions: expected 224x224, got 640x480"
        );
    }

    #[test]
    fn test_inference_error_preserves_source() {
        let underlying = std::io::Error::new(std::io::ErrorKind::Other, "engine crashed");
        let err = ClassifierError::inference_error(underlying);
        let source = std::error::Error::source(&err).expect("source preserved");
        assert!(source.to_string().contains("engine crashed"));
    }

    #[test]
    fn test_config_error_message() {
        let err = ClassifierError::config_error("top_k must be greater than 0");
        assert!(err.to_string().contains("top_k"));
    }
}
