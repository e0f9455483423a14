//! The classification pipeline orchestrator.
//!
//! [`ImageClassifier`] wires the per-frame sequence together: resize the
//! frame to the model's input resolution, encode it into a tensor, run the
//! inference engine, and rank the resulting probabilities. Each call is
//! synchronous and all-or-nothing; no partial results are ever returned.

use crate::core::config::ClassifierConfig;
use crate::core::errors::{ClassifierError, ClassifyResult};
use crate::core::inference::{InferenceEngine, OrtInfer};
use crate::domain::{LabelTable, Recognition};
use crate::processors::{ResultRanker, TensorEncoder};
use crate::utils::load_image;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An image classifier: model, label table, and pipeline configuration,
/// constructed once and only read by subsequent classification calls.
pub struct ImageClassifier {
    engine: Box<dyn InferenceEngine>,
    encoder: TensorEncoder,
    ranker: ResultRanker,
    labels: LabelTable,
    resize_filter: FilterType,
}

impl std::fmt::Debug for ImageClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageClassifier")
            .field("encoder", &self.encoder)
            .field("ranker", &self.ranker)
            .field("labels", &self.labels.len())
            .finish()
    }
}

impl ImageClassifier {
    /// Classifies a decoded frame.
    ///
    /// The frame is resized (non-aspect-preserving) to the model's square
    /// input resolution, encoded, run through the inference engine, and
    /// ranked. Returns up to `top_k` results in descending confidence order;
    /// the list is empty when nothing passes the confidence threshold.
    ///
    /// # Errors
    ///
    /// Fails with an encoding error or a propagated inference failure; a
    /// failed call is fatal for this frame and never retried.
    pub fn classify(&self, image: &DynamicImage) -> ClassifyResult<Vec<Recognition>> {
        let side = self.encoder.side();
        let resized = image::imageops::resize(image, side, side, self.resize_filter);

        let tensor = self.encoder.encode(&resized)?;
        debug!(side, bytes = tensor.byte_len(), "encoded input tensor");

        let probabilities = self.engine.infer(&tensor)?;
        if probabilities.len() != self.labels.len() {
            warn!(
                probabilities = probabilities.len(),
                labels = self.labels.len(),
                "probability vector length differs from label table"
            );
        }

        let results = self.ranker.rank(&probabilities, &self.labels);
        debug!(results = results.len(), "ranked classification results");
        Ok(results)
    }

    /// Loads an image from disk and classifies it.
    pub fn classify_path(&self, path: &Path) -> ClassifyResult<Vec<Recognition>> {
        let image = load_image(path)?;
        self.classify(&image)
    }

    /// The label table this classifier ranks against.
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }
}

/// Builder for [`ImageClassifier`].
#[derive(Debug, Default)]
pub struct ImageClassifierBuilder {
    config: ClassifierConfig,
    labels: Option<LabelTable>,
    label_path: Option<PathBuf>,
    input_name: Option<String>,
}

impl ImageClassifierBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
            labels: None,
            label_path: None,
            input_name: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the square input resolution required by the model.
    pub fn input_size(mut self, size: u32) -> Self {
        self.config.input_size = size;
        self
    }

    /// Sets the maximum number of results per classification call.
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.config.top_k = top_k;
        self
    }

    /// Sets the inclusive minimum confidence for reported labels.
    pub fn confidence_threshold(mut self, threshold: f32) -> Self {
        self.config.confidence_threshold = threshold;
        self
    }

    /// Sets the resampling filter for the pre-encoding resize.
    pub fn resize_filter(mut self, filter: crate::core::config::ResizeFilter) -> Self {
        self.config.resize_filter = filter;
        self
    }

    /// Sets the ONNX Runtime session configuration.
    pub fn ort_session(mut self, session: crate::core::config::OrtSessionConfig) -> Self {
        self.config.ort_session = Some(session);
        self
    }

    /// Supplies the label table directly.
    pub fn labels(mut self, labels: LabelTable) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Loads the label table from a line-per-label text file at build time.
    pub fn label_file(mut self, path: &Path) -> Self {
        self.label_path = Some(path.to_path_buf());
        self
    }

    /// Overrides the model's input tensor name.
    pub fn input_name(mut self, name: &str) -> Self {
        self.input_name = Some(name.to_string());
        self
    }

    fn resolve_labels(&self) -> ClassifyResult<LabelTable> {
        if let Some(ref labels) = self.labels {
            return Ok(labels.clone());
        }
        if let Some(ref path) = self.label_path {
            return LabelTable::from_file(path);
        }
        Err(ClassifierError::config_error(
            "a label table is required: call labels() or label_file()",
        ))
    }

    /// Builds a classifier backed by an ONNX Runtime session loaded from
    /// `model_path`.
    pub fn build(self, model_path: &Path) -> ClassifyResult<ImageClassifier> {
        let engine: Box<dyn InferenceEngine> = match self.config.ort_session {
            Some(ref session) => Box::new(OrtInfer::from_config(
                session,
                model_path,
                self.input_name.as_deref(),
            )?),
            None => Box::new(OrtInfer::new(model_path, self.input_name.as_deref())?),
        };
        self.build_with_engine(engine)
    }

    /// Builds a classifier around an already-constructed inference engine.
    ///
    /// This is the injection point for alternative runtimes.
    pub fn build_with_engine(
        self,
        engine: Box<dyn InferenceEngine>,
    ) -> ClassifyResult<ImageClassifier> {
        self.config.validate()?;
        let labels = self.resolve_labels()?;

        Ok(ImageClassifier {
            engine,
            encoder: TensorEncoder::new(self.config.input_size)?,
            ranker: ResultRanker::new(self.config.confidence_threshold, self.config.top_k)?,
            labels,
            resize_filter: self.config.resize_filter.to_filter_type(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ClassifierError;
    use crate::processors::InputTensor;
    use image::{Rgba, RgbaImage};

    /// Engine returning a canned probability vector, recording nothing.
    struct FixedEngine {
        probabilities: Vec<f32>,
    }

    impl InferenceEngine for FixedEngine {
        fn infer(&self, _input: &InputTensor) -> ClassifyResult<Vec<f32>> {
            Ok(self.probabilities.clone())
        }
    }

    /// Engine that always fails, standing in for a crashed runtime.
    struct FailingEngine;

    impl InferenceEngine for FailingEngine {
        fn infer(&self, _input: &InputTensor) -> ClassifyResult<Vec<f32>> {
            Err(ClassifierError::inference_error(std::io::Error::new(
                std::io::ErrorKind::Other,
                "runtime unavailable",
            )))
        }
    }

    fn test_labels() -> LabelTable {
        LabelTable::from_labels(vec![
            "cat".to_string(),
            "dog".to_string(),
            "fish".to_string(),
        ])
    }

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([128, 128, 128, 255]),
        ))
    }

    #[test]
    fn test_classify_end_to_end_with_injected_engine() {
        let classifier = ImageClassifierBuilder::new()
            .input_size(4)
            .labels(test_labels())
            .build_with_engine(Box::new(FixedEngine {
                probabilities: vec![0.9, 0.1, 0.5],
            }))
            .unwrap();

        let results = classifier.classify(&test_image(4, 4)).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "cat");
        assert_eq!(results[1].label, "fish");
    }

    #[test]
    fn test_classify_resizes_arbitrary_input() {
        let classifier = ImageClassifierBuilder::new()
            .input_size(4)
            .labels(test_labels())
            .build_with_engine(Box::new(FixedEngine {
                probabilities: vec![0.9, 0.0, 0.0],
            }))
            .unwrap();

        // 64x48 frame must be scaled to 4x4 before encoding.
        let results = classifier.classify(&test_image(64, 48)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "cat");
    }

    #[test]
    fn test_engine_failure_propagates() {
        let classifier = ImageClassifierBuilder::new()
            .input_size(4)
            .labels(test_labels())
            .build_with_engine(Box::new(FailingEngine))
            .unwrap();

        let result = classifier.classify(&test_image(4, 4));
        assert!(matches!(result, Err(ClassifierError::Inference(_))));
    }

    #[test]
    fn test_nothing_above_threshold_yields_empty_ok() {
        let classifier = ImageClassifierBuilder::new()
            .input_size(4)
            .labels(test_labels())
            .build_with_engine(Box::new(FixedEngine {
                probabilities: vec![0.1, 0.2, 0.3],
            }))
            .unwrap();

        let results = classifier.classify(&test_image(4, 4)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_longer_probability_vector_maps_to_unknown() {
        let classifier = ImageClassifierBuilder::new()
            .input_size(4)
            .labels(test_labels())
            .build_with_engine(Box::new(FixedEngine {
                probabilities: vec![0.0, 0.0, 0.0, 0.95],
            }))
            .unwrap();

        let results = classifier.classify(&test_image(4, 4)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "Unknown");
    }

    #[test]
    fn test_builder_requires_labels() {
        let result = ImageClassifierBuilder::new()
            .input_size(4)
            .build_with_engine(Box::new(FixedEngine {
                probabilities: vec![],
            }));
        assert!(matches!(result, Err(ClassifierError::ConfigError { .. })));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = ImageClassifierBuilder::new()
            .input_size(4)
            .top_k(0)
            .labels(test_labels())
            .build_with_engine(Box::new(FixedEngine {
                probabilities: vec![],
            }));
        assert!(matches!(result, Err(ClassifierError::ConfigError { .. })));
    }
}
