//! Image Classification Demo
//!
//! Classifies one or more images with a pretrained ONNX model and prints the
//! top matching labels with confidence scores.
//!
//! Usage:
//! ```
//! cargo run --example classify -- --model-path <model.onnx> --label-path <labels.txt> <image_paths>...
//! ```

use clap::Parser;
use frame_classifier::prelude::*;
use std::path::Path;
use tracing::{error, info};

/// Command-line arguments for the classification demo
#[derive(Parser)]
#[command(name = "classify")]
#[command(about = "Image classification demo - ranks the top labels for each image")]
struct Args {
    /// Path to the ONNX model file
    #[arg(short, long)]
    model_path: String,

    /// Path to the label file (one label per line)
    #[arg(short, long)]
    label_path: String,

    /// Square input resolution expected by the model
    #[arg(long, default_value_t = 224)]
    input_size: u32,

    /// Number of top results to report per image
    #[arg(long, default_value_t = 3)]
    top_k: usize,

    /// Minimum confidence for a label to be reported
    #[arg(long, default_value_t = 0.4)]
    threshold: f32,

    /// Image file paths to classify
    #[arg(required = true)]
    images: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();

    if !Path::new(&args.model_path).exists() {
        error!("Model file not found: {}", args.model_path);
        return Err("Model file not found".into());
    }
    if !Path::new(&args.label_path).exists() {
        error!("Label file not found: {}", args.label_path);
        return Err("Label file not found".into());
    }

    let classifier = ImageClassifierBuilder::new()
        .input_size(args.input_size)
        .top_k(args.top_k)
        .confidence_threshold(args.threshold)
        .label_file(Path::new(&args.label_path))
        .build(Path::new(&args.model_path))?;

    for (i, image_path) in args.images.iter().enumerate() {
        info!(
            "Processing image {} of {}: {}",
            i + 1,
            args.images.len(),
            image_path
        );
        match classifier.classify_path(Path::new(image_path)) {
            Ok(results) if results.is_empty() => {
                info!("   No label passed the confidence threshold");
            }
            Ok(results) => {
                for recognition in results {
                    info!("   {}", recognition);
                }
            }
            Err(e) => {
                error!("Classification failed for {}: {}", image_path, e);
                continue;
            }
        }
    }

    Ok(())
}
