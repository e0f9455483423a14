//! Image loading helpers.

use crate::core::errors::ClassifierError;
use image::{DynamicImage, ImageBuffer, RgbaImage};

/// Loads an image from a file path.
///
/// Handles any format supported by the image crate.
///
/// # Errors
///
/// Returns a `ClassifierError::ImageLoad` error if the image cannot be
/// decoded from the specified path.
pub fn load_image(path: &std::path::Path) -> Result<DynamicImage, ClassifierError> {
    image::open(path).map_err(ClassifierError::ImageLoad)
}

/// Creates an RGBA image from raw pixel data.
///
/// The data must be 4 bytes per pixel in R, G, B, A order and its length
/// must match the declared dimensions. This is the entry point for capture
/// buffers handed over without an encoded container format.
///
/// # Errors
///
/// Returns a `ClassifierError::UnsupportedPixelFormat` error if the buffer
/// length does not match `width * height * 4`.
pub fn rgba_from_raw(
    width: u32,
    height: u32,
    data: Vec<u8>,
) -> Result<RgbaImage, ClassifierError> {
    let expected = (width as usize) * (height as usize) * 4;
    if data.len() != expected {
        return Err(ClassifierError::unsupported_pixel_format(format!(
            "raw buffer holds {} bytes but {}x{} RGBA requires {}",
            data.len(),
            width,
            height,
            expected
        )));
    }

    ImageBuffer::from_raw(width, height, data).ok_or_else(|| {
        ClassifierError::unsupported_pixel_format(format!(
            "raw buffer not convertible to a {width}x{height} RGBA image"
        ))
    })
}
