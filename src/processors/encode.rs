//! Tensor encoding: decoded bitmap to model input buffer.
//!
//! The encoder walks a frame's pixels in row-major order, extracts the 8-bit
//! red, green, and blue channels from each packed ARGB value, and normalizes
//! every channel as `(v - 128) / 128.0` into a flat f32 buffer. The output
//! layout is exactly what the inference engine expects: `side * side` pixels,
//! three consecutive values per pixel in R, G, B order.

use crate::core::constants::{IMAGE_MEAN, IMAGE_STD, INPUT_CHANNELS};
use crate::core::errors::ClassifierError;
use crate::processors::tensor::InputTensor;
use image::RgbaImage;

/// Normalizes one 8-bit channel value into [-1.0, 0.9921875].
#[inline]
fn normalize_channel(value: u8) -> f32 {
    (value as f32 - IMAGE_MEAN) / IMAGE_STD
}

/// Encodes decoded bitmaps into model input tensors.
///
/// Encoding is deterministic: a fixed frame always produces a byte-identical
/// buffer. The encoder has no state beyond the required side length and no
/// side effects beyond allocating the returned buffer.
#[derive(Debug, Clone)]
pub struct TensorEncoder {
    side: u32,
}

impl TensorEncoder {
    /// Creates an encoder for the given square input resolution.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `side` is 0.
    pub fn new(side: u32) -> Result<Self, ClassifierError> {
        if side == 0 {
            return Err(ClassifierError::config_error(
                "encoder side must be greater than 0",
            ));
        }
        Ok(Self { side })
    }

    /// The square resolution this encoder produces tensors for.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Encodes an RGBA image whose dimensions already match `side x side`.
    ///
    /// The alpha channel is ignored. Resizing is the caller's concern (the
    /// pipeline resizes before encoding); an image of any other size fails
    /// with `InvalidDimensions`.
    pub fn encode(&self, image: &RgbaImage) -> Result<InputTensor, ClassifierError> {
        let (width, height) = image.dimensions();
        if width != self.side || height != self.side {
            return Err(ClassifierError::invalid_dimensions(self.side, width, height));
        }

        // image::RgbaImage stores pixels row-major, so iteration order
        // matches the packed-buffer path below.
        let pixels: Vec<u32> = image
            .pixels()
            .map(|p| {
                ((p[3] as u32) << 24) | ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32
            })
            .collect();
        self.encode_packed(&pixels, width, height)
    }

    /// Encodes a row-major buffer of packed ARGB pixels.
    ///
    /// Each value packs one pixel: bits 24-31 alpha (ignored), 16-23 red,
    /// 8-15 green, 0-7 blue. This is the entry point for raw capture buffers
    /// that never pass through an image decoder.
    ///
    /// # Errors
    ///
    /// * `InvalidDimensions` if `width`/`height` do not match the encoder side
    /// * `UnsupportedPixelFormat` if the buffer length does not match the
    ///   declared dimensions
    pub fn encode_packed(
        &self,
        pixels: &[u32],
        width: u32,
        height: u32,
    ) -> Result<InputTensor, ClassifierError> {
        if width != self.side || height != self.side {
            return Err(ClassifierError::invalid_dimensions(self.side, width, height));
        }

        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(ClassifierError::unsupported_pixel_format(format!(
                "pixel buffer holds {} values but {}x{} requires {}",
                pixels.len(),
                width,
                height,
                expected
            )));
        }

        let mut data = Vec::with_capacity(expected * INPUT_CHANNELS);
        for &value in pixels {
            data.push(normalize_channel(((value >> 16) & 0xFF) as u8));
            data.push(normalize_channel(((value >> 8) & 0xFF) as u8));
            data.push(normalize_channel((value & 0xFF) as u8));
        }

        Ok(InputTensor::new(self.side, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid_image(side: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(side, side, Rgba(pixel))
    }

    #[test]
    fn test_zero_side_rejected() {
        assert!(TensorEncoder::new(0).is_err());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let encoder = TensorEncoder::new(4).unwrap();
        let image = solid_image(4, [17, 103, 211, 255]);

        let first = encoder.encode(&image).unwrap();
        let second = encoder.encode(&image).unwrap();
        assert_eq!(first.to_ne_bytes(), second.to_ne_bytes());
    }

    #[test]
    fn test_output_size_invariant() {
        let encoder = TensorEncoder::new(8).unwrap();
        let tensor = encoder.encode(&solid_image(8, [1, 2, 3, 4])).unwrap();
        assert_eq!(tensor.byte_len(), 4 * 8 * 8 * 3);
    }

    #[test]
    fn test_output_range_invariant() {
        let encoder = TensorEncoder::new(2).unwrap();
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([0, 255, 128, 255]));
        image.put_pixel(1, 0, Rgba([255, 0, 1, 0]));
        image.put_pixel(0, 1, Rgba([127, 129, 64, 10]));
        image.put_pixel(1, 1, Rgba([200, 50, 250, 128]));

        let tensor = encoder.encode(&image).unwrap();
        for &value in tensor.as_slice() {
            assert!(value >= -1.0 && value <= 0.9921875, "out of range: {value}");
        }
    }

    #[test]
    fn test_mid_gray_encodes_to_zero() {
        // Every pixel 0xFF808080: R = G = B = 128.
        let encoder = TensorEncoder::new(4).unwrap();
        let pixels = vec![0xFF80_8080u32; 16];

        let tensor = encoder.encode_packed(&pixels, 4, 4).unwrap();
        assert_eq!(tensor.as_slice().len(), 4 * 4 * 3);
        assert!(tensor.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_channel_order_and_normalization() {
        // One red pixel: R=255 -> 0.9921875, G=0 -> -1.0, B=0 -> -1.0.
        let encoder = TensorEncoder::new(1).unwrap();
        let tensor = encoder.encode_packed(&[0xFFFF_0000], 1, 1).unwrap();
        assert_eq!(tensor.as_slice(), &[0.9921875, -1.0, -1.0]);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let encoder = TensorEncoder::new(1).unwrap();
        let opaque = encoder.encode_packed(&[0xFF11_2233], 1, 1).unwrap();
        let transparent = encoder.encode_packed(&[0x0011_2233], 1, 1).unwrap();
        assert_eq!(opaque.as_slice(), transparent.as_slice());
    }

    #[test]
    fn test_row_major_pixel_order() {
        // 2x2 frame with a single white pixel at (1, 0): its channels must
        // land at the second pixel slot (indices 3..6).
        let encoder = TensorEncoder::new(2).unwrap();
        let pixels = [0xFF00_0000u32, 0xFFFF_FFFF, 0xFF00_0000, 0xFF00_0000];

        let tensor = encoder.encode_packed(&pixels, 2, 2).unwrap();
        let white = 0.9921875;
        assert_eq!(&tensor.as_slice()[3..6], &[white, white, white]);
        assert_eq!(&tensor.as_slice()[0..3], &[-1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_image_and_packed_paths_agree() {
        let encoder = TensorEncoder::new(2).unwrap();
        let image = solid_image(2, [10, 20, 30, 255]);
        let packed = vec![0xFF0A_141Eu32; 4];

        let from_image = encoder.encode(&image).unwrap();
        let from_packed = encoder.encode_packed(&packed, 2, 2).unwrap();
        assert_eq!(from_image.as_slice(), from_packed.as_slice());
    }

    #[test]
    fn test_wrong_dimensions_rejected() {
        let encoder = TensorEncoder::new(4).unwrap();
        let result = encoder.encode(&solid_image(8, [0, 0, 0, 255]));
        assert!(matches!(
            result,
            Err(ClassifierError::InvalidDimensions {
                expected: 4,
                width: 8,
                height: 8
            })
        ));
    }

    #[test]
    fn test_short_pixel_buffer_rejected() {
        let encoder = TensorEncoder::new(4).unwrap();
        let result = encoder.encode_packed(&[0xFF00_0000; 3], 4, 4);
        assert!(matches!(
            result,
            Err(ClassifierError::UnsupportedPixelFormat { .. })
        ));
    }
}
