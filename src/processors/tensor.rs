//! Model input tensor buffer.

use crate::core::errors::ClassifierError;
use crate::core::Tensor4D;
use crate::core::constants::INPUT_CHANNELS;

/// A fully populated model input buffer.
///
/// Holds `side * side * 3` normalized f32 values in row-major pixel order,
/// each pixel contributing three consecutive values in R, G, B channel
/// order. Allocated fresh per classification call and discarded after the
/// inference call returns.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    side: u32,
    data: Vec<f32>,
}

impl InputTensor {
    pub(crate) fn new(side: u32, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), (side as usize).pow(2) * INPUT_CHANNELS);
        Self { side, data }
    }

    /// The square resolution this tensor was encoded at.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// The normalized channel values in row-major R, G, B order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The buffer size in bytes: `4 * side * side * 3`.
    pub fn byte_len(&self) -> usize {
        self.data.len() * std::mem::size_of::<f32>()
    }

    /// Serializes the buffer to bytes in native byte order.
    ///
    /// Engines consuming raw byte buffers read this layout directly; the
    /// in-process ort boundary uses [`InputTensor::to_array4`] instead.
    pub fn to_ne_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        for value in &self.data {
            bytes.extend_from_slice(&value.to_ne_bytes());
        }
        bytes
    }

    /// Views the buffer as a `(1, side, side, 3)` NHWC tensor.
    pub fn to_array4(&self) -> Result<Tensor4D, ClassifierError> {
        let side = self.side as usize;
        ndarray::Array4::from_shape_vec((1, side, side, INPUT_CHANNELS), self.data.clone())
            .map_err(ClassifierError::Tensor)
    }
}
