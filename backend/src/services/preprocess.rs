//! Image preprocessing for the freshness classifier
//!
//! Decodes an upload, resizes it to the square model input and normalizes
//! pixel values into `[-1, 1]`.

use image::imageops::FilterType;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Normalized RGB tensor, row-major `[height][width][channel]`
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    size: u32,
    data: Vec<f32>,
}

impl ImageTensor {
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Pixel at `(x, y)` as `[r, g, b]`
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 3] {
        let i = ((y * self.size + x) * 3) as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Nested `[rows][cols][rgb]` view, the shape model servers expect
    pub fn rows(&self) -> Vec<Vec<[f32; 3]>> {
        self.data
            .chunks_exact(self.size as usize * 3)
            .map(|row| {
                row.chunks_exact(3)
                    .map(|px| [px[0], px[1], px[2]])
                    .collect()
            })
            .collect()
    }
}

impl Serialize for ImageTensor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows().serialize(serializer)
    }
}

/// Map an 8-bit channel value into `[-1, 1]`
pub fn normalize_channel(value: u8) -> f32 {
    (f32::from(value) / 127.5) - 1.0
}

/// Decode image bytes and build the classifier input tensor.
///
/// The image is stretched to `size x size`; aspect ratio is not preserved.
pub fn prepare_image(bytes: &[u8], size: u32) -> AppResult<ImageTensor> {
    if bytes.is_empty() {
        return Err(AppError::ImageDecode("Uploaded file is empty".to_string()));
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| AppError::ImageDecode(format!("Failed to decode image: {}", e)))?;

    let rgb = img.resize_exact(size, size, FilterType::Lanczos3).to_rgb8();
    let data = rgb
        .pixels()
        .flat_map(|p| p.0)
        .map(normalize_channel)
        .collect();

    Ok(ImageTensor { size, data })
}
