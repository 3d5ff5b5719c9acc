//! Image decoding and PNG encoding.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the
//! 3-channel, 8-bit buffer every transform works on. Alpha is dropped.
//! Outputs are written back as PNG.

use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::types::{PipelineError, RgbImage};

/// Decode raw image bytes into an RGB buffer.
///
/// Supports whatever formats the `image` crate is built with (PNG,
/// JPEG, BMP, WebP).
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
#[must_use = "returns the decoded image"]
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}

/// Encode an RGB buffer as PNG.
///
/// # Errors
///
/// Returns [`PipelineError::ImageEncode`] if the encoder rejects the
/// buffer (for example, an image with zero width or height).
#[must_use = "returns the encoded bytes"]
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PipelineError::ImageEncode(e.to_string()))?;
    Ok(buf)
}
