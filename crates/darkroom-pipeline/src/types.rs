//! Shared types for the darkroom adjustment pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Re-export `RgbImage` so downstream crates can hold image buffers
/// without depending on `image` directly.
pub use image::RgbImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of an image buffer.
    #[must_use]
    pub fn of(image: &RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

/// An 8-bit color triple.
///
/// Stored as RGB. The wire format emitted by suggestion sources orders
/// channels as `[B, G, R]`, so serde reads and writes that order. A
/// canonical record serialized and normalized again keeps its colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Build a color from RGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `[B, G, R]` wire triple.
    #[must_use]
    pub const fn from_bgr(bgr: [u8; 3]) -> Self {
        Self {
            r: bgr[2],
            g: bgr[1],
            b: bgr[0],
        }
    }

    /// The `[B, G, R]` wire triple.
    #[must_use]
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    /// Channels as `f32` in RGB order.
    #[must_use]
    pub fn channels(self) -> [f32; 3] {
        [f32::from(self.r), f32::from(self.g), f32::from(self.b)]
    }

    /// Hue in degrees (0-360). Achromatic colors have hue 0.
    #[must_use]
    pub fn hue_degrees(self) -> f64 {
        let [r, g, b] = [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ];
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        if delta <= 0.0 {
            return 0.0;
        }
        #[allow(clippy::float_cmp)]
        let hue = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        hue.rem_euclid(360.0)
    }
}

impl From<[u8; 3]> for Color {
    fn from(bgr: [u8; 3]) -> Self {
        Self::from_bgr(bgr)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.to_bgr()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Errors raised by a single pixel transform.
///
/// The chain executor records these per step and moves on with the
/// image it had before the failing step.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// The image has zero width or height.
    #[error("image is empty ({width}x{height})")]
    EmptyImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// A parameter is outside the domain the transform can evaluate.
    #[error("invalid value for {field}: {value}")]
    InvalidParameter {
        /// Field name as it appears in the canonical record.
        field: &'static str,
        /// The offending value.
        value: f64,
    },
}

/// Errors that can occur while decoding, encoding, or processing an image.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Failed to encode an output image.
    #[error("failed to encode image: {0}")]
    ImageEncode(String),
}

/// Fail with [`FilterError::EmptyImage`] if the image has no pixels.
pub(crate) fn ensure_not_empty(image: &RgbImage) -> Result<(), FilterError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(FilterError::EmptyImage { width, height });
    }
    Ok(())
}

/// Fail with [`FilterError::InvalidParameter`] if `value` is NaN or infinite.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), FilterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FilterError::InvalidParameter { field, value })
    }
}

/// Check the image and every named field before running a transform.
pub(crate) fn validate(image: &RgbImage, fields: &[(&'static str, f64)]) -> Result<(), FilterError> {
    ensure_not_empty(image)?;
    fields
        .iter()
        .try_for_each(|&(field, value)| ensure_finite(field, value))
}
