//! Reduced-size previews of session outputs.
//!
//! A preview keeps the aspect ratio and is at most `max_width` pixels
//! wide. Images that are already narrow enough are returned unchanged.

use std::fmt;

use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

use crate::types::RgbImage;

/// Resampling filter used when shrinking a preview.
///
/// Ordered from fastest/lowest-quality to slowest/highest-quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PreviewFilter {
    /// Nearest-neighbor: fastest, blocky artifacts.
    Nearest,
    /// Bilinear interpolation: fast, decent quality.
    #[default]
    Triangle,
    /// Bicubic (Catmull-Rom): moderate speed, good quality.
    CatmullRom,
    /// Gaussian: moderate speed, smooth output.
    Gaussian,
    /// Lanczos with 3 lobes: slowest, sharpest/best for photos.
    Lanczos3,
}

impl PreviewFilter {
    /// Convert to the `image` crate's `FilterType`.
    const fn to_image_filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for PreviewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => f.write_str("Nearest"),
            Self::Triangle => f.write_str("Triangle"),
            Self::CatmullRom => f.write_str("CatmullRom"),
            Self::Gaussian => f.write_str("Gaussian"),
            Self::Lanczos3 => f.write_str("Lanczos3"),
        }
    }
}

/// Shrink `image` so it is at most `max_width` pixels wide.
///
/// The height follows the aspect ratio (rounded, at least 1 pixel).
/// A `max_width` of 0 is treated as 1.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn preview(image: &RgbImage, max_width: u32, filter: PreviewFilter) -> RgbImage {
    let max_width = max_width.max(1);
    let (w, h) = image.dimensions();
    if w <= max_width || h == 0 {
        return image.clone();
    }
    let height = (f64::from(h) * f64::from(max_width) / f64::from(w))
        .round()
        .max(1.0) as u32;
    imageops::resize(image, max_width, height, filter.to_image_filter())
}
