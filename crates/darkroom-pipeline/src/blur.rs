//! Gaussian blur shared by the glow, clarity, and Orton transforms.
//!
//! Wraps [`imageproc::filter::gaussian_blur_f32`]. Transforms describe
//! their blur either by an odd kernel size (glow, Orton) or directly by
//! sigma (clarity); [`kernel_sigma`] converts the former.
//!
//! [`gaussian_blur_rgb`] applies the blur independently to each R/G/B
//! channel. [`gaussian_blur_plane`] blurs a single `f32` plane without
//! quantizing, for soft masks.

use image::{GrayImage, ImageBuffer, Luma};

use crate::types::RgbImage;

/// Sigma of the Gaussian implied by an odd kernel size `k`.
///
/// Uses the conventional `0.3 * ((k - 1) / 2 - 1) + 0.8` relation, so a
/// 21 px kernel blurs with sigma 3.5.
#[must_use]
pub fn kernel_sigma(kernel: u32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let half = (kernel.saturating_sub(1) / 2) as f32;
    0.3f32.mul_add(half - 1.0, 0.8).max(0.0)
}

/// Apply Gaussian blur to an RGB image by blurring each channel
/// independently.
///
/// Non-positive sigma values return the image unchanged, since
/// `imageproc`'s underlying function panics on `sigma <= 0.0`.
#[must_use = "returns the blurred image"]
pub fn gaussian_blur_rgb(image: &RgbImage, sigma: f32) -> RgbImage {
    if sigma <= 0.0 || image.width() == 0 || image.height() == 0 {
        return image.clone();
    }

    let (w, h) = (image.width(), image.height());

    let channels: [GrayImage; 3] = std::array::from_fn(|c| {
        GrayImage::from_fn(w, h, |x, y| Luma([image.get_pixel(x, y).0[c]]))
    });
    let blurred: [GrayImage; 3] =
        std::array::from_fn(|c| imageproc::filter::gaussian_blur_f32(&channels[c], sigma));

    RgbImage::from_fn(w, h, |x, y| {
        image::Rgb([
            blurred[0].get_pixel(x, y).0[0],
            blurred[1].get_pixel(x, y).0[0],
            blurred[2].get_pixel(x, y).0[0],
        ])
    })
}

/// Blur a row-major `f32` plane of `width` x `height` values.
///
/// The result has the same length as `plane`. Non-positive sigma or a
/// plane whose length does not match the dimensions is returned as is.
#[must_use = "returns the blurred plane"]
pub fn gaussian_blur_plane(plane: &[f32], width: u32, height: u32, sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 || width == 0 || height == 0 {
        return plane.to_vec();
    }
    let Some(buffer) = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(width, height, plane.to_vec())
    else {
        return plane.to_vec();
    };
    imageproc::filter::gaussian_blur_f32(&buffer, sigma).into_raw()
}
