//! Deterministic film grain.
//!
//! A standard-normal noise field is generated at `1 / size` resolution,
//! upsampled to the image with bilinear (triangle) filtering, and added
//! to every channel at `amount * 40` 8-bit levels.
//!
//! The generator is seeded from a SipHash of the input pixels and the
//! grain parameters, so the same image with the same parameters always
//! gets the same grain. This keeps whole filter chains reproducible.

use std::hash::Hasher;

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use siphasher::sip::SipHasher13;

use crate::color;
use crate::params::Grain;
use crate::types::{FilterError, RgbImage, validate};

/// 8-bit levels of grain per unit of `amount` per standard deviation.
const GRAIN_SCALE: f32 = 40.0;

/// Seed for the noise generator: a hash of the image and parameters.
#[must_use]
pub fn grain_seed(image: &RgbImage, params: &Grain) -> u64 {
    let mut hasher = SipHasher13::new();
    hasher.write_u32(image.width());
    hasher.write_u32(image.height());
    hasher.write(image.as_raw());
    hasher.write_u64(params.amount.to_bits());
    hasher.write_u32(params.size);
    hasher.finish()
}

/// One standard-normal sample (Box-Muller).
#[allow(clippy::cast_possible_truncation)]
fn standard_normal(rng: &mut impl Rng) -> f32 {
    // 1 - [0, 1) keeps the log argument in (0, 1].
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    ((-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()) as f32
}

/// Noise field at full image resolution, row-major.
fn noise_field(width: u32, height: u32, size: u32, seed: u64) -> Vec<f32> {
    let size = size.max(1);
    let cols = (width / size).max(1);
    let rows = (height / size).max(1);
    let mut rng = StdRng::seed_from_u64(seed);
    let samples: Vec<f32> = (0..cols * rows).map(|_| standard_normal(&mut rng)).collect();

    if cols == width && rows == height {
        return samples;
    }
    let Some(grid) = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(cols, rows, samples) else {
        return vec![0.0; (width * height) as usize];
    };
    imageops::resize(&grid, width, height, FilterType::Triangle).into_raw()
}

/// Add seeded Gaussian grain.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn grain(image: &RgbImage, params: &Grain) -> Result<RgbImage, FilterError> {
    validate(image, &[("amount", params.amount)])?;
    if params.amount == 0.0 {
        return Ok(image.clone());
    }
    let (w, h) = image.dimensions();
    let noise = noise_field(w, h, params.size, grain_seed(image, params));
    let gain = params.amount as f32 * GRAIN_SCALE;

    let mut out = image.clone();
    for (pixel, n) in out.pixels_mut().zip(noise) {
        let offset = n * gain;
        pixel.0 = color::channels(*pixel).map(|v| color::quantize(v + offset));
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Rgb;

    use super::*;

    fn gray(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([128, 128, 128]))
    }

    #[test]
    fn same_input_gives_identical_grain() {
        let img = gray(32, 20);
        let params = Grain { amount: 0.08, size: 1 };
        assert_eq!(grain(&img, &params).unwrap(), grain(&img, &params).unwrap());
    }

    #[test]
    fn different_images_get_different_seeds() {
        let params = Grain::default();
        let a = grain_seed(&gray(8, 8), &params);
        let b = grain_seed(&RgbImage::from_pixel(8, 8, Rgb([127, 128, 128])), &params);
        assert_ne!(a, b);
    }

    #[test]
    fn grain_changes_pixels_but_not_dimensions() {
        let img = gray(40, 30);
        let out = grain(&img, &Grain { amount: 0.08, size: 2 }).unwrap();
        assert_eq!(out.dimensions(), (40, 30));
        assert_ne!(out, img);
    }

    #[test]
    fn zero_amount_is_identity() {
        let img = gray(5, 5);
        assert_eq!(grain(&img, &Grain { amount: 0.0, size: 1 }).unwrap(), img);
    }

    #[test]
    fn tiny_image_with_large_cells_still_works() {
        let img = gray(1, 1);
        let out = grain(&img, &Grain { amount: 0.05, size: 2 }).unwrap();
        assert_eq!(out.dimensions(), (1, 1));
    }

    #[test]
    fn grain_is_roughly_zero_mean() {
        let noise = noise_field(64, 64, 1, 7);
        #[allow(clippy::cast_precision_loss)]
        let mean = noise.iter().sum::<f32>() / noise.len() as f32;
        assert!(mean.abs() < 0.1, "mean {mean}");
    }
}
