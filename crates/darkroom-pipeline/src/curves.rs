//! Three-zone tone curve applied through a 256-entry lookup table.

use crate::color;
use crate::params::Curves;
use crate::types::{FilterError, RgbImage, validate};

/// Falloff (in 8-bit levels) of the shadow and highlight terms.
const FALLOFF: f64 = 64.0;
/// Level above which the highlight term applies.
const HIGHLIGHT_KNEE: f64 = 128.0;
/// Center of the highlight term.
const HIGHLIGHT_PIVOT: f64 = 192.0;

/// Build the lookup table for a curve.
///
/// Shadows add an exponentially decaying lift at the low end, midtones
/// set a gamma of `1 - midtones / 200` (clamped to `[0.2, 5]`), and
/// highlights bend levels above 128 around a pivot at 192.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn curve_lut(curves: &Curves) -> [u8; 256] {
    let gamma = (1.0 - curves.midtones / 200.0).clamp(0.2, 5.0);
    let mut lut = [0_u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        let mut v = i as f64;
        v += curves.shadows / 2.0 * (-v / FALLOFF).exp();
        v = v.clamp(0.001, 255.0);
        v = 255.0 * (v / 255.0).powf(gamma);
        if v > HIGHLIGHT_KNEE {
            v += curves.highlights / 2.0 * (1.0 - (-(v - HIGHLIGHT_PIVOT) / FALLOFF).exp());
        }
        *slot = color::quantize(v as f32);
    }
    lut
}

/// Apply the curve to every channel.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
pub fn curves(image: &RgbImage, params: &Curves) -> Result<RgbImage, FilterError> {
    validate(
        image,
        &[
            ("shadows", params.shadows),
            ("midtones", params.midtones),
            ("highlights", params.highlights),
        ],
    )?;
    let lut = curve_lut(params);
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel.0 = pixel.0.map(|c| lut[usize::from(c)]);
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Rgb;

    use super::*;

    #[test]
    fn neutral_curve_is_identity() {
        let lut = curve_lut(&Curves::default());
        for (i, &v) in lut.iter().enumerate() {
            assert_eq!(usize::from(v), i);
        }
    }

    #[test]
    fn shadow_lift_raises_black() {
        let lut = curve_lut(&Curves {
            shadows: 40.0,
            ..Curves::default()
        });
        assert_eq!(lut[0], 20);
        assert!(lut[200] <= 201);
    }

    #[test]
    fn positive_midtones_brighten_mid_gray() {
        let lut = curve_lut(&Curves {
            midtones: 40.0,
            ..Curves::default()
        });
        assert!(lut[128] > 128);
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn negative_highlights_roll_off_the_top() {
        let lut = curve_lut(&Curves {
            highlights: -30.0,
            ..Curves::default()
        });
        assert!(lut[250] < 250);
        assert_eq!(lut[100], 100);
    }

    #[test]
    fn lut_is_applied_per_channel() {
        let img = RgbImage::from_pixel(3, 3, Rgb([0, 128, 255]));
        let params = Curves {
            shadows: 40.0,
            midtones: 0.0,
            highlights: 0.0,
        };
        let out = curves(&img, &params).unwrap();
        assert_eq!(out.get_pixel(1, 1).0[0], 20);
    }
}
