//! Global tonal and color transforms (the basic tier).
//!
//! Every function takes the current image and its canonical record and
//! returns a fresh buffer of the same dimensions. A record holding its
//! neutral value returns an exact copy, so an all-default basic tier
//! leaves the image byte-identical.

use crate::color::{self, Hls, Lab};
use crate::params::{Band, ColorMixer, Level, Saturation, TempTint, Vibrance};
use crate::types::{FilterError, RgbImage, validate};

/// HSV value threshold above which `highlights` applies.
pub const HIGHLIGHT_THRESHOLD: u8 = 200;
/// HSV value threshold below which `shadows` applies.
pub const SHADOW_THRESHOLD: u8 = 80;
/// HSV value threshold above which `whites` applies.
pub const WHITE_THRESHOLD: u8 = 230;
/// HSV value threshold below which `blacks` applies.
pub const BLACK_THRESHOLD: u8 = 40;

/// Lab b\* units per unit of `temp`.
const TEMP_GAIN: f64 = 0.25;
/// Lab a\* units per unit of `tint`.
const TINT_GAIN: f64 = 0.20;

/// Add `value` (8-bit units) to every channel.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn exposure(image: &RgbImage, level: &Level) -> Result<RgbImage, FilterError> {
    validate(image, &[("value", level.value)])?;
    if level.value == 0.0 {
        return Ok(image.clone());
    }
    let offset = level.value as f32;
    Ok(color::map_pixels(image, |c| c.map(|v| v + offset)))
}

/// Scale channels about mid-gray: `(c - 0.5) * value + 0.5`.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub fn contrast(image: &RgbImage, level: &Level) -> Result<RgbImage, FilterError> {
    validate(image, &[("value", level.value)])?;
    if level.value == 1.0 {
        return Ok(image.clone());
    }
    let k = level.value as f32;
    Ok(color::map_pixels(image, |c| {
        c.map(|v| (v / 255.0 - 0.5).mul_add(k, 0.5) * 255.0)
    }))
}

/// Offset the HSV value of pixels brighter than [`HIGHLIGHT_THRESHOLD`].
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
pub fn highlights(image: &RgbImage, level: &Level) -> Result<RgbImage, FilterError> {
    masked_value(image, level.value, |v| v > HIGHLIGHT_THRESHOLD)
}

/// Offset the HSV value of pixels darker than [`SHADOW_THRESHOLD`].
/// Positive values lift.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
pub fn shadows(image: &RgbImage, level: &Level) -> Result<RgbImage, FilterError> {
    masked_value(image, level.value, |v| v < SHADOW_THRESHOLD)
}

/// Offset the HSV value of pixels brighter than [`WHITE_THRESHOLD`].
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
pub fn whites(image: &RgbImage, level: &Level) -> Result<RgbImage, FilterError> {
    masked_value(image, level.value, |v| v > WHITE_THRESHOLD)
}

/// Offset the HSV value of pixels darker than [`BLACK_THRESHOLD`].
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
pub fn blacks(image: &RgbImage, level: &Level) -> Result<RgbImage, FilterError> {
    masked_value(image, level.value, |v| v < BLACK_THRESHOLD)
}

#[allow(clippy::cast_possible_truncation)]
fn masked_value(
    image: &RgbImage,
    value: f64,
    selected: impl Fn(u8) -> bool,
) -> Result<RgbImage, FilterError> {
    validate(image, &[("value", value)])?;
    if value == 0.0 {
        return Ok(image.clone());
    }
    let offset = value as f32;
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let v = pixel.0[0].max(pixel.0[1]).max(pixel.0[2]);
        if selected(v) {
            let shifted = color::with_hsv_value(color::channels(*pixel), f32::from(v) + offset);
            pixel.0 = shifted.map(color::quantize);
        }
    }
    Ok(out)
}

/// White balance: shift Lab b\* by `temp * 0.25` and a\* by `tint * 0.2`.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn temp_tint(image: &RgbImage, params: &TempTint) -> Result<RgbImage, FilterError> {
    validate(image, &[("temp", params.temp), ("tint", params.tint)])?;
    if params.temp == 0.0 && params.tint == 0.0 {
        return Ok(image.clone());
    }
    let db = (params.temp * TEMP_GAIN) as f32;
    let da = (params.tint * TINT_GAIN) as f32;
    Ok(color::map_pixels(image, |c| {
        let lab = color::rgb_to_lab(c);
        color::lab_to_rgb(color::clamp_chroma(Lab {
            l: lab.l,
            a: lab.a + da,
            b: lab.b + db,
        }))
    }))
}

/// Interpolate every pixel toward its luma by `scale`.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub fn saturation(image: &RgbImage, params: &Saturation) -> Result<RgbImage, FilterError> {
    validate(image, &[("scale", params.scale)])?;
    if params.scale == 1.0 {
        return Ok(image.clone());
    }
    let scale = params.scale as f32;
    Ok(color::map_pixels(image, |c| scale_chroma(c, scale)))
}

fn scale_chroma(c: [f32; 3], scale: f32) -> [f32; 3] {
    let gray = color::luma(c);
    c.map(|v| (v - gray).mul_add(scale, gray))
}

fn chroma(c: [f32; 3]) -> f32 {
    let gray = color::luma(c);
    c.iter().map(|v| (v - gray).powi(2)).sum::<f32>().sqrt()
}

/// Saturation boost weighted toward muted pixels.
///
/// Each pixel's chroma is normalized by the most chromatic pixel in the
/// image; the scale is `1 + strength * (1 - normalized chroma)`.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn vibrance(image: &RgbImage, params: &Vibrance) -> Result<RgbImage, FilterError> {
    validate(image, &[("strength", params.strength)])?;
    if params.strength == 0.0 {
        return Ok(image.clone());
    }
    let strength = params.strength as f32;
    let max_chroma = image
        .pixels()
        .map(|p| chroma(color::channels(*p)))
        .fold(0.0_f32, f32::max);
    let norm = max_chroma + 1e-6;
    Ok(color::map_pixels(image, |c| {
        let scale = strength.mul_add(1.0 - chroma(c) / norm, 1.0);
        scale_chroma(c, scale)
    }))
}

/// Per-band hue, saturation, and lightness adjustment in HLS.
///
/// Band membership comes from each pixel's original hue, so a hue shift
/// never moves a pixel into a second band. Achromatic pixels (zero HLS
/// saturation) have no hue and belong to no band.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn color_mixer(image: &RgbImage, mixer: &ColorMixer) -> Result<RgbImage, FilterError> {
    let mut fields = Vec::with_capacity(Band::ALL.len() * 2);
    for band in Band::ALL {
        let m = mixer.band(band);
        fields.push(("sat_scale", m.sat_scale));
        fields.push(("lum_scale", m.lum_scale));
    }
    validate(image, &fields)?;
    if mixer.is_neutral() {
        return Ok(image.clone());
    }

    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let hls = color::rgb_to_hls(color::channels(*pixel));
        if color::quantize(hls.s) == 0 {
            continue;
        }
        let hue = color::quantize(hls.h);
        let settings = mixer.band(Band::of_hue(if hue >= 180 { 0 } else { hue }));
        if settings.is_neutral() {
            continue;
        }
        let shifted = Hls {
            h: (hls.h + settings.hue_shift as f32).rem_euclid(180.0),
            l: (hls.l * settings.lum_scale as f32).clamp(0.0, 255.0),
            s: (hls.s * settings.sat_scale as f32).clamp(0.0, 255.0),
        };
        pixel.0 = color::hls_to_rgb(shifted).map(color::quantize);
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Rgb;

    use super::*;
    use crate::params::MixerBand;

    fn solid(rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(4, 3, Rgb(rgb))
    }

    fn gradient() -> RgbImage {
        RgbImage::from_fn(16, 4, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            let v = (x * 16) as u8;
            Rgb([v, v.saturating_add(20), (y * 40) as u8])
        })
    }

    // ─────── neutral values ─────────────────────────────────────

    #[test]
    fn neutral_records_return_identical_images() {
        let img = gradient();
        assert_eq!(exposure(&img, &Level::new(0.0)).unwrap(), img);
        assert_eq!(contrast(&img, &Level::new(1.0)).unwrap(), img);
        assert_eq!(highlights(&img, &Level::new(0.0)).unwrap(), img);
        assert_eq!(temp_tint(&img, &TempTint::default()).unwrap(), img);
        assert_eq!(saturation(&img, &Saturation::default()).unwrap(), img);
        assert_eq!(vibrance(&img, &Vibrance::default()).unwrap(), img);
        assert_eq!(color_mixer(&img, &ColorMixer::default()).unwrap(), img);
    }

    #[test]
    fn empty_image_is_an_error() {
        let img = RgbImage::new(0, 5);
        assert!(matches!(
            exposure(&img, &Level::new(5.0)),
            Err(FilterError::EmptyImage { .. })
        ));
    }

    #[test]
    fn nan_value_is_invalid() {
        let err = contrast(&solid([10, 10, 10]), &Level::new(f64::NAN)).unwrap_err();
        assert!(matches!(err, FilterError::InvalidParameter { field: "value", .. }));
    }

    // ─────── exposure / contrast ────────────────────────────────

    #[test]
    fn exposure_adds_and_saturates() {
        let out = exposure(&solid([10, 128, 250]), &Level::new(10.0)).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [20, 138, 255]);
    }

    #[test]
    fn contrast_pushes_away_from_mid_gray() {
        let out = contrast(&solid([64, 128, 192]), &Level::new(1.2)).unwrap();
        let [r, _, b] = out.get_pixel(0, 0).0;
        assert!(r < 64);
        assert!(b > 192);
    }

    // ─────── masked value adjustments ───────────────────────────

    #[test]
    fn highlights_only_touch_bright_pixels() {
        let img = RgbImage::from_fn(2, 1, |x, _| if x == 0 { Rgb([220, 110, 0]) } else { Rgb([100, 50, 0]) });
        let out = highlights(&img, &Level::new(-20.0)).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [200, 100, 0]);
        assert_eq!(out.get_pixel(1, 0).0, [100, 50, 0]);
    }

    #[test]
    fn positive_shadows_lift() {
        let out = shadows(&solid([40, 20, 10]), &Level::new(20.0)).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [60, 30, 15]);
    }

    #[test]
    fn blacks_lift_pure_black_to_gray() {
        let out = blacks(&solid([0, 0, 0]), &Level::new(12.0)).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [12, 12, 12]);
    }

    #[test]
    fn whites_ignore_midtones() {
        let img = solid([200, 200, 200]);
        assert_eq!(whites(&img, &Level::new(-25.0)).unwrap(), img);
    }

    // ─────── color ──────────────────────────────────────────────

    #[test]
    fn warm_temp_raises_red_over_blue() {
        let out = temp_tint(&solid([128, 128, 128]), &TempTint { temp: 60.0, tint: 0.0 }).unwrap();
        let [r, _, b] = out.get_pixel(0, 0).0;
        assert!(r > b, "expected warmer pixel, got {r} vs {b}");
    }

    #[test]
    fn zero_saturation_is_grayscale() {
        let out = saturation(&solid([200, 50, 10]), &Saturation { scale: 0.0 }).unwrap();
        let [r, g, b] = out.get_pixel(0, 0).0;
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn vibrance_boosts_muted_pixels_more() {
        let img = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgb([255, 0, 0]) } else { Rgb([140, 120, 120]) }
        });
        let out = vibrance(&img, &Vibrance { strength: 0.8 }).unwrap();
        let vivid = out.get_pixel(0, 0).0;
        let muted = out.get_pixel(1, 0).0;
        assert!(vivid[0] >= 254, "saturated pixel barely changes");
        assert!(muted[0] > 140, "muted pixel gains chroma: {muted:?}");
    }

    #[test]
    fn mixer_desaturates_only_its_band() {
        let img = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([20, 40, 220]),
            1 => Rgb([220, 30, 30]),
            _ => Rgb([90, 90, 90]),
        });
        let mut mixer = ColorMixer::default();
        mixer.blue = MixerBand {
            sat_scale: 0.5,
            ..MixerBand::NEUTRAL
        };
        let out = color_mixer(&img, &mixer).unwrap();
        let blue = out.get_pixel(0, 0).0;
        assert!(blue[2] < 220 && blue[0] > 20, "blue pixel desaturated: {blue:?}");
        assert_eq!(out.get_pixel(1, 0).0, [220, 30, 30]);
        assert_eq!(out.get_pixel(2, 0).0, [90, 90, 90]);
    }
}
