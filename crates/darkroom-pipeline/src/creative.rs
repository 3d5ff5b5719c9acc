//! Creative transforms: toning, overlays, optical effects, and grades.
//!
//! Curves and grain live in their own modules; everything else in the
//! creative tier is here. Blend math works in normalized `[0, 1]` units
//! and quantizes once on output.

use image::Rgb;

use crate::blur::{gaussian_blur_plane, gaussian_blur_rgb, kernel_sigma};
use crate::color::{self, Lab};
use crate::params::{
    BlendMode, Clarity, ColorOverlay, Dehaze, Duotone, FilmFade, Glow, Haze, Intensity,
    OrtonEffect, SplitToning, Vignette,
};
use crate::types::{FilterError, RgbImage, validate};

/// Lab a\*/b\* units added per unit of split-toning saturation.
const SPLIT_TONE_CHROMA: f64 = 40.0;

/// 8-bit gray level above which a pixel feeds the glow mask.
const GLOW_THRESHOLD: u8 = 180;

/// Gaussian sigma of the clarity base layer.
const CLARITY_SIGMA: f32 = 10.0;

/// Bins in the dehaze lightness histogram.
const HISTOGRAM_BINS: usize = 256;

// ───────────────────────────── toning ─────────────────────────────────

/// Push shadows toward one hue and highlights toward another in Lab.
///
/// Masks come from normalized lightness `L`: shadows `clamp(1 - 2L)`,
/// highlights `clamp(2L - 1)`. A hue `h` shifts a\* by `sin h` and b\* by
/// `cos h`, scaled by the mask and the band's saturation.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn split_toning(image: &RgbImage, params: &SplitToning) -> Result<RgbImage, FilterError> {
    validate(
        image,
        &[
            ("shadow_hue", params.shadow_hue),
            ("shadow_sat", params.shadow_sat),
            ("highlight_hue", params.highlight_hue),
            ("highlight_sat", params.highlight_sat),
        ],
    )?;
    let shift = |hue: f64, sat: f64| {
        let rad = hue.to_radians();
        (
            (rad.sin() * SPLIT_TONE_CHROMA * sat) as f32,
            (rad.cos() * SPLIT_TONE_CHROMA * sat) as f32,
        )
    };
    let (sa, sb) = shift(params.shadow_hue, params.shadow_sat);
    let (ha, hb) = shift(params.highlight_hue, params.highlight_sat);

    Ok(color::map_pixels(image, |c| {
        let lab = color::rgb_to_lab(c);
        let l = lab.l / 100.0;
        let shadow = 2.0f32.mul_add(-l, 1.0).clamp(0.0, 1.0);
        let highlight = 2.0f32.mul_add(l, -1.0).clamp(0.0, 1.0);
        color::lab_to_rgb(color::clamp_chroma(Lab {
            l: lab.l,
            a: ha.mul_add(highlight, sa.mul_add(shadow, lab.a)),
            b: hb.mul_add(highlight, sb.mul_add(shadow, lab.b)),
        }))
    }))
}

/// Blend a flat color over the image.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn color_overlay(image: &RgbImage, params: &ColorOverlay) -> Result<RgbImage, FilterError> {
    validate(image, &[("opacity", params.opacity)])?;
    let opacity = params.opacity as f32;
    let overlay = params.color.channels().map(|v| v / 255.0);
    let mode = params.blend_mode;

    Ok(color::map_pixels(image, |c| {
        let mut out = [0.0; 3];
        for (i, slot) in out.iter_mut().enumerate() {
            let base = c[i] / 255.0;
            let blended = blend(mode, base, overlay[i]);
            *slot = base.mul_add(1.0 - opacity, blended * opacity).clamp(0.0, 1.0) * 255.0;
        }
        out
    }))
}

fn blend(mode: BlendMode, base: f32, over: f32) -> f32 {
    match mode {
        BlendMode::Overlay => {
            if base < 0.5 {
                2.0 * base * over
            } else {
                (2.0 * (1.0 - base)).mul_add(-(1.0 - over), 1.0)
            }
        }
        BlendMode::Multiply => base * over,
        BlendMode::Screen => (1.0 - base).mul_add(-(1.0 - over), 1.0),
        BlendMode::SoftLight => {
            if over < 0.5 {
                ((1.0 - 2.0 * over) * base).mul_add(-(1.0 - base), base)
            } else {
                2.0f32.mul_add(over, -1.0).mul_add(base.sqrt() - base, base)
            }
        }
        BlendMode::Normal => over,
    }
}

/// Map luma onto a gradient between two colors.
///
/// # Errors
///
/// [`FilterError::EmptyImage`].
pub fn duotone(image: &RgbImage, params: &Duotone) -> Result<RgbImage, FilterError> {
    validate(image, &[])?;
    let dark = params.dark_color.channels();
    let light = params.light_color.channels();
    Ok(color::map_pixels(image, |c| {
        let g = color::luma(c) / 255.0;
        std::array::from_fn(|i| dark[i].mul_add(1.0 - g, light[i] * g))
    }))
}

/// Wash the image toward a flat color.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn haze(image: &RgbImage, params: &Haze) -> Result<RgbImage, FilterError> {
    validate(image, &[("amount", params.amount)])?;
    let amount = params.amount as f32;
    let tint = params.color.channels();
    Ok(color::map_pixels(image, |c| {
        std::array::from_fn(|i| c[i].mul_add(1.0 - amount, tint[i] * amount))
    }))
}

/// Lift blacks and compress highlights toward mid-gray.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn film_fade(image: &RgbImage, params: &FilmFade) -> Result<RgbImage, FilterError> {
    validate(
        image,
        &[
            ("fade_amount", params.fade_amount),
            ("black_fade", params.black_fade),
        ],
    )?;
    let lift = (params.black_fade * 255.0) as f32;
    let k = (1.0 - params.fade_amount * 0.3) as f32;
    let floor = 255.0 * (1.0 - k) * 0.5;
    Ok(color::map_pixels(image, |c| c.map(|v| (v + lift).mul_add(k, floor))))
}

// ──────────────────────────── optical ─────────────────────────────────

/// Darken toward the corners.
///
/// Distance is measured from the image center and normalized by the
/// half-diagonal; falloff starts at `radius` and is quadratic.
///
/// # Errors
///
/// [`FilterError::EmptyImage`], or [`FilterError::InvalidParameter`]
/// for a non-finite field or `radius >= 1`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn vignette(image: &RgbImage, params: &Vignette) -> Result<RgbImage, FilterError> {
    validate(
        image,
        &[("strength", params.strength), ("radius", params.radius)],
    )?;
    if params.radius >= 1.0 {
        return Err(FilterError::InvalidParameter {
            field: "radius",
            value: params.radius,
        });
    }
    let cx = image.width() as f32 / 2.0;
    let cy = image.height() as f32 / 2.0;
    let max_dist = cx.hypot(cy);
    let strength = params.strength as f32;
    let radius = params.radius as f32;

    Ok(color::map_pixels_at(image, |x, y, c| {
        let d = (x as f32 - cx).hypot(y as f32 - cy) / max_dist;
        let t = ((d - radius) / (1.0 - radius)).clamp(0.0, 1.0);
        let factor = strength.mul_add(-(t * t), 1.0);
        c.map(|v| v * factor)
    }))
}

/// Screen a blurred copy of the image back over itself, weighted by a
/// blurred mask of the bright areas.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn glow(image: &RgbImage, params: &Glow) -> Result<RgbImage, FilterError> {
    validate(image, &[("intensity", params.intensity)])?;
    let kernel = params.radius | 1;
    let sigma = kernel_sigma(kernel);
    let (w, h) = image.dimensions();

    let mask: Vec<f32> = image
        .pixels()
        .map(|p| {
            if color::quantize(color::luma(color::channels(*p))) > GLOW_THRESHOLD {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    let mask = gaussian_blur_plane(&mask, w, h, sigma);
    let blurred = gaussian_blur_rgb(image, sigma);
    let intensity = params.intensity as f32;

    let mut out = RgbImage::new(w, h);
    for ((dst, src), (glow_px, m)) in out
        .pixels_mut()
        .zip(image.pixels())
        .zip(blurred.pixels().zip(mask))
    {
        let base = color::channels(*src);
        let glow = color::channels(*glow_px);
        *dst = Rgb(std::array::from_fn(|i| {
            let b = base[i] / 255.0;
            let g = glow[i] / 255.0 * m * intensity;
            color::quantize((1.0 - b).mul_add(-(1.0 - g), 1.0).clamp(0.0, 1.0) * 255.0)
        }));
    }
    Ok(out)
}

/// Local contrast: `c * (1 + amount) - blur * amount` against a wide
/// Gaussian base. Negative amounts soften.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn clarity(image: &RgbImage, params: &Clarity) -> Result<RgbImage, FilterError> {
    validate(image, &[("amount", params.amount)])?;
    if params.amount == 0.0 {
        return Ok(image.clone());
    }
    let amount = params.amount as f32;
    let base = gaussian_blur_rgb(image, CLARITY_SIGMA);
    let mut out = image.clone();
    for (dst, b) in out.pixels_mut().zip(base.pixels()) {
        let c = color::channels(*dst);
        let blur = color::channels(*b);
        dst.0 = std::array::from_fn(|i| color::quantize(c[i].mul_add(1.0 + amount, -blur[i] * amount)));
    }
    Ok(out)
}

/// Contrast-limited histogram equalization of lightness.
///
/// Each 8-bit L\* bin is capped at `(2 + 2 * amount) * N / 256` pixels;
/// the excess is spread evenly over all bins before the cumulative
/// mapping is built. Chroma is kept.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn dehaze(image: &RgbImage, params: &Dehaze) -> Result<RgbImage, FilterError> {
    validate(image, &[("amount", params.amount)])?;
    let labs: Vec<Lab> = image
        .pixels()
        .map(|p| color::rgb_to_lab(color::channels(*p)))
        .collect();
    let level = |lab: &Lab| usize::from(color::quantize(lab.l * 2.55));

    let mut hist = [0_u64; HISTOGRAM_BINS];
    for lab in &labs {
        hist[level(lab)] += 1;
    }
    let total = labs.len() as f64;
    let limit = ((2.0 + 2.0 * params.amount) * total / HISTOGRAM_BINS as f64).max(1.0) as u64;

    let mut excess = 0_u64;
    for bin in &mut hist {
        if *bin > limit {
            excess += *bin - limit;
            *bin = limit;
        }
    }
    let bins = HISTOGRAM_BINS as u64;
    let (share, remainder) = (excess / bins, excess % bins);
    for (i, bin) in hist.iter_mut().enumerate() {
        *bin += share + u64::from((i as u64) < remainder);
    }

    let scale = 255.0 / total;
    let mut lut = [0_f32; HISTOGRAM_BINS];
    let mut cumulative = 0_u64;
    for (slot, &count) in lut.iter_mut().zip(&hist) {
        cumulative += count;
        *slot = f32::from(color::quantize((cumulative as f64 * scale) as f32));
    }

    let mut out = RgbImage::new(image.width(), image.height());
    for (dst, lab) in out.pixels_mut().zip(&labs) {
        let rgb = color::lab_to_rgb(Lab {
            l: lut[level(lab)] / 2.55,
            ..*lab
        });
        *dst = Rgb(rgb.map(color::quantize));
    }
    Ok(out)
}

/// Dreamy glow: multiply the image by a brightened, blurred copy.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn orton_effect(image: &RgbImage, params: &OrtonEffect) -> Result<RgbImage, FilterError> {
    validate(image, &[("blend", params.blend)])?;
    let bright = color::map_pixels(image, |c| c.map(|v| v.mul_add(1.3, 20.0)));
    let blurred = gaussian_blur_rgb(&bright, kernel_sigma(params.blur_amount | 1));
    let blend = params.blend as f32;

    let mut out = image.clone();
    for (dst, b) in out.pixels_mut().zip(blurred.pixels()) {
        let base = color::channels(*dst).map(|v| v / 255.0);
        let over = color::channels(*b).map(|v| v / 255.0);
        dst.0 = std::array::from_fn(|i| {
            let multiplied = base[i] * over[i] * 1.5;
            let v = base[i].mul_add(1.0 - blend, multiplied * blend);
            color::quantize(v.clamp(0.0, 1.0) * 255.0)
        });
    }
    Ok(out)
}

// ───────────────────────────── grades ─────────────────────────────────

/// Slide-film cross processing: lifted blue, boosted green, split red.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn cross_process(image: &RgbImage, params: &Intensity) -> Result<RgbImage, FilterError> {
    validate(image, &[("intensity", params.intensity)])?;
    let i = params.intensity as f32;
    Ok(color::map_pixels(image, |[r, g, b]| {
        [
            if r > 128.0 { i.mul_add(30.0, r) } else { i.mul_add(-20.0, r) },
            g * i.mul_add(0.1, 1.0),
            b.mul_add(i.mul_add(-0.2, 1.0), i * 40.0),
        ]
    }))
}

/// Silver-retention look: partial desaturation plus a contrast push.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn bleach_bypass(image: &RgbImage, params: &Intensity) -> Result<RgbImage, FilterError> {
    validate(image, &[("intensity", params.intensity)])?;
    let i = params.intensity as f32;
    let mix = i * 0.6;
    let gain = i.mul_add(0.4, 1.0);
    let offset = -20.0 * i;
    Ok(color::map_pixels(image, |c| {
        let gray = f32::from(color::quantize(color::luma(c)));
        c.map(|v| {
            let desat = f32::from(color::quantize(v.mul_add(1.0 - mix, gray * mix)));
            desat.mul_add(gain, offset).max(0.0)
        })
    }))
}

/// Cool shadows and warm highlights.
///
/// # Errors
///
/// [`FilterError::EmptyImage`] or [`FilterError::InvalidParameter`].
#[allow(clippy::cast_possible_truncation)]
pub fn teal_and_orange(image: &RgbImage, params: &Intensity) -> Result<RgbImage, FilterError> {
    validate(image, &[("intensity", params.intensity)])?;
    let i = params.intensity as f32;
    Ok(color::map_pixels(image, |[r, g, b]| {
        let gray = f32::from(color::quantize(color::luma([r, g, b]))) / 255.0;
        let shadow = 2.0f32.mul_add(-gray, 1.0).clamp(0.0, 1.0) * i;
        let highlight = 2.0f32.mul_add(gray, -1.0).clamp(0.0, 1.0) * i;
        [
            highlight.mul_add(35.0, shadow.mul_add(-20.0, r)),
            highlight.mul_add(15.0, shadow.mul_add(20.0, g)),
            highlight.mul_add(-30.0, shadow.mul_add(40.0, b)),
        ]
    }))
}
