//! Color space conversions and per-pixel helpers.
//!
//! All conversions work on `f32` channels in the 8-bit range (0-255)
//! so transforms can chain conversions without re-quantizing. Scales
//! follow the 8-bit conventions image tools commonly use: HSV value and
//! HLS lightness/saturation in 0-255, HLS hue in half-degrees (0-180),
//! L\*a\*b\* in its natural units (L 0-100, a/b roughly -128..127).

use image::{Rgb, RgbImage};

/// Rec. 601 luma weights.
const LUMA: [f32; 3] = [0.299, 0.587, 0.114];

/// Round and saturate a channel into `0..=255`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quantize(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Rec. 601 luma of an RGB triple (same scale as the input).
#[must_use]
pub fn luma([r, g, b]: [f32; 3]) -> f32 {
    LUMA[0].mul_add(r, LUMA[1].mul_add(g, LUMA[2] * b))
}

/// Channels of a pixel as `f32`.
#[must_use]
pub fn channels(pixel: Rgb<u8>) -> [f32; 3] {
    pixel.0.map(f32::from)
}

/// Build a new image by mapping every pixel's channels.
///
/// The closure sees channels as `f32` in 0-255 and may return values
/// out of range; they are rounded and saturated on the way out.
#[must_use]
pub fn map_pixels(image: &RgbImage, mut f: impl FnMut([f32; 3]) -> [f32; 3]) -> RgbImage {
    map_pixels_at(image, |_, _, c| f(c))
}

/// Like [`map_pixels`], with pixel coordinates.
#[must_use]
pub fn map_pixels_at(
    image: &RgbImage,
    mut f: impl FnMut(u32, u32, [f32; 3]) -> [f32; 3],
) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        out.put_pixel(x, y, Rgb(f(x, y, channels(*pixel)).map(quantize)));
    }
    out
}

/// Per-pixel luma image as `f32` in 0-1, row-major.
#[must_use]
pub fn luma_plane(image: &RgbImage) -> Vec<f32> {
    image
        .pixels()
        .map(|p| luma(channels(*p)) / 255.0)
        .collect()
}

// ─────────────────────────────── HSV ──────────────────────────────────

/// Scale an RGB triple so its HSV value (max channel) becomes `value`.
///
/// Hue and saturation are preserved. Black pixels have no hue, so they
/// become neutral gray at the new value.
#[must_use]
pub fn with_hsv_value(rgb: [f32; 3], value: f32) -> [f32; 3] {
    let current = rgb[0].max(rgb[1]).max(rgb[2]);
    let value = value.clamp(0.0, 255.0);
    if current <= 0.0 {
        return [value; 3];
    }
    let k = value / current;
    rgb.map(|c| c * k)
}

// ─────────────────────────────── HLS ──────────────────────────────────

/// Hue (half-degrees 0-180), lightness and saturation (0-255).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    pub h: f32,
    pub l: f32,
    pub s: f32,
}

/// RGB (0-255) to HLS.
#[must_use]
pub fn rgb_to_hls([r, g, b]: [f32; 3]) -> Hls {
    let (r, g, b) = (r / 255.0, g / 255.0, b / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;
    if delta <= f32::EPSILON {
        return Hls {
            h: 0.0,
            l: l * 255.0,
            s: 0.0,
        };
    }
    let s = if l < 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };
    #[allow(clippy::float_cmp)]
    let h = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    Hls {
        h: h.rem_euclid(360.0) / 2.0,
        l: l * 255.0,
        s: s * 255.0,
    }
}

/// HLS back to RGB (0-255).
#[must_use]
pub fn hls_to_rgb(hls: Hls) -> [f32; 3] {
    let l = (hls.l / 255.0).clamp(0.0, 1.0);
    let s = (hls.s / 255.0).clamp(0.0, 1.0);
    if s <= 0.0 {
        return [l * 255.0; 3];
    }
    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        s.mul_add(-l, l + s)
    };
    let p = 2.0f32.mul_add(l, -q);
    let h = (hls.h * 2.0).rem_euclid(360.0) / 360.0;
    [h + 1.0 / 3.0, h, h - 1.0 / 3.0].map(|t| hue_channel(p, q, t) * 255.0)
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        ((q - p) * 6.0).mul_add(t, p)
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        ((q - p) * 6.0).mul_add(2.0 / 3.0 - t, p)
    } else {
        p
    }
}

// ─────────────────────────────── Lab ──────────────────────────────────

/// CIE L\*a\*b\* (D65).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

const XN: f32 = 0.950_456;
const ZN: f32 = 1.088_754;
const EPSILON: f32 = 0.008_856;

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        7.787f32.mul_add(t, 16.0 / 116.0)
    }
}

fn lab_f_inv(t: f32) -> f32 {
    let cube = t * t * t;
    if cube > EPSILON {
        cube
    } else {
        (t - 16.0 / 116.0) / 7.787
    }
}

/// RGB (0-255, sRGB) to L\*a\*b\*.
#[must_use]
pub fn rgb_to_lab([r, g, b]: [f32; 3]) -> Lab {
    let [r, g, b] = [r, g, b].map(|c| srgb_to_linear(c / 255.0));
    let x = 0.412_453f32.mul_add(r, 0.357_580f32.mul_add(g, 0.180_423 * b)) / XN;
    let y = 0.212_671f32.mul_add(r, 0.715_160f32.mul_add(g, 0.072_169 * b));
    let z = 0.019_334f32.mul_add(r, 0.119_193f32.mul_add(g, 0.950_227 * b)) / ZN;
    let (fx, fy, fz) = (lab_f(x), lab_f(y), lab_f(z));
    let l = if y > EPSILON {
        116.0f32.mul_add(fy, -16.0)
    } else {
        903.3 * y
    };
    Lab {
        l,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// L\*a\*b\* to RGB (0-255, sRGB, unclamped).
#[must_use]
pub fn lab_to_rgb(lab: Lab) -> [f32; 3] {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;
    let x = lab_f_inv(fx) * XN;
    let y = if lab.l > 903.3 * EPSILON {
        fy * fy * fy
    } else {
        lab.l / 903.3
    };
    let z = lab_f_inv(fz) * ZN;
    let r = 3.240_479f32.mul_add(x, (-1.537_150f32).mul_add(y, -0.498_535 * z));
    let g = (-0.969_256f32).mul_add(x, 1.875_991f32.mul_add(y, 0.041_556 * z));
    let b = 0.055_648f32.mul_add(x, (-0.204_043f32).mul_add(y, 1.057_311 * z));
    [r, g, b].map(|c| linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0)
}

/// Clamp a/b to the range an 8-bit Lab encoding can hold.
#[must_use]
pub fn clamp_chroma(lab: Lab) -> Lab {
    Lab {
        l: lab.l.clamp(0.0, 100.0),
        a: lab.a.clamp(-128.0, 127.0),
        b: lab.b.clamp(-128.0, 127.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3], tol: f32) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tol)
    }

    #[test]
    fn quantize_rounds_and_saturates() {
        assert_eq!(quantize(-4.0), 0);
        assert_eq!(quantize(127.5), 128);
        assert_eq!(quantize(300.0), 255);
        assert_eq!(quantize(f32::NAN), 0);
    }

    #[test]
    fn luma_of_white_is_255() {
        assert!((luma([255.0; 3]) - 255.0).abs() < 1e-3);
    }

    #[test]
    fn hsv_value_preserves_ratio() {
        let out = with_hsv_value([200.0, 100.0, 50.0], 100.0);
        assert!(close(out, [100.0, 50.0, 25.0], 1e-4));
    }

    #[test]
    fn hsv_value_on_black_is_gray() {
        assert_eq!(with_hsv_value([0.0; 3], 20.0), [20.0; 3]);
    }

    #[test]
    fn hls_round_trip() {
        for rgb in [
            [255.0, 0.0, 0.0],
            [12.0, 200.0, 90.0],
            [30.0, 60.0, 240.0],
            [128.0, 128.0, 128.0],
            [250.0, 240.0, 10.0],
        ] {
            let back = hls_to_rgb(rgb_to_hls(rgb));
            assert!(close(back, rgb, 0.05), "{rgb:?} -> {back:?}");
        }
    }

    #[test]
    fn hls_hue_uses_half_degrees() {
        let blue = rgb_to_hls([0.0, 0.0, 255.0]);
        assert!((blue.h - 120.0).abs() < 1e-3);
    }

    #[test]
    fn lab_round_trip() {
        for rgb in [
            [0.0, 0.0, 0.0],
            [255.0, 255.0, 255.0],
            [200.0, 30.0, 90.0],
            [10.0, 120.0, 240.0],
            [64.0, 64.0, 64.0],
        ] {
            let back = lab_to_rgb(rgb_to_lab(rgb));
            assert!(close(back, rgb, 0.75), "{rgb:?} -> {back:?}");
        }
    }

    #[test]
    fn lab_white_has_full_lightness() {
        let white = rgb_to_lab([255.0; 3]);
        assert!((white.l - 100.0).abs() < 0.1);
        assert!(white.a.abs() < 0.5 && white.b.abs() < 0.5);
    }
}
