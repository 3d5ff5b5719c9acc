//! Safety clamp: saturating range enforcement for every canonical field.
//!
//! The bounds are empirically chosen: beyond them transforms produce
//! visibly broken output (posterized grain, near-black vignettes, blown
//! exposure). Values outside a range are pulled to the nearest bound,
//! never rejected. NaN reads as the field minimum.
//!
//! [`clamp_params`] is idempotent: `clamp_params(&clamp_params(p)) ==
//! clamp_params(p)` for every `p`.

use crate::params::{
    BasicParams, CanonicalParams, ColorMixer, CreativeParams, Curves, FilmFade, Glow, Grain,
    Intensity, Level, MixerBand, OrtonEffect, SplitToning, Vignette,
};

/// Inclusive `[min, max]` range for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// A range with `min <= max`.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Saturate `value` into the range. NaN maps to `min`.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// `true` if `value` lies in the range.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Saturate an integer into the range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply_int(self, value: i64) -> i64 {
        value.clamp(self.min as i64, self.max as i64)
    }

    /// Saturate into the range and force the result odd.
    ///
    /// Even values round up to the next odd value when it is still in
    /// range, otherwise down.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn apply_odd(self, value: u32) -> u32 {
        let clamped = self.apply_int(i64::from(value)).max(0) as u32;
        if clamped % 2 == 1 {
            clamped
        } else if f64::from(clamped + 1) <= self.max {
            clamped + 1
        } else {
            clamped.saturating_sub(1)
        }
    }
}

// ─────────────────────────── basic tier ───────────────────────────────

pub const EXPOSURE: Bounds = Bounds::new(-35.0, 15.0);
pub const CONTRAST: Bounds = Bounds::new(0.85, 1.35);
pub const HIGHLIGHTS: Bounds = Bounds::new(-35.0, 10.0);
pub const SHADOWS: Bounds = Bounds::new(-25.0, 35.0);
pub const WHITES: Bounds = Bounds::new(-25.0, 8.0);
pub const BLACKS: Bounds = Bounds::new(-20.0, 15.0);
pub const TEMP: Bounds = Bounds::new(-70.0, 70.0);
pub const TINT: Bounds = Bounds::new(-25.0, 25.0);
pub const SATURATION: Bounds = Bounds::new(0.0, 1.4);
pub const VIBRANCE: Bounds = Bounds::new(0.0, 0.8);
pub const MIXER_HUE_SHIFT: Bounds = Bounds::new(-20.0, 20.0);
pub const MIXER_SAT_SCALE: Bounds = Bounds::new(0.5, 1.8);
pub const MIXER_LUM_SCALE: Bounds = Bounds::new(0.7, 1.3);

// ────────────────────────── creative tier ─────────────────────────────

pub const SPLIT_HUE: Bounds = Bounds::new(0.0, 360.0);
pub const SPLIT_SAT: Bounds = Bounds::new(0.0, 0.5);
pub const OVERLAY_OPACITY: Bounds = Bounds::new(0.0, 1.0);
pub const CURVE_OFFSET: Bounds = Bounds::new(-100.0, 100.0);
pub const VIGNETTE_STRENGTH: Bounds = Bounds::new(0.0, 0.6);
pub const VIGNETTE_RADIUS: Bounds = Bounds::new(0.4, 0.9);
pub const GLOW_INTENSITY: Bounds = Bounds::new(0.0, 0.35);
pub const GLOW_RADIUS: Bounds = Bounds::new(15.0, 51.0);
pub const GRAIN_AMOUNT: Bounds = Bounds::new(0.0, 0.08);
pub const GRAIN_SIZE: Bounds = Bounds::new(1.0, 2.0);
pub const HAZE_AMOUNT: Bounds = Bounds::new(0.0, 0.4);
pub const FILM_FADE_AMOUNT: Bounds = Bounds::new(0.0, 1.0);
pub const FILM_BLACK_FADE: Bounds = Bounds::new(0.0, 0.5);
pub const CLARITY_AMOUNT: Bounds = Bounds::new(-1.0, 1.0);
pub const DEHAZE_AMOUNT: Bounds = Bounds::new(0.0, 1.0);
pub const ORTON_BLUR: Bounds = Bounds::new(15.0, 45.0);
pub const ORTON_BLEND: Bounds = Bounds::new(0.0, 0.5);
pub const GRADE_INTENSITY: Bounds = Bounds::new(0.0, 1.0);

/// Clamp every basic field and every present creative field.
#[must_use = "returns the clamped parameters"]
pub fn clamp_params(params: &CanonicalParams) -> CanonicalParams {
    CanonicalParams {
        basic: clamp_basic(&params.basic),
        creative: clamp_creative(&params.creative),
    }
}

fn level(value: Level, bounds: Bounds) -> Level {
    Level::new(bounds.apply(value.value))
}

fn clamp_basic(basic: &BasicParams) -> BasicParams {
    let mut out = basic.clone();
    out.exposure = level(basic.exposure, EXPOSURE);
    out.contrast = level(basic.contrast, CONTRAST);
    out.highlights = level(basic.highlights, HIGHLIGHTS);
    out.shadows = level(basic.shadows, SHADOWS);
    out.whites = level(basic.whites, WHITES);
    out.blacks = level(basic.blacks, BLACKS);
    out.temp_tint.temp = TEMP.apply(basic.temp_tint.temp);
    out.temp_tint.tint = TINT.apply(basic.temp_tint.tint);
    out.saturation.scale = SATURATION.apply(basic.saturation.scale);
    out.vibrance.strength = VIBRANCE.apply(basic.vibrance.strength);
    out.color_mixer = clamp_mixer(&basic.color_mixer);
    out
}

#[allow(clippy::cast_possible_truncation)]
fn clamp_mixer(mixer: &ColorMixer) -> ColorMixer {
    let mut out = *mixer;
    for band in crate::params::Band::ALL {
        let src = mixer.band(band);
        *out.band_mut(band) = MixerBand {
            hue_shift: MIXER_HUE_SHIFT.apply_int(i64::from(src.hue_shift)) as i32,
            sat_scale: MIXER_SAT_SCALE.apply(src.sat_scale),
            lum_scale: MIXER_LUM_SCALE.apply(src.lum_scale),
        };
    }
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_creative(creative: &CreativeParams) -> CreativeParams {
    let mut out = creative.clone();

    out.split_toning = creative.split_toning.map(|s| SplitToning {
        shadow_hue: SPLIT_HUE.apply(s.shadow_hue),
        shadow_sat: SPLIT_SAT.apply(s.shadow_sat),
        highlight_hue: SPLIT_HUE.apply(s.highlight_hue),
        highlight_sat: SPLIT_SAT.apply(s.highlight_sat),
    });
    out.color_overlay = creative.color_overlay.map(|mut o| {
        o.opacity = OVERLAY_OPACITY.apply(o.opacity);
        o
    });
    out.curves = creative.curves.map(|c| Curves {
        shadows: CURVE_OFFSET.apply(c.shadows),
        midtones: CURVE_OFFSET.apply(c.midtones),
        highlights: CURVE_OFFSET.apply(c.highlights),
    });
    out.vignette = creative.vignette.map(|v| Vignette {
        strength: VIGNETTE_STRENGTH.apply(v.strength),
        radius: VIGNETTE_RADIUS.apply(v.radius),
    });
    out.glow = creative.glow.map(|g| Glow {
        intensity: GLOW_INTENSITY.apply(g.intensity),
        radius: GLOW_RADIUS.apply_odd(g.radius),
    });
    out.grain = creative.grain.map(|g| Grain {
        amount: GRAIN_AMOUNT.apply(g.amount),
        size: GRAIN_SIZE.apply_int(i64::from(g.size)) as u32,
    });
    out.haze = creative.haze.map(|mut h| {
        h.amount = HAZE_AMOUNT.apply(h.amount);
        h
    });
    out.film_fade = creative.film_fade.map(|f| FilmFade {
        fade_amount: FILM_FADE_AMOUNT.apply(f.fade_amount),
        black_fade: FILM_BLACK_FADE.apply(f.black_fade),
    });
    out.clarity = creative.clarity.map(|mut c| {
        c.amount = CLARITY_AMOUNT.apply(c.amount);
        c
    });
    out.dehaze = creative.dehaze.map(|mut d| {
        d.amount = DEHAZE_AMOUNT.apply(d.amount);
        d
    });
    out.orton_effect = creative.orton_effect.map(|o| OrtonEffect {
        blur_amount: ORTON_BLUR.apply_odd(o.blur_amount),
        blend: ORTON_BLEND.apply(o.blend),
    });
    let grade = |i: Intensity| Intensity::new(GRADE_INTENSITY.apply(i.intensity));
    out.cross_process = creative.cross_process.map(grade);
    out.bleach_bypass = creative.bleach_bypass.map(grade);
    out.teal_and_orange = creative.teal_and_orange.map(grade);

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::params::{Clarity, Dehaze, Haze, ToolRecord};

    /// Parameters with every field pushed to an adversarial value.
    fn adversarial(value: f64) -> CanonicalParams {
        let mut p = CanonicalParams::default();
        for l in [
            &mut p.basic.exposure,
            &mut p.basic.contrast,
            &mut p.basic.highlights,
            &mut p.basic.shadows,
            &mut p.basic.whites,
            &mut p.basic.blacks,
        ] {
            l.value = value;
        }
        p.basic.temp_tint.temp = value;
        p.basic.temp_tint.tint = value;
        p.basic.saturation.scale = value;
        p.basic.vibrance.strength = value;
        p.basic.color_mixer.blue.sat_scale = value;
        p.basic.color_mixer.blue.lum_scale = value;
        p.basic.color_mixer.blue.hue_shift = if value.is_sign_negative() {
            i32::MIN
        } else {
            i32::MAX
        };
        p.set(ToolRecord::SplitToning(SplitToning {
            shadow_hue: value,
            shadow_sat: value,
            highlight_hue: value,
            highlight_sat: value,
        }));
        p.set(ToolRecord::Curves(Curves {
            shadows: value,
            midtones: value,
            highlights: value,
        }));
        p.set(ToolRecord::Vignette(Vignette {
            strength: value,
            radius: value,
        }));
        p.set(ToolRecord::Glow(Glow {
            intensity: value,
            radius: if value > 0.0 { u32::MAX } else { 0 },
        }));
        p.set(ToolRecord::Grain(Grain {
            amount: value,
            size: if value > 0.0 { 99 } else { 0 },
        }));
        p.set(ToolRecord::Haze(Haze {
            amount: value,
            ..Haze::default()
        }));
        p.set(ToolRecord::FilmFade(FilmFade {
            fade_amount: value,
            black_fade: value,
        }));
        p.set(ToolRecord::Clarity(Clarity { amount: value }));
        p.set(ToolRecord::Dehaze(Dehaze { amount: value }));
        p.set(ToolRecord::OrtonEffect(OrtonEffect {
            blur_amount: if value > 0.0 { 1000 } else { 2 },
            blend: value,
        }));
        p.set(ToolRecord::CrossProcess(Intensity::new(value)));
        p
    }

    fn assert_in_bounds(p: &CanonicalParams) {
        let b = &p.basic;
        assert!(EXPOSURE.contains(b.exposure.value));
        assert!(CONTRAST.contains(b.contrast.value));
        assert!(HIGHLIGHTS.contains(b.highlights.value));
        assert!(SHADOWS.contains(b.shadows.value));
        assert!(WHITES.contains(b.whites.value));
        assert!(BLACKS.contains(b.blacks.value));
        assert!(TEMP.contains(b.temp_tint.temp));
        assert!(TINT.contains(b.temp_tint.tint));
        assert!(SATURATION.contains(b.saturation.scale));
        assert!(VIBRANCE.contains(b.vibrance.strength));
        for band in crate::params::Band::ALL {
            let m = b.color_mixer.band(band);
            assert!(MIXER_HUE_SHIFT.contains(f64::from(m.hue_shift)));
            assert!(MIXER_SAT_SCALE.contains(m.sat_scale));
            assert!(MIXER_LUM_SCALE.contains(m.lum_scale));
        }
        let c = &p.creative;
        let s = c.split_toning.unwrap();
        assert!(SPLIT_HUE.contains(s.shadow_hue) && SPLIT_SAT.contains(s.shadow_sat));
        let v = c.vignette.unwrap();
        assert!(VIGNETTE_STRENGTH.contains(v.strength) && VIGNETTE_RADIUS.contains(v.radius));
        let g = c.glow.unwrap();
        assert!(GLOW_INTENSITY.contains(g.intensity));
        assert!(GLOW_RADIUS.contains(f64::from(g.radius)) && g.radius % 2 == 1);
        let gr = c.grain.unwrap();
        assert!(GRAIN_AMOUNT.contains(gr.amount) && GRAIN_SIZE.contains(f64::from(gr.size)));
        let o = c.orton_effect.unwrap();
        assert!(ORTON_BLUR.contains(f64::from(o.blur_amount)) && o.blur_amount % 2 == 1);
        assert!(ORTON_BLEND.contains(o.blend));
        assert!(CURVE_OFFSET.contains(c.curves.unwrap().midtones));
        assert!(HAZE_AMOUNT.contains(c.haze.unwrap().amount));
        assert!(CLARITY_AMOUNT.contains(c.clarity.unwrap().amount));
        assert!(DEHAZE_AMOUNT.contains(c.dehaze.unwrap().amount));
        assert!(FILM_BLACK_FADE.contains(c.film_fade.unwrap().black_fade));
        assert!(GRADE_INTENSITY.contains(c.cross_process.unwrap().intensity));
    }

    #[test]
    fn adversarial_values_land_in_bounds() {
        for value in [
            -1e300,
            -50.0,
            -0.5,
            0.0,
            1e-9,
            0.5,
            50.0,
            1e300,
            f64::NAN,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ] {
            assert_in_bounds(&clamp_params(&adversarial(value)));
        }
    }

    #[test]
    fn clamp_is_idempotent() {
        for value in [-1e6, -3.0, 0.25, 1.2, 150.0, f64::NAN, f64::INFINITY] {
            let once = clamp_params(&adversarial(value));
            let twice = clamp_params(&once);
            assert_eq!(once, twice, "not idempotent for {value}");
        }
    }

    #[test]
    fn nan_maps_to_minimum() {
        let clamped = clamp_params(&adversarial(f64::NAN));
        assert!((clamped.basic.exposure.value - EXPOSURE.min).abs() < f64::EPSILON);
        assert!((clamped.basic.contrast.value - CONTRAST.min).abs() < f64::EPSILON);
    }

    #[test]
    fn infinities_saturate() {
        let hi = clamp_params(&adversarial(f64::INFINITY));
        assert!((hi.basic.exposure.value - EXPOSURE.max).abs() < f64::EPSILON);
        let lo = clamp_params(&adversarial(f64::NEG_INFINITY));
        assert!((lo.basic.exposure.value - EXPOSURE.min).abs() < f64::EPSILON);
    }

    #[test]
    fn in_range_values_are_untouched() {
        let mut p = CanonicalParams::default();
        p.basic.exposure.value = -12.5;
        p.set(ToolRecord::Vignette(Vignette {
            strength: 0.3,
            radius: 0.7,
        }));
        assert_eq!(clamp_params(&p), p);
    }

    #[test]
    fn odd_forcing_rounds_up_inside_range() {
        assert_eq!(GLOW_RADIUS.apply_odd(20), 21);
        assert_eq!(GLOW_RADIUS.apply_odd(21), 21);
        assert_eq!(GLOW_RADIUS.apply_odd(2), 15);
        assert_eq!(GLOW_RADIUS.apply_odd(60), 51);
        assert_eq!(ORTON_BLUR.apply_odd(44), 45);
    }

    #[test]
    fn grain_cap_is_eight_hundredths() {
        assert!((GRAIN_AMOUNT.apply(0.5) - 0.08).abs() < f64::EPSILON);
    }
}
