//! Turn loosely-shaped suggestion values into canonical records.
//!
//! A suggestion source may send a tool's parameters as a bare number, a
//! numeric string, a style token, a flat object with any of several
//! synonymous keys, nested sub-objects, or a list of curve control
//! points. Each tool has one pure reader here that accepts all of those
//! shapes and fills every field of the tool's record, falling back to the
//! documented default for anything missing.
//!
//! Synonyms are tried in a fixed order and the first key that is present
//! and reads as a usable value wins, so an explicit `0` beats a later
//! synonym. Intensity-like fields follow the percentage rule: a value
//! above 1.0 is read as a percentage and divided by 100.
//!
//! Normalization never fails. Values are not range-checked here; that is
//! the job of [`clamp_params`](crate::clamp_params).

use crate::params::{
    Band, BlendMode, CanonicalParams, Clarity, ColorMixer, ColorOverlay, Curves, Dehaze, Duotone,
    FilmFade, Glow, Grain, Haze, Intensity, Level, LutGrade, MixerBand, OrtonEffect, Saturation,
    SplitToning, StyleChoice, TempTint, ToolRecord, Vibrance, Vignette,
};
use crate::preset::{LutStyle, StylePreset};
use crate::raw::{RawParams, RawValue};
use crate::tool::ToolName;
use crate::types::Color;

/// Saturation given to a split-toning zone whose hue came from a color.
const COLOR_DERIVED_SAT: f64 = 0.3;

/// Intensity defaults of the three film-look grades.
const CROSS_PROCESS_DEFAULT: f64 = 0.4;
const BLEACH_BYPASS_DEFAULT: f64 = 0.4;
const TEAL_AND_ORANGE_DEFAULT: f64 = 0.5;

/// Normalize one tool's raw value.
///
/// Returns `None` when the value carries nothing usable for the tool
/// (absent, or a shape the tool cannot read), in which case a basic tool
/// keeps its neutral default and a creative tool is treated as not
/// requested.
#[must_use]
pub fn normalize(tool: ToolName, raw: &RawValue) -> Option<ToolRecord> {
    if raw.is_absent() {
        return None;
    }
    let level = |keys: &[&str]| single_value(raw, keys).map(Level::new);
    match tool {
        ToolName::AdjustExposure => level(LEVEL_KEYS).map(ToolRecord::Exposure),
        ToolName::AdjustContrast => level(LEVEL_KEYS).map(ToolRecord::Contrast),
        ToolName::AdjustHighlights => level(LEVEL_KEYS).map(ToolRecord::Highlights),
        ToolName::AdjustShadows => level(LEVEL_KEYS).map(ToolRecord::Shadows),
        ToolName::AdjustWhites => level(LEVEL_KEYS).map(ToolRecord::Whites),
        ToolName::AdjustBlacks => level(LEVEL_KEYS).map(ToolRecord::Blacks),
        ToolName::AdjustTempTint => temp_tint(raw).map(ToolRecord::TempTint),
        ToolName::AdjustSaturation => single_value(raw, &["scale", "value", "amount"])
            .map(|scale| ToolRecord::Saturation(Saturation { scale })),
        ToolName::AdjustVibrance => {
            single_value(raw, &["strength", "amount", "intensity", "value"])
                .map(|v| ToolRecord::Vibrance(Vibrance { strength: pct(v) }))
        }
        ToolName::AdjustColorMixer => color_mixer(raw).map(ToolRecord::ColorMixer),
        ToolName::ApplySplitToning => split_toning(raw).map(ToolRecord::SplitToning),
        ToolName::ApplyColorOverlay => color_overlay(raw).map(ToolRecord::ColorOverlay),
        ToolName::ApplyCurves => curves(raw).map(ToolRecord::Curves),
        ToolName::ApplyVignette => vignette(raw).map(ToolRecord::Vignette),
        ToolName::ApplyGlow => glow(raw).map(ToolRecord::Glow),
        ToolName::ApplyGrain => grain(raw).map(ToolRecord::Grain),
        ToolName::ApplyDuotone => duotone(raw).map(ToolRecord::Duotone),
        ToolName::ApplyHaze => haze(raw).map(ToolRecord::Haze),
        ToolName::ApplyFilmFade => film_fade(raw).map(ToolRecord::FilmFade),
        ToolName::ApplyClarity => clarity(raw).map(ToolRecord::Clarity),
        ToolName::ApplyDehaze => dehaze(raw).map(ToolRecord::Dehaze),
        ToolName::ApplyOrtonEffect => orton_effect(raw).map(ToolRecord::OrtonEffect),
        ToolName::ApplyCrossProcess => {
            intensity(raw, CROSS_PROCESS_DEFAULT).map(ToolRecord::CrossProcess)
        }
        ToolName::ApplyBleachBypass => {
            intensity(raw, BLEACH_BYPASS_DEFAULT).map(ToolRecord::BleachBypass)
        }
        ToolName::ApplyTealAndOrange => {
            intensity(raw, TEAL_AND_ORANGE_DEFAULT).map(ToolRecord::TealAndOrange)
        }
        ToolName::ApplyLutColorGrade => lut_grade(raw).map(ToolRecord::LutColorGrade),
        ToolName::ApplyStylePreset => style_choice(raw).map(ToolRecord::StylePreset),
    }
}

/// Normalize a whole suggestion payload.
///
/// Unknown tool names and unusable values are skipped (logged at debug
/// level). Basic tools that are missing keep their neutral defaults.
#[must_use]
pub fn normalize_params(raw: &RawParams) -> CanonicalParams {
    let mut params = CanonicalParams::default();
    for (name, value) in raw.iter() {
        let Ok(tool) = name.parse::<ToolName>() else {
            tracing::debug!(tool = name, "ignoring unknown tool");
            continue;
        };
        match normalize(tool, value) {
            Some(record) => params.set(record),
            None => tracing::debug!(%tool, "ignoring unusable parameter value"),
        }
    }
    params
}

// ───────────────────────────── shared readers ─────────────────────────

const LEVEL_KEYS: &[&str] = &["value", "amount"];

/// Percentage rule: anything above 1.0 is a percentage.
fn pct(value: f64) -> f64 {
    if value > 1.0 { value / 100.0 } else { value }
}

/// Truncate to an unsigned integer; non-finite values give `default`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(value: Option<f64>, default: u32) -> u32 {
    match value {
        Some(v) if v.is_finite() => v.trunc().clamp(0.0, f64::from(u32::MAX)) as u32,
        _ => default,
    }
}

/// Truncate to a signed integer; non-finite values give `default`.
#[allow(clippy::cast_possible_truncation)]
fn whole_signed(value: Option<f64>, default: i32) -> i32 {
    match value {
        Some(v) if v.is_finite() => {
            v.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
        }
        _ => default,
    }
}

/// A single-field tool: a bare scalar is the value, a mapping is
/// searched by synonym.
fn single_value(raw: &RawValue, keys: &[&str]) -> Option<f64> {
    match raw {
        RawValue::Mapping(_) => raw.first_number(keys),
        RawValue::Number(_) | RawValue::Text(_) => raw.as_number(),
        RawValue::Absent | RawValue::Sequence(_) => None,
    }
}

/// How a creative tool's value is read.
enum Input<'a> {
    /// Fields are looked up by synonym.
    Fields(&'a RawValue),
    /// A bare number (or numeric text) standing for the primary field.
    Primary(f64),
}

impl<'a> Input<'a> {
    fn of(raw: &'a RawValue) -> Option<Self> {
        match raw {
            RawValue::Mapping(_) => Some(Self::Fields(raw)),
            RawValue::Number(_) | RawValue::Text(_) => raw.as_number().map(Self::Primary),
            RawValue::Absent | RawValue::Sequence(_) => None,
        }
    }

    /// The primary field: the bare scalar, or the first matching key.
    fn primary(&self, keys: &[&str]) -> Option<f64> {
        match self {
            Self::Fields(raw) => raw.first_number(keys),
            Self::Primary(value) => Some(*value),
        }
    }

    fn number(&self, keys: &[&str]) -> Option<f64> {
        match self {
            Self::Fields(raw) => raw.first_number(keys),
            Self::Primary(_) => None,
        }
    }

    fn color(&self, keys: &[&str]) -> Option<Color> {
        match self {
            Self::Fields(raw) => raw.first_color(keys),
            Self::Primary(_) => None,
        }
    }

    fn rgb(&self, keys: &[&str]) -> Option<Color> {
        match self {
            Self::Fields(raw) => raw.first_rgb(keys),
            Self::Primary(_) => None,
        }
    }

    fn text(&self, keys: &[&str]) -> Option<&'a str> {
        match self {
            Self::Fields(raw) => raw.first_text(keys),
            Self::Primary(_) => None,
        }
    }
}

/// A token tool: bare text is the token, a mapping is searched by
/// synonym, anything else is unusable.
fn token<'a>(raw: &'a RawValue, keys: &[&str]) -> Option<Option<&'a str>> {
    match raw {
        RawValue::Text(text) => Some(Some(text.as_str())),
        RawValue::Mapping(_) => Some(raw.first_text(keys)),
        RawValue::Absent | RawValue::Number(_) | RawValue::Sequence(_) => None,
    }
}

// ───────────────────────────── basic tools ────────────────────────────

fn temp_tint(raw: &RawValue) -> Option<TempTint> {
    match raw {
        RawValue::Mapping(_) => Some(TempTint {
            temp: raw.first_number(&["temp", "temperature"]).unwrap_or(0.0),
            tint: raw.first_number(&["tint"]).unwrap_or(0.0),
        }),
        _ => raw.as_number().map(|temp| TempTint { temp, tint: 0.0 }),
    }
}

fn color_mixer(raw: &RawValue) -> Option<ColorMixer> {
    raw.as_mapping()?;
    let mut mixer = ColorMixer::default();
    for band in Band::ALL {
        let Some(cfg) = raw.get(band.as_str()).filter(|v| v.as_mapping().is_some()) else {
            continue;
        };
        *mixer.band_mut(band) = MixerBand {
            hue_shift: whole_signed(cfg.first_number(&["hue_shift", "hue"]), 0),
            sat_scale: cfg
                .first_number(&["sat_scale", "saturation", "sat"])
                .unwrap_or(1.0),
            lum_scale: cfg
                .first_number(&["lum_scale", "luminance", "lum"])
                .unwrap_or(1.0),
        };
    }
    Some(mixer)
}

// ─────────────────────────── creative tools ───────────────────────────

fn split_toning(raw: &RawValue) -> Option<SplitToning> {
    let input = Input::of(raw)?;
    let mut out = SplitToning::default();

    // Zone colors are RGB, unlike the BGR colors of overlay and duotone.
    if let Some(color) = input.rgb(&["shadow_color"]) {
        out.shadow_hue = color.hue_degrees();
        out.shadow_sat = COLOR_DERIVED_SAT;
    }
    if let Some(color) = input.rgb(&["highlight_color"]) {
        out.highlight_hue = color.hue_degrees();
        out.highlight_sat = COLOR_DERIVED_SAT;
    }
    if let Some(hue) = input.primary(&["shadow_hue", "shadows_hue", "shadow_h"]) {
        out.shadow_hue = hue;
    }
    if let Some(hue) = input.number(&["highlight_hue", "highlights_hue", "highlight_h"]) {
        out.highlight_hue = hue;
    }
    if let Some(sat) =
        input.number(&["shadow_sat", "shadow_saturation", "shadows_sat", "shadow_s"])
    {
        out.shadow_sat = pct(sat);
    }
    if let Some(sat) = input.number(&[
        "highlight_sat",
        "highlight_saturation",
        "highlights_sat",
        "highlight_s",
    ]) {
        out.highlight_sat = pct(sat);
    }

    // Nested zone objects take precedence over flat keys.
    if let Some(zone) = raw.get("shadows") {
        if let Some(hue) = zone.first_number(&["hue"]) {
            out.shadow_hue = hue;
        }
        if let Some(sat) = zone.first_number(&["sat", "saturation"]) {
            out.shadow_sat = pct(sat);
        }
    }
    if let Some(zone) = raw.get("highlights") {
        if let Some(hue) = zone.first_number(&["hue"]) {
            out.highlight_hue = hue;
        }
        if let Some(sat) = zone.first_number(&["sat", "saturation"]) {
            out.highlight_sat = pct(sat);
        }
    }
    Some(out)
}

fn color_overlay(raw: &RawValue) -> Option<ColorOverlay> {
    let input = Input::of(raw)?;
    let defaults = ColorOverlay::default();
    Some(ColorOverlay {
        color: input.color(&["color"]).unwrap_or(defaults.color),
        opacity: input
            .primary(&["opacity", "amount", "strength", "intensity"])
            .map_or(defaults.opacity, pct),
        blend_mode: input
            .text(&["blend_mode", "mode", "blend"])
            .map_or(defaults.blend_mode, BlendMode::from_token),
    })
}

/// Read five `[x, y]` control points at x = 0, 64, 128, 192, 255.
///
/// Only the first, middle, and last outputs matter.
fn curves_from_points(points: &[RawValue]) -> Option<Curves> {
    if points.len() < 5 {
        return None;
    }
    let (_, y0) = points[0].as_point()?;
    let (_, y2) = points[2].as_point()?;
    let (_, y4) = points[4].as_point()?;
    Some(Curves {
        shadows: y0 * 2.0,
        midtones: (y2 - 128.0) / 2.0,
        highlights: (y4 - 255.0) * 2.0,
    })
}

fn curves(raw: &RawValue) -> Option<Curves> {
    if let Some(points) = raw.as_sequence() {
        return Some(curves_from_points(points).unwrap_or_default());
    }
    if let Some(from_points) = raw
        .get("points")
        .and_then(RawValue::as_sequence)
        .and_then(curves_from_points)
    {
        return Some(from_points);
    }
    let input = Input::of(raw)?;
    Some(Curves {
        shadows: input.primary(&["shadows"]).unwrap_or(0.0),
        midtones: input.number(&["midtones"]).unwrap_or(0.0),
        highlights: input.number(&["highlights"]).unwrap_or(0.0),
    })
}

fn vignette(raw: &RawValue) -> Option<Vignette> {
    let input = Input::of(raw)?;
    let defaults = Vignette::default();
    Some(Vignette {
        strength: input
            .primary(&["strength", "amount", "intensity"])
            .map_or(defaults.strength, pct),
        radius: input
            .number(&["radius", "feather", "feathers", "size"])
            .map_or(defaults.radius, pct),
    })
}

fn glow(raw: &RawValue) -> Option<Glow> {
    let input = Input::of(raw)?;
    let defaults = Glow::default();
    Some(Glow {
        intensity: input
            .primary(&["intensity", "amount", "strength"])
            .map_or(defaults.intensity, pct),
        radius: whole(input.number(&["radius", "size"]), defaults.radius),
    })
}

fn grain(raw: &RawValue) -> Option<Grain> {
    let input = Input::of(raw)?;
    let defaults = Grain::default();
    Some(Grain {
        amount: input
            .primary(&["amount", "strength", "intensity"])
            .map_or(defaults.amount, pct),
        size: whole(input.number(&["size"]), defaults.size),
    })
}

/// Duotone has no numeric field, so only a mapping is usable.
fn duotone(raw: &RawValue) -> Option<Duotone> {
    raw.as_mapping()?;
    let defaults = Duotone::default();
    Some(Duotone {
        dark_color: raw
            .first_color(&["dark_color", "shadow_color", "color1"])
            .unwrap_or(defaults.dark_color),
        light_color: raw
            .first_color(&["light_color", "highlight_color", "color2"])
            .unwrap_or(defaults.light_color),
    })
}

fn haze(raw: &RawValue) -> Option<Haze> {
    let input = Input::of(raw)?;
    let defaults = Haze::default();
    Some(Haze {
        amount: input
            .primary(&["amount", "strength", "intensity"])
            .map_or(defaults.amount, pct),
        color: input.color(&["color"]).unwrap_or(defaults.color),
    })
}

fn film_fade(raw: &RawValue) -> Option<FilmFade> {
    let input = Input::of(raw)?;
    let defaults = FilmFade::default();
    Some(FilmFade {
        fade_amount: input
            .primary(&["fade_amount", "amount", "fade"])
            .map_or(defaults.fade_amount, pct),
        black_fade: input
            .number(&["black_fade", "black", "matte"])
            .map_or(defaults.black_fade, pct),
    })
}

/// Clarity is signed, so the percentage rule looks at the magnitude.
fn clarity(raw: &RawValue) -> Option<Clarity> {
    let input = Input::of(raw)?;
    let amount = input
        .primary(&["amount", "strength", "intensity"])
        .map_or(Clarity::default().amount, |v| {
            if v.abs() > 1.0 { v / 100.0 } else { v }
        });
    Some(Clarity { amount })
}

fn dehaze(raw: &RawValue) -> Option<Dehaze> {
    let input = Input::of(raw)?;
    let amount = input
        .primary(&["amount", "strength", "intensity"])
        .map_or(Dehaze::default().amount, pct);
    Some(Dehaze { amount })
}

fn orton_effect(raw: &RawValue) -> Option<OrtonEffect> {
    let input = Input::of(raw)?;
    let defaults = OrtonEffect::default();
    Some(OrtonEffect {
        blur_amount: whole(
            input.primary(&["blur_amount", "blur", "radius"]),
            defaults.blur_amount,
        ),
        blend: input
            .number(&["blend", "amount", "strength"])
            .map_or(defaults.blend, pct),
    })
}

fn intensity(raw: &RawValue, default: f64) -> Option<Intensity> {
    let input = Input::of(raw)?;
    let value = input
        .primary(&["intensity", "amount", "strength"])
        .map_or(default, pct);
    Some(Intensity::new(value))
}

fn lut_grade(raw: &RawValue) -> Option<LutGrade> {
    let style = token(raw, &["style", "lut", "name"])?
        .map_or_else(LutStyle::default, LutStyle::from_token);
    Some(LutGrade { style })
}

fn style_choice(raw: &RawValue) -> Option<StyleChoice> {
    let style = token(raw, &["style", "preset", "name"])?
        .map_or_else(StylePreset::default, StylePreset::from_token);
    Some(StyleChoice { style })
}
