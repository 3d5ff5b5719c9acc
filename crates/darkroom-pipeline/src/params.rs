//! Canonical parameter records.
//!
//! Every tool has one fixed-shape record with all fields present. The
//! basic tier is always populated (neutral defaults); the creative tier
//! holds `Option`s that are `Some` only when a suggestion supplied the
//! tool. Serde field names are the wire names, so a serialized
//! [`CanonicalParams`] is itself a valid suggestion payload.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::preset::{LutStyle, StylePreset};
use crate::tool::ToolName;
use crate::types::Color;

// ───────────────────────────── basic records ──────────────────────────

/// A single-value tonal adjustment (exposure, contrast, highlights,
/// shadows, whites, blacks).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Offset in 8-bit units, or the contrast multiplier.
    pub value: f64,
}

impl Level {
    /// A level with the given value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self { value }
    }
}

/// White balance shift in L\*a\*b\*.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TempTint {
    /// Blue-yellow shift (positive is warmer).
    pub temp: f64,
    /// Green-magenta shift (positive is more magenta).
    pub tint: f64,
}

/// Global saturation multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Saturation {
    /// 0 is grayscale, 1 is unchanged.
    pub scale: f64,
}

impl Default for Saturation {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Saturation boost weighted toward muted pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vibrance {
    /// 0 is unchanged.
    pub strength: f64,
}

/// Hue band used by the color mixer.
///
/// Ranges are on the half-degree hue scale (0-180) used for 8-bit HLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
}

impl Band {
    /// All bands in mixer order.
    pub const ALL: [Self; 7] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Cyan,
        Self::Blue,
        Self::Purple,
    ];

    /// Wire key for this band.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Purple => "purple",
        }
    }

    /// The band a half-degree hue (0-179) falls in.
    #[must_use]
    pub const fn of_hue(hue: u8) -> Self {
        match hue {
            11..=25 => Self::Orange,
            26..=34 => Self::Yellow,
            35..=85 => Self::Green,
            86..=100 => Self::Cyan,
            101..=130 => Self::Blue,
            131..=169 => Self::Purple,
            _ => Self::Red,
        }
    }
}

/// Per-band hue, saturation, and luminance adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerBand {
    /// Hue rotation on the 0-180 scale.
    pub hue_shift: i32,
    /// HLS saturation multiplier.
    pub sat_scale: f64,
    /// HLS lightness multiplier.
    pub lum_scale: f64,
}

impl MixerBand {
    /// The do-nothing band.
    pub const NEUTRAL: Self = Self {
        hue_shift: 0,
        sat_scale: 1.0,
        lum_scale: 1.0,
    };

    /// `true` when this band leaves pixels unchanged.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_neutral(&self) -> bool {
        self.hue_shift == 0 && self.sat_scale == 1.0 && self.lum_scale == 1.0
    }
}

impl Default for MixerBand {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Seven-band color mixer. All bands are always present.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorMixer {
    pub red: MixerBand,
    pub orange: MixerBand,
    pub yellow: MixerBand,
    pub green: MixerBand,
    pub cyan: MixerBand,
    pub blue: MixerBand,
    pub purple: MixerBand,
}

impl ColorMixer {
    /// The settings for one band.
    #[must_use]
    pub const fn band(&self, band: Band) -> &MixerBand {
        match band {
            Band::Red => &self.red,
            Band::Orange => &self.orange,
            Band::Yellow => &self.yellow,
            Band::Green => &self.green,
            Band::Cyan => &self.cyan,
            Band::Blue => &self.blue,
            Band::Purple => &self.purple,
        }
    }

    /// Mutable settings for one band.
    pub fn band_mut(&mut self, band: Band) -> &mut MixerBand {
        match band {
            Band::Red => &mut self.red,
            Band::Orange => &mut self.orange,
            Band::Yellow => &mut self.yellow,
            Band::Green => &mut self.green,
            Band::Cyan => &mut self.cyan,
            Band::Blue => &mut self.blue,
            Band::Purple => &mut self.purple,
        }
    }

    /// `true` when every band is neutral.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        Band::ALL.iter().all(|&b| self.band(b).is_neutral())
    }
}

/// The always-applied tonal tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicParams {
    #[serde(rename = "adjust_exposure")]
    pub exposure: Level,
    #[serde(rename = "adjust_contrast")]
    pub contrast: Level,
    #[serde(rename = "adjust_highlights")]
    pub highlights: Level,
    #[serde(rename = "adjust_shadows")]
    pub shadows: Level,
    #[serde(rename = "adjust_whites")]
    pub whites: Level,
    #[serde(rename = "adjust_blacks")]
    pub blacks: Level,
    #[serde(rename = "adjust_temp_tint")]
    pub temp_tint: TempTint,
    #[serde(rename = "adjust_saturation")]
    pub saturation: Saturation,
    #[serde(rename = "adjust_vibrance")]
    pub vibrance: Vibrance,
    #[serde(rename = "adjust_color_mixer")]
    pub color_mixer: ColorMixer,
}

impl BasicParams {
    /// Neutral exposure offset.
    pub const DEFAULT_EXPOSURE: f64 = 0.0;
    /// Neutral contrast multiplier.
    pub const DEFAULT_CONTRAST: f64 = 1.0;
}

impl Default for BasicParams {
    fn default() -> Self {
        Self {
            exposure: Level::new(Self::DEFAULT_EXPOSURE),
            contrast: Level::new(Self::DEFAULT_CONTRAST),
            highlights: Level::new(0.0),
            shadows: Level::new(0.0),
            whites: Level::new(0.0),
            blacks: Level::new(0.0),
            temp_tint: TempTint::default(),
            saturation: Saturation::default(),
            vibrance: Vibrance::default(),
            color_mixer: ColorMixer::default(),
        }
    }
}

// ─────────────────────────── creative records ─────────────────────────

/// Tint shadows and highlights toward two hues.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitToning {
    /// Shadow hue in degrees.
    pub shadow_hue: f64,
    /// Shadow tint strength.
    pub shadow_sat: f64,
    /// Highlight hue in degrees.
    pub highlight_hue: f64,
    /// Highlight tint strength.
    pub highlight_sat: f64,
}

impl Default for SplitToning {
    fn default() -> Self {
        Self {
            shadow_hue: 220.0,
            shadow_sat: 0.25,
            highlight_hue: 40.0,
            highlight_sat: 0.2,
        }
    }
}

/// Blend mode for [`ColorOverlay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum BlendMode {
    #[default]
    Overlay,
    Multiply,
    Screen,
    SoftLight,
    /// Plain alpha blend of the flat color.
    Normal,
}

impl BlendMode {
    /// Wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overlay => "overlay",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::SoftLight => "soft_light",
            Self::Normal => "normal",
        }
    }

    /// Parse a token; unknown tokens fall back to [`BlendMode::Overlay`].
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match normalize_token(token).as_str() {
            "multiply" => Self::Multiply,
            "screen" => Self::Screen,
            "soft_light" | "softlight" => Self::SoftLight,
            "normal" => Self::Normal,
            _ => Self::Overlay,
        }
    }
}

impl From<String> for BlendMode {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

impl From<BlendMode> for &'static str {
    fn from(mode: BlendMode) -> Self {
        mode.as_str()
    }
}

/// Flat color blended over the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOverlay {
    pub color: Color,
    pub opacity: f64,
    pub blend_mode: BlendMode,
}

impl Default for ColorOverlay {
    fn default() -> Self {
        Self {
            color: Color::from_bgr([255, 100, 50]),
            opacity: 0.2,
            blend_mode: BlendMode::Overlay,
        }
    }
}

/// Tone curve offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Curves {
    /// Lift (positive) or crush (negative) the low end.
    pub shadows: f64,
    /// Gamma control: positive brightens midtones.
    pub midtones: f64,
    /// Push (positive) or roll off (negative) the high end.
    pub highlights: f64,
}

/// Radial edge darkening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vignette {
    pub strength: f64,
    /// Normalized distance where falloff begins.
    pub radius: f64,
}

impl Default for Vignette {
    fn default() -> Self {
        Self {
            strength: 0.4,
            radius: 0.75,
        }
    }
}

/// Highlight bloom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glow {
    pub intensity: f64,
    /// Odd blur kernel size in pixels.
    pub radius: u32,
}

impl Default for Glow {
    fn default() -> Self {
        Self {
            intensity: 0.2,
            radius: 21,
        }
    }
}

/// Film grain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grain {
    pub amount: f64,
    /// Grain cell size in pixels.
    pub size: u32,
}

impl Default for Grain {
    fn default() -> Self {
        Self {
            amount: 0.03,
            size: 1,
        }
    }
}

/// Two-color gradient map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Duotone {
    pub dark_color: Color,
    pub light_color: Color,
}

impl Default for Duotone {
    fn default() -> Self {
        Self {
            dark_color: Color::from_bgr([20, 0, 80]),
            light_color: Color::from_bgr([255, 200, 100]),
        }
    }
}

/// Flat-color atmospheric wash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Haze {
    pub amount: f64,
    pub color: Color,
}

impl Default for Haze {
    fn default() -> Self {
        Self {
            amount: 0.15,
            color: Color::from_bgr([200, 180, 160]),
        }
    }
}

/// Matte film look: lifted blacks, compressed highlights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmFade {
    pub fade_amount: f64,
    pub black_fade: f64,
}

impl Default for FilmFade {
    fn default() -> Self {
        Self {
            fade_amount: 0.25,
            black_fade: 0.1,
        }
    }
}

/// Local contrast via unsharp masking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clarity {
    /// Negative values soften.
    pub amount: f64,
}

impl Default for Clarity {
    fn default() -> Self {
        Self { amount: 0.3 }
    }
}

/// Contrast-limited equalization of lightness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dehaze {
    pub amount: f64,
}

impl Default for Dehaze {
    fn default() -> Self {
        Self { amount: 0.4 }
    }
}

/// Dreamy blurred-brightened overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrtonEffect {
    /// Odd blur kernel size in pixels.
    pub blur_amount: u32,
    pub blend: f64,
}

impl Default for OrtonEffect {
    fn default() -> Self {
        Self {
            blur_amount: 25,
            blend: 0.25,
        }
    }
}

/// Single-intensity color grade (cross process, bleach bypass, teal and
/// orange).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intensity {
    pub intensity: f64,
}

impl Intensity {
    /// An intensity record.
    #[must_use]
    pub const fn new(intensity: f64) -> Self {
        Self { intensity }
    }
}

/// Named LUT-style grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LutGrade {
    pub style: LutStyle,
}

/// Named style preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleChoice {
    pub style: StylePreset,
}

/// The optional creative tier. `None` means "not requested".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreativeParams {
    #[serde(rename = "apply_split_toning", skip_serializing_if = "Option::is_none")]
    pub split_toning: Option<SplitToning>,
    #[serde(rename = "apply_color_overlay", skip_serializing_if = "Option::is_none")]
    pub color_overlay: Option<ColorOverlay>,
    #[serde(rename = "apply_curves", skip_serializing_if = "Option::is_none")]
    pub curves: Option<Curves>,
    #[serde(rename = "apply_vignette", skip_serializing_if = "Option::is_none")]
    pub vignette: Option<Vignette>,
    #[serde(rename = "apply_glow", skip_serializing_if = "Option::is_none")]
    pub glow: Option<Glow>,
    #[serde(rename = "apply_grain", skip_serializing_if = "Option::is_none")]
    pub grain: Option<Grain>,
    #[serde(rename = "apply_duotone", skip_serializing_if = "Option::is_none")]
    pub duotone: Option<Duotone>,
    #[serde(rename = "apply_haze", skip_serializing_if = "Option::is_none")]
    pub haze: Option<Haze>,
    #[serde(rename = "apply_film_fade", skip_serializing_if = "Option::is_none")]
    pub film_fade: Option<FilmFade>,
    #[serde(rename = "apply_clarity", skip_serializing_if = "Option::is_none")]
    pub clarity: Option<Clarity>,
    #[serde(rename = "apply_dehaze", skip_serializing_if = "Option::is_none")]
    pub dehaze: Option<Dehaze>,
    #[serde(rename = "apply_orton_effect", skip_serializing_if = "Option::is_none")]
    pub orton_effect: Option<OrtonEffect>,
    #[serde(rename = "apply_cross_process", skip_serializing_if = "Option::is_none")]
    pub cross_process: Option<Intensity>,
    #[serde(rename = "apply_bleach_bypass", skip_serializing_if = "Option::is_none")]
    pub bleach_bypass: Option<Intensity>,
    #[serde(rename = "apply_teal_and_orange", skip_serializing_if = "Option::is_none")]
    pub teal_and_orange: Option<Intensity>,
    #[serde(rename = "apply_lut_color_grade", skip_serializing_if = "Option::is_none")]
    pub lut_color_grade: Option<LutGrade>,
    #[serde(rename = "apply_style_preset", skip_serializing_if = "Option::is_none")]
    pub style_preset: Option<StyleChoice>,
}

impl CreativeParams {
    /// `true` if `tool` was requested. Basic tools always read `false`.
    #[must_use]
    pub const fn contains(&self, tool: ToolName) -> bool {
        match tool {
            ToolName::ApplySplitToning => self.split_toning.is_some(),
            ToolName::ApplyColorOverlay => self.color_overlay.is_some(),
            ToolName::ApplyCurves => self.curves.is_some(),
            ToolName::ApplyVignette => self.vignette.is_some(),
            ToolName::ApplyGlow => self.glow.is_some(),
            ToolName::ApplyGrain => self.grain.is_some(),
            ToolName::ApplyDuotone => self.duotone.is_some(),
            ToolName::ApplyHaze => self.haze.is_some(),
            ToolName::ApplyFilmFade => self.film_fade.is_some(),
            ToolName::ApplyClarity => self.clarity.is_some(),
            ToolName::ApplyDehaze => self.dehaze.is_some(),
            ToolName::ApplyOrtonEffect => self.orton_effect.is_some(),
            ToolName::ApplyCrossProcess => self.cross_process.is_some(),
            ToolName::ApplyBleachBypass => self.bleach_bypass.is_some(),
            ToolName::ApplyTealAndOrange => self.teal_and_orange.is_some(),
            ToolName::ApplyLutColorGrade => self.lut_color_grade.is_some(),
            ToolName::ApplyStylePreset => self.style_preset.is_some(),
            _ => false,
        }
    }

    /// Requested creative tools in application order.
    pub fn present(&self) -> impl Iterator<Item = ToolName> + '_ {
        ToolName::CREATIVE
            .into_iter()
            .filter(|&tool| self.contains(tool))
    }
}

/// The complete, fixed-shape parameter set handed to the chain executor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalParams {
    #[serde(flatten)]
    pub basic: BasicParams,
    #[serde(flatten)]
    pub creative: CreativeParams,
}

impl CanonicalParams {
    /// Store one normalized record, replacing any earlier value.
    pub fn set(&mut self, record: ToolRecord) {
        let (b, c) = (&mut self.basic, &mut self.creative);
        match record {
            ToolRecord::Exposure(r) => b.exposure = r,
            ToolRecord::Contrast(r) => b.contrast = r,
            ToolRecord::Highlights(r) => b.highlights = r,
            ToolRecord::Shadows(r) => b.shadows = r,
            ToolRecord::Whites(r) => b.whites = r,
            ToolRecord::Blacks(r) => b.blacks = r,
            ToolRecord::TempTint(r) => b.temp_tint = r,
            ToolRecord::Saturation(r) => b.saturation = r,
            ToolRecord::Vibrance(r) => b.vibrance = r,
            ToolRecord::ColorMixer(r) => b.color_mixer = r,
            ToolRecord::SplitToning(r) => c.split_toning = Some(r),
            ToolRecord::ColorOverlay(r) => c.color_overlay = Some(r),
            ToolRecord::Curves(r) => c.curves = Some(r),
            ToolRecord::Vignette(r) => c.vignette = Some(r),
            ToolRecord::Glow(r) => c.glow = Some(r),
            ToolRecord::Grain(r) => c.grain = Some(r),
            ToolRecord::Duotone(r) => c.duotone = Some(r),
            ToolRecord::Haze(r) => c.haze = Some(r),
            ToolRecord::FilmFade(r) => c.film_fade = Some(r),
            ToolRecord::Clarity(r) => c.clarity = Some(r),
            ToolRecord::Dehaze(r) => c.dehaze = Some(r),
            ToolRecord::OrtonEffect(r) => c.orton_effect = Some(r),
            ToolRecord::CrossProcess(r) => c.cross_process = Some(r),
            ToolRecord::BleachBypass(r) => c.bleach_bypass = Some(r),
            ToolRecord::TealAndOrange(r) => c.teal_and_orange = Some(r),
            ToolRecord::LutColorGrade(r) => c.lut_color_grade = Some(r),
            ToolRecord::StylePreset(r) => c.style_preset = Some(r),
        }
    }
}

impl fmt::Display for CanonicalParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// One normalized record, tagged by tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolRecord {
    Exposure(Level),
    Contrast(Level),
    Highlights(Level),
    Shadows(Level),
    Whites(Level),
    Blacks(Level),
    TempTint(TempTint),
    Saturation(Saturation),
    Vibrance(Vibrance),
    ColorMixer(ColorMixer),
    SplitToning(SplitToning),
    ColorOverlay(ColorOverlay),
    Curves(Curves),
    Vignette(Vignette),
    Glow(Glow),
    Grain(Grain),
    Duotone(Duotone),
    Haze(Haze),
    FilmFade(FilmFade),
    Clarity(Clarity),
    Dehaze(Dehaze),
    OrtonEffect(OrtonEffect),
    CrossProcess(Intensity),
    BleachBypass(Intensity),
    TealAndOrange(Intensity),
    LutColorGrade(LutGrade),
    StylePreset(StyleChoice),
}

impl ToolRecord {
    /// The tool this record configures.
    #[must_use]
    pub const fn tool(&self) -> ToolName {
        match self {
            Self::Exposure(_) => ToolName::AdjustExposure,
            Self::Contrast(_) => ToolName::AdjustContrast,
            Self::Highlights(_) => ToolName::AdjustHighlights,
            Self::Shadows(_) => ToolName::AdjustShadows,
            Self::Whites(_) => ToolName::AdjustWhites,
            Self::Blacks(_) => ToolName::AdjustBlacks,
            Self::TempTint(_) => ToolName::AdjustTempTint,
            Self::Saturation(_) => ToolName::AdjustSaturation,
            Self::Vibrance(_) => ToolName::AdjustVibrance,
            Self::ColorMixer(_) => ToolName::AdjustColorMixer,
            Self::SplitToning(_) => ToolName::ApplySplitToning,
            Self::ColorOverlay(_) => ToolName::ApplyColorOverlay,
            Self::Curves(_) => ToolName::ApplyCurves,
            Self::Vignette(_) => ToolName::ApplyVignette,
            Self::Glow(_) => ToolName::ApplyGlow,
            Self::Grain(_) => ToolName::ApplyGrain,
            Self::Duotone(_) => ToolName::ApplyDuotone,
            Self::Haze(_) => ToolName::ApplyHaze,
            Self::FilmFade(_) => ToolName::ApplyFilmFade,
            Self::Clarity(_) => ToolName::ApplyClarity,
            Self::Dehaze(_) => ToolName::ApplyDehaze,
            Self::OrtonEffect(_) => ToolName::ApplyOrtonEffect,
            Self::CrossProcess(_) => ToolName::ApplyCrossProcess,
            Self::BleachBypass(_) => ToolName::ApplyBleachBypass,
            Self::TealAndOrange(_) => ToolName::ApplyTealAndOrange,
            Self::LutColorGrade(_) => ToolName::ApplyLutColorGrade,
            Self::StylePreset(_) => ToolName::ApplyStylePreset,
        }
    }
}

/// Lowercase a style token and fold `-` and spaces to `_`.
pub(crate) fn normalize_token(token: &str) -> String {
    token
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_basic_tier_is_neutral() {
        let basic = BasicParams::default();
        assert!((basic.contrast.value - 1.0).abs() < f64::EPSILON);
        assert!((basic.saturation.scale - 1.0).abs() < f64::EPSILON);
        assert!(basic.color_mixer.is_neutral());
    }

    #[test]
    fn band_ranges_cover_the_hue_circle() {
        assert_eq!(Band::of_hue(0), Band::Red);
        assert_eq!(Band::of_hue(10), Band::Red);
        assert_eq!(Band::of_hue(11), Band::Orange);
        assert_eq!(Band::of_hue(30), Band::Yellow);
        assert_eq!(Band::of_hue(60), Band::Green);
        assert_eq!(Band::of_hue(90), Band::Cyan);
        assert_eq!(Band::of_hue(120), Band::Blue);
        assert_eq!(Band::of_hue(150), Band::Purple);
        assert_eq!(Band::of_hue(170), Band::Red);
    }

    #[test]
    fn serialized_params_use_wire_names() {
        let mut params = CanonicalParams::default();
        params.set(ToolRecord::Vignette(Vignette::default()));
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["adjust_contrast"], json!({"value": 1.0}));
        assert_eq!(value["apply_vignette"], json!({"strength": 0.4, "radius": 0.75}));
        assert!(value.get("apply_glow").is_none());
    }

    #[test]
    fn present_follows_creative_order() {
        let mut params = CanonicalParams::default();
        params.set(ToolRecord::StylePreset(StyleChoice::default()));
        params.set(ToolRecord::SplitToning(SplitToning::default()));
        let present: Vec<_> = params.creative.present().collect();
        assert_eq!(
            present,
            vec![ToolName::ApplySplitToning, ToolName::ApplyStylePreset]
        );
    }

    #[test]
    fn record_tool_matches_slot() {
        let record = ToolRecord::TealAndOrange(Intensity::new(0.5));
        assert_eq!(record.tool(), ToolName::ApplyTealAndOrange);
        let mut params = CanonicalParams::default();
        params.set(record);
        assert!(params.creative.contains(ToolName::ApplyTealAndOrange));
    }

    #[test]
    fn blend_mode_tokens() {
        assert_eq!(BlendMode::from_token("Soft-Light"), BlendMode::SoftLight);
        assert_eq!(BlendMode::from_token("screen"), BlendMode::Screen);
        assert_eq!(BlendMode::from_token("dodge"), BlendMode::Overlay);
    }

    #[test]
    fn token_normalization_folds_separators() {
        assert_eq!(normalize_token(" Blade Runner "), "blade_runner");
        assert_eq!(normalize_token("neo-noir"), "neo_noir");
    }
}
