//! Semantic axes: two named, directional sliders mapped onto parameters.
//!
//! An axis named `"A-B"` runs from `A` at −1.0 to `B` at +1.0. Each axis
//! in the closed vocabulary has a fixed rule turning its coordinate into
//! deltas on canonical fields. Scale-type fields (contrast, saturation)
//! compose by multiplication, offset-type fields (exposure, temperature,
//! tint, tonal levels) by addition, and when both axes touch the same
//! field the effects accumulate in descriptor order. Creative records an
//! axis writes replace any earlier record for the same tool.
//!
//! The result always goes through [`clamp_params`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clamp::clamp_params;
use crate::params::{Band, BasicParams, CanonicalParams, Glow, Grain, Haze, SplitToning, Vignette};
use crate::types::Color;

/// Bounds applied by the mapper itself, before the safety clamp.
const MAPPED_EXPOSURE: (f64, f64) = (-50.0, 50.0);
const MAPPED_CONTRAST: (f64, f64) = (0.5, 1.8);
const MAPPED_SATURATION: (f64, f64) = (0.4, 1.7);

macro_rules! axes {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// The closed axis vocabulary.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum SemanticAxis {
            $($variant,)+
        }

        impl SemanticAxis {
            /// Every axis in vocabulary order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Display name, e.g. `"High Key-Low Key"`.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

axes! {
    VibrantMuted => "Vibrant-Muted",
    CoolWarm => "Cool-Warm",
    VintageModern => "Vintage-Modern",
    BrightDark => "Bright-Dark",
    DramaticFlat => "Dramatic-Flat",
    HighKeyLowKey => "High Key-Low Key",
    DeepBlacksRaisedBlacks => "Deep Blacks-Raised Blacks",
    MatteGlossy => "Matte-Glossy",
    GloomyHappy => "Gloomy-Happy",
    MoodyAiry => "Moody-Airy",
    CalmEnergetic => "Calm-Energetic",
    DreamyCrisp => "Dreamy-Crisp",
    EtherealRealistic => "Ethereal-Realistic",
    SharpSoft => "Sharp-Soft",
    GrittyClean => "Gritty-Clean",
    PunchyFaded => "Punchy-Faded",
    TexturedSmooth => "Textured-Smooth",
    CinematicNatural => "Cinematic-Natural",
    CyberpunkOrganic => "Cyberpunk-Organic",
    NightDay => "Night-Day",
    NoirColorful => "Noir-Colorful",
    NeonSubtle => "Neon-Subtle",
    GoldenHourBlueHour => "Golden Hour-Blue Hour",
}

/// Fold case, en/em dashes, and spacing around the dash.
fn fold_name(name: &str) -> String {
    let dashed: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    dashed
        .split('-')
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("-")
}

/// An axis name outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown semantic axis: {0:?}")]
pub struct UnknownAxis(pub String);

impl FromStr for SemanticAxis {
    type Err = UnknownAxis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold_name(s);
        Self::ALL
            .iter()
            .copied()
            .find(|axis| fold_name(axis.as_str()) == folded)
            .ok_or_else(|| UnknownAxis(s.to_owned()))
    }
}

impl TryFrom<String> for SemanticAxis {
    type Error = UnknownAxis;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<SemanticAxis> for &'static str {
    fn from(axis: SemanticAxis) -> Self {
        axis.as_str()
    }
}

impl fmt::Display for SemanticAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ───────────────────────────── descriptor ─────────────────────────────

/// One axis of a descriptor, with its human-facing labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisDescriptor {
    #[serde(rename = "name")]
    pub axis: SemanticAxis,
    /// Label for the −1.0 end.
    pub left_pole: String,
    /// Label for the +1.0 end.
    pub right_pole: String,
    pub description: String,
    /// One-word label for the left pole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_synonym: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_synonym: Option<String>,
}

/// Why a descriptor from the axis-selection source was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("descriptor is not valid JSON: {0}")]
    Malformed(String),
    #[error("expected exactly 2 axes, got {0}")]
    AxisCount(usize),
    #[error("axis {index} is missing {field:?}")]
    MissingField { index: usize, field: &'static str },
    #[error(transparent)]
    UnknownAxis(#[from] UnknownAxis),
}

/// Exactly two axes, processed in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticDescriptor {
    pub axes: [AxisDescriptor; 2],
}

/// Loose shape used while validating.
#[derive(Deserialize)]
struct LooseDescriptor {
    #[serde(default)]
    axes: Vec<BTreeMap<String, serde_json::Value>>,
}

impl SemanticDescriptor {
    /// Cool-Warm and Vibrant-Muted.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            axes: [
                AxisDescriptor {
                    axis: SemanticAxis::CoolWarm,
                    left_pole: "Cool, blue tones".to_owned(),
                    right_pole: "Warm, golden tones".to_owned(),
                    description: "Color temperature".to_owned(),
                    left_synonym: None,
                    right_synonym: None,
                },
                AxisDescriptor {
                    axis: SemanticAxis::VibrantMuted,
                    left_pole: "Rich, saturated colors".to_owned(),
                    right_pole: "Subtle, soft colors".to_owned(),
                    description: "Color intensity".to_owned(),
                    left_synonym: None,
                    right_synonym: None,
                },
            ],
        }
    }

    /// Validate a descriptor emitted by the axis-selection source.
    ///
    /// Markdown code fences and prose around the JSON object are
    /// tolerated. Both axes need `name`, `left_pole`, `right_pole`, and
    /// `description`, and both names must be in the vocabulary.
    ///
    /// # Errors
    ///
    /// [`DescriptorError`] describing the first problem found.
    pub fn parse(text: &str) -> Result<Self, DescriptorError> {
        let json = extract_object(text);
        let loose: LooseDescriptor =
            serde_json::from_str(json).map_err(|e| DescriptorError::Malformed(e.to_string()))?;
        let [first, second]: [_; 2] = loose
            .axes
            .try_into()
            .map_err(|axes: Vec<_>| DescriptorError::AxisCount(axes.len()))?;
        Ok(Self {
            axes: [axis_from_fields(0, &first)?, axis_from_fields(1, &second)?],
        })
    }

    /// [`parse`](Self::parse), falling back to [`fallback`](Self::fallback)
    /// when the text is missing or invalid.
    #[must_use]
    pub fn parse_or_fallback(text: Option<&str>) -> Self {
        let Some(text) = text else {
            tracing::warn!("no axis descriptor supplied; using fallback axes");
            return Self::fallback();
        };
        match Self::parse(text) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                tracing::warn!(error = %err, "invalid axis descriptor; using fallback axes");
                Self::fallback()
            }
        }
    }

    /// Coordinates in axis order, looked up by (folded) axis name.
    /// Missing axes read 0.
    #[must_use]
    pub fn coordinates(&self, values: &BTreeMap<String, f64>) -> [f64; 2] {
        self.axes.each_ref().map(|descriptor| {
            values
                .iter()
                .find(|(name, _)| name.parse::<SemanticAxis>().ok() == Some(descriptor.axis))
                .map_or(0.0, |(_, &v)| v)
        })
    }
}

/// Strip code fences and surrounding prose, keeping the outermost
/// `{ ... }` when there is one.
fn extract_object(text: &str) -> &str {
    let trimmed = text.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

fn axis_from_fields(
    index: usize,
    fields: &BTreeMap<String, serde_json::Value>,
) -> Result<AxisDescriptor, DescriptorError> {
    let optional = |field: &str| {
        fields
            .get(field)
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
    };
    let text = |field: &'static str| {
        optional(field).ok_or(DescriptorError::MissingField { index, field })
    };
    let name = text("name")?;
    Ok(AxisDescriptor {
        axis: name.parse()?,
        left_pole: text("left_pole")?,
        right_pole: text("right_pole")?,
        description: text("description")?,
        left_synonym: optional("left_synonym"),
        right_synonym: optional("right_synonym"),
    })
}

// ────────────────────────────── mapping ───────────────────────────────

/// Map two axis coordinates onto clamped canonical parameters.
///
/// Coordinates are clamped to `[-1, 1]`; NaN reads as 0.
#[must_use = "returns the mapped parameters"]
pub fn map_axes(coordinates: [f64; 2], descriptor: &SemanticDescriptor) -> CanonicalParams {
    let mut params = CanonicalParams::default();
    for (axis, v) in descriptor.axes.iter().zip(coordinates) {
        let v = if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        apply_axis(axis.axis, v, &mut params);
    }

    let basic = &mut params.basic;
    basic.exposure.value = bound(basic.exposure.value, MAPPED_EXPOSURE);
    basic.contrast.value = bound(basic.contrast.value, MAPPED_CONTRAST);
    basic.saturation.scale = bound(basic.saturation.scale, MAPPED_SATURATION);

    clamp_params(&params)
}

fn bound(value: f64, (min, max): (f64, f64)) -> f64 {
    value.clamp(min, max)
}

/// Mixer writes replace the band's field rather than composing with it.
#[allow(clippy::cast_possible_truncation)]
fn set_hue(b: &mut BasicParams, band: Band, degrees: f64) {
    b.color_mixer.band_mut(band).hue_shift = degrees.trunc() as i32;
}

const fn split(
    shadow_hue: f64,
    shadow_sat: f64,
    highlight_hue: f64,
    highlight_sat: f64,
) -> SplitToning {
    SplitToning {
        shadow_hue,
        shadow_sat,
        highlight_hue,
        highlight_sat,
    }
}

const fn vignette(strength: f64, radius: f64) -> Vignette {
    Vignette { strength, radius }
}

const fn glow(intensity: f64, radius: u32) -> Glow {
    Glow { intensity, radius }
}

/// Apply one axis rule. `v` is in `[-1, 1]`; `s` is its magnitude.
#[allow(clippy::too_many_lines)]
fn apply_axis(axis: SemanticAxis, v: f64, params: &mut CanonicalParams) {
    let CanonicalParams {
        basic: b,
        creative: c,
    } = params;
    let s = v.abs();
    let left = v < 0.0;

    match axis {
        SemanticAxis::VibrantMuted => {
            b.saturation.scale *= 1.0 - v * 0.4;
            b.vibrance.strength += (-v * 0.7).max(0.0);
        }
        SemanticAxis::CoolWarm => b.temp_tint.temp += v * 18.0,
        SemanticAxis::BrightDark => b.exposure.value += -v * 30.0,
        SemanticAxis::DramaticFlat => {
            b.contrast.value *= 1.0 - v * 0.4;
            b.highlights.value += -v * 20.0;
            b.shadows.value -= v * 20.0;
        }
        SemanticAxis::HighKeyLowKey => {
            b.whites.value += -v * 40.0;
            b.blacks.value += v * 40.0;
        }
        SemanticAxis::VintageModern if left => {
            b.contrast.value *= 1.0 - 0.20 * s;
            b.blacks.value += 25.0 * s;
            b.whites.value -= 15.0 * s;
            b.temp_tint.temp += 20.0 * s;
            b.temp_tint.tint -= 10.0 * s;
            b.saturation.scale *= 1.0 - 0.25 * s;
            b.vibrance.strength -= 0.2 * s;
            set_hue(b, Band::Blue, -10.0 * s);
            set_hue(b, Band::Green, -5.0 * s);
        }
        SemanticAxis::VintageModern => {
            b.contrast.value *= 1.0 + 0.25 * s;
            b.blacks.value -= 25.0 * s;
            b.whites.value += 20.0 * s;
            b.temp_tint.temp -= 10.0 * s;
            b.temp_tint.tint += 5.0 * s;
            b.saturation.scale *= 1.0 + 0.25 * s;
            b.vibrance.strength += 0.25 * s;
            b.color_mixer.blue.sat_scale = 1.0 + 0.2 * s;
            b.color_mixer.green.sat_scale = 1.0 + 0.15 * s;
        }
        SemanticAxis::DeepBlacksRaisedBlacks if left => {
            b.blacks.value -= 35.0 * s;
            b.contrast.value *= 1.0 + 0.10 * s;
        }
        SemanticAxis::DeepBlacksRaisedBlacks => {
            b.blacks.value += 35.0 * s;
            b.shadows.value -= 15.0 * s;
        }
        SemanticAxis::MatteGlossy if left => {
            b.shadows.value -= 15.0 * s;
            b.blacks.value += 20.0 * s;
        }
        SemanticAxis::MatteGlossy => {
            b.contrast.value *= 1.0 + 0.25 * s;
            b.whites.value += 15.0 * s;
        }
        SemanticAxis::GloomyHappy if left => {
            b.exposure.value -= 25.0 * s;
            b.temp_tint.temp -= 20.0 * s;
            b.saturation.scale *= 1.0 - 0.30 * s;
            b.highlights.value -= 20.0 * s;
            b.blacks.value += 15.0 * s;
            b.contrast.value *= 1.0 - 0.15 * s;
        }
        SemanticAxis::GloomyHappy => {
            b.exposure.value += 12.5 * s;
            b.temp_tint.temp += 12.5 * s;
            b.saturation.scale *= 1.0 + 0.35 * s;
            b.highlights.value += 10.0 * s;
            b.shadows.value += 5.0 * s;
            b.contrast.value *= 1.0 + 0.20 * s;
        }
        SemanticAxis::MoodyAiry if left => {
            b.exposure.value -= 25.0 * s;
            b.temp_tint.temp -= 15.0 * s;
        }
        SemanticAxis::MoodyAiry => {
            b.exposure.value += 25.0 * s;
            b.saturation.scale *= 1.0 + 0.25 * s;
        }
        SemanticAxis::CalmEnergetic if left => {
            b.contrast.value *= 1.0 - 0.10 * s;
            b.temp_tint.temp -= 10.0 * s;
            b.saturation.scale *= 1.0 - 0.2 * s;
        }
        SemanticAxis::CalmEnergetic => {
            b.exposure.value += 20.0 * s;
            b.saturation.scale *= 1.0 + 0.25 * s;
            b.contrast.value *= 1.0 + 0.10 * s;
        }
        SemanticAxis::DreamyCrisp if left => {
            b.shadows.value -= 20.0 * s;
            b.highlights.value -= 20.0 * s;
            b.contrast.value *= 1.0 - 0.25 * s;
            b.saturation.scale *= 1.0 - 0.20 * s;
            b.temp_tint.temp += 10.0 * s;
        }
        SemanticAxis::DreamyCrisp => {
            b.contrast.value *= 1.0 + 0.35 * s;
            b.blacks.value -= 25.0 * s;
            b.whites.value += 20.0 * s;
            b.saturation.scale *= 1.0 + 0.20 * s;
        }
        SemanticAxis::EtherealRealistic if left => {
            b.shadows.value -= 25.0 * s;
            b.highlights.value -= 25.0 * s;
            b.contrast.value *= 1.0 - 0.10 * s;
        }
        SemanticAxis::EtherealRealistic => {
            b.contrast.value *= 1.0 + 0.10 * s;
            b.whites.value += 20.0 * s;
            b.blacks.value -= 20.0 * s;
        }
        SemanticAxis::SharpSoft if left => {
            b.whites.value += 20.0 * s;
            b.blacks.value -= 20.0 * s;
            b.contrast.value *= 1.0 + 0.10 * s;
        }
        SemanticAxis::SharpSoft => {
            b.highlights.value -= 15.0 * s;
            b.shadows.value -= 10.0 * s;
        }
        SemanticAxis::GrittyClean if left => {
            b.blacks.value -= 30.0 * s;
            b.contrast.value *= 1.0 + 0.12 * s;
        }
        SemanticAxis::GrittyClean => {
            b.saturation.scale *= 1.0 + 0.2 * s;
            b.contrast.value *= 1.0 - 0.122 * s;
        }
        SemanticAxis::PunchyFaded if left => {
            b.contrast.value *= 1.0 + 0.15 * s;
            b.saturation.scale *= 1.0 + 0.25 * s;
        }
        SemanticAxis::PunchyFaded => {
            b.contrast.value *= 1.0 - 0.15 * s;
            b.shadows.value -= 30.0 * s;
        }
        SemanticAxis::TexturedSmooth if left => {
            b.contrast.value *= 1.0 + 0.25 * s;
            b.blacks.value -= 20.0 * s;
        }
        SemanticAxis::TexturedSmooth => {
            b.shadows.value -= 20.0 * s;
            b.highlights.value -= 10.0 * s;
        }
        SemanticAxis::CinematicNatural if left => {
            b.exposure.value -= 15.0 * s;
            b.temp_tint.temp -= 20.0 * s;
            b.temp_tint.tint += 10.0 * s;
            b.contrast.value *= 1.0 + 0.25 * s;
            b.blacks.value -= 25.0 * s;
            b.highlights.value -= 10.0 * s;
            b.saturation.scale *= 1.0 - 0.15 * s;
            b.vibrance.strength += 0.10 * s;
            set_hue(b, Band::Blue, -10.0 * s);
            set_hue(b, Band::Yellow, 10.0 * s);
            b.color_mixer.blue.lum_scale = 1.0 - 0.10 * s;
            b.color_mixer.yellow.lum_scale = 1.0 + 0.10 * s;
        }
        SemanticAxis::CinematicNatural => {
            b.exposure.value -= 10.0 * s;
            b.temp_tint.temp -= 10.0 * s;
            b.temp_tint.tint += 5.0 * s;
            b.contrast.value *= 1.0 - 0.15 * s;
            b.saturation.scale *= 1.0 + 0.05 * s;
            b.vibrance.strength *= 1.0 - 0.10 * s;
            b.blacks.value += 10.0 * s;
            b.highlights.value -= 10.0 * s;
            set_hue(b, Band::Blue, 0.0);
            set_hue(b, Band::Yellow, 0.0);
        }
        SemanticAxis::CyberpunkOrganic if left => {
            c.split_toning = Some(split(280.0, 0.4 * s, 180.0, 0.3 * s));
            c.vignette = Some(vignette(0.6 * s, 0.7));
            c.glow = Some(glow(0.25 * s, 31));
            b.saturation.scale *= 1.0 + 0.4 * s;
            b.contrast.value *= 1.0 + 0.3 * s;
        }
        SemanticAxis::CyberpunkOrganic => {
            b.temp_tint.temp += 15.0 * s;
            b.saturation.scale *= 1.0 - 0.2 * s;
            b.vibrance.strength += 0.3 * s;
        }
        SemanticAxis::NightDay if left => {
            b.exposure.value -= 30.0 * s;
            c.split_toning = Some(split(220.0, 0.5 * s, 200.0, 0.2 * s));
            c.vignette = Some(vignette(0.7 * s, 0.6));
            b.saturation.scale *= 1.0 - 0.2 * s;
        }
        SemanticAxis::NightDay => {
            b.exposure.value += 20.0 * s;
            b.temp_tint.temp += 15.0 * s;
            c.glow = Some(glow(0.15 * s, 41));
        }
        SemanticAxis::NoirColorful if left => {
            b.saturation.scale *= 1.0 - 0.8 * s;
            b.contrast.value *= 1.0 + 0.5 * s;
            c.vignette = Some(vignette(0.8 * s, 0.5));
            c.grain = Some(Grain {
                amount: 0.15 * s,
                size: 1,
            });
        }
        SemanticAxis::NoirColorful => {
            b.saturation.scale *= 1.0 + 0.5 * s;
            b.vibrance.strength += 0.5 * s;
        }
        SemanticAxis::NeonSubtle if left => {
            b.saturation.scale *= 1.0 + 0.6 * s;
            b.vibrance.strength += 0.6 * s;
            b.contrast.value *= 1.0 + 0.25 * s;
            c.glow = Some(glow(0.35 * s, 25));
            c.vignette = Some(vignette(0.5 * s, 0.7));
        }
        SemanticAxis::NeonSubtle => {
            b.saturation.scale *= 1.0 - 0.3 * s;
            b.contrast.value *= 1.0 - 0.15 * s;
        }
        SemanticAxis::GoldenHourBlueHour if left => {
            c.split_toning = Some(split(30.0, 0.2 * s, 45.0, 0.4 * s));
            b.temp_tint.temp += 30.0 * s;
            c.glow = Some(glow(0.2 * s, 41));
            c.haze = Some(Haze {
                amount: 0.08 * s,
                color: Color::from_bgr([255, 220, 180]),
            });
        }
        SemanticAxis::GoldenHourBlueHour => {
            c.split_toning = Some(split(220.0, 0.3 * s, 260.0, 0.2 * s));
            b.temp_tint.temp -= 25.0 * s;
            b.exposure.value -= 15.0 * s;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn descriptor(first: SemanticAxis, second: SemanticAxis) -> SemanticDescriptor {
        let axis = |axis: SemanticAxis| AxisDescriptor {
            axis,
            left_pole: "left".to_owned(),
            right_pole: "right".to_owned(),
            description: String::new(),
            left_synonym: None,
            right_synonym: None,
        };
        SemanticDescriptor {
            axes: [axis(first), axis(second)],
        }
    }

    // ──────────────────────────── vocabulary ──────────────────────────

    #[test]
    fn twenty_three_axes() {
        assert_eq!(SemanticAxis::ALL.len(), 23);
    }

    #[test]
    fn names_match_loosely() {
        assert_eq!(
            "high key \u{2013} low key".parse::<SemanticAxis>().unwrap(),
            SemanticAxis::HighKeyLowKey
        );
        assert_eq!(
            "GOLDEN HOUR—BLUE HOUR".parse::<SemanticAxis>().unwrap(),
            SemanticAxis::GoldenHourBlueHour
        );
        assert!("Warm-Cool".parse::<SemanticAxis>().is_err());
    }

    // ──────────────────────────── descriptor ──────────────────────────

    #[test]
    fn parses_fenced_descriptor() {
        let text = r#"```json
{"axes": [
  {"name": "Bright-Dark", "left_pole": "Bright", "right_pole": "Dark", "description": "light", "current_position": 0.0},
  {"name": "Noir–Colorful", "left_pole": "Noir", "right_pole": "Colorful", "description": "color", "left_synonym": "Shadowy"}
]}
```"#;
        let descriptor = SemanticDescriptor::parse(text).unwrap();
        assert_eq!(descriptor.axes[0].axis, SemanticAxis::BrightDark);
        assert_eq!(descriptor.axes[1].axis, SemanticAxis::NoirColorful);
        assert_eq!(descriptor.axes[1].left_synonym.as_deref(), Some("Shadowy"));
        assert_eq!(descriptor.axes[0].right_synonym, None);
    }

    #[test]
    fn wrong_axis_count_is_rejected() {
        let text = r#"{"axes": [{"name": "Bright-Dark", "left_pole": "a", "right_pole": "b", "description": "c"}]}"#;
        assert_eq!(
            SemanticDescriptor::parse(text),
            Err(DescriptorError::AxisCount(1))
        );
    }

    #[test]
    fn missing_field_is_rejected() {
        let text = r#"{"axes": [
            {"name": "Bright-Dark", "left_pole": "a", "right_pole": "b", "description": "c"},
            {"name": "Cool-Warm", "left_pole": "a", "description": "c"}
        ]}"#;
        assert_eq!(
            SemanticDescriptor::parse(text),
            Err(DescriptorError::MissingField {
                index: 1,
                field: "right_pole"
            })
        );
    }

    #[test]
    fn invented_axis_falls_back() {
        let text = r#"{"axes": [
            {"name": "Sparkly-Dull", "left_pole": "a", "right_pole": "b", "description": "c"},
            {"name": "Cool-Warm", "left_pole": "a", "right_pole": "b", "description": "c"}
        ]}"#;
        assert!(matches!(
            SemanticDescriptor::parse(text),
            Err(DescriptorError::UnknownAxis(_))
        ));
        assert_eq!(
            SemanticDescriptor::parse_or_fallback(Some(text)),
            SemanticDescriptor::fallback()
        );
        assert_eq!(
            SemanticDescriptor::parse_or_fallback(None),
            SemanticDescriptor::fallback()
        );
    }

    #[test]
    fn descriptor_serializes_display_names() {
        let json = serde_json::to_value(SemanticDescriptor::fallback()).unwrap();
        assert_eq!(json["axes"][0]["name"], "Cool-Warm");
        let back: SemanticDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(back, SemanticDescriptor::fallback());
    }

    #[test]
    fn coordinates_follow_axis_order_and_default_to_zero() {
        let d = SemanticDescriptor::fallback();
        let values = BTreeMap::from([("vibrant-muted".to_owned(), 0.5)]);
        assert_eq!(d.coordinates(&values), [0.0, 0.5]);
    }

    // ───────────────────────────── mapping ────────────────────────────

    #[test]
    fn muted_lowers_saturation_and_leaves_exposure() {
        let d = descriptor(SemanticAxis::VibrantMuted, SemanticAxis::CoolWarm);
        let params = map_axes([1.0, 0.0], &d);
        assert!(params.basic.saturation.scale < 1.0);
        assert!(params.basic.exposure.value.abs() < f64::EPSILON);
        assert!(params.basic.vibrance.strength.abs() < f64::EPSILON);
    }

    #[test]
    fn origin_is_neutral() {
        let d = descriptor(SemanticAxis::DramaticFlat, SemanticAxis::VintageModern);
        assert_eq!(map_axes([0.0, 0.0], &d), CanonicalParams::default());
    }

    #[test]
    fn shared_fields_accumulate() {
        let d = descriptor(SemanticAxis::BrightDark, SemanticAxis::MoodyAiry);
        // Bright adds +15, airy adds +12.5; clamp caps exposure at 15.
        let params = map_axes([-0.5, 0.5], &d);
        assert!((params.basic.exposure.value - 15.0).abs() < 1e-9);

        let d = descriptor(SemanticAxis::CoolWarm, SemanticAxis::GloomyHappy);
        let params = map_axes([0.5, 0.4], &d);
        assert!((params.basic.temp_tint.temp - (9.0 + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn mixer_writes_replace_earlier_axes() {
        let d = descriptor(SemanticAxis::VintageModern, SemanticAxis::CinematicNatural);

        let params = map_axes([-1.0, -1.0], &d);
        let mixer = &params.basic.color_mixer;
        assert_eq!(mixer.band(Band::Blue).hue_shift, -10);
        assert_eq!(mixer.band(Band::Green).hue_shift, -5);
        assert_eq!(mixer.band(Band::Yellow).hue_shift, 10);

        // The natural pole resets the blue and yellow hues.
        let params = map_axes([-1.0, 1.0], &d);
        let mixer = &params.basic.color_mixer;
        assert_eq!(mixer.band(Band::Blue).hue_shift, 0);
        assert_eq!(mixer.band(Band::Green).hue_shift, -5);

        let d = descriptor(SemanticAxis::VintageModern, SemanticAxis::VintageModern);
        let params = map_axes([1.0, 0.5], &d);
        assert!((params.basic.color_mixer.band(Band::Blue).sat_scale - 1.1).abs() < 1e-9);
    }

    #[test]
    fn coordinates_are_clamped_and_nan_is_zero() {
        let d = descriptor(SemanticAxis::CoolWarm, SemanticAxis::BrightDark);
        let params = map_axes([10.0, f64::NAN], &d);
        assert!((params.basic.temp_tint.temp - 18.0).abs() < 1e-9);
        assert!(params.basic.exposure.value.abs() < f64::EPSILON);
    }

    #[test]
    fn creative_records_are_clamped() {
        let d = descriptor(SemanticAxis::NoirColorful, SemanticAxis::CoolWarm);
        let params = map_axes([-1.0, 0.0], &d);
        let vignette = params.creative.vignette.unwrap();
        assert!((vignette.strength - 0.6).abs() < 1e-9);
        assert!((params.creative.grain.unwrap().amount - 0.08).abs() < 1e-9);
        assert!((params.basic.saturation.scale - 0.4).abs() < 1e-9);
    }

    #[test]
    fn later_axis_replaces_creative_record() {
        let d = descriptor(SemanticAxis::NightDay, SemanticAxis::GoldenHourBlueHour);
        let params = map_axes([-1.0, -1.0], &d);
        let split = params.creative.split_toning.unwrap();
        assert!((split.shadow_hue - 30.0).abs() < 1e-9);
    }

    #[test]
    fn every_axis_maps_within_bounds() {
        for &axis in SemanticAxis::ALL {
            for v in [-1.0, -0.3, 0.7, 1.0] {
                let d = descriptor(axis, SemanticAxis::CoolWarm);
                let params = map_axes([v, 0.0], &d);
                assert_eq!(params, clamp_params(&params), "{axis} at {v}");
            }
        }
    }
}
