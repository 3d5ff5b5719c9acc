//! Tool identifiers and the fixed application order.
//!
//! Tool names are the wire identifiers used by suggestion sources
//! (`adjust_*` for the always-applied basic tier, `apply_*` for the
//! optional creative tier). The order of [`ToolName::BASIC`] and
//! [`ToolName::CREATIVE`] is the order the chain executor applies them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which tier a tool belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// Always applied, with a neutral default when absent.
    Basic,
    /// Applied only when the suggestion supplies it.
    Creative,
}

/// One of the 27 adjustment tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    AdjustExposure,
    AdjustContrast,
    AdjustHighlights,
    AdjustShadows,
    AdjustWhites,
    AdjustBlacks,
    AdjustTempTint,
    AdjustSaturation,
    AdjustVibrance,
    AdjustColorMixer,
    ApplySplitToning,
    ApplyColorOverlay,
    ApplyCurves,
    ApplyVignette,
    ApplyGlow,
    ApplyGrain,
    ApplyDuotone,
    ApplyHaze,
    ApplyFilmFade,
    ApplyClarity,
    ApplyDehaze,
    ApplyOrtonEffect,
    ApplyCrossProcess,
    ApplyBleachBypass,
    ApplyTealAndOrange,
    ApplyLutColorGrade,
    ApplyStylePreset,
}

impl ToolName {
    /// Basic tools in application order.
    pub const BASIC: [Self; 10] = [
        Self::AdjustExposure,
        Self::AdjustContrast,
        Self::AdjustHighlights,
        Self::AdjustShadows,
        Self::AdjustWhites,
        Self::AdjustBlacks,
        Self::AdjustTempTint,
        Self::AdjustSaturation,
        Self::AdjustVibrance,
        Self::AdjustColorMixer,
    ];

    /// Creative tools in application order.
    pub const CREATIVE: [Self; 17] = [
        Self::ApplySplitToning,
        Self::ApplyColorOverlay,
        Self::ApplyCurves,
        Self::ApplyVignette,
        Self::ApplyGlow,
        Self::ApplyGrain,
        Self::ApplyDuotone,
        Self::ApplyHaze,
        Self::ApplyFilmFade,
        Self::ApplyClarity,
        Self::ApplyDehaze,
        Self::ApplyOrtonEffect,
        Self::ApplyCrossProcess,
        Self::ApplyBleachBypass,
        Self::ApplyTealAndOrange,
        Self::ApplyLutColorGrade,
        Self::ApplyStylePreset,
    ];

    /// Every tool, basic tier first, in application order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::BASIC.into_iter().chain(Self::CREATIVE)
    }

    /// The tier this tool belongs to.
    #[must_use]
    pub const fn tier(self) -> Tier {
        match self {
            Self::AdjustExposure
            | Self::AdjustContrast
            | Self::AdjustHighlights
            | Self::AdjustShadows
            | Self::AdjustWhites
            | Self::AdjustBlacks
            | Self::AdjustTempTint
            | Self::AdjustSaturation
            | Self::AdjustVibrance
            | Self::AdjustColorMixer => Tier::Basic,
            _ => Tier::Creative,
        }
    }

    /// The wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdjustExposure => "adjust_exposure",
            Self::AdjustContrast => "adjust_contrast",
            Self::AdjustHighlights => "adjust_highlights",
            Self::AdjustShadows => "adjust_shadows",
            Self::AdjustWhites => "adjust_whites",
            Self::AdjustBlacks => "adjust_blacks",
            Self::AdjustTempTint => "adjust_temp_tint",
            Self::AdjustSaturation => "adjust_saturation",
            Self::AdjustVibrance => "adjust_vibrance",
            Self::AdjustColorMixer => "adjust_color_mixer",
            Self::ApplySplitToning => "apply_split_toning",
            Self::ApplyColorOverlay => "apply_color_overlay",
            Self::ApplyCurves => "apply_curves",
            Self::ApplyVignette => "apply_vignette",
            Self::ApplyGlow => "apply_glow",
            Self::ApplyGrain => "apply_grain",
            Self::ApplyDuotone => "apply_duotone",
            Self::ApplyHaze => "apply_haze",
            Self::ApplyFilmFade => "apply_film_fade",
            Self::ApplyClarity => "apply_clarity",
            Self::ApplyDehaze => "apply_dehaze",
            Self::ApplyOrtonEffect => "apply_orton_effect",
            Self::ApplyCrossProcess => "apply_cross_process",
            Self::ApplyBleachBypass => "apply_bleach_bypass",
            Self::ApplyTealAndOrange => "apply_teal_and_orange",
            Self::ApplyLutColorGrade => "apply_lut_color_grade",
            Self::ApplyStylePreset => "apply_style_preset",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known tool identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolName {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_owned()))
    }
}
