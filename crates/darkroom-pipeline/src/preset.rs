//! Named looks: LUT-style grades and style presets.
//!
//! Both are fixed recipes: ordered lists of [`Step`]s composed from the
//! transform library with hand-tuned constants. Recipe constants are
//! trusted and are not passed through the safety clamp. Any step failing
//! fails the whole recipe, so the chain keeps the image it had before
//! the preset.

use std::fmt;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::params::{
    BlendMode, Clarity, ColorOverlay, Curves, FilmFade, Glow, Grain, Haze, Intensity, Level,
    LutGrade, OrtonEffect, Saturation, SplitToning, StyleChoice, TempTint, Vibrance, Vignette,
    normalize_token,
};
use crate::types::{Color, FilterError, RgbImage, validate};
use crate::{creative, curves, grain, tonal};

/// One operation inside a recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Replace each pixel with its luma.
    Grayscale,
    /// Mostly-gray mix that keeps some color in the bright areas.
    NeoNoirMix,
    /// Warm-green lift in the shadows (instant film).
    ShadowTint,
    /// Per-channel `c * gain + offset`, RGB order.
    Channels { gain: [f32; 3], offset: [f32; 3] },
    Exposure(f64),
    Contrast(f64),
    Saturation(f64),
    Vibrance(f64),
    TempTint { temp: f64, tint: f64 },
    SplitToning {
        shadow_hue: f64,
        shadow_sat: f64,
        highlight_hue: f64,
        highlight_sat: f64,
    },
    Overlay { color: Color, opacity: f64, mode: BlendMode },
    Curves { shadows: f64, midtones: f64, highlights: f64 },
    Vignette { strength: f64, radius: f64 },
    Glow { intensity: f64, radius: u32 },
    Grain(f64),
    Haze { amount: f64, color: Color },
    FilmFade { fade: f64, black: f64 },
    Clarity(f64),
    Orton { blur: u32, blend: f64 },
    TealAndOrange(f64),
    CrossProcess(f64),
}

impl Step {
    /// Run this step.
    ///
    /// # Errors
    ///
    /// Whatever the underlying transform returns.
    pub fn apply(&self, image: &RgbImage) -> Result<RgbImage, FilterError> {
        match *self {
            Self::Grayscale => grayscale(image),
            Self::NeoNoirMix => neo_noir_mix(image),
            Self::ShadowTint => shadow_tint(image),
            Self::Channels { gain, offset } => {
                validate(image, &[])?;
                Ok(color::map_pixels(image, |c| {
                    std::array::from_fn(|i| c[i].mul_add(gain[i], offset[i]))
                }))
            }
            Self::Exposure(value) => tonal::exposure(image, &Level::new(value)),
            Self::Contrast(value) => tonal::contrast(image, &Level::new(value)),
            Self::Saturation(scale) => tonal::saturation(image, &Saturation { scale }),
            Self::Vibrance(strength) => tonal::vibrance(image, &Vibrance { strength }),
            Self::TempTint { temp, tint } => tonal::temp_tint(image, &TempTint { temp, tint }),
            Self::SplitToning {
                shadow_hue,
                shadow_sat,
                highlight_hue,
                highlight_sat,
            } => creative::split_toning(
                image,
                &SplitToning {
                    shadow_hue,
                    shadow_sat,
                    highlight_hue,
                    highlight_sat,
                },
            ),
            Self::Overlay {
                color,
                opacity,
                mode,
            } => creative::color_overlay(
                image,
                &ColorOverlay {
                    color,
                    opacity,
                    blend_mode: mode,
                },
            ),
            Self::Curves {
                shadows,
                midtones,
                highlights,
            } => curves::curves(
                image,
                &Curves {
                    shadows,
                    midtones,
                    highlights,
                },
            ),
            Self::Vignette { strength, radius } => {
                creative::vignette(image, &Vignette { strength, radius })
            }
            Self::Glow { intensity, radius } => creative::glow(image, &Glow { intensity, radius }),
            Self::Grain(amount) => grain::grain(image, &Grain { amount, size: 1 }),
            Self::Haze { amount, color } => creative::haze(image, &Haze { amount, color }),
            Self::FilmFade { fade, black } => creative::film_fade(
                image,
                &FilmFade {
                    fade_amount: fade,
                    black_fade: black,
                },
            ),
            Self::Clarity(amount) => creative::clarity(image, &Clarity { amount }),
            Self::Orton { blur, blend } => creative::orton_effect(
                image,
                &OrtonEffect {
                    blur_amount: blur,
                    blend,
                },
            ),
            Self::TealAndOrange(i) => creative::teal_and_orange(image, &Intensity::new(i)),
            Self::CrossProcess(i) => creative::cross_process(image, &Intensity::new(i)),
        }
    }
}

fn grayscale(image: &RgbImage) -> Result<RgbImage, FilterError> {
    validate(image, &[])?;
    Ok(color::map_pixels(image, |c| {
        [f32::from(color::quantize(color::luma(c))); 3]
    }))
}

fn neo_noir_mix(image: &RgbImage) -> Result<RgbImage, FilterError> {
    validate(image, &[])?;
    Ok(color::map_pixels(image, |c| {
        let gray = f32::from(color::quantize(color::luma(c)));
        let mask = (gray / 255.0).mul_add(2.0, -0.5).clamp(0.0, 1.0) * 0.3;
        c.map(|v| gray.mul_add(1.0 - mask, v * mask))
    }))
}

fn shadow_tint(image: &RgbImage) -> Result<RgbImage, FilterError> {
    validate(image, &[])?;
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b] = color::channels(*pixel);
        let gray = f32::from(color::quantize(color::luma([r, g, b]))) / 255.0;
        let mask = 2.0f32.mul_add(-gray, 1.0).clamp(0.0, 1.0);
        *pixel = Rgb([
            color::quantize(r),
            color::quantize(mask.mul_add(6.0, g)),
            color::quantize(mask.mul_add(10.0, b)),
        ]);
    }
    Ok(out)
}

/// Run a recipe front to back.
///
/// # Errors
///
/// The first step error.
pub fn run_recipe(image: &RgbImage, recipe: &[Step]) -> Result<RgbImage, FilterError> {
    validate(image, &[])?;
    recipe
        .iter()
        .try_fold(image.clone(), |current, step| step.apply(&current))
}

// ──────────────────────────── LUT grades ──────────────────────────────

/// The named LUT-style grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum LutStyle {
    /// No-op sentinel.
    #[default]
    Neutral,
    WarmContrast,
    CoolMatte,
    VibrantPop,
    FilmEmulation,
    FadedPastel,
}

impl LutStyle {
    pub const ALL: [Self; 6] = [
        Self::Neutral,
        Self::WarmContrast,
        Self::CoolMatte,
        Self::VibrantPop,
        Self::FilmEmulation,
        Self::FadedPastel,
    ];

    /// Wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::WarmContrast => "warm_contrast",
            Self::CoolMatte => "cool_matte",
            Self::VibrantPop => "vibrant_pop",
            Self::FilmEmulation => "film_emulation",
            Self::FadedPastel => "faded_pastel",
        }
    }

    /// Parse a token; unknown tokens read as [`LutStyle::Neutral`].
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        let token = normalize_token(token);
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == token)
            .unwrap_or_default()
    }

    /// `true` for the no-op sentinel.
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self, Self::Neutral)
    }

    /// The steps this grade runs.
    #[must_use]
    pub const fn recipe(self) -> &'static [Step] {
        match self {
            Self::Neutral => &[],
            Self::WarmContrast => recipes::LUT_WARM_CONTRAST,
            Self::CoolMatte => recipes::LUT_COOL_MATTE,
            Self::VibrantPop => recipes::LUT_VIBRANT_POP,
            Self::FilmEmulation => recipes::LUT_FILM_EMULATION,
            Self::FadedPastel => recipes::LUT_FADED_PASTEL,
        }
    }
}

impl From<String> for LutStyle {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

impl From<LutStyle> for &'static str {
    fn from(style: LutStyle) -> Self {
        style.as_str()
    }
}

impl fmt::Display for LutStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply a LUT-style grade.
///
/// # Errors
///
/// [`FilterError::EmptyImage`], or the first failing step.
pub fn lut_color_grade(image: &RgbImage, grade: &LutGrade) -> Result<RgbImage, FilterError> {
    run_recipe(image, grade.style.recipe())
}

// ─────────────────────────── style presets ────────────────────────────

macro_rules! presets {
    ($($variant:ident => $token:literal),+ $(,)?) => {
        /// The named style presets.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(from = "String", into = "&'static str")]
        pub enum StylePreset {
            /// No-op sentinel.
            #[default]
            None,
            $($variant,)+
        }

        impl StylePreset {
            /// Every real preset (excluding [`StylePreset::None`]).
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Canonical wire token.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    Self::None => "none",
                    $(Self::$variant => $token,)+
                }
            }
        }
    };
}

presets! {
    Noir => "noir",
    NeoNoir => "neo_noir",
    DarkNoir => "dark_noir",
    Night => "night",
    DeepNight => "deep_night",
    BlueHour => "blue_hour",
    Midnight => "midnight",
    Cyberpunk => "cyberpunk",
    Neon => "neon",
    Synthwave => "synthwave",
    BladeRunner => "blade_runner",
    MoodyBlue => "moody_blue",
    MoodyDark => "moody_dark",
    Atmospheric => "atmospheric",
    Dramatic => "dramatic",
    VintageFilm => "vintage_film",
    Retro70s => "retro_70s",
    Polaroid => "polaroid",
    Kodachrome => "kodachrome",
    CinematicTealOrange => "cinematic_teal_orange",
    Blockbuster => "blockbuster",
    IndieFilm => "indie_film",
    GoldenHour => "golden_hour",
    MorningLight => "morning_light",
    Sunrise => "sunrise",
    Sunset => "sunset",
    WarmGlow => "warm_glow",
    MagicHour => "magic_hour",
    BlackAndWhite => "black_and_white",
    HighContrastBw => "high_contrast_bw",
    FilmNoirBw => "film_noir_bw",
    Silver => "silver",
    Dream => "dream",
    Ethereal => "ethereal",
    Horror => "horror",
    Western => "western",
    Underwater => "underwater",
}

/// Alternate tokens accepted for some presets.
const ALIASES: [(&str, StylePreset); 3] = [
    ("classic_noir", StylePreset::Noir),
    ("vintage", StylePreset::VintageFilm),
    ("cinematic", StylePreset::CinematicTealOrange),
];

/// Recipe tables. Colors are written `[B, G, R]`.
mod recipes {
    use super::{BlendMode, Color, Step};
    use super::Step::{
        Channels, Clarity, Contrast, CrossProcess, Exposure, FilmFade, Grain, Grayscale, NeoNoirMix,
        Orton, Saturation, ShadowTint, SplitToning, TealAndOrange, Vibrance,
    };

    const fn split(shadow_hue: f64, shadow_sat: f64, highlight_hue: f64, highlight_sat: f64) -> Step {
        SplitToning {
            shadow_hue,
            shadow_sat,
            highlight_hue,
            highlight_sat,
        }
    }

    const fn curve(shadows: f64, midtones: f64, highlights: f64) -> Step {
        Step::Curves {
            shadows,
            midtones,
            highlights,
        }
    }

    const fn vignette(strength: f64, radius: f64) -> Step {
        Step::Vignette { strength, radius }
    }

    const fn glow(intensity: f64, radius: u32) -> Step {
        Step::Glow { intensity, radius }
    }

    /// Haze with a `[B, G, R]` color.
    const fn haze(amount: f64, bgr: [u8; 3]) -> Step {
        Step::Haze {
            amount,
            color: Color::from_bgr(bgr),
        }
    }

    const fn fade(fade: f64, black: f64) -> Step {
        FilmFade { fade, black }
    }

    const fn temp_tint(temp: f64, tint: f64) -> Step {
        Step::TempTint { temp, tint }
    }

    /// Screen overlay with a `[B, G, R]` color.
    const fn screen(bgr: [u8; 3], opacity: f64) -> Step {
        Step::Overlay {
            color: Color::from_bgr(bgr),
            opacity,
            mode: BlendMode::Screen,
        }
    }

    pub(super) const LUT_WARM_CONTRAST: &[Step] = &[
        Channels {
            gain: [1.1, 1.02, 0.95],
            offset: [5.0, 0.0, -5.0],
        },
        Contrast(1.15),
    ];

    pub(super) const LUT_COOL_MATTE: &[Step] = &[
        Channels {
            gain: [0.95, 1.02, 1.08],
            offset: [0.0, 5.0, 10.0],
        },
        FilmFade { fade: 0.2, black: 0.1 },
    ];

    pub(super) const LUT_VIBRANT_POP: &[Step] = &[Saturation(1.3), Vibrance(0.4), Clarity(0.3)];

    pub(super) const LUT_FILM_EMULATION: &[Step] = &[
        FilmFade { fade: 0.25, black: 0.08 },
        SplitToning {
            shadow_hue: 220.0,
            shadow_sat: 0.15,
            highlight_hue: 45.0,
            highlight_sat: 0.12,
        },
        Grain(0.08),
    ];

    pub(super) const LUT_FADED_PASTEL: &[Step] = &[
        Exposure(15.0),
        Contrast(0.85),
        Saturation(0.75),
        FilmFade { fade: 0.35, black: 0.2 },
    ];

    pub(super) const NOIR: &[Step] = &[
        Grayscale,
        Contrast(1.25),
        curve(-15.0, 5.0, 10.0),
        vignette(0.45, 0.6),
        Grain(0.03),
    ];

    pub(super) const NEO_NOIR: &[Step] = &[
        NeoNoirMix,
        Contrast(1.3),
        split(240.0, 0.15, 350.0, 0.1),
        vignette(0.5, 0.6),
    ];

    pub(super) const DARK_NOIR: &[Step] = &[
        Grayscale,
        Exposure(-20.0),
        Contrast(1.35),
        curve(-20.0, 0.0, 10.0),
        vignette(0.6, 0.5),
        Grain(0.04),
    ];

    pub(super) const NIGHT: &[Step] = &[
        Exposure(-20.0),
        split(220.0, 0.35, 200.0, 0.15),
        Contrast(1.15),
        Saturation(0.85),
        vignette(0.5, 0.65),
    ];

    pub(super) const DEEP_NIGHT: &[Step] = &[
        Exposure(-35.0),
        split(230.0, 0.4, 210.0, 0.2),
        Contrast(1.2),
        Saturation(0.7),
        vignette(0.6, 0.55),
        Grain(0.025),
    ];

    pub(super) const BLUE_HOUR: &[Step] = &[
        Exposure(-12.0),
        split(235.0, 0.35, 280.0, 0.15),
        temp_tint(-20.0, 3.0),
        Saturation(0.9),
        haze(0.05, [200, 180, 220]),
    ];

    pub(super) const MIDNIGHT: &[Step] = &[
        Exposure(-30.0),
        split(240.0, 0.45, 220.0, 0.2),
        Contrast(1.25),
        Saturation(0.6),
        vignette(0.6, 0.5),
    ];

    pub(super) const CYBERPUNK: &[Step] = &[
        split(280.0, 0.3, 180.0, 0.25),
        screen([255, 0, 120], 0.08),
        Contrast(1.2),
        Saturation(1.25),
        vignette(0.4, 0.7),
        glow(0.2, 25),
    ];

    pub(super) const NEON: &[Step] = &[
        Saturation(1.4),
        Vibrance(0.4),
        Contrast(1.2),
        glow(0.25, 25),
        vignette(0.4, 0.7),
    ];

    pub(super) const SYNTHWAVE: &[Step] = &[
        split(270.0, 0.35, 320.0, 0.25),
        screen([255, 50, 150], 0.1),
        Contrast(1.15),
        Saturation(1.3),
        glow(0.2, 31),
        Grain(0.025),
    ];

    pub(super) const BLADE_RUNNER: &[Step] = &[
        TealAndOrange(0.4),
        haze(0.08, [180, 160, 140]),
        Contrast(1.15),
        split(190.0, 0.2, 35.0, 0.25),
        vignette(0.4, 0.7),
        glow(0.12, 21),
    ];

    pub(super) const MOODY_BLUE: &[Step] = &[
        split(215.0, 0.35, 225.0, 0.15),
        Saturation(0.75),
        Exposure(-12.0),
        Contrast(1.1),
        haze(0.06, [180, 190, 220]),
        vignette(0.4, 0.7),
    ];

    pub(super) const MOODY_DARK: &[Step] = &[
        Exposure(-18.0),
        Contrast(1.2),
        Saturation(0.8),
        curve(-15.0, -5.0, 0.0),
        vignette(0.5, 0.6),
    ];

    pub(super) const ATMOSPHERIC: &[Step] = &[
        Exposure(-8.0),
        haze(0.1, [190, 185, 200]),
        split(220.0, 0.2, 45.0, 0.1),
        Contrast(0.95),
        Saturation(0.88),
    ];

    pub(super) const DRAMATIC: &[Step] = &[
        Contrast(1.25),
        curve(-15.0, 8.0, 10.0),
        Saturation(1.1),
        vignette(0.5, 0.6),
        Clarity(0.25),
    ];

    pub(super) const VINTAGE_FILM: &[Step] = &[
        fade(0.15, 0.08),
        split(35.0, 0.18, 50.0, 0.12),
        Saturation(0.88),
        Contrast(0.95),
        Grain(0.025),
        vignette(0.35, 0.75),
    ];

    pub(super) const RETRO_70S: &[Step] = &[
        CrossProcess(0.25),
        fade(0.2, 0.1),
        split(30.0, 0.2, 55.0, 0.18),
        Saturation(0.9),
        Grain(0.03),
        vignette(0.4, 0.7),
    ];

    pub(super) const POLAROID: &[Step] = &[
        fade(0.15, 0.08),
        split(45.0, 0.15, 180.0, 0.08),
        Contrast(1.02),
        Saturation(0.9),
        ShadowTint,
        vignette(0.3, 0.8),
    ];

    pub(super) const KODACHROME: &[Step] = &[
        Saturation(1.15),
        Contrast(1.1),
        split(220.0, 0.1, 40.0, 0.15),
        Channels {
            gain: [1.05, 1.0, 1.0],
            offset: [0.0; 3],
        },
        Grain(0.02),
    ];

    pub(super) const CINEMATIC_TEAL_ORANGE: &[Step] = &[
        TealAndOrange(0.4),
        Contrast(1.12),
        curve(-8.0, 0.0, 5.0),
        vignette(0.35, 0.72),
        fade(0.08, 0.04),
    ];

    pub(super) const BLOCKBUSTER: &[Step] = &[
        TealAndOrange(0.45),
        Contrast(1.18),
        Saturation(1.08),
        vignette(0.38, 0.7),
        glow(0.1, 21),
    ];

    pub(super) const INDIE_FILM: &[Step] = &[
        Saturation(0.88),
        fade(0.12, 0.06),
        split(200.0, 0.12, 45.0, 0.08),
        Contrast(1.03),
        Grain(0.025),
    ];

    pub(super) const GOLDEN_HOUR: &[Step] = &[
        split(30.0, 0.12, 50.0, 0.2),
        temp_tint(20.0, 4.0),
        Saturation(1.1),
        glow(0.1, 31),
        haze(0.03, [255, 240, 210]),
    ];

    pub(super) const MORNING_LIGHT: &[Step] = &[
        temp_tint(12.0, 2.0),
        Exposure(8.0),
        split(220.0, 0.06, 45.0, 0.15),
        Saturation(1.05),
        glow(0.08, 25),
        haze(0.02, [255, 248, 240]),
    ];

    pub(super) const SUNRISE: &[Step] = &[
        split(250.0, 0.1, 35.0, 0.22),
        temp_tint(18.0, 6.0),
        Saturation(1.12),
        glow(0.12, 31),
    ];

    pub(super) const SUNSET: &[Step] = &[
        split(285.0, 0.12, 28.0, 0.28),
        temp_tint(25.0, 10.0),
        Saturation(1.2),
        Vibrance(0.3),
        glow(0.12, 31),
    ];

    pub(super) const WARM_GLOW: &[Step] = &[
        temp_tint(22.0, 4.0),
        Saturation(1.08),
        Orton {
            blur: 25,
            blend: 0.18,
        },
        split(35.0, 0.1, 50.0, 0.15),
    ];

    pub(super) const MAGIC_HOUR: &[Step] = &[
        split(280.0, 0.08, 40.0, 0.25),
        temp_tint(20.0, 8.0),
        Saturation(1.12),
        Orton {
            blur: 21,
            blend: 0.15,
        },
        haze(0.04, [255, 235, 210]),
    ];

    pub(super) const BLACK_AND_WHITE: &[Step] = &[Grayscale, Contrast(1.1)];

    pub(super) const HIGH_CONTRAST_BW: &[Step] = &[Grayscale, Contrast(1.3), curve(-15.0, 8.0, 12.0)];

    pub(super) const FILM_NOIR_BW: &[Step] = &[
        Grayscale,
        Contrast(1.35),
        curve(-18.0, 5.0, 15.0),
        vignette(0.55, 0.55),
        Grain(0.035),
    ];

    pub(super) const SILVER: &[Step] = &[Grayscale, Exposure(8.0), Contrast(1.15), curve(8.0, 5.0, 0.0)];

    pub(super) const DREAM: &[Step] = &[
        Orton {
            blur: 25,
            blend: 0.22,
        },
        Saturation(0.92),
        split(260.0, 0.12, 50.0, 0.1),
        haze(0.08, [220, 210, 230]),
        glow(0.18, 35),
    ];

    pub(super) const ETHEREAL: &[Step] = &[
        Exposure(15.0),
        Contrast(0.9),
        Saturation(0.85),
        Orton {
            blur: 21,
            blend: 0.2,
        },
        haze(0.1, [240, 235, 250]),
        glow(0.22, 41),
    ];

    pub(super) const HORROR: &[Step] = &[
        Exposure(-15.0),
        Saturation(0.7),
        split(160.0, 0.25, 40.0, 0.1),
        Contrast(1.2),
        vignette(0.6, 0.5),
        Grain(0.03),
    ];

    pub(super) const WESTERN: &[Step] = &[
        split(35.0, 0.22, 45.0, 0.18),
        temp_tint(20.0, 6.0),
        Saturation(0.92),
        haze(0.08, [220, 200, 170]),
        fade(0.12, 0.06),
        vignette(0.35, 0.75),
    ];

    pub(super) const UNDERWATER: &[Step] = &[
        split(195.0, 0.35, 180.0, 0.3),
        temp_tint(-30.0, -10.0),
        Saturation(0.85),
        haze(0.18, [180, 200, 180]),
        Contrast(0.9),
    ];
}

impl StylePreset {
    /// Parse a token, accepting aliases. Case and `-`/space separators
    /// are ignored; empty and unknown tokens read as
    /// [`StylePreset::None`].
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        let token = normalize_token(token);
        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.as_str() == token)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == token)
                    .map(|&(_, preset)| preset)
            })
            .unwrap_or_default()
    }

    /// `true` for the no-op sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// The steps this preset runs.
    #[must_use]
    pub const fn recipe(self) -> &'static [Step] {
        match self {
            Self::None => &[],
            Self::Noir => recipes::NOIR,
            Self::NeoNoir => recipes::NEO_NOIR,
            Self::DarkNoir => recipes::DARK_NOIR,
            Self::Night => recipes::NIGHT,
            Self::DeepNight => recipes::DEEP_NIGHT,
            Self::BlueHour => recipes::BLUE_HOUR,
            Self::Midnight => recipes::MIDNIGHT,
            Self::Cyberpunk => recipes::CYBERPUNK,
            Self::Neon => recipes::NEON,
            Self::Synthwave => recipes::SYNTHWAVE,
            Self::BladeRunner => recipes::BLADE_RUNNER,
            Self::MoodyBlue => recipes::MOODY_BLUE,
            Self::MoodyDark => recipes::MOODY_DARK,
            Self::Atmospheric => recipes::ATMOSPHERIC,
            Self::Dramatic => recipes::DRAMATIC,
            Self::VintageFilm => recipes::VINTAGE_FILM,
            Self::Retro70s => recipes::RETRO_70S,
            Self::Polaroid => recipes::POLAROID,
            Self::Kodachrome => recipes::KODACHROME,
            Self::CinematicTealOrange => recipes::CINEMATIC_TEAL_ORANGE,
            Self::Blockbuster => recipes::BLOCKBUSTER,
            Self::IndieFilm => recipes::INDIE_FILM,
            Self::GoldenHour => recipes::GOLDEN_HOUR,
            Self::MorningLight => recipes::MORNING_LIGHT,
            Self::Sunrise => recipes::SUNRISE,
            Self::Sunset => recipes::SUNSET,
            Self::WarmGlow => recipes::WARM_GLOW,
            Self::MagicHour => recipes::MAGIC_HOUR,
            Self::BlackAndWhite => recipes::BLACK_AND_WHITE,
            Self::HighContrastBw => recipes::HIGH_CONTRAST_BW,
            Self::FilmNoirBw => recipes::FILM_NOIR_BW,
            Self::Silver => recipes::SILVER,
            Self::Dream => recipes::DREAM,
            Self::Ethereal => recipes::ETHEREAL,
            Self::Horror => recipes::HORROR,
            Self::Western => recipes::WESTERN,
            Self::Underwater => recipes::UNDERWATER,
        }
    }
}

impl From<String> for StylePreset {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

impl From<StylePreset> for &'static str {
    fn from(preset: StylePreset) -> Self {
        preset.as_str()
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply a style preset.
///
/// # Errors
///
/// [`FilterError::EmptyImage`], or the first failing step.
pub fn style_preset(image: &RgbImage, choice: &StyleChoice) -> Result<RgbImage, FilterError> {
    run_recipe(image, choice.style.recipe())
}
