//! The filter chain executor.
//!
//! Applies the ten basic tools in their fixed order (always, since every
//! basic record has a neutral default), then each requested creative
//! tool in its fixed order. A step that fails is logged and passed over:
//! the working image stays as it was before that step and the chain
//! continues. The input buffer is never modified.

use web_time::Instant;

use crate::diagnostics::{ChainDiagnostics, StepDiagnostics, StepOutcome};
use crate::params::CanonicalParams;
use crate::preset;
use crate::tool::ToolName;
use crate::types::{FilterError, RgbImage};
use crate::{creative, curves, grain, tonal};

/// Adjusted image plus per-step diagnostics.
#[derive(Debug, Clone)]
pub struct ChainOutput {
    /// The final image.
    pub image: RgbImage,
    /// What happened at each step.
    pub diagnostics: ChainDiagnostics,
}

/// What a tool does with the current parameters.
enum Action {
    /// Creative tool not requested; leaves no trace in diagnostics.
    Absent,
    /// Requested with a no-op sentinel value.
    Skip,
    /// Ran, successfully or not.
    Ran(Result<RgbImage, FilterError>),
}

/// Run one tool against `image`.
fn run_tool(tool: ToolName, params: &CanonicalParams, image: &RgbImage) -> Action {
    let basic = &params.basic;
    let c = &params.creative;
    let ran = Action::Ran;
    match tool {
        ToolName::AdjustExposure => ran(tonal::exposure(image, &basic.exposure)),
        ToolName::AdjustContrast => ran(tonal::contrast(image, &basic.contrast)),
        ToolName::AdjustHighlights => ran(tonal::highlights(image, &basic.highlights)),
        ToolName::AdjustShadows => ran(tonal::shadows(image, &basic.shadows)),
        ToolName::AdjustWhites => ran(tonal::whites(image, &basic.whites)),
        ToolName::AdjustBlacks => ran(tonal::blacks(image, &basic.blacks)),
        ToolName::AdjustTempTint => ran(tonal::temp_tint(image, &basic.temp_tint)),
        ToolName::AdjustSaturation => ran(tonal::saturation(image, &basic.saturation)),
        ToolName::AdjustVibrance => ran(tonal::vibrance(image, &basic.vibrance)),
        ToolName::AdjustColorMixer => ran(tonal::color_mixer(image, &basic.color_mixer)),
        ToolName::ApplySplitToning => optional(c.split_toning.as_ref(), |p| {
            creative::split_toning(image, p)
        }),
        ToolName::ApplyColorOverlay => optional(c.color_overlay.as_ref(), |p| {
            creative::color_overlay(image, p)
        }),
        ToolName::ApplyCurves => optional(c.curves.as_ref(), |p| curves::curves(image, p)),
        ToolName::ApplyVignette => {
            optional(c.vignette.as_ref(), |p| creative::vignette(image, p))
        }
        ToolName::ApplyGlow => optional(c.glow.as_ref(), |p| creative::glow(image, p)),
        ToolName::ApplyGrain => optional(c.grain.as_ref(), |p| grain::grain(image, p)),
        ToolName::ApplyDuotone => optional(c.duotone.as_ref(), |p| creative::duotone(image, p)),
        ToolName::ApplyHaze => optional(c.haze.as_ref(), |p| creative::haze(image, p)),
        ToolName::ApplyFilmFade => {
            optional(c.film_fade.as_ref(), |p| creative::film_fade(image, p))
        }
        ToolName::ApplyClarity => optional(c.clarity.as_ref(), |p| creative::clarity(image, p)),
        ToolName::ApplyDehaze => optional(c.dehaze.as_ref(), |p| creative::dehaze(image, p)),
        ToolName::ApplyOrtonEffect => optional(c.orton_effect.as_ref(), |p| {
            creative::orton_effect(image, p)
        }),
        ToolName::ApplyCrossProcess => optional(c.cross_process.as_ref(), |p| {
            creative::cross_process(image, p)
        }),
        ToolName::ApplyBleachBypass => optional(c.bleach_bypass.as_ref(), |p| {
            creative::bleach_bypass(image, p)
        }),
        ToolName::ApplyTealAndOrange => optional(c.teal_and_orange.as_ref(), |p| {
            creative::teal_and_orange(image, p)
        }),
        ToolName::ApplyLutColorGrade => match &c.lut_color_grade {
            None => Action::Absent,
            Some(grade) if grade.style.is_neutral() => Action::Skip,
            Some(grade) => ran(preset::lut_color_grade(image, grade)),
        },
        ToolName::ApplyStylePreset => match &c.style_preset {
            None => Action::Absent,
            Some(choice) if choice.style.is_none() => Action::Skip,
            Some(choice) => ran(preset::style_preset(image, choice)),
        },
    }
}

fn optional<T>(
    record: Option<&T>,
    apply: impl FnOnce(&T) -> Result<RgbImage, FilterError>,
) -> Action {
    record.map_or(Action::Absent, |r| Action::Ran(apply(r)))
}

/// Apply every basic tool and every requested creative tool, in order.
///
/// Never fails: a step that returns an error is recorded as
/// [`StepOutcome::Failed`] and the chain continues from the image as it
/// was before that step. Same parameters and same input always give the
/// same output bytes.
#[must_use = "returns the adjusted image"]
pub fn apply_chain(image: &RgbImage, params: &CanonicalParams) -> ChainOutput {
    let chain_start = Instant::now();
    let mut working = image.clone();
    let mut steps = Vec::new();

    for tool in ToolName::all() {
        let step_start = Instant::now();
        let outcome = match run_tool(tool, params, &working) {
            Action::Absent => continue,
            Action::Skip => {
                tracing::debug!(%tool, "skipping no-op style");
                StepOutcome::Skipped
            }
            Action::Ran(Ok(next)) => {
                working = next;
                StepOutcome::Applied
            }
            Action::Ran(Err(err)) => {
                tracing::warn!(%tool, error = %err, "filter failed; keeping previous image");
                StepOutcome::Failed(err.to_string())
            }
        };
        steps.push(StepDiagnostics {
            tool,
            duration: step_start.elapsed(),
            outcome,
        });
    }

    let diagnostics = ChainDiagnostics {
        image_width: image.width(),
        image_height: image.height(),
        steps,
        total_duration: chain_start.elapsed(),
    };
    tracing::debug!(
        steps = diagnostics.steps.len(),
        elapsed_ms = diagnostics.total_duration.as_secs_f64() * 1000.0,
        "filter chain complete"
    );
    ChainOutput {
        image: working,
        diagnostics,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Rgb;

    use super::*;
    use crate::params::{Grain, Intensity, Level, LutGrade, StyleChoice, ToolRecord, Vignette};
    use crate::preset::{LutStyle, StylePreset};

    fn gradient() -> RgbImage {
        RgbImage::from_fn(24, 16, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            let v = ((x * 10 + y * 3) % 256) as u8;
            Rgb([v, v.wrapping_add(40), 255 - v])
        })
    }

    fn outcomes(output: &ChainOutput) -> Vec<(ToolName, StepOutcome)> {
        output
            .diagnostics
            .steps
            .iter()
            .map(|s| (s.tool, s.outcome.clone()))
            .collect()
    }

    #[test]
    fn default_params_leave_image_unchanged() {
        let img = gradient();
        let out = apply_chain(&img, &CanonicalParams::default());
        assert_eq!(out.image, img);
        assert_eq!(out.diagnostics.steps.len(), 10);
        assert!(
            out.diagnostics
                .steps
                .iter()
                .all(|s| s.outcome == StepOutcome::Applied)
        );
    }

    #[test]
    fn basic_tools_run_in_fixed_order() {
        let out = apply_chain(&gradient(), &CanonicalParams::default());
        let tools: Vec<_> = out.diagnostics.steps.iter().map(|s| s.tool).collect();
        assert_eq!(tools, ToolName::BASIC.to_vec());
    }

    #[test]
    fn chain_is_deterministic() {
        let mut params = CanonicalParams::default();
        params.basic.exposure = Level::new(-10.0);
        params.set(ToolRecord::Grain(Grain::default()));
        params.set(ToolRecord::Vignette(Vignette::default()));
        params.set(ToolRecord::TealAndOrange(Intensity::new(0.5)));
        let img = gradient();
        assert_eq!(apply_chain(&img, &params).image, apply_chain(&img, &params).image);
    }

    #[test]
    fn none_style_and_neutral_lut_are_skipped() {
        let mut params = CanonicalParams::default();
        params.set(ToolRecord::StylePreset(StyleChoice {
            style: StylePreset::None,
        }));
        params.set(ToolRecord::LutColorGrade(LutGrade {
            style: LutStyle::Neutral,
        }));
        let img = gradient();
        let out = apply_chain(&img, &params);
        assert_eq!(out.image, img);
        let tail = &outcomes(&out)[10..];
        assert_eq!(
            tail,
            &[
                (ToolName::ApplyLutColorGrade, StepOutcome::Skipped),
                (ToolName::ApplyStylePreset, StepOutcome::Skipped),
            ]
        );
    }

    #[test]
    fn failed_step_keeps_previous_image_and_chain_continues() {
        let mut params = CanonicalParams::default();
        // Radius at or above 1 is rejected by the vignette itself.
        params.set(ToolRecord::Vignette(Vignette {
            strength: 0.5,
            radius: 1.5,
        }));
        params.set(ToolRecord::BleachBypass(Intensity::new(0.6)));
        let img = gradient();
        let out = apply_chain(&img, &params);

        let failures: Vec<_> = out.diagnostics.failures().map(|(t, _)| t).collect();
        assert_eq!(failures, vec![ToolName::ApplyVignette]);
        assert_eq!(
            outcomes(&out).last(),
            Some(&(ToolName::ApplyBleachBypass, StepOutcome::Applied))
        );
        assert_ne!(out.image, img);
    }

    #[test]
    fn empty_image_fails_every_step_without_panicking() {
        let img = RgbImage::new(0, 0);
        let out = apply_chain(&img, &CanonicalParams::default());
        assert_eq!(out.image.dimensions(), (0, 0));
        assert_eq!(out.diagnostics.failures().count(), 10);
    }

    #[test]
    fn input_is_not_modified() {
        let img = gradient();
        let copy = img.clone();
        let mut params = CanonicalParams::default();
        params.basic.contrast = Level::new(1.3);
        let _ = apply_chain(&img, &params);
        assert_eq!(img, copy);
    }
}
