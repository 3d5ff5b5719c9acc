//! Integration test: push hostile suggestion payloads through the whole
//! pipeline (decode -> prepare -> chain -> encode).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use darkroom_pipeline::clamp::{
    CONTRAST, EXPOSURE, GLOW_RADIUS, GRAIN_AMOUNT, ORTON_BLUR, SATURATION, TEMP, VIGNETTE_RADIUS,
    VIGNETTE_STRENGTH,
};
use darkroom_pipeline::{
    CanonicalParams, RawParams, RgbImage, StepOutcome, ToolName, apply_chain, clamp_params,
    decode_rgb, encode_png, prepare, process,
};
use image::Rgb;
use serde_json::json;

/// A small synthetic photo: a warm-to-cool gradient with a bright patch.
fn photo() -> RgbImage {
    RgbImage::from_fn(48, 32, |x, y| {
        if (20..28).contains(&x) && (10..18).contains(&y) {
            return Rgb([250, 245, 235]);
        }
        #[allow(clippy::cast_possible_truncation)]
        let t = (x * 255 / 47) as u8;
        #[allow(clippy::cast_possible_truncation)]
        let s = (y * 255 / 31) as u8;
        Rgb([t, s / 2 + 40, 255 - t])
    })
}

fn payload(value: serde_json::Value) -> RawParams {
    RawParams::from(value)
}

#[test]
fn extreme_values_are_pulled_into_bounds() {
    let raw = payload(json!({
        "adjust_exposure": -1e9,
        "adjust_contrast": {"value": "NaN"},
        "adjust_temp_tint": {"temperature": 5000, "tint": -5000},
        "adjust_saturation": {"amount": -3},
        "apply_vignette": {"strength": 1.2, "radius": 150},
        "apply_grain": 50,
        "apply_glow": {"radius": 1000},
        "apply_orton_effect": {"blur": 2},
    }));
    let params = prepare(&raw);

    assert!((params.basic.exposure.value - EXPOSURE.min).abs() < f64::EPSILON);
    assert!(CONTRAST.contains(params.basic.contrast.value));
    assert!(TEMP.contains(params.basic.temp_tint.temp));
    assert!((params.basic.saturation.scale - SATURATION.min).abs() < f64::EPSILON);

    let vignette = params.creative.vignette.unwrap();
    assert!(VIGNETTE_STRENGTH.contains(vignette.strength));
    assert!(VIGNETTE_RADIUS.contains(vignette.radius));

    let grain = params.creative.grain.unwrap();
    assert!(grain.amount <= GRAIN_AMOUNT.max);

    let glow = params.creative.glow.unwrap();
    assert!(GLOW_RADIUS.contains(f64::from(glow.radius)));
    assert_eq!(glow.radius % 2, 1);

    let orton = params.creative.orton_effect.unwrap();
    assert!(ORTON_BLUR.contains(f64::from(orton.blur_amount)));
    assert_eq!(orton.blur_amount % 2, 1);
}

#[test]
fn prepare_is_idempotent_through_serialization() {
    let raw = payload(json!({
        "adjust_highlights": 99,
        "adjust_color_mixer": {"red": {"hue": 45, "sat": 9, "lum": 0}},
        "apply_split_toning": {"shadow_color": [200, 40, 10], "highlight_sat": 80},
        "apply_color_overlay": {"color": [0, 200, 255], "opacity": 300},
        "apply_style_preset": "teal-orange",
    }));
    let once = prepare(&raw);
    assert_eq!(clamp_params(&once), once);

    // A canonical record set is itself a valid payload.
    let again = prepare(&RawParams::from(serde_json::to_value(&once).unwrap()));
    assert_eq!(again, once);
}

#[test]
fn full_chain_runs_on_decoded_png_and_is_deterministic() {
    let bytes = encode_png(&photo()).unwrap();
    let image = decode_rgb(&bytes).unwrap();
    let raw = payload(json!({
        "adjust_exposure": -8,
        "adjust_contrast": 1.15,
        "adjust_shadows": {"amount": 20},
        "adjust_vibrance": 25,
        "apply_curves": [[0, 30], [64, 80], [128, 128], [192, 180], [255, 240]],
        "apply_glow": {"intensity": 0.2},
        "apply_grain": {"amount": 3, "size": 2},
        "apply_film_fade": {},
        "apply_lut_color_grade": "film_emulation",
        "apply_style_preset": {"preset": "blade_runner"},
    }));

    let first = process(&image, &raw);
    let second = process(&image, &raw);
    assert_eq!(first.image, second.image);
    assert_eq!(first.image.dimensions(), image.dimensions());
    assert_ne!(first.image, image);
    assert_eq!(first.diagnostics.failures().count(), 0);

    let tools: Vec<_> = first.diagnostics.steps.iter().map(|s| s.tool).collect();
    assert_eq!(&tools[..10], &ToolName::BASIC);
    assert_eq!(
        &tools[10..],
        &[
            ToolName::ApplyCurves,
            ToolName::ApplyGlow,
            ToolName::ApplyGrain,
            ToolName::ApplyFilmFade,
            ToolName::ApplyLutColorGrade,
            ToolName::ApplyStylePreset,
        ]
    );

    let out = encode_png(&first.image).unwrap();
    assert_eq!(decode_rgb(&out).unwrap(), first.image);
}

#[test]
fn none_and_empty_style_leave_image_unchanged() {
    let image = photo();
    for style in [json!("none"), json!(""), json!({"style": "no-such-look"})] {
        let raw = payload(json!({"apply_style_preset": style}));
        let out = process(&image, &raw);
        assert_eq!(out.image, image, "style {style}");
        let last = out.diagnostics.steps.last().unwrap();
        assert_eq!(last.tool, ToolName::ApplyStylePreset);
        assert_eq!(last.outcome, StepOutcome::Skipped);
    }
}

#[test]
fn garbage_payload_is_a_no_op() {
    let image = photo();
    let raw = payload(json!({
        "adjust_exposure": "bright please",
        "adjust_color_mixer": 4,
        "apply_haze": [1, 2],
        "apply_sparkle": {"amount": 1},
        "apply_curves": [[0, "x"]],
    }));
    let params = prepare(&raw);
    let out = apply_chain(&image, &params);

    // Curves came through as the neutral curve.
    assert_eq!(params.creative.present().count(), 1);
    assert_eq!(out.image, image);
}

#[test]
fn non_object_payload_is_default() {
    assert_eq!(prepare(&payload(json!([1, 2, 3]))), CanonicalParams::default());
    assert_eq!(prepare(&payload(json!(null))), CanonicalParams::default());
}
