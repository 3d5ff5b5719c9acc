//! darkroom-pipeline: Pure photo adjustment pipeline (sans-IO).
//!
//! Turns loosely-shaped parameter suggestions into a deterministic chain
//! of pixel transforms:
//! raw parameters -> normalize -> safety clamp -> basic tools ->
//! creative tools -> adjusted image.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and image buffers. Session state and the filesystem live
//! in `darkroom-session`.

pub mod blur;
pub mod chain;
pub mod clamp;
pub mod color;
pub mod creative;
pub mod curves;
pub mod decode;
pub mod diagnostics;
pub mod grain;
pub mod normalize;
pub mod params;
pub mod preset;
pub mod preview;
pub mod raw;
pub mod semantic;
pub mod tonal;
pub mod tool;
pub mod types;

pub use chain::{ChainOutput, apply_chain};
pub use clamp::clamp_params;
pub use decode::{decode_rgb, encode_png};
pub use diagnostics::{ChainDiagnostics, StepDiagnostics, StepOutcome};
pub use normalize::{normalize, normalize_params};
pub use params::{BasicParams, CanonicalParams, CreativeParams, ToolRecord};
pub use preset::{LutStyle, StylePreset};
pub use preview::{PreviewFilter, preview};
pub use raw::{RawParams, RawValue};
pub use semantic::{AxisDescriptor, DescriptorError, SemanticAxis, SemanticDescriptor, map_axes};
pub use tool::{Tier, ToolName};
pub use types::{Color, Dimensions, FilterError, PipelineError, RgbImage};

/// Normalize and clamp a raw suggestion payload.
///
/// This is the only way untrusted parameters should reach
/// [`apply_chain`]: every field is filled, synonyms are resolved, and
/// every value is inside its safe range.
#[must_use = "returns the prepared parameters"]
pub fn prepare(raw: &RawParams) -> CanonicalParams {
    clamp_params(&normalize_params(raw))
}

/// Prepare `raw` and run the chain on `image`.
#[must_use = "returns the adjusted image"]
pub fn process(image: &RgbImage, raw: &RawParams) -> ChainOutput {
    apply_chain(image, &prepare(raw))
}
