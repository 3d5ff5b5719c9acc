//! Engine configuration.

use darkroom_pipeline::PreviewFilter;
use serde::{Deserialize, Serialize};

/// Configuration for a [`SessionEngine`](crate::SessionEngine).
///
/// All fields have defaults; a partial JSON object fills the rest from
/// [`EngineConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Iterations allowed per session before every further `iterate`
    /// answers `done`.
    pub max_iterations: u32,

    /// Maximum width in pixels of the preview written next to each
    /// iteration output.
    pub preview_width: u32,

    /// Characters of rationale kept per entry in session summaries.
    pub history_reason_limit: usize,

    /// Resampling filter used for previews.
    pub preview_filter: PreviewFilter,
}

impl EngineConfig {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 5;
    pub const DEFAULT_PREVIEW_WIDTH: u32 = 212;
    pub const DEFAULT_HISTORY_REASON_LIMIT: usize = 200;
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            preview_width: Self::DEFAULT_PREVIEW_WIDTH,
            history_reason_limit: Self::DEFAULT_HISTORY_REASON_LIMIT,
            preview_filter: PreviewFilter::default(),
        }
    }
}
