//! Chain diagnostics: timing and outcome for each tool step.
//!
//! Every call to [`apply_chain`](crate::apply_chain) collects diagnostics
//! alongside the adjusted image, so a caller can see which tools ran,
//! which were skipped as no-ops, and which failed and were passed over.
//!
//! Timestamps are captured via the `web-time` crate, which uses
//! `performance.now()` on WASM and `std::time::Instant` on native.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tool::ToolName;

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// What happened to one tool in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The transform ran and its output replaced the working image.
    Applied,
    /// The tool was requested but its value is a no-op sentinel
    /// (style `none`, LUT `neutral`).
    Skipped,
    /// The transform failed; the working image was left as it was.
    Failed(String),
}

/// Diagnostics for a single tool step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDiagnostics {
    /// Tool that ran.
    pub tool: ToolName,
    /// Wall-clock duration of this step (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Outcome of the step.
    pub outcome: StepOutcome,
}

/// Diagnostics collected from one chain run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainDiagnostics {
    /// Image width in pixels.
    pub image_width: u32,
    /// Image height in pixels.
    pub image_height: u32,
    /// One entry per tool, in application order.
    pub steps: Vec<StepDiagnostics>,
    /// Total wall-clock duration of the chain (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
}

impl ChainDiagnostics {
    /// Number of steps with the given outcome kind.
    fn count(&self, matches: impl Fn(&StepOutcome) -> bool) -> usize {
        self.steps.iter().filter(|s| matches(&s.outcome)).count()
    }

    /// Steps that failed, with their reasons.
    pub fn failures(&self) -> impl Iterator<Item = (ToolName, &str)> {
        self.steps.iter().filter_map(|s| match &s.outcome {
            StepOutcome::Failed(reason) => Some((s.tool, reason.as_str())),
            StepOutcome::Applied | StepOutcome::Skipped => None,
        })
    }

    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Chain Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!("Image: {}x{}", self.image_width, self.image_height));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<24} {:>10} {:>10}  {}",
            "Tool", "Duration", "% Total", "Outcome"
        ));
        lines.push("-".repeat(80));

        let total_ms = duration_ms(self.total_duration);
        for step in &self.steps {
            let ms = duration_ms(step.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let name = step.tool.as_str();
            let outcome = format_outcome(&step.outcome);
            lines.push(format!("{name:<24} {ms:>8.3}ms {pct:>9.1}%  {outcome}"));
        }

        lines.push(String::new());
        lines.push(format!(
            "Applied: {}  |  Skipped: {}  |  Failed: {}",
            self.count(|o| *o == StepOutcome::Applied),
            self.count(|o| *o == StepOutcome::Skipped),
            self.count(|o| matches!(o, StepOutcome::Failed(_))),
        ));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn format_outcome(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Applied => "applied".to_owned(),
        StepOutcome::Skipped => "skipped".to_owned(),
        StepOutcome::Failed(reason) => format!("FAILED: {reason}"),
    }
}
