//! Parameter suggestions and the continuation signal.

use darkroom_pipeline::RawParams;
use serde::{Deserialize, Deserializer, Serialize};

/// How the suggestion source rates its own progress toward the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    #[default]
    InProgress,
    Satisfactory,
}

impl<'de> Deserialize<'de> for SuggestionStatus {
    /// Anything other than `"satisfactory"` reads as in progress.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("satisfactory") => Self::Satisfactory,
            _ => Self::InProgress,
        })
    }
}

/// One step proposed by the suggestion source.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    /// Tool name to raw parameter value.
    pub parameters: RawParams,
    /// Free-text rationale.
    pub reason: String,
    pub status: SuggestionStatus,
}

impl Suggestion {
    #[must_use]
    pub fn new(parameters: RawParams, reason: impl Into<String>) -> Self {
        Self {
            parameters,
            reason: reason.into(),
            status: SuggestionStatus::InProgress,
        }
    }

    #[must_use]
    pub const fn satisfactory(mut self) -> Self {
        self.status = SuggestionStatus::Satisfactory;
        self
    }
}

/// Whether the caller should keep iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuationSignal {
    /// The iteration ceiling was reached.
    Done,
    /// The suggestion source is satisfied; iterating further is allowed.
    Satisfactory,
    InProgress,
}

impl ContinuationSignal {
    /// Signal after an iteration that reached `iteration` of `max`.
    #[must_use]
    pub fn after(iteration: u32, max: u32, status: SuggestionStatus) -> Self {
        if iteration >= max {
            Self::Done
        } else if status == SuggestionStatus::Satisfactory {
            Self::Satisfactory
        } else {
            Self::InProgress
        }
    }

    /// `true` unless the ceiling was reached.
    #[must_use]
    pub const fn can_continue(self) -> bool {
        !matches!(self, Self::Done)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use darkroom_pipeline::RawValue;

    use super::*;

    #[test]
    fn deserialize_full_suggestion() {
        let s: Suggestion = serde_json::from_str(
            r#"{"parameters": {"adjust_exposure": 10}, "reason": "too dark", "status": "satisfactory"}"#,
        )
        .unwrap();
        assert_eq!(s.parameters.get("adjust_exposure"), &RawValue::Number(10.0));
        assert_eq!(s.reason, "too dark");
        assert_eq!(s.status, SuggestionStatus::Satisfactory);
    }

    #[test]
    fn unknown_status_is_in_progress() {
        for status in [r#""done""#, "7", "null", r#""""#] {
            let json = format!(r#"{{"status": {status}}}"#);
            let s: Suggestion = serde_json::from_str(&json).unwrap();
            assert_eq!(s.status, SuggestionStatus::InProgress, "{status}");
        }
    }

    #[test]
    fn missing_fields_default() {
        let s: Suggestion = serde_json::from_str("{}").unwrap();
        assert!(s.parameters.is_empty());
        assert!(s.reason.is_empty());
        assert_eq!(s.status, SuggestionStatus::InProgress);
    }

    #[test]
    fn non_object_parameters_are_empty() {
        let s: Suggestion = serde_json::from_str(r#"{"parameters": "brighter"}"#).unwrap();
        assert!(s.parameters.is_empty());
    }

    #[test]
    fn signal_precedence() {
        use ContinuationSignal::{Done, InProgress, Satisfactory};
        assert_eq!(ContinuationSignal::after(5, 5, SuggestionStatus::Satisfactory), Done);
        assert_eq!(ContinuationSignal::after(2, 5, SuggestionStatus::Satisfactory), Satisfactory);
        assert_eq!(ContinuationSignal::after(2, 5, SuggestionStatus::InProgress), InProgress);
        assert!(!Done.can_continue());
        assert!(Satisfactory.can_continue());
    }

    #[test]
    fn signal_wire_names() {
        assert_eq!(
            serde_json::to_string(&ContinuationSignal::InProgress).unwrap(),
            r#""in_progress""#
        );
        assert_eq!(
            serde_json::to_string(&SuggestionStatus::Satisfactory).unwrap(),
            r#""satisfactory""#
        );
    }
}
