//! Session records.

use darkroom_pipeline::{CanonicalParams, SemanticDescriptor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::layout;
use crate::suggestion::SuggestionStatus;

pub type SessionId = Uuid;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Image and goal received; no iteration has run.
    Uploaded,
    /// At least one iteration has run and more are allowed.
    Iterating,
    /// The ceiling was reached or the last suggestion was satisfactory.
    Done,
}

/// One applied iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based iteration number.
    pub ordinal: u32,
    /// Parameters after normalization and clamping.
    pub parameters: CanonicalParams,
    /// Output file name inside the session directory.
    pub output: String,
    pub preview: String,
    pub rationale: String,
    pub status: SuggestionStatus,
}

/// A stored editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub goal: String,
    /// File name of the uploaded image.
    pub original: String,
    /// File name the next iteration builds on.
    pub current: String,
    pub iteration: u32,
    pub phase: Phase,
    pub history: Vec<HistoryEntry>,
    pub descriptor: Option<SemanticDescriptor>,
    /// Number of semantic edits written so far.
    pub semantic_edits: u32,
    /// Set while an operation owns the session.
    pub in_flight: bool,
    /// Bumped on every stored change.
    pub version: u64,
}

impl Session {
    /// A freshly uploaded session.
    #[must_use]
    pub fn new(id: SessionId, goal: String) -> Self {
        Self {
            id,
            goal,
            original: layout::ORIGINAL.to_owned(),
            current: layout::ORIGINAL.to_owned(),
            iteration: 0,
            phase: Phase::Uploaded,
            history: Vec::new(),
            descriptor: None,
            semantic_edits: 0,
            in_flight: false,
            version: 0,
        }
    }

    /// `true` once `start` has succeeded.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.phase != Phase::Uploaded
    }

    /// Drop history and semantic state and point back at the original.
    pub fn reset(&mut self) {
        self.iteration = 0;
        self.history.clear();
        self.descriptor = None;
        self.current.clone_from(&self.original);
    }
}
