//! The session engine: upload, iterate, branch, and semantic edits.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use darkroom_pipeline::{
    CanonicalParams, ChainDiagnostics, ChainOutput, RgbImage, SemanticDescriptor, apply_chain,
    decode_rgb, encode_png, map_axes, prepare, preview,
};
use serde::Serialize;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::SessionError;
use crate::layout;
use crate::session::{HistoryEntry, Phase, Session, SessionId};
use crate::store::{InMemorySessionStore, SessionStore, StoreError};
use crate::suggestion::{ContinuationSignal, Suggestion, SuggestionStatus};

// ───── Results ─────────────────────────────────────────────────────

/// Result of one applied iteration.
#[derive(Debug, Clone, Serialize)]
pub struct IterationReport {
    pub session_id: SessionId,
    /// 1-based iteration number.
    pub iteration: u32,
    /// Output file name inside the session directory.
    pub output: String,
    pub preview: String,
    /// File the chain ran against.
    pub base: String,
    /// Parameters after normalization and clamping.
    pub parameters: CanonicalParams,
    pub rationale: String,
    pub status: SuggestionStatus,
    pub signal: ContinuationSignal,
    pub diagnostics: ChainDiagnostics,
}

/// Result of [`SessionEngine::iterate`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IterationOutcome {
    Applied(IterationReport),
    /// The session already holds the maximum number of iterations.
    /// Nothing was run and nothing changed.
    CeilingReached { iteration: u32, current: String },
}

impl IterationOutcome {
    #[must_use]
    pub const fn signal(&self) -> ContinuationSignal {
        match self {
            Self::Applied(report) => report.signal,
            Self::CeilingReached { .. } => ContinuationSignal::Done,
        }
    }
}

/// Result of one semantic edit.
#[derive(Debug, Clone, Serialize)]
pub struct SemanticEditReport {
    pub session_id: SessionId,
    /// 1-based semantic edit number.
    pub edit: u32,
    pub output: String,
    pub base: String,
    /// Coordinates actually used, in descriptor order, after clamping.
    pub coordinates: [f64; 2],
    pub parameters: CanonicalParams,
    /// Human-readable summary of the axis positions.
    pub rationale: String,
    /// Iteration count of the session (unchanged by semantic edits).
    pub iteration: u32,
    pub signal: ContinuationSignal,
    pub diagnostics: ChainDiagnostics,
}

/// One history entry as shown in [`SessionInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub iteration: u32,
    /// Rationale, truncated to the configured character limit.
    pub reason: String,
    pub output: String,
    pub preview: String,
    pub status: SuggestionStatus,
}

/// Snapshot of a session for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub session_id: SessionId,
    pub goal: String,
    pub iteration: u32,
    pub max_iterations: u32,
    pub phase: Phase,
    pub has_semantic_axes: bool,
    pub current_image: String,
    pub history: Vec<HistorySummary>,
}

// ───── Engine ──────────────────────────────────────────────────────

/// Drives editing sessions whose files live under one root directory.
///
/// Operations on different sessions run independently. A second
/// operation on a session that is already busy fails immediately with
/// [`SessionError::IterationInProgress`].
#[derive(Debug)]
pub struct SessionEngine<S = InMemorySessionStore> {
    root: PathBuf,
    config: EngineConfig,
    store: S,
}

impl SessionEngine<InMemorySessionStore> {
    /// An engine backed by an in-memory store.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: EngineConfig) -> Self {
        Self::with_store(root, config, InMemorySessionStore::new())
    }
}

impl<S: SessionStore> SessionEngine<S> {
    #[must_use]
    pub fn with_store(root: impl Into<PathBuf>, config: EngineConfig, store: S) -> Self {
        Self {
            root: root.into(),
            config,
            store,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Directory holding the files of session `id`.
    #[must_use]
    pub fn session_dir(&self, id: SessionId) -> PathBuf {
        layout::session_dir(&self.root, id)
    }

    /// Create a session from an uploaded image and an editing goal.
    ///
    /// # Errors
    ///
    /// [`SessionError::EmptyGoal`] for a blank goal,
    /// [`SessionError::Image`] if the bytes are not a readable image,
    /// [`SessionError::Io`] if the session directory cannot be written.
    pub fn upload(&self, image_bytes: &[u8], goal: &str) -> Result<SessionId, SessionError> {
        let goal = goal.trim();
        if goal.is_empty() {
            return Err(SessionError::EmptyGoal);
        }
        let image = decode_rgb(image_bytes)?;

        let id = Uuid::new_v4();
        let dir = self.session_dir(id);
        fs::create_dir_all(&dir)?;
        let created = write_png(&dir.join(layout::ORIGINAL), &image).and_then(|()| {
            self.store
                .put(Session::new(id, goal.to_owned()))
                .map_err(SessionError::from)
        });
        if let Err(err) = created {
            if let Err(cleanup) = fs::remove_dir_all(&dir) {
                tracing::warn!(
                    session = %id,
                    error = %cleanup,
                    "could not remove session directory"
                );
            }
            return Err(err);
        }

        tracing::info!(
            session = %id,
            width = image.width(),
            height = image.height(),
            "session uploaded"
        );
        Ok(id)
    }

    /// Reset the session to its original image and run iteration 1.
    ///
    /// History and any semantic descriptor are discarded.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownSession`], [`SessionError::IterationInProgress`],
    /// or a resource error while reading or writing images. On error the
    /// session is left as it was, history included.
    pub fn start(
        &self,
        id: SessionId,
        suggestion: &Suggestion,
    ) -> Result<IterationReport, SessionError> {
        self.with_session(id, |session| {
            session.reset();
            let base = session.original.clone();
            tracing::info!(session = %id, "session started");
            self.run_iteration(session, &base, suggestion)
        })
    }

    /// Run the next iteration.
    ///
    /// With `base_override`, the chain runs against that file of the
    /// session directory instead of the current image (branching). Once
    /// the iteration ceiling is reached, further calls return
    /// [`IterationOutcome::CeilingReached`] and change nothing.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotStarted`] before [`start`](Self::start),
    /// [`SessionError::InvalidBaseName`] / [`SessionError::BaseImageNotFound`]
    /// for a bad override, plus the errors of [`start`](Self::start).
    pub fn iterate(
        &self,
        id: SessionId,
        suggestion: &Suggestion,
        base_override: Option<&str>,
    ) -> Result<IterationOutcome, SessionError> {
        let dir = self.session_dir(id);
        self.with_session(id, |session| {
            if !session.is_started() {
                return Err(SessionError::NotStarted(id));
            }
            let base = resolve_base(&dir, &session.current, base_override)?;
            if session.iteration >= self.config.max_iterations {
                tracing::info!(session = %id, iteration = session.iteration, "iteration ceiling reached");
                return Ok(IterationOutcome::CeilingReached {
                    iteration: session.iteration,
                    current: session.current.clone(),
                });
            }
            self.run_iteration(session, &base, suggestion)
                .map(IterationOutcome::Applied)
        })
    }

    /// Set the two semantic axes for this session.
    ///
    /// `descriptor_json` is the text produced by the axis-selection
    /// source. When it is missing or invalid the fallback pair
    /// (Cool-Warm, Vibrant-Muted) is used. The stored descriptor is
    /// replaced and returned.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownSession`] or
    /// [`SessionError::IterationInProgress`].
    pub fn semantic_init(
        &self,
        id: SessionId,
        descriptor_json: Option<&str>,
    ) -> Result<SemanticDescriptor, SessionError> {
        self.with_session(id, |session| {
            let descriptor = SemanticDescriptor::parse_or_fallback(descriptor_json);
            tracing::info!(
                session = %id,
                first = %descriptor.axes[0].axis,
                second = %descriptor.axes[1].axis,
                "semantic axes set"
            );
            session.descriptor = Some(descriptor.clone());
            Ok(descriptor)
        })
    }

    /// Render the image at the given axis coordinates.
    ///
    /// `coordinates` maps axis names to positions in [-1, 1]; axes not
    /// named read as 0. History and the iteration count are untouched.
    ///
    /// # Errors
    ///
    /// [`SessionError::SemanticNotInitialized`] before
    /// [`semantic_init`](Self::semantic_init), a bad override, or a
    /// resource error.
    pub fn semantic_edit(
        &self,
        id: SessionId,
        coordinates: &BTreeMap<String, f64>,
        base_override: Option<&str>,
    ) -> Result<SemanticEditReport, SessionError> {
        let dir = self.session_dir(id);
        self.with_session(id, |session| {
            let descriptor = session
                .descriptor
                .clone()
                .ok_or(SessionError::SemanticNotInitialized(id))?;
            let base = resolve_base(&dir, &session.current, base_override)?;

            let values = descriptor
                .coordinates(coordinates)
                .map(|v| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) });
            let parameters = map_axes(values, &descriptor);
            let ChainOutput { image, diagnostics } =
                apply_chain(&load_png(&dir.join(&base))?, &parameters);

            let edit = session.semantic_edits + 1;
            let output = layout::semantic_name(edit);
            write_png(&dir.join(&output), &image)?;
            session.semantic_edits = edit;

            tracing::info!(session = %id, edit, %base, %output, "semantic edit applied");
            Ok(SemanticEditReport {
                session_id: id,
                edit,
                output,
                base,
                coordinates: values,
                parameters,
                rationale: describe_position(&descriptor, values),
                iteration: session.iteration,
                signal: self.signal_for(session),
                diagnostics,
            })
        })
    }

    /// Summarize a session.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownSession`] or a store failure.
    pub fn session_info(&self, id: SessionId) -> Result<SessionInfo, SessionError> {
        let session = self
            .store
            .get(id)?
            .ok_or(SessionError::UnknownSession(id))?;
        let limit = self.config.history_reason_limit;
        Ok(SessionInfo {
            session_id: id,
            goal: session.goal,
            iteration: session.iteration,
            max_iterations: self.config.max_iterations,
            phase: session.phase,
            has_semantic_axes: session.descriptor.is_some(),
            current_image: session.current,
            history: session
                .history
                .into_iter()
                .map(|entry| HistorySummary {
                    iteration: entry.ordinal,
                    reason: entry.rationale.chars().take(limit).collect(),
                    output: entry.output,
                    preview: entry.preview,
                    status: entry.status,
                })
                .collect(),
        })
    }

    // ───── Internals ───────────────────────────────────────────────

    /// Claim the session, run `op` on a working copy, and store the
    /// result.
    ///
    /// On success the working copy is stored; on failure the record is
    /// restored to its state before the call. Either way the in-flight
    /// flag is cleared, also when `op` panics.
    fn with_session<T>(
        &self,
        id: SessionId,
        op: impl FnOnce(&mut Session) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let stored = self
            .store
            .get(id)?
            .ok_or(SessionError::UnknownSession(id))?;
        if stored.in_flight {
            return Err(SessionError::IterationInProgress(id));
        }

        let mut claimed = stored.clone();
        claimed.in_flight = true;
        claimed.version = stored.version + 1;
        if !self.store.compare_and_swap(stored.version, claimed.clone())? {
            return Err(SessionError::IterationInProgress(id));
        }

        let claim = Claim {
            store: &self.store,
            version: claimed.version,
            stored,
            released: false,
        };
        let mut working = claimed;
        let result = op(&mut working);
        let swapped = claim.release(result.is_ok().then_some(working))?;
        if !swapped {
            return Err(StoreError::Conflict(id).into());
        }
        result
    }

    /// Apply `suggestion` to `base` and record it as the next iteration.
    fn run_iteration(
        &self,
        session: &mut Session,
        base: &str,
        suggestion: &Suggestion,
    ) -> Result<IterationReport, SessionError> {
        let dir = self.session_dir(session.id);
        let k = session.iteration + 1;
        let image = load_png(&dir.join(base))?;

        let parameters = prepare(&suggestion.parameters);
        let ChainOutput { image, diagnostics } = apply_chain(&image, &parameters);
        for (tool, error) in diagnostics.failures() {
            tracing::warn!(session = %session.id, iteration = k, %tool, error, "tool failed");
        }

        let output = layout::final_name(k);
        let preview_file = layout::preview_name(k);
        write_png(&dir.join(&output), &image)?;
        let small = preview(&image, self.config.preview_width, self.config.preview_filter);
        write_png(&dir.join(&preview_file), &small)?;

        let signal = ContinuationSignal::after(k, self.config.max_iterations, suggestion.status);
        session.history.push(HistoryEntry {
            ordinal: k,
            parameters: parameters.clone(),
            output: output.clone(),
            preview: preview_file.clone(),
            rationale: suggestion.reason.clone(),
            status: suggestion.status,
        });
        session.iteration = k;
        session.current.clone_from(&output);
        session.phase = if signal == ContinuationSignal::InProgress {
            Phase::Iterating
        } else {
            Phase::Done
        };

        tracing::info!(
            session = %session.id,
            iteration = k,
            %base,
            %output,
            ?signal,
            "iteration applied"
        );
        Ok(IterationReport {
            session_id: session.id,
            iteration: k,
            output,
            preview: preview_file,
            base: base.to_owned(),
            parameters,
            rationale: suggestion.reason.clone(),
            status: suggestion.status,
            signal,
            diagnostics,
        })
    }

    /// Continuation signal for a session between iterations.
    fn signal_for(&self, session: &Session) -> ContinuationSignal {
        let status = session
            .history
            .last()
            .map_or(SuggestionStatus::InProgress, |entry| entry.status);
        ContinuationSignal::after(session.iteration, self.config.max_iterations, status)
    }
}

/// The file an operation should read: the override when given, else
/// the current image.
fn resolve_base(
    dir: &Path,
    current: &str,
    base_override: Option<&str>,
) -> Result<String, SessionError> {
    let Some(name) = base_override.filter(|name| !name.is_empty()) else {
        return Ok(current.to_owned());
    };
    let name = layout::validate_base_name(name)?;
    if dir.join(name).is_file() {
        Ok(name.to_owned())
    } else {
        Err(SessionError::BaseImageNotFound(name.to_owned()))
    }
}

fn describe_position(descriptor: &SemanticDescriptor, values: [f64; 2]) -> String {
    descriptor
        .axes
        .iter()
        .zip(values)
        .map(|(axis, value)| {
            let toward = if value < 0.0 {
                axis.left_pole.as_str()
            } else if value > 0.0 {
                axis.right_pole.as_str()
            } else {
                "neutral"
            };
            format!("{} {value:+.2} ({toward})", axis.axis)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// A claimed session. Dropping it without [`Claim::release`] puts the
/// record back as it was before the claim.
struct Claim<'a, S: SessionStore> {
    store: &'a S,
    /// Version written by the claim.
    version: u64,
    stored: Session,
    released: bool,
}

impl<S: SessionStore> Claim<'_, S> {
    /// Swap in `session` (or the pre-claim record) with the flag cleared.
    fn release(mut self, session: Option<Session>) -> Result<bool, StoreError> {
        self.released = true;
        let session = session.unwrap_or_else(|| self.stored.clone());
        self.swap(session)
    }

    fn swap(&self, mut session: Session) -> Result<bool, StoreError> {
        session.in_flight = false;
        session.version = self.version + 1;
        self.store.compare_and_swap(self.version, session)
    }
}

impl<S: SessionStore> Drop for Claim<'_, S> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let id = self.stored.id;
        match self.swap(self.stored.clone()) {
            Ok(true) => tracing::warn!(session = %id, "abandoned claim released"),
            Ok(false) => tracing::warn!(session = %id, "abandoned claim was already replaced"),
            Err(err) => tracing::warn!(session = %id, error = %err, "could not release claim"),
        }
    }
}

fn load_png(path: &Path) -> Result<RgbImage, SessionError> {
    Ok(decode_rgb(&fs::read(path)?)?)
}

fn write_png(path: &Path, image: &RgbImage) -> Result<(), SessionError> {
    fs::write(path, encode_png(image)?)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use darkroom_pipeline::{AxisDescriptor, SemanticAxis};

    use super::*;

    /// Accepts reads and swaps but refuses to insert.
    #[derive(Default)]
    struct RefusingStore(InMemorySessionStore);

    impl SessionStore for RefusingStore {
        fn get(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
            self.0.get(id)
        }

        fn put(&self, _session: Session) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }

        fn compare_and_swap(
            &self,
            expected_version: u64,
            session: Session,
        ) -> Result<bool, StoreError> {
            self.0.compare_and_swap(expected_version, session)
        }
    }

    fn png() -> Vec<u8> {
        encode_png(&RgbImage::new(8, 8)).unwrap()
    }

    #[test]
    fn panicking_operation_releases_the_claim() {
        let root = tempfile::tempdir().unwrap();
        let engine = SessionEngine::new(root.path(), EngineConfig::default());
        let id = engine.upload(&png(), "flat").unwrap();
        let before = engine.store().get(id).unwrap().unwrap();

        let caught = catch_unwind(AssertUnwindSafe(|| {
            engine.with_session(id, |session| -> Result<(), SessionError> {
                session.goal.push_str(" and then some");
                panic!("operation aborted");
            })
        }));
        assert!(caught.is_err());

        let after = engine.store().get(id).unwrap().unwrap();
        assert!(!after.in_flight);
        assert_eq!(after.goal, before.goal);
        assert_eq!(after.version, before.version + 2);
        assert!(engine.start(id, &Suggestion::default()).is_ok());
    }

    #[test]
    fn failed_upload_removes_session_directory() {
        let root = tempfile::tempdir().unwrap();
        let engine = SessionEngine::with_store(
            root.path(),
            EngineConfig::default(),
            RefusingStore::default(),
        );

        let err = engine.upload(&png(), "flat").unwrap_err();
        assert!(matches!(err, SessionError::Store(StoreError::Poisoned)));
        assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
    }

    fn descriptor() -> SemanticDescriptor {
        let axis = |axis: SemanticAxis, left: &str, right: &str| AxisDescriptor {
            axis,
            left_pole: left.to_owned(),
            right_pole: right.to_owned(),
            description: String::new(),
            left_synonym: None,
            right_synonym: None,
        };
        SemanticDescriptor {
            axes: [
                axis(SemanticAxis::CoolWarm, "Cool", "Warm"),
                axis(SemanticAxis::VibrantMuted, "Vibrant", "Muted"),
            ],
        }
    }

    #[test]
    fn position_names_the_pole() {
        assert_eq!(
            describe_position(&descriptor(), [0.5, -1.0]),
            "Cool-Warm +0.50 (Warm), Vibrant-Muted -1.00 (Vibrant)"
        );
        assert_eq!(
            describe_position(&descriptor(), [0.0, 0.0]),
            "Cool-Warm +0.00 (neutral), Vibrant-Muted +0.00 (neutral)"
        );
    }

    #[test]
    fn no_override_uses_current() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_base(dir.path(), "02_final.png", None).unwrap(),
            "02_final.png"
        );
        assert_eq!(
            resolve_base(dir.path(), "02_final.png", Some("")).unwrap(),
            "02_final.png"
        );
    }

    #[test]
    fn override_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("01_final.png"), b"x").unwrap();
        assert_eq!(
            resolve_base(dir.path(), "02_final.png", Some("01_final.png")).unwrap(),
            "01_final.png"
        );
        assert!(matches!(
            resolve_base(dir.path(), "02_final.png", Some("03_final.png")),
            Err(SessionError::BaseImageNotFound(_))
        ));
        assert!(matches!(
            resolve_base(dir.path(), "02_final.png", Some("../01_final.png")),
            Err(SessionError::InvalidBaseName(_))
        ));
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SessionEngine>();
    }
}
