//! darkroom-session: Iterative editing sessions on top of
//! `darkroom-pipeline`.
//!
//! A session holds one uploaded image and an editing goal. Each
//! iteration applies a parameter suggestion to the current image (or to
//! an earlier output, for branching) and writes the result into the
//! session directory. Semantic edits render the image at a position on
//! two descriptive axes without touching the iteration history.

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod session;
pub mod store;
pub mod suggestion;

pub use config::EngineConfig;
pub use engine::{
    HistorySummary, IterationOutcome, IterationReport, SemanticEditReport, SessionEngine,
    SessionInfo,
};
pub use error::{ErrorKind, SessionError};
pub use session::{HistoryEntry, Phase, Session, SessionId};
pub use store::{InMemorySessionStore, SessionStore, StoreError};
pub use suggestion::{ContinuationSignal, Suggestion, SuggestionStatus};
