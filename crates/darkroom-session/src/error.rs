//! Errors returned by the session engine.

use darkroom_pipeline::PipelineError;

use crate::session::SessionId;
use crate::store::StoreError;

/// Broad classification of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller asked for something the session protocol does not
    /// allow. Retrying the same call will fail the same way.
    Protocol,
    /// An image could not be decoded or written, or the store failed.
    Resource,
}

/// Errors that can occur during session operations.
///
/// A call that returns an error never leaves the stored session
/// advanced: history, iteration count, and current image are as they
/// were before the call.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session with this id exists.
    #[error("session not found: {0}")]
    UnknownSession(SessionId),

    /// The editing goal was empty or whitespace.
    #[error("editing goal is empty")]
    EmptyGoal,

    /// `iterate` was called before `start`.
    #[error("session {0} has not been started")]
    NotStarted(SessionId),

    /// A base override names a file that does not exist in the session
    /// directory.
    #[error("base image not found: {0}")]
    BaseImageNotFound(String),

    /// A base override is not a bare file name.
    #[error("invalid base image name: {0:?}")]
    InvalidBaseName(String),

    /// `semantic_edit` was called before `semantic_init`.
    #[error("semantic mode not initialized for session {0}")]
    SemanticNotInitialized(SessionId),

    /// Another operation on this session is still running.
    #[error("an operation is already in progress for session {0}")]
    IterationInProgress(SessionId),

    /// Decoding or encoding an image failed.
    #[error(transparent)]
    Image(#[from] PipelineError),

    /// Reading or writing a session file failed.
    #[error("session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The session store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownSession(_)
            | Self::EmptyGoal
            | Self::NotStarted(_)
            | Self::BaseImageNotFound(_)
            | Self::InvalidBaseName(_)
            | Self::SemanticNotInitialized(_)
            | Self::IterationInProgress(_) => ErrorKind::Protocol,
            Self::Image(_) | Self::Io(_) | Self::Store(_) => ErrorKind::Resource,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn protocol_errors() {
        let id = Uuid::nil();
        for err in [
            SessionError::UnknownSession(id),
            SessionError::EmptyGoal,
            SessionError::NotStarted(id),
            SessionError::BaseImageNotFound("01_final.png".to_owned()),
            SessionError::InvalidBaseName("../x".to_owned()),
            SessionError::SemanticNotInitialized(id),
            SessionError::IterationInProgress(id),
        ] {
            assert_eq!(err.kind(), ErrorKind::Protocol, "{err}");
        }
    }

    #[test]
    fn resource_errors() {
        let io = SessionError::from(std::io::Error::other("disk full"));
        assert_eq!(io.kind(), ErrorKind::Resource);
        assert_eq!(
            SessionError::from(PipelineError::EmptyInput).kind(),
            ErrorKind::Resource
        );
        assert_eq!(
            SessionError::from(StoreError::Poisoned).kind(),
            ErrorKind::Resource
        );
    }

    #[test]
    fn messages() {
        assert_eq!(SessionError::EmptyGoal.to_string(), "editing goal is empty");
        assert_eq!(
            SessionError::InvalidBaseName("a/b".to_owned()).to_string(),
            "invalid base image name: \"a/b\""
        );
    }
}
