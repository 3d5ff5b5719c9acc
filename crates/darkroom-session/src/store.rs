//! Session persistence.
//!
//! The engine never holds a lock while it works on pixels. It reads a
//! session, claims it by swapping in a copy with the in-flight flag
//! set, does the work, and swaps the result back in. Both swaps are
//! [`SessionStore::compare_and_swap`] calls keyed on the session's
//! `version`, so a competing call on the same session loses the race
//! and is rejected instead of waiting.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::session::{Session, SessionId};

/// Errors from a [`SessionStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A thread panicked while holding the store lock.
    #[error("session store lock poisoned")]
    Poisoned,

    /// A claimed session changed underneath its owner.
    #[error("session {0} was modified concurrently")]
    Conflict(SessionId),
}

/// Storage for session records.
pub trait SessionStore: Send + Sync {
    /// Fetch a copy of the session with this id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage fails.
    fn get(&self, id: SessionId) -> Result<Option<Session>, StoreError>;

    /// Insert or replace a session unconditionally.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage fails.
    fn put(&self, session: Session) -> Result<(), StoreError>;

    /// Replace the stored session with `session` only if the stored
    /// record's version equals `expected_version`.
    ///
    /// Returns `false` (and stores nothing) when the versions differ or
    /// the session does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage fails.
    fn compare_and_swap(&self, expected_version: u64, session: Session)
    -> Result<bool, StoreError>;
}

/// Process-local store.
///
/// Every lock is held for one map read or one swap only.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        let sessions = self.sessions.read().map_err(|_| StoreError::Poisoned)?;
        Ok(sessions.get(&id).cloned())
    }

    fn put(&self, session: Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().map_err(|_| StoreError::Poisoned)?;
        sessions.insert(session.id, session);
        Ok(())
    }

    fn compare_and_swap(
        &self,
        expected_version: u64,
        session: Session,
    ) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.write().map_err(|_| StoreError::Poisoned)?;
        match sessions.get_mut(&session.id) {
            Some(stored) if stored.version == expected_version => {
                *stored = session;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
