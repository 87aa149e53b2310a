use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use printstock_core::SessionId;

use crate::Role;

/// Server-side session: binds an opaque id to one role until expiry or logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    #[error("session has expired")]
    Expired,

    #[error("session not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid session time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate a session's time window at `now`.
pub fn validate_session(session: &Session, now: DateTime<Utc>) -> Result<(), SessionValidationError> {
    if session.expires_at <= session.issued_at {
        return Err(SessionValidationError::InvalidTimeWindow);
    }
    if now < session.issued_at {
        return Err(SessionValidationError::NotYetValid);
    }
    if now >= session.expires_at {
        return Err(SessionValidationError::Expired);
    }
    Ok(())
}

/// Session storage keyed by session id.
pub trait SessionStore: Send + Sync {
    fn insert(&self, session: Session);
    fn get(&self, id: &SessionId) -> Option<Session>;
    fn remove(&self, id: &SessionId) -> Option<Session>;
    /// Drop every session that is no longer valid at `now`. Returns how many were dropped.
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;
}

impl<S> SessionStore for Arc<S>
where
    S: SessionStore + ?Sized,
{
    fn insert(&self, session: Session) {
        (**self).insert(session)
    }

    fn get(&self, id: &SessionId) -> Option<Session> {
        (**self).get(id)
    }

    fn remove(&self, id: &SessionId) -> Option<Session> {
        (**self).remove(id)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        (**self).purge_expired(now)
    }
}

/// Process-local session store. Sessions do not survive a restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, session: Session) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(session.id, session);
        }
    }

    fn get(&self, id: &SessionId) -> Option<Session> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn remove(&self, id: &SessionId) -> Option<Session> {
        let mut map = self.inner.write().ok()?;
        map.remove(id)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let Ok(mut map) = self.inner.write() else {
            return 0;
        };
        let before = map.len();
        map.retain(|_, s| validate_session(s, now).is_ok());
        before - map.len()
    }
}
