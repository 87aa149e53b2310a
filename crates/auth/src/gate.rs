//! The access gate: credential check → session, session → role decision.
//!
//! Per-session lifecycle:
//!
//! ```text
//! Anonymous --(staff credential)--> Staff
//! Anonymous --(admin credential)--> Admin
//! Staff | Admin --(logout | expiry)--> Anonymous
//! ```
//!
//! A session's role never changes. Logging in again issues a new session.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use printstock_core::SessionId;

use crate::{authorize, validate_session, AuthzError, CredentialVerifier, Role, Session, SessionStore};

/// Default session lifetime in hours.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong credential, or a role that cannot be logged into.
    #[error("invalid credential")]
    InvalidCredential,
}

#[derive(Clone)]
pub struct AccessGate {
    sessions: Arc<dyn SessionStore>,
    verifier: Arc<dyn CredentialVerifier>,
    ttl: Duration,
}

impl AccessGate {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        verifier: Arc<dyn CredentialVerifier>,
        ttl: Duration,
    ) -> Self {
        Self { sessions, verifier, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Check `credential` for the requested role and open a fresh session.
    pub fn authenticate(
        &self,
        role: &str,
        credential: &str,
        now: DateTime<Utc>,
    ) -> Result<Session, AuthError> {
        let Some(role) = Role::parse_login(role) else {
            tracing::warn!(requested_role = role, "login rejected: unknown role");
            return Err(AuthError::InvalidCredential);
        };

        if !self.verifier.verify(role, credential) {
            tracing::warn!(requested_role = %role, "login rejected: bad credential");
            return Err(AuthError::InvalidCredential);
        }

        let purged = self.sessions.purge_expired(now);
        if purged > 0 {
            tracing::debug!(purged, "dropped expired sessions");
        }

        let session = Session {
            id: SessionId::new(),
            role,
            issued_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.insert(session.clone());
        tracing::info!(role = %role, expires_at = %session.expires_at, "session opened");
        Ok(session)
    }

    /// The live session for `id`, if any. Expired sessions are dropped on sight.
    pub fn current(&self, id: Option<&SessionId>, now: DateTime<Utc>) -> Option<Session> {
        let id = id?;
        let session = self.sessions.get(id)?;
        match validate_session(&session, now) {
            Ok(()) => Some(session),
            Err(e) => {
                tracing::debug!(error = %e, "discarding session");
                self.sessions.remove(id);
                None
            }
        }
    }

    /// Role of the caller behind `id`; `Role::None` when there is no live session.
    pub fn role_of(&self, id: Option<&SessionId>, now: DateTime<Utc>) -> Role {
        self.current(id, now).map(|s| s.role).unwrap_or_default()
    }

    /// Require at least `minimum` from the caller behind `id`.
    pub fn authorize(
        &self,
        id: Option<&SessionId>,
        minimum: Role,
        now: DateTime<Utc>,
    ) -> Result<Role, AuthzError> {
        let role = self.role_of(id, now);
        authorize(role, minimum)?;
        Ok(role)
    }

    /// Invalidate a session immediately. Returns whether it existed.
    pub fn logout(&self, id: &SessionId) -> bool {
        let existed = self.sessions.remove(id).is_some();
        if existed {
            tracing::info!("session closed");
        }
        existed
    }
}

impl core::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccessGate").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemorySessionStore, SecretCredentials};

    fn gate() -> AccessGate {
        AccessGate::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(SecretCredentials::new("staff-pw", "admin-pw")),
            Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        )
    }

    #[test]
    fn matching_credential_opens_session_with_that_role() {
        let gate = gate();
        let now = Utc::now();
        let s = gate.authenticate("admin", "admin-pw", now).unwrap();
        assert_eq!(s.role, Role::Admin);
        assert_eq!(s.expires_at - s.issued_at, Duration::hours(8));
        assert_eq!(gate.current(Some(&s.id), now), Some(s));
    }

    #[test]
    fn wrong_credential_or_role_is_rejected() {
        let gate = gate();
        let now = Utc::now();
        assert_eq!(gate.authenticate("staff", "admin-pw", now), Err(AuthError::InvalidCredential));
        assert_eq!(gate.authenticate("admin", "staff-pw", now), Err(AuthError::InvalidCredential));
        assert_eq!(gate.authenticate("none", "", now), Err(AuthError::InvalidCredential));
        assert_eq!(gate.authenticate("root", "admin-pw", now), Err(AuthError::InvalidCredential));
    }

    #[test]
    fn staff_session_can_read_but_not_write() {
        let gate = gate();
        let now = Utc::now();
        let s = gate.authenticate("staff", "staff-pw", now).unwrap();

        assert_eq!(gate.authorize(Some(&s.id), Role::Staff, now), Ok(Role::Staff));
        assert_eq!(
            gate.authorize(Some(&s.id), Role::Admin, now),
            Err(AuthzError::InsufficientRole { required: Role::Admin, actual: Role::Staff })
        );
    }

    #[test]
    fn missing_or_unknown_session_is_unauthenticated() {
        let gate = gate();
        let now = Utc::now();
        assert_eq!(gate.authorize(None, Role::Staff, now), Err(AuthzError::Unauthenticated));
        assert_eq!(
            gate.authorize(Some(&SessionId::new()), Role::Staff, now),
            Err(AuthzError::Unauthenticated)
        );
    }

    #[test]
    fn logout_revokes_for_every_role() {
        let gate = gate();
        let now = Utc::now();
        let s = gate.authenticate("admin", "admin-pw", now).unwrap();
        assert!(gate.logout(&s.id));
        assert!(!gate.logout(&s.id));

        for required in [Role::None, Role::Staff, Role::Admin] {
            assert_eq!(gate.authorize(Some(&s.id), required, now), Err(AuthzError::Unauthenticated));
        }
    }

    #[test]
    fn session_expires_after_ttl() {
        let gate = gate();
        let now = Utc::now();
        let s = gate.authenticate("admin", "admin-pw", now).unwrap();

        let later = now + Duration::hours(DEFAULT_SESSION_TTL_HOURS);
        assert_eq!(gate.authorize(Some(&s.id), Role::Staff, later), Err(AuthzError::Unauthenticated));
        assert_eq!(gate.current(Some(&s.id), now), None);
    }

    #[test]
    fn each_login_creates_a_fresh_session() {
        let gate = gate();
        let now = Utc::now();
        let staff = gate.authenticate("staff", "staff-pw", now).unwrap();
        let admin = gate.authenticate("admin", "admin-pw", now).unwrap();
        assert_ne!(staff.id, admin.id);
        assert_eq!(gate.role_of(Some(&staff.id), now), Role::Staff);
        assert_eq!(gate.role_of(Some(&admin.id), now), Role::Admin);
    }
}
