use printstock_core::SessionId;

/// Session context for a request.
///
/// Inserted for every `/api` request by the session middleware. The id is
/// whatever the caller presented; it may be unknown or expired, which the
/// access gate decides.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    session_id: Option<SessionId>,
}

impl SessionContext {
    pub fn new(session_id: Option<SessionId>) -> Self {
        Self { session_id }
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }
}
