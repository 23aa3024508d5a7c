use imagingiq_core::session::Session;

/// Resolution of the session gate for one protected-view mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Query in flight; only the loading indicator may render.
    Pending,
    Authorized(Session),
    /// Refused; the redirect to sign-in has been issued.
    Unauthorized,
}

impl SessionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SessionState::Pending)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authorized(session) => Some(session),
            SessionState::Pending | SessionState::Unauthorized => None,
        }
    }
}
