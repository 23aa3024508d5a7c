//! Session model and the provider capability.
//!
//! The identity provider is an external collaborator. Views never reach for
//! a global client; they receive an `Arc<dyn SessionProvider>` and the shell
//! owns the single change subscription.

mod memory;

use std::future::Future;
use std::pin::Pin;

pub use memory::MemorySessionProvider;
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::{ProviderError, SessionResolutionError};

/// Fallback shown when the provider has no display name for a user.
pub const DEFAULT_DISPLAY_NAME: &str = "Doctor";

/// Boxed future returned by provider calls (keeps the trait object safe).
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The user attached to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub email: String,
    pub display_name: Option<String>,
}

impl SessionUser {
    pub fn new(email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            email: email.into(),
            display_name,
        }
    }

    /// Display name, or `"Doctor"` when missing or blank.
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// First word of the display name, used in the `Dr. <name>` greeting.
    pub fn short_name(&self) -> &str {
        let name = self.display_name();
        name.split_whitespace().next().unwrap_or(name)
    }
}

/// Authenticated identity for the current process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub active: bool,
    pub user: SessionUser,
    pub access_token: Uuid,
}

impl Session {
    /// Creates an active session with a fresh access token.
    pub fn active(user: SessionUser) -> Self {
        Self {
            active: true,
            user,
            access_token: Uuid::new_v4(),
        }
    }

    /// Creates a session the provider reports as inactive.
    pub fn inactive(user: SessionUser) -> Self {
        Self {
            active: false,
            ..Self::active(user)
        }
    }
}

/// Identity provider capability.
///
/// Implementations must be cheap to share; the shell holds one instance for
/// the whole process and hands clones of the `Arc` to spawned tasks.
pub trait SessionProvider: Send + Sync {
    /// Returns the current session, if any.
    fn get_session(&self) -> ProviderFuture<'_, Result<Option<Session>, ProviderError>>;

    /// Exchanges credentials for a new session.
    fn sign_in<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> ProviderFuture<'a, Result<Session, ProviderError>>;

    /// Ends the current session.
    fn sign_out(&self) -> ProviderFuture<'_, Result<(), ProviderError>>;

    /// Subscribes to sign-in/sign-out changes.
    ///
    /// The receiver starts with the current user already observed as a value.
    fn subscribe(&self) -> watch::Receiver<Option<SessionUser>>;
}

/// Classifies a provider response for the session gate.
///
/// Fails closed: no session, an inactive session, and provider errors are all
/// refusals. Only an active session is accepted.
pub fn classify(
    response: Result<Option<Session>, ProviderError>,
) -> Result<Session, SessionResolutionError> {
    match response? {
        Some(session) if session.active => Ok(session),
        Some(session) => Err(SessionResolutionError::Inactive {
            email: session.user.email,
        }),
        None => Err(SessionResolutionError::NoSession),
    }
}
