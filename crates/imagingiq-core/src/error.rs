//! Error taxonomy for the clinical shell.
//!
//! None of these are fatal: each one degrades to a defined state in the
//! reducer (unauthorized, a hidden flag, or an inline message).

use thiserror::Error;

/// Failure reported by the session provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Provider could not be reached or refused the call.
    #[error("session provider unavailable: {0}")]
    Unavailable(String),
    /// Email/password pair did not match an account.
    #[error("Invalid login credentials")]
    InvalidCredentials,
}

/// Why the session gate refused a protected view.
///
/// Every variant resolves the gate to `Unauthorized`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionResolutionError {
    #[error("no session")]
    NoSession,
    #[error("session for {email} is not active")]
    Inactive { email: String },
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Provider sign-out call failed.
///
/// Surfaced as a dismissible notice; local state is cleared regardless.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sign-out failed: {source}")]
pub struct SignOutError {
    #[from]
    pub source: ProviderError,
}

/// Local form validation failure, shown inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email is required.")]
    EmptyEmail,
    #[error("Enter a valid email address.")]
    MalformedEmail,
    #[error("Password is required.")]
    EmptyPassword,
    /// Demo request: the address has no `@` at all.
    #[error("Please enter a valid email address")]
    NoAtSign,
    /// Demo request: has an `@` but is not `name@domain.tld`.
    #[error("Please enter a valid email address (e.g., name@example.com)")]
    NotAnAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_out_error_wraps_provider_message() {
        let err = SignOutError::from(ProviderError::Unavailable("timeout".to_string()));
        assert_eq!(
            err.to_string(),
            "sign-out failed: session provider unavailable: timeout"
        );
    }

    #[test]
    fn test_resolution_error_is_transparent_for_provider() {
        let err = SessionResolutionError::from(ProviderError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid login credentials");
    }
}
