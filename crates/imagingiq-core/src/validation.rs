//! Local validation for the sign-in and demo-request forms.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

const DEMO_EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn demo_email_shape() -> Option<&'static Regex> {
    static SHAPE: OnceLock<Option<Regex>> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(DEMO_EMAIL_PATTERN).ok()).as_ref()
}

/// Checks that `email` looks like `local@domain.tld`.
///
/// Leading/trailing whitespace is ignored. This is a shape check only; the
/// provider is the authority on whether the account exists.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::MalformedEmail);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::MalformedEmail);
    };
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::MalformedEmail);
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(ValidationError::MalformedEmail);
    }

    Ok(())
}

/// Validates the full credential pair, email first.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    Ok(())
}

/// Checks the address typed into the demo-request form.
///
/// Two tiers: a missing `@` gets the short message, anything else that is
/// not `name@domain.tld` gets the message with an example. The input is
/// checked as typed, without trimming.
pub fn validate_demo_email(email: &str) -> Result<(), ValidationError> {
    if !email.contains('@') {
        return Err(ValidationError::NoAtSign);
    }
    if !demo_email_shape().is_some_and(|shape| shape.is_match(email)) {
        return Err(ValidationError::NotAnAddress);
    }
    Ok(())
}
