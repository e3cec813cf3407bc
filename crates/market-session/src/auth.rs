//! # Authentication Collaborator (stub)
//!
//! The login boundary. There is no authentication backend in this system:
//! credentials are checked for shape only, and any non-blank pair signs in
//! with the sample profile. A real deployment swaps this module for a call
//! to its identity provider; the [`Session`](crate::Session) contract
//! (flag flip, cart cleared on logout) stays the same.

use serde::{Deserialize, Serialize};

use market_core::validation::{validate_email, validate_password};
use market_core::{CoreResult, User};

/// Login credentials supplied by the presentation surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Authenticates the credentials against the stub backend.
///
/// ## Behavior
/// - Blank email or password fails validation
/// - Anything else succeeds and yields the sample profile, carrying the
///   supplied email
pub(crate) fn authenticate(credentials: &Credentials) -> CoreResult<User> {
    validate_email(&credentials.email)?;
    validate_password(&credentials.password)?;

    Ok(sample_user(credentials.email.trim()))
}

/// The demo profile installed on every successful login.
fn sample_user(email: &str) -> User {
    User {
        id: "user_001".to_string(),
        full_name: "Alex Johnson".to_string(),
        email: email.to_string(),
        phone: "+1234567890".to_string(),
        profile_image: None,
        join_date: "January 2024".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credentials_rejected() {
        assert!(authenticate(&Credentials::new("", "secret")).is_err());
        assert!(authenticate(&Credentials::new("alex@example.com", "  ")).is_err());
    }

    #[test]
    fn test_non_blank_credentials_always_succeed() {
        let user = authenticate(&Credentials::new("alex@example.com", "secret")).unwrap();
        assert_eq!(user.email, "alex@example.com");
        assert_eq!(user.full_name, "Alex Johnson");
    }
}
