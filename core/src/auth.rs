//! Credential Verification
//!
//! The dashboard does not own identity. It hands credentials to a
//! [`CredentialVerifier`] and trusts the answer. [`StaticCredentialVerifier`]
//! is the stand-in used until a real identity service is wired up: a plain
//! comparison against configured values, with no security claims.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A required field was left empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Username/password did not match
    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Username + password as typed by the user
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl Credentials {
    /// Bundle a username and password
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reject empty fields before asking a verifier
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] naming the first empty field.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.username.trim().is_empty() {
            return Err(AuthError::MissingField("username"));
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Who a verifier says the user is
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Canonical username
    pub username: String,
}

/// Delegation seam to whatever checks credentials
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Check credentials and return the verified identity
    async fn verify(&self, credentials: &Credentials) -> Result<Identity, AuthError>;
}

/// Compares against one configured username/password pair
#[derive(Clone)]
pub struct StaticCredentialVerifier {
    username: String,
    password: String,
}

impl StaticCredentialVerifier {
    /// Accept exactly this pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for StaticCredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentialVerifier")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        credentials.validate()?;

        if credentials.username.trim() == self.username && credentials.password == self.password {
            Ok(Identity {
                username: self.username.clone(),
            })
        } else {
            tracing::info!(username = %credentials.username, "Rejected sign-in");
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_accepts_match() {
        let verifier = StaticCredentialVerifier::new("demo", "demo");
        let identity = verifier
            .verify(&Credentials::new(" demo ", "demo"))
            .await
            .unwrap();
        assert_eq!(identity.username, "demo");
    }

    #[tokio::test]
    async fn test_static_rejects_mismatch() {
        let verifier = StaticCredentialVerifier::new("demo", "demo");
        let err = verifier
            .verify(&Credentials::new("demo", "nope"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_empty_fields_rejected_first() {
        let verifier = StaticCredentialVerifier::new("", "");
        assert_eq!(
            verifier.verify(&Credentials::new("", "")).await,
            Err(AuthError::MissingField("username"))
        );
        assert_eq!(
            verifier.verify(&Credentials::new("x", "")).await,
            Err(AuthError::MissingField("password"))
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("demo", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
