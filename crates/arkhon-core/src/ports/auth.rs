//! Credential issuance, verification and password hashing ports.

use crate::domain::UserId;

/// Claims recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Decimal string form of the user id.
    pub subject: String,
    pub exp: i64,
}

impl TokenClaims {
    /// Parse the subject back into a user id.
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.subject
            .parse()
            .map_err(|_| TokenError::Unhandled(format!("non-numeric subject: {}", self.subject)))
    }
}

/// Token service trait for signed, time-limited credentials.
pub trait TokenService: Send + Sync {
    /// Issue a token whose subject is `user_id`.
    fn issue(&self, user_id: UserId) -> Result<String, AuthError>;

    /// Verify signature, algorithm and validity window, returning the claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    ///
    /// Returns `Ok(false)` on mismatch and `Err` only when the hash itself
    /// cannot be processed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Failures while producing credentials.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Signing error: {0}")]
    Signing(String),
}

/// Reasons a presented token is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token is expired or not active yet: {0}")]
    ExpiredOrNotYetValid(String),

    #[error("couldn't handle this token: {0}")]
    Unhandled(String),
}
