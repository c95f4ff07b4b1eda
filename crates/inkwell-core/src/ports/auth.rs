//! Authentication and session ports.

use crate::domain::Role;

/// Claims carried by a session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub user_id: i32,
    pub name: String,
    pub role: Role,
    pub exp: i64,
}

/// Session token service: decides when a session starts and ends, and signs
/// the token the transport layer carries in a cookie.
pub trait SessionService: Send + Sync {
    /// Issue a session token for a logged-in user.
    fn issue(&self, user_id: i32, name: &str, role: Role) -> Result<String, AuthError>;

    /// Validate and decode a session token.
    fn validate(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Password hashing service - an opaque one-way function with a per-call salt.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("No session established")]
    MissingSession,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
