//! Signed session token implementation.
//!
//! The session transport is a plain HttpOnly cookie; what this module owns is
//! the value inside it: a signed, expiring token binding the cookie to a user
//! id, display name, and role. Validation failure of any kind ends the
//! session.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use inkwell_core::domain::Role;
use inkwell_core::ports::{AuthError, SessionClaims, SessionService};

/// Session signing configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_hours: i64,
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            ttl_hours: 24,
            issuer: "inkwell".to_string(),
        }
    }
}

/// Internal claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    name: String,
    role: String,
    exp: i64,
    iat: i64,
    iss: String,
}

/// Session service signing tokens with a shared secret.
pub struct SignedSessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: SessionConfig,
}

impl SignedSessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .unwrap_or_else(|_| "change-me-in-production".to_string());

        if secret == "change-me-in-production" {
            tracing::warn!("Using default session secret. Set SESSION_SECRET for production use.");
        }

        let config = SessionConfig {
            secret,
            ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
            issuer: "inkwell".to_string(),
        };
        Self::new(config)
    }
}

impl SessionService for SignedSessionService {
    fn issue(&self, user_id: i32, name: &str, role: Role) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.ttl_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            role: role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let user_id: i32 = token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken("non-numeric subject".to_string()))?;

        let role = Role::from_str(&token_data.claims.role)
            .ok_or_else(|| AuthError::InvalidToken("unknown role".to_string()))?;

        Ok(SessionClaims {
            user_id,
            name: token_data.claims.name,
            role,
            exp: token_data.claims.exp,
        })
    }
}
