//! Authentication adapters - Argon2 hashing and signed session tokens.

mod password;
mod session;

pub use password::Argon2PasswordService;
pub use session::{SessionConfig, SignedSessionService};
