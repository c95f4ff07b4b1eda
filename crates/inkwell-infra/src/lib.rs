//! # Inkwell Infrastructure
//!
//! Concrete implementations of the ports defined in `inkwell-core`:
//! SeaORM repositories over Postgres, in-memory repositories for the
//! database-less mode and for tests, Argon2 password hashing, and the
//! signed session token service.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, SessionConfig, SignedSessionService};
pub use database::{
    DatabaseConfig, InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository,
    MemoryTables, PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};
