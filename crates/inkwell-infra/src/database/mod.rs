//! Database adapters - SeaORM over Postgres, plus in-memory repositories.

mod connections;
pub mod entity;
mod memory;
mod postgres_base;
mod postgres_repo;

pub use connections::DatabaseConfig;
pub use memory::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository, MemoryTables,
};
pub use postgres_repo::{PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository};
