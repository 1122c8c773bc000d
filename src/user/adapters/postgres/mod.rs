//! `PostgreSQL` adapter for user profiles.

mod models;
mod repository;
mod schema;

pub use repository::PostgresUserRepository;
