//! Shared `PostgreSQL` plumbing for the Diesel-backed adapters.
//!
//! Repositories offload synchronous Diesel work onto the blocking thread
//! pool. The schema lives under `migrations/` and is applied at start-up.

use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating the user and task tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-01-10-000000_create_users_and_tasks/up.sql");

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The connection pool could not be built or a connection was
    /// unavailable.
    #[error("database pool error: {0}")]
    Pool(#[from] PoolError),

    /// Applying the schema failed.
    #[error("schema migration failed: {0}")]
    Migration(#[from] diesel::result::Error),

    /// The blocking worker panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`StorageError::Pool`] when the pool cannot open its initial
/// connections.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, StorageError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().max_size(max_size).build(manager)?)
}

/// Applies the bundled schema. Statements are idempotent.
///
/// # Errors
///
/// Returns [`StorageError`] when a connection cannot be obtained or the SQL
/// fails.
pub async fn apply_schema(pool: &PgPool) -> Result<(), StorageError> {
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared.get()?;
        connection.batch_execute(CREATE_SCHEMA_SQL)?;
        Ok(())
    })
    .await?
}

/// Runs a blocking database operation on a pooled connection.
///
/// Pool and join failures are converted into the caller's error type.
pub(crate) async fn run_blocking<F, T, E>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<StorageError> + Send + 'static,
{
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared.get().map_err(StorageError::from)?;
        f(&mut connection)
    })
    .await
    .map_err(|err| E::from(StorageError::from(err)))?
}
