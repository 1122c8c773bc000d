//! `PostgreSQL` repository implementation for user profiles.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::storage::{PgPool, StorageError, run_blocking};
use crate::user::{
    domain::{User, UserId, UserProfile},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<StorageError> for UserRepositoryError {
    fn from(err: StorageError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn upsert(
        &self,
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> UserRepositoryResult<User> {
        let row = NewUserRow {
            id: profile.id.value(),
            name: profile.name.clone(),
            username: profile.username.clone(),
            language_code: profile.language_code.clone(),
            registered_at: now,
            last_seen_at: now,
        };

        run_blocking(&self.pool, move |connection| {
            let stored = diesel::insert_into(users::table)
                .values(&row)
                .on_conflict(users::id)
                .do_update()
                .set((
                    users::name.eq(excluded(users::name)),
                    users::username.eq(excluded(users::username)),
                    users::language_code.eq(excluded(users::language_code)),
                    users::last_seen_at.eq(excluded(users::last_seen_at)),
                ))
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            Ok(row_to_user(stored))
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .find(id.value())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            Ok(row.map(row_to_user))
        })
        .await
    }
}

fn row_to_user(row: UserRow) -> User {
    let profile = UserProfile {
        id: UserId::new(row.id),
        name: row.name,
        username: row.username,
        language_code: row.language_code,
    };
    User::from_persisted(profile, row.registered_at, row.last_seen_at)
}
