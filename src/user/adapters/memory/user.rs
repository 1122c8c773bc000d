//! In-memory user repository for development and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::{User, UserId, UserProfile},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn upsert(
        &self,
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> UserRepositoryResult<User> {
        let mut users = self.state.write().map_err(lock_error)?;
        let user = users
            .entry(profile.id)
            .and_modify(|existing| existing.refresh(profile.clone(), now))
            .or_insert_with(|| User::register(profile.clone(), now));
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let users = self.state.read().map_err(lock_error)?;
        Ok(users.get(&id).cloned())
    }
}
