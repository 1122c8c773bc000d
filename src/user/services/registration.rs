//! Registers users on contact.

use crate::user::{
    domain::{User, UserId, UserProfile},
    ports::{UserRepository, UserRepositoryResult},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Keeps the user directory in step with incoming contacts.
#[derive(Clone)]
pub struct UserRegistrationService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserRegistrationService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new registration service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records a contact, registering the user when first seen.
    ///
    /// # Errors
    ///
    /// Returns [`crate::user::ports::UserRepositoryError`] when persistence
    /// fails.
    pub async fn touch(&self, profile: &UserProfile) -> UserRepositoryResult<User> {
        let user = self.repository.upsert(profile, self.clock.utc()).await?;
        debug!(user = %user.id(), registered_at = %user.registered_at(), "user contact recorded");
        Ok(user)
    }

    /// Looks up a registered user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::user::ports::UserRepositoryError`] when persistence
    /// fails.
    pub async fn find(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.repository.find_by_id(id).await
    }
}
