//! In-process interaction store backed by [`moka`].

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use crate::session::{domain::PendingInteraction, ports::InteractionStore};
use crate::user::domain::UserId;

/// Default idle window after which a pending interaction is dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Maximum number of users with a pending interaction.
const MAX_ENTRIES: u64 = 10_000;

/// Interaction store that forgets entries after a period without access.
#[derive(Debug, Clone)]
pub struct MokaInteractionStore {
    cache: Cache<UserId, PendingInteraction>,
}

impl MokaInteractionStore {
    /// Creates a store whose entries expire after `idle_timeout` without a
    /// read or write.
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_idle(idle_timeout)
            .build();
        Self { cache }
    }
}

impl Default for MokaInteractionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

#[async_trait]
impl InteractionStore for MokaInteractionStore {
    async fn get(&self, user: UserId) -> Option<PendingInteraction> {
        self.cache.get(&user).await
    }

    async fn set(&self, user: UserId, interaction: PendingInteraction) {
        self.cache.insert(user, interaction).await;
    }

    async fn clear(&self, user: UserId) {
        self.cache.invalidate(&user).await;
    }
}
