//! Storage port for pending interactions.

use super::domain::PendingInteraction;
use crate::user::domain::UserId;
use async_trait::async_trait;

/// Per-user pending interaction store with inactivity expiry.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Returns the user's pending interaction, if any and not expired.
    async fn get(&self, user: UserId) -> Option<PendingInteraction>;

    /// Replaces the user's pending interaction.
    async fn set(&self, user: UserId, interaction: PendingInteraction);

    /// Returns the user to idle.
    async fn clear(&self, user: UserId);
}
