//! Per-chat record of the last delivered listing.

use super::ChatRef;
use moka::future::Cache;
use std::time::Duration;
use teloxide::types::MessageId;

/// Telegram only lets bots delete their messages for 48 hours.
pub const LISTING_IDLE_TIMEOUT: Duration = Duration::from_secs(48 * 60 * 60);

const MAX_CHATS: u64 = 100_000;

/// Message ids of each chat's last listing, forgotten after inactivity.
#[derive(Debug, Clone)]
pub struct ListingBatches {
    cache: Cache<ChatRef, Vec<MessageId>>,
}

impl ListingBatches {
    /// Creates a record whose entries expire after `idle_timeout`.
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_CHATS)
            .time_to_idle(idle_timeout)
            .build();
        Self { cache }
    }

    /// Removes and returns the chat's previous listing.
    pub async fn take(&self, chat: ChatRef) -> Vec<MessageId> {
        self.cache.remove(&chat).await.unwrap_or_default()
    }

    /// Records the messages of a newly delivered listing.
    pub async fn record(&self, chat: ChatRef, messages: Vec<MessageId>) {
        self.cache.insert(chat, messages).await;
    }
}

impl Default for ListingBatches {
    fn default() -> Self {
        Self::new(LISTING_IDLE_TIMEOUT)
    }
}
