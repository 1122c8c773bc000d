//! Chat transport.
//!
//! [`ChatTransport`] delivers rendered screens to a chat. The Telegram
//! adapter in [`telegram`] implements it with `teloxide` and also runs the
//! long-polling update loop that feeds the [`crate::dispatch::ActionRouter`].

mod listings;
pub mod telegram;

pub use listings::{LISTING_IDLE_TIMEOUT, ListingBatches};

use crate::view::Screen;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Identifier of a chat that screens are delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatRef(pub i64);

impl fmt::Display for ChatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while delivering a screen.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The Bot API rejected or failed a request.
    #[error("telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Delivers screens to chats.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends every message of `screen` to `chat` in order.
    ///
    /// A listing screen replaces the previous listing delivered to the same
    /// chat.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when a message cannot be sent.
    async fn deliver(&self, chat: ChatRef, screen: &Screen) -> TransportResult<()>;
}
