//! User identity and profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// External chat-platform user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw platform identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Profile fields reported by the chat platform on each contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Platform identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Public handle, without the leading `@`.
    pub username: Option<String>,
    /// IETF language tag reported by the client.
    pub language_code: Option<String>,
}

impl UserProfile {
    /// Creates a profile with only the required fields.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            username: None,
            language_code: None,
        }
    }

    /// Sets the public handle.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the language tag.
    #[must_use]
    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }
}

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    profile: UserProfile,
    registered_at: DateTime<Utc>,
    last_seen_at: DateTime<Utc>,
}

impl User {
    /// Registers a first-time user.
    #[must_use]
    pub const fn register(profile: UserProfile, now: DateTime<Utc>) -> Self {
        Self {
            profile,
            registered_at: now,
            last_seen_at: now,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        profile: UserProfile,
        registered_at: DateTime<Utc>,
        last_seen_at: DateTime<Utc>,
    ) -> Self {
        Self {
            profile,
            registered_at,
            last_seen_at,
        }
    }

    /// Replaces profile fields from a later contact, keeping the
    /// registration timestamp.
    pub fn refresh(&mut self, profile: UserProfile, now: DateTime<Utc>) {
        self.profile = profile;
        self.last_seen_at = now;
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.profile.id
    }

    /// Returns the latest profile.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Returns the first registration timestamp.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Returns the latest contact timestamp.
    #[must_use]
    pub const fn last_seen_at(&self) -> DateTime<Utc> {
        self.last_seen_at
    }
}
