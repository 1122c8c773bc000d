//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Telegram user identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Public handle.
    pub username: Option<String>,
    /// Client language tag.
    pub language_code: Option<String>,
    /// First contact timestamp.
    pub registered_at: DateTime<Utc>,
    /// Latest contact timestamp.
    pub last_seen_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Telegram user identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Public handle.
    pub username: Option<String>,
    /// Client language tag.
    pub language_code: Option<String>,
    /// First contact timestamp.
    pub registered_at: DateTime<Utc>,
    /// Latest contact timestamp.
    pub last_seen_at: DateTime<Utc>,
}
