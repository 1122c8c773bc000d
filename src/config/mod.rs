//! Layered configuration loading using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`DOTASK_*` prefix, `__` separates sections)
//! 2. `dotask.toml` in the working directory, or the file named by
//!    `DOTASK_CONFIG`
//! 3. Built-in defaults
//!
//! `DOTASK_TELEGRAM__TOKEN` maps to `telegram.token`,
//! `DOTASK_TASKS__UTC_OFFSET_MINUTES` to `tasks.utc_offset_minutes`, and so
//! on. [`Settings::load_with_dotenv`] reads `.env` first.

mod error;

pub use error::ConfigError;

use crate::session::adapters::DEFAULT_IDLE_TIMEOUT;
use crate::task::domain::{LocalCalendar, SnoozeAnchor};
use crate::task::services::{DEFAULT_PAGE_SIZE, TaskPolicy};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest accepted listing page.
const MAX_PAGE_SIZE: u32 = 20;

/// Telegram Bot API settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramSettings {
    /// Bot token issued by `@BotFather`.
    pub token: String,
}

/// Where tasks and users are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process memory; lost on restart.
    #[default]
    Memory,
    /// `PostgreSQL` through Diesel.
    Postgres,
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Selected backend.
    pub backend: StorageBackend,
    /// Connection URL, required for `postgres`.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            database_url: None,
            pool_size: 8,
        }
    }
}

/// Task listing and lifecycle settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSettings {
    /// Tasks per listing page.
    pub page_size: u32,
    /// Local time zone as minutes east of UTC.
    pub utc_offset_minutes: i32,
    /// Reference point for snooze offsets.
    pub snooze_anchor: SnoozeAnchor,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            utc_offset_minutes: 0,
            snooze_anchor: SnoozeAnchor::DueDate,
        }
    }
}

/// Pending interaction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Seconds of inactivity after which a pending interaction is dropped.
    pub idle_timeout_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT.as_secs(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// `tracing-subscriber` filter directive; `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info,dotask=debug".to_owned(),
        }
    }
}

/// Complete application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Telegram settings.
    #[serde(default)]
    pub telegram: TelegramSettings,
    /// Persistence settings.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Task settings.
    #[serde(default)]
    pub tasks: TaskSettings,
    /// Pending interaction settings.
    #[serde(default)]
    pub session: SessionSettings,
    /// Logging settings.
    #[serde(default)]
    pub log: LogSettings,
}

impl Settings {
    /// Builds the provider chain: defaults, TOML file, environment.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(Env::var_or("DOTASK_CONFIG", "dotask.toml")))
            .merge(Env::prefixed("DOTASK_").ignore(&["CONFIG"]).split("__"))
    }

    /// Loads and validates settings from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Self = Self::figment().extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads `.env` when present, then loads settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction or validation fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            return Err(ConfigError::InvalidValue {
                field: ".env",
                reason: err.to_string(),
            });
        }
        Self::load()
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a missing token, a `postgres` backend
    /// without a URL, or out-of-range numbers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram.token.trim().is_empty() {
            return Err(ConfigError::Missing("telegram.token"));
        }
        if self.storage.backend == StorageBackend::Postgres && self.database_url().is_none() {
            return Err(ConfigError::Missing("storage.database_url"));
        }
        if self.storage.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.pool_size",
                reason: "must be at least 1".to_owned(),
            });
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.tasks.page_size) {
            return Err(ConfigError::InvalidValue {
                field: "tasks.page_size",
                reason: format!("must be between 1 and {MAX_PAGE_SIZE}"),
            });
        }
        if self.session.idle_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.idle_timeout_secs",
                reason: "must be at least 1".to_owned(),
            });
        }
        self.calendar().map(|_| ())
    }

    /// Returns the database URL when one is configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.storage
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Returns the configured local calendar.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the offset exceeds a day.
    pub fn calendar(&self) -> Result<LocalCalendar, ConfigError> {
        LocalCalendar::from_offset_minutes(self.tasks.utc_offset_minutes).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "tasks.utc_offset_minutes",
                reason: format!("{} is outside ±1439", self.tasks.utc_offset_minutes),
            }
        })
    }

    /// Returns the task policy described by these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the offset is invalid.
    pub fn policy(&self) -> Result<TaskPolicy, ConfigError> {
        Ok(TaskPolicy {
            snooze_anchor: self.tasks.snooze_anchor,
            calendar: self.calendar()?,
            page_size: self.tasks.page_size,
        })
    }

    /// Returns the pending interaction idle window.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session.idle_timeout_secs)
    }
}
