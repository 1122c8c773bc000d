//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge failed.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A required setting is missing.
    #[error("missing required setting '{0}'")]
    Missing(&'static str),

    /// A setting has an unusable value.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted setting name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}
