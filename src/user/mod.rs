//! User directory.
//!
//! Users are identified by their Telegram account ID. A profile is created on
//! first contact and refreshed on every later contact; the registration
//! timestamp never changes.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
