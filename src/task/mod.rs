//! Personal task management.
//!
//! Users create tasks with optional due dates and priorities, complete and
//! reopen them, snooze pending ones, edit their text, and delete them after
//! confirmation. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
