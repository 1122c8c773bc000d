//! Persistence adapters for the user directory.

pub mod memory;
pub mod postgres;
