//! Per-user pending interaction state.
//!
//! Multi-step conversations (adding a task, editing its text, confirming a
//! deletion) are tracked as a [`domain::PendingInteraction`] keyed by user.
//! A user with no entry is idle. Entries expire after a period of
//! inactivity.

pub mod adapters;
pub mod domain;
pub mod ports;
