//! Step definitions for guarded task change scenarios.

mod given;
mod then;
mod when;
pub mod world;
