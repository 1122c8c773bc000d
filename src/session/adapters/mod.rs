//! Interaction store adapters.

mod cache;

pub use cache::{DEFAULT_IDLE_TIMEOUT, MokaInteractionStore};
