//! Domain model for chat users.

mod user;

pub use user::{User, UserId, UserProfile};
