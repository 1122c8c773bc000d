//! `DoTask`: a Telegram bot for personal task management.
//!
//! Users create tasks with optional due dates and priorities, then list,
//! complete, snooze, edit and delete them through a reply-keyboard menu and
//! inline task cards.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, filtering and pagination
//! - [`user`]: User directory maintained on every contact
//! - [`session`]: Pending multi-step interactions with idle expiry
//! - [`view`]: Pure rendering of cards, listings and pickers
//! - [`dispatch`]: Input classification, callback codec and routing
//! - [`transport`]: Telegram delivery and update loop
//! - [`reporting`]: Sink for unrecoverable failures
//! - [`config`]: Layered settings
//! - [`storage`]: Shared Diesel connection pool and schema

pub mod config;
pub mod dispatch;
pub mod reporting;
pub mod session;
pub mod storage;
pub mod task;
pub mod transport;
pub mod user;
pub mod view;

#[cfg(test)]
mod test_support;
