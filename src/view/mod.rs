//! Rendering of chat screens.
//!
//! Everything here is pure: functions take domain values plus the current
//! instant and return transport-agnostic [`Screen`] descriptors. The
//! transport turns those into Telegram messages.

mod card;
mod list_view;
mod listing;
mod pickers;
mod renderer;
mod screen;
mod templates;

pub use card::{TaskCard, priority_glyph, status_glyph};
pub use list_view::ListView;
pub use pickers::main_menu;
pub use renderer::Renderer;
pub use screen::{Button, InlineKeyboard, Markup, OutboundMessage, Screen};
