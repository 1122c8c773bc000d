//! Listing header and navigation controls.

use super::ListView;
use super::screen::{Button, InlineKeyboard, OutboundMessage};
use crate::dispatch::CallbackAction;
use crate::task::domain::{TaskPage, TaskStatus};

/// Builds the header message that sits above a page of cards.
#[must_use]
pub fn header(page: &TaskPage, view: ListView) -> OutboundMessage {
    let title = match view.status {
        TaskStatus::Pending => "📋 Pending tasks",
        TaskStatus::Done => "✅ Completed tasks",
    };
    let mut text = format!(
        "<b>{title}</b> ({})\nPriority: {} · Due: {}\nPage {}/{}",
        page.total,
        view.priority.label(),
        view.due.label(),
        page.page.page(),
        page.page_count()
    );
    if page.tasks.is_empty() {
        text.push_str("\n\nNo tasks match.");
    }
    OutboundMessage::text(text).with_inline(controls(page, view))
}

/// Builds the filter and pagination keyboard for a listing.
#[must_use]
pub fn controls(page: &TaskPage, view: ListView) -> InlineKeyboard {
    let current = page.page.page();
    let shown = view.at_page(current);
    let previous = if page.has_previous() {
        Button::new("« Prev", CallbackAction::List(shown.at_page(current.saturating_sub(1))))
    } else {
        Button::inert("·")
    };
    let next = if page.has_next() {
        Button::new("Next »", CallbackAction::List(shown.at_page(current.saturating_add(1))))
    } else {
        Button::inert("·")
    };
    let indicator = Button::inert(format!("{current}/{}", page.page_count()));

    let status_label = match view.status {
        TaskStatus::Pending => "Show completed",
        TaskStatus::Done => "Show pending",
    };

    InlineKeyboard::default()
        .row(vec![previous, indicator, next])
        .row(vec![
            Button::new(
                format!("⚡ {}", view.priority.label()),
                CallbackAction::List(view.next_priority()),
            ),
            Button::new(
                format!("📅 {}", view.due.label()),
                CallbackAction::List(view.next_due()),
            ),
        ])
        .row(vec![
            Button::new(status_label, CallbackAction::List(view.toggled_status())),
            Button::new("🔄 Refresh", CallbackAction::List(shown)),
        ])
}
