//! Task cards.

use super::ListView;
use super::screen::{Button, InlineKeyboard, OutboundMessage};
use crate::dispatch::{CallbackAction, CardAction};
use crate::task::domain::{DueBucket, LocalCalendar, Task, TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use teloxide::utils::html;

/// Local due-time format shown on cards.
const DUE_FORMAT: &str = "%a %d %b %H:%M";

/// Returns the glyph for a status.
#[must_use]
pub const fn status_glyph(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "⏳",
        TaskStatus::Done => "✅",
    }
}

/// Returns the glyph for a priority.
#[must_use]
pub const fn priority_glyph(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => "🔴",
        TaskPriority::Medium => "🟡",
        TaskPriority::Low => "🟢",
    }
}

/// Display model of one task in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    /// Task shown.
    pub task_id: TaskId,
    /// One-based position across the whole listing.
    pub index: u64,
    /// Status glyph.
    pub status_glyph: &'static str,
    /// Priority glyph.
    pub priority_glyph: &'static str,
    /// Derived due-date bucket.
    pub bucket: DueBucket,
    /// Local due time, when set.
    pub due_label: Option<String>,
    /// Escaped task text.
    pub content: String,
    /// Actions offered for the task's status.
    pub actions: Vec<CardAction>,
}

impl TaskCard {
    /// Builds the card for `task` as seen at `now`.
    #[must_use]
    pub fn build(task: &Task, index: u64, now: DateTime<Utc>, calendar: &LocalCalendar) -> Self {
        Self {
            task_id: task.id(),
            index,
            status_glyph: status_glyph(task.status()),
            priority_glyph: priority_glyph(task.priority()),
            bucket: DueBucket::classify(task.due_at(), task.status(), now, calendar),
            due_label: task
                .due_at()
                .map(|due| calendar.to_local(due).format(DUE_FORMAT).to_string()),
            content: html::escape(task.content().as_str()),
            actions: actions_for(task.status()),
        }
    }

    /// Renders the card as a message whose buttons return to `view`.
    #[must_use]
    pub fn to_message(&self, view: ListView) -> OutboundMessage {
        let due_line = self.due_label.as_ref().map_or_else(
            || format!("📅 {}", self.bucket.label()),
            |due| format!("📅 {} · {due}", self.bucket.label()),
        );
        let text = format!(
            "{} {} <b>{}.</b> {}\n{due_line}",
            self.status_glyph, self.priority_glyph, self.index, self.content
        );
        let buttons = self
            .actions
            .iter()
            .map(|action| {
                Button::new(
                    action_label(*action),
                    CallbackAction::Card {
                        action: *action,
                        task_id: self.task_id,
                        view,
                    },
                )
            })
            .collect();
        OutboundMessage::text(text).with_inline(InlineKeyboard::default().row(buttons))
    }
}

fn actions_for(status: TaskStatus) -> Vec<CardAction> {
    match status {
        TaskStatus::Pending => vec![
            CardAction::Done,
            CardAction::Edit,
            CardAction::Delete,
            CardAction::Snooze,
        ],
        TaskStatus::Done => vec![CardAction::Undo, CardAction::Edit, CardAction::Delete],
    }
}

const fn action_label(action: CardAction) -> &'static str {
    match action {
        CardAction::Done => "✅ Done",
        CardAction::Undo => "↩️ Undo",
        CardAction::Edit => "✏️ Edit",
        CardAction::Delete => "🗑 Delete",
        CardAction::Snooze => "⏰ Snooze",
    }
}
