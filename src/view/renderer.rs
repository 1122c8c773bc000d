//! Pure rendering of screens from domain values.

use super::ListView;
use super::card::{TaskCard, priority_glyph};
use super::listing::header;
use super::pickers::{
    delete_keyboard, due_keyboard, main_menu, priority_keyboard, priority_label, snooze_keyboard,
};
use super::screen::{OutboundMessage, Screen};
use super::templates::Templates;
use crate::task::domain::{
    LocalCalendar, MAX_CONTENT_CHARS, MIN_CONTENT_CHARS, SnoozeAnchor, Task, TaskContent, TaskPage,
};
use crate::task::services::{TaskPolicy, TaskSummary};
use chrono::{DateTime, Utc};
use teloxide::utils::html;

/// Builds every screen the bot shows.
///
/// Rendering depends only on its arguments, so equal input and `now`
/// always produce the same screen.
#[derive(Debug)]
pub struct Renderer {
    calendar: LocalCalendar,
    templates: Templates,
}

impl Renderer {
    /// Creates a renderer for the given calendar.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when a bundled template fails to parse.
    pub fn new(calendar: LocalCalendar) -> Result<Self, minijinja::Error> {
        Ok(Self {
            calendar,
            templates: Templates::new()?,
        })
    }

    /// Returns the calendar used for due dates.
    #[must_use]
    pub const fn calendar(&self) -> &LocalCalendar {
        &self.calendar
    }

    /// Builds the card for one task.
    #[must_use]
    pub fn card(&self, task: &Task, index: u64, now: DateTime<Utc>) -> TaskCard {
        TaskCard::build(task, index, now, &self.calendar)
    }

    /// Renders a listing: the header followed by one card per task.
    #[must_use]
    pub fn listing(&self, page: &TaskPage, requested: ListView, now: DateTime<Utc>) -> Screen {
        let view = requested.at_page(page.page.page());
        let first_index = page.page.offset();
        let cards = page
            .tasks
            .iter()
            .zip(1_u64..)
            .map(|(task, position)| {
                self.card(task, first_index + position, now)
                    .to_message(view)
            });
        Screen::listing(std::iter::once(header(page, view)).chain(cards).collect())
    }

    /// Renders the greeting with the main menu.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when the template fails to render.
    pub fn welcome(&self, name: &str, summary: TaskSummary) -> Result<Screen, minijinja::Error> {
        let text = self.templates.welcome(name, summary)?;
        Ok(Screen::message(
            OutboundMessage::text(text).with_markup(main_menu()),
        ))
    }

    /// Renders the help text with the main menu.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when the template fails to render.
    pub fn help(&self, page_size: u32) -> Result<Screen, minijinja::Error> {
        let text = self
            .templates
            .help(page_size, MIN_CONTENT_CHARS, MAX_CONTENT_CHARS)?;
        Ok(Screen::message(
            OutboundMessage::text(text).with_markup(main_menu()),
        ))
    }

    /// Renders the read-only settings summary.
    #[must_use]
    pub fn settings(&self, policy: &TaskPolicy) -> Screen {
        let offset = self.calendar.offset();
        let anchor = match policy.snooze_anchor {
            SnoozeAnchor::DueDate => "existing due date",
            SnoozeAnchor::Now => "current time",
        };
        Screen::message(OutboundMessage::text(format!(
            "<b>⚙️ Settings</b>\nTime zone: UTC{offset}\nSnooze from: {anchor}\nTasks per page: {}",
            policy.page_size
        )))
    }

    /// Asks for the text of a new task.
    #[must_use]
    pub fn ask_content(&self) -> Screen {
        Screen::message(OutboundMessage::text(format!(
            "✏️ What do you need to do? Send the task text ({MIN_CONTENT_CHARS}-{MAX_CONTENT_CHARS} characters)."
        )))
    }

    /// Asks when a new task is due.
    #[must_use]
    pub fn ask_due(&self, content: &TaskContent) -> Screen {
        Screen::message(
            OutboundMessage::text(format!(
                "📅 When is <b>{}</b> due?",
                html::escape(content.as_str())
            ))
            .with_inline(due_keyboard()),
        )
    }

    /// Asks for a typed due date.
    #[must_use]
    pub fn ask_custom_due(&self) -> Screen {
        Screen::message(OutboundMessage::text(
            "📅 Send the due date as <code>YYYY-MM-DD</code> or <code>YYYY-MM-DD HH:MM</code>.",
        ))
    }

    /// Asks for the priority of a new task.
    #[must_use]
    pub fn ask_priority(&self) -> Screen {
        Screen::message(
            OutboundMessage::text("⚡ Choose a priority.").with_inline(priority_keyboard()),
        )
    }

    /// Confirms a created task.
    #[must_use]
    pub fn task_created(&self, task: &Task) -> Screen {
        let due = task.due_at().map_or_else(
            || "no due date".to_owned(),
            |due| {
                format!(
                    "due {}",
                    self.calendar.to_local(due).format("%a %d %b %H:%M")
                )
            },
        );
        Screen::message(
            OutboundMessage::text(format!(
                "✅ Added {} <b>{}</b> ({} priority, {due}).",
                priority_glyph(task.priority()),
                html::escape(task.content().as_str()),
                priority_label(task.priority()).to_lowercase(),
            ))
            .with_markup(main_menu()),
        )
        .with_notice("Task added")
    }

    /// Asks for replacement text for a task.
    #[must_use]
    pub fn ask_edit(&self, task: &Task) -> Screen {
        Screen::message(OutboundMessage::text(format!(
            "✏️ Send the new text for <b>{}</b>.",
            html::escape(task.content().as_str())
        )))
    }

    /// Offers snooze presets for a task.
    #[must_use]
    pub fn snooze_picker(&self, task: &Task, view: ListView) -> Screen {
        Screen::message(
            OutboundMessage::text(format!(
                "⏰ Snooze <b>{}</b> by:",
                html::escape(task.content().as_str())
            ))
            .with_inline(snooze_keyboard(task.id(), view)),
        )
    }

    /// Asks the user to confirm a deletion.
    #[must_use]
    pub fn delete_prompt(&self, task: &Task, view: ListView) -> Screen {
        Screen::message(
            OutboundMessage::text(format!(
                "🗑 Delete <b>{}</b>? This cannot be undone.",
                html::escape(task.content().as_str())
            ))
            .with_inline(delete_keyboard(task.id(), view)),
        )
    }
}
