//! Choice keyboards: snooze presets, delete confirmation, add-task pickers
//! and the main menu.

use super::ListView;
use super::card::priority_glyph;
use super::screen::{Button, InlineKeyboard, Markup};
use crate::dispatch::{CallbackAction, DueChoice, MenuItem};
use crate::task::domain::{SnoozeOffset, TaskId, TaskPriority};

/// Snooze presets for a task, plus a way back to the listing.
#[must_use]
pub fn snooze_keyboard(task_id: TaskId, view: ListView) -> InlineKeyboard {
    let presets = SnoozeOffset::ALL
        .into_iter()
        .map(|offset| {
            Button::new(
                format!("+{}", offset.code()),
                CallbackAction::Snooze {
                    task_id,
                    offset,
                    view,
                },
            )
        })
        .collect();
    InlineKeyboard::default()
        .row(presets)
        .row(vec![Button::new("« Back", CallbackAction::List(view))])
}

/// Confirm and cancel buttons for a pending deletion.
#[must_use]
pub fn delete_keyboard(task_id: TaskId, view: ListView) -> InlineKeyboard {
    InlineKeyboard::default().row(vec![
        Button::new(
            "🗑 Yes, delete",
            CallbackAction::ConfirmDelete { task_id, view },
        ),
        Button::new("Cancel", CallbackAction::CancelDelete { task_id, view }),
    ])
}

/// Due-date choices offered while adding a task.
#[must_use]
pub fn due_keyboard() -> InlineKeyboard {
    DueChoice::ALL
        .chunks(3)
        .fold(InlineKeyboard::default(), |keyboard, choices| {
            keyboard.row(
                choices
                    .iter()
                    .map(|&choice| Button::new(due_label(choice), CallbackAction::PickDue(choice)))
                    .collect(),
            )
        })
}

/// Priority choices offered while adding a task.
#[must_use]
pub fn priority_keyboard() -> InlineKeyboard {
    let buttons = TaskPriority::ALL
        .into_iter()
        .map(|priority| {
            Button::new(
                format!("{} {}", priority_glyph(priority), priority_label(priority)),
                CallbackAction::PickPriority(priority),
            )
        })
        .collect();
    InlineKeyboard::default().row(buttons)
}

/// Persistent reply keyboard with the main menu.
#[must_use]
pub fn main_menu() -> Markup {
    let label = |item: MenuItem| item.label().to_owned();
    Markup::Menu(vec![
        vec![label(MenuItem::AddTask), label(MenuItem::MyTasks)],
        vec![label(MenuItem::Settings), label(MenuItem::Help)],
    ])
}

const fn due_label(choice: DueChoice) -> &'static str {
    match choice {
        DueChoice::Today => "Today",
        DueChoice::Tomorrow => "Tomorrow",
        DueChoice::NextWeek => "Next week",
        DueChoice::NoDate => "No date",
        DueChoice::Custom => "📅 Pick a date",
    }
}

/// Returns the capitalised priority name.
#[must_use]
pub const fn priority_label(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => "High",
        TaskPriority::Medium => "Medium",
        TaskPriority::Low => "Low",
    }
}
