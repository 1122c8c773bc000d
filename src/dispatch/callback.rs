//! Compact callback payload codec.
//!
//! Telegram limits callback data to 64 bytes, so payloads are short
//! colon-separated records. Listing context travels as
//! `<status>.<page>.<priority>.<due>`, for example `o.2.H.T`:
//!
//! | Payload                        | Meaning                          |
//! |--------------------------------|----------------------------------|
//! | `l:<ctx>`                      | show listing                     |
//! | `t:<act>:<id>:<ctx>`           | card action (`d` `u` `e` `x` `s`)|
//! | `z:<id>:<offset>:<ctx>`        | snooze by preset                 |
//! | `x:y:<id>:<ctx>`, `x:n:..`     | confirm or cancel deletion       |
//! | `d:<choice>`                   | due-date pick while adding       |
//! | `p:<priority>`                 | priority pick while adding       |
//! | `n`                            | no-op                            |
//!
//! Task identifiers use the 32-character hyphenless UUID form.

use crate::task::domain::{
    DueFilter, PriorityFilter, SnoozeOffset, TaskId, TaskPriority, TaskStatus,
};
use crate::view::ListView;
use thiserror::Error;

/// Maximum callback payload size accepted by Telegram.
pub const MAX_CALLBACK_BYTES: usize = 64;

/// Action buttons on a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardAction {
    /// Mark the task done.
    Done,
    /// Return a done task to pending.
    Undo,
    /// Replace the task text.
    Edit,
    /// Ask to delete the task.
    Delete,
    /// Open the snooze picker.
    Snooze,
}

impl CardAction {
    const fn code(self) -> char {
        match self {
            Self::Done => 'd',
            Self::Undo => 'u',
            Self::Edit => 'e',
            Self::Delete => 'x',
            Self::Snooze => 's',
        }
    }

    const fn from_code(code: char) -> Option<Self> {
        match code {
            'd' => Some(Self::Done),
            'u' => Some(Self::Undo),
            'e' => Some(Self::Edit),
            'x' => Some(Self::Delete),
            's' => Some(Self::Snooze),
            _ => None,
        }
    }
}

/// Due-date choices offered while adding a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueChoice {
    /// End of the current local day.
    Today,
    /// End of the next local day.
    Tomorrow,
    /// End of the local day one week ahead.
    NextWeek,
    /// No due date.
    NoDate,
    /// Ask the user to type a date.
    Custom,
}

impl DueChoice {
    /// All choices in picker order.
    pub const ALL: [Self; 5] = [
        Self::Today,
        Self::Tomorrow,
        Self::NextWeek,
        Self::NoDate,
        Self::Custom,
    ];

    const fn code(self) -> char {
        match self {
            Self::Today => 'T',
            Self::Tomorrow => 'M',
            Self::NextWeek => 'W',
            Self::NoDate => 'N',
            Self::Custom => 'C',
        }
    }

    const fn from_code(code: char) -> Option<Self> {
        match code {
            'T' => Some(Self::Today),
            'M' => Some(Self::Tomorrow),
            'W' => Some(Self::NextWeek),
            'N' => Some(Self::NoDate),
            'C' => Some(Self::Custom),
            _ => None,
        }
    }

    /// Returns the number of days ahead for fixed choices.
    #[must_use]
    pub const fn days_ahead(self) -> Option<u64> {
        match self {
            Self::Today => Some(0),
            Self::Tomorrow => Some(1),
            Self::NextWeek => Some(7),
            Self::NoDate | Self::Custom => None,
        }
    }
}

/// Decoded inline-button action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackAction {
    /// Show a listing.
    List(ListView),
    /// Card action on a task.
    Card {
        /// Requested action.
        action: CardAction,
        /// Target task.
        task_id: TaskId,
        /// Listing the card belongs to.
        view: ListView,
    },
    /// Snooze a task by a preset.
    Snooze {
        /// Target task.
        task_id: TaskId,
        /// Chosen preset.
        offset: SnoozeOffset,
        /// Listing to return to.
        view: ListView,
    },
    /// Confirm a pending deletion.
    ConfirmDelete {
        /// Target task.
        task_id: TaskId,
        /// Listing to return to.
        view: ListView,
    },
    /// Cancel a pending deletion.
    CancelDelete {
        /// Target task.
        task_id: TaskId,
        /// Listing to return to.
        view: ListView,
    },
    /// Due-date choice while adding a task.
    PickDue(DueChoice),
    /// Priority choice while adding a task.
    PickPriority(TaskPriority),
    /// Inert button.
    Noop,
}

/// Error returned for payloads that do not decode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed callback payload: {0}")]
pub struct CallbackDecodeError(pub String);

impl CallbackAction {
    /// Encodes the action into a callback payload.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::List(view) => format!("l:{}", encode_view(view)),
            Self::Card {
                action,
                task_id,
                view,
            } => format!(
                "t:{}:{}:{}",
                action.code(),
                task_id.to_compact(),
                encode_view(view)
            ),
            Self::Snooze {
                task_id,
                offset,
                view,
            } => format!(
                "z:{}:{}:{}",
                task_id.to_compact(),
                offset.code(),
                encode_view(view)
            ),
            Self::ConfirmDelete { task_id, view } => {
                format!("x:y:{}:{}", task_id.to_compact(), encode_view(view))
            }
            Self::CancelDelete { task_id, view } => {
                format!("x:n:{}:{}", task_id.to_compact(), encode_view(view))
            }
            Self::PickDue(choice) => format!("d:{}", choice.code()),
            Self::PickPriority(priority) => format!("p:{}", priority.code()),
            Self::Noop => "n".to_owned(),
        }
    }

    /// Decodes a callback payload.
    ///
    /// # Errors
    ///
    /// Returns [`CallbackDecodeError`] when the payload is not a known
    /// record.
    pub fn decode(payload: &str) -> Result<Self, CallbackDecodeError> {
        let fields: Vec<&str> = payload.split(':').collect();
        let decoded = match fields.as_slice() {
            ["n"] => Some(Self::Noop),
            ["l", ctx] => decode_view(ctx).map(Self::List),
            ["t", action, id, ctx] => decode_card(action, id, ctx),
            ["z", id, offset, ctx] => decode_snooze(id, offset, ctx),
            ["x", "y", id, ctx] => decode_target(id, ctx)
                .map(|(task_id, view)| Self::ConfirmDelete { task_id, view }),
            ["x", "n", id, ctx] => decode_target(id, ctx)
                .map(|(task_id, view)| Self::CancelDelete { task_id, view }),
            ["d", code] => single_char(code)
                .and_then(DueChoice::from_code)
                .map(Self::PickDue),
            ["p", code] => single_char(code)
                .and_then(TaskPriority::from_code)
                .map(Self::PickPriority),
            _ => None,
        };
        decoded.ok_or_else(|| CallbackDecodeError(payload.to_owned()))
    }
}

fn encode_view(view: &ListView) -> String {
    format!(
        "{}.{}.{}.{}",
        view.status.code(),
        view.page,
        view.priority.code(),
        view.due.code()
    )
}

fn decode_view(ctx: &str) -> Option<ListView> {
    let parts: Vec<&str> = ctx.split('.').collect();
    let [status, page, priority, due] = parts.as_slice() else {
        return None;
    };
    Some(ListView {
        status: single_char(status).and_then(|code| TaskStatus::from_code(code).ok())?,
        page: page.parse::<u32>().ok().filter(|number| *number > 0)?,
        priority: single_char(priority).and_then(|code| PriorityFilter::from_code(code).ok())?,
        due: single_char(due).and_then(|code| DueFilter::from_code(code).ok())?,
    })
}

fn decode_target(id: &str, ctx: &str) -> Option<(TaskId, ListView)> {
    Some((TaskId::parse(id)?, decode_view(ctx)?))
}

fn decode_card(code: &str, id: &str, ctx: &str) -> Option<CallbackAction> {
    let action = single_char(code).and_then(CardAction::from_code)?;
    let (task_id, view) = decode_target(id, ctx)?;
    Some(CallbackAction::Card {
        action,
        task_id,
        view,
    })
}

fn decode_snooze(id: &str, code: &str, ctx: &str) -> Option<CallbackAction> {
    let offset = SnoozeOffset::try_from(code).ok()?;
    let (task_id, view) = decode_target(id, ctx)?;
    Some(CallbackAction::Snooze {
        task_id,
        offset,
        view,
    })
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) => Some(code),
        _ => None,
    }
}
