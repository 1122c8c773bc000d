//! Transport-agnostic output descriptors.

use crate::dispatch::CallbackAction;
use teloxide::utils::html;

/// Inline button carrying a typed callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Visible label.
    pub label: String,
    /// Action sent back when pressed.
    pub action: CallbackAction,
}

impl Button {
    /// Creates a button.
    #[must_use]
    pub fn new(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    /// Creates a button that does nothing when pressed.
    #[must_use]
    pub fn inert(label: impl Into<String>) -> Self {
        Self::new(label, CallbackAction::Noop)
    }
}

/// Rows of inline buttons attached to one message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InlineKeyboard {
    /// Button rows, top to bottom.
    pub rows: Vec<Vec<Button>>,
}

impl InlineKeyboard {
    /// Appends a row, skipping empty ones.
    #[must_use]
    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        if !buttons.is_empty() {
            self.rows.push(buttons);
        }
        self
    }
}

/// Keyboard attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Markup {
    /// No keyboard change.
    #[default]
    None,
    /// Inline buttons under the message.
    Inline(InlineKeyboard),
    /// Persistent reply keyboard with the given rows of labels.
    Menu(Vec<Vec<String>>),
}

/// One outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// HTML-formatted text.
    pub text: String,
    /// Attached keyboard.
    pub markup: Markup,
}

impl OutboundMessage {
    /// Creates a message without a keyboard.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: Markup::None,
        }
    }

    /// Attaches a keyboard.
    #[must_use]
    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }

    /// Attaches inline buttons.
    #[must_use]
    pub fn with_inline(self, keyboard: InlineKeyboard) -> Self {
        self.with_markup(Markup::Inline(keyboard))
    }
}

/// Everything the transport delivers in answer to one inbound action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    /// Messages in delivery order.
    pub messages: Vec<OutboundMessage>,
    /// Short toast shown when answering a callback, or a plain message when
    /// replying to text.
    pub notice: Option<String>,
    /// Whether the messages form a task listing that replaces the previous
    /// one in the chat.
    pub listing: bool,
}

impl Screen {
    /// Creates a screen of a single message.
    #[must_use]
    pub fn message(message: OutboundMessage) -> Self {
        Self {
            messages: vec![message],
            ..Self::default()
        }
    }

    /// Creates a listing screen.
    #[must_use]
    pub fn listing(messages: Vec<OutboundMessage>) -> Self {
        Self {
            messages,
            notice: None,
            listing: true,
        }
    }

    /// Creates a screen that only answers the callback.
    #[must_use]
    pub fn notice_only(notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
            ..Self::default()
        }
    }

    /// Attaches a callback notice.
    #[must_use]
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    /// Moves the notice into a leading plain message.
    ///
    /// Text input has no callback to answer, so its notice is sent as a
    /// message instead.
    #[must_use]
    pub fn notice_as_message(mut self) -> Self {
        if let Some(notice) = self.notice.take() {
            self.messages
                .insert(0, OutboundMessage::text(html::escape(&notice)));
        }
        self
    }
}
