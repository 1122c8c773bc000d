//! Classification of inbound chat input.

use crate::user::domain::UserProfile;

/// Characters dropped before matching menu labels: zero-width joiners and
/// spaces, the byte-order mark, and the emoji presentation selector.
const IGNORED_CHARS: [char; 5] = ['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}', '\u{fe0f}'];

/// Slash commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Greets the user and shows the menu.
    Start,
    /// Shows the help text.
    Help,
    /// Abandons the current flow.
    Cancel,
}

impl Command {
    /// Parses `/name` or `/name@bot`, ignoring trailing arguments.
    ///
    /// Returns `None` for text that is not one of the known commands.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.trim_start().strip_prefix('/')?.split_whitespace().next()?;
        let name = word.split_once('@').map_or(word, |(name, _bot)| name);
        match name.to_lowercase().as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Entries of the persistent main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    /// Start adding a task.
    AddTask,
    /// Show the task list.
    MyTasks,
    /// Show settings.
    Settings,
    /// Show help.
    Help,
}

impl MenuItem {
    /// All entries in menu order.
    pub const ALL: [Self; 4] = [Self::AddTask, Self::MyTasks, Self::Settings, Self::Help];

    /// Returns the button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddTask => "➕ Add Task",
            Self::MyTasks => "📋 My Tasks",
            Self::Settings => "⚙️ Settings",
            Self::Help => "ℹ️ Help",
        }
    }

    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::AddTask => &["add task", "add", "new task"],
            Self::MyTasks => &["my tasks", "tasks", "list"],
            Self::Settings => &["settings"],
            Self::Help => &["help"],
        }
    }

    /// Matches free text against menu labels and their plain aliases.
    #[must_use]
    pub fn recognise(text: &str) -> Option<Self> {
        let wanted = normalise(text);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|item| {
            normalise(item.label()) == wanted || item.aliases().contains(&wanted.as_str())
        })
    }
}

/// Lower-cases text, drops invisible characters, and collapses whitespace.
#[must_use]
pub fn normalise(text: &str) -> String {
    text.chars()
        .filter(|ch| !IGNORED_CHARS.contains(ch))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// One classified piece of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// A known slash command.
    Command(Command),
    /// A main-menu selection.
    Menu(MenuItem),
    /// Any other text, trimmed.
    Text(String),
    /// Raw inline-button payload.
    Callback(String),
}

impl UserInput {
    /// Classifies a text message.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if let Some(command) = Command::parse(text) {
            return Self::Command(command);
        }
        MenuItem::recognise(text).map_or_else(|| Self::Text(text.trim().to_owned()), Self::Menu)
    }

    /// Returns a short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Command(_) => "command",
            Self::Menu(_) => "menu",
            Self::Text(_) => "text",
            Self::Callback(_) => "callback",
        }
    }
}

/// Input received from a user, with the sender's current profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundAction {
    /// Sender profile, upserted before handling.
    pub profile: UserProfile,
    /// Classified input.
    pub input: UserInput,
}

impl InboundAction {
    /// Creates an inbound action.
    #[must_use]
    pub const fn new(profile: UserProfile, input: UserInput) -> Self {
        Self { profile, input }
    }
}
