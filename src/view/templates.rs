//! `minijinja` templates for long-form texts.

use crate::task::services::TaskSummary;
use minijinja::{Environment, context};

const WELCOME: &str = "\
👋 Hi <b>{{ name }}</b>, welcome to DoTask!
{% if open == 0 and done == 0 -%}
You have no tasks yet. Tap <b>➕ Add Task</b> to create your first one.
{%- else -%}
You have <b>{{ open }}</b> open {{ 'task' if open == 1 else 'tasks' }} \
and <b>{{ done }}</b> completed.
{%- endif %}";

const HELP: &str = "\
<b>DoTask help</b>

➕ <b>Add Task</b>: type the text ({{ min_chars }}-{{ max_chars }} characters), \
then pick a due date and a priority.
📋 <b>My Tasks</b>: {{ page_size }} tasks per page. Use the buttons to filter \
by priority or due date and to switch between pending and completed tasks.
⏰ <b>Snooze</b> postpones a pending task by a preset amount.
🗑 <b>Delete</b> always asks for confirmation.

Custom dates are typed as <code>YYYY-MM-DD</code> or \
<code>YYYY-MM-DD HH:MM</code>.
/cancel abandons whatever you are doing.";

/// Compiled long-form templates.
///
/// Names end in `.html` so interpolated values are HTML-escaped.
#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compiles the bundled templates.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when a template fails to parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("welcome.html", WELCOME)?;
        env.add_template("help.html", HELP)?;
        Ok(Self { env })
    }

    /// Renders the greeting with the user's task counts.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when rendering fails.
    pub fn welcome(&self, name: &str, summary: TaskSummary) -> Result<String, minijinja::Error> {
        self.env.get_template("welcome.html")?.render(context! {
            name => name,
            open => summary.open,
            done => summary.done,
        })
    }

    /// Renders the help text.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when rendering fails.
    pub fn help(
        &self,
        page_size: u32,
        min_chars: usize,
        max_chars: usize,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("help.html")?.render(context! {
            page_size => page_size,
            min_chars => min_chars,
            max_chars => max_chars,
        })
    }
}
