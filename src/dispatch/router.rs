//! Routes one inbound action through the pending-interaction state machine.

use super::callback::{CallbackAction, CardAction, DueChoice};
use super::error::{DispatchError, DispatchResult, FailureKind};
use super::input::{Command, InboundAction, MenuItem, UserInput};
use crate::reporting::{ErrorReporter, FailureReport};
use crate::session::domain::{AddTaskStep, PendingInteraction};
use crate::session::ports::InteractionStore;
use crate::task::domain::{
    DeletionTicket, LifecycleAction, TaskContent, TaskDomainError, TaskId, TaskPriority,
};
use crate::task::ports::TaskRepository;
use crate::task::services::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleService, TaskPolicy,
};
use crate::user::domain::{User, UserId};
use crate::user::ports::UserRepository;
use crate::user::services::UserRegistrationService;
use crate::view::{ListView, OutboundMessage, Renderer, Screen, main_menu};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Notice shown for buttons that no longer match the user's flow.
pub const EXPIRED_NOTICE: &str = "This button has expired.";

/// Collaborators shared by every action.
pub struct RouterDeps<C> {
    /// Task store.
    pub tasks: Arc<dyn TaskRepository>,
    /// User directory.
    pub users: Arc<dyn UserRepository>,
    /// Pending interaction store.
    pub interactions: Arc<dyn InteractionStore>,
    /// Sink for unrecoverable failures.
    pub reporter: Arc<dyn ErrorReporter>,
    /// Time source.
    pub clock: Arc<C>,
}

/// Turns inbound actions into screens.
///
/// Each action upserts the sender, consults their pending interaction,
/// performs at most one task operation, and renders the next screen.
/// Failures are answered in the returned screen and never escape.
pub struct ActionRouter<C>
where
    C: Clock + Send + Sync,
{
    tasks: TaskLifecycleService<dyn TaskRepository, C>,
    users: UserRegistrationService<dyn UserRepository, C>,
    interactions: Arc<dyn InteractionStore>,
    reporter: Arc<dyn ErrorReporter>,
    renderer: Renderer,
    clock: Arc<C>,
}

impl<C> ActionRouter<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a router.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when a bundled template fails to parse.
    pub fn new(deps: RouterDeps<C>, policy: TaskPolicy) -> Result<Self, minijinja::Error> {
        let RouterDeps {
            tasks,
            users,
            interactions,
            reporter,
            clock,
        } = deps;
        Ok(Self {
            tasks: TaskLifecycleService::new(tasks, Arc::clone(&clock)).with_policy(policy),
            users: UserRegistrationService::new(users, Arc::clone(&clock)),
            interactions,
            reporter,
            renderer: Renderer::new(policy.calendar)?,
            clock,
        })
    }

    /// Handles one action and returns what to show the user.
    pub async fn handle(&self, action: InboundAction) -> Screen {
        let user = action.profile.id;
        let pending = self.interactions.get(user).await;
        info!(
            user = %user,
            input = action.input.kind(),
            flow = pending.as_ref().map_or("idle", PendingInteraction::label),
            "handling action"
        );
        match self.route(&action, pending.clone()).await {
            Ok(screen) => screen,
            Err(err) => self.recover(user, &action.input, pending.as_ref(), &err).await,
        }
    }

    async fn route(
        &self,
        action: &InboundAction,
        pending: Option<PendingInteraction>,
    ) -> DispatchResult<Screen> {
        let user = self.users.touch(&action.profile).await?;
        match &action.input {
            UserInput::Command(command) => self.command(&user, *command, pending.is_some()).await,
            UserInput::Menu(item) => {
                self.interactions.clear(user.id()).await;
                self.menu(&user, *item).await
            }
            UserInput::Text(text) => self.text(user.id(), text, pending).await,
            UserInput::Callback(payload) => {
                let callback = CallbackAction::decode(payload)
                    .map_err(|err| DispatchError::UnknownAction(err.to_string()))?;
                self.callback(user.id(), callback, pending).await
            }
        }
    }

    async fn command(
        &self,
        user: &User,
        command: Command,
        in_flow: bool,
    ) -> DispatchResult<Screen> {
        match command {
            Command::Start => {
                self.interactions.clear(user.id()).await;
                let summary = self.tasks.summary(user.id()).await?;
                Ok(self.renderer.welcome(user.name(), summary)?)
            }
            Command::Help => Ok(self.renderer.help(self.tasks.policy().page_size)?),
            Command::Cancel => {
                self.interactions.clear(user.id()).await;
                let text = if in_flow {
                    "Cancelled."
                } else {
                    "Nothing to cancel."
                };
                Ok(Screen::message(
                    OutboundMessage::text(text).with_markup(main_menu()),
                ))
            }
        }
    }

    async fn menu(&self, user: &User, item: MenuItem) -> DispatchResult<Screen> {
        match item {
            MenuItem::AddTask => {
                self.interactions
                    .set(user.id(), PendingInteraction::start_adding())
                    .await;
                Ok(self.renderer.ask_content())
            }
            MenuItem::MyTasks => self.listing(user.id(), ListView::default()).await,
            MenuItem::Settings => Ok(self.renderer.settings(self.tasks.policy())),
            MenuItem::Help => Ok(self.renderer.help(self.tasks.policy().page_size)?),
        }
    }

    async fn text(
        &self,
        user: UserId,
        text: &str,
        pending: Option<PendingInteraction>,
    ) -> DispatchResult<Screen> {
        let Some(interaction) = pending else {
            return Err(DispatchError::UnknownAction(text.to_owned()));
        };
        match interaction {
            PendingInteraction::AddingTask { step } => self.adding_text(user, text, step).await,
            PendingInteraction::EditingContent { task_id, view } => {
                self.tasks.edit_content(user, task_id, text).await?;
                self.interactions.clear(user).await;
                Ok(self.listing(user, view).await?.with_notice("✏️ Task updated."))
            }
            PendingInteraction::ConfirmingDelete { .. } => Err(DispatchError::InvalidInput(
                "Confirm or cancel the deletion with the buttons.".to_owned(),
            )),
        }
    }

    async fn adding_text(
        &self,
        user: UserId,
        text: &str,
        step: AddTaskStep,
    ) -> DispatchResult<Screen> {
        match step {
            AddTaskStep::AwaitingContent => {
                let content = TaskContent::new(text).map_err(TaskLifecycleError::from)?;
                let screen = self.renderer.ask_due(&content);
                self.advance(user, AddTaskStep::AwaitingDue { content }).await;
                Ok(screen)
            }
            AddTaskStep::AwaitingDue { content } | AddTaskStep::AwaitingCustomDue { content } => {
                let due = self.renderer.calendar().parse_local(text).ok_or_else(|| {
                    DispatchError::InvalidInput(
                        "Send the date as YYYY-MM-DD or YYYY-MM-DD HH:MM.".to_owned(),
                    )
                })?;
                self.advance(
                    user,
                    AddTaskStep::AwaitingPriority {
                        content,
                        due: Some(due),
                    },
                )
                .await;
                Ok(self.renderer.ask_priority())
            }
            AddTaskStep::AwaitingPriority { content, due } => {
                let priority = TaskPriority::try_from(text.to_lowercase().as_str()).map_err(|_| {
                    DispatchError::InvalidInput("Choose a priority with the buttons.".to_owned())
                })?;
                self.create(user, content, due, priority).await
            }
        }
    }

    async fn callback(
        &self,
        user: UserId,
        callback: CallbackAction,
        pending: Option<PendingInteraction>,
    ) -> DispatchResult<Screen> {
        match callback {
            CallbackAction::Noop => Ok(Screen::default()),
            CallbackAction::List(view) => self.listing(user, view).await,
            CallbackAction::Card {
                action,
                task_id,
                view,
            } => self.card_action(user, action, task_id, view).await,
            CallbackAction::Snooze {
                task_id,
                offset,
                view,
            } => {
                self.tasks.snooze(user, task_id, offset).await?;
                let notice = format!("⏰ Snoozed by {}", offset.code());
                Ok(self.listing(user, view).await?.with_notice(notice))
            }
            CallbackAction::ConfirmDelete { task_id, view } => {
                let Some(ticket) = deletion_ticket(pending, task_id) else {
                    return Ok(expired(user, "confirm_delete"));
                };
                self.tasks.confirm_deletion(user, &ticket).await?;
                self.interactions.clear(user).await;
                Ok(self.listing(user, view).await?.with_notice("🗑 Task deleted"))
            }
            CallbackAction::CancelDelete { task_id, view } => {
                let Some(ticket) = deletion_ticket(pending, task_id) else {
                    return Ok(expired(user, "cancel_delete"));
                };
                self.tasks.cancel_deletion(user, &ticket).await?;
                self.interactions.clear(user).await;
                Ok(self
                    .listing(user, view)
                    .await?
                    .with_notice("Deletion cancelled"))
            }
            CallbackAction::PickDue(choice) => match pending {
                Some(PendingInteraction::AddingTask {
                    step: AddTaskStep::AwaitingDue { content },
                }) => self.pick_due(user, content, choice).await,
                _ => Ok(expired(user, "pick_due")),
            },
            CallbackAction::PickPriority(priority) => match pending {
                Some(PendingInteraction::AddingTask {
                    step: AddTaskStep::AwaitingPriority { content, due },
                }) => self.create(user, content, due, priority).await,
                _ => Ok(expired(user, "pick_priority")),
            },
        }
    }

    async fn card_action(
        &self,
        user: UserId,
        action: CardAction,
        task_id: TaskId,
        view: ListView,
    ) -> DispatchResult<Screen> {
        match action {
            CardAction::Done => {
                self.tasks.mark_done(user, task_id).await?;
                Ok(self.listing(user, view).await?.with_notice("✅ Done"))
            }
            CardAction::Undo => {
                self.tasks.reopen(user, task_id).await?;
                Ok(self
                    .listing(user, view)
                    .await?
                    .with_notice("↩️ Moved back to pending"))
            }
            CardAction::Edit => {
                let task = self.tasks.get(user, task_id).await?;
                self.interactions
                    .set(user, PendingInteraction::EditingContent { task_id, view })
                    .await;
                Ok(self.renderer.ask_edit(&task))
            }
            CardAction::Delete => {
                let (task, ticket) = self.tasks.request_deletion(user, task_id).await?;
                self.interactions
                    .set(user, PendingInteraction::ConfirmingDelete { ticket, view })
                    .await;
                Ok(self.renderer.delete_prompt(&task, view))
            }
            CardAction::Snooze => {
                let task = self.tasks.get(user, task_id).await?;
                if !task.status().permits(LifecycleAction::Snooze) {
                    return Err(TaskLifecycleError::from(TaskDomainError::InvalidTransition {
                        task_id,
                        from: task.status(),
                        action: LifecycleAction::Snooze,
                    })
                    .into());
                }
                Ok(self.renderer.snooze_picker(&task, view))
            }
        }
    }

    async fn pick_due(
        &self,
        user: UserId,
        content: TaskContent,
        choice: DueChoice,
    ) -> DispatchResult<Screen> {
        let Some(days_ahead) = choice.days_ahead() else {
            return Ok(if choice == DueChoice::Custom {
                self.advance(user, AddTaskStep::AwaitingCustomDue { content })
                    .await;
                self.renderer.ask_custom_due()
            } else {
                self.advance(user, AddTaskStep::AwaitingPriority { content, due: None })
                    .await;
                self.renderer.ask_priority()
            });
        };
        let due = self
            .renderer
            .calendar()
            .end_of_day_in(self.clock.utc(), days_ahead)
            .ok_or_else(|| DispatchError::InvalidInput("That date is out of range.".to_owned()))?;
        self.advance(
            user,
            AddTaskStep::AwaitingPriority {
                content,
                due: Some(due),
            },
        )
        .await;
        Ok(self.renderer.ask_priority())
    }

    async fn create(
        &self,
        user: UserId,
        content: TaskContent,
        due: Option<DateTime<Utc>>,
        priority: TaskPriority,
    ) -> DispatchResult<Screen> {
        let request = CreateTaskRequest::new(user, content)
            .with_due(due)
            .with_priority(priority);
        let task = self.tasks.create(request).await?;
        self.interactions.clear(user).await;
        Ok(self.renderer.task_created(&task))
    }

    async fn advance(&self, user: UserId, step: AddTaskStep) {
        self.interactions
            .set(user, PendingInteraction::AddingTask { step })
            .await;
    }

    async fn listing(&self, user: UserId, view: ListView) -> DispatchResult<Screen> {
        let page = self.tasks.list(user, &view.request()).await?;
        Ok(self.renderer.listing(&page, view, self.clock.utc()))
    }

    async fn recover(
        &self,
        user: UserId,
        input: &UserInput,
        pending: Option<&PendingInteraction>,
        err: &DispatchError,
    ) -> Screen {
        let kind = err.kind();
        if kind.is_reported() {
            self.reporter.report(&FailureReport {
                kind,
                user,
                input: input.kind(),
                interaction: pending.and_then(|state| serde_json::to_string(state).ok()),
                message: err.to_string(),
            });
        } else {
            warn!(user = %user, kind = kind.as_str(), error = %err, "action rejected");
        }
        if matches!(kind, FailureKind::NotFound | FailureKind::Forbidden) && pending.is_some() {
            self.interactions.clear(user).await;
        }
        Screen::notice_only(user_message(kind, err))
    }
}

fn deletion_ticket(
    pending: Option<PendingInteraction>,
    task_id: TaskId,
) -> Option<DeletionTicket> {
    match pending {
        Some(PendingInteraction::ConfirmingDelete { ticket, .. }) if ticket.task_id() == task_id => {
            Some(ticket)
        }
        _ => None,
    }
}

fn expired(user: UserId, callback: &'static str) -> Screen {
    debug!(user = %user, callback, "ignoring callback outside its flow");
    Screen::notice_only(EXPIRED_NOTICE)
}

fn user_message(kind: FailureKind, err: &DispatchError) -> String {
    match kind {
        FailureKind::NotFound => "That task no longer exists.".to_owned(),
        FailureKind::Forbidden => "That task is not yours.".to_owned(),
        FailureKind::InvalidTransition => {
            "That action is not available for this task any more.".to_owned()
        }
        FailureKind::UnknownAction => "Sorry, I didn't get that. Please use the menu.".to_owned(),
        FailureKind::InvalidInput => match err {
            DispatchError::InvalidInput(message) => format!("⚠️ {message}"),
            other => format!("⚠️ {other}"),
        },
        FailureKind::StorageFailure | FailureKind::Rendering => {
            "Something went wrong. Please try again.".to_owned()
        }
    }
}
