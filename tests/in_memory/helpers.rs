//! Shared fixtures for in-memory bot integration tests.

use dotask::dispatch::{ActionRouter, CallbackAction, InboundAction, RouterDeps, UserInput};
use dotask::reporting::TracingErrorReporter;
use dotask::session::adapters::{DEFAULT_IDLE_TIMEOUT, MokaInteractionStore};
use dotask::task::adapters::memory::InMemoryTaskRepository;
use dotask::task::domain::{Task, TaskPriority};
use dotask::task::services::{CreateTaskRequest, TaskLifecycleService, TaskPolicy};
use dotask::user::adapters::memory::InMemoryUserRepository;
use dotask::user::domain::{UserId, UserProfile};
use dotask::view::Screen;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use std::time::Duration;

pub const ALICE: UserId = UserId::new(7);
pub const BOB: UserId = UserId::new(8);

/// Router over fresh in-memory stores, with direct access to the tasks.
pub struct BotUnderTest {
    pub router: ActionRouter<DefaultClock>,
    pub tasks: TaskLifecycleService<InMemoryTaskRepository, DefaultClock>,
}

impl BotUnderTest {
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);
        let router = ActionRouter::new(
            RouterDeps {
                tasks: repository.clone(),
                users: Arc::new(InMemoryUserRepository::new()),
                interactions: Arc::new(MokaInteractionStore::new(idle_timeout)),
                reporter: Arc::new(TracingErrorReporter),
                clock: Arc::clone(&clock),
            },
            TaskPolicy::default(),
        )
        .expect("templates compile");
        Self {
            router,
            tasks: TaskLifecycleService::new(repository, clock),
        }
    }

    pub async fn seed(&self, owner: UserId, content: &str, priority: TaskPriority) -> Task {
        self.tasks
            .create(CreateTaskRequest::new(owner, content).with_priority(priority))
            .await
            .expect("create task")
    }

    pub async fn send_text(&self, user: UserId, text: &str) -> Screen {
        self.router
            .handle(InboundAction::new(profile(user), UserInput::from_text(text)))
            .await
    }

    pub async fn press(&self, user: UserId, action: CallbackAction) -> Screen {
        self.router
            .handle(InboundAction::new(
                profile(user),
                UserInput::Callback(action.encode()),
            ))
            .await
    }
}

#[fixture]
pub fn bot() -> BotUnderTest {
    BotUnderTest::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
}

pub fn profile(user: UserId) -> UserProfile {
    UserProfile::new(user, format!("Tester {user}"))
}

/// Text of the first message, which is the header for listings.
pub fn first_text(screen: &Screen) -> &str {
    screen
        .messages
        .first()
        .map(|message| message.text.as_str())
        .unwrap_or_default()
}

pub fn notice(screen: &Screen) -> &str {
    screen.notice.as_deref().unwrap_or_default()
}
