//! Shared world state for guarded task change scenarios.

use std::sync::Arc;

use dotask::dispatch::{ActionRouter, CallbackAction, InboundAction, RouterDeps, UserInput};
use dotask::reporting::TracingErrorReporter;
use dotask::session::adapters::MokaInteractionStore;
use dotask::task::adapters::memory::InMemoryTaskRepository;
use dotask::task::domain::Task;
use dotask::task::services::{TaskLifecycleService, TaskPolicy};
use dotask::user::adapters::memory::InMemoryUserRepository;
use dotask::user::domain::{UserId, UserProfile};
use dotask::view::Screen;
use mockable::DefaultClock;
use rstest::fixture;

/// User acting in every scenario.
pub const OWNER: UserId = UserId::new(42);

/// Scenario world for guarded task change behaviour tests.
pub struct TaskChangeWorld {
    pub router: ActionRouter<DefaultClock>,
    pub service: TaskLifecycleService<InMemoryTaskRepository, DefaultClock>,
    pub task: Option<Task>,
    pub last_screen: Option<Screen>,
}

impl TaskChangeWorld {
    /// Creates a world over empty in-memory stores.
    ///
    /// # Panics
    ///
    /// Panics when the bundled templates fail to compile.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);
        let router = ActionRouter::new(
            RouterDeps {
                tasks: repository.clone(),
                users: Arc::new(InMemoryUserRepository::new()),
                interactions: Arc::new(MokaInteractionStore::default()),
                reporter: Arc::new(TracingErrorReporter),
                clock: Arc::clone(&clock),
            },
            TaskPolicy::default(),
        )
        .expect("templates compile");

        Self {
            router,
            service: TaskLifecycleService::new(repository, clock),
            task: None,
            last_screen: None,
        }
    }

    /// Returns the scenario task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Presses an inline button as the owner and keeps the resulting screen.
    pub fn press(&mut self, action: CallbackAction) {
        let inbound = InboundAction::new(
            UserProfile::new(OWNER, "Owner"),
            UserInput::Callback(action.encode()),
        );
        self.last_screen = Some(run_async(self.router.handle(inbound)));
    }
}

impl Default for TaskChangeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskChangeWorld {
    TaskChangeWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
