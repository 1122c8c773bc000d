//! `DoTask` bot binary.
//!
//! Loads settings, initialises logging, wires the configured storage
//! backend, and long-polls Telegram until interrupted.

use dotask::config::{ConfigError, Settings, StorageBackend};
use dotask::dispatch::{ActionRouter, RouterDeps};
use dotask::reporting::TracingErrorReporter;
use dotask::session::adapters::MokaInteractionStore;
use dotask::storage::{apply_schema, build_pool};
use dotask::task::adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository};
use dotask::task::ports::TaskRepository;
use dotask::transport::telegram::{BotContext, TelegramTransport, run};
use dotask::user::adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository};
use dotask::user::ports::UserRepository;
use mockable::DefaultClock;
use std::error::Error;
use std::sync::Arc;
use teloxide::Bot;
use tracing::info;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn Error + Send + Sync>;

type Repositories = (Arc<dyn TaskRepository>, Arc<dyn UserRepository>);

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let settings = Settings::load_with_dotenv()?;
    init_tracing(&settings.log.filter)?;

    let policy = settings.policy()?;
    let (tasks, users) = repositories(&settings).await?;
    let deps = RouterDeps {
        tasks,
        users,
        interactions: Arc::new(MokaInteractionStore::new(settings.idle_timeout())),
        reporter: Arc::new(TracingErrorReporter),
        clock: Arc::new(DefaultClock),
    };
    let router = ActionRouter::new(deps, policy)?;

    let bot = Bot::new(settings.telegram.token.clone());
    let transport = Arc::new(TelegramTransport::new(bot.clone()));
    run(bot, Arc::new(BotContext::new(router, transport))).await;
    info!("stopped");
    Ok(())
}

fn init_tracing(default_filter: &str) -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env()
        .ok()
        .map_or_else(|| EnvFilter::try_new(default_filter), Ok)?;
    tracing_subscriber::fmt().with_env_filter(filter).try_init()?;
    Ok(())
}

async fn repositories(settings: &Settings) -> Result<Repositories, BoxError> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            info!("using in-memory storage");
            let tasks: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
            let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
            Ok((tasks, users))
        }
        StorageBackend::Postgres => {
            let url = settings
                .database_url()
                .ok_or(ConfigError::Missing("storage.database_url"))?;
            let pool = build_pool(url, settings.storage.pool_size)?;
            apply_schema(&pool).await?;
            info!(pool_size = settings.storage.pool_size, "using PostgreSQL storage");
            let tasks: Arc<dyn TaskRepository> = Arc::new(PostgresTaskRepository::new(pool.clone()));
            let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool));
            Ok((tasks, users))
        }
    }
}
