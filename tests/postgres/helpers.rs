//! Fixtures for the `PostgreSQL` adapter tests.

pub use super::cluster::{BoxError, PostgresCluster, TemporaryDatabase, postgres_cluster};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use dotask::storage::{CREATE_SCHEMA_SQL, build_pool};
use dotask::task::adapters::postgres::PostgresTaskRepository;
use dotask::task::domain::{Task, TaskContent, TaskPriority};
use dotask::user::adapters::postgres::PostgresUserRepository;
use dotask::user::domain::{UserId, UserProfile};
use dotask::user::ports::UserRepository;
use mockable::Clock;
use rstest::fixture;
use std::sync::RwLock;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Database holding the migrated schema that each test clones.
pub const TEMPLATE_DB: &str = "dotask_test_template";

pub const ALICE: UserId = UserId::new(7);
pub const BOB: UserId = UserId::new(8);

/// Builds the runtime that keeps an in-process cluster alive.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Clock that only moves when told to.
///
/// Timestamps stay on whole seconds so they survive the trip through
/// `TIMESTAMPTZ` unchanged.
#[derive(Debug)]
pub struct SteppingClock(RwLock<DateTime<Utc>>);

impl SteppingClock {
    pub fn advance(&self, delta: TimeDelta) {
        if let Ok(mut now) = self.0.write() {
            *now += delta;
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0.read().map_or(DateTime::UNIX_EPOCH, |now| *now)
    }
}

/// 2026-03-10 09:00 UTC.
pub fn tuesday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[fixture]
pub fn clock() -> SteppingClock {
    SteppingClock(RwLock::new(tuesday_morning()))
}

/// Repositories over a private database cloned from the template.
pub struct PostgresContext {
    pub tasks: PostgresTaskRepository,
    pub users: PostgresUserRepository,
    _database: TemporaryDatabase,
}

impl PostgresContext {
    /// Registers `owner` so their tasks satisfy the foreign key.
    pub async fn register(&self, owner: UserId) -> Result<(), BoxError> {
        self.users
            .upsert(&UserProfile::new(owner, format!("User {owner}")), tuesday_morning())
            .await?;
        Ok(())
    }
}

/// Creates the template database with the bundled schema applied.
pub async fn ensure_template(cluster: PostgresCluster) -> Result<(), BoxError> {
    tokio::task::spawn_blocking(move || cluster.ensure_database(TEMPLATE_DB, apply_schema))
        .await
        .map_err(|err| Box::new(err) as BoxError)?
}

fn apply_schema(url: &str) -> Result<(), BoxError> {
    let mut connection = PgConnection::establish(url).map_err(|err| Box::new(err) as BoxError)?;
    connection
        .batch_execute(CREATE_SCHEMA_SQL)
        .map_err(|err| Box::new(err) as BoxError)
}

/// Provides both repositories over a fresh database.
#[fixture]
pub async fn repositories(
    postgres_cluster: Result<PostgresCluster, BoxError>,
) -> Result<PostgresContext, BoxError> {
    let cluster = postgres_cluster?;
    ensure_template(cluster).await?;
    let database = cluster
        .temporary_database_from_template(&format!("dotask_{}", Uuid::new_v4()), TEMPLATE_DB)
        .await?;
    let pool = build_pool(database.url(), 2)?;
    Ok(PostgresContext {
        tasks: PostgresTaskRepository::new(pool.clone()),
        users: PostgresUserRepository::new(pool),
        _database: database,
    })
}

/// Builds a pending task at the clock's current instant.
pub fn task(
    owner: UserId,
    content: &str,
    due_at: Option<DateTime<Utc>>,
    priority: TaskPriority,
    clock: &SteppingClock,
) -> Task {
    let text = TaskContent::new(content).unwrap_or_else(|err| panic!("{content:?}: {err}"));
    Task::new(owner, text, due_at, priority, clock)
}
