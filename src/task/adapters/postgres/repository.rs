//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::storage::{PgPool, StorageError, run_blocking};
use crate::task::{
    domain::{
        DueWindow, PersistedTaskData, Task, TaskContent, TaskId, TaskPage, TaskPriority,
        TaskQuery, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<StorageError> for TaskRepositoryError {
    fn from(err: StorageError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        run_blocking(&self.pool, move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<TaskPage> {
        let selection = *query;
        run_blocking(&self.pool, move |connection| {
            let total: i64 = filtered(&selection)
                .count()
                .get_result(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let limit = i64::from(selection.page.per_page());
            let offset =
                i64::try_from(selection.page.offset()).map_err(TaskRepositoryError::persistence)?;

            let rows = filtered(&selection)
                .order((
                    tasks::due_at.asc().nulls_last(),
                    tasks::created_at.asc(),
                    tasks::id.asc(),
                ))
                .limit(limit)
                .offset(offset)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let tasks = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskRepositoryResult<Vec<_>>>()?;
            Ok(TaskPage {
                tasks,
                total: u64::try_from(total).map_err(TaskRepositoryError::persistence)?,
                page: selection.page,
            })
        })
        .await
    }
}

/// Builds the owner-scoped, filtered base query shared by count and load.
fn filtered(query: &TaskQuery) -> tasks::BoxedQuery<'static, Pg> {
    let mut statement = tasks::table
        .filter(tasks::owner_id.eq(query.owner.value()))
        .into_boxed();
    if let Some(status) = query.status {
        statement = statement.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(priority) = query.priority {
        statement = statement.filter(tasks::priority.eq(priority.as_str()));
    }
    match query.due {
        DueWindow::Any => statement,
        DueWindow::Between { start, end } => statement
            .filter(tasks::due_at.ge(start))
            .filter(tasks::due_at.lt(end)),
        DueWindow::Before(limit) => statement.filter(tasks::due_at.lt(limit)),
        DueWindow::Missing => statement.filter(tasks::due_at.is_null()),
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner().value(),
        content: task.content().as_str().to_owned(),
        due_at: task.due_at(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        content: task.content().as_str().to_owned(),
        due_at: task.due_at(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_id,
        content,
        due_at,
        priority,
        status,
        created_at,
        updated_at,
        completed_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner: UserId::new(owner_id),
        content: TaskContent::new(content).map_err(TaskRepositoryError::persistence)?,
        due_at,
        priority: TaskPriority::try_from(priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
        completed_at,
    };
    Ok(Task::from_persisted(data))
}
