//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own the `tasks` table: schema setup, inserts, listing and deletes.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - No content validation on write paths; callers own input rules.
//! - Listing is best-effort per row: undecodable rows are logged and skipped.
//! - Deleting a missing id is a successful no-op.

use crate::db::{ConnectionPool, DbError, PooledConnection};
use crate::model::task::{Task, TaskId};
use log::{debug, error, info, warn};
use rusqlite::{params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASKS_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    completed BOOLEAN DEFAULT FALSE,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);";

// Stored as `YYYY-MM-DD HH:MM:SS` UTC; emitted as RFC 3339. Rows whose
// timestamp does not parse come back NULL and are skipped as undecodable.
const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    completed,
    strftime('%Y-%m-%dT%H:%M:%SZ', created_at) AS created_at
FROM tasks
ORDER BY tasks.created_at DESC, id DESC";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// The store cannot be reached or the schema cannot be prepared.
    StorageUnavailable(DbError),
    /// A read statement could not be issued.
    StorageRead(DbError),
    /// A write statement could not be executed.
    StorageWrite(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::StorageRead(err) => write!(f, "storage read failed: {err}"),
            Self::StorageWrite(err) => write!(f, "storage write failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) | Self::StorageRead(err) | Self::StorageWrite(err) => {
                Some(err)
            }
        }
    }
}

/// Repository interface for task persistence.
///
/// Implementations are shared across request handlers, so they must be safe
/// to call concurrently without external locking.
pub trait TaskRepository: Send + Sync {
    /// Ensures the backing table exists. Safe to call on every start.
    fn init_schema(&self) -> RepoResult<()>;
    /// Inserts a task and returns the store-assigned id.
    fn create_task(&self, title: &str, completed: bool) -> RepoResult<TaskId>;
    /// Returns every task, newest first.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Removes the task with `id` if it exists.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository over a shared connection pool.
#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: ConnectionPool,
}

impl SqliteTaskRepository {
    /// Wraps an existing pool without touching the store.
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Wraps `pool` and ensures the schema exists.
    ///
    /// # Errors
    /// - Returns `RepoError::StorageUnavailable` when schema setup fails.
    pub fn try_new(pool: ConnectionPool) -> RepoResult<Self> {
        let repo = Self::new(pool);
        repo.init_schema()?;
        Ok(repo)
    }

    fn connection(&self, wrap: fn(DbError) -> RepoError) -> RepoResult<PooledConnection> {
        self.pool.get().map_err(|err| wrap(err.into()))
    }
}

impl TaskRepository for SqliteTaskRepository {
    fn init_schema(&self) -> RepoResult<()> {
        let conn = self.connection(RepoError::StorageUnavailable)?;
        if let Err(err) = conn.execute_batch(TASKS_SCHEMA_SQL) {
            error!("event=schema_init module=repo status=error error={}", err);
            return Err(RepoError::StorageUnavailable(err.into()));
        }

        info!("event=schema_init module=repo status=ok table=tasks");
        Ok(())
    }

    fn create_task(&self, title: &str, completed: bool) -> RepoResult<TaskId> {
        let conn = self.connection(RepoError::StorageWrite)?;
        conn.execute(
            "INSERT INTO tasks (title, completed) VALUES (?1, ?2);",
            params![title, completed],
        )
        .map_err(|err| RepoError::StorageWrite(err.into()))?;

        let id = conn.last_insert_rowid();
        debug!("event=task_create module=repo status=ok id={}", id);
        Ok(id)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let conn = self.connection(RepoError::StorageRead)?;
        let mut stmt = conn
            .prepare(TASK_SELECT_SQL)
            .map_err(|err| RepoError::StorageRead(err.into()))?;

        let tasks = stmt
            .query_map([], parse_task_row)
            .map_err(|err| RepoError::StorageRead(err.into()))?
            .filter_map(|row| match row {
                Ok(task) => Some(task),
                Err(err) => {
                    warn!(
                        "event=task_list module=repo status=skip_row error={}",
                        err
                    );
                    None
                }
            })
            .collect::<Vec<_>>();

        debug!("event=task_list module=repo status=ok count={}", tasks.len());
        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let conn = self.connection(RepoError::StorageWrite)?;
        let changed = conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id])
            .map_err(|err| RepoError::StorageWrite(err.into()))?;

        debug!(
            "event=task_delete module=repo status=ok id={} rows={}",
            id, changed
        );
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        completed: row.get("completed")?,
        created_at: row.get("created_at")?,
    })
}
