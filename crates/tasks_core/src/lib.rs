//! Core persistence logic for the tasks service.
//! This crate is the single owner of task storage and its schema.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_pool, open_pool_in_memory, ConnectionPool, DbError, PoolConfig};
pub use logging::{default_log_level, init_logging};
pub use model::task::{Task, TaskId};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
