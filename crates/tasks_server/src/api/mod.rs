//! HTTP adapter over the task repository.
//!
//! # Responsibility
//! - Translate HTTP requests into repository calls.
//! - Translate repository results and failures into HTTP responses.
//!
//! # Invariants
//! - Handlers hold no state beyond the shared repository handle.
//! - Storage failure details are logged, never returned to clients.

pub mod handlers;
pub mod types;

use std::sync::Arc;
use tasks_core::TaskRepository;

pub use handlers::ApiError;
pub use types::{CreateTaskRequest, CreateTaskResponse};

/// Shared handler state: the process-wide repository.
#[derive(Clone)]
pub struct AppState {
    repo: Arc<dyn TaskRepository>,
}

impl AppState {
    /// Wraps the repository constructed at startup.
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    /// Returns a handle to the shared repository.
    #[must_use]
    pub fn repo(&self) -> Arc<dyn TaskRepository> {
        Arc::clone(&self.repo)
    }
}
