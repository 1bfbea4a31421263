//! Request/response bodies for the task API.

use serde::{Deserialize, Serialize};
use tasks_core::TaskId;

/// Body of `POST /tasks`.
///
/// Missing fields fall back to their zero values; no field is required.
/// Capitalized keys (`Title`, `Completed`) are accepted as well, matching
/// clients written against the exported-field form of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateTaskRequest {
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Completed")]
    pub completed: bool,
}

/// Body returned by `POST /tasks` on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreateTaskResponse {
    pub id: TaskId,
}
