//! Request handlers for the task endpoints.

use axum::{
    body::Bytes,
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tasks_core::{RepoError, RepoResult, Task, TaskId, TaskRepository};
use tokio::task::JoinError;

use crate::api::types::{CreateTaskRequest, CreateTaskResponse};
use crate::api::AppState;

const INVALID_BODY_MESSAGE: &str = "Invalid JSON";
const INVALID_ID_MESSAGE: &str = "Invalid task ID";
const LIST_FAILED_MESSAGE: &str = "Failed to fetch tasks";
const CREATE_FAILED_MESSAGE: &str = "Failed to create task";
const DELETE_FAILED_MESSAGE: &str = "Failed to delete task";

/// API errors for task operations.
#[derive(Debug)]
pub enum ApiError {
    /// Request body is not a valid task payload.
    InvalidBody(serde_json::Error),
    /// Path segment is not an integer id.
    InvalidTaskId(String),
    /// Repository call failed; `message` is the client-facing text.
    Storage {
        message: &'static str,
        source: RepoError,
    },
    /// Blocking repository call did not complete.
    Worker {
        message: &'static str,
        source: JoinError,
    },
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBody(err) => write!(f, "invalid request body: {err}"),
            Self::InvalidTaskId(raw) => write!(f, "invalid task id `{raw}`"),
            Self::Storage { message, source } => write!(f, "{message}: {source}"),
            Self::Worker { message, source } => write!(f, "{message}: {source}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBody(err) => Some(err),
            Self::InvalidTaskId(_) => None,
            Self::Storage { source, .. } => Some(source),
            Self::Worker { source, .. } => Some(source),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidBody(_) => {
                debug!("event=http_reject module=api status=invalid_body error={}", self);
                (StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE)
            }
            Self::InvalidTaskId(_) => {
                debug!("event=http_reject module=api status=invalid_id error={}", self);
                (StatusCode::BAD_REQUEST, INVALID_ID_MESSAGE)
            }
            Self::Storage { message, .. } | Self::Worker { message, .. } => {
                error!("event=http_error module=api status=error error={}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, *message)
            }
        };

        (status, message).into_response()
    }
}

/// GET /tasks
///
/// Lists every task, newest first. An empty store yields `[]`.
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = run_blocking(&state, LIST_FAILED_MESSAGE, |repo| repo.list_tasks()).await?;
    Ok(Json(tasks))
}

/// POST /tasks
///
/// Creates a task from `{title, completed}` and returns `{id}` with 201.
pub async fn create_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateTaskResponse>), ApiError> {
    // Parsed by hand so that any malformed body maps to 400, independent of
    // the Content-Type header.
    let input: CreateTaskRequest =
        serde_json::from_slice(&body).map_err(ApiError::InvalidBody)?;

    let id = run_blocking(&state, CREATE_FAILED_MESSAGE, move |repo| {
        repo.create_task(&input.title, input.completed)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(CreateTaskResponse { id })))
}

/// DELETE /tasks/{id}
///
/// Deletes a task by id. Unknown ids still answer 204.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: TaskId = raw_id
        .parse()
        .map_err(|_| ApiError::InvalidTaskId(raw_id.clone()))?;

    run_blocking(&state, DELETE_FAILED_MESSAGE, move |repo| repo.delete_task(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn run_blocking<T, F>(state: &AppState, message: &'static str, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn TaskRepository) -> RepoResult<T> + Send + 'static,
{
    let repo = state.repo();
    match tokio::task::spawn_blocking(move || op(repo.as_ref())).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(ApiError::Storage { message, source }),
        Err(source) => Err(ApiError::Worker { message, source }),
    }
}
