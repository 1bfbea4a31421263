//! Route table for the task API.

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get},
    Router,
};
use log::info;
use std::time::Instant;

use crate::api::handlers::{create_task, delete_task, list_tasks};
use crate::api::AppState;

/// Builds the application router with all task endpoints.
///
/// Unknown paths answer 404 and unsupported methods 405.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", delete(delete_task))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    info!(
        "event=http_request module=api method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
