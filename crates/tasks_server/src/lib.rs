//! HTTP service exposing the task repository.
//! Routing, handlers and runtime configuration live here; storage stays in
//! `tasks_core`.

pub mod api;
pub mod config;
pub mod routes;

pub use api::{ApiError, AppState};
pub use config::Settings;
pub use routes::router;
