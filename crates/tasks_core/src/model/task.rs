//! Task domain model.
//!
//! # Invariants
//! - `id` is assigned by the store, strictly increasing and never reused.
//! - `title`, `completed` and `created_at` never change after creation.

use serde::{Deserialize, Serialize};

/// Store-assigned task identifier.
pub type TaskId = i64;

/// One persisted to-do item.
///
/// Field names double as the JSON keys of the HTTP surface and must not be
/// renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    /// Insertion time in UTC, RFC 3339 with second precision
    /// (`2024-05-01T10:00:00Z`).
    pub created_at: String,
}
