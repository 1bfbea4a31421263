//! Domain model for tracked tasks.
//!
//! # Responsibility
//! - Define the record shape shared by persistence and transport layers.
//!
//! # Invariants
//! - Every task is identified by a store-assigned `TaskId`.
//! - Tasks are immutable after creation; deletion is a hard delete.

pub mod task;
