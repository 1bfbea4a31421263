//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract consumed by the HTTP layer.
//! - Isolate SQLite query details from request handling.
//!
//! # Invariants
//! - Every repository operation is a single independent statement.
//! - Repository APIs classify failures as unavailable/read/write so callers
//!   can map them without inspecting SQLite errors.

pub mod task_repo;
