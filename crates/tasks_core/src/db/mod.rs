//! SQLite storage bootstrap.
//!
//! # Responsibility
//! - Build the process-wide SQLite connection pool.
//! - Configure connection pragmas required by core behavior.
//!
//! # Invariants
//! - One pool is created at startup and shared for the process lifetime.
//! - Opening a pool never creates application tables; schema setup belongs to
//!   the repository layer.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_pool, open_pool_in_memory, ConnectionPool, PoolConfig, PooledConnection};

pub type DbResult<T> = Result<T, DbError>;

/// Transport-level storage error.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Pool(r2d2::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Pool(err) => write!(f, "connection pool error: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Pool(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<r2d2::Error> for DbError {
    fn from(value: r2d2::Error) -> Self {
        Self::Pool(value)
    }
}
