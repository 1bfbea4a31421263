//! Connection pool bootstrap for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite pools.
//! - Apply per-connection pragmas on every new connection.
//!
//! # Invariants
//! - Every pooled connection has a busy timeout configured.
//! - File-backed connections run in WAL journal mode.
//! - In-memory pools hold exactly one connection that is never recycled, so
//!   all callers observe the same database.

use super::DbResult;
use log::{error, info};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Shared pool type handed to repositories.
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Connection checked out from a [`ConnectionPool`].
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Sizing and timeout options for file-backed pools.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum pooled connections (default: 8, at least 1 is always used).
    pub pool_size: u32,
    /// How long opening or checking out a connection may wait (default: 5s).
    pub connection_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }
}

#[derive(Debug)]
struct PragmaCustomizer {
    wal: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        if self.wal {
            // journal_mode returns a row, so execute_batch is required here.
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        Ok(())
    }
}

/// Opens a file-backed SQLite pool sized and timed by `config`.
///
/// The file is created on first connection if it does not exist.
///
/// # Side effects
/// - Opens connections eagerly, so an unreachable store fails here after
///   `config.connection_timeout`.
/// - Emits `db_open` logging events with duration and status.
pub fn open_pool(path: impl AsRef<Path>, config: &PoolConfig) -> DbResult<ConnectionPool> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let manager = SqliteConnectionManager::file(path.as_ref());
    let result = Pool::builder()
        .max_size(config.pool_size.max(1))
        .connection_timeout(config.connection_timeout)
        .connection_customizer(Box::new(PragmaCustomizer { wal: true }))
        .build(manager);

    finish_open(result, "file", started_at)
}

/// Opens an in-memory SQLite pool backed by a single long-lived connection.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_pool_in_memory() -> DbResult<ConnectionPool> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    // Each in-memory connection is its own database; pin the pool to one.
    let result = Pool::builder()
        .max_size(1)
        .min_idle(Some(1))
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_timeout(DEFAULT_CONNECTION_TIMEOUT)
        .connection_customizer(Box::new(PragmaCustomizer { wal: false }))
        .build(SqliteConnectionManager::memory());

    finish_open(result, "memory", started_at)
}

fn finish_open(
    result: Result<ConnectionPool, r2d2::Error>,
    mode: &str,
    started_at: Instant,
) -> DbResult<ConnectionPool> {
    match result {
        Ok(pool) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(pool)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err.into())
        }
    }
}
