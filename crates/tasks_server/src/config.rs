//! Runtime configuration for the tasks server.
//!
//! Values come from built-in defaults overlaid by `TASKS__*` environment
//! variables, e.g. `TASKS__SERVER__PORT=9000`.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;
use tasks_core::PoolConfig;

const IN_MEMORY_PATH: &str = ":memory:";

/// Top-level configuration for the tasks server.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// SQLite store settings.
    pub database: DatabaseSettings,
    /// Log sink settings.
    pub logging: LoggingSettings,
}

/// HTTP listener settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

/// SQLite store settings.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// Database file path, or `:memory:` for a throwaway store.
    pub path: String,
    /// Maximum pooled connections for file databases.
    pub pool_size: u32,
    /// Milliseconds to wait when opening or checking out a connection.
    pub connection_timeout_ms: u64,
}

impl DatabaseSettings {
    /// Whether the store lives only for the process lifetime.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }

    /// Pool options for file-backed stores.
    #[must_use]
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            pool_size: self.pool_size,
            connection_timeout: Duration::from_millis(self.connection_timeout_ms),
        }
    }
}

/// Log sink settings.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files; stderr only when unset.
    pub dir: Option<String>,
}

impl Settings {
    /// Loads settings from defaults and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built or deserialized.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("TASKS").separator("__"))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.path", "./tasks.db")?
            .set_default("database.pool_size", 8)?
            .set_default("database.connection_timeout_ms", 5000)?
            .set_default("logging.level", tasks_core::default_log_level())?
            .add_source(environment)
            .build()?;

        s.try_deserialize()
    }

    /// `host:port` string suitable for binding a listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
