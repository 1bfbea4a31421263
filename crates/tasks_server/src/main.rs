//! Tasks server entry point.
//!
//! # Responsibility
//! - Load settings, start logging and open the store.
//! - Refuse to serve when the schema cannot be prepared.
//! - Serve the task API until interrupted.

use anyhow::{anyhow, Context};
use log::{error, info};
use std::sync::Arc;
use tasks_core::{init_logging, open_pool, open_pool_in_memory, SqliteTaskRepository};
use tasks_server::{router, AppState, Settings};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!("event=server_exit module=server status=error error={:#}", err);
        eprintln!("tasks_server: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Settings::new().context("failed to load configuration")?;

    init_logging(&settings.logging.level, settings.logging.dir.as_deref())
        .map_err(|err| anyhow!(err))
        .context("failed to initialize logging")?;

    let pool = if settings.database.is_in_memory() {
        open_pool_in_memory()
    } else {
        open_pool(&settings.database.path, &settings.database.pool_config())
    }
    .with_context(|| format!("failed to open database `{}`", settings.database.path))?;

    let repo = SqliteTaskRepository::try_new(pool).context("failed to initialize schema")?;
    let app = router(AppState::new(Arc::new(repo)));

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind `{addr}`"))?;

    info!(
        "event=server_start module=server status=ok addr={} version={}",
        listener.local_addr().map_or(addr, |local| local.to_string()),
        tasks_core::core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("event=shutdown_signal module=server status=ok"),
        Err(err) => {
            // Without a signal handler, keep serving until the process is killed.
            error!("event=shutdown_signal module=server status=error error={}", err);
            std::future::pending::<()>().await;
        }
    }
}
