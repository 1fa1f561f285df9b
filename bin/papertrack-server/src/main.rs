//! papertrack-server – entry point.
//!
//! Startup order:
//! 1. Parse configuration from environment variables.
//! 2. Initialise structured tracing (JSON or pretty).
//! 3. Open the SQLite store and apply the schema.
//! 4. Run the one-time store initialisation (optional dev reset, demo seed).
//! 5. Build the Axum router and start the HTTP server with graceful shutdown.

mod config;
mod error;
mod middleware;
mod routes;
mod schemas;
mod state;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use papertrack_core::{init_store, InitOptions, SqliteStore};
use tracing::{info, warn};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cfg = Config::from_env();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    // RUST_LOG wins; otherwise PAPERTRACK_LOG, falling back to `info` when that
    // is not a valid filter expression.
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: PAPERTRACK_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(version = env!("CARGO_PKG_VERSION"), "papertrack-server starting");

    // ── 3. Database ────────────────────────────────────────────────────────────
    if let Some(parent) = cfg.database_path().and_then(|p| Path::new(p).parent()) {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let store = SqliteStore::connect(&cfg.database_url, cfg.db_max_connections).await?;
    info!(database_url = %cfg.database_url, "database ready");

    // ── 4. Store initialisation ────────────────────────────────────────────────
    if cfg.dev_reset {
        warn!("PAPERTRACK_DEV_RESET is set: existing records will be dropped (development only)");
    }
    let report = init_store(
        &store,
        InitOptions {
            allow_destructive_reset: cfg.dev_reset,
            seed_if_empty: cfg.seed_demo_data,
        },
    )
    .await?;
    info!(reset = report.reset, inserted = report.inserted, "store initialised");

    // ── 5. HTTP server with graceful shutdown ──────────────────────────────────
    let store = Arc::new(store);
    let state = Arc::new(AppState {
        config: Arc::new(cfg.clone()),
        store: Arc::clone(&store),
    });

    let app = routes::build(state);
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("papertrack-server stopped");
    Ok(())
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
