//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use papertrack_core::SqliteStore;

use crate::config::Config;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Past-paper record store.
    pub store: Arc<SqliteStore>,
}
