//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for papertrack-server.
///
/// Every field has a default so the server works out-of-the-box without any
/// environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"127.0.0.1:5000"`).
    pub bind_address: String,

    /// sqlx SQLite URL (default: `"sqlite://instance/papertrack.db"`).
    pub database_url: String,

    /// Upper bound on pooled store connections.
    pub db_max_connections: u32,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated CORS origin allowlist. `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Mount Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,

    /// Drop and recreate the store at startup. Development only.
    pub dev_reset: bool,

    /// Insert the demonstration papers when the store is empty.
    pub seed_demo_data: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("PAPERTRACK_BIND", "127.0.0.1:5000"),
            database_url: env_or("PAPERTRACK_DATABASE_URL", "sqlite://instance/papertrack.db"),
            db_max_connections: parse_env("PAPERTRACK_DB_MAX_CONNECTIONS", 5),
            log_level: env_or("PAPERTRACK_LOG", "info"),
            log_json: env_flag("PAPERTRACK_LOG_JSON", false),
            cors_allowed_origins: std::env::var("PAPERTRACK_CORS_ORIGINS")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            enable_swagger: env_flag("PAPERTRACK_ENABLE_SWAGGER", true),
            dev_reset: env_flag("PAPERTRACK_DEV_RESET", false),
            seed_demo_data: env_flag("PAPERTRACK_SEED", true),
        }
    }

    /// Filesystem path of a file-backed SQLite URL, if any.
    pub fn database_path(&self) -> Option<&str> {
        let rest = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or(rest);
        if path.is_empty() || path == ":memory:" || path.starts_with("file:") {
            None
        } else {
            Some(path)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_owned(),
            database_url: "sqlite::memory:".to_owned(),
            db_max_connections: 1,
            log_level: "info".to_owned(),
            log_json: false,
            cors_allowed_origins: None,
            enable_swagger: true,
            dev_reset: false,
            seed_demo_data: true,
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
