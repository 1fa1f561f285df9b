use thiserror::Error;

/// Failures raised by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection, query or row-decoding failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The embedded schema could not be applied.
    #[error("schema error: {0}")]
    Schema(#[from] sqlx::migrate::MigrateError),
}
