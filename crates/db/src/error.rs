//! Typed error type for the db crate.

use thiserror::Error;

/// Errors returned by pool setup and every repository function.
///
/// `NotFound` and `BadRequest` are the domain kinds callers are expected to
/// match on; everything else from the driver is passed through untouched.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// An id-targeted statement matched zero rows.
    #[error("{0}")]
    NotFound(String),

    /// The caller supplied nothing to write, or a value the column can't hold.
    #[error("{0}")]
    BadRequest(String),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
