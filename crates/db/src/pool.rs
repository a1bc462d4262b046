//! Postgres connection pool and schema migrations.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::DbError;

/// The pool handle every repository function borrows.
pub type DbPool = PgPool;

/// Default pool ceiling when the caller doesn't configure one.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open a pool against `database_url` holding at most `max_connections`.
///
/// Connections are checked out per statement and returned by `sqlx` on every
/// exit path.
#[instrument(skip(database_url))]
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    info!(max_connections, "connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Apply the migrations embedded from the workspace `migrations/` directory
/// (`companies` and `jobs`).
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(migrations = migrator.iter().count(), "running database migrations");
    migrator.run(pool).await?;
    Ok(())
}
