//! Job posting CRUD operations.
//!
//! Each function is one parameterized statement against the `jobs` table.
//! `equity` is written as `NUMERIC` and read back through `equity::TEXT` so
//! callers see exactly what was stored.

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::{
    DbError,
    models::{Job, JobUpdate, NewJob, RemovedJob, JOB_COLUMN_NAMES},
    sql::{parse_decimal, sql_for_partial_update},
};

/// Columns returned for a full [`Job`].
const JOB_COLUMNS: &str = "id, title, salary, equity::TEXT AS equity, company_handle";

fn not_found(id: i32) -> DbError {
    DbError::NotFound(format!("No job with id = {id}"))
}

/// Insert a new job and return it with its generated `id`.
///
/// Constraint violations (unknown company, negative salary, equity above 1)
/// come back as [`DbError::Sqlx`].
#[instrument(skip(pool, job), fields(title = %job.title, company = %job.company_handle))]
pub async fn create_job(pool: &PgPool, job: &NewJob) -> Result<Job, DbError> {
    let equity = job
        .equity
        .as_deref()
        .map(|text| parse_decimal("equity", text))
        .transpose()?;

    let row = sqlx::query_as::<_, Job>(&format!(
        r#"
        INSERT INTO jobs (title, salary, equity, company_handle)
        VALUES ($1, $2, $3, $4)
        RETURNING {JOB_COLUMNS}
        "#
    ))
    .bind(&job.title)
    .bind(job.salary)
    .bind(equity)
    .bind(&job.company_handle)
    .fetch_one(pool)
    .await?;

    debug!(id = row.id, "job created");
    Ok(row)
}

/// Return every job, in whatever order the database yields them.
#[instrument(skip(pool))]
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<Job>, DbError> {
    let rows = sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs"))
        .fetch_all(pool)
        .await?;

    debug!(count = rows.len(), "jobs listed");
    Ok(rows)
}

/// Fetch a single job by its primary key.
///
/// Returns `DbError::NotFound` if no row has that id.
#[instrument(skip(pool))]
pub async fn get_job(pool: &PgPool, id: i32) -> Result<Job, DbError> {
    let row = sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(row)
}

/// Apply a partial update and return the updated job.
///
/// Only the fields present in `changes` are written; `Some(None)` on
/// `salary` or `equity` sets the column to `NULL`. An empty update is a
/// `DbError::BadRequest`, a missing row a `DbError::NotFound`.
#[instrument(skip(pool, changes))]
pub async fn update_job(pool: &PgPool, id: i32, changes: &JobUpdate) -> Result<Job, DbError> {
    let fields = changes.fields()?;
    let update = sql_for_partial_update(&fields, JOB_COLUMN_NAMES)?;

    let statement = format!(
        r#"
        UPDATE jobs
        SET {}
        WHERE id = {}
        RETURNING {JOB_COLUMNS}
        "#,
        update.set_cols,
        update.next_placeholder(),
    );

    let query = update
        .values
        .into_iter()
        .fold(sqlx::query_as::<_, Job>(&statement), |q, value| value.bind_to(q));

    let row = query
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))?;

    debug!(columns = fields.len(), "job updated");
    Ok(row)
}

/// Permanently delete a job, returning its `id` and `title`.
///
/// Returns `DbError::NotFound` if no row was deleted.
#[instrument(skip(pool))]
pub async fn remove_job(pool: &PgPool, id: i32) -> Result<RemovedJob, DbError> {
    let row = sqlx::query_as::<_, RemovedJob>("DELETE FROM jobs WHERE id = $1 RETURNING id, title")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))?;

    debug!(title = %row.title, "job removed");
    Ok(row)
}
