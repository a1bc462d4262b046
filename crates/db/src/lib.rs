//! `db` crate — persistence layer for job postings.
//!
//! Provides a connection pool, typed records, the partial-update SQL builder
//! and repository functions for the `jobs` table.  No HTTP or auth concerns
//! live here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;
pub mod sql;

pub use pool::DbPool;
pub use error::DbError;
pub use models::{Job, JobUpdate, NewJob, RemovedJob};
pub use sql::{sql_for_partial_update, PartialUpdate, SqlValue};
