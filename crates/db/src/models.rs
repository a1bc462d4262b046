//! Records that map onto the `jobs` table, plus the inputs for writing it.
//!
//! These are *persistence* models. Validation beyond what the columns
//! demand belongs to the caller.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::sql::{parse_decimal, SqlValue};
use crate::DbError;

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

/// A persisted job posting row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// `NUMERIC` rendered as text so the stored scale is preserved ("0", "0.50").
    pub equity: Option<String>,
    pub company_handle: String,
}

/// Input for inserting a job. The database assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<String>,
    pub company_handle: String,
}

/// What's left of a job after it has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RemovedJob {
    pub id: i32,
    pub title: String,
}

/// A partial update to a job.
///
/// `None` leaves the column alone. For the nullable columns the inner
/// `Option` is the new value, so `Some(None)` writes `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(
        default,
        deserialize_with = "not_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary: Option<Option<i32>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub equity: Option<Option<String>>,
    #[serde(
        default,
        alias = "company_handle",
        deserialize_with = "not_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_handle: Option<String>,
}

/// Field name to column name, for fields whose names differ.
pub const JOB_COLUMN_NAMES: &[(&str, &str)] = &[("companyHandle", "company_handle")];

impl JobUpdate {
    /// The fields this update sets, keyed by their camelCase names, in
    /// column order.
    pub fn fields(&self) -> Result<Vec<(&'static str, SqlValue)>, DbError> {
        let mut fields = Vec::with_capacity(4);

        if let Some(title) = &self.title {
            fields.push(("title", SqlValue::Text(Some(title.clone()))));
        }
        if let Some(salary) = self.salary {
            fields.push(("salary", SqlValue::Int(salary)));
        }
        if let Some(equity) = &self.equity {
            let value = equity
                .as_deref()
                .map(|text| parse_decimal("equity", text))
                .transpose()?;
            fields.push(("equity", SqlValue::Numeric(value)));
        }
        if let Some(handle) = &self.company_handle {
            fields.push(("companyHandle", SqlValue::Text(Some(handle.clone()))));
        }

        Ok(fields)
    }
}

/// Marks a key that was present in the input, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// For `NOT NULL` columns: a present key must carry a value.
fn not_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
