//! SQL fragment helpers shared by the repositories.
//!
//! [`sql_for_partial_update`] turns a sparse set of field changes into a
//! `SET` clause with numbered placeholders plus the values to bind to them.
//! Callers supply a translation table for fields whose column name differs
//! from the field name.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use sqlx::types::BigDecimal;

use crate::DbError;

/// A value bound to one numbered placeholder.
///
/// Each variant carries its own `Option` so an explicit `NULL` is still sent
/// with the column's type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(Option<i32>),
    Text(Option<String>),
    Numeric(Option<BigDecimal>),
}

impl SqlValue {
    /// Bind this value as the next positional parameter of `query`.
    pub fn bind_to<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            Self::Int(v) => query.bind(v),
            Self::Text(v) => query.bind(v),
            Self::Numeric(v) => query.bind(v),
        }
    }
}

/// Output of [`sql_for_partial_update`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    /// `"col1"=$1, "col2"=$2, ...`
    pub set_cols: String,
    /// Values for `$1..$N`, same order as `set_cols`.
    pub values: Vec<SqlValue>,
}

impl PartialUpdate {
    /// Placeholder for a parameter appended after the `SET` values,
    /// e.g. the `WHERE id = ...` bind.
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.values.len() + 1)
    }
}

/// Build the `SET` clause for a partial update.
///
/// `data` holds `(field name, new value)` pairs in the order they should be
/// written. `js_to_sql` maps field names to column names where they differ;
/// any field missing from it is used as the column name unchanged.
///
/// Fails with [`DbError::BadRequest`] when `data` is empty, so callers never
/// issue an `UPDATE` without columns.
pub fn sql_for_partial_update(
    data: &[(&str, SqlValue)],
    js_to_sql: &[(&str, &str)],
) -> Result<PartialUpdate, DbError> {
    if data.is_empty() {
        return Err(DbError::BadRequest("No data".to_string()));
    }

    let set_cols = data
        .iter()
        .enumerate()
        .map(|(idx, (field, _))| {
            let column = js_to_sql
                .iter()
                .find(|(from, _)| from == field)
                .map_or(*field, |(_, to)| *to);
            format!("\"{}\"=${}", column, idx + 1)
        })
        .collect::<Vec<_>>()
        .join(", ");

    let values = data.iter().map(|(_, value)| value.clone()).collect();

    Ok(PartialUpdate { set_cols, values })
}

/// Parse decimal text (e.g. `"0"`, `"0.5"`) for a `NUMERIC` column.
///
/// Every digit and the scale are kept, so the column stores exactly what
/// the caller wrote.
pub fn parse_decimal(field: &str, text: &str) -> Result<BigDecimal, DbError> {
    text.trim()
        .parse::<BigDecimal>()
        .map_err(|e| DbError::BadRequest(format!("{field} must be a decimal number: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SqlValue {
        SqlValue::Text(Some(s.to_string()))
    }

    fn numeric(s: &str) -> SqlValue {
        SqlValue::Numeric(Some(s.parse().unwrap()))
    }

    #[test]
    fn single_field_uses_first_placeholder() {
        let out = sql_for_partial_update(&[("title", text("New"))], &[]).unwrap();
        assert_eq!(out.set_cols, "\"title\"=$1");
        assert_eq!(out.values, vec![text("New")]);
        assert_eq!(out.next_placeholder(), "$2");
    }

    #[test]
    fn assignments_follow_input_order() {
        let data = [
            ("salary", SqlValue::Int(Some(100_000))),
            ("title", text("New")),
            ("equity", numeric("0.5")),
        ];
        let out = sql_for_partial_update(&data, &[]).unwrap();

        assert_eq!(out.set_cols, "\"salary\"=$1, \"title\"=$2, \"equity\"=$3");
        assert_eq!(out.values.len(), 3);
        assert_eq!(out.values[0], SqlValue::Int(Some(100_000)));
        assert_eq!(out.values[1], text("New"));
        assert_eq!(out.values[2], numeric("0.5"));
        assert_eq!(out.next_placeholder(), "$4");
    }

    #[test]
    fn translated_fields_use_column_name() {
        let data = [("title", text("New")), ("companyHandle", text("c1"))];
        let out =
            sql_for_partial_update(&data, &[("companyHandle", "company_handle")]).unwrap();
        assert_eq!(out.set_cols, "\"title\"=$1, \"company_handle\"=$2");
    }

    #[test]
    fn unused_translations_are_ignored() {
        let data = [("title", text("New"))];
        let out = sql_for_partial_update(
            &data,
            &[("companyHandle", "company_handle"), ("numEmployees", "num_employees")],
        )
        .unwrap();
        assert_eq!(out.set_cols, "\"title\"=$1");
    }

    #[test]
    fn explicit_null_is_kept_as_a_value() {
        let data = [("salary", SqlValue::Int(None)), ("equity", SqlValue::Numeric(None))];
        let out = sql_for_partial_update(&data, &[]).unwrap();
        assert_eq!(out.set_cols, "\"salary\"=$1, \"equity\"=$2");
        assert_eq!(out.values, vec![SqlValue::Int(None), SqlValue::Numeric(None)]);
    }

    #[test]
    fn empty_data_is_a_bad_request() {
        for table in [&[][..], &[("companyHandle", "company_handle")][..]] {
            let err = sql_for_partial_update(&[], table).unwrap_err();
            assert!(matches!(err, DbError::BadRequest(_)), "got {err:?}");
        }
    }

    #[test]
    fn parse_decimal_keeps_scale() {
        let (digits, scale) = parse_decimal("equity", "0.50").unwrap().as_bigint_and_exponent();
        assert_eq!((digits.to_string().as_str(), scale), ("50", 2));

        let (digits, scale) = parse_decimal("equity", "0").unwrap().as_bigint_and_exponent();
        assert_eq!((digits.to_string().as_str(), scale), ("0", 0));
    }

    #[test]
    fn parse_decimal_keeps_every_digit() {
        let long = "0.12345678901234567890123456789";
        let (digits, scale) = parse_decimal("equity", long).unwrap().as_bigint_and_exponent();
        assert_eq!(digits.to_string(), "12345678901234567890123456789");
        assert_eq!(scale, 29);
    }

    #[test]
    fn parse_decimal_rejects_non_numbers() {
        let err = parse_decimal("equity", "lots").unwrap_err();
        match err {
            DbError::BadRequest(msg) => assert!(msg.starts_with("equity")),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }
}
