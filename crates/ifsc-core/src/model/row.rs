//! Storage-neutral row representation.
//!
//! The storage executor hands back rows as a mapping from column name to
//! value; entities are decoded from these without touching the driver types.

use std::collections::BTreeMap;

use crate::errors::{ExError, ExErrorKind, Result};

/// A single column value, mirroring SQLite's storage classes.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Integer(i64::from(v))
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

/// One result row keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: BTreeMap<String, SqlValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn remove(&mut self, column: &str) -> Option<SqlValue> {
        self.columns.remove(column)
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns.get(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Read an integer column. Missing or non-integer values are an error.
    pub fn get_i64(&self, column: &str) -> Result<i64> {
        match self.require(column)? {
            SqlValue::Integer(v) => Ok(*v),
            other => Err(type_mismatch(column, "integer", other)),
        }
    }

    /// Read a text column; `NULL` reads as the empty string.
    pub fn get_text(&self, column: &str) -> Result<String> {
        match self.require(column)? {
            SqlValue::Text(v) => Ok(v.clone()),
            SqlValue::Null => Ok(String::new()),
            other => Err(type_mismatch(column, "text", other)),
        }
    }

    fn require(&self, column: &str) -> Result<&SqlValue> {
        self.columns.get(column).ok_or_else(|| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("row_decode")
                .with_message(format!("missing column '{}'", column))
        })
    }
}

impl FromIterator<(String, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, SqlValue)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

fn type_mismatch(column: &str, expected: &str, found: &SqlValue) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("row_decode")
        .with_message(format!(
            "column '{}' expected {}, found {:?}",
            column, expected, found
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let row = Row::new()
            .with("id", 7)
            .with("name", "Alpha")
            .with("address", SqlValue::Null);
        assert_eq!(row.get_i64("id").unwrap(), 7);
        assert_eq!(row.get_text("name").unwrap(), "Alpha");
        assert_eq!(row.get_text("address").unwrap(), "");
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_missing_and_mismatched_columns() {
        let row = Row::new().with("id", "seven");
        let err = row.get_i64("id").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
        let err = row.get_text("name").unwrap_err();
        assert!(err.message().contains("missing column 'name'"));
    }
}
