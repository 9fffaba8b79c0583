use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::model::Row;

/// A bank. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub id: i64,
    pub name: String,
}

impl Bank {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Decode a bank from a `banks` row (`id`, `name`).
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get_i64("id")?,
            name: row.get_text("name")?,
        })
    }
}
