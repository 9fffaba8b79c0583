use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::model::{Bank, Row};

/// A bank branch, identified by its IFSC code, with its owning bank inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub ifsc: String,
    #[serde(rename = "branch")]
    pub branch_name: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub bank: Bank,
}

impl Branch {
    /// Decode a branch from a joined row.
    ///
    /// The row must carry the branch columns plus `bank_id` and `bank_name`
    /// from the join against `banks`, so no follow-up lookup is needed.
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            ifsc: row.get_text("ifsc")?,
            branch_name: row.get_text("branch")?,
            address: row.get_text("address")?,
            city: row.get_text("city")?,
            district: row.get_text("district")?,
            state: row.get_text("state")?,
            bank: Bank {
                id: row.get_i64("bank_id")?,
                name: row.get_text("bank_name")?,
            },
        })
    }
}
