//! Request options and result types for the read-only query surface.
//!
//! Plain data containers with no I/O.

use ifsc_core::{Bank, Branch, Page};
use serde::{Deserialize, Serialize};

/// Page of banks ordered by name.
pub type BankPage = Page<Bank>;

/// Page of branches ordered by IFSC, each with its bank inlined.
pub type BranchPage = Page<Branch>;

/// Window of a paginated list query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListOptions {
    /// Requested page length; absent, zero or negative means the default.
    pub first: Option<i64>,
    /// Cursor of the last edge already seen.
    pub after: Option<String>,
}

impl ListOptions {
    pub fn new(first: Option<i64>, after: Option<String>) -> Self {
        Self { first, after }
    }
}

/// Row counts of the whole directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsResult {
    pub banks: u64,
    pub branches: u64,
}
