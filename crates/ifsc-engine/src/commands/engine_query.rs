//! Engine-level read-only query surface.
//!
//! [`QueryEngine::apply`] is the single entry point the transports use. Each
//! query is logged as `start` followed by `end` or `end_error` with its
//! duration.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use ifsc_core::{log_op_end, log_op_error, log_op_start};
use ifsc_core::{Bank, Branch, BranchFilter};
use ifsc_store::errors::Result;
use ifsc_store::QueryExecutor;
use serde::Serialize;

use crate::commands::directory::QueryEngine;
use crate::commands::read_tools::{BankPage, BranchPage, ListOptions, StatsResult};

/// Read-only queries supported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineQuery {
    /// Page through banks ordered by name.
    BankList(ListOptions),
    /// Get a bank by surrogate id.
    BankGet { id: i64 },
    /// Get a bank by exact name.
    BankGetByName { name: String },
    /// Banks whose name contains a substring.
    BankSearch { pattern: String, limit: Option<i64> },
    /// Page through branches ordered by IFSC, optionally filtered.
    BranchList {
        options: ListOptions,
        filter: BranchFilter,
    },
    /// Get a branch by IFSC.
    BranchGet { ifsc: String },
    /// Bank and branch counts.
    Stats,
    /// Storage reachability.
    Health,
}

impl EngineQuery {
    /// Operation name used in logs.
    pub fn op_name(&self) -> &'static str {
        match self {
            EngineQuery::BankList(_) => "bank_list",
            EngineQuery::BankGet { .. } => "bank_get",
            EngineQuery::BankGetByName { .. } => "bank_get_by_name",
            EngineQuery::BankSearch { .. } => "bank_search",
            EngineQuery::BranchList { .. } => "branch_list",
            EngineQuery::BranchGet { .. } => "branch_get",
            EngineQuery::Stats => "stats",
            EngineQuery::Health => "health_check",
        }
    }
}

/// All possible results from [`QueryEngine::apply`].
///
/// Serializes as the bare payload, without a variant tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EngineQueryResult {
    BankList(BankPage),
    /// Result of `BankGet` and `BankGetByName`
    Bank(Option<Bank>),
    BankSearch(Vec<Bank>),
    BranchList(BranchPage),
    Branch(Option<Branch>),
    Stats(StatsResult),
    Health(bool),
}

impl EngineQueryResult {
    /// True for a point lookup that matched nothing.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            EngineQueryResult::Bank(None) | EngineQueryResult::Branch(None)
        )
    }
}

impl<E: QueryExecutor> QueryEngine<E> {
    /// Apply a read-only engine query.
    ///
    /// # Errors
    ///
    /// Storage failures propagate unchanged. A point lookup that finds
    /// nothing is a successful, absent result.
    pub fn apply(&self, query: EngineQuery) -> Result<EngineQueryResult> {
        let op = query.op_name();
        log_op_start!(op);
        let start = Instant::now();

        let result = self.dispatch(query);

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => log_op_end!(op, duration_ms = elapsed),
            Err(e) => log_op_error!(op, e, duration_ms = elapsed),
        }
        result
    }

    fn dispatch(&self, query: EngineQuery) -> Result<EngineQueryResult> {
        Ok(match query {
            EngineQuery::BankList(options) => EngineQueryResult::BankList(self.list_banks(&options)?),
            EngineQuery::BankGet { id } => EngineQueryResult::Bank(self.get_bank(id)?),
            EngineQuery::BankGetByName { name } => {
                EngineQueryResult::Bank(self.get_bank_by_name(&name)?)
            }
            EngineQuery::BankSearch { pattern, limit } => {
                EngineQueryResult::BankSearch(self.search_banks(&pattern, limit)?)
            }
            EngineQuery::BranchList { options, filter } => {
                EngineQueryResult::BranchList(self.list_branches(&options, &filter)?)
            }
            EngineQuery::BranchGet { ifsc } => EngineQueryResult::Branch(self.get_branch(&ifsc)?),
            EngineQuery::Stats => EngineQueryResult::Stats(self.stats()?),
            EngineQuery::Health => EngineQueryResult::Health(self.check_connection()),
        })
    }
}
