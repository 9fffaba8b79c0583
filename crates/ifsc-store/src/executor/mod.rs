//! Storage query executor
//!
//! The engine talks to storage only through [`QueryExecutor`]. A session is
//! scoped to one call of [`QueryExecutor::with_session`]; whatever resource
//! backs it is released when the closure returns, on success, error or
//! unwind alike.

#![allow(clippy::result_large_err)]

mod sqlite;

pub use sqlite::SqliteExecutor;

use crate::errors::Result;
use ifsc_core::{Predicate, Row};

/// What a query reads from.
///
/// Each relation fixes its `FROM` clause, select list and ascending order
/// key, so callers only supply the predicate and the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `banks ba`, ordered by name
    Banks,
    /// `branches b` without the bank join, ordered by IFSC
    ///
    /// Rows carry `bank_id` but no bank name. Used for unfiltered counts.
    Branches,
    /// `branches b JOIN banks ba`, ordered by IFSC, with the bank inlined
    BranchesWithBank,
}

impl Relation {
    pub fn from_clause(&self) -> &'static str {
        match self {
            Relation::Banks => "banks ba",
            Relation::Branches => "branches b",
            Relation::BranchesWithBank => "branches b JOIN banks ba ON b.bank_id = ba.id",
        }
    }

    pub fn select_list(&self) -> &'static str {
        match self {
            Relation::Banks => "ba.id AS id, ba.name AS name",
            Relation::Branches => {
                "b.ifsc AS ifsc, b.branch AS branch, b.address AS address, b.city AS city, \
                 b.district AS district, b.state AS state, b.bank_id AS bank_id"
            }
            Relation::BranchesWithBank => {
                "b.ifsc AS ifsc, b.branch AS branch, b.address AS address, b.city AS city, \
                 b.district AS district, b.state AS state, ba.id AS bank_id, ba.name AS bank_name"
            }
        }
    }

    pub fn order_key(&self) -> &'static str {
        match self {
            Relation::Banks => "ba.name",
            Relation::Branches | Relation::BranchesWithBank => "b.ifsc",
        }
    }
}

/// Read operations available inside a session.
///
/// Every method takes the same [`Predicate`] shape, so a count and a data
/// query built from one predicate filter identically.
pub trait QuerySession {
    /// Rows matching `predicate` in the relation's order, windowed by `limit`/`offset`
    fn fetch_rows(
        &self,
        relation: Relation,
        predicate: &Predicate,
        limit: usize,
        offset: u64,
    ) -> Result<Vec<Row>>;

    /// Number of rows matching `predicate`, ignoring any window
    fn count_rows(&self, relation: Relation, predicate: &Predicate) -> Result<u64>;

    /// First matching row, if any
    fn fetch_one(&self, relation: Relation, predicate: &Predicate) -> Result<Option<Row>>;

    /// Round-trip a trivial statement to prove the store is reachable
    fn ping(&self) -> Result<()>;
}

/// Hands out scoped query sessions.
pub trait QueryExecutor: Send + Sync {
    /// Acquire a session, run `f` with it and release it.
    ///
    /// `op` names the calling operation in connection lifecycle logs.
    fn with_session<T, F>(&self, op: &str, f: F) -> Result<T>
    where
        F: FnOnce(&dyn QuerySession) -> Result<T>;
}
