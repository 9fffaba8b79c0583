//! Entity resolvers over a [`QueryExecutor`].
//!
//! List resolvers decode the cursor, compile the filter once and let the
//! [`PageAssembler`] drive one data query and one count query inside a single
//! session. Point lookups bypass pagination and report a missing entity as
//! `Ok(None)`.

#![allow(clippy::result_large_err)]

use ifsc_core::cursor;
use ifsc_core::filter::columns;
use ifsc_core::log_page;
use ifsc_core::{
    Bank, BankFilter, Branch, BranchFilter, PageAssembler, PaginationConfig, Predicate,
};
use ifsc_store::errors::Result;
use ifsc_store::{QueryExecutor, Relation};

use crate::commands::read_tools::{BankPage, BranchPage, ListOptions, StatsResult};

/// The directory's query surface, constructed explicitly at startup.
#[derive(Debug)]
pub struct QueryEngine<E> {
    executor: E,
    pages: PageAssembler,
}

impl<E: QueryExecutor> QueryEngine<E> {
    /// Build an engine over `executor` using validated page limits.
    pub fn new(executor: E, config: PaginationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            executor,
            pages: PageAssembler::new(config),
        })
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn config(&self) -> &PaginationConfig {
        self.pages.config()
    }

    /// Page through all banks ordered by name.
    pub fn list_banks(&self, options: &ListOptions) -> Result<BankPage> {
        let offset = cursor::start_offset(options.after.as_deref());
        let predicate = Predicate::match_all();

        let page = self.executor.with_session("bank_list", |s| {
            self.pages.assemble(
                options.first,
                offset,
                |limit, offset| s.fetch_rows(Relation::Banks, &predicate, limit, offset),
                || s.count_rows(Relation::Banks, &predicate),
            )
        })?;
        log_page!("bank_list", &page, offset = offset);
        page.try_map(|row| Bank::from_row(&row))
    }

    pub fn get_bank(&self, id: i64) -> Result<Option<Bank>> {
        self.fetch_bank("bank_get", Predicate::equals(columns::BANK_ID, id))
    }

    /// Exact (case-sensitive) name lookup.
    pub fn get_bank_by_name(&self, name: &str) -> Result<Option<Bank>> {
        self.fetch_bank("bank_get_by_name", Predicate::equals(columns::BANK_NAME, name))
    }

    /// Banks whose name contains `pattern`, ordered by name, unpaginated.
    ///
    /// `limit` is clamped to `[1, max_page_size]`; absent means the maximum.
    pub fn search_banks(&self, pattern: &str, limit: Option<i64>) -> Result<Vec<Bank>> {
        let max = self.config().max_page_size as usize;
        let limit = limit.map_or(max, |n| n.clamp(1, max as i64) as usize);
        let predicate = BankFilter {
            name: Some(pattern.to_string()),
        }
        .compile();

        let rows = self.executor.with_session("bank_search", |s| {
            s.fetch_rows(Relation::Banks, &predicate, limit, 0)
        })?;
        rows.iter().map(Bank::from_row).collect()
    }

    /// Page through branches ordered by IFSC, optionally filtered.
    ///
    /// Count and data queries share one compiled predicate. Without any
    /// filter the count skips the bank join.
    pub fn list_branches(&self, options: &ListOptions, filter: &BranchFilter) -> Result<BranchPage> {
        let offset = cursor::start_offset(options.after.as_deref());
        let predicate = filter.compile();
        let count_relation = if predicate.is_match_all() {
            Relation::Branches
        } else {
            Relation::BranchesWithBank
        };

        let page = self.executor.with_session("branch_list", |s| {
            self.pages.assemble(
                options.first,
                offset,
                |limit, offset| {
                    s.fetch_rows(Relation::BranchesWithBank, &predicate, limit, offset)
                },
                || s.count_rows(count_relation, &predicate),
            )
        })?;
        log_page!("branch_list", &page, offset = offset);
        page.try_map(|row| Branch::from_row(&row))
    }

    pub fn get_branch(&self, ifsc: &str) -> Result<Option<Branch>> {
        let predicate = Predicate::equals(columns::BRANCH_IFSC, ifsc);
        let row = self.executor.with_session("branch_get", |s| {
            s.fetch_one(Relation::BranchesWithBank, &predicate)
        })?;
        row.map(|row| Branch::from_row(&row)).transpose()
    }

    pub fn stats(&self) -> Result<StatsResult> {
        let all = Predicate::match_all();
        self.executor.with_session("stats", |s| {
            Ok(StatsResult {
                banks: s.count_rows(Relation::Banks, &all)?,
                branches: s.count_rows(Relation::Branches, &all)?,
            })
        })
    }

    /// True when the store can read its schema. Never fails.
    pub fn check_connection(&self) -> bool {
        match self.executor.with_session("health_check", |s| s.ping()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    component = module_path!(),
                    op = "health_check",
                    error = %err,
                    "storage is unreachable"
                );
                false
            }
        }
    }

    fn fetch_bank(&self, op: &str, predicate: Predicate) -> Result<Option<Bank>> {
        let row = self
            .executor
            .with_session(op, |s| s.fetch_one(Relation::Banks, &predicate))?;
        row.map(|row| Bank::from_row(&row)).transpose()
    }
}
