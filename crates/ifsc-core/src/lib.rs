//! ifsc-core - pagination and filtering kernel for the bank branch directory
//!
//! This crate holds everything between the resolver layer and storage that
//! has real invariants:
//! - Domain model (`Bank`, `Branch`) and storage-neutral rows
//! - Cursor codec (opaque cursor <-> row offset)
//! - Filter compiler (sparse filter -> predicate + ordered params)
//! - Page assembler (lookahead fetch, trimming, page info, per-edge cursors)
//! - Pagination configuration
//! - Error and logging facilities shared by the other crates

pub mod config;
pub mod cursor;
pub mod errors;
pub mod filter;
pub mod logging_facility;
pub mod model;
pub mod page;

// Re-export commonly used types
pub use config::PaginationConfig;
pub use errors::{ExError, ExErrorKind, Result};
pub use filter::{BankFilter, BranchFilter, Predicate};
pub use model::{Bank, Branch, Row, SqlValue};
pub use page::{Edge, Page, PageAssembler, PageInfo};

#[doc(hidden)]
pub use ifsc_core_types::schema as __schema;
