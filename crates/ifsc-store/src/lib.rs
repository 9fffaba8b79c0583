//! IFSC Store - SQLite persistence for the bank/branch directory
//!
//! Provides:
//! - Connection helpers (read-write for bootstrap, read-only for queries)
//! - Embedded schema migrations with checksums
//! - The storage query executor used by the engine
//! - CSV seed import

pub mod db;
pub mod errors;
pub mod executor;
pub mod migrations;
pub mod seed;

pub use errors::Result;
pub use executor::{QueryExecutor, QuerySession, Relation, SqliteExecutor};
pub use seed::{import_csv, ImportSummary};
