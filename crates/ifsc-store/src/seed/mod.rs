//! Seed import
//!
//! Loads the bank/branch directory from a CSV export. This is an offline
//! bootstrap step; the query path never writes.

mod csv_import;

pub use csv_import::{import_csv, ImportSummary, REQUIRED_COLUMNS};
