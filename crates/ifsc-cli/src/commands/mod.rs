pub mod import;
pub mod query;
pub mod serve;

use ifsc_engine::QueryEngine;
use ifsc_store::SqliteExecutor;

use crate::settings::Settings;

/// Open the configured database read-only and wrap it in an engine.
pub fn open_engine(settings: &Settings) -> ifsc_core::Result<QueryEngine<SqliteExecutor>> {
    let executor = SqliteExecutor::open(&settings.database_path)?;
    QueryEngine::new(executor, settings.pagination)
}
