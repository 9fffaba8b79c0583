//! Import command
//!
//! Usage: ifsc import <CSV> [--db PATH]

use std::path::PathBuf;

use clap::Args;
use ifsc_store::{db, migrations};
use serde_json::json;

use crate::settings::Settings;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Bank branches CSV (ifsc, bank_name, branch, address, city, district, state)
    pub path: PathBuf,
}

/// Create or migrate the database, then load the CSV into it.
///
/// Rows already present (same bank name or IFSC) are left untouched, so
/// running the import twice is harmless.
pub fn execute(args: ImportArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = &settings.database_path;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut conn = db::open(db_path)?;
    db::configure(&conn)?;
    migrations::apply_migrations(&mut conn)?;

    eprintln!("Importing {}...", args.path.display());
    let summary = ifsc_store::import_csv(&args.path, &mut conn)?;

    let report = json!({
        "database": db_path.display().to_string(),
        "records": summary.records,
        "banks": summary.banks,
        "branches": summary.branches,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
