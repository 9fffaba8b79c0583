use std::path::{Path, PathBuf};

use ifsc_store::{db, import_csv, migrations, ImportSummary};
use tempfile::TempDir;

pub fn fixture_csv() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("bank_branches.csv")
}

/// Migrated and seeded database file inside a fresh temp dir.
///
/// Keep the `TempDir` alive for as long as the path is used.
#[allow(dead_code)]
pub fn seeded_db() -> (TempDir, PathBuf, ImportSummary) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("indian_banks.db");
    let summary = seed(&path);
    (dir, path, summary)
}

pub fn seed(path: &Path) -> ImportSummary {
    let mut conn = db::open(path).expect("open db");
    db::configure(&conn).expect("configure");
    migrations::apply_migrations(&mut conn).expect("migrate");
    import_csv(&fixture_csv(), &mut conn).expect("import fixture")
}
