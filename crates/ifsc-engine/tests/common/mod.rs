use std::path::PathBuf;

use ifsc_core::PaginationConfig;
use ifsc_engine::QueryEngine;
use ifsc_store::{db, migrations, SqliteExecutor};
use tempfile::TempDir;

/// (ifsc, branch, city, state, bank_id)
pub type BranchSeed<'a> = (&'a str, &'a str, &'a str, &'a str, i64);

pub const BRANCHES: [BranchSeed<'static>; 8] = [
    ("SBIN0000001", "MAIN", "AURANGABAD", "MAHARASHTRA", 1),
    ("HDFC0000002", "CIDCO", "AURANGABAD", "MAHARASHTRA", 2),
    ("SBIN0000003", "GAYA ROAD", "AURANGABAD", "BIHAR", 1),
    ("SBIN0000004", "FORT", "MUMBAI", "MAHARASHTRA", 1),
    ("HDFC0000001", "ANDHERI", "MUMBAI", "MAHARASHTRA", 2),
    ("HDFC0000003", "BANDRA", "MUMBAI", "MAHARASHTRA", 2),
    ("SBIN0000005", "GANDHI MAIDAN", "PATNA", "BIHAR", 1),
    ("HDFC0000004", "BORING ROAD", "PATNA", "BIHAR", 2),
];

pub const BANKS: [(i64, &str); 2] = [(1, "STATE BANK OF INDIA"), (2, "HDFC BANK")];

/// A seeded database file; dropping it removes the file.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn engine(&self) -> QueryEngine<SqliteExecutor> {
        self.engine_with(PaginationConfig::default())
    }

    pub fn engine_with(&self, config: PaginationConfig) -> QueryEngine<SqliteExecutor> {
        let executor = SqliteExecutor::open(&self.path).expect("executor");
        QueryEngine::new(executor, config).expect("engine")
    }
}

pub fn fixture(banks: &[(i64, &str)], branches: &[BranchSeed<'_>]) -> Fixture {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("indian_banks.db");

    let mut conn = db::open(&path).expect("open");
    db::configure(&conn).expect("configure");
    migrations::apply_migrations(&mut conn).expect("migrate");

    for (id, name) in banks {
        conn.execute(
            "INSERT INTO banks (id, name) VALUES (?1, ?2)",
            rusqlite::params![id, name],
        )
        .expect("insert bank");
    }
    for (ifsc, branch, city, state, bank_id) in branches {
        conn.execute(
            "INSERT INTO branches (ifsc, branch, address, city, district, state, bank_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                ifsc,
                branch,
                format!("{} ROAD, {}", branch, city),
                city,
                city,
                state,
                bank_id
            ],
        )
        .expect("insert branch");
    }

    Fixture { _dir: dir, path }
}

#[allow(dead_code)]
pub fn directory() -> Fixture {
    fixture(&BANKS, &BRANCHES)
}
