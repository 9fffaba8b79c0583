//! CSV importer
//!
//! Expects a header row naming at least [`REQUIRED_COLUMNS`] (any order,
//! case-insensitive). Extra columns are ignored. Bank ids are assigned by
//! the database in order of first appearance.

#![allow(clippy::result_large_err)]

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord, Trim};
use ifsc_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::Connection;

use crate::errors::{from_csv, from_rusqlite, import_validation, io_error, Result};

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "ifsc",
    "bank_name",
    "branch",
    "address",
    "city",
    "district",
    "state",
];

/// Rows actually inserted; duplicates already present are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub records: usize,
    pub banks: usize,
    pub branches: usize,
}

struct BranchRecord {
    ifsc: String,
    bank_name: String,
    branch: String,
    address: String,
    city: String,
    district: String,
    state: String,
}

/// Import a CSV file into a migrated database
///
/// All inserts happen in one transaction; a rejected record leaves the
/// database untouched.
pub fn import_csv(path: &Path, conn: &mut Connection) -> Result<ImportSummary> {
    let start = Instant::now();
    log_op_start!("csv_import", path = %path.display());

    match import_inner(path, conn) {
        Ok(summary) => {
            log_op_end!(
                "csv_import",
                duration_ms = start.elapsed().as_millis() as u64,
                records = summary.records,
                banks = summary.banks,
                branches = summary.branches
            );
            Ok(summary)
        }
        Err(err) => {
            let err = err.with_entity_id(path.display().to_string());
            log_op_error!(
                "csv_import",
                &err,
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn import_inner(path: &Path, conn: &mut Connection) -> Result<ImportSummary> {
    let records = read_records(path)?;

    let mut bank_names: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    for record in &records {
        if seen.insert(record.bank_name.as_str()) {
            bank_names.push(record.bank_name.as_str());
        }
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;
    let mut summary = ImportSummary {
        records: records.len(),
        ..Default::default()
    };

    {
        let mut insert_bank = tx
            .prepare("INSERT OR IGNORE INTO banks (name) VALUES (?1)")
            .map_err(from_rusqlite)?;
        for name in &bank_names {
            summary.banks += insert_bank.execute(rusqlite::params![name]).map_err(from_rusqlite)?;
        }
    }

    let bank_ids: HashMap<String, i64> = {
        let mut stmt = tx
            .prepare("SELECT name, id FROM banks")
            .map_err(from_rusqlite)?;
        let pairs = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<HashMap<_, _>, _>>()
            .map_err(from_rusqlite)?;
        pairs
    };

    {
        let mut insert_branch = tx
            .prepare(
                "INSERT OR IGNORE INTO branches (ifsc, branch, address, city, district, state, bank_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .map_err(from_rusqlite)?;
        for record in &records {
            let bank_id = bank_ids.get(&record.bank_name).copied().ok_or_else(|| {
                import_validation(format!("bank '{}' was not stored", record.bank_name))
            })?;
            summary.branches += insert_branch
                .execute(rusqlite::params![
                    record.ifsc,
                    record.branch,
                    record.address,
                    record.city,
                    record.district,
                    record.state,
                    bank_id,
                ])
                .map_err(from_rusqlite)?;
        }
    }

    tx.commit().map_err(from_rusqlite)?;
    Ok(summary)
}

fn read_records(path: &Path) -> Result<Vec<BranchRecord>> {
    let file = File::open(path).map_err(|e| io_error("csv_import", e))?;
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);
    let headers = reader.headers().map_err(from_csv)?.clone();

    let mut index = [0usize; 7];
    for (slot, name) in index.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = find_column(&headers, name)?;
    }
    let [ifsc, bank_name, branch, address, city, district, state] = index;

    let mut records = Vec::new();
    for (n, record) in reader.records().enumerate() {
        let record = record.map_err(from_csv)?;
        // header is line 1
        let line = record.position().map_or(n as u64 + 2, |p| p.line());
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();

        let parsed = BranchRecord {
            ifsc: field(ifsc),
            bank_name: field(bank_name),
            branch: field(branch),
            address: field(address),
            city: field(city),
            district: field(district),
            state: field(state),
        };
        if parsed.ifsc.is_empty() {
            return Err(import_validation(format!("line {}: empty ifsc", line)));
        }
        if parsed.bank_name.is_empty() {
            return Err(import_validation(format!(
                "line {}: empty bank_name for {}",
                line, parsed.ifsc
            )));
        }
        records.push(parsed);
    }
    Ok(records)
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| import_validation(format!("missing required column '{}'", name)))
}
