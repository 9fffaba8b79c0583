//! SQLite-backed query executor

#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};

use ifsc_core::errors::{ExError, ExErrorKind};
use ifsc_core::{Predicate, Row, SqlValue};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection};

use super::{QueryExecutor, QuerySession, Relation};
use crate::db;
use crate::errors::{from_rusqlite, Result};

/// Opens a fresh read-only connection for every session.
///
/// Holds nothing but the database path, so it is freely shared across
/// threads; SQLite serves concurrent readers on its own.
#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    path: PathBuf,
}

impl SqliteExecutor {
    /// Create an executor over an existing database file
    ///
    /// A missing file is a configuration error: queries never create the
    /// database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ExError::new(ExErrorKind::Config)
                .with_op("executor_open")
                .with_entity_id(path.display().to_string())
                .with_message("database file not found; run `ifsc import` first"));
        }
        Ok(Self { path })
    }
}

impl QueryExecutor for SqliteExecutor {
    fn with_session<T, F>(&self, op: &str, f: F) -> Result<T>
    where
        F: FnOnce(&dyn QuerySession) -> Result<T>,
    {
        let conn = db::open_read_only(&self.path).map_err(|e| e.with_op(op.to_string()))?;
        tracing::debug!(
            component = module_path!(),
            op = op,
            "connection acquired"
        );
        let session = SqliteSession {
            conn,
            op: op.to_string(),
        };
        f(&session)
    }
}

/// One read-only connection; closed when dropped.
struct SqliteSession {
    conn: Connection,
    op: String,
}

impl Drop for SqliteSession {
    fn drop(&mut self) {
        tracing::debug!(
            component = module_path!(),
            op = self.op.as_str(),
            "connection released"
        );
    }
}

impl SqliteSession {
    fn log_sql(&self, sql: &str, params: usize) {
        tracing::debug!(
            component = module_path!(),
            op = self.op.as_str(),
            sql = sql,
            params = params,
        );
    }
}

impl QuerySession for SqliteSession {
    fn fetch_rows(
        &self,
        relation: Relation,
        predicate: &Predicate,
        limit: usize,
        offset: u64,
    ) -> Result<Vec<Row>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {} LIMIT ? OFFSET ?",
            relation.select_list(),
            relation.from_clause(),
            predicate.clause(),
            relation.order_key(),
        );
        let mut params = bind_values(predicate);
        params.push(Value::Integer(to_sql_int("limit", limit as u64)?));
        params.push(Value::Integer(to_sql_int("offset", offset)?));
        self.log_sql(&sql, params.len());

        query_rows(&self.conn, &sql, &params).map_err(|e| e.with_op("fetch_rows"))
    }

    fn count_rows(&self, relation: Relation, predicate: &Predicate) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            relation.from_clause(),
            predicate.clause(),
        );
        let params = bind_values(predicate);
        self.log_sql(&sql, params.len());

        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))
            .map_err(|e| from_rusqlite(e).with_op("count_rows"))?;
        u64::try_from(count).map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("count_rows")
                .with_message(format!("negative row count {}", count))
        })
    }

    fn fetch_one(&self, relation: Relation, predicate: &Predicate) -> Result<Option<Row>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {} LIMIT 1",
            relation.select_list(),
            relation.from_clause(),
            predicate.clause(),
            relation.order_key(),
        );
        let params = bind_values(predicate);
        self.log_sql(&sql, params.len());

        let rows = query_rows(&self.conn, &sql, &params).map_err(|e| e.with_op("fetch_one"))?;
        Ok(rows.into_iter().next())
    }

    /// Reads the schema page, so a file that is not a database fails here.
    fn ping(&self) -> Result<()> {
        self.conn
            .query_row("SELECT COUNT(*) FROM sqlite_master", [], |_| Ok(()))
            .map_err(|e| from_rusqlite(e).with_op("ping"))
    }
}

fn query_rows(conn: &Connection, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let rows = stmt
        .query_map(params_from_iter(params.iter()), |r| {
            columns
                .iter()
                .enumerate()
                .map(|(i, name)| Ok((name.clone(), from_value_ref(r.get_ref(i)?))))
                .collect::<rusqlite::Result<Row>>()
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn bind_values(predicate: &Predicate) -> Vec<Value> {
    predicate.params().iter().map(to_value).collect()
}

fn to_value(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(v) => Value::Integer(*v),
        SqlValue::Real(v) => Value::Real(*v),
        SqlValue::Text(v) => Value::Text(v.clone()),
        SqlValue::Blob(v) => Value::Blob(v.clone()),
    }
}

fn from_value_ref(value: ValueRef<'_>) -> SqlValue {
    match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(v) => SqlValue::Integer(v),
        ValueRef::Real(v) => SqlValue::Real(v),
        ValueRef::Text(bytes) => SqlValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
    }
}

/// SQLite integers are signed 64-bit; larger windows cannot be expressed.
fn to_sql_int(name: &str, value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op("fetch_rows")
            .with_message(format!("{} {} exceeds the supported range", name, value))
    })
}
