//! Database connection management
//!
//! Bootstrap (migrations, import) uses a read-write connection; every query
//! session opens its own read-only connection.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Open (or create) a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an existing database without write access
///
/// Fails if the file does not exist; SQLite is never allowed to create it.
pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Connection::open_with_flags(path, flags).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a read-write connection
///
/// The default rollback journal is kept: read-only connections cannot
/// open a WAL database whose `-shm` file is gone.
pub fn configure(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .map_err(from_rusqlite)?;

    Ok(())
}
