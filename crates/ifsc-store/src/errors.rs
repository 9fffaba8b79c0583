//! Error handling for ifsc-store
//!
//! Wraps ifsc-core ExError with store-specific helpers

use ifsc_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Integrity)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create an import validation error
pub fn import_validation(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("csv_import")
        .with_message(reason)
}

/// Create an error from a CSV reader failure
///
/// I/O failures keep the `Io` kind; everything else is malformed input.
pub fn from_csv(err: csv::Error) -> ExError {
    let kind = if err.is_io_error() {
        ExErrorKind::Io
    } else {
        ExErrorKind::InvalidInput
    };
    ExError::new(kind)
        .with_op("csv_import")
        .with_message(err.to_string())
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
