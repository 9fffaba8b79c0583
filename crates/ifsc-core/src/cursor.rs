//! Opaque pagination cursors.
//!
//! A cursor is the standard base64 encoding of a row's zero-based decimal
//! offset within the query's ordering (`"0"` -> `"MA=="`). Clients treat it
//! as opaque; the engine recovers the exact offset.
//!
//! Offsets shift if the underlying rows change between pages. The dataset is
//! read-only for the lifetime of the process, so this is accepted; a keyset
//! cursor (encoding the last sort key) is the replacement if that changes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::CursorError;

/// Encode a row offset as an opaque cursor.
pub fn encode(offset: u64) -> String {
    STANDARD.encode(offset.to_string().as_bytes())
}

/// Decode a cursor back into the row offset it was minted for.
pub fn decode(cursor: &str) -> Result<u64, CursorError> {
    let bytes = STANDARD
        .decode(cursor.as_bytes())
        .map_err(|e| CursorError::Encoding(e.to_string()))?;
    let payload = String::from_utf8(bytes).map_err(|_| CursorError::NotUtf8)?;

    if payload.is_empty() || !payload.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CursorError::NotAnOffset { payload });
    }
    payload
        .parse::<u64>()
        .map_err(|_| CursorError::NotAnOffset { payload })
}

/// Starting offset for a page requested `after` the given cursor.
///
/// An edge's cursor encodes that edge's own position, so the next page starts
/// one past it. A malformed cursor is treated as absent (offset 0) and
/// reported as a warning instead of failing the query.
pub fn start_offset(after: Option<&str>) -> u64 {
    let Some(cursor) = after else {
        return 0;
    };
    match decode(cursor) {
        Ok(offset) => offset.saturating_add(1),
        Err(err) => {
            tracing::warn!(
                component = module_path!(),
                op = "cursor_decode",
                cursor = cursor,
                error = %err,
                "invalid cursor, paging from the first row"
            );
            0
        }
    }
}
