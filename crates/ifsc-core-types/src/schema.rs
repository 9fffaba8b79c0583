//! Canonical schema constants for structured logging and events
//!
//! `tracing` field names are identifiers at the call site, so the field
//! constants here are what log consumers (and tests) look fields up by.

pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Page shape
pub const FIELD_EDGE_COUNT: &str = "edge_count";
pub const FIELD_TOTAL_COUNT: &str = "total_count";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
