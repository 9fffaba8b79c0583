//! Operation logging macros
//!
//! Every query and import is bracketed by `start` and `end` (or `end_error`)
//! events carrying the same `op`. Event names come from `ifsc-core-types`
//! through a hidden re-export, so callers only need `ifsc-core` and `tracing`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use ifsc_core::log_op_start;
/// log_op_start!("branch_list");
/// log_op_start!("branch_get", ifsc = "ABHY0065001");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use ifsc_core::log_op_end;
/// log_op_end!("bank_list", duration_ms = 3);
/// log_op_end!("csv_import", duration_ms = 120, banks = 3u64, branches = 7u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log a failed operation from a borrowed [`ExError`](crate::errors::ExError)
///
/// Besides the stable code, the event carries the storage call that failed
/// (`err_op`) and the bank id, IFSC or file path the error names
/// (`entity_id`), when the error has them.
///
/// # Example
///
/// ```
/// # use ifsc_core::log_op_error;
/// # use ifsc_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::Persistence).with_op("count_rows");
/// log_op_error!("bank_list", &err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: &$crate::errors::ExError = $err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_op = ex_err.op(),
            entity_id = ex_err.entity_id(),
            error = %ex_err,
            $($($field)*)?
        );
    }};
}

/// Log the shape of an assembled page at debug level
///
/// # Example
///
/// ```
/// # use ifsc_core::{log_page, Page};
/// let page = Page::from_overshot(vec!["Alpha", "Beta", "Gamma"], 2, 0, 3);
/// log_page!("bank_list", &page, offset = 0u64);
/// ```
#[macro_export]
macro_rules! log_page {
    ($op:expr, $page:expr, offset = $offset:expr) => {{
        let page = $page;
        tracing::debug!(
            component = module_path!(),
            op = $op,
            offset = $offset,
            edge_count = page.len(),
            total_count = page.total_count,
            has_next_page = page.page_info.has_next_page,
            has_previous_page = page.page_info.has_previous_page,
        );
    }};
}
