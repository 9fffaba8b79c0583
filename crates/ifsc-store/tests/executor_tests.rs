mod common;

use std::panic::{self, AssertUnwindSafe};

use ifsc_core::filter::columns;
use ifsc_core::logging_facility::test_capture::{init_test_capture, TestCapture};
use ifsc_core::{Bank, Branch, BranchFilter, Predicate};
use ifsc_store::{db, QueryExecutor, Relation, SqliteExecutor};

fn executor() -> (tempfile::TempDir, SqliteExecutor) {
    let (dir, path, _) = common::seeded_db();
    (dir, SqliteExecutor::open(&path).unwrap())
}

fn city(name: &str) -> BranchFilter {
    BranchFilter {
        city: Some(name.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_banks_are_ordered_by_name() {
    let (_dir, exec) = executor();

    let banks = exec
        .with_session("test", |s| {
            s.fetch_rows(Relation::Banks, &Predicate::match_all(), 10, 0)
        })
        .unwrap()
        .iter()
        .map(Bank::from_row)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let names: Vec<&str> = banks.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["ABHYUDAYA COOPERATIVE BANK LIMITED", "ABN AMRO BANK", "ALLAHABAD BANK"]
    );
}

#[test]
fn test_limit_and_offset_window_the_order() {
    let (_dir, exec) = executor();

    let rows = exec
        .with_session("test", |s| {
            s.fetch_rows(Relation::BranchesWithBank, &Predicate::match_all(), 2, 3)
        })
        .unwrap();
    let ifscs: Vec<String> = rows.iter().map(|r| r.get_text("ifsc").unwrap()).collect();
    assert_eq!(ifscs, vec!["ABNA0000001", "ABNA0100318"]);
}

#[test]
fn test_count_and_fetch_agree_for_a_filter() {
    let (_dir, exec) = executor();
    let predicate = city("MUMBAI").compile();

    let (count, rows) = exec
        .with_session("test", |s| {
            let count = s.count_rows(Relation::BranchesWithBank, &predicate)?;
            let rows = s.fetch_rows(Relation::BranchesWithBank, &predicate, 100, 0)?;
            Ok((count, rows))
        })
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_join_free_count_matches_joined_count() {
    let (_dir, exec) = executor();
    let all = Predicate::match_all();

    let (plain, joined) = exec
        .with_session("test", |s| {
            Ok((
                s.count_rows(Relation::Branches, &all)?,
                s.count_rows(Relation::BranchesWithBank, &all)?,
            ))
        })
        .unwrap();
    assert_eq!(plain, 7);
    assert_eq!(plain, joined);
}

#[test]
fn test_substring_match_ignores_ascii_case() {
    let (_dir, exec) = executor();
    let count = exec
        .with_session("test", |s| {
            s.count_rows(Relation::BranchesWithBank, &city("mumb").compile())
        })
        .unwrap();
    assert_eq!(count, 3);
}

#[test]
fn test_like_wildcards_in_input_match_literally() {
    let (_dir, exec) = executor();
    let filter = BranchFilter {
        branch_name: Some("%".to_string()),
        ..Default::default()
    };
    let count = exec
        .with_session("test", |s| {
            s.count_rows(Relation::BranchesWithBank, &filter.compile())
        })
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_fetch_one_inlines_bank() {
    let (_dir, exec) = executor();

    let row = exec
        .with_session("test", |s| {
            s.fetch_one(
                Relation::BranchesWithBank,
                &Predicate::equals(columns::BRANCH_IFSC, "ABNA0100318"),
            )
        })
        .unwrap()
        .expect("branch exists");
    let branch = Branch::from_row(&row).unwrap();

    assert_eq!(branch.city, "BANGALORE");
    assert_eq!(branch.bank.name, "ABN AMRO BANK");
    assert_eq!(branch.bank.id, 2);
}

#[test]
fn test_fetch_one_absent_is_none() {
    let (_dir, exec) = executor();
    let row = exec
        .with_session("test", |s| {
            s.fetch_one(
                Relation::BranchesWithBank,
                &Predicate::equals(columns::BRANCH_IFSC, "DOESNOTEXIST"),
            )
        })
        .unwrap();
    assert!(row.is_none());
}

#[test]
fn test_null_text_decodes_as_empty() {
    let (_dir, path, _) = common::seeded_db();
    {
        let conn = db::open(&path).unwrap();
        conn.execute(
            "INSERT INTO branches (ifsc, branch, address, city, district, state, bank_id)
             VALUES ('ALLA0210003', 'NULLS', NULL, NULL, NULL, NULL, 3)",
            [],
        )
        .unwrap();
    }
    let exec = SqliteExecutor::open(&path).unwrap();

    let row = exec
        .with_session("test", |s| {
            s.fetch_one(
                Relation::BranchesWithBank,
                &Predicate::equals(columns::BRANCH_IFSC, "ALLA0210003"),
            )
        })
        .unwrap()
        .unwrap();
    let branch = Branch::from_row(&row).unwrap();
    assert_eq!(branch.address, "");
    assert_eq!(branch.city, "");
}

#[test]
fn test_ping() {
    let (_dir, exec) = executor();
    exec.with_session("health", |s| s.ping()).unwrap();
}

#[test]
fn test_closure_error_propagates_unchanged() {
    let (_dir, exec) = executor();
    let err = exec
        .with_session("test", |_| -> ifsc_store::Result<()> {
            Err(ifsc_core::ExError::new(ifsc_core::ExErrorKind::Internal).with_message("boom"))
        })
        .unwrap_err();
    assert_eq!(err.kind(), ifsc_core::ExErrorKind::Internal);
    assert_eq!(err.message(), "boom");
}

#[test]
fn test_ping_rejects_a_file_that_is_not_a_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("indian_banks.db");
    std::fs::write(&path, "bank_name,ifsc\nnot a sqlite file at all, padded out past one header\n")
        .unwrap();

    let exec = SqliteExecutor::open(&path).unwrap();
    let err = exec.with_session("health", |s| s.ping()).unwrap_err();
    assert_eq!(err.kind(), ifsc_core::ExErrorKind::Persistence);
    assert_eq!(err.op(), Some("ping"));
}

/// Number of acquire and release events logged for one session op.
fn lifecycle(capture: &TestCapture, op: &str) -> (usize, usize) {
    let events = capture.events_for_op(op);
    let count = |msg: &str| events.iter().filter(|e| e.field("message") == Some(msg)).count();
    (count("connection acquired"), count("connection released"))
}

#[test]
fn test_connection_released_after_success() {
    let capture = init_test_capture();
    let (_dir, exec) = executor();

    exec.with_session("release_after_ok", |s| s.ping()).unwrap();

    assert_eq!(lifecycle(&capture, "release_after_ok"), (1, 1));
}

#[test]
fn test_connection_released_after_no_match() {
    let capture = init_test_capture();
    let (_dir, exec) = executor();

    let row = exec
        .with_session("release_after_no_match", |s| {
            s.fetch_one(
                Relation::BranchesWithBank,
                &Predicate::equals(columns::BRANCH_IFSC, "DOESNOTEXIST"),
            )
        })
        .unwrap();
    assert!(row.is_none());

    assert_eq!(lifecycle(&capture, "release_after_no_match"), (1, 1));
}

#[test]
fn test_connection_released_after_error() {
    let capture = init_test_capture();
    let (_dir, exec) = executor();

    let result = exec.with_session("release_after_err", |_| -> ifsc_store::Result<()> {
        Err(ifsc_core::ExError::new(ifsc_core::ExErrorKind::Persistence).with_message("boom"))
    });
    assert!(result.is_err());

    assert_eq!(lifecycle(&capture, "release_after_err"), (1, 1));
}

#[test]
fn test_connection_released_after_panic() {
    let capture = init_test_capture();
    let (_dir, exec) = executor();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        exec.with_session("release_after_panic", |_| -> ifsc_store::Result<()> {
            panic!("resolver bug")
        })
    }));
    assert!(outcome.is_err());

    assert_eq!(lifecycle(&capture, "release_after_panic"), (1, 1));
}

#[test]
fn test_failed_open_acquires_nothing() {
    let capture = init_test_capture();
    let (dir, path, _) = common::seeded_db();
    let exec = SqliteExecutor::open(&path).unwrap();
    drop(dir);

    let err = exec
        .with_session("release_after_missing_file", |s| s.ping())
        .unwrap_err();
    assert_eq!(err.op(), Some("release_after_missing_file"));
    assert_eq!(lifecycle(&capture, "release_after_missing_file"), (0, 0));
}
