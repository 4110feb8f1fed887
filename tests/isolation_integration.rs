//! Integration tests for the test isolation helpers.
//!
//! These tests verify:
//! - Statements run inside a transaction sandbox leave no trace
//! - Disposable databases are gone once the helper returns
//! - Teardown still happens when the test body panics

mod common;

use std::panic::{self, AssertUnwindSafe};

use pgkit::prelude::*;
use pretty_assertions::assert_eq;

fn sorted_tables(db: &mut Database) -> Vec<String> {
    let mut tables = list_tables(db, "public").unwrap();
    tables.sort();
    tables
}

fn database_exists(db: &mut Database, name: &str) -> bool {
    db.query_row("SELECT 1 FROM pg_database WHERE datname = $1", &[&name])
        .unwrap()
        .is_some()
}

#[test]
fn test_transaction_sandbox_rolls_back() {
    let Some(mut db) = common::open_test_database() else {
        return;
    };

    let before = sorted_tables(&mut db);

    let seen = run_in_transaction(&mut db, |dp| {
        dp.execute("CREATE TABLE pgkit_sandboxed (pk INT)", &[]).unwrap();
        list_tables(dp, "public").unwrap()
    })
    .unwrap();

    assert!(seen.contains(&"pgkit_sandboxed".to_string()));
    assert_eq!(sorted_tables(&mut db), before);
}

#[test]
fn test_transaction_sandbox_rolls_back_on_panic() {
    let Some(mut db) = common::open_test_database() else {
        return;
    };

    let before = sorted_tables(&mut db);

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        run_in_transaction::<_, ()>(&mut db, |dp| {
            dp.execute("CREATE TABLE pgkit_panicked (pk INT)", &[]).unwrap();
            panic!("test body failed");
        })
    }));

    assert!(outcome.is_err());
    assert_eq!(sorted_tables(&mut db), before);
}

#[test]
fn test_transaction_sandbox_survives_failed_statement() {
    let Some(mut db) = common::open_test_database() else {
        return;
    };

    let result = run_in_transaction(&mut db, |dp| dp.execute("SELECT * FROM pgkit_nowhere", &[]))
        .unwrap();

    assert_eq!(result.unwrap_err().sql_state(), Some("42P01"));
    assert!(db.query_row("SELECT 1", &[]).unwrap().is_some());
}

#[test]
fn test_disposable_database_is_dropped() {
    let Some(mut db) = common::open_test_database() else {
        return;
    };

    let detail = run_in_disposable_database(&mut db, |scratch| {
        scratch.execute("CREATE TABLE pgkit (pk INT)", &[]).unwrap();
        assert_eq!(list_tables(scratch, "public").unwrap(), vec!["pgkit".to_string()]);
        scratch.execute("DROP TABLE pgkit", &[]).unwrap();

        scratch.connection().clone()
    })
    .unwrap();

    assert_eq!(detail.database.len(), pgkit::unit::NAME_LENGTH);
    assert_ne!(&detail.database, &db.connection().database);
    assert!(Database::connect(detail.clone()).is_err());
    assert!(!database_exists(&mut db, &detail.database));
}

#[test]
fn test_disposable_database_is_dropped_on_panic() {
    let Some(mut db) = common::open_test_database() else {
        return;
    };

    let mut name = String::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        run_in_disposable_database::<_, ()>(&mut db, |scratch| {
            name = scratch.connection().database.clone();
            panic!("test body failed");
        })
    }));

    assert!(outcome.is_err());
    assert!(!name.is_empty());
    assert!(!database_exists(&mut db, &name));
}

#[test]
fn test_nested_disposable_databases() {
    let Some(mut db) = common::open_test_database() else {
        return;
    };

    let (outer, inner) = run_in_disposable_database(&mut db, |scratch| {
        let outer = scratch.connection().database.clone();
        let inner = run_in_disposable_database(scratch, |nested| {
            nested.connection().database.clone()
        })
        .unwrap();
        (outer, inner)
    })
    .unwrap();

    assert_ne!(outer, inner);
    assert!(!database_exists(&mut db, &outer));
    assert!(!database_exists(&mut db, &inner));
}

#[test]
fn test_disposable_database_guard() {
    let Some(mut db) = common::open_test_database() else {
        return;
    };

    let disposable = DisposableDatabase::create(&mut db).unwrap();
    let name = disposable.name().to_string();
    assert_eq!(disposable.connection().database, name);

    {
        let mut first = disposable.open().unwrap();
        first.execute("CREATE TABLE kept (pk INT)", &[]).unwrap();
    }

    let mut second = disposable.open().unwrap();
    assert_eq!(list_tables(&mut second, "public").unwrap(), vec!["kept".to_string()]);
    second.close().unwrap();

    disposable.drop_database().unwrap();
    assert!(!database_exists(&mut db, &name));
}
