// Tests for the visited store

use chrono::{Local, TimeZone};
use linktrail_core::data::{VisitedStore, fresh_store_path, store_filename};
use linktrail_scanner::VisitedSet;
use rusqlite::Connection;
use tempfile::TempDir;

fn create_test_store() -> (TempDir, VisitedStore) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let store = VisitedStore::open(&db_path).unwrap();
    (temp_dir, store)
}

// ============================================================================
// Store Creation Tests
// ============================================================================

#[test]
fn test_store_creation() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    assert!(!VisitedStore::exists(&db_path));
    let store = VisitedStore::open(&db_path);
    assert!(store.is_ok());
    assert!(VisitedStore::exists(&db_path));
}

#[test]
fn test_new_store_is_empty() {
    let (_temp_dir, store) = create_test_store();
    assert_eq!(store.len().unwrap(), 0);
    assert!(store.is_empty().unwrap());
    assert!(store.urls().unwrap().is_empty());
}

#[test]
fn test_open_in_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("no").join("such").join("dir.db");
    assert!(VisitedStore::open(&db_path).is_err());
}

// ============================================================================
// Record / Contains Tests
// ============================================================================

#[test]
fn test_record_then_contains() {
    let (_temp_dir, store) = create_test_store();

    assert!(!store.contains("http://example.com/a").unwrap());
    assert!(store.record("http://example.com/a").unwrap());
    assert!(store.contains("http://example.com/a").unwrap());
    assert!(!store.contains("http://example.com/b").unwrap());
}

#[test]
fn test_record_is_idempotent() {
    let (_temp_dir, store) = create_test_store();

    assert!(store.record("http://example.com/a").unwrap());
    assert!(!store.record("http://example.com/a").unwrap());
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn test_urls_in_insertion_order() {
    let (_temp_dir, store) = create_test_store();

    for url in ["http://e.com/c", "http://e.com/a", "http://e.com/b", "http://e.com/a"] {
        store.record(url).unwrap();
    }

    assert_eq!(
        store.urls().unwrap(),
        vec!["http://e.com/c", "http://e.com/a", "http://e.com/b"]
    );
}

#[test]
fn test_identity_is_exact_string() {
    let (_temp_dir, store) = create_test_store();

    store.record("http://e.com/a").unwrap();
    assert!(store.record("http://e.com/a/").unwrap());
    assert_eq!(store.len().unwrap(), 2);
}

#[test]
fn test_visited_set_trait() {
    let (_temp_dir, mut store) = create_test_store();

    assert!(VisitedSet::record(&mut store, "http://e.com/").unwrap());
    assert!(!VisitedSet::record(&mut store, "http://e.com/").unwrap());
    assert!(VisitedSet::contains(&store, "http://e.com/").unwrap());
}

// ============================================================================
// Durability Tests
// ============================================================================

#[test]
fn test_records_survive_close() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let store = VisitedStore::open(&db_path).unwrap();
    store.record("http://e.com/1").unwrap();
    store.record("http://e.com/2").unwrap();
    store.close().unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM urls", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn test_records_survive_without_close() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    {
        let store = VisitedStore::open(&db_path).unwrap();
        store.record("http://e.com/1").unwrap();
        // Dropped without close(), as on an abnormal exit.
    }

    let reopened = VisitedStore::open(&db_path).unwrap();
    assert!(reopened.contains("http://e.com/1").unwrap());
}

#[test]
fn test_store_is_exclusive_while_open() {
    let (temp_dir, store) = create_test_store();
    store.record("http://e.com/1").unwrap();

    let other = Connection::open(temp_dir.path().join("test.db")).unwrap();
    let result: rusqlite::Result<i64> =
        other.query_row("SELECT COUNT(*) FROM urls", [], |row| row.get(0));
    assert!(result.is_err());
}

#[test]
fn test_reopen_does_not_duplicate_schema() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    VisitedStore::open(&db_path).unwrap().close().unwrap();
    let store = VisitedStore::open(&db_path).unwrap();
    assert_eq!(store.path(), db_path.as_path());
    assert!(store.is_empty().unwrap());
}

// ============================================================================
// Store Filename Tests
// ============================================================================

#[test]
fn test_store_filename_strips_www_and_dots() {
    let started = Local.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap();
    assert_eq!(
        store_filename("https://www.example.com/", started),
        "example_com_20240301091500.db"
    );
}

#[test]
fn test_store_filename_keeps_subdomains() {
    let started = Local.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
    assert_eq!(
        store_filename("http://docs.rs.example.org/path", started),
        "docs_rs_example_org_20231231235959.db"
    );
}

#[test]
fn test_store_filename_only_leading_www() {
    let started = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(
        store_filename("http://awww.example.com/", started),
        "awww_example_com_20240102030405.db"
    );
}

#[test]
fn test_store_filename_drops_credentials() {
    let started = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(
        store_filename("http://user:p@ss@www.example.com/", started),
        "example_com_20240102030405.db"
    );
}

#[test]
fn test_fresh_store_path_avoids_existing_files() {
    let temp_dir = TempDir::new().unwrap();
    let name = "example_com_20240102030405.db";

    let first = fresh_store_path(temp_dir.path(), name);
    assert_eq!(first, temp_dir.path().join(name));
    VisitedStore::open(&first).unwrap().close().unwrap();

    let second = fresh_store_path(temp_dir.path(), name);
    assert_eq!(second, temp_dir.path().join("example_com_20240102030405_1.db"));
    VisitedStore::open(&second).unwrap().close().unwrap();

    let third = fresh_store_path(temp_dir.path(), name);
    assert_eq!(third, temp_dir.path().join("example_com_20240102030405_2.db"));
}
