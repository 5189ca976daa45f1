// Flat-file record store tests

use chrono::NaiveDate;
use fieldscope_api::routes::fields::models::FieldRecord;
use fieldscope_api::routes::fields::store::{FieldStore, JsonFileStore};
use tempfile::TempDir;

fn record(name: &str) -> FieldRecord {
    FieldRecord {
        name: name.to_string(),
        coords: vec![[22.54, 40.64], [22.56, 40.64], [22.55, 40.66], [22.54, 40.64]],
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    }
}

#[tokio::test]
async fn test_missing_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("fields_db.json"));

    let records = store.records_for_user("demo").await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_append_and_read_back_preserves_order() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("fields_db.json"));

    store.append_record("demo", record("cotton river")).await.unwrap();
    store.append_record("demo", record("olive grove")).await.unwrap();

    let records = store.records_for_user("demo").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "cotton river");
    assert_eq!(records[1].name, "olive grove");
    assert_eq!(records[0].coords.len(), 4);
}

#[tokio::test]
async fn test_records_are_isolated_per_user() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("fields_db.json"));

    store.append_record("alice", record("north plot")).await.unwrap();
    store.append_record("bob", record("south plot")).await.unwrap();

    let alice = store.records_for_user("alice").await.unwrap();
    let bob = store.records_for_user("bob").await.unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(bob.len(), 1);
    assert_eq!(alice[0].name, "north plot");
    assert_eq!(bob[0].name, "south plot");
}

#[tokio::test]
async fn test_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fields_db.json");

    {
        let store = JsonFileStore::new(&path);
        store.append_record("demo", record("cotton river")).await.unwrap();
    }

    // A fresh store over the same file sees the earlier write
    let store = JsonFileStore::new(&path);
    let records = store.records_for_user("demo").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
}

#[tokio::test]
async fn test_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("fields_db.json");

    let store = JsonFileStore::new(&path);
    store.append_record("demo", record("cotton river")).await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fields_db.json");
    tokio::fs::write(&path, b"not json at all").await.unwrap();

    let store = JsonFileStore::new(&path);
    assert!(store.records_for_user("demo").await.is_err());
}
