use chrono::{TimeZone, Utc};
use showcase_core::db::migrations::{latest_version, user_version};
use showcase_core::db::open_db;
use showcase_core::{
    KeyValueStore, MemoryKeyValueStore, Project, ProjectId, ProjectStorage, SqliteKeyValueStore,
    StorageError, DEFAULT_STORAGE_KEY,
};

fn project(id: i64) -> Project {
    Project::with_id(
        ProjectId(id),
        format!("Project {id}"),
        format!("Description {id}"),
        Utc.with_ymd_and_hms(2026, 2, 8, 10, 0, 0).unwrap(),
    )
}

#[test]
fn save_then_load_roundtrip() {
    let mut storage = ProjectStorage::new(MemoryKeyValueStore::new());
    let projects = vec![project(1), project(2)];

    assert!(storage.save_projects(&projects));
    assert!(storage
        .backend()
        .get(DEFAULT_STORAGE_KEY)
        .unwrap()
        .is_some());
    assert_eq!(storage.load_projects(), projects);
}

#[test]
fn load_without_saved_key_is_empty() {
    let storage = ProjectStorage::new(MemoryKeyValueStore::new());
    assert!(storage.load_projects().is_empty());
}

#[test]
fn clear_removes_saved_projects() {
    let mut storage = ProjectStorage::new(MemoryKeyValueStore::new());
    storage.save_projects(&[project(1)]);
    assert!(storage.clear_projects());
    assert!(storage.load_projects().is_empty());
}

#[test]
fn malformed_blob_loads_as_empty() {
    let mut backend = MemoryKeyValueStore::new();
    backend.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
    let storage = ProjectStorage::new(backend);

    assert!(storage.load_projects().is_empty());
    assert_eq!(storage.storage_info().item_count, 0);
}

#[test]
fn save_failure_is_reported_by_try_and_swallowed_by_best_effort() {
    let mut storage = ProjectStorage::new(MemoryKeyValueStore::with_quota(10));

    let err = storage.try_save_projects(&[project(1)]).unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { .. }));
    assert!(!storage.save_projects(&[project(1)]));
}

#[test]
fn unavailable_backend_loads_empty_and_clear_reports_failure() {
    let mut backend = MemoryKeyValueStore::new();
    backend.set_available(false);
    let mut storage = ProjectStorage::new(backend);

    assert!(storage.load_projects().is_empty());
    assert!(!storage.clear_projects());
    assert!(matches!(
        storage.try_clear_projects(),
        Err(StorageError::Unavailable(_))
    ));
}

#[test]
fn storage_info_reports_size_and_count() {
    let mut storage = ProjectStorage::new(MemoryKeyValueStore::new());
    assert_eq!(storage.storage_info().size_in_bytes, 0);

    storage.save_projects(&[project(1), project(2), project(3)]);
    let blob = storage.backend().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();

    let info = storage.storage_info();
    assert_eq!(info.item_count, 3);
    assert_eq!(info.size_in_bytes, blob.len());
    assert!(info.size_in_kb() > 0.0);
}

#[test]
fn custom_key_isolates_collections() {
    let mut storage = ProjectStorage::with_key(MemoryKeyValueStore::new(), "other_key");
    storage.save_projects(&[project(1)]);

    let backend = storage.into_backend();
    assert!(backend.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    assert!(backend.get("other_key").unwrap().is_some());
}

#[test]
fn sqlite_store_upserts_and_removes() {
    let mut store = SqliteKeyValueStore::open_in_memory().unwrap();
    assert_eq!(store.get("k").unwrap(), None);

    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    store.set("a", "first").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "k".to_string()]);

    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn sqlite_file_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("showcase.sqlite3");

    {
        let mut storage = ProjectStorage::new(SqliteKeyValueStore::open(&path).unwrap());
        assert!(storage.save_projects(&[project(1), project(2)]));
    }

    let reopened = ProjectStorage::new(SqliteKeyValueStore::open(&path).unwrap());
    let loaded = reopened.load_projects();
    assert_eq!(loaded, vec![project(1), project(2)]);
}

#[test]
fn open_db_applies_migrations_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("migrations.sqlite3");

    let conn = open_db(&path).unwrap();
    assert_eq!(user_version(&conn).unwrap(), latest_version());
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(user_version(&conn).unwrap(), latest_version());
}

#[test]
fn open_db_rejects_newer_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    }

    let err = SqliteKeyValueStore::open(&path).unwrap_err();
    assert!(err.to_string().contains("newer than supported"));
}
