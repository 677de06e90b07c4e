//! SQLite local store against a real database file.

mod support;

use std::sync::Arc;

use schoolhub_core::{FixedClock, LocalMeetingStore, MeetingCoordinator, Source};
use schoolhub_domain::{MeetingStatus, SchoolHubError};
use schoolhub_infra::database::{DbManager, SqliteMeetingStore};
use support::{base_time, meeting, TestDatabase};

#[tokio::test]
async fn empty_database_loads_an_empty_collection() {
    let db = TestDatabase::new();
    let store = SqliteMeetingStore::new(Arc::clone(&db.manager));

    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn save_replaces_the_whole_collection() {
    let db = TestDatabase::new();
    let store = SqliteMeetingStore::new(Arc::clone(&db.manager));

    store.save(&[meeting("a"), meeting("b")]).await.unwrap();
    store.save(&[meeting("c")]).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, vec![meeting("c")]);
}

#[tokio::test]
async fn clear_drops_the_document() {
    let db = TestDatabase::new();
    let store = SqliteMeetingStore::new(Arc::clone(&db.manager));

    store.save(&[meeting("a")]).await.unwrap();
    store.clear().await.unwrap();
    store.clear().await.unwrap();

    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn collection_survives_reopening_the_file() {
    let db = TestDatabase::new();
    SqliteMeetingStore::new(Arc::clone(&db.manager)).save(&[meeting("a")]).await.unwrap();

    let reopened = Arc::new(DbManager::new(db.db_path(), 1).unwrap());
    reopened.run_migrations().unwrap();
    let loaded = SqliteMeetingStore::new(reopened).load().await.unwrap();

    assert_eq!(loaded, vec![meeting("a")]);
}

#[tokio::test]
async fn corrupt_document_is_a_database_error() {
    let db = TestDatabase::new();
    db.manager
        .get_connection()
        .unwrap()
        .execute(
            "INSERT INTO app_storage (key, value, updated_at) VALUES ('meetings', 'not json', 0)",
            [],
        )
        .unwrap();

    let err = SqliteMeetingStore::new(Arc::clone(&db.manager)).load().await.unwrap_err();

    assert!(matches!(err, SchoolHubError::Database(_)));
}

#[tokio::test]
async fn coordinator_lifecycle_is_persisted() {
    let db = TestDatabase::new();
    let store = Arc::new(SqliteMeetingStore::new(Arc::clone(&db.manager)));
    store.save(&[meeting("m-1")]).await.unwrap();

    let clock = Arc::new(FixedClock::new(base_time()));
    let coordinator = MeetingCoordinator::new(store.clone(), clock);
    coordinator.start("m-1", "teacher-1").await.unwrap();
    coordinator.end("m-1", "teacher-1").await.unwrap();

    let stored = store.load().await.unwrap();
    assert_eq!(stored[0].status, MeetingStatus::Ended);
    assert_eq!(stored[0].ended_by.as_deref(), Some("teacher-1"));
    assert_eq!(coordinator.read().await.source, Source::LocalAuthoritative);
}

#[tokio::test]
async fn unreadable_document_is_treated_as_empty_by_the_coordinator() {
    let db = TestDatabase::new();
    db.manager
        .get_connection()
        .unwrap()
        .execute(
            "INSERT INTO app_storage (key, value, updated_at) VALUES ('meetings', '{', 0)",
            [],
        )
        .unwrap();

    let store = Arc::new(SqliteMeetingStore::new(Arc::clone(&db.manager)));
    let clock = Arc::new(FixedClock::new(base_time()));
    let coordinator = MeetingCoordinator::new(store.clone(), clock);

    let snapshot = coordinator.read().await;

    assert_eq!(snapshot.source, Source::SeededFallback);
    assert_eq!(store.load().await.unwrap(), snapshot.meetings);
}
