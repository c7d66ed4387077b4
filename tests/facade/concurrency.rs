//! Write serialization and conflict detection

use crate::common::*;
use exemplar::engine::WriteTransaction;
use std::sync::Arc;

#[tokio::test]
async fn conflicting_commit_is_rejected() {
    let handle = ephemeral();
    let db = handle.database();

    let mut first = db.new_write_only_transaction();
    let mut second = db.new_write_only_transaction();
    first
        .put(EntryPath::config("alice"), NameValueEntry::new("alice", "1"))
        .unwrap();
    second
        .put(EntryPath::config("alice"), NameValueEntry::new("alice", "2"))
        .unwrap();

    first.commit().await.unwrap();
    let err = second.commit().await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert!(err.is_retryable());
    assert_eq!(value_of(&handle, "alice").await.as_deref(), Some("1"));
}

#[tokio::test]
async fn disjoint_keys_do_not_conflict() {
    let handle = ephemeral();
    let db = handle.database();

    let mut first = db.new_write_only_transaction();
    let mut second = db.new_write_only_transaction();
    first
        .put(EntryPath::config("alice"), NameValueEntry::new("alice", "1"))
        .unwrap();
    second
        .put(EntryPath::config("bob"), NameValueEntry::new("bob", "2"))
        .unwrap();

    first.commit().await.unwrap();
    second.commit().await.unwrap();
    assert_eq!(handle.list_names().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_add_names_all_land() {
    let handle = Arc::new(ephemeral());
    let mut tasks = Vec::new();
    for i in 0..32 {
        let handle = Arc::clone(&handle);
        tasks.push(tokio::spawn(async move {
            handle
                .add_name(format!("name-{}", i), i.to_string())
                .await
                .unwrap()
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap().successful);
    }

    assert_eq!(handle.list_names().await.unwrap().len(), 32);
    assert_eq!(handle.database().version(), 32);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_persistent_commits_are_serialized() {
    let dir = TempDir::new().unwrap();
    let handle = Arc::new(persistent(&dir));
    let mut tasks = Vec::new();
    for i in 0..8 {
        let handle = Arc::clone(&handle);
        tasks.push(tokio::spawn(async move {
            handle.add_name(format!("k{}", i), "v").await.unwrap()
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap().successful);
    }
    handle.stop().unwrap();

    let reopened = persistent(&dir);
    assert_eq!(reopened.list_names().await.unwrap().len(), 8);
}
