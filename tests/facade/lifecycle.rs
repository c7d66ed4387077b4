//! Handle lifecycle and persistence
//!
//! start/stop, snapshot reload and read-only access.

use crate::common::*;

#[tokio::test]
async fn persisted_entries_survive_restart() {
    let dir = TempDir::new().unwrap();
    {
        let handle = persistent(&dir);
        handle.add_name("alice", "42").await.unwrap();
        handle.add_name("bob", "7").await.unwrap();
        handle.stop().unwrap();
    }

    let handle = persistent(&dir);
    assert_eq!(value_of(&handle, "alice").await.as_deref(), Some("42"));
    assert_eq!(value_of(&handle, "bob").await.as_deref(), Some("7"));
    assert_eq!(handle.database().version(), 2);
    handle.stop().unwrap();
}

#[tokio::test]
async fn version_continues_after_restart() {
    let dir = TempDir::new().unwrap();
    let handle = persistent(&dir);
    handle.add_name("alice", "1").await.unwrap();
    handle.stop().unwrap();

    let handle = persistent(&dir);
    handle.add_name("alice", "2").await.unwrap();
    assert_eq!(handle.database().version(), 2);
    assert_eq!(value_of(&handle, "alice").await.as_deref(), Some("2"));
}

#[tokio::test]
async fn snapshot_file_is_written_on_commit() {
    let dir = TempDir::new().unwrap();
    let handle = persistent(&dir);
    handle.add_name("alice", "42").await.unwrap();

    let path = dir.path().join("config.json");
    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["entries"][0]["name"], "alice");
    assert_eq!(json["entries"][0]["value"], "42");
}

#[tokio::test]
async fn ephemeral_handles_do_not_share_state() {
    let first = ephemeral();
    first.add_name("alice", "42").await.unwrap();
    first.stop().unwrap();

    let second = ephemeral();
    assert_eq!(value_of(&second, "alice").await, None);
}

#[tokio::test]
async fn read_only_rejects_writes() {
    let dir = TempDir::new().unwrap();
    let writer = persistent(&dir);
    writer.add_name("alice", "42").await.unwrap();
    writer.stop().unwrap();

    let handle = read_only(&dir);
    assert_eq!(value_of(&handle, "alice").await.as_deref(), Some("42"));

    let added = handle.add_name("bob", "1").await.unwrap();
    assert!(!added.successful);
    assert_eq!(added.errors[0].error_type, ErrorType::Application);
    assert_eq!(added.errors[0].cause.as_deref(), Some("store is read-only"));
    assert_eq!(value_of(&handle, "bob").await, None);
}

#[tokio::test]
async fn stop_is_idempotent() {
    let handle = ephemeral();
    assert!(handle.is_running());
    handle.stop().unwrap();
    handle.stop().unwrap();
    assert!(!handle.is_running());
}

#[tokio::test]
async fn reads_fail_after_stop() {
    let handle = ephemeral();
    handle.stop().unwrap();
    let err = handle.get_name("alice").await.unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)));
}

#[test]
fn config_file_drives_start() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("exemplar.toml");
    let data = dir.path().join("data");
    std::fs::write(
        &file,
        format!("data_dir = {:?}\ndurability = \"strict\"\n", data.display().to_string()),
    )
    .unwrap();

    let config = ExemplarConfig::load(&file).unwrap();
    let handle = Exemplar::start(&config).unwrap();
    assert_eq!(handle.database().durability_mode(), DurabilityMode::Strict);
    assert_eq!(handle.database().data_dir(), Some(data.as_path()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stop_during_writes_keeps_every_acknowledged_name() {
    for round in 0..20 {
        let dir = TempDir::new().unwrap();
        let handle = persistent(&dir);

        let writers: Vec<_> = (0..8)
            .map(|i| {
                let handle = handle.clone();
                tokio::spawn(async move {
                    let name = format!("k{}", i);
                    let added = handle.add_name(name.clone(), "v").await.unwrap();
                    added.successful.then_some(name)
                })
            })
            .collect();
        let stopper = handle.clone();
        tokio::task::spawn_blocking(move || stopper.stop())
            .await
            .unwrap()
            .unwrap();

        let mut acked = Vec::new();
        for w in writers {
            acked.extend(w.await.unwrap());
        }

        let reopened = persistent(&dir);
        for name in &acked {
            assert!(
                value_of(&reopened, name).await.is_some(),
                "round {}: {} acknowledged but missing after restart",
                round,
                name
            );
        }
        reopened.stop().unwrap();
    }
}
