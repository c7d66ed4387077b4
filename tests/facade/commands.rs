//! Command dispatch through the handle's executor

use crate::common::*;

#[tokio::test]
async fn json_requests_round_trip() {
    let handle = ephemeral();
    let executor = handle.executor();

    let added = executor
        .execute_json(r#"{"op": "add_name", "name": "alice", "value": "42"}"#)
        .await
        .unwrap();
    let added: serde_json::Value = serde_json::from_str(&added).unwrap();
    assert_eq!(added["successful"], true);
    assert_eq!(added["result"]["result"], "Name added successfully");

    let got = executor
        .execute_json(r#"{"op": "get_name", "name": "alice"}"#)
        .await
        .unwrap();
    let got: serde_json::Value = serde_json::from_str(&got).unwrap();
    assert_eq!(got["result"]["value"], "42");

    let listed = executor.execute_json(r#"{"op": "list_names"}"#).await.unwrap();
    let listed: serde_json::Value = serde_json::from_str(&listed).unwrap();
    assert_eq!(listed, serde_json::json!([{"name": "alice", "value": "42"}]));
}

#[tokio::test]
async fn typed_commands_match_handle_calls() {
    let handle = ephemeral();
    let output = handle
        .executor()
        .execute(Command::AddName {
            name: "bob".into(),
            value: "7".into(),
        })
        .await
        .unwrap();
    assert!(output.is_successful());
    assert_eq!(value_of(&handle, "bob").await.as_deref(), Some("7"));

    let missing = handle
        .executor()
        .execute(Command::GetName {
            name: "carol".into(),
        })
        .await
        .unwrap();
    assert!(!missing.is_successful());
}

#[tokio::test]
async fn malformed_request_is_rejected() {
    let handle = ephemeral();
    let err = handle.executor().execute_json("not json").await.unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[tokio::test]
async fn read_only_command_reports_failure() {
    let dir = TempDir::new().unwrap();
    let handle = read_only(&dir);
    let output = handle
        .executor()
        .execute(Command::AddName {
            name: "alice".into(),
            value: "1".into(),
        })
        .await
        .unwrap();
    assert!(!output.is_successful());
    match output {
        Output::Added(result) => {
            assert_eq!(result.errors[0].tag, "access-denied");
        }
        _ => panic!("Expected Added output"),
    }
}
