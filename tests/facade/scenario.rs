//! Basic RPC scenarios
//!
//! add-name, get-name and hello-world through the handle.

use crate::common::*;
use exemplar::executor::{ADD_NAME_FAILED, EMPTY_NAME, NAME_ADDED, NAME_NOT_FOUND};

#[tokio::test]
async fn add_then_get_returns_value() {
    let handle = ephemeral();

    let added = handle.add_name("alice", "42").await.unwrap();
    assert!(added.successful);
    assert_eq!(added.result.unwrap().result, NAME_ADDED);

    let got = handle.get_name("alice").await.unwrap();
    assert!(got.successful);
    assert_eq!(got.result.unwrap().value, "42");
}

#[tokio::test]
async fn get_unknown_name_is_not_found() {
    let handle = ephemeral();

    let got = handle.get_name("bob").await.unwrap();
    assert!(!got.successful);
    assert!(got.result.is_none());
    assert_eq!(got.errors.len(), 1);
    assert_eq!(got.errors[0].error_type, ErrorType::Application);
    assert_eq!(got.errors[0].message, NAME_NOT_FOUND);
}

#[tokio::test]
async fn hello_world_greets() {
    let handle = ephemeral();
    let hello = handle.hello_world("world").await.unwrap();
    assert_eq!(hello.result.unwrap().greeting, "Hello world");
}

#[tokio::test]
async fn hello_world_does_not_touch_store() {
    let handle = ephemeral();
    handle.hello_world("world").await.unwrap();
    assert_eq!(handle.database().version(), 0);
    assert!(handle.list_names().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_overwrites_previous_value() {
    let handle = ephemeral();
    handle.add_name("alice", "1").await.unwrap();
    handle.add_name("alice", "2").await.unwrap();

    assert_eq!(value_of(&handle, "alice").await.as_deref(), Some("2"));
    assert_eq!(handle.list_names().await.unwrap().len(), 1);
}

#[tokio::test]
async fn empty_name_is_rejected_before_store() {
    let handle = ephemeral();
    let added = handle.add_name("", "42").await.unwrap();
    assert!(!added.successful);
    assert_eq!(added.errors[0].error_type, ErrorType::Protocol);
    assert_eq!(added.errors[0].message, EMPTY_NAME);
    assert_eq!(handle.database().version(), 0);

    // get-name does not validate; the empty key is simply absent
    let got = handle.get_name("").await.unwrap();
    assert_eq!(got.errors[0].message, NAME_NOT_FOUND);
}

#[tokio::test]
async fn add_to_stopped_handle_is_application_failure() {
    let handle = ephemeral();
    handle.stop().unwrap();

    let added = handle.add_name("alice", "42").await.unwrap();
    assert!(!added.successful);
    assert_eq!(added.errors[0].error_type, ErrorType::Application);
    assert_eq!(added.errors[0].message, ADD_NAME_FAILED);
    assert!(added.errors[0].cause.is_some());
}

#[tokio::test]
async fn list_is_sorted_by_name() {
    let handle = ephemeral();
    for (name, value) in [("carol", "3"), ("alice", "1"), ("bob", "2")] {
        handle.add_name(name, value).await.unwrap();
    }
    let names: Vec<_> = handle
        .list_names()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);
}

#[tokio::test]
async fn add_property_is_fire_and_forget() {
    let handle = ephemeral();
    handle.provider().add_property("alice", "42");
    assert_eq!(value_of(&handle, "alice").await.as_deref(), Some("42"));
}
