//! Property tests for the facade
//!
//! Each case builds its own current-thread runtime and ephemeral handle.

use crate::common::*;
use proptest::prelude::*;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn write_then_read_returns_entry(name in "[a-zA-Z0-9_-]{1,24}", value in ".{0,64}") {
        let got = block_on(async {
            let handle = ephemeral();
            handle.add_name(name.clone(), value.clone()).await.unwrap();
            handle.provider().get_example(name.clone()).await.unwrap()
        });
        prop_assert_eq!(got, Some(NameValueEntry::new(name, value)));
    }

    #[test]
    fn unwritten_name_reads_empty(written in "[a-z]{1,8}", missing in "[A-Z]{1,8}") {
        let (raw, rpc) = block_on(async {
            let handle = ephemeral();
            handle.add_name(written, "x").await.unwrap();
            let raw = handle.provider().get_example(missing.clone()).await.unwrap();
            let rpc = handle.get_name(missing).await.unwrap();
            (raw, rpc)
        });
        prop_assert!(raw.is_none());
        prop_assert!(!rpc.successful);
        prop_assert_eq!(rpc.first_error_message(), Some("Name not found"));
    }

    #[test]
    fn repeated_write_is_idempotent(name in "[a-z]{1,12}", value in "[ -~]{0,32}") {
        let (once, twice) = block_on(async {
            let a = ephemeral();
            a.add_name(name.clone(), value.clone()).await.unwrap();

            let b = ephemeral();
            b.add_name(name.clone(), value.clone()).await.unwrap();
            b.add_name(name.clone(), value.clone()).await.unwrap();

            (a.list_names().await.unwrap(), b.list_names().await.unwrap())
        });
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn hello_world_is_pure(name in ".{0,48}") {
        let (greeting, version) = block_on(async {
            let handle = ephemeral();
            let hello = handle.hello_world(name.clone()).await.unwrap();
            (hello.result.unwrap().greeting, handle.database().version())
        });
        prop_assert_eq!(greeting, format!("Hello {}", name));
        prop_assert_eq!(version, 0);
    }

    #[test]
    fn last_write_wins(name in "[a-z]{1,8}", values in proptest::collection::vec("[0-9]{1,4}", 1..8)) {
        let got = block_on(async {
            let handle = ephemeral();
            for value in &values {
                handle.add_name(name.clone(), value.clone()).await.unwrap();
            }
            value_of(&handle, &name).await
        });
        prop_assert_eq!(got.as_ref(), values.last());
    }
}
