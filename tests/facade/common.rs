//! Shared helpers for facade tests.

pub use exemplar::prelude::*;
pub use exemplar::types::*;
pub use tempfile::TempDir;

pub fn ephemeral() -> Exemplar {
    Exemplar::ephemeral().expect("ephemeral handle")
}

pub fn persistent(dir: &TempDir) -> Exemplar {
    Exemplar::start(&ExemplarConfig::persistent(dir.path())).expect("persistent handle")
}

pub fn read_only(dir: &TempDir) -> Exemplar {
    let config = ExemplarConfig::persistent(dir.path()).with_read_only(true);
    Exemplar::start(&config).expect("read-only handle")
}

/// Value stored under `name`, or `None` if `get-name` failed.
pub async fn value_of(handle: &Exemplar, name: &str) -> Option<String> {
    handle
        .get_name(name)
        .await
        .expect("get-name")
        .result
        .map(|o| o.value)
}
