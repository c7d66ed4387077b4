//! Facade integration tests
//!
//! Exercises the public `exemplar` API end to end: handle lifecycle, RPC
//! results, persistence, access control and store-level properties.

mod common;

mod commands;
mod concurrency;
mod lifecycle;
mod properties;
mod scenario;
