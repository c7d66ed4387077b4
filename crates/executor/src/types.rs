//! RPC input and output payloads.

use serde::{Deserialize, Serialize};

/// Input of `hello-world`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloWorldInput {
    /// Who to greet
    pub name: String,
}

/// Output of `hello-world`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloWorldOutput {
    /// `"Hello " + name`
    pub greeting: String,
}

/// Input of `add-name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddNameInput {
    /// List key
    pub name: String,
    /// Value to store
    pub value: String,
}

/// Output of `add-name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddNameOutput {
    /// Confirmation message
    pub result: String,
}

/// Input of `get-name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetNameInput {
    /// List key to look up
    pub name: String,
}

/// Output of `get-name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetNameOutput {
    /// Stored value
    pub value: String,
}

impl HelloWorldInput {
    /// Build from a name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AddNameInput {
    /// Build from a name and value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl GetNameInput {
    /// Build from a name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
