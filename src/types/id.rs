// ABOUTME: Container identifier newtype.
// ABOUTME: Wraps the runtime-assigned ID string reported by `run`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A runtime-assigned container identifier.
///
/// Produced by the engine from the runtime's `run` output, or
/// deserialized from the `ID` field of a listing line. The inner string
/// is stored exactly as the runtime reported it (modulo the single
/// trailing line terminator the engine strips).
#[must_use = "IDs reference resources and should not be ignored"]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
