//! Opaque agent identifiers.
//!
//! The embedding host names its entities however it likes (Bedrock entity
//! ids, test fixtures like `"v1"`), so an [`AgentId`] is a thin newtype over
//! a string rather than a generated UUID. The newtype still keeps agent ids
//! from being confused with option names or gossip messages at compile time.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of one simulated agent.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct AgentId(pub String);

impl AgentId {
    /// Create an identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string.
    ///
    /// Snapshots deserialized without an `id` field carry an empty id and
    /// are refused by the store.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for AgentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&AgentId> for AgentId {
    fn from(id: &AgentId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
