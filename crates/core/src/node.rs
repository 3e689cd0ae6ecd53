//! Federation node registry entry.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};

/// One entry of the node registry (§6 "Node registry (YAML)"). A slot
/// belongs to exactly one node at a time; federation is routing, not
/// replication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub node_id: NodeId,
    pub node_name: String,
    /// Empty means local.
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub shared_token: String,
}

impl Node {
    /// Aliases recognised as "this node" regardless of registry contents,
    /// matching the dispatch contract in §4.4.
    pub const LOCAL_ALIASES: [&'static str; 2] = ["local", "node_local"];

    pub fn is_local(&self) -> bool {
        self.base_url.is_empty()
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
