//! Node registry (YAML list of federation peers, §6).

use crate::error::StorageError;
use gk_core::Node;
use std::path::Path;

pub fn load_node_registry(path: &Path) -> Result<Vec<Node>, StorageError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_yaml::from_str(&contents)?)
}

#[cfg(test)]
#[path = "node_registry_tests.rs"]
mod tests;
