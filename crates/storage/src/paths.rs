//! Filename conventions for a slot directory (§6 "Persisted state layout").

use std::path::{Path, PathBuf};

/// Everything the store needs to locate a slot's on-disk documents.
#[derive(Debug, Clone)]
pub struct SlotPaths {
    pub dir: PathBuf,
}

impl SlotPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn state_file(&self) -> PathBuf {
        self.dir.join("state.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join("slot_config.yml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.dir.join("session.enc")
    }

    pub fn leads_file(&self) -> PathBuf {
        self.dir.join("leads.jsonl")
    }

    pub fn worker_log(&self) -> PathBuf {
        self.dir.join("worker.log")
    }

    pub fn worker_log_rotated(&self) -> PathBuf {
        self.dir.join("worker.log.old")
    }

    pub fn debug_dir(&self) -> PathBuf {
        self.dir.join("debug")
    }

    /// The slot id is the directory's final path component.
    pub fn slot_id(&self) -> Option<&str> {
        self.dir.file_name().and_then(|n| n.to_str())
    }
}

/// Enumerate slot directories under a node's slots root, skipping hidden
/// directories and those prefixed with `_` or `.` (§4.2 step 1).
pub fn list_slot_dirs(slots_root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    if !slots_root.exists() {
        return Ok(out);
    }
    for entry in std::fs::read_dir(slots_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if gk_core::SlotId::is_hidden(&name) {
            continue;
        }
        out.push(entry.path());
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
