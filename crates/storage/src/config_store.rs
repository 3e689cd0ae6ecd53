//! `slot_config.yml` loading and mtime-based hot-reload.

use crate::atomic::{write_atomic, AtomicWriter};
use crate::error::StorageError;
use crate::paths::SlotPaths;
use gk_core::SlotConfig;
use std::time::SystemTime;

/// Loads `slot_config.yml`, tolerating a missing or empty file by falling
/// back to [`SlotConfig::default`] (matches `_load_config`'s tolerant
/// behavior in the original worker).
pub fn load_config(paths: &SlotPaths) -> Result<SlotConfig, StorageError> {
    let path = paths.config_file();
    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(SlotConfig::default()),
        Err(e) => return Err(e.into()),
    };
    if contents.trim().is_empty() {
        return Ok(SlotConfig::default());
    }
    Ok(serde_yaml::from_str(&contents)?)
}

pub fn write_config(writer: &dyn AtomicWriter, paths: &SlotPaths, config: &SlotConfig) -> Result<(), StorageError> {
    let yaml = serde_yaml::to_string(config)?;
    write_atomic(writer, &paths.config_file(), yaml.as_bytes())
}

/// Returns the config file's last-modified time, or `None` if it does not
/// exist. The worker compares this against its last-seen value each tick
/// to decide whether to reload (§4.3 FETCH_RECENT: "Hot-reload config").
pub fn config_mtime(paths: &SlotPaths) -> Option<SystemTime> {
    std::fs::metadata(paths.config_file()).and_then(|m| m.modified()).ok()
}

/// Tracks the last-observed mtime of a hot-reloadable file and reports
/// whether it has advanced since the previous check.
#[derive(Debug, Clone, Default)]
pub struct MtimeWatch {
    last_seen: Option<SystemTime>,
}

impl MtimeWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time it observes a mtime, and every time it
    /// advances thereafter; `false` if unchanged or the file is absent.
    pub fn check(&mut self, current: Option<SystemTime>) -> bool {
        match (current, self.last_seen) {
            (Some(now), Some(last)) if now > last => {
                self.last_seen = Some(now);
                true
            }
            (Some(now), None) => {
                self.last_seen = Some(now);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "config_store_tests.rs"]
mod tests;
