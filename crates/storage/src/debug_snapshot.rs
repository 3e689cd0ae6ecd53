//! Optional HTML/JSON debug snapshots, written only when
//! `SlotConfig::debug_snapshot` is set. Not atomic — these are
//! throwaway diagnostics, not coordination state.

use crate::error::StorageError;
use crate::paths::SlotPaths;
use chrono::Utc;

/// Writes `content` under `<slot>/debug/<label>-<timestamp>.<ext>`,
/// creating the debug directory on first use.
pub fn write_snapshot(paths: &SlotPaths, label: &str, ext: &str, content: &[u8]) -> Result<std::path::PathBuf, StorageError> {
    let dir = paths.debug_dir();
    std::fs::create_dir_all(&dir)?;
    let filename = format!("{label}-{}.{ext}", Utc::now().format("%Y%m%dT%H%M%S%.3f"));
    let path = dir.join(filename);
    std::fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
#[path = "debug_snapshot_tests.rs"]
mod tests;
