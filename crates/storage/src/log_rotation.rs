//! Simple size-based worker log rotation (§6: ">5 MiB -> .log.old").

use crate::error::StorageError;
use crate::paths::SlotPaths;

/// Rotation threshold named in §6.
pub const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;

/// If the worker log exceeds [`MAX_LOG_BYTES`], renames it to
/// `worker.log.old` (overwriting any previous rotation) so the active log
/// starts fresh on next open. Returns whether a rotation occurred.
pub fn rotate_if_oversized(paths: &SlotPaths) -> Result<bool, StorageError> {
    let log_path = paths.worker_log();
    let size = match std::fs::metadata(&log_path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    if size <= MAX_LOG_BYTES {
        return Ok(false);
    }
    std::fs::rename(&log_path, paths.worker_log_rotated())?;
    Ok(true)
}

#[cfg(test)]
#[path = "log_rotation_tests.rs"]
mod tests;
