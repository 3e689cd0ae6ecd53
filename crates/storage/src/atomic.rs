//! Atomic document writes: write-temp, fsync, rename-over-target. This is
//! the sole write primitive the state store, config store, and lead ledger
//! build on, so no document is ever observed half-written.

use crate::error::StorageError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Abstracts the filesystem operations an atomic write performs, so tests
/// can inject failures at each step without touching a real disk.
pub trait AtomicWriter: Send + Sync {
    fn write_tmp(&self, path: &Path, data: &[u8]) -> Result<(), StorageError>;
    fn fsync_file(&self, path: &Path) -> Result<(), StorageError>;
    fn rename(&self, from: &Path, to: &Path) -> Result<(), StorageError>;
    fn fsync_dir(&self, path: &Path) -> Result<(), StorageError>;
}

/// Production writer using real filesystem calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAtomicWriter;

impl AtomicWriter for FsAtomicWriter {
    fn write_tmp(&self, path: &Path, data: &[u8]) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        file.write_all(data)?;
        Ok(())
    }

    fn fsync_file(&self, path: &Path) -> Result<(), StorageError> {
        File::open(path)?.sync_all()?;
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        std::fs::rename(from, to)?;
        Ok(())
    }

    fn fsync_dir(&self, path: &Path) -> Result<(), StorageError> {
        // Not every platform allows opening a directory for fsync (notably
        // Windows); a failure here is logged by the caller but is not fatal
        // since the rename itself is already durable on the common case.
        match File::open(path) {
            Ok(dir) => {
                let _ = dir.sync_all();
                Ok(())
            }
            Err(_) => Ok(()),
        }
    }
}

fn tmp_path_for(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "doc".to_string());
    target.with_file_name(format!(".{file_name}.tmp"))
}

/// Write `bytes` to `target` via write-temp + fsync + rename. On any
/// failure the target file is left untouched (callers must treat a failed
/// write as having produced no change, per §4.1 contract).
pub fn write_atomic(writer: &dyn AtomicWriter, target: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let tmp = tmp_path_for(target);
    writer.write_tmp(&tmp, bytes)?;
    writer.fsync_file(&tmp)?;
    writer.rename(&tmp, target)?;
    if let Some(parent) = target.parent() {
        if let Err(err) = writer.fsync_dir(parent) {
            tracing::warn!(path = %target.display(), error = %err, "directory fsync failed after atomic rename");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
