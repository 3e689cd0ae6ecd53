//! Single-instance PID-file lock (spec §4.2 "Single-instance guarantee"),
//! built on `fs2::FileExt::try_lock_exclusive` at startup. An OS advisory
//! lock is released automatically if the holding process dies, which is
//! what gives us "a stale file whose pid no longer exists is reclaimed"
//! for free — no separate liveness check of the recorded pid is needed.

use crate::SupervisorError;
use fs2::FileExt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// An exclusively-locked PID file. The lock is released when this value is
/// dropped; the file itself is left on disk (harmless — the next
/// supervisor to start reclaims it via the OS lock, not by reading pids).
pub struct SupervisorLock {
    file: File,
    path: PathBuf,
}

impl SupervisorLock {
    /// Acquires the lock at `path`, creating the file if absent and
    /// writing the current pid into it. Fails with
    /// [`SupervisorError::AlreadyRunning`] if another live process holds it.
    pub fn acquire(path: &Path) -> Result<Self, SupervisorError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.try_lock_exclusive().map_err(SupervisorError::AlreadyRunning)?;

        let mut file = file;
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;

        Ok(Self { file, path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SupervisorLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
