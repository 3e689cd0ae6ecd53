//! Real process adapter: spawns via `tokio::process::Command` and signals
//! by shelling out to the `kill` binary rather than calling into `libc`
//! directly, keeping the crate free of `unsafe`.

use super::{ProcessAdapter, ProcessError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Clone, Copy, Default)]
pub struct OsProcessAdapter;

impl OsProcessAdapter {
    pub fn new() -> Self {
        Self
    }
}

async fn kill_signal(signal: &str, target: &str) -> Result<bool, ProcessError> {
    let output = Command::new("kill")
        .args([signal, target])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|e| ProcessError::CommandFailed(e.to_string()))?;
    Ok(output.status.success())
}

#[async_trait]
impl ProcessAdapter for OsProcessAdapter {
    async fn spawn(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        env: &HashMap<String, String>,
        log_path: &Path,
    ) -> Result<u32, ProcessError> {
        if !cwd.exists() {
            return Err(ProcessError::SpawnFailed(format!(
                "working directory does not exist: {}",
                cwd.display()
            )));
        }

        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .map_err(|e| ProcessError::SpawnFailed(e.to_string()))?;
        let log_file_err = log_file
            .try_clone()
            .map_err(|e| ProcessError::SpawnFailed(e.to_string()))?;

        let mut command = Command::new(program);
        command
            .args(args)
            .current_dir(cwd)
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log_file))
            .stderr(Stdio::from(log_file_err))
            // Own process group: a later group-wide signal does not also
            // hit the supervisor itself.
            .process_group(0);

        let child = command
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed(e.to_string()))?;

        let pid = child
            .id()
            .ok_or_else(|| ProcessError::SpawnFailed("child exited before pid was read".into()))?;

        // Detach: the supervisor tracks liveness through the pid recorded
        // in the state document, not through this handle. Dropping it does
        // not signal the child on Unix.
        drop(child);

        Ok(pid)
    }

    async fn is_alive(&self, pid: u32) -> Result<bool, ProcessError> {
        kill_signal("-0", &pid.to_string()).await
    }

    async fn terminate(&self, pid: u32) -> Result<(), ProcessError> {
        kill_signal("-15", &format!("-{pid}")).await?;
        Ok(())
    }

    async fn force_kill(&self, pid: u32) -> Result<(), ProcessError> {
        kill_signal("-9", &format!("-{pid}")).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "os_tests.rs"]
mod tests;
