//! Process lifecycle adapter: spawning a worker in its own process group,
//! reaping it, and a polling-based shutdown sequence (signal, wait, escalate).

mod os;
pub use os::OsProcessAdapter;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProcessAdapter, ProcessCall};

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("spawn failed: {0}")]
    SpawnFailed(String),
    #[error("process {0} not found")]
    NotFound(u32),
    #[error("command failed: {0}")]
    CommandFailed(String),
}

/// How long to wait for a signaled process to exit before escalating.
pub const TERM_GRACE: Duration = Duration::from_secs(10);

/// Adapter for spawning and reaping worker processes. All operations are
/// keyed by the leader's pid, which doubles as the process group id since
/// every spawn starts a fresh group (`setpgid(0, 0)` equivalent).
#[async_trait]
pub trait ProcessAdapter: Clone + Send + Sync + 'static {
    /// Spawn `program` with `args` in `cwd`, redirecting stdout+stderr to
    /// `log_path` (append mode) and stdin to `/dev/null`, in a new process
    /// group. Returns the leader pid.
    async fn spawn(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        env: &HashMap<String, String>,
        log_path: &Path,
    ) -> Result<u32, ProcessError>;

    /// `kill -0 pid`: true iff a process with this pid exists (any state).
    async fn is_alive(&self, pid: u32) -> Result<bool, ProcessError>;

    /// Send SIGTERM to the whole process group.
    async fn terminate(&self, pid: u32) -> Result<(), ProcessError>;

    /// Send SIGKILL to the whole process group.
    async fn force_kill(&self, pid: u32) -> Result<(), ProcessError>;

    /// Poll `is_alive` every 50ms until it returns false or `timeout` elapses.
    /// Returns true if the process exited within the timeout.
    async fn wait_for_exit(&self, pid: u32, timeout: Duration) -> bool {
        let start = tokio::time::Instant::now();
        loop {
            match self.is_alive(pid).await {
                Ok(false) | Err(_) => return true,
                Ok(true) => {}
            }
            if start.elapsed() >= timeout {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    /// SIGTERM, wait up to [`TERM_GRACE`], then SIGKILL if still alive.
    /// Mirrors `stop_daemon_sync`'s escalation but targets a process group.
    async fn stop(&self, pid: u32) -> Result<(), ProcessError> {
        self.terminate(pid).await?;
        if self.wait_for_exit(pid, TERM_GRACE).await {
            return Ok(());
        }
        self.force_kill(pid).await?;
        self.wait_for_exit(pid, TERM_GRACE).await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
