//! Fake process adapter for testing supervisor/worker lifecycle logic
//! without spawning real subprocesses.

use super::{ProcessAdapter, ProcessError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum ProcessCall {
    Spawn {
        program: String,
        args: Vec<String>,
        cwd: PathBuf,
    },
    IsAlive {
        pid: u32,
    },
    Terminate {
        pid: u32,
    },
    ForceKill {
        pid: u32,
    },
}

#[derive(Debug, Clone)]
struct FakeProcess {
    alive: bool,
}

struct FakeProcessState {
    processes: HashMap<u32, FakeProcess>,
    calls: Vec<ProcessCall>,
    next_pid: u32,
    spawn_should_fail: bool,
    /// If set, `terminate` does not actually flip the process to dead, so
    /// tests can exercise the SIGKILL escalation path in [`ProcessAdapter::stop`].
    ignores_term: bool,
}

#[derive(Clone)]
pub struct FakeProcessAdapter {
    inner: Arc<Mutex<FakeProcessState>>,
}

impl Default for FakeProcessAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeProcessState {
                processes: HashMap::new(),
                calls: Vec::new(),
                next_pid: 1000,
                spawn_should_fail: false,
                ignores_term: false,
            })),
        }
    }
}

impl FakeProcessAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ProcessCall> {
        self.inner.lock().calls.clone()
    }

    pub fn set_spawn_should_fail(&self, fail: bool) {
        self.inner.lock().spawn_should_fail = fail;
    }

    pub fn set_ignores_term(&self, ignore: bool) {
        self.inner.lock().ignores_term = ignore;
    }

    pub fn kill_externally(&self, pid: u32) {
        if let Some(p) = self.inner.lock().processes.get_mut(&pid) {
            p.alive = false;
        }
    }

    pub fn is_registered(&self, pid: u32) -> bool {
        self.inner.lock().processes.contains_key(&pid)
    }
}

#[async_trait]
impl ProcessAdapter for FakeProcessAdapter {
    async fn spawn(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        _env: &HashMap<String, String>,
        _log_path: &Path,
    ) -> Result<u32, ProcessError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ProcessCall::Spawn {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        });

        if inner.spawn_should_fail {
            return Err(ProcessError::SpawnFailed("injected failure".into()));
        }

        let pid = inner.next_pid;
        inner.next_pid += 1;
        inner.processes.insert(pid, FakeProcess { alive: true });
        Ok(pid)
    }

    async fn is_alive(&self, pid: u32) -> Result<bool, ProcessError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ProcessCall::IsAlive { pid });
        Ok(inner.processes.get(&pid).is_some_and(|p| p.alive))
    }

    async fn terminate(&self, pid: u32) -> Result<(), ProcessError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ProcessCall::Terminate { pid });
        let ignores_term = inner.ignores_term;
        if let Some(p) = inner.processes.get_mut(&pid) {
            if !ignores_term {
                p.alive = false;
            }
        }
        Ok(())
    }

    async fn force_kill(&self, pid: u32) -> Result<(), ProcessError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ProcessCall::ForceKill { pid });
        if let Some(p) = inner.processes.get_mut(&pid) {
            p.alive = false;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
