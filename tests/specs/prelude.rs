//! Test helpers for behavioral specifications.
//!
//! Provides a high-level DSL for testing `gk` CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Returns the path to a binary, checking llvm-cov target directory first.
/// This works with both standard builds and llvm-cov coverage runs.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

fn gk_binary() -> PathBuf {
    binary_path("gk")
}

/// Returns a Command configured to run the `gk` binary.
pub fn gk_cmd() -> Command {
    Command::new(gk_binary())
}

/// Create a CLI builder for `gk` commands.
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions.
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
            envs: Vec::new(),
        }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((key.to_string(), value.as_ref().to_string_lossy().to_string()));
        self
    }

    pub fn env_str(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn command(self) -> Command {
        let mut cmd = gk_cmd();
        cmd.args(&self.args);
        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions.
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout does not contain '{expected}'\nstdout: {stdout}");
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(unexpected), "stdout should not contain '{unexpected}'\nstdout: {stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr does not contain '{expected}'\nstderr: {stderr}");
        self
    }
}

// =============================================================================
// Deployment
// =============================================================================

/// A temporary single-node GridKeeper deployment: an isolated slots root,
/// state dir, and node registry, independent of whatever is on the host.
pub struct Deployment {
    slots_root: tempfile::TempDir,
    state_dir: tempfile::TempDir,
    node_registry: PathBuf,
}

impl Deployment {
    pub fn empty() -> Self {
        let state_dir = tempfile::tempdir().unwrap();
        let node_registry = state_dir.path().join("nodes.yml");
        Self {
            slots_root: tempfile::tempdir().unwrap(),
            state_dir,
            node_registry,
        }
    }

    pub fn slots_root(&self) -> &Path {
        self.slots_root.path()
    }

    pub fn slot_dir(&self, slot_id: &str) -> PathBuf {
        self.slots_root.path().join(slot_id)
    }

    /// Writes the node registry YAML file, replacing any prior contents.
    pub fn write_node_registry(&self, yaml: &str) {
        std::fs::write(&self.node_registry, yaml).unwrap();
    }

    /// Writes an arbitrary file under a slot's directory (state.json,
    /// slot_config.yml, leads.jsonl), creating the directory as needed.
    pub fn write_slot_file(&self, slot_id: &str, name: &str, contents: &str) {
        let dir = self.slot_dir(slot_id);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(name), contents).unwrap();
    }

    pub fn read_slot_file(&self, slot_id: &str, name: &str) -> String {
        std::fs::read_to_string(self.slot_dir(slot_id).join(name)).unwrap()
    }

    /// Runs a `gk` command against this deployment.
    pub fn gk(&self) -> CliBuilder {
        cli()
            .env("GK_SLOTS_ROOT", self.slots_root())
            .env("GK_STATE_DIR", self.state_dir.path())
            .env("GK_NODE_REGISTRY", &self.node_registry)
    }
}

/// A minimal well-formed `state.json` document for a fresh, never-started
/// slot, matching `Slot::new_default`'s on-disk shape.
pub fn minimal_state_json(slot_id: &str) -> String {
    format!(
        r#"{{
  "id": "{slot_id}",
  "mode": "ACTIVE",
  "worker": "indiamart_worker",
  "auto_resume": false,
  "status": "STOPPED",
  "metrics": {{}}
}}"#
    )
}

/// A JSONL line for a single lead, filling in the required fields and
/// leaving everything else at its serde default.
pub fn lead_line(key: &str, title: &str, status: &str, fetched_at: &str) -> String {
    format!(
        r#"{{"key":"{key}","title":"{title}","status":"{status}","fetched_at":"{fetched_at}"}}"#
    )
}
