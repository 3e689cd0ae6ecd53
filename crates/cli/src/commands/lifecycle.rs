//! Operator lifecycle commands (spec §6 `POST /slots/{id}/{start|stop|restart|pause|dry-run}`).
//!
//! Per §3 Ownership, a CLI invocation only ever writes `command`/`mode` —
//! the actual pid/status transition is the supervisor's job on its next
//! reconciliation tick.

use clap::{Args, Subcommand};
use gk_core::{Command, SlotId};
use gk_storage::{config_store, path_for, read_or_create_state, write_state, FsAtomicWriter};

#[derive(Args)]
pub struct SlotArg {
    pub slot_id: String,
}

#[derive(Args)]
pub struct DryRunArgs {
    pub slot_id: String,
    #[arg(value_enum)]
    pub state: OnOff,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OnOff {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum LifecycleCommand {
    /// Request the slot's worker to start.
    Start(SlotArg),
    /// Request the slot's worker to stop.
    Stop(SlotArg),
    /// Request the slot's worker to pause (stopped, but not reassigned to a new command).
    Pause(SlotArg),
    /// Stop then immediately request a start again.
    Restart(SlotArg),
    /// Toggle dry-run mode (worker runs the pipeline but performs no clicks).
    DryRun(DryRunArgs),
}

pub async fn run(cmd: LifecycleCommand) -> anyhow::Result<()> {
    match cmd {
        LifecycleCommand::Start(args) => issue(&args.slot_id, Command::Start).await,
        LifecycleCommand::Stop(args) => issue(&args.slot_id, Command::Stop).await,
        LifecycleCommand::Pause(args) => issue(&args.slot_id, Command::Pause).await,
        LifecycleCommand::Restart(args) => {
            issue(&args.slot_id, Command::Stop).await?;
            issue(&args.slot_id, Command::Start).await
        }
        LifecycleCommand::DryRun(args) => dry_run(&args.slot_id, matches!(args.state, OnOff::On)).await,
    }
}

fn validated_id(slot_id: &str) -> anyhow::Result<SlotId> {
    if !SlotId::is_valid(slot_id) {
        anyhow::bail!("invalid slot id '{slot_id}': must be non-empty, and must not contain '::' or start with '_'/'.'")
    }
    Ok(SlotId::new(slot_id))
}

pub async fn issue(slot_id: &str, command: Command) -> anyhow::Result<()> {
    let root = gk_supervisor::env::slots_root()?;
    let id = validated_id(slot_id)?;
    let paths = path_for(&root, &id);
    let writer = FsAtomicWriter;
    let mut slot = read_or_create_state(&writer, &paths, id.clone())?;
    slot.last_command = Some(command);
    write_state(&writer, &paths, &slot)?;
    println!("{slot_id}: {command} queued");
    Ok(())
}

pub async fn dry_run(slot_id: &str, enabled: bool) -> anyhow::Result<()> {
    let root = gk_supervisor::env::slots_root()?;
    let id = validated_id(slot_id)?;
    let paths = path_for(&root, &id);
    let writer = FsAtomicWriter;
    let mut config = config_store::load_config(&paths)?;
    config.dry_run = enabled;
    config_store::write_config(&writer, &paths, &config)?;
    println!("{slot_id}: dry_run = {enabled}");
    Ok(())
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
