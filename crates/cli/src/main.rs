#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `gk` — the GridKeeper operator CLI. Talks to the Durable Slot State
//! Store directly rather than through a daemon IPC socket: commands write
//! `command`/`mode`/config documents for the Slot Supervisor (running as a
//! separate process) to reconcile.

mod commands;
mod env;
mod output;

use clap::{Parser, Subcommand};
use commands::lifecycle::{DryRunArgs, SlotArg};
use commands::{config, leads, lifecycle, nodes, slot, token};
use gk_core::Command as SlotCommandKind;

#[derive(Parser)]
#[command(name = "gk", version, about = "GridKeeper operator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Slot status/metrics (read-only).
    #[command(subcommand)]
    Slot(slot::SlotCommand),
    /// Request the slot's worker to start.
    Start(SlotArg),
    /// Request the slot's worker to stop.
    Stop(SlotArg),
    /// Request the slot's worker to pause.
    Pause(SlotArg),
    /// Stop then immediately request a start again.
    Restart(SlotArg),
    /// Toggle dry-run mode.
    DryRun(DryRunArgs),
    /// Slot configuration.
    #[command(subcommand)]
    Config(config::ConfigCommand),
    /// Lead ledger views.
    #[command(subcommand)]
    Leads(leads::LeadsCommand),
    /// Bearer token issuance and verification.
    #[command(subcommand)]
    Token(token::TokenCommand),
    /// Federation node registry.
    #[command(subcommand)]
    Nodes(nodes::NodesCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Slot(cmd) => slot::run(cmd).await,
        Commands::Start(args) => lifecycle::issue(&args.slot_id, SlotCommandKind::Start).await,
        Commands::Stop(args) => lifecycle::issue(&args.slot_id, SlotCommandKind::Stop).await,
        Commands::Pause(args) => lifecycle::issue(&args.slot_id, SlotCommandKind::Pause).await,
        Commands::Restart(args) => {
            lifecycle::issue(&args.slot_id, SlotCommandKind::Stop).await?;
            lifecycle::issue(&args.slot_id, SlotCommandKind::Start).await
        }
        Commands::DryRun(args) => {
            lifecycle::dry_run(&args.slot_id, matches!(args.state, lifecycle::OnOff::On)).await
        }
        Commands::Config(cmd) => config::run(cmd).await,
        Commands::Leads(cmd) => leads::run(cmd).await,
        Commands::Token(cmd) => token::run(cmd).await,
        Commands::Nodes(cmd) => nodes::run(cmd).await,
    }
}
