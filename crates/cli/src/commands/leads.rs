//! Lead ledger views (spec §6 `GET /slots/{id}/{leads|leads/download}`).

use crate::output::OutputFormat;
use clap::{Args, Subcommand};
use gk_core::{Lead, SlotId};

#[derive(Args)]
pub struct ListArgs {
    pub slot_id: String,
    #[arg(short = 'o', long, value_enum, default_value_t)]
    pub output: OutputFormat,
    /// Only show leads with this status.
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct DownloadArgs {
    pub slot_id: String,
    /// Destination path for the raw JSONL ledger file.
    pub out: std::path::PathBuf,
}

#[derive(Subcommand)]
pub enum LeadsCommand {
    /// List a slot's captured/clicked/verified/rejected leads.
    List(ListArgs),
    /// Copy a slot's lead ledger to a local file.
    Download(DownloadArgs),
}

pub async fn run(cmd: LeadsCommand) -> anyhow::Result<()> {
    match cmd {
        LeadsCommand::List(args) => list(args).await,
        LeadsCommand::Download(args) => download(args).await,
    }
}

/// Reads the append-only `leads.jsonl` ledger, tolerating unparseable
/// lines the same way `gk_storage::lead_ledger` does internally.
fn read_leads(slot_id: &str) -> anyhow::Result<Vec<Lead>> {
    let root = gk_supervisor::env::slots_root()?;
    let paths = gk_storage::path_for(&root, &SlotId::new(slot_id));
    let path = paths.leads_file();
    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut leads = Vec::new();
    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(lead) = serde_json::from_str::<Lead>(line) {
            leads.push(lead);
        }
    }
    leads.sort_by(|a, b| b.fetched_at.cmp(&a.fetched_at));
    Ok(leads)
}

async fn list(args: ListArgs) -> anyhow::Result<()> {
    let mut leads = read_leads(&args.slot_id)?;
    if let Some(status) = &args.status {
        leads.retain(|l| l.status.to_string() == *status);
    }

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&leads)?),
        OutputFormat::Text => {
            let rows: Vec<Vec<String>> = leads
                .iter()
                .map(|l| {
                    vec![
                        l.key.clone(),
                        l.title.clone(),
                        l.status.to_string(),
                        l.country.clone().unwrap_or_else(|| "-".to_string()),
                        l.fetched_at.to_rfc3339(),
                    ]
                })
                .collect();
            crate::output::print_table(&["KEY", "TITLE", "STATUS", "COUNTRY", "FETCHED_AT"], &rows);
        }
    }
    Ok(())
}

async fn download(args: DownloadArgs) -> anyhow::Result<()> {
    let root = gk_supervisor::env::slots_root()?;
    let paths = gk_storage::path_for(&root, &SlotId::new(&args.slot_id));
    std::fs::copy(paths.leads_file(), &args.out)?;
    println!("{}: ledger written to {}", args.slot_id, args.out.display());
    Ok(())
}

#[cfg(test)]
#[path = "leads_tests.rs"]
mod tests;
