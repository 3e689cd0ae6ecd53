//! Read-only slot views (spec §6 `GET /slots`, `GET /slots/{id}/{status|metrics}`).

use crate::output::{format_time_ago, print_table, OutputFormat};
use clap::{Args, Subcommand};
use gk_core::SlotId;
use gk_storage::{path_for, read_state};

#[derive(Args)]
pub struct ListArgs {
    #[arg(short = 'o', long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Args)]
pub struct ShowArgs {
    pub slot_id: String,
    #[arg(short = 'o', long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Subcommand)]
pub enum SlotCommand {
    /// List every visible slot on this node (hidden ids starting with `_` are skipped).
    List(ListArgs),
    /// Show a slot's declared intent and observed status.
    Status(ShowArgs),
    /// Show a slot's worker-reported metrics.
    Metrics(ShowArgs),
}

pub async fn run(cmd: SlotCommand) -> anyhow::Result<()> {
    match cmd {
        SlotCommand::List(args) => list(args).await,
        SlotCommand::Status(args) => status(args).await,
        SlotCommand::Metrics(args) => metrics(args).await,
    }
}

async fn list(args: ListArgs) -> anyhow::Result<()> {
    let root = gk_supervisor::env::slots_root()?;
    let dirs = gk_storage::list_slot_dirs(&root)?;
    let mut rows = Vec::new();
    for dir in dirs {
        let Some(id) = dir.file_name().and_then(|n| n.to_str()) else { continue };
        if SlotId::is_hidden(id) {
            continue;
        }
        let paths = path_for(&root, &SlotId::new(id));
        let Some(slot) = read_state(&paths)? else { continue };
        rows.push((id.to_string(), slot));
    }

    match args.output {
        OutputFormat::Json => {
            let json: Vec<_> = rows.iter().map(|(id, s)| serde_json::json!({
                "id": id, "status": s.status.to_string(), "mode": s.mode.to_string(), "pid": s.pid,
            })).collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            let table_rows: Vec<Vec<String>> = rows
                .iter()
                .map(|(id, s)| {
                    vec![
                        id.clone(),
                        s.status.to_string(),
                        s.mode.to_string(),
                        s.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
                        format_time_ago(s.last_heartbeat),
                    ]
                })
                .collect();
            print_table(&["ID", "STATUS", "MODE", "PID", "LAST_HEARTBEAT"], &table_rows);
        }
    }
    Ok(())
}

async fn status(args: ShowArgs) -> anyhow::Result<()> {
    let root = gk_supervisor::env::slots_root()?;
    let slot_id = SlotId::new(&args.slot_id);
    let paths = path_for(&root, &slot_id);
    let slot = read_state(&paths)?
        .ok_or_else(|| anyhow::anyhow!("slot '{}' has no state document yet", args.slot_id))?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                "id": args.slot_id,
                "status": slot.status.to_string(),
                "mode": slot.mode.to_string(),
                "pid": slot.pid,
                "started_at": slot.started_at,
                "last_heartbeat": slot.last_heartbeat,
                "last_command": slot.last_command.map(|c| c.to_string()),
                "stop_reason": slot.stop_reason.map(|r| r.to_string()),
                "stop_detail": slot.stop_detail,
            }))?);
        }
        OutputFormat::Text => {
            println!("id:            {}", args.slot_id);
            println!("status:        {}", slot.status);
            println!("mode:          {}", slot.mode);
            println!("pid:           {}", slot.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()));
            println!("started_at:    {}", slot.started_at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "-".to_string()));
            println!("last_heartbeat:{}", format_time_ago(slot.last_heartbeat));
            if let Some(reason) = slot.stop_reason {
                println!("stop_reason:   {reason}");
            }
        }
    }
    Ok(())
}

async fn metrics(args: ShowArgs) -> anyhow::Result<()> {
    let root = gk_supervisor::env::slots_root()?;
    let slot_id = SlotId::new(&args.slot_id);
    let paths = path_for(&root, &slot_id);
    let slot = read_state(&paths)?
        .ok_or_else(|| anyhow::anyhow!("slot '{}' has no state document yet", args.slot_id))?;
    let m = &slot.metrics;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(m)?),
        OutputFormat::Text => {
            println!("phase:           {} ({}s)", m.phase, m.phase_duration_sec);
            println!("pages_fetched:   {}", m.pages_fetched);
            println!("leads_parsed:    {}", m.leads_parsed);
            println!("clicked_total:   {}", m.clicked_total);
            println!("verified_total:  {}", m.verified_total);
            println!("rejected_total:  {}", m.rejected_total);
            println!("errors:          {}", m.errors);
            println!("throughput:      {:.2}/min", m.throughput);
            println!("error_rate:      {:.3}", m.error_rate);
            if let Some(err) = &m.last_error {
                println!("last_error:      {err}");
            }
        }
    }
    Ok(())
}
