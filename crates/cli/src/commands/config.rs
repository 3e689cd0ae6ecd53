//! Slot configuration commands (spec §6 `GET/POST /slots/{id}/{config|quality|client-limits|login-mode|headless|display-name}`).

use clap::{Args, Subcommand};
use gk_core::SlotId;
use gk_storage::{config_store, path_for, FsAtomicWriter};

#[derive(Args)]
pub struct GetArgs {
    pub slot_id: String,
}

#[derive(Args)]
pub struct SetFileArgs {
    pub slot_id: String,
    /// Path to a YAML file holding the full config document to install.
    pub file: std::path::PathBuf,
}

#[derive(Args)]
pub struct QualityArgs {
    pub slot_id: String,
    /// If omitted, prints the current level instead of setting it.
    pub level: Option<u8>,
}

#[derive(Args)]
pub struct ClientLimitsArgs {
    pub slot_id: String,
    #[arg(long)]
    pub max_clicks_per_run: Option<u32>,
    #[arg(long)]
    pub max_run_minutes: Option<u32>,
    #[arg(long)]
    pub max_new_per_cycle: Option<u32>,
    #[arg(long)]
    pub max_verified_leads_per_cycle: Option<u32>,
    #[arg(long)]
    pub max_lead_age_seconds: Option<u64>,
}

#[derive(Args)]
pub struct ToggleArgs {
    pub slot_id: String,
    #[arg(value_enum)]
    pub state: Option<super::lifecycle::OnOff>,
}

#[derive(Args)]
pub struct DisplayNameArgs {
    pub slot_id: String,
    pub name: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print a slot's full config document as YAML.
    Get(GetArgs),
    /// Replace a slot's full config document from a YAML file.
    Set(SetFileArgs),
    /// Get or set `quality_level`.
    Quality(QualityArgs),
    /// Get or set per-run/per-cycle client limits.
    ClientLimits(ClientLimitsArgs),
    /// Get or set `login_mode`.
    LoginMode(ToggleArgs),
    /// Get or set `headless`.
    Headless(ToggleArgs),
    /// Get or set `display_name`.
    DisplayName(DisplayNameArgs),
}

pub async fn run(cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Get(args) => get(&args.slot_id).await,
        ConfigCommand::Set(args) => set_file(&args.slot_id, &args.file).await,
        ConfigCommand::Quality(args) => quality(&args.slot_id, args.level).await,
        ConfigCommand::ClientLimits(args) => client_limits(args).await,
        ConfigCommand::LoginMode(args) => {
            toggle(&args.slot_id, args.state, "login_mode", |c| &mut c.login_mode).await
        }
        ConfigCommand::Headless(args) => {
            toggle(&args.slot_id, args.state, "headless", |c| &mut c.headless).await
        }
        ConfigCommand::DisplayName(args) => display_name(&args.slot_id, args.name).await,
    }
}

fn paths_for(slot_id: &str) -> anyhow::Result<gk_storage::SlotPaths> {
    let root = gk_supervisor::env::slots_root()?;
    Ok(path_for(&root, &SlotId::new(slot_id)))
}

async fn get(slot_id: &str) -> anyhow::Result<()> {
    let paths = paths_for(slot_id)?;
    let config = config_store::load_config(&paths)?;
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

async fn set_file(slot_id: &str, file: &std::path::Path) -> anyhow::Result<()> {
    let paths = paths_for(slot_id)?;
    let contents = std::fs::read_to_string(file)?;
    let config: gk_core::SlotConfig = serde_yaml::from_str(&contents)?;
    config_store::write_config(&FsAtomicWriter, &paths, &config)?;
    println!("{slot_id}: config replaced from {}", file.display());
    Ok(())
}

async fn quality(slot_id: &str, level: Option<u8>) -> anyhow::Result<()> {
    let paths = paths_for(slot_id)?;
    let mut config = config_store::load_config(&paths)?;
    match level {
        None => println!("{}", config.quality_level),
        Some(level) => {
            config.quality_level = level;
            config_store::write_config(&FsAtomicWriter, &paths, &config)?;
            println!("{slot_id}: quality_level = {level}");
        }
    }
    Ok(())
}

async fn client_limits(args: ClientLimitsArgs) -> anyhow::Result<()> {
    let paths = paths_for(&args.slot_id)?;
    let mut config = config_store::load_config(&paths)?;
    let any_set = args.max_clicks_per_run.is_some()
        || args.max_run_minutes.is_some()
        || args.max_new_per_cycle.is_some()
        || args.max_verified_leads_per_cycle.is_some()
        || args.max_lead_age_seconds.is_some();

    if !any_set {
        println!("max_clicks_per_run:            {}", config.max_clicks_per_run);
        println!("max_run_minutes:                {}", config.max_run_minutes);
        println!("max_new_per_cycle:              {}", config.max_new_per_cycle);
        println!("max_verified_leads_per_cycle:   {}", config.max_verified_leads_per_cycle);
        println!("max_lead_age_seconds:           {}", config.max_lead_age_seconds);
        return Ok(());
    }

    if let Some(v) = args.max_clicks_per_run {
        config.max_clicks_per_run = v;
    }
    if let Some(v) = args.max_run_minutes {
        config.max_run_minutes = v;
    }
    if let Some(v) = args.max_new_per_cycle {
        config.max_new_per_cycle = v;
    }
    if let Some(v) = args.max_verified_leads_per_cycle {
        config.max_verified_leads_per_cycle = v;
    }
    if let Some(v) = args.max_lead_age_seconds {
        config.max_lead_age_seconds = v;
    }
    config_store::write_config(&FsAtomicWriter, &paths, &config)?;
    println!("{}: client limits updated", args.slot_id);
    Ok(())
}

async fn toggle(
    slot_id: &str,
    state: Option<super::lifecycle::OnOff>,
    field_name: &str,
    field: impl Fn(&mut gk_core::SlotConfig) -> &mut bool,
) -> anyhow::Result<()> {
    let paths = paths_for(slot_id)?;
    let mut config = config_store::load_config(&paths)?;
    match state {
        None => println!("{field_name}: {}", *field(&mut config)),
        Some(state) => {
            let enabled = matches!(state, super::lifecycle::OnOff::On);
            *field(&mut config) = enabled;
            config_store::write_config(&FsAtomicWriter, &paths, &config)?;
            println!("{slot_id}: {field_name} = {enabled}");
        }
    }
    Ok(())
}

async fn display_name(slot_id: &str, name: Option<String>) -> anyhow::Result<()> {
    let paths = paths_for(slot_id)?;
    let mut config = config_store::load_config(&paths)?;
    match name {
        None => println!("{}", config.display_name),
        Some(name) => {
            config.display_name = name.clone();
            config_store::write_config(&FsAtomicWriter, &paths, &config)?;
            println!("{slot_id}: display_name = {name}");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
