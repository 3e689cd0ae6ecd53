//! Federation node registry listing (spec §6 "Node registry (YAML)").

use crate::output::print_table;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct ResolveArgs {
    /// Node id, or one of `local`/`node_local`.
    pub node_id: String,
}

#[derive(Subcommand)]
pub enum NodesCommand {
    /// List every node in this deployment's federation registry.
    List(ListArgs),
    /// Show whether a node id resolves to this node or a remote one (spec §4.4 dispatch).
    Resolve(ResolveArgs),
}

pub async fn run(cmd: NodesCommand) -> anyhow::Result<()> {
    match cmd {
        NodesCommand::List(_) => list().await,
        NodesCommand::Resolve(args) => resolve(&args.node_id).await,
    }
}

async fn resolve(node_id: &str) -> anyhow::Result<()> {
    let path = crate::env::node_registry_path()?;
    let nodes = gk_storage::load_node_registry(&path)?;
    let secret = crate::env::auth_secret().unwrap_or_default();
    let dispatcher = gk_federation::Dispatcher::new(crate::env::node_id(), nodes, secret);
    match dispatcher.resolve(node_id)? {
        gk_federation::DispatchTarget::Local => println!("{node_id}: local"),
        gk_federation::DispatchTarget::Remote(node) => {
            println!("{node_id}: remote at {}", node.base_url);
        }
    }
    Ok(())
}

async fn list() -> anyhow::Result<()> {
    let path = crate::env::node_registry_path()?;
    let nodes = gk_storage::load_node_registry(&path)?;
    let rows: Vec<Vec<String>> = nodes
        .iter()
        .map(|n| {
            vec![
                n.node_id.to_string(),
                n.node_name.clone(),
                if n.is_local() { "local".to_string() } else { n.base_url.clone() },
            ]
        })
        .collect();
    print_table(&["NODE_ID", "NAME", "BASE_URL"], &rows);
    Ok(())
}

#[cfg(test)]
#[path = "nodes_tests.rs"]
mod tests;
