//! CLI-specific environment resolution, layered on top of
//! `gk_supervisor::env`'s override-then-fallback pattern for the variables
//! the supervisor and worker don't already own: the auth secret used to
//! mint/verify bearer tokens, and the federation node registry path.

use std::path::PathBuf;

/// `AUTH_SECRET`: the HS256 signing secret for bearer tokens. No default —
/// an operator minting or verifying tokens must supply one explicitly.
pub fn auth_secret() -> Option<String> {
    std::env::var("GK_AUTH_SECRET").ok()
}

/// `TOKEN_TTL_HOURS`, default 24.
pub fn token_ttl_hours() -> i64 {
    std::env::var("GK_TOKEN_TTL_HOURS")
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(24)
}

/// `NODE_ID`: this node's identity in the federation registry, default `local`.
pub fn node_id() -> String {
    std::env::var("GK_NODE_ID").unwrap_or_else(|_| "local".to_string())
}

/// Path to the federation node registry YAML: `GK_NODE_REGISTRY`, defaulting
/// to a sibling of the slots root.
pub fn node_registry_path() -> Result<PathBuf, gk_supervisor::SupervisorError> {
    if let Ok(path) = std::env::var("GK_NODE_REGISTRY") {
        return Ok(PathBuf::from(path));
    }
    Ok(gk_supervisor::env::state_dir()?.join("nodes.yml"))
}
