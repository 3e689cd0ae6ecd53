//! Bearer token issuance for operators and clients (spec §6 "Authorization").

use clap::{Args, Subcommand};
use gk_federation::Role;

#[derive(Args)]
pub struct MintArgs {
    /// Token subject, typically an operator or client account id.
    #[arg(long)]
    pub sub: String,
    #[arg(long, value_enum, default_value_t = RoleArg::Client)]
    pub role: RoleArg,
    /// Overrides `GK_TOKEN_TTL_HOURS`.
    #[arg(long)]
    pub ttl_hours: Option<i64>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum RoleArg {
    Admin,
    Client,
}

impl From<RoleArg> for Role {
    fn from(r: RoleArg) -> Self {
        match r {
            RoleArg::Admin => Role::Admin,
            RoleArg::Client => Role::Client,
        }
    }
}

#[derive(Args)]
pub struct VerifyArgs {
    pub token: String,
}

#[derive(Subcommand)]
pub enum TokenCommand {
    /// Mint a new bearer token signed with `GK_AUTH_SECRET`.
    Mint(MintArgs),
    /// Verify a bearer token's signature and expiry, printing its claims.
    Verify(VerifyArgs),
}

pub async fn run(cmd: TokenCommand) -> anyhow::Result<()> {
    match cmd {
        TokenCommand::Mint(args) => mint(args).await,
        TokenCommand::Verify(args) => verify(&args.token).await,
    }
}

fn require_secret() -> anyhow::Result<String> {
    crate::env::auth_secret().ok_or_else(|| anyhow::anyhow!("GK_AUTH_SECRET is not set"))
}

async fn mint(args: MintArgs) -> anyhow::Result<()> {
    let secret = require_secret()?;
    let ttl = args.ttl_hours.unwrap_or_else(crate::env::token_ttl_hours);
    let token = gk_federation::mint_token(&secret, &args.sub, args.role.into(), ttl)?;
    println!("{token}");
    Ok(())
}

async fn verify(token: &str) -> anyhow::Result<()> {
    let secret = require_secret()?;
    let claims = gk_federation::verify_token(&secret, token)?;
    println!("sub: {}", claims.sub);
    println!("role: {:?}", claims.role);
    println!("exp: {}", claims.exp);
    Ok(())
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
