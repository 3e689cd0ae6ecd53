//! Bearer-token authorization (spec §6 "Authorization"): HS256 JWTs with
//! `{sub, role, exp}` claims, admin bypass, client-scoped-to-slot checks.

use crate::error::FederationError;
use gk_core::SlotId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: i64,
}

/// Mints a token valid for `ttl_hours` from now, signed with `secret`
/// (`AUTH_SECRET`).
pub fn mint_token(secret: &str, sub: &str, role: Role, ttl_hours: i64) -> Result<String, FederationError> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64;
    let claims = Claims {
        sub: sub.to_string(),
        role,
        exp: now + ttl_hours * 3600,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(FederationError::InvalidToken)
}

/// Verifies `token`'s signature and expiry, returning its claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, FederationError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(FederationError::InvalidToken)
}

/// `admin` bypasses per-slot checks; `client` is restricted to `assigned`.
pub fn authorize_slot(claims: &Claims, slot_id: &SlotId, assigned: &[SlotId]) -> bool {
    match claims.role {
        Role::Admin => true,
        Role::Client => assigned.iter().any(|s| s == slot_id),
    }
}

/// Resolves the token to use for a federation hop to `node_token`: the
/// node's configured shared token, or a freshly minted local admin token
/// if the node has none configured (spec §6).
pub fn outbound_token(node_token: &str, local_secret: &str) -> Result<String, FederationError> {
    if !node_token.is_empty() {
        return Ok(node_token.to_string());
    }
    mint_token(local_secret, "federation-dispatch", Role::Admin, 1)
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
