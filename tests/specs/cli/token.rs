//! Bearer token specs (spec §6 Authorization).

use crate::prelude::*;

#[test]
fn mint_fails_cleanly_without_a_configured_secret() {
    let dep = Deployment::empty();
    dep.gk().args(&["token", "mint", "--sub", "alice"]).fails().stderr_has("GK_AUTH_SECRET");
}

#[test]
fn mint_then_verify_round_trips_the_subject_and_role() {
    let dep = Deployment::empty();
    let out = dep
        .gk()
        .env_str("GK_AUTH_SECRET", "top-secret")
        .args(&["token", "mint", "--sub", "alice", "--role", "admin"])
        .passes();
    let token = out.stdout().trim().to_string();
    assert!(!token.is_empty());

    dep.gk()
        .env_str("GK_AUTH_SECRET", "top-secret")
        .args(&["token", "verify", &token])
        .passes()
        .stdout_has("sub: alice")
        .stdout_has("Admin");
}

#[test]
fn verify_rejects_a_token_signed_with_a_different_secret() {
    let dep = Deployment::empty();
    let out = dep
        .gk()
        .env_str("GK_AUTH_SECRET", "secret-one")
        .args(&["token", "mint", "--sub", "alice"])
        .passes();
    let token = out.stdout().trim().to_string();

    dep.gk().env_str("GK_AUTH_SECRET", "secret-two").args(&["token", "verify", &token]).fails();
}
