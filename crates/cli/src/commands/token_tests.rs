use super::*;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn mint_fails_cleanly_without_a_configured_secret() {
    std::env::remove_var("GK_AUTH_SECRET");
    let err = mint(MintArgs { sub: "ops".to_string(), role: RoleArg::Admin, ttl_hours: None })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("GK_AUTH_SECRET"));
}

#[tokio::test]
#[serial]
async fn mint_succeeds_once_a_secret_is_configured() {
    std::env::set_var("GK_AUTH_SECRET", "cli-test-secret");
    mint(MintArgs { sub: "ops".to_string(), role: RoleArg::Admin, ttl_hours: Some(1) })
        .await
        .unwrap();
    std::env::remove_var("GK_AUTH_SECRET");
}

#[tokio::test]
#[serial]
async fn verify_reports_claims_for_a_token_minted_with_the_same_secret() {
    std::env::set_var("GK_AUTH_SECRET", "cli-test-secret");
    let token = gk_federation::mint_token("cli-test-secret", "ops", gk_federation::Role::Admin, 1).unwrap();
    verify(&token).await.unwrap();
    std::env::remove_var("GK_AUTH_SECRET");
}
