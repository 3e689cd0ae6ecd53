//! Config command specs (spec §6 config/quality/client-limits/login-mode/
//! headless/display-name; §8 boundary behavior for `max_lead_age_seconds`).

use crate::prelude::*;

#[test]
fn get_on_a_never_configured_slot_prints_defaults() {
    let dep = Deployment::empty();
    dep.gk().args(&["config", "get", "acme"]).passes().stdout_has("quality_level: 0").stdout_has("dry_run: false");
}

#[test]
fn quality_get_then_set_round_trips() {
    let dep = Deployment::empty();
    dep.gk().args(&["config", "quality", "acme"]).passes().stdout_has("0");
    dep.gk().args(&["config", "quality", "acme", "4"]).passes().stdout_has("acme: quality_level = 4");
    dep.gk().args(&["config", "quality", "acme"]).passes().stdout_has("4");
}

#[test]
fn client_limits_set_updates_only_the_named_fields() {
    let dep = Deployment::empty();
    dep.write_slot_file(
        "acme",
        "slot_config.yml",
        "max_clicks_per_run: 5\nmax_run_minutes: 30\n",
    );

    dep.gk()
        .args(&["config", "client-limits", "acme", "--max-clicks-per-run", "10"])
        .passes()
        .stdout_has("client limits updated");

    let config = dep.read_slot_file("acme", "slot_config.yml");
    assert!(config.contains("max_clicks_per_run: 10"));
    assert!(config.contains("max_run_minutes: 30"));
}

#[test]
fn login_mode_toggles_on_and_off() {
    let dep = Deployment::empty();
    dep.gk().args(&["config", "login-mode", "acme", "on"]).passes().stdout_has("acme: login_mode = true");
    dep.gk().args(&["config", "login-mode", "acme"]).passes().stdout_has("true");
    dep.gk().args(&["config", "login-mode", "acme", "off"]).passes().stdout_has("acme: login_mode = false");
}

#[test]
fn headless_defaults_to_true_for_a_fresh_slot() {
    let dep = Deployment::empty();
    dep.gk().args(&["config", "headless", "acme"]).passes().stdout_has("headless: true");
}

#[test]
fn display_name_set_then_get_round_trips() {
    let dep = Deployment::empty();
    dep.gk().args(&["config", "display-name", "acme", "Acme Corp"]).passes().stdout_has("display_name = Acme Corp");
    dep.gk().args(&["config", "display-name", "acme"]).passes().stdout_has("Acme Corp");
}

#[test]
fn set_replaces_the_full_config_document_from_a_file() {
    let dep = Deployment::empty();
    let file = dep.slots_root().join("new_config.yml");
    std::fs::write(&file, "quality_level: 7\nsearch_terms: [valves, pumps]\n").unwrap();

    dep.gk()
        .args(&["config", "set", "acme", file.to_str().unwrap()])
        .passes()
        .stdout_has("config replaced");

    let config = dep.read_slot_file("acme", "slot_config.yml");
    assert!(config.contains("quality_level: 7"));
}
