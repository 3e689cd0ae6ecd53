//! Lifecycle command specs (spec §6 start/stop/pause/restart/dry-run,
//! §3 Ownership, §8 scenario 2 crash recovery's CLI-facing half).

use crate::prelude::*;

#[test]
fn start_on_a_fresh_slot_queues_a_command_without_touching_pid() {
    let dep = Deployment::empty();
    dep.gk().args(&["start", "acme"]).passes().stdout_has("acme: START queued");

    let state = dep.read_slot_file("acme", "state.json");
    let doc: serde_json::Value = serde_json::from_str(&state).unwrap();
    assert_eq!(doc["last_command"], "START");
    assert!(doc["pid"].is_null());
    assert_eq!(doc["status"], "STOPPED");
}

#[test]
fn stop_overwrites_a_prior_start_command() {
    let dep = Deployment::empty();
    dep.gk().args(&["start", "acme"]).passes();
    dep.gk().args(&["stop", "acme"]).passes().stdout_has("acme: STOP queued");

    let state = dep.read_slot_file("acme", "state.json");
    let doc: serde_json::Value = serde_json::from_str(&state).unwrap();
    assert_eq!(doc["last_command"], "STOP");
}

#[test]
fn restart_leaves_a_start_command_queued() {
    let dep = Deployment::empty();
    dep.gk()
        .args(&["restart", "acme"])
        .passes()
        .stdout_has("acme: STOP queued")
        .stdout_has("acme: START queued");

    let state = dep.read_slot_file("acme", "state.json");
    let doc: serde_json::Value = serde_json::from_str(&state).unwrap();
    assert_eq!(doc["last_command"], "START");
}

#[test]
fn dry_run_on_toggles_the_config_flag_leaving_other_fields_untouched() {
    let dep = Deployment::empty();
    dep.write_slot_file(
        "acme",
        "slot_config.yml",
        "search_terms: [pumps]\nquality_level: 3\ndry_run: false\n",
    );

    dep.gk().args(&["dry-run", "acme", "on"]).passes().stdout_has("acme: dry_run = true");

    let config = dep.read_slot_file("acme", "slot_config.yml");
    assert!(config.contains("dry_run: true"));
    assert!(config.contains("quality_level: 3"));
}

#[test]
fn status_on_a_never_started_slot_reports_stopped_with_no_pid() {
    let dep = Deployment::empty();
    dep.write_slot_file("acme", "state.json", &minimal_state_json("acme"));

    dep.gk()
        .args(&["slot", "status", "acme"])
        .passes()
        .stdout_has("status:        STOPPED")
        .stdout_has("pid:           -");
}

#[test]
fn status_on_an_unknown_slot_fails_cleanly() {
    let dep = Deployment::empty();
    dep.gk().args(&["slot", "status", "ghost"]).fails().stderr_has("ghost");
}
