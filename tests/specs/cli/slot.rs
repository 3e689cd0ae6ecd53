//! Slot listing/status/metrics specs (spec §6 GET /slots, /status, /metrics).

use crate::prelude::*;

#[test]
fn list_skips_hidden_slots_and_shows_visible_ones() {
    let dep = Deployment::empty();
    dep.write_slot_file("acme", "state.json", &minimal_state_json("acme"));
    dep.write_slot_file("_scratch", "state.json", &minimal_state_json("_scratch"));

    let out = dep.gk().args(&["slot", "list"]).passes();
    out.stdout_has("acme").stdout_lacks("_scratch");
}

#[test]
fn list_with_json_output_emits_parseable_array() {
    let dep = Deployment::empty();
    dep.write_slot_file("acme", "state.json", &minimal_state_json("acme"));

    let out = dep.gk().args(&["slot", "list", "-o", "json"]).passes();
    let parsed: serde_json::Value = serde_json::from_str(&out.stdout()).unwrap();
    assert_eq!(parsed[0]["id"], "acme");
    assert_eq!(parsed[0]["status"], "STOPPED");
}

#[test]
fn metrics_reports_scenario_one_happy_path_counters() {
    let dep = Deployment::empty();
    let state = format!(
        r#"{{
  "id": "acme",
  "mode": "ACTIVE",
  "worker": "indiamart_worker",
  "auto_resume": false,
  "status": "RUNNING",
  "metrics": {{
    "leads_parsed": 2,
    "clicked_total": 2,
    "verified_total": 1,
    "rejected_total": 1
  }}
}}"#
    );
    dep.write_slot_file("acme", "state.json", &state);

    dep.gk()
        .args(&["slot", "metrics", "acme"])
        .passes()
        .stdout_has("leads_parsed:    2")
        .stdout_has("clicked_total:   2")
        .stdout_has("verified_total:  1")
        .stdout_has("rejected_total:  1");
}

#[test]
fn metrics_on_an_unknown_slot_fails_cleanly() {
    let dep = Deployment::empty();
    dep.gk().args(&["slot", "metrics", "ghost"]).fails();
}
