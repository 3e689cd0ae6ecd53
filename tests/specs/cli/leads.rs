//! Lead ledger view specs (spec §6 leads/leads-download, §8 scenario 1
//! happy path ledger shape).

use crate::prelude::*;

#[test]
fn list_on_a_slot_with_no_ledger_prints_none() {
    let dep = Deployment::empty();
    dep.gk().args(&["leads", "list", "acme"]).passes().stdout_has("(none)");
}

#[test]
fn list_reports_the_scenario_one_happy_path_ledger() {
    let dep = Deployment::empty();
    let jsonl = [
        lead_line("A", "Industrial Pump", "verified", "2026-01-01T00:00:00Z"),
        lead_line("B", "Cheap Valve", "rejected", "2026-01-01T00:01:00Z"),
        lead_line("C", "Steel Pipe", "clicked", "2026-01-01T00:02:00Z"),
    ]
    .join("\n");
    dep.write_slot_file("acme", "leads.jsonl", &jsonl);

    let out = dep.gk().args(&["leads", "list", "acme"]).passes();
    out.stdout_has("A").stdout_has("B").stdout_has("C").stdout_has("verified").stdout_has("rejected").stdout_has("clicked");
}

#[test]
fn list_filters_by_status() {
    let dep = Deployment::empty();
    let jsonl = [
        lead_line("A", "Industrial Pump", "verified", "2026-01-01T00:00:00Z"),
        lead_line("B", "Cheap Valve", "rejected", "2026-01-01T00:01:00Z"),
    ]
    .join("\n");
    dep.write_slot_file("acme", "leads.jsonl", &jsonl);

    let out = dep.gk().args(&["leads", "list", "acme", "--status", "verified"]).passes();
    out.stdout_has("Industrial Pump").stdout_lacks("Cheap Valve");
}

#[test]
fn list_skips_unparseable_lines_rather_than_failing() {
    let dep = Deployment::empty();
    let jsonl = format!("not json at all\n{}\n", lead_line("A", "Industrial Pump", "verified", "2026-01-01T00:00:00Z"));
    dep.write_slot_file("acme", "leads.jsonl", &jsonl);

    dep.gk().args(&["leads", "list", "acme"]).passes().stdout_has("Industrial Pump");
}

#[test]
fn download_copies_the_raw_ledger_file_verbatim() {
    let dep = Deployment::empty();
    let jsonl = lead_line("A", "Industrial Pump", "verified", "2026-01-01T00:00:00Z");
    dep.write_slot_file("acme", "leads.jsonl", &jsonl);

    let out_path = dep.slots_root().join("downloaded.jsonl");
    dep.gk()
        .args(&["leads", "download", "acme", out_path.to_str().unwrap()])
        .passes()
        .stdout_has("ledger written to");

    let copied = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(copied, jsonl);
}
