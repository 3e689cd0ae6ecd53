//! Federation node registry specs (spec §4.4, §6 node registry; §8 scenario
//! 5 dispatch resolution).

use crate::prelude::*;

#[test]
fn list_reports_empty_when_no_registry_exists() {
    let dep = Deployment::empty();
    dep.gk().args(&["nodes", "list"]).passes().stdout_has("(none)");
}

#[test]
fn list_reads_a_populated_registry() {
    let dep = Deployment::empty();
    dep.write_node_registry(
        "- node_id: node-b\n  node_name: Node B\n  base_url: https://node-b.example\n  shared_token: tok\n",
    );

    dep.gk().args(&["nodes", "list"]).passes().stdout_has("node-b").stdout_has("Node B").stdout_has("https://node-b.example");
}

#[test]
fn resolve_recognises_every_local_alias() {
    let dep = Deployment::empty();
    dep.gk().args(&["nodes", "resolve", "local"]).passes().stdout_has("local: local");
    dep.gk().args(&["nodes", "resolve", "node_local"]).passes().stdout_has("node_local: local");
}

#[test]
fn resolve_reports_a_registered_remote_node_as_remote() {
    let dep = Deployment::empty();
    dep.write_node_registry(
        "- node_id: node-b\n  node_name: Node B\n  base_url: https://node-b.example\n  shared_token: tok\n",
    );

    dep.gk()
        .args(&["nodes", "resolve", "node-b"])
        .passes()
        .stdout_has("node-b: remote at https://node-b.example");
}

#[test]
fn resolve_fails_for_an_id_absent_from_the_registry() {
    let dep = Deployment::empty();
    dep.gk().args(&["nodes", "resolve", "ghost"]).fails().stderr_has("ghost");
}
