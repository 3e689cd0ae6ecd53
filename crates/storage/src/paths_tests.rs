use super::*;
use tempfile::tempdir;

#[test]
fn slot_paths_file_names_match_layout() {
    let paths = SlotPaths::new("/tmp/slots/acme");
    assert_eq!(paths.state_file(), Path::new("/tmp/slots/acme/state.json"));
    assert_eq!(paths.config_file(), Path::new("/tmp/slots/acme/slot_config.yml"));
    assert_eq!(paths.session_file(), Path::new("/tmp/slots/acme/session.enc"));
    assert_eq!(paths.leads_file(), Path::new("/tmp/slots/acme/leads.jsonl"));
    assert_eq!(paths.worker_log_rotated(), Path::new("/tmp/slots/acme/worker.log.old"));
}

#[test]
fn slot_id_is_final_path_component() {
    let paths = SlotPaths::new("/tmp/slots/acme-seller-1");
    assert_eq!(paths.slot_id(), Some("acme-seller-1"));
}

#[test]
fn list_slot_dirs_skips_hidden_and_underscore_prefixed() {
    let root = tempdir().unwrap();
    for name in ["acme", "_archived", ".swap", "globex"] {
        std::fs::create_dir(root.path().join(name)).unwrap();
    }
    std::fs::write(root.path().join("not_a_dir.txt"), b"x").unwrap();

    let dirs = list_slot_dirs(root.path()).unwrap();
    let names: Vec<_> = dirs
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["acme", "globex"]);
}

#[test]
fn list_slot_dirs_on_missing_root_returns_empty() {
    let dirs = list_slot_dirs(Path::new("/nonexistent/does/not/exist")).unwrap();
    assert!(dirs.is_empty());
}
