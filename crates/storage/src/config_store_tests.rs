use super::*;
use crate::atomic::FsAtomicWriter;
use tempfile::tempdir;

#[test]
fn missing_config_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let paths = SlotPaths::new(dir.path().join("acme"));
    let cfg = load_config(&paths).unwrap();
    assert_eq!(cfg, SlotConfig::default());
}

#[test]
fn empty_config_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let paths = SlotPaths::new(dir.path().join("acme"));
    std::fs::create_dir_all(dir.path().join("acme")).unwrap();
    std::fs::write(paths.config_file(), b"   \n").unwrap();
    let cfg = load_config(&paths).unwrap();
    assert_eq!(cfg, SlotConfig::default());
}

#[test]
fn write_then_load_config_round_trips() {
    let dir = tempdir().unwrap();
    let paths = SlotPaths::new(dir.path().join("acme"));
    let mut cfg = SlotConfig::default();
    cfg.search_terms = vec!["pipes".into()];
    cfg.max_clicks_per_run = 5;
    write_config(&FsAtomicWriter, &paths, &cfg).unwrap();

    let loaded = load_config(&paths).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn mtime_watch_fires_on_first_observation_then_only_on_advance() {
    let mut watch = MtimeWatch::new();
    let t0 = SystemTime::now();
    assert!(watch.check(Some(t0)));
    assert!(!watch.check(Some(t0)));

    let t1 = t0 + std::time::Duration::from_secs(1);
    assert!(watch.check(Some(t1)));
}

#[test]
fn mtime_watch_ignores_absent_file() {
    let mut watch = MtimeWatch::new();
    assert!(!watch.check(None));
}
