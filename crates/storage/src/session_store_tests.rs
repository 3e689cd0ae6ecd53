use super::*;
use crate::atomic::FsAtomicWriter;
use tempfile::tempdir;

fn cookie(name: &str, domain: &str) -> Cookie {
    Cookie {
        name: name.into(),
        value: "v".into(),
        domain: Some(domain.into()),
        path: None,
        secure: None,
        http_only: None,
        expires: None,
    }
}

#[test]
fn missing_session_file_yields_empty_list() {
    let dir = tempdir().unwrap();
    let paths = SlotPaths::new(dir.path().join("acme"));
    assert!(load_cookies(&paths).unwrap().is_empty());
}

#[test]
fn write_then_load_cookies_round_trips() {
    let dir = tempdir().unwrap();
    let paths = SlotPaths::new(dir.path().join("acme"));
    let cookies = vec![cookie("sid", "seller.indiamart.com")];
    write_cookies(&FsAtomicWriter, &paths, &cookies).unwrap();
    let loaded = load_cookies(&paths).unwrap();
    assert_eq!(loaded, cookies);
}

#[test]
fn legacy_map_shape_is_accepted() {
    let dir = tempdir().unwrap();
    let paths = SlotPaths::new(dir.path().join("acme"));
    std::fs::create_dir_all(dir.path().join("acme")).unwrap();
    std::fs::write(paths.session_file(), r#"{"sid": "abc123"}"#).unwrap();
    let cookies = load_cookies(&paths).unwrap();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "sid");
    assert_eq!(cookies[0].value, "abc123");
}

#[test]
fn invalid_json_session_blob_is_treated_as_absent() {
    let dir = tempdir().unwrap();
    let paths = SlotPaths::new(dir.path().join("acme"));
    std::fs::create_dir_all(dir.path().join("acme")).unwrap();
    std::fs::write(paths.session_file(), b"not json").unwrap();
    assert!(load_cookies(&paths).unwrap().is_empty());
}

#[test]
fn filter_cookies_for_domain_keeps_matching_entries() {
    let cookies = vec![
        cookie("sid", "seller.indiamart.com"),
        cookie("ga", "google-analytics.com"),
    ];
    let filtered = filter_cookies_for_domain(cookies, "indiamart");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "sid");
}

#[test]
fn filter_cookies_for_domain_falls_back_when_no_match() {
    let cookies = vec![cookie("unrelated", "example.com")];
    let filtered = filter_cookies_for_domain(cookies.clone(), "indiamart");
    assert_eq!(filtered, cookies);
}
