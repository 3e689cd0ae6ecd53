use super::*;

#[tokio::test]
async fn render_page_returns_scripted_html() {
    let adapter = FakeBrowserAdapter::new();
    adapter.set_page(
        "acme",
        "https://portal.example/recent",
        ScriptedPage {
            html: "<html>recent</html>".into(),
            clickable_selectors: vec![],
        },
    );

    let html = adapter
        .render_page("acme", "https://portal.example/recent")
        .await
        .unwrap();
    assert_eq!(html, "<html>recent</html>");
}

#[tokio::test]
async fn render_page_errors_on_unscripted_url() {
    let adapter = FakeBrowserAdapter::new();
    let result = adapter.render_page("acme", "https://unknown").await;
    assert!(matches!(result, Err(BrowserError::NavigationFailed(_))));
}

#[tokio::test]
async fn click_by_selector_respects_scripted_clickability() {
    let adapter = FakeBrowserAdapter::new();
    adapter.set_page(
        "acme",
        "https://portal.example/recent",
        ScriptedPage {
            html: "<html></html>".into(),
            clickable_selectors: vec!["#buy-42".to_string()],
        },
    );

    assert!(adapter.click_by_selector("acme", "#buy-42").await.is_ok());
    assert!(matches!(
        adapter.click_by_selector("acme", "#buy-99").await,
        Err(BrowserError::SelectorNotFound(_))
    ));
}

#[tokio::test]
async fn export_cookies_returns_preloaded_jar() {
    let adapter = FakeBrowserAdapter::new();
    adapter.set_cookies(
        "acme",
        vec![ExportedCookie {
            name: "session".into(),
            value: "abc123".into(),
            domain: Some("portal.example".into()),
        }],
    );

    let cookies = adapter.export_cookies("acme").await.unwrap();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "session");
}

#[tokio::test]
async fn new_screencast_ids_are_distinct() {
    let adapter = FakeBrowserAdapter::new();
    let a = adapter.new_screencast("acme").await.unwrap();
    let b = adapter.new_screencast("acme").await.unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn calls_are_recorded_in_order() {
    let adapter = FakeBrowserAdapter::new();
    adapter.set_page(
        "acme",
        "https://portal.example/recent",
        ScriptedPage::default(),
    );
    let _ = adapter.render_page("acme", "https://portal.example/recent").await;
    let _ = adapter.export_cookies("acme").await;

    let calls = adapter.calls();
    assert!(matches!(calls[0], BrowserCall::RenderPage { .. }));
    assert!(matches!(calls[1], BrowserCall::ExportCookies { .. }));
}
