use super::*;

const SAMPLE: &str = r#"
<html><body>
  <div class="lead-card">
    <input type="hidden" class="lead-id" value="LID-1" />
    <span class="title">  Pharma   Exporters   Needed </span>
    <a href="/buy?id=LID-1">Contact Buyer</a>
  </div>
  <div class="lead-card">
    <a href="/buy?id=LID-2">Contact Buyer</a>
    <span class="title">Bulk Chemical Order</span>
  </div>
</body></html>
"#;

#[test]
fn select_first_text_collapses_whitespace() {
    let doc = parse_document(SAMPLE);
    let title = select_first_text(&doc, ".title").unwrap();
    assert_eq!(title, "Pharma Exporters Needed");
}

#[test]
fn select_all_text_returns_every_match_in_order() {
    let doc = parse_document(SAMPLE);
    let titles = select_all_text(&doc, ".title");
    assert_eq!(titles, vec!["Pharma Exporters Needed", "Bulk Chemical Order"]);
}

#[test]
fn select_attr_reads_href() {
    let doc = parse_document(SAMPLE);
    let href = select_attr(&doc, "a[href]", "href").unwrap();
    assert_eq!(href, "/buy?id=LID-1");
}

#[test]
fn invalid_selector_returns_none_not_panic() {
    let doc = parse_document(SAMPLE);
    assert!(select_first_text(&doc, ":::not-a-selector").is_none());
    assert!(select_attr(&doc, ":::not-a-selector", "href").is_none());
}

#[test]
fn cards_returns_all_card_containers() {
    let doc = parse_document(SAMPLE);
    assert_eq!(cards(&doc, ".lead-card").len(), 2);
}

#[test]
fn find_card_by_hidden_input_walks_up_to_container() {
    let doc = parse_document(SAMPLE);
    let card = find_card_by_hidden_input(&doc, "input.lead-id", ".lead-card", "LID-1").unwrap();
    assert!(card.html().contains("Pharma"));
}

#[test]
fn find_card_by_anchor_href_walks_up_to_container() {
    let doc = parse_document(SAMPLE);
    let card = find_card_by_anchor_href(&doc, ".lead-card", "LID-2").unwrap();
    assert!(card.html().contains("Bulk Chemical"));
}

#[test]
fn find_card_by_inner_html_scan_matches_raw_text() {
    let doc = parse_document(SAMPLE);
    let card = find_card_by_inner_html_scan(&doc, ".lead-card", "LID-2").unwrap();
    assert!(card.html().contains("Bulk Chemical"));
}

#[test]
fn unknown_lead_id_finds_no_card_via_any_strategy() {
    let doc = parse_document(SAMPLE);
    assert!(find_card_by_hidden_input(&doc, "input.lead-id", ".lead-card", "LID-999").is_none());
    assert!(find_card_by_anchor_href(&doc, ".lead-card", "LID-999").is_none());
    assert!(find_card_by_inner_html_scan(&doc, ".lead-card", "LID-999").is_none());
}
