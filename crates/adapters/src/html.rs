//! HTML query helpers over `scraper`: real CSS selector matching so the
//! richer per-lead fields in spec §3 (country, age, buyer/order detail
//! text) can be extracted reliably.

use scraper::{ElementRef, Html, Selector};

/// Parses `html` into a queryable document. Never fails: malformed markup
/// degrades to however much `scraper`'s lenient parser can recover, which
/// callers treat as "zero matches" rather than an error.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

fn compile_selector(selector: &str) -> Option<Selector> {
    Selector::parse(selector).ok()
}

/// Text content of the first element matching `selector`, words
/// whitespace-collapsed and trimmed.
pub fn select_first_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = compile_selector(selector)?;
    doc.select(&sel).next().map(element_text)
}

/// Text of every element matching `selector`, in document order.
pub fn select_all_text(doc: &Html, selector: &str) -> Vec<String> {
    let Some(sel) = compile_selector(selector) else {
        return Vec::new();
    };
    doc.select(&sel).map(element_text).collect()
}

/// Value of `attr` on the first element matching `selector`.
pub fn select_attr(doc: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = compile_selector(selector)?;
    doc.select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

/// Collapses whitespace/newlines in an element's text nodes into single
/// spaces, matching the `" ".join(text.split())` normalization the Python
/// ancestor performed by hand.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All elements matching `card_selector`, treated as lead card containers.
pub fn cards<'a>(doc: &'a Html, card_selector: &str) -> Vec<ElementRef<'a>> {
    let Some(sel) = compile_selector(card_selector) else {
        return Vec::new();
    };
    doc.select(&sel).collect()
}

/// Walks up from `el` to the nearest ancestor matching `card_selector`,
/// used by click strategies (a) and (b) in spec §4.3 which locate an inner
/// element (hidden input, anchor) and then need the enclosing card.
pub fn closest<'a>(el: ElementRef<'a>, card_selector: &str) -> Option<ElementRef<'a>> {
    let sel = compile_selector(card_selector)?;
    let mut current = Some(el);
    while let Some(node) = current {
        if sel.matches(&node) {
            return Some(node);
        }
        current = node.parent_element();
    }
    None
}

/// Click strategy (a): a hidden input carrying the lead id, walked up to
/// its enclosing card.
pub fn find_card_by_hidden_input<'a>(
    doc: &'a Html,
    input_selector: &str,
    card_selector: &str,
    lead_id: &str,
) -> Option<ElementRef<'a>> {
    let sel = compile_selector(input_selector)?;
    doc.select(&sel)
        .find(|el| el.value().attr("value") == Some(lead_id))
        .and_then(|el| closest(el, card_selector))
}

/// Click strategy (b): an anchor whose href contains the lead id, walked
/// up to its enclosing card.
pub fn find_card_by_anchor_href<'a>(
    doc: &'a Html,
    card_selector: &str,
    lead_id: &str,
) -> Option<ElementRef<'a>> {
    let sel = compile_selector("a[href]")?;
    doc.select(&sel)
        .find(|el| el.value().attr("href").is_some_and(|href| href.contains(lead_id)))
        .and_then(|el| closest(el, card_selector))
}

/// Click strategy (c): scan every card container for one whose inner HTML
/// mentions the lead id at all.
pub fn find_card_by_inner_html_scan<'a>(
    doc: &'a Html,
    card_selector: &str,
    lead_id: &str,
) -> Option<ElementRef<'a>> {
    cards(doc, card_selector)
        .into_iter()
        .find(|card| card.html().contains(lead_id))
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
