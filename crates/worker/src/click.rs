//! Resolves a clicked lead's card into a selector `BrowserAdapter` can act
//! on, given the three locate-the-card strategies from spec §4.3 already
//! implemented over static HTML by `gk_adapters::html`.

use crate::portal_markup as pm;
use gk_adapters::html;
use scraper::{ElementRef, Html};

/// Strategy (a)/(b)/(c) in order: hidden input carrying the id, an anchor
/// whose href contains it, then a full inner-HTML scan.
pub fn locate_card_by_lead_id<'a>(doc: &'a Html, lead_id: &str) -> Option<ElementRef<'a>> {
    html::find_card_by_hidden_input(doc, pm::HIDDEN_ID_INPUT_SELECTOR, pm::CARD_SELECTOR, lead_id)
        .or_else(|| html::find_card_by_anchor_href(doc, pm::CARD_SELECTOR, lead_id))
        .or_else(|| html::find_card_by_inner_html_scan(doc, pm::CARD_SELECTOR, lead_id))
}

/// Position of `card` among every `.lead-card` in document order, needed to
/// build a positional selector since the located card may carry no
/// attribute stable enough to address it directly.
pub fn card_ordinal(doc: &Html, card: ElementRef<'_>) -> Option<usize> {
    html::cards(doc, pm::CARD_SELECTOR)
        .into_iter()
        .position(|c| c.id() == card.id())
}

/// A CSS selector addressing the `ordinal`-th card on the page (0-indexed).
pub fn click_selector_for_ordinal(ordinal: usize) -> String {
    format!("{}:nth-of-type({})", pm::CARD_SELECTOR, ordinal + 1)
}

#[cfg(test)]
#[path = "click_tests.rs"]
mod tests;
