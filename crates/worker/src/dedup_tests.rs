use super::*;

#[test]
fn first_insert_of_a_key_returns_true() {
    let mut window = RecentWindow::new(10);
    assert!(window.insert("a"));
}

#[test]
fn repeated_insert_returns_false_and_does_not_grow() {
    let mut window = RecentWindow::new(10);
    window.insert("a");
    assert!(!window.insert("a"));
    assert_eq!(window.len(), 1);
}

#[test]
fn capacity_evicts_oldest_first() {
    let mut window = RecentWindow::new(2);
    window.insert("a");
    window.insert("b");
    window.insert("c");
    assert_eq!(window.len(), 2);
    assert!(!window.contains("a"));
    assert!(window.contains("b"));
    assert!(window.contains("c"));
}

#[test]
fn seed_preserves_recent_first_ordering_for_eviction() {
    // existing_lead_keys returns most-recent-first; seeding should evict
    // the least-recent of those first once new keys push it out.
    let existing = vec!["newest".to_string(), "middle".to_string(), "oldest".to_string()];
    let mut window = RecentWindow::seed(&existing, 3);
    assert!(window.contains("oldest"));
    window.insert("brand-new");
    assert!(!window.contains("oldest"));
    assert!(window.contains("newest"));
    assert!(window.contains("brand-new"));
}
