use super::*;

fn fp<'a>(title: &'a str, detail_url: &'a str) -> LeadFingerprint<'a> {
    LeadFingerprint {
        title,
        country: "IN",
        age_seconds: Some(120),
        detail_url,
        buyer_details_text: "buyer",
        order_details_text: "order",
    }
}

#[test]
fn lead_key_prefers_portal_id() {
    let (key, synthetic) = lead_key(Some("12345"), &fp("Steel pipes", "https://x/1"));
    assert_eq!(key, "12345");
    assert!(!synthetic);
}

#[test]
fn lead_key_falls_back_to_content_hash() {
    let (key, synthetic) = lead_key(None, &fp("Steel pipes", "https://x/1"));
    assert!(key.starts_with("hash:"));
    assert_eq!(key.len(), "hash:".len() + 16);
    assert!(synthetic);
}

#[test]
fn lead_key_hash_is_deterministic() {
    let (a, _) = lead_key(None, &fp("Steel pipes", "https://x/1"));
    let (b, _) = lead_key(None, &fp("Steel pipes", "https://x/1"));
    assert_eq!(a, b);
}

#[test]
fn lead_key_hash_differs_on_fingerprint_change() {
    let (a, _) = lead_key(None, &fp("Steel pipes", "https://x/1"));
    let (b, _) = lead_key(None, &fp("Steel pipes", "https://x/2"));
    assert_ne!(a, b);
}

#[test]
fn empty_portal_id_is_treated_as_absent() {
    let (key, synthetic) = lead_key(Some(""), &fp("Steel pipes", "https://x/1"));
    assert!(key.starts_with("hash:"));
    assert!(synthetic);
}

fn sample_lead() -> Lead {
    Lead {
        key: "12345".into(),
        lead_id_synthetic: false,
        title: "Steel pipes".into(),
        detail_url: None,
        buy_url: None,
        country: Some("India".into()),
        country_code: Some("IN".into()),
        city: None,
        state: None,
        mobile_available: true,
        mobile_verified: false,
        email_available: false,
        email_verified: false,
        whatsapp_available: false,
        phone: None,
        email: None,
        member_since: None,
        age_seconds: Some(10),
        age_label: None,
        status: LeadStatus::Captured,
        fetched_at: Utc::now(),
        clicked_at: None,
        verified_at: None,
        rejected_reason: None,
        raw_data: Map::new(),
    }
}

#[test]
fn mark_clicked_sets_status_and_timestamp() {
    let mut lead = sample_lead();
    let now = Utc::now();
    lead.mark_clicked(now);
    assert_eq!(lead.status, LeadStatus::Clicked);
    assert_eq!(lead.clicked_at, Some(now));
}

#[test]
fn mark_verified_is_monotonic() {
    let mut lead = sample_lead();
    let t1 = Utc::now();
    lead.mark_verified(t1);
    assert_eq!(lead.verified_at, Some(t1));

    let t2 = t1 + chrono::Duration::seconds(30);
    lead.mark_verified(t2);
    // Already verified: timestamp must not move.
    assert_eq!(lead.verified_at, Some(t1));
}

#[test]
fn lead_serde_roundtrip_preserves_raw_data() {
    let mut lead = sample_lead();
    lead.raw_data.insert("future_field".into(), Value::from(42));
    let json = serde_json::to_string(&lead).unwrap();
    let back: Lead = serde_json::from_str(&json).unwrap();
    assert_eq!(back.raw_data.get("future_field"), Some(&Value::from(42)));
}

#[test]
fn apply_update_advances_status_forward_only() {
    let mut lead = sample_lead();
    let clicked = Lead {
        status: LeadStatus::Clicked,
        clicked_at: Some(Utc::now()),
        ..sample_lead()
    };
    lead.apply_update(&clicked);
    assert_eq!(lead.status, LeadStatus::Clicked);
    assert!(lead.clicked_at.is_some());

    // A stale re-write claiming "captured" must not regress the status.
    let stale = sample_lead();
    lead.apply_update(&stale);
    assert_eq!(lead.status, LeadStatus::Clicked);
}

#[test]
fn apply_update_never_reverts_verified() {
    let mut lead = sample_lead();
    lead.mark_verified(Utc::now());
    let regression = Lead {
        status: LeadStatus::Clicked,
        ..sample_lead()
    };
    lead.apply_update(&regression);
    assert_eq!(lead.status, LeadStatus::Verified);
}

#[test]
fn apply_update_merges_raw_data() {
    let mut lead = sample_lead();
    let mut update = sample_lead();
    update.raw_data.insert("phone".into(), Value::from("555"));
    lead.apply_update(&update);
    assert_eq!(lead.raw_data.get("phone"), Some(&Value::from("555")));
}

#[test]
fn rejected_reason_json_is_snake_case() {
    let json = serde_json::to_string(&RejectedReason::CountryNotAllowed).unwrap();
    assert_eq!(json, "\"country_not_allowed\"");
}
