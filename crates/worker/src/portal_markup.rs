//! CSS selectors and data-attribute names for the recent-leads and
//! past-transactions pages. The richer fields spec §3 needs (country, age,
//! member tenure, capability flags, and the phone/email a portal
//! occasionally reveals ahead of a click) are exposed here as `data-*`
//! attributes on the card container, queried through `gk_adapters::html`.

pub const CARD_SELECTOR: &str = ".lead-card";
pub const HIDDEN_ID_INPUT_SELECTOR: &str = "input.lead-id";
pub const TITLE_SELECTOR: &str = ".title";
pub const BUYER_CONTACT_CARD_SELECTOR: &str = ".buyer-contact";
pub const PHONE_SELECTOR: &str = ".buyer-phone";
pub const EMAIL_SELECTOR: &str = ".buyer-email";
pub const PURCHASED_TITLE_SELECTOR: &str = ".purchased-title";

pub const ATTR_LEAD_ID: &str = "data-lead-id";
pub const ATTR_COUNTRY: &str = "data-country";
pub const ATTR_COUNTRY_CODE: &str = "data-country-code";
pub const ATTR_AGE_SECONDS: &str = "data-age-seconds";
pub const ATTR_MEMBER_MONTHS: &str = "data-member-months";
pub const ATTR_MOBILE_AVAILABLE: &str = "data-mobile-available";
pub const ATTR_MOBILE_VERIFIED: &str = "data-mobile-verified";
pub const ATTR_EMAIL_AVAILABLE: &str = "data-email-available";
pub const ATTR_EMAIL_VERIFIED: &str = "data-email-verified";
pub const ATTR_WHATSAPP_AVAILABLE: &str = "data-whatsapp-available";
pub const ATTR_PHONE: &str = "data-phone";
pub const ATTR_EMAIL: &str = "data-email";
pub const ATTR_DETAIL_URL: &str = "data-detail-url";
pub const ATTR_BUY_URL: &str = "data-buy-url";
pub const ATTR_LEAD_URL: &str = "data-lead-url";
