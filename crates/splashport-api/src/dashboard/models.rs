// Response types for the scraped dashboard surface.
//
// The splash-info payload is an undocumented XHR response, so fields use
// `#[serde(default)]` liberally and a catch-all map absorbs everything we
// don't model.

use serde::{Deserialize, Serialize};

/// One organization link from the scraped org-picker page.
///
/// `label` is the anchor text; `href` is the URL fragment that triggers
/// the platform's redirect to the per-org dashboard host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgLink {
    pub label: String,
    pub href: String,
}

/// Per-client splash record from `usage/client_show/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplashClientShow {
    #[serde(default)]
    pub description: Option<String>,
    /// Last-seen time as epoch seconds.
    #[serde(default)]
    pub last_seen: Option<i64>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub ssid_name: Option<String>,
    /// Sponsored-guest authorization entries; the first entry carries the
    /// sponsor email, authorization state, and expiry shown in exports.
    #[serde(default)]
    pub wireless_bigacl: Vec<BigAclEntry>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One sponsored-guest ACL entry nested inside `SplashClientShow`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BigAclEntry {
    #[serde(default)]
    pub sponsor_email: Option<String>,
    #[serde(default)]
    pub authorized: Option<String>,
    #[serde(default)]
    pub expires: Option<String>,
}
