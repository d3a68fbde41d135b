// REST API response types.
//
// Fields use `#[serde(default)]` liberally because the API omits fields
// depending on product type and license; everything unmodeled lands in
// the `extra` catch-all.

use serde::{Deserialize, Serialize};

/// Organization from `GET /api/v1/organizations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Network from `GET /api/v1/organizations/{org}/networks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub product_types: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Wireless SSID from `GET /api/v1/networks/{net}/wireless/ssids`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ssid {
    pub number: i32,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Connected client from `GET /api/v1/networks/{net}/clients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: String,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    /// SSID the client is associated to; `None` for wired clients.
    #[serde(default)]
    pub ssid: Option<String>,
    /// Name of the access point the client was last seen on.
    #[serde(default)]
    pub recent_device_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
