// Hand-crafted async HTTP client for the Meraki REST API (v1).
//
// Base path: /api/v1/
// Auth: X-Cisco-Meraki-API-Key header

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::rest::types::{ClientRecord, Network, Organization, Ssid};
use crate::transport::TransportConfig;

/// Default base URL for the REST API.
pub const REST_BASE_URL: &str = "https://dashboard.meraki.com/api";

/// Async client for the documented Meraki REST API.
///
/// Uses API-key authentication via a sensitive default header. Every
/// endpoint is a read; idempotent GETs get exactly one retry when the
/// failure is transient (timeout, connection reset) — a non-success
/// status is a hard failure and is never retried.
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RestClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `X-Cisco-Meraki-API-Key` as a default header on every
    /// request. The header value is marked sensitive so it never shows
    /// up in debug output.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            })?;
        key_value.set_sensitive(true);
        headers.insert("X-Cisco-Meraki-API-Key", key_value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Normalize the base URL to end in a single trailing slash so
    /// joining `v1/…` paths works uniformly.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── Request plumbing ─────────────────────────────────────────────

    /// Join a relative path (e.g. `"v1/organizations"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .expect("path should be a valid relative URL")
    }

    /// Send a GET with one bounded retry on transient transport errors.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = match self.send(url.clone(), params).await {
            Ok(resp) => resp,
            Err(e) if e.is_transient() => {
                debug!("transient failure ({e}), retrying once");
                self.send(url, params).await?
            }
            Err(e) => return Err(e),
        };

        self.handle_response(resp).await
    }

    async fn send(&self, url: Url, params: &[(&str, String)]) -> Result<reqwest::Response, Error> {
        self.http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(Error::Transport)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::InvalidApiKey);
        }
        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            return Err(Error::RestApi {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// List organizations the key can access.
    ///
    /// `GET /api/v1/organizations`
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, Error> {
        self.get("v1/organizations", &[]).await
    }

    /// List networks in an organization.
    ///
    /// `GET /api/v1/organizations/{org}/networks`
    pub async fn list_networks(&self, org_id: &str) -> Result<Vec<Network>, Error> {
        self.get(&format!("v1/organizations/{org_id}/networks"), &[])
            .await
    }

    /// List wireless SSIDs configured on a network.
    ///
    /// `GET /api/v1/networks/{net}/wireless/ssids`
    pub async fn list_ssids(&self, network_id: &str) -> Result<Vec<Ssid>, Error> {
        self.get(&format!("v1/networks/{network_id}/wireless/ssids"), &[])
            .await
    }

    /// List clients on a network (single page).
    ///
    /// `GET /api/v1/networks/{net}/clients?perPage={n}` — one page only;
    /// networks with more than `per_page` clients are truncated.
    pub async fn list_clients(
        &self,
        network_id: &str,
        per_page: u32,
    ) -> Result<Vec<ClientRecord>, Error> {
        self.get(
            &format!("v1/networks/{network_id}/clients"),
            &[("perPage", per_page.to_string())],
        )
        .await
    }
}
