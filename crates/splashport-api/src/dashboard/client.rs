// Dashboard web-session HTTP client.
//
// Wraps a cookie-jar `reqwest::Client` for the scraped (non-API) Meraki
// surface: form login, org-picker anchor list, per-org redirect chain,
// and the splash-info XHR endpoint.

use scraper::{Html, Selector};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use url::Url;

use crate::dashboard::models::{OrgLink, SplashClientShow};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Default entry point for the account/login surface.
pub const ACCOUNT_BASE_URL: &str = "https://account.meraki.com";

/// Error marker the platform embeds in the login response body on
/// rejected credentials.
const LOGIN_ERROR_MARKER: &str = "Please contact your network administrator for assistance";

/// Fixed trailing path segment (`/dashboard`) on the final redirect
/// target; trimming it yields the per-org dashboard base URL.
const DASHBOARD_SUFFIX_LEN: usize = "/dashboard".len();

/// Session-authenticated client for the scraped dashboard surface.
///
/// One instance per operator session. Logging in stores the session
/// cookie in the client's jar; every later call rides on it.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DashboardClient {
    /// Create a new dashboard client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (the scraped surface requires session cookies).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a dashboard client with a pre-built `reqwest::Client`.
    ///
    /// The caller is responsible for the client carrying a cookie store.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The account entry-point base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Login ────────────────────────────────────────────────────────

    /// Authenticate with the dashboard using username/password and
    /// capture the organization-picker links.
    ///
    /// `POST /login/login` (form-encoded), then `GET /login/org_list`.
    /// Fails if the login response carries the platform's error marker or
    /// the org-list fetch does not return success. Never retried: the
    /// login POST is not idempotent.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Vec<OrgLink>, Error> {
        let url = self.base_url.join("/login/login")?;
        debug!("logging in at {}", url);

        let resp = self
            .http
            .post(url)
            .form(&[("email", username), ("password", password.expose_secret())])
            .send()
            .await
            .map_err(Error::Transport)?;

        let body = resp.text().await.map_err(Error::Transport)?;
        if body.contains(LOGIN_ERROR_MARKER) {
            return Err(Error::Authentication {
                message: "credentials rejected by the dashboard".into(),
            });
        }

        let org_list_url = self.base_url.join("/login/org_list")?;
        debug!("fetching org list at {}", org_list_url);

        let resp = self
            .http
            .get(org_list_url)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("org list fetch failed (HTTP {status})"),
            });
        }

        let html = resp.text().await.map_err(Error::Transport)?;
        let links = parse_org_links(&html);
        debug!("captured {} organization links", links.len());
        Ok(links)
    }

    // ── Dashboard base URL ───────────────────────────────────────────

    /// Navigate an org-picker link and derive the per-org dashboard base
    /// URL from the redirect chain.
    ///
    /// The platform redirects the org entry point to its per-org
    /// dashboard host; the final URL ends in a fixed `/dashboard`
    /// segment which is trimmed off. No redirect is an error — there is
    /// no usable base URL without one.
    pub async fn resolve_dashboard_base_url(&self, href: &str) -> Result<Url, Error> {
        let url = self.base_url.join(href)?;
        debug!("resolving dashboard base url via {}", url);

        let resp = self.http.get(url.clone()).send().await.map_err(Error::Transport)?;

        let final_url = resp.url().clone();
        if final_url == url {
            return Err(Error::NotRedirected {
                url: url.to_string(),
            });
        }

        let s = final_url.as_str();
        if s.len() <= DASHBOARD_SUFFIX_LEN {
            return Err(Error::NotRedirected {
                url: final_url.to_string(),
            });
        }
        let trimmed = &s[..s.len() - DASHBOARD_SUFFIX_LEN];
        let base = Url::parse(trimmed)?;
        debug!("dashboard base url: {}", base);
        Ok(base)
    }

    // ── Splash info ──────────────────────────────────────────────────

    /// Fetch the splash record for one client, scoped to a fixed
    /// 24-hour window.
    ///
    /// `GET {dashboard_base}/usage/client_show/{id}` with the XHR marker
    /// header the endpoint requires.
    pub async fn fetch_splash_info(
        &self,
        dashboard_base: &Url,
        client_id: &str,
    ) -> Result<SplashClientShow, Error> {
        let url = format!(
            "{}/usage/client_show/{}?t0=&t1=&timespan=86400&filter=",
            dashboard_base.as_str().trim_end_matches('/'),
            client_id
        );
        debug!("fetching splash info at {}", url);

        let resp = self
            .http
            .get(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "session expired or invalid".into(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Dashboard {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Extract `(label, href)` pairs from the org-picker anchor list.
///
/// Anchors without an `href` or with empty text are skipped; the picker
/// page occasionally carries decorative links.
fn parse_org_links(html: &str) -> Vec<OrgLink> {
    let doc = Html::parse_document(html);
    let anchor = Selector::parse("a").expect("`a` is a valid selector");

    let mut links = Vec::new();
    for a in doc.select(&anchor) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        let label = a.text().collect::<String>().trim().to_owned();
        if label.is_empty() {
            warn!(href, "skipping org link with empty label");
            continue;
        }
        links.push(OrgLink {
            label,
            href: href.to_owned(),
        });
    }
    links
}
