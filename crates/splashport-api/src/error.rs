use thiserror::Error;

/// Top-level error type for the `splashport-api` crate.
///
/// Covers every failure mode across both outbound surfaces: the
/// cookie-authenticated dashboard scrape and the key-authenticated REST
/// API. `splashport-core` maps these into wizard-level diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Dashboard login failed (wrong credentials, account locked, the
    /// platform's "contact your network administrator" marker, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Invalid API key (rejected by the REST API with 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── REST API ────────────────────────────────────────────────────
    /// Non-success status from the REST API.
    #[error("REST API error (HTTP {status}): {message}")]
    RestApi { status: u16, message: String },

    // ── Dashboard (scraped surface) ─────────────────────────────────
    /// Non-success status from a scraped dashboard endpoint.
    #[error("Dashboard error (HTTP {status}): {message}")]
    Dashboard { status: u16, message: String },

    /// The per-organization entry point did not redirect, so no
    /// dashboard base URL can be derived.
    #[error("Request to {url} was not redirected")]
    NotRedirected { url: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if this error indicates the session or key is no
    /// longer accepted and re-authentication might resolve it.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::InvalidApiKey)
    }
}
