// Wizard routes: one POST per forward transition, server-rendered pages.
//
// Every handler resolves the operator's session wizard from a cookie
// token, drives one transition, and renders the next page. Any failure
// or precondition violation falls back to the login page with the error
// message rendered; the CSV download is no exception.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Local;
use secrecy::SecretString;
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

use splashport_core::{Wizard, WizardError};

use crate::state::AppState;
use crate::views;

const SESSION_COOKIE: &str = "splashport_session";

/// Build the wizard router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", post(login))
        .route("/api_key", post(api_key))
        .route("/organization", post(organization))
        .route("/network", post(network))
        .route("/ssid", post(ssid))
        .route("/export", post(export))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── Session plumbing ─────────────────────────────────────────────────

/// Resolve the session wizard from the cookie, creating a fresh session
/// (and setting the cookie) when none exists.
fn session(
    state: &AppState,
    jar: CookieJar,
) -> Result<(CookieJar, Arc<Mutex<Wizard>>), WizardError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Ok(token) = Uuid::parse_str(cookie.value()) {
            if let Some(wizard) = state.wizard(token) {
                return Ok((jar, wizard));
            }
        }
    }
    let (token, wizard) = state.create()?;
    let jar = jar.add(Cookie::new(SESSION_COOKIE, token.to_string()));
    Ok((jar, wizard))
}

/// Login-page fallback used by every failed step.
fn fallback(jar: CookieJar, err: &WizardError) -> Response {
    warn!("wizard step failed: {err}");
    (jar, Html(views::login_page(Some(&err.to_string())))).into_response()
}

/// Session creation failed before any wizard work could happen.
fn session_unavailable(err: &WizardError) -> Response {
    warn!("could not create session: {err}");
    (
        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        Html(views::login_page(Some("session unavailable"))),
    )
        .into_response()
}

// ── Forms ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Deserialize)]
pub struct ApiKeyForm {
    api_key: String,
}

#[derive(Deserialize)]
pub struct OrganizationForm {
    organization: String,
}

#[derive(Deserialize)]
pub struct NetworkForm {
    network: String,
}

#[derive(Deserialize)]
pub struct SsidForm {
    ssid: String,
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn index(State(state): State<AppState>, jar: CookieJar) -> Response {
    match session(&state, jar) {
        Ok((jar, _)) => (jar, Html(views::login_page(None))).into_response(),
        Err(e) => session_unavailable(&e),
    }
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<LoginForm>,
) -> Response {
    let (jar, wizard) = match session(&state, jar) {
        Ok(s) => s,
        Err(e) => return session_unavailable(&e),
    };
    let mut wizard = wizard.lock().await;

    let password: SecretString = form.password.into();
    match wizard.login(&form.username, &password).await {
        Ok(()) => (jar, Html(views::api_key_page())).into_response(),
        Err(e) => fallback(jar, &e),
    }
}

async fn api_key(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<ApiKeyForm>,
) -> Response {
    let (jar, wizard) = match session(&state, jar) {
        Ok(s) => s,
        Err(e) => return session_unavailable(&e),
    };
    let mut wizard = wizard.lock().await;

    let key: SecretString = form.api_key.into();
    match wizard.submit_api_key(&key).await {
        Ok(()) => {
            let organizations = wizard
                .state()
                .api()
                .map(|a| a.organizations.as_slice())
                .unwrap_or_default();
            (jar, Html(views::organizations_page(organizations))).into_response()
        }
        Err(e) => fallback(jar, &e),
    }
}

async fn organization(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<OrganizationForm>,
) -> Response {
    let (jar, wizard) = match session(&state, jar) {
        Ok(s) => s,
        Err(e) => return session_unavailable(&e),
    };
    let mut wizard = wizard.lock().await;

    match wizard.select_organization(&form.organization).await {
        Ok(()) => {
            let networks = wizard
                .state()
                .org()
                .map(|o| o.networks.as_slice())
                .unwrap_or_default();
            (jar, Html(views::networks_page(networks))).into_response()
        }
        Err(e) => fallback(jar, &e),
    }
}

async fn network(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<NetworkForm>,
) -> Response {
    let (jar, wizard) = match session(&state, jar) {
        Ok(s) => s,
        Err(e) => return session_unavailable(&e),
    };
    let mut wizard = wizard.lock().await;

    match wizard.select_network(&form.network).await {
        Ok(()) => {
            let ssids = wizard
                .state()
                .net()
                .map(|n| n.ssids.as_slice())
                .unwrap_or_default();
            (jar, Html(views::ssids_page(ssids))).into_response()
        }
        Err(e) => fallback(jar, &e),
    }
}

/// SSID submission runs two transitions back to back: fix the SSID (and
/// filter the client list), then enrich every guest client.
async fn ssid(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<SsidForm>,
) -> Response {
    let (jar, wizard) = match session(&state, jar) {
        Ok(s) => s,
        Err(e) => return session_unavailable(&e),
    };
    let mut wizard = wizard.lock().await;

    let result = match wizard.select_ssid(&form.ssid).await {
        Ok(()) => wizard.fetch_splash_infos().await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            let infos = wizard
                .state()
                .list()
                .map(|l| l.splash_infos.as_slice())
                .unwrap_or_default();
            (jar, Html(views::clients_page(&form.ssid, infos))).into_response()
        }
        Err(e) => fallback(jar, &e),
    }
}

async fn export(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, wizard) = match session(&state, jar) {
        Ok(s) => s,
        Err(e) => return session_unavailable(&e),
    };
    let wizard = wizard.lock().await;

    match wizard.export_csv(&Local::now()) {
        Ok(export) => (
            jar,
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export.filename),
                ),
            ],
            export.bytes,
        )
            .into_response(),
        Err(e) => fallback(jar, &e),
    }
}
