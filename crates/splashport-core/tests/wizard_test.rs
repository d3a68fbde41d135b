#![allow(clippy::unwrap_used)]
// End-to-end wizard tests against a wiremock stand-in for both outbound
// surfaces (scraped dashboard + REST API).

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use splashport_api::TransportConfig;
use splashport_core::error::Stage;
use splashport_core::{Wizard, WizardConfig, WizardError};

// ── Helpers ─────────────────────────────────────────────────────────

fn secret(s: &str) -> SecretString {
    s.to_owned().into()
}

async fn setup() -> (MockServer, Wizard) {
    let server = MockServer::start().await;
    let config = WizardConfig {
        account_base_url: Url::parse(&server.uri()).unwrap(),
        rest_base_url: format!("{}/api", server.uri()),
        transport: TransportConfig::default(),
    };
    let wizard = Wizard::new(config).unwrap();
    (server, wizard)
}

/// Mount the login POST + org-list pages with one "Acme" link.
async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/login/org_list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="/login/org_choose?eid=acme1">Acme</a>
               <a href="/login/org_choose?eid=glbx1">Globex</a>"#,
        ))
        .mount(server)
        .await;
}

/// Mount the REST organization list containing "Acme" (id 123).
async fn mount_organizations(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "123", "name": "Acme" },
            { "id": "456", "name": "Globex" }
        ])))
        .mount(server)
        .await;
}

/// Mount the org redirect chain and the per-org REST resources.
async fn mount_org_resources(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/login/org_choose"))
        .respond_with(ResponseTemplate::new(302).insert_header(
            "Location",
            format!("{}/Acme/n/abc1234567/manage/dashboard", server.uri()),
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Acme/n/abc1234567/manage/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>org home</html>"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/123/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "N_1", "name": "HQ" }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/networks/N_1/wireless/ssids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "number": 0, "name": "Corp", "enabled": true },
            { "number": 1, "name": "Guest", "enabled": true }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/networks/N_1/clients"))
        .and(query_param("perPage", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "k111", "mac": "aa:bb:cc:11:22:33", "ssid": "Guest",
              "recentDeviceName": "AP-Lobby" },
            { "id": "k222", "mac": "dd:ee:ff:44:55:66", "ssid": "Corp",
              "recentDeviceName": "AP-Office" }
        ])))
        .mount(server)
        .await;
}

async fn mount_splash_info(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/Acme/n/abc1234567/manage/usage/client_show/k111"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "description": "Guest iPhone",
            "last_seen": 1_650_000_000_i64,
            "os": "iOS",
            "ip": "10.0.0.42",
            "mac": "aa:bb:cc:11:22:33",
            "ssid_name": "Guest",
            "wireless_bigacl": [{
                "sponsor_email": "sponsor@example.com",
                "authorized": "3 days",
                "expires": "5 days"
            }]
        })))
        .mount(server)
        .await;
}

/// Drive the wizard through login → key → org → network → SSID.
async fn advance_to_ssid(server: &MockServer, wizard: &mut Wizard) {
    mount_login(server).await;
    mount_organizations(server).await;
    mount_org_resources(server).await;

    wizard.login("op@example.com", &secret("pw")).await.unwrap();
    wizard.submit_api_key(&secret("0123456789abcdef")).await.unwrap();
    wizard.select_organization("Acme").await.unwrap();
    wizard.select_network("N_1").await.unwrap();
    wizard.select_ssid("Guest").await.unwrap();
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_full_wizard_to_csv_export() {
    let (server, mut wizard) = setup().await;
    advance_to_ssid(&server, &mut wizard).await;
    mount_splash_info(&server).await;

    // One client on "Guest", so one enrichment fetch.
    let ssid_state = wizard.state().ssid().unwrap();
    assert_eq!(ssid_state.guest_client_ids, vec!["k111"]);
    assert_eq!(
        ssid_state.net.org.dashboard_base_url.as_str(),
        format!("{}/Acme/n/abc1234567/manage", server.uri())
    );

    wizard.fetch_splash_infos().await.unwrap();
    assert_eq!(wizard.stage(), Stage::ClientsListed);

    let now = chrono::Local::now();
    let export = wizard.export_csv(&now).unwrap();

    assert!(export.filename.ends_with("_splash_infos_Guest.csv"));

    let mut rdr = csv::Reader::from_reader(export.bytes.as_slice());
    let rows: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.len(), 10);
    assert_eq!(&row[0], "Guest iPhone");
    assert!(!row[1].is_empty(), "last_seen should be rendered");
    assert_eq!(&row[2], "iOS");
    assert_eq!(&row[3], "10.0.0.42");
    assert_eq!(&row[4], "aa:bb:cc:11:22:33");
    assert_eq!(&row[5], "sponsor@example.com");
    assert_eq!(&row[6], "3 days");
    assert_eq!(&row[7], "5 days");
    assert_eq!(&row[8], "AP-Lobby");
    assert_eq!(&row[9], "Guest");

    // Export is repeatable over unchanged state.
    let again = wizard.export_csv(&now).unwrap();
    assert_eq!(again.bytes, export.bytes);
}

// ── Failure modes ───────────────────────────────────────────────────

#[tokio::test]
async fn test_org_selection_fails_closed_without_matching_link() {
    let (server, mut wizard) = setup().await;
    mount_login(&server).await;
    mount_organizations(&server).await;

    // The navigation entry point must never be hit on a link miss.
    Mock::given(method("GET"))
        .and(path("/login/org_choose"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    wizard.login("op@example.com", &secret("pw")).await.unwrap();
    wizard.submit_api_key(&secret("key")).await.unwrap();

    let result = wizard.select_organization("Initech").await;
    assert!(matches!(
        result,
        Err(WizardError::OrganizationLinkNotFound { .. })
    ));
    assert_eq!(wizard.stage(), Stage::ApiKeySet);
}

#[tokio::test]
async fn test_org_missing_from_rest_list_fails_cleanly() {
    let (server, mut wizard) = setup().await;
    mount_login(&server).await;

    // Scraped links know "Acme" but the REST list does not.
    Mock::given(method("GET"))
        .and(path("/api/v1/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "456", "name": "Globex" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/login/org_choose"))
        .respond_with(ResponseTemplate::new(302).insert_header(
            "Location",
            format!("{}/Acme/n/abc1234567/manage/dashboard", server.uri()),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Acme/n/abc1234567/manage/dashboard"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    wizard.login("op@example.com", &secret("pw")).await.unwrap();
    wizard.submit_api_key(&secret("key")).await.unwrap();

    let result = wizard.select_organization("Acme").await;
    assert!(matches!(
        result,
        Err(WizardError::OrganizationIdUnresolved { .. })
    ));
    // The wizard survives and stays where it was.
    assert_eq!(wizard.stage(), Stage::ApiKeySet);
}

#[tokio::test]
async fn test_out_of_order_transition_is_a_precondition_error() {
    let (_server, mut wizard) = setup().await;

    let result = wizard.select_ssid("Guest").await;
    match result {
        Err(WizardError::WrongStage { expected, actual }) => {
            assert_eq!(expected, Stage::NetworkSelected);
            assert_eq!(actual, Stage::Anonymous);
        }
        other => panic!("expected WrongStage, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_login_resets_to_anonymous() {
    let (server, mut wizard) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "Please contact your network administrator for assistance",
        ))
        .mount(&server)
        .await;

    let result = wizard.login("op@example.com", &secret("bad")).await;
    assert!(matches!(
        result,
        Err(WizardError::Api(splashport_api::Error::Authentication { .. }))
    ));
    assert_eq!(wizard.stage(), Stage::Anonymous);
}

// ── Batch enrichment policy ─────────────────────────────────────────

#[tokio::test]
async fn test_batch_enrichment_is_fail_fast() {
    let (server, mut wizard) = setup().await;
    advance_to_ssid(&server, &mut wizard).await;

    // No splash mock mounted: the first per-client fetch 404s and the
    // whole batch aborts.
    let result = wizard.fetch_splash_infos().await;
    assert!(result.is_err());
    assert_eq!(wizard.stage(), Stage::SsidSelected);
    assert!(wizard.state().list().is_none(), "no partial results stored");
}

// ── Invalidation on upstream re-selection ───────────────────────────

#[tokio::test]
async fn test_reselecting_network_drops_downstream_state() {
    let (server, mut wizard) = setup().await;
    advance_to_ssid(&server, &mut wizard).await;
    mount_splash_info(&server).await;

    wizard.fetch_splash_infos().await.unwrap();
    assert_eq!(wizard.stage(), Stage::ClientsListed);

    // Re-selecting the network rebuilds from the org selection and
    // drops the SSID selection and the splash list.
    wizard.select_network("N_1").await.unwrap();
    assert_eq!(wizard.stage(), Stage::NetworkSelected);
    assert!(wizard.state().ssid().is_none());
    assert!(wizard.state().list().is_none());

    // A stale export attempt now fails as a precondition error.
    let result = wizard.export_csv(&chrono::Local::now());
    assert!(matches!(result, Err(WizardError::WrongStage { .. })));
}
