// The export wizard: an explicit tagged state machine over the two
// outbound surfaces.
//
// Stages advance in strict forward order; each state value carries the
// data its successors need, and every state embeds its predecessor, so a
// downstream stage structurally cannot exist without the selections that
// produced it. Re-selecting upstream rebuilds from the embedded
// predecessor and drops everything after it — stale downstream state is
// unrepresentable rather than merely discouraged.

use chrono::{DateTime, Local};
use secrecy::SecretString;
use tracing::{debug, warn};
use url::Url;

use splashport_api::dashboard::{self, OrgLink};
use splashport_api::rest::types::{Network, Organization, Ssid};
use splashport_api::{DashboardClient, RestClient, TransportConfig};

use crate::error::{Stage, WizardError};
use crate::export::{self, CsvExport};
use crate::model::SplashInfo;

/// Single page size for client listings; networks with more clients than
/// this are truncated (no pagination past the first page).
pub const CLIENT_PAGE_SIZE: u32 = 1000;

// ── Configuration ────────────────────────────────────────────────────

/// Endpoints and transport settings for one wizard.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Base URL of the account/login surface (the scraped side).
    pub account_base_url: Url,
    /// Base URL of the REST API.
    pub rest_base_url: String,
    /// Transport settings applied to both surfaces.
    pub transport: TransportConfig,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            account_base_url: Url::parse(dashboard::client::ACCOUNT_BASE_URL)
                .expect("account base URL is valid"),
            rest_base_url: splashport_api::rest::client::REST_BASE_URL.to_owned(),
            transport: TransportConfig::default(),
        }
    }
}

// ── State ────────────────────────────────────────────────────────────

/// Data captured at login.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub org_links: Vec<OrgLink>,
}

/// Data captured when the API key is submitted.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub auth: AuthState,
    pub organizations: Vec<Organization>,
}

/// Data captured when an organization is selected.
#[derive(Debug, Clone)]
pub struct OrgState {
    pub api: ApiState,
    pub organization_name: String,
    pub organization_id: String,
    pub dashboard_base_url: Url,
    pub networks: Vec<Network>,
}

/// Data captured when a network is selected.
#[derive(Debug, Clone)]
pub struct NetState {
    pub org: OrgState,
    pub network_id: String,
    pub ssids: Vec<Ssid>,
}

/// Data captured when an SSID is selected.
#[derive(Debug, Clone)]
pub struct SsidState {
    pub net: NetState,
    pub ssid_name: String,
    pub guest_client_ids: Vec<String>,
}

/// Data captured after the per-client enrichment batch.
#[derive(Debug, Clone)]
pub struct ListState {
    pub ssid: SsidState,
    pub splash_infos: Vec<SplashInfo>,
}

/// The wizard's tagged state.
#[derive(Debug, Clone)]
pub enum WizardState {
    Anonymous,
    Authenticated(AuthState),
    ApiKeySet(ApiState),
    OrganizationSelected(OrgState),
    NetworkSelected(NetState),
    SsidSelected(SsidState),
    ClientsListed(ListState),
}

impl WizardState {
    /// The stage tag for this state.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Anonymous => Stage::Anonymous,
            Self::Authenticated(_) => Stage::Authenticated,
            Self::ApiKeySet(_) => Stage::ApiKeySet,
            Self::OrganizationSelected(_) => Stage::OrganizationSelected,
            Self::NetworkSelected(_) => Stage::NetworkSelected,
            Self::SsidSelected(_) => Stage::SsidSelected,
            Self::ClientsListed(_) => Stage::ClientsListed,
        }
    }

    /// Login data, reachable from any stage past `Anonymous`.
    pub fn auth(&self) -> Option<&AuthState> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(s) => Some(s),
            Self::ApiKeySet(s) => Some(&s.auth),
            Self::OrganizationSelected(s) => Some(&s.api.auth),
            Self::NetworkSelected(s) => Some(&s.org.api.auth),
            Self::SsidSelected(s) => Some(&s.net.org.api.auth),
            Self::ClientsListed(s) => Some(&s.ssid.net.org.api.auth),
        }
    }

    /// API-key data, reachable from any stage past `Authenticated`.
    pub fn api(&self) -> Option<&ApiState> {
        match self {
            Self::Anonymous | Self::Authenticated(_) => None,
            Self::ApiKeySet(s) => Some(s),
            Self::OrganizationSelected(s) => Some(&s.api),
            Self::NetworkSelected(s) => Some(&s.org.api),
            Self::SsidSelected(s) => Some(&s.net.org.api),
            Self::ClientsListed(s) => Some(&s.ssid.net.org.api),
        }
    }

    /// Organization selection, reachable from any stage past `ApiKeySet`.
    pub fn org(&self) -> Option<&OrgState> {
        match self {
            Self::Anonymous | Self::Authenticated(_) | Self::ApiKeySet(_) => None,
            Self::OrganizationSelected(s) => Some(s),
            Self::NetworkSelected(s) => Some(&s.org),
            Self::SsidSelected(s) => Some(&s.net.org),
            Self::ClientsListed(s) => Some(&s.ssid.net.org),
        }
    }

    /// Network selection, reachable from any stage past
    /// `OrganizationSelected`.
    pub fn net(&self) -> Option<&NetState> {
        match self {
            Self::NetworkSelected(s) => Some(s),
            Self::SsidSelected(s) => Some(&s.net),
            Self::ClientsListed(s) => Some(&s.ssid.net),
            _ => None,
        }
    }

    /// SSID selection, reachable from `SsidSelected` on.
    pub fn ssid(&self) -> Option<&SsidState> {
        match self {
            Self::SsidSelected(s) => Some(s),
            Self::ClientsListed(s) => Some(&s.ssid),
            _ => None,
        }
    }

    /// The enriched splash list, only at `ClientsListed`.
    pub fn list(&self) -> Option<&ListState> {
        match self {
            Self::ClientsListed(s) => Some(s),
            _ => None,
        }
    }
}

// ── Wizard ───────────────────────────────────────────────────────────

/// One operator's export wizard.
///
/// Owns the session-cookie dashboard client and, once a key is
/// submitted, the REST client. One wizard per operator session — nothing
/// here is process-global.
pub struct Wizard {
    config: WizardConfig,
    dashboard: DashboardClient,
    rest: Option<RestClient>,
    state: WizardState,
}

impl Wizard {
    /// Create a wizard at the `Anonymous` stage.
    pub fn new(config: WizardConfig) -> Result<Self, WizardError> {
        let dashboard = DashboardClient::new(
            config.account_base_url.clone(),
            &config.transport.clone().with_cookie_jar(),
        )?;
        Ok(Self {
            config,
            dashboard,
            rest: None,
            state: WizardState::Anonymous,
        })
    }

    /// Current state, for rendering.
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Current stage tag.
    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    fn rest(&self) -> Result<&RestClient, WizardError> {
        self.rest.as_ref().ok_or_else(|| WizardError::WrongStage {
            expected: Stage::ApiKeySet,
            actual: self.state.stage(),
        })
    }

    fn require<'a, T>(&self, got: Option<&'a T>, expected: Stage) -> Result<&'a T, WizardError> {
        got.ok_or_else(|| WizardError::WrongStage {
            expected,
            actual: self.state.stage(),
        })
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// `Anonymous → Authenticated`: post credentials and capture the
    /// org-picker links.
    ///
    /// Always starts a fresh session (new cookie jar) and resets the
    /// wizard; a failed login leaves it at `Anonymous`.
    pub async fn login(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<(), WizardError> {
        self.state = WizardState::Anonymous;
        self.rest = None;
        self.dashboard = DashboardClient::new(
            self.config.account_base_url.clone(),
            &self.config.transport.clone().with_cookie_jar(),
        )?;

        let org_links = self.dashboard.login(username, password).await?;
        self.state = WizardState::Authenticated(AuthState { org_links });
        Ok(())
    }

    /// `Authenticated → ApiKeySet`: store the key and fetch the REST
    /// organization list.
    ///
    /// The key itself is not validated; a bad key surfaces as an
    /// `InvalidApiKey` on this or a later call.
    pub async fn submit_api_key(&mut self, api_key: &SecretString) -> Result<(), WizardError> {
        let auth = self
            .require(self.state.auth(), Stage::Authenticated)?
            .clone();

        let rest = RestClient::from_api_key(
            &self.config.rest_base_url,
            api_key,
            &self.config.transport,
        )?;
        let organizations = rest.list_organizations().await?;
        debug!("fetched {} organizations", organizations.len());

        self.rest = Some(rest);
        self.state = WizardState::ApiKeySet(ApiState {
            auth,
            organizations,
        });
        Ok(())
    }

    /// `ApiKeySet → OrganizationSelected`: resolve the org by name on
    /// both surfaces, derive the dashboard base URL, and fetch networks.
    ///
    /// Link resolution is substring containment over the scraped labels
    /// (first match wins; no match fails closed). Id resolution is exact
    /// name equality over the REST list; a miss is logged and then fails
    /// the transition cleanly before any network request goes out.
    pub async fn select_organization(&mut self, name: &str) -> Result<(), WizardError> {
        let api = self.require(self.state.api(), Stage::ApiKeySet)?.clone();

        let matches: Vec<&OrgLink> = api
            .auth
            .org_links
            .iter()
            .filter(|l| l.label.contains(name))
            .collect();
        let Some(link) = matches.first().copied() else {
            warn!(name, "organization not found in scraped org links");
            return Err(WizardError::OrganizationLinkNotFound { name: name.into() });
        };
        if matches.len() > 1 {
            warn!(
                name,
                count = matches.len(),
                "multiple org links match, using the first"
            );
        }
        let href = link.href.clone();

        let organization_id = api
            .organizations
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.id.clone());
        if organization_id.is_none() {
            warn!(name, "organization id not found in REST organization list");
        }

        let dashboard_base_url = self.dashboard.resolve_dashboard_base_url(&href).await?;

        let Some(organization_id) = organization_id else {
            return Err(WizardError::OrganizationIdUnresolved { name: name.into() });
        };
        let networks = self.rest()?.list_networks(&organization_id).await?;
        debug!(
            org_id = %organization_id,
            "fetched {} networks",
            networks.len()
        );

        self.state = WizardState::OrganizationSelected(OrgState {
            api,
            organization_name: name.into(),
            organization_id,
            dashboard_base_url,
            networks,
        });
        Ok(())
    }

    /// `OrganizationSelected → NetworkSelected`: fix the active network
    /// and fetch its SSID list.
    ///
    /// The id is opaque (chosen from the rendered list) and not
    /// validated here; a bogus id fails at the SSID fetch.
    pub async fn select_network(&mut self, network_id: &str) -> Result<(), WizardError> {
        let org = self
            .require(self.state.org(), Stage::OrganizationSelected)?
            .clone();

        let ssids = self.rest()?.list_ssids(network_id).await?;
        debug!(network_id, "fetched {} SSIDs", ssids.len());

        self.state = WizardState::NetworkSelected(NetState {
            org,
            network_id: network_id.into(),
            ssids,
        });
        Ok(())
    }

    /// `NetworkSelected → SsidSelected`: fetch the client list (single
    /// page) and keep the ids of clients on the selected SSID.
    pub async fn select_ssid(&mut self, ssid_name: &str) -> Result<(), WizardError> {
        let net = self
            .require(self.state.net(), Stage::NetworkSelected)?
            .clone();

        let clients = self
            .rest()?
            .list_clients(&net.network_id, CLIENT_PAGE_SIZE)
            .await?;
        let guest_client_ids: Vec<String> = clients
            .iter()
            .filter(|c| c.ssid.as_deref() == Some(ssid_name))
            .map(|c| c.id.clone())
            .collect();
        debug!(
            ssid_name,
            "{} of {} clients on the selected SSID",
            guest_client_ids.len(),
            clients.len()
        );

        self.state = WizardState::SsidSelected(SsidState {
            net,
            ssid_name: ssid_name.into(),
            guest_client_ids,
        });
        Ok(())
    }

    /// `SsidSelected → ClientsListed`: enrich every guest client, in
    /// list order, sequentially.
    ///
    /// Fail-fast: the first per-client failure aborts the whole batch
    /// and the wizard stays at `SsidSelected` — no partial list is ever
    /// stored. The access point is resolved per client via a separate
    /// fetch of the same client list.
    pub async fn fetch_splash_infos(&mut self) -> Result<(), WizardError> {
        let ssid = self.require(self.state.ssid(), Stage::SsidSelected)?.clone();

        let mut splash_infos = Vec::with_capacity(ssid.guest_client_ids.len());
        for client_id in &ssid.guest_client_ids {
            let show = self
                .dashboard
                .fetch_splash_info(&ssid.net.org.dashboard_base_url, client_id)
                .await?;

            let clients = self
                .rest()?
                .list_clients(&ssid.net.network_id, CLIENT_PAGE_SIZE)
                .await?;
            let ap = clients
                .iter()
                .find(|c| c.id == *client_id)
                .and_then(|c| c.recent_device_name.clone());
            if ap.is_none() {
                warn!(client_id = %client_id, "access point not found in client list");
            }

            splash_infos.push(SplashInfo::assemble(&show, ap, &Local));
        }
        debug!("enriched {} splash records", splash_infos.len());

        self.state = WizardState::ClientsListed(ListState { ssid, splash_infos });
        Ok(())
    }

    /// Serialize the held splash list as a downloadable CSV.
    ///
    /// Repeatable: the held list is not consumed, so exporting twice
    /// over unchanged state yields identical rows.
    pub fn export_csv(&self, now: &DateTime<Local>) -> Result<CsvExport, WizardError> {
        let list = self.require(self.state.list(), Stage::ClientsListed)?;
        Ok(CsvExport {
            filename: export::export_filename(now, &list.ssid.ssid_name),
            bytes: export::to_csv(&list.splash_infos)?,
        })
    }
}
