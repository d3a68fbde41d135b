use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use splashport_api::TransportConfig;
use splashport_core::WizardConfig;
use splashport_web::routes;
use splashport_web::state::AppState;

/// Web wizard for exporting Meraki captive-portal client records as CSV.
#[derive(Parser)]
#[command(name = "splashport", version, about)]
struct Args {
    /// Address to serve the wizard on.
    #[arg(long, default_value = "127.0.0.1:5001")]
    bind: SocketAddr,

    /// Base URL of the account/login surface.
    #[arg(long, default_value = splashport_api::dashboard::client::ACCOUNT_BASE_URL)]
    account_url: Url,

    /// Base URL of the REST API.
    #[arg(long, default_value = splashport_api::rest::client::REST_BASE_URL)]
    api_url: String,

    /// Outbound request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(args.verbose);

    let config = WizardConfig {
        account_base_url: args.account_url,
        rest_base_url: args.api_url,
        transport: TransportConfig::with_timeout(Duration::from_secs(args.timeout)),
    };
    let app = routes::router(AppState::new(config));

    tracing::info!("serving wizard on http://{}", args.bind);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server crashed");
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}
