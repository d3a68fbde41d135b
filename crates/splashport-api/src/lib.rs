// splashport-api: Async Rust clients for the Meraki cloud surfaces
// (authenticated dashboard web session + documented REST API)

pub mod dashboard;
pub mod error;
pub mod rest;
pub mod transport;

pub use dashboard::DashboardClient;
pub use error::Error;
pub use rest::RestClient;
pub use transport::TransportConfig;
