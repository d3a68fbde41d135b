// REST API client for the documented Meraki surface.
//
// Key-authenticated JSON endpoints under /api/v1/: organizations,
// networks, wireless SSIDs, and connected clients.

pub mod client;
pub mod types;

pub use client::RestClient;
