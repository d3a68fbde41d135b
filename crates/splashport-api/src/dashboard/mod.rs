// Dashboard web-session client for the scraped Meraki surface.
//
// Cookie-based login, org-picker scraping, per-organization redirect
// resolution, and the per-client splash-info XHR endpoint. Everything here
// rides on the session cookie set at login; nothing uses the API key.

pub mod client;
pub mod models;

pub use client::DashboardClient;
pub use models::{OrgLink, SplashClientShow};
