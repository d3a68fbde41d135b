// Splash-record model: the joined, display-ready captive-portal client
// record and its epoch-to-display time conversion.

use chrono::{DateTime, LocalResult, TimeZone};
use serde::{Deserialize, Serialize};

use splashport_api::dashboard::SplashClientShow;

/// One enriched captive-portal client record.
///
/// Field order here is the CSV column order: identity, device, sponsor,
/// authorization window, access point, SSID. Missing source fields render
/// as empty strings rather than failing the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplashInfo {
    pub description: String,
    /// Local time as `YYYY/MM/DD HH:MM`.
    pub last_seen: String,
    pub os: String,
    pub ip: String,
    pub mac: String,
    pub sponsor_email: String,
    pub authorized: String,
    pub expires: String,
    pub ap: String,
    pub ssid: String,
}

impl SplashInfo {
    /// Join a scraped splash record with the access-point name resolved
    /// from the REST client list.
    ///
    /// Sponsor fields come from the first `wireless_bigacl` entry; the
    /// SSID name is the one the scraped endpoint reports for the client.
    pub fn assemble<Tz: TimeZone>(show: &SplashClientShow, ap: Option<String>, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let acl = show.wireless_bigacl.first();
        Self {
            description: show.description.clone().unwrap_or_default(),
            last_seen: show
                .last_seen
                .map(|epoch| format_last_seen(epoch, tz))
                .unwrap_or_default(),
            os: show.os.clone().unwrap_or_default(),
            ip: show.ip.clone().unwrap_or_default(),
            mac: show.mac.clone().unwrap_or_default(),
            sponsor_email: acl
                .and_then(|a| a.sponsor_email.clone())
                .unwrap_or_default(),
            authorized: acl.and_then(|a| a.authorized.clone()).unwrap_or_default(),
            expires: acl.and_then(|a| a.expires.clone()).unwrap_or_default(),
            ap: ap.unwrap_or_default(),
            ssid: show.ssid_name.clone().unwrap_or_default(),
        }
    }
}

/// Convert epoch seconds to `YYYY/MM/DD HH:MM` in the given time zone.
///
/// Out-of-range epochs render as an empty string instead of panicking.
pub fn format_last_seen<Tz: TimeZone>(epoch: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_opt(epoch, 0) {
        LocalResult::Single(dt) => format_display_time(&dt),
        LocalResult::Ambiguous(dt, _) => format_display_time(&dt),
        LocalResult::None => String::new(),
    }
}

fn format_display_time<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%Y/%m/%d %H:%M").to_string()
}
