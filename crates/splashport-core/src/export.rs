// CSV export: fixed-column serialization of splash records and the
// timestamped, SSID-qualified download filename.

use chrono::{DateTime, TimeZone};

use crate::error::WizardError;
use crate::model::SplashInfo;

/// CSV column headers, in the fixed export order.
pub const CSV_HEADERS: [&str; 10] = [
    "description",
    "last_seen",
    "os",
    "ip",
    "mac",
    "sponsor_email",
    "authorized",
    "expires",
    "AP",
    "ssid",
];

/// A finished export: filename plus CSV bytes, ready to serve as an
/// attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Serialize splash records to CSV bytes.
///
/// Column order is fixed to `CSV_HEADERS`. An empty record list yields
/// the header row only.
pub fn to_csv(records: &[SplashInfo]) -> Result<Vec<u8>, WizardError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADERS)?;
    for r in records {
        wtr.write_record([
            &r.description,
            &r.last_seen,
            &r.os,
            &r.ip,
            &r.mac,
            &r.sponsor_email,
            &r.authorized,
            &r.expires,
            &r.ap,
            &r.ssid,
        ])?;
    }
    wtr.into_inner().map_err(|e| WizardError::Io(e.into_error()))
}

/// Build the download filename: `{yyyyMMdd_HHmm}_splash_infos_{ssid}.csv`
/// with spaces in the SSID replaced by underscores.
///
/// The clock is passed in so callers (and tests) control the stamp.
pub fn export_filename<Tz: TimeZone>(now: &DateTime<Tz>, ssid: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_splash_infos_{}.csv",
        now.format("%Y%m%d_%H%M"),
        ssid.replace(' ', "_")
    )
}
