// Minimal server-rendered wizard pages.
//
// Deliberately plain inline HTML: the pages are a thin operator surface
// over the wizard, not a product UI. All interpolated values go through
// `escape`.

use splashport_api::rest::types::{Network, Organization, Ssid};
use splashport_core::SplashInfo;

/// Escape a value for interpolation into HTML text or attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\">\
         <title>splashport — {title}</title></head>\n\
         <body><h1>{title}</h1>\n{body}\n</body></html>"
    )
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(e) => format!("<p class=\"error\">{}</p>\n", escape(e)),
        None => String::new(),
    }
}

pub fn login_page(error: Option<&str>) -> String {
    let body = format!(
        "{}<form method=\"post\" action=\"/login\">\
         <label>Username <input name=\"username\" type=\"email\" required></label>\
         <label>Password <input name=\"password\" type=\"password\" required></label>\
         <button type=\"submit\">Log in</button></form>",
        error_banner(error)
    );
    page("Log in", &body)
}

pub fn api_key_page() -> String {
    let body = "<form method=\"post\" action=\"/api_key\">\
                <label>API key <input name=\"api_key\" type=\"password\" required></label>\
                <button type=\"submit\">Submit</button></form>";
    page("API key", body)
}

pub fn organizations_page(organizations: &[Organization]) -> String {
    let options: String = organizations
        .iter()
        .map(|o| format!("<option value=\"{0}\">{0}</option>", escape(&o.name)))
        .collect();
    let body = format!(
        "<form method=\"post\" action=\"/organization\">\
         <label>Organization <select name=\"organization\">{options}</select></label>\
         <button type=\"submit\">Select</button></form>"
    );
    page("Select organization", &body)
}

pub fn networks_page(networks: &[Network]) -> String {
    let options: String = networks
        .iter()
        .map(|n| {
            format!(
                "<option value=\"{}\">{}</option>",
                escape(&n.id),
                escape(n.name.as_deref().unwrap_or(n.id.as_str()))
            )
        })
        .collect();
    let body = format!(
        "<form method=\"post\" action=\"/network\">\
         <label>Network <select name=\"network\">{options}</select></label>\
         <button type=\"submit\">Select</button></form>"
    );
    page("Select network", &body)
}

pub fn ssids_page(ssids: &[Ssid]) -> String {
    let options: String = ssids
        .iter()
        .map(|s| format!("<option value=\"{0}\">{0}</option>", escape(&s.name)))
        .collect();
    let body = format!(
        "<form method=\"post\" action=\"/ssid\">\
         <label>SSID <select name=\"ssid\">{options}</select></label>\
         <button type=\"submit\">Fetch clients</button></form>"
    );
    page("Select SSID", &body)
}

pub fn clients_page(ssid: &str, splash_infos: &[SplashInfo]) -> String {
    let header = "<tr><th>description</th><th>last_seen</th><th>os</th>\
                  <th>ip</th><th>mac</th><th>sponsor_email</th><th>authorized</th>\
                  <th>expires</th><th>AP</th><th>ssid</th></tr>";
    let rows: String = splash_infos
        .iter()
        .map(|i| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&i.description),
                escape(&i.last_seen),
                escape(&i.os),
                escape(&i.ip),
                escape(&i.mac),
                escape(&i.sponsor_email),
                escape(&i.authorized),
                escape(&i.expires),
                escape(&i.ap),
                escape(&i.ssid),
            )
        })
        .collect();
    let body = format!(
        "<p>{} splash record(s) for SSID \"{}\"</p>\
         <table>{header}{rows}</table>\
         <form method=\"post\" action=\"/export\">\
         <button type=\"submit\" name=\"download_button\">Download CSV</button></form>",
        splash_infos.len(),
        escape(ssid),
    );
    page("Splash clients", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(escape(r#"<a b="c&d">"#), "&lt;a b=&quot;c&amp;d&quot;&gt;");
    }

    #[test]
    fn login_page_renders_error_banner() {
        let html = login_page(Some("credentials rejected"));
        assert!(html.contains("credentials rejected"));
        assert!(html.contains("action=\"/login\""));
    }
}
