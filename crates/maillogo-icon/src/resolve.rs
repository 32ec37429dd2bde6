//! Resolution of declared `href` values against the sender domain.

use crate::domain::Domain;

/// Turns a declared `href` into an absolute URL on `domain`.
///
/// - Absolute `http://` and `https://` URLs are returned unchanged.
/// - `/path`, `./path` and `../path` are appended to `https://{domain}`
///   with exactly one `/` between host and path.
/// - Anything else is treated as relative to the site root.
#[must_use]
pub fn resolve_href(href: &str, domain: &Domain) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    let host = domain.as_str();
    if href.starts_with('/') {
        format!("https://{host}{href}")
    } else {
        // Covers `./`, `../` and bare relative paths alike.
        format!("https://{host}/{href}")
    }
}
