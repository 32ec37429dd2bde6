//! Content type of fetched icons.

use crate::candidate::href_path;

/// Fallback content type when nothing better is known.
pub const OCTET_STREAM: &str = "application/octet-stream";

const SVG: &str = "image/svg+xml";

/// File suffixes and the content types they imply.
const EXTENSIONS: &[(&str, &str)] = &[
    (".svg", SVG),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
    (".ico", "image/x-icon"),
];

/// Returns the content type to serve for an icon fetched from `url`.
///
/// The upstream `Content-Type` header wins whenever it is present and not
/// blank; otherwise the type is inferred from the URL.
#[must_use]
pub fn resolve_content_type(declared: Option<&str>, url: &str) -> String {
    match declared.map(str::trim).filter(|ct| !ct.is_empty()) {
        Some(ct) => ct.to_string(),
        None => content_type_from_extension(url).to_string(),
    }
}

/// Infers a content type from the suffix of the URL's path.
#[must_use]
pub fn content_type_from_extension(url: &str) -> &'static str {
    if url.contains(SVG) {
        return SVG;
    }

    let path = href_path(url).to_ascii_lowercase();
    EXTENSIONS
        .iter()
        .find(|(suffix, _)| path.ends_with(*suffix))
        .map_or(OCTET_STREAM, |&(_, content_type)| content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_preferred() {
        assert_eq!(
            resolve_content_type(Some("image/vnd.microsoft.icon"), "https://a.com/favicon.ico"),
            "image/vnd.microsoft.icon"
        );
    }

    #[test]
    fn test_blank_header_ignored() {
        assert_eq!(
            resolve_content_type(Some("  "), "https://a.com/favicon.ico"),
            "image/x-icon"
        );
        assert_eq!(
            resolve_content_type(None, "https://a.com/favicon.ico"),
            "image/x-icon"
        );
    }

    #[test]
    fn test_extension_table() {
        assert_eq!(content_type_from_extension("https://a.com/i.svg"), "image/svg+xml");
        assert_eq!(content_type_from_extension("https://a.com/i.png"), "image/png");
        assert_eq!(content_type_from_extension("https://a.com/i.jpg"), "image/jpeg");
        assert_eq!(content_type_from_extension("https://a.com/i.JPEG"), "image/jpeg");
        assert_eq!(content_type_from_extension("https://a.com/i.gif"), "image/gif");
        assert_eq!(content_type_from_extension("https://a.com/i.ico"), "image/x-icon");
        assert_eq!(content_type_from_extension("https://a.com/i.webp"), OCTET_STREAM);
        assert_eq!(content_type_from_extension("https://a.com/icon"), OCTET_STREAM);
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        assert_eq!(
            content_type_from_extension("https://a.com/i.png?v=2#top"),
            "image/png"
        );
    }

    #[test]
    fn test_svg_mime_in_url() {
        assert_eq!(
            content_type_from_extension("https://a.com/render?type=image/svg+xml"),
            "image/svg+xml"
        );
    }
}
