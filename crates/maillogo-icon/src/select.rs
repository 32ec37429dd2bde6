//! Selection of the best icon among competing declarations.
//!
//! Candidates pass through four stages:
//!
//! 1. **Validity**: `data:` and `javascript:` references are dropped.
//! 2. **Theme**: with a hint, only icons whose `href` matches the requested
//!    variant survive. The filter is strict and may leave nothing.
//! 3. **Format**: the first SVG survivor wins outright.
//! 4. **Size**: otherwise the largest declared size wins, earliest first on ties.

use std::cmp::Reverse;

use tracing::trace;

use crate::candidate::{IconCandidate, href_path};
use crate::domain::{Domain, ThemeHint};
use crate::resolve::resolve_href;

/// Reference schemes that cannot be fetched as standalone icons.
const REJECTED_SCHEMES: &[&str] = &["data:", "javascript:"];

/// Substrings that mark an icon as the dark variant.
const DARK_MARKERS: &[&str] = &["dark", "_dark", "-dark"];

/// Picks at most one icon from `candidates`.
///
/// The result is always one of the given candidates.
#[must_use]
pub fn select_icon(
    candidates: &[IconCandidate],
    theme: Option<ThemeHint>,
) -> Option<&IconCandidate> {
    let valid: Vec<&IconCandidate> = candidates.iter().filter(|c| is_fetchable(c)).collect();
    trace!(total = candidates.len(), valid = valid.len(), "Validity filter");

    let survivors: Vec<&IconCandidate> = match theme {
        Some(hint) => {
            let wants_dark = hint == ThemeHint::Dark;
            let themed: Vec<_> = valid
                .into_iter()
                .filter(|c| is_dark_variant(c) == wants_dark)
                .collect();
            trace!(theme = %hint, survivors = themed.len(), "Theme filter");
            themed
        }
        None => valid,
    };

    if let Some(svg) = survivors.iter().copied().find(|c| c.is_svg()) {
        trace!(href = %svg.href, "Selected vector icon");
        return Some(svg);
    }

    // `min_by_key` keeps the first of equal keys, so ties go to document order.
    let chosen = survivors
        .into_iter()
        .min_by_key(|c| Reverse(c.declared_size()));
    if let Some(icon) = chosen {
        trace!(href = %icon.href, size = icon.declared_size(), "Selected bitmap icon");
    }
    chosen
}

/// Selects an icon and resolves it to an absolute URL on `domain`.
#[must_use]
pub fn resolve_icon_url(
    candidates: &[IconCandidate],
    domain: &Domain,
    theme: Option<ThemeHint>,
) -> Option<String> {
    select_icon(candidates, theme).map(|icon| resolve_href(&icon.href, domain))
}

fn is_fetchable(candidate: &IconCandidate) -> bool {
    let href = href_path(candidate.href.trim_start());
    !REJECTED_SCHEMES.iter().any(|scheme| {
        href.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

fn is_dark_variant(candidate: &IconCandidate) -> bool {
    let href = candidate.href.to_ascii_lowercase();
    DARK_MARKERS.iter().any(|marker| href.contains(marker))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::candidate::ANY_SIZE;
    use crate::extract::extract_icon_links;

    fn selected_href(candidates: &[IconCandidate], theme: Option<ThemeHint>) -> Option<&str> {
        select_icon(candidates, theme).map(|c| c.href.as_str())
    }

    #[test]
    fn test_any_beats_fixed_sizes() {
        let html = r#"
            <link rel="icon" href="/16.png" sizes="16x16">
            <link rel="icon" href="/32.png" sizes="32x32">
            <link rel="icon" href="/any.png" sizes="any">
        "#;
        let candidates = extract_icon_links(html);
        let chosen = select_icon(&candidates, None).unwrap();
        assert_eq!(chosen.href, "/any.png");
        assert_eq!(chosen.declared_size(), ANY_SIZE);
    }

    #[test]
    fn test_svg_beats_large_bitmap() {
        let candidates = vec![
            IconCandidate::new("/apple.png").with_size_spec("180x180"),
            IconCandidate::new("/mark").with_mime_type("image/svg+xml"),
        ];
        assert_eq!(selected_href(&candidates, None), Some("/mark"));
    }

    #[test]
    fn test_first_svg_wins() {
        let candidates = vec![
            IconCandidate::new("/a.svg"),
            IconCandidate::new("/b.svg").with_size_spec("any"),
        ];
        assert_eq!(selected_href(&candidates, None), Some("/a.svg"));
    }

    #[test]
    fn test_theme_filter() {
        let candidates = vec![
            IconCandidate::new("logo.png"),
            IconCandidate::new("logo-dark.png"),
        ];
        assert_eq!(
            selected_href(&candidates, Some(ThemeHint::Dark)),
            Some("logo-dark.png")
        );
        assert_eq!(
            selected_href(&candidates, Some(ThemeHint::Light)),
            Some("logo.png")
        );
    }

    #[test]
    fn test_no_theme_keeps_both_variants() {
        let candidates = vec![
            IconCandidate::new("logo.png").with_size_spec("16x16"),
            IconCandidate::new("logo-dark.png").with_size_spec("64x64"),
        ];
        assert_eq!(selected_href(&candidates, None), Some("logo-dark.png"));
    }

    #[test]
    fn test_theme_filter_is_case_insensitive() {
        let candidates = vec![IconCandidate::new("/Logo_DARK.png")];
        assert_eq!(
            selected_href(&candidates, Some(ThemeHint::Dark)),
            Some("/Logo_DARK.png")
        );
        assert_eq!(selected_href(&candidates, Some(ThemeHint::Light)), None);
    }

    #[test]
    fn test_theme_filter_does_not_fall_back() {
        let candidates = vec![IconCandidate::new("/favicon.png")];
        assert_eq!(selected_href(&candidates, Some(ThemeHint::Dark)), None);
    }

    #[test]
    fn test_rejected_schemes_never_selected() {
        let candidates = vec![IconCandidate::new("data:image/png;base64,AAAA")];
        assert_eq!(selected_href(&candidates, None), None);

        let candidates = vec![IconCandidate::new("javascript:alert(1)")];
        assert_eq!(selected_href(&candidates, None), None);

        let candidates = vec![
            IconCandidate::new(" JavaScript:void(0)").with_size_spec("any"),
            IconCandidate::new("/real.ico"),
        ];
        assert_eq!(selected_href(&candidates, None), Some("/real.ico"));
    }

    #[test]
    fn test_ties_keep_document_order() {
        let candidates = vec![
            IconCandidate::new("/first.png").with_size_spec("32x32"),
            IconCandidate::new("/second.png").with_size_spec("32x32"),
            IconCandidate::new("/small.png").with_size_spec("16x16"),
        ];
        assert_eq!(selected_href(&candidates, None), Some("/first.png"));

        let no_sizes = vec![IconCandidate::new("/a.ico"), IconCandidate::new("/b.ico")];
        assert_eq!(selected_href(&no_sizes, None), Some("/a.ico"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(selected_href(&[], None), None);
        assert_eq!(selected_href(&[], Some(ThemeHint::Light)), None);
    }

    #[test]
    fn test_resolve_icon_url() {
        let domain = Domain::parse("example.com").unwrap();
        let candidates = vec![IconCandidate::new("/assets/icon.png")];
        assert_eq!(
            resolve_icon_url(&candidates, &domain, None).as_deref(),
            Some("https://example.com/assets/icon.png")
        );
        assert_eq!(resolve_icon_url(&[], &domain, None), None);
    }
}
