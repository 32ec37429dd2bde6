//! Icon candidates discovered in markup.

/// Score given to icons declared with `sizes="any"`.
pub const ANY_SIZE: u32 = u32::MAX;

const SVG_MIME: &str = "image/svg+xml";

/// One icon declaration found in a page, in the form it was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCandidate {
    /// The `href` attribute, untouched.
    pub href: String,
    /// The `type` attribute, if declared.
    pub mime_type: Option<String>,
    /// The `sizes` attribute, if declared (e.g. `32x32` or `any`).
    pub size_spec: Option<String>,
}

impl IconCandidate {
    /// Creates a candidate with only an `href`.
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            mime_type: None,
            size_spec: None,
        }
    }

    /// Sets the declared MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Sets the declared sizes.
    #[must_use]
    pub fn with_size_spec(mut self, size_spec: impl Into<String>) -> Self {
        self.size_spec = Some(size_spec.into());
        self
    }

    /// Returns true if the icon is declared or named as SVG.
    #[must_use]
    pub fn is_svg(&self) -> bool {
        let declared = self
            .mime_type
            .as_deref()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(SVG_MIME));

        declared || href_path(&self.href).to_ascii_lowercase().ends_with(".svg")
    }

    /// Returns the size score used for ranking bitmap icons.
    ///
    /// `any` on its own scores [`ANY_SIZE`]; otherwise the first square
    /// `NxN` token scores `N`. Anything else scores 0, so `any` listed
    /// alongside concrete sizes does not count.
    #[must_use]
    pub fn declared_size(&self) -> u32 {
        let Some(spec) = self.size_spec.as_deref() else {
            return 0;
        };
        if spec.trim().eq_ignore_ascii_case("any") {
            return ANY_SIZE;
        }
        spec.split_ascii_whitespace()
            .find_map(parse_square_size)
            .unwrap_or(0)
    }
}

fn parse_square_size(token: &str) -> Option<u32> {
    let (width, height) = token.split_once(['x', 'X'])?;
    if !is_digits(width) || width != height {
        return None;
    }
    width.parse().ok()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the `href` with any query string or fragment removed.
pub(crate) fn href_path(href: &str) -> &str {
    href.split(['?', '#']).next().unwrap_or(href)
}
