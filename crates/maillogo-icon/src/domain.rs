//! Sender domains and theme hints.

use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, Result};

/// Maximum length of a DNS name in presentation form.
const MAX_DOMAIN_LEN: usize = 253;

/// Characters that never appear in a bare hostname and would change
/// the meaning of the URLs built from it.
const FORBIDDEN: &[char] = &['/', '\\', '?', '#', '@'];

/// A validated, lowercased bare hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    /// Parses a bare hostname.
    ///
    /// Surrounding whitespace and a single trailing `.` are removed and the
    /// result is lowercased.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, or contains
    /// whitespace, control characters or URL delimiters.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);

        if trimmed.is_empty() {
            return Err(DomainError::Empty);
        }
        if trimmed.len() > MAX_DOMAIN_LEN {
            return Err(DomainError::TooLong(trimmed.len()));
        }
        if let Some(c) = trimmed
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN.contains(c))
        {
            return Err(DomainError::InvalidCharacter(c));
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// Returns the hostname.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the root page URL, `https://{domain}`.
    #[must_use]
    pub fn root_url(&self) -> String {
        format!("https://{}", self.0)
    }

    /// Returns the `Referer` sent with icon requests, `https://{domain}/`.
    #[must_use]
    pub fn referer(&self) -> String {
        format!("https://{}/", self.0)
    }

    /// Returns the conventional fallback icon URL.
    #[must_use]
    pub fn favicon_url(&self) -> String {
        format!("https://{}/favicon.ico", self.0)
    }
}

impl FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the organisational domain of an email address.
///
/// Takes everything after the first `@`, lowercases it, and keeps the last
/// two labels, so `alerts@news.mail.example.com` yields `example.com`.
#[must_use]
pub fn sender_domain(address: &str) -> Option<Domain> {
    let (_, host) = address.trim().split_once('@')?;
    let host = host.trim_end_matches('>').to_lowercase();

    let labels: Vec<&str> = host.split('.').collect();
    let start = labels.len().saturating_sub(2);
    Domain::parse(&labels[start..].join(".")).ok()
}

/// Caller preference for light or dark icon variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeHint {
    /// Prefer icons without a dark marker.
    Light,
    /// Prefer icons with a dark marker.
    Dark,
}

impl ThemeHint {
    /// Parses a theme name case-insensitively. Unknown names yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("light") {
            Some(Self::Light)
        } else if s.eq_ignore_ascii_case("dark") {
            Some(Self::Dark)
        } else {
            None
        }
    }

    /// Returns the theme name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let domain = Domain::parse("  Example.COM. ").unwrap();
        assert_eq!(domain.as_str(), "example.com");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Domain::parse(""), Err(DomainError::Empty));
        assert_eq!(Domain::parse("   "), Err(DomainError::Empty));
        assert_eq!(Domain::parse("."), Err(DomainError::Empty));
    }

    #[test]
    fn test_parse_rejects_url_shapes() {
        assert_eq!(
            Domain::parse("https://example.com"),
            Err(DomainError::InvalidCharacter('/'))
        );
        assert_eq!(
            Domain::parse("evil.com@example.com"),
            Err(DomainError::InvalidCharacter('@'))
        );
        assert_eq!(
            Domain::parse("exa mple.com"),
            Err(DomainError::InvalidCharacter(' '))
        );
        assert_eq!(
            Domain::parse("example.com?x"),
            Err(DomainError::InvalidCharacter('?'))
        );
    }

    #[test]
    fn test_parse_rejects_long() {
        let long = "a".repeat(254);
        assert_eq!(Domain::parse(&long), Err(DomainError::TooLong(254)));
    }

    #[test]
    fn test_urls() {
        let domain: Domain = "example.com".parse().unwrap();
        assert_eq!(domain.root_url(), "https://example.com");
        assert_eq!(domain.referer(), "https://example.com/");
        assert_eq!(domain.favicon_url(), "https://example.com/favicon.ico");
        assert_eq!(domain.to_string(), "example.com");
    }

    #[test]
    fn test_sender_domain() {
        assert_eq!(
            sender_domain("Alerts@News.Mail.Example.com").unwrap().as_str(),
            "example.com"
        );
        assert_eq!(
            sender_domain("user@example.org").unwrap().as_str(),
            "example.org"
        );
        assert_eq!(sender_domain("root@localhost").unwrap().as_str(), "localhost");
        assert!(sender_domain("no-at-sign").is_none());
        assert!(sender_domain("user@").is_none());
    }

    #[test]
    fn test_theme_hint_parse() {
        assert_eq!(ThemeHint::parse("dark"), Some(ThemeHint::Dark));
        assert_eq!(ThemeHint::parse("LIGHT"), Some(ThemeHint::Light));
        assert_eq!(ThemeHint::parse("sepia"), None);
        assert_eq!(ThemeHint::parse(""), None);
    }
}
