//! Logo resolution.
//!
//! [`LogoService`] drives a request through its stages:
//!
//! ```text
//! Init -> FetchHtml -> ExtractSelect -> FetchIcon -> Respond
//! ```
//!
//! A failed root page fetch or an empty selection falls back to
//! `/favicon.ico`. Only a failed icon fetch ends the request without bytes.

use std::fmt;

use bytes::Bytes;
use maillogo_icon::{
    Domain, ThemeHint, extract_icon_links, resolve_content_type, resolve_icon_url,
};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::LogoError;
use crate::fetch::{FetchRequest, FetchResponse, Fetcher};

/// Request stage, recorded in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Validating input.
    Init,
    /// Fetching the domain's root page.
    FetchHtml,
    /// Extracting and selecting icon links.
    ExtractSelect,
    /// Fetching icon bytes.
    FetchIcon,
    /// Building the response.
    Respond,
}

impl Stage {
    /// Returns the stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::FetchHtml => "fetch_html",
            Self::ExtractSelect => "extract_select",
            Self::FetchIcon => "fetch_icon",
            Self::Respond => "respond",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fetched icon, ready to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    /// URL the bytes were fetched from.
    pub url: String,
    /// Content type to serve.
    pub content_type: String,
    /// Icon bytes.
    pub bytes: Bytes,
}

/// Resolves and fetches logos for sender domains.
///
/// Holds no per-request state; one instance serves all requests.
#[derive(Debug, Clone)]
pub struct LogoService<F> {
    fetcher: F,
    max_html_bytes: usize,
    max_icon_bytes: usize,
}

impl<F: Fetcher> LogoService<F> {
    /// Creates a service using the body limits from `config`.
    #[must_use]
    pub const fn new(fetcher: F, config: &Config) -> Self {
        Self {
            fetcher,
            max_html_bytes: config.max_html_bytes,
            max_icon_bytes: config.max_icon_bytes,
        }
    }

    /// Resolves a logo from raw request parameters.
    ///
    /// # Errors
    ///
    /// Returns [`LogoError::MissingDomain`] or [`LogoError::InvalidDomain`]
    /// for bad input, and [`LogoError::NotFound`] when no icon could be fetched.
    pub async fn resolve_raw(
        &self,
        domain: Option<&str>,
        theme: Option<&str>,
    ) -> Result<Logo, LogoError> {
        let domain = domain.ok_or(LogoError::MissingDomain)?;
        let domain = Domain::parse(domain).map_err(|e| {
            debug!(stage = %Stage::Init, error = %e, "Rejected domain parameter");
            LogoError::InvalidDomain(e)
        })?;
        let theme = theme.and_then(ThemeHint::parse);
        self.resolve(&domain, theme).await
    }

    /// Resolves and fetches the best icon for `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`LogoError::NotFound`] when neither the selected icon nor the
    /// fallback could be fetched.
    #[instrument(skip_all, fields(domain = %domain, theme = ?theme))]
    pub async fn resolve(
        &self,
        domain: &Domain,
        theme: Option<ThemeHint>,
    ) -> Result<Logo, LogoError> {
        let url = match self.discover_icon_url(domain, theme).await {
            Some(url) => url,
            None => {
                debug!(stage = %Stage::ExtractSelect, "No usable icon link, using /favicon.ico");
                domain.favicon_url()
            }
        };

        let request = FetchRequest::new(&url, self.max_icon_bytes).with_referer(domain.referer());
        let response = self
            .fetcher
            .fetch(request)
            .await
            .and_then(FetchResponse::error_for_status)
            .map_err(|e| {
                warn!(stage = %Stage::FetchIcon, %url, error = %e, "Icon fetch failed");
                LogoError::NotFound
            })?;

        let content_type = resolve_content_type(response.header(CONTENT_TYPE.as_str()), &url);
        debug!(stage = %Stage::Respond, %url, %content_type, "Icon fetched");

        Ok(Logo {
            url,
            content_type,
            bytes: response.into_body(),
        })
    }

    /// Finds the icon URL declared on the domain's root page, if any.
    async fn discover_icon_url(&self, domain: &Domain, theme: Option<ThemeHint>) -> Option<String> {
        let html = self.fetch_html(domain).await?;
        let candidates = extract_icon_links(&html);
        debug!(stage = %Stage::ExtractSelect, candidates = candidates.len(), "Scanned root page");
        resolve_icon_url(&candidates, domain, theme)
    }

    /// Fetches the root page. Every failure means "no HTML".
    ///
    /// Pages longer than `max_html_bytes` are cut rather than rejected;
    /// icon links live in `<head>`.
    async fn fetch_html(&self, domain: &Domain) -> Option<String> {
        let url = domain.root_url();
        let request = FetchRequest::new(&url, self.max_html_bytes).truncating();

        match self
            .fetcher
            .fetch(request)
            .await
            .and_then(FetchResponse::error_for_status)
        {
            Ok(response) => Some(String::from_utf8_lossy(response.body()).into_owned()),
            Err(e) => {
                warn!(stage = %Stage::FetchHtml, %url, error = %e, "Root page unavailable");
                None
            }
        }
    }
}
