//! Outbound HTTP fetching.
//!
//! The orchestrator talks to upstream sites through the [`Fetcher`] trait so
//! it can be exercised without a network. [`HttpFetcher`] is the production
//! implementation backed by a pooled `reqwest` client.

use std::future::Future;

use bytes::{Bytes, BytesMut};
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, FetchError};

/// A single outbound GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Absolute URL to fetch.
    pub url: String,
    /// Value for the `Referer` header, if any.
    pub referer: Option<String>,
    /// Largest body accepted.
    pub max_body_bytes: usize,
    /// Keep the first `max_body_bytes` of a longer body instead of failing.
    pub truncate: bool,
}

impl FetchRequest {
    /// Creates a request without a referer.
    #[must_use]
    pub fn new(url: impl Into<String>, max_body_bytes: usize) -> Self {
        Self {
            url: url.into(),
            referer: None,
            max_body_bytes,
            truncate: false,
        }
    }

    /// Cuts an oversized body at `max_body_bytes` instead of rejecting it.
    #[must_use]
    pub const fn truncating(mut self) -> Self {
        self.truncate = true;
        self
    }

    /// Sets the `Referer` header.
    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }
}

/// Response to a [`FetchRequest`].
#[derive(Debug, Clone)]
pub struct FetchResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl FetchResponse {
    /// Creates a response.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Looks up a header by name. Values that are not visible ASCII are
    /// treated as absent.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the response, returning the body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Fails with [`FetchError::Status`] unless the status is 2xx.
    ///
    /// # Errors
    ///
    /// Returns an error for non-2xx statuses.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status(self.status.as_u16()))
        }
    }
}

/// Performs outbound GET requests.
pub trait Fetcher: Send + Sync + 'static {
    /// Fetches `request.url`.
    ///
    /// Any HTTP status is returned as a response; only transport failures
    /// and oversized bodies are errors. Truncating requests never fail on
    /// size and return at most `max_body_bytes` bytes.
    fn fetch(
        &self,
        request: FetchRequest,
    ) -> impl Future<Output = Result<FetchResponse, FetchError>> + Send;
}

/// [`Fetcher`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the HTTP client from the configured timeouts and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let mut builder = self.client.get(&request.url);
        if let Some(referer) = &request.referer {
            let value = HeaderValue::from_str(referer)
                .map_err(|_| FetchError::InvalidHeader(format!("Referer: {referer}")))?;
            builder = builder.header(REFERER, value);
        }

        let mut response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        debug!(url = %request.url, status = status.as_u16(), "Upstream responded");

        // Error bodies are never used.
        if !status.is_success() {
            return Ok(FetchResponse::new(status, headers, Bytes::new()));
        }

        let limit = request.max_body_bytes;
        let declared_limit = u64::try_from(limit).unwrap_or(u64::MAX);
        if !request.truncate && response.content_length().is_some_and(|len| len > declared_limit)
        {
            return Err(FetchError::BodyTooLarge(limit));
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            let room = limit - body.len();
            if chunk.len() > room {
                if !request.truncate {
                    return Err(FetchError::BodyTooLarge(limit));
                }
                body.extend_from_slice(&chunk[..room]);
                debug!(url = %request.url, limit, "Body truncated");
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchResponse::new(status, headers, body.freeze()))
    }
}
