//! Error types for the logo service.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use maillogo_icon::DomainError;

/// Result type alias for service startup.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while starting the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error, e.g. binding the listener.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure of a single outbound fetch.
///
/// These never reach the caller directly; the orchestrator turns each one
/// into the next fallback step.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure, timeout, or TLS error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-2xx status.
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// The body exceeded the configured limit.
    #[error("Response body exceeds {0} bytes")]
    BodyTooLarge(usize),

    /// A request header could not be encoded.
    #[error("Invalid request header: {0}")]
    InvalidHeader(String),
}

/// Outcome of a logo request that did not produce an icon.
#[derive(Debug, thiserror::Error)]
pub enum LogoError {
    /// No domain was supplied.
    #[error("Domain parameter is required")]
    MissingDomain,

    /// The domain is not a bare hostname.
    #[error("Invalid domain: {0}")]
    InvalidDomain(#[from] DomainError),

    /// The request used a method other than GET.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Every fallback tier failed.
    #[error("Icon not found")]
    NotFound,

    /// Unexpected failure. The detail is logged, never sent to the caller.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LogoError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingDomain | Self::InvalidDomain(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message sent to the caller.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::MissingDomain | Self::InvalidDomain(_) => "Domain parameter is required",
            Self::MethodNotAllowed => "Method not allowed",
            Self::NotFound => "Icon not found",
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for LogoError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            tracing::error!(%detail, "Logo request failed");
        }

        let body = Json(serde_json::json!({ "error": self.public_message() }));
        let mut response = (self.status(), body).into_response();
        if matches!(self, Self::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET"));
        }
        response
    }
}
