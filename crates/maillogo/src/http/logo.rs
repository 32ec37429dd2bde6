//! Logo endpoint handlers.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderValue, Method, header};
use axum::response::{IntoResponse, Response};

use crate::error::LogoError;
use crate::fetch::Fetcher;
use crate::service::{Logo, LogoService};

/// `Cache-Control` sent with every icon; icons change rarely.
pub const CACHE_CONTROL_VALUE: &str = "max-age=315360000";

/// `GET /api/logo/{domain}`.
pub(super) async fn logo<F: Fetcher>(
    State(service): State<Arc<LogoService<F>>>,
    method: Method,
    domain: Result<Path<String>, PathRejection>,
    RawQuery(query): RawQuery,
) -> Response {
    if method != Method::GET {
        return LogoError::MethodNotAllowed.into_response();
    }

    let domain = domain.ok().map(|Path(domain)| domain);
    let theme = query.as_deref().and_then(theme_param);

    match service.resolve_raw(domain.as_deref(), theme.as_deref()).await {
        Ok(logo) => logo.into_response(),
        Err(e) => e.into_response(),
    }
}

/// `/api/logo` with no domain segment.
pub(super) async fn missing_domain(method: Method) -> LogoError {
    if method == Method::GET {
        LogoError::MissingDomain
    } else {
        LogoError::MethodNotAllowed
    }
}

/// Returns the first `theme` query parameter.
fn theme_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "theme")
        .map(|(_, value)| value.into_owned())
}

impl IntoResponse for Logo {
    fn into_response(self) -> Response {
        let Ok(content_type) = HeaderValue::from_str(&self.content_type) else {
            return LogoError::Internal(format!(
                "Unencodable content type {:?} from {}",
                self.content_type, self.url
            ))
            .into_response();
        };

        (
            [
                (header::CONTENT_TYPE, content_type),
                (header::CONTENT_LENGTH, HeaderValue::from(self.bytes.len())),
                (
                    header::CACHE_CONTROL,
                    HeaderValue::from_static(CACHE_CONTROL_VALUE),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn test_theme_param() {
        assert_eq!(theme_param("theme=dark").as_deref(), Some("dark"));
        assert_eq!(theme_param("a=1&theme=light&theme=dark").as_deref(), Some("light"));
        assert_eq!(theme_param("theme=%64ark").as_deref(), Some("dark"));
        assert_eq!(theme_param("other=1"), None);
        assert_eq!(theme_param(""), None);
    }

    #[test]
    fn test_logo_response_headers() {
        let response = Logo {
            url: "https://example.com/favicon.ico".to_string(),
            content_type: "image/x-icon".to_string(),
            bytes: Bytes::from_static(b"0123456789"),
        }
        .into_response();

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "image/x-icon");
        assert_eq!(headers[header::CONTENT_LENGTH], "10");
        assert_eq!(headers[header::CACHE_CONTROL], CACHE_CONTROL_VALUE);
    }

    #[test]
    fn test_unencodable_content_type_is_internal() {
        let response = Logo {
            url: "https://example.com/x".to_string(),
            content_type: "image/png\n".to_string(),
            bytes: Bytes::new(),
        }
        .into_response();
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
