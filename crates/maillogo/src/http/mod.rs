//! HTTP surface.
//!
//! ```text
//! GET /api/logo/{domain}?theme={light|dark}
//! ```
//!
//! Authorisation happens in front of this router.

mod logo;

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::LogoError;
use crate::fetch::Fetcher;
use crate::service::LogoService;

pub use logo::CACHE_CONTROL_VALUE;

/// Builds the router serving logo requests.
pub fn router<F: Fetcher>(service: Arc<LogoService<F>>) -> Router {
    Router::new()
        .route("/api/logo", any(logo::missing_domain))
        .route("/api/logo/", any(logo::missing_domain))
        .route("/api/logo/{domain}", any(logo::logo::<F>))
        .with_state(service)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn panic_response(_: Box<dyn Any + Send + 'static>) -> Response {
    LogoError::Internal("Request handler panicked".to_string()).into_response()
}
