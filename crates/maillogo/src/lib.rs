//! # maillogo
//!
//! HTTP service that serves a logo for an email sender's domain.
//!
//! ## Features
//!
//! - **Discovery**: Reads the domain's root page and picks its best icon declaration
//! - **Theming**: Honours a light/dark hint when a site ships both variants
//! - **Fallbacks**: Falls back to `/favicon.ico` whenever the page yields nothing
//! - **Caching**: Icons are served with a long-lived `Cache-Control` header
//!
//! ## Quick Start
//!
//! ```ignore
//! use maillogo::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     maillogo::init_tracing();
//!     let config = Config::from_env()?;
//!     maillogo::serve(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! ### Embedding the router
//!
//! ```ignore
//! use std::sync::Arc;
//! use maillogo::{Config, HttpFetcher, LogoService, router};
//!
//! let config = Config::default();
//! let service = Arc::new(LogoService::new(HttpFetcher::new(&config)?, &config));
//! let app = axum::Router::new().merge(router(service));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
mod error;
pub mod fetch;
pub mod http;
mod logging;
mod service;
mod shutdown;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, FetchError, LogoError, Result};
pub use fetch::{FetchRequest, FetchResponse, Fetcher, HttpFetcher};
pub use http::router;
pub use logging::{DEFAULT_FILTER, init_tracing};
pub use service::{Logo, LogoService, Stage};
pub use shutdown::shutdown_signal;

/// Runs the logo service until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the listener
/// cannot be bound.
pub async fn serve(config: Config) -> Result<()> {
    let fetcher = HttpFetcher::new(&config)?;
    let service = Arc::new(LogoService::new(fetcher, &config));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Stopped");
    Ok(())
}
