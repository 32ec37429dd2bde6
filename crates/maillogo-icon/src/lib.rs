//! # maillogo-icon
//!
//! Favicon discovery and selection for email sender domains.
//!
//! ## Features
//!
//! - **Extraction**: Tolerant scanning of `<link rel="icon">` declarations in untrusted HTML
//! - **Selection**: Validity, theme, format and size heuristics over competing icons
//! - **Resolution**: Relative `href` values resolved against the sender domain
//! - **Content types**: MIME type from upstream headers or a file-suffix table
//!
//! This crate performs no I/O. Fetching pages and icon bytes is left to the caller.
//!
//! ## Quick Start
//!
//! ```ignore
//! use maillogo_icon::{Domain, ThemeHint, extract_icon_links, resolve_icon_url};
//!
//! let domain = Domain::parse("example.com")?;
//! let html = r#"<link rel="icon" href="/favicon-32.png" sizes="32x32">"#;
//!
//! let candidates = extract_icon_links(html);
//! let url = resolve_icon_url(&candidates, &domain, Some(ThemeHint::Light))
//!     .unwrap_or_else(|| domain.favicon_url());
//!
//! assert_eq!(url, "https://example.com/favicon-32.png");
//! ```
//!
//! ### Sender domains
//!
//! ```ignore
//! use maillogo_icon::sender_domain;
//!
//! let domain = sender_domain("Alerts@News.Mail.Example.com").unwrap();
//! assert_eq!(domain.as_str(), "example.com");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod candidate;
mod content_type;
mod domain;
mod error;
mod extract;
mod resolve;
mod select;

pub use candidate::{ANY_SIZE, IconCandidate};
pub use content_type::{OCTET_STREAM, content_type_from_extension, resolve_content_type};
pub use domain::{Domain, ThemeHint, sender_domain};
pub use error::{DomainError, Result};
pub use extract::{ICON_RELATIONS, IconLinks, extract_icon_links};
pub use resolve::resolve_href;
pub use select::{resolve_icon_url, select_icon};
