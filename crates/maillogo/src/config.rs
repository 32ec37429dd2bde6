//! Service configuration.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Logo service configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Upper bound on each outbound fetch, body included.
    #[serde(with = "duration_secs")]
    pub fetch_timeout: Duration,
    /// Upper bound on establishing an outbound connection.
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,
    /// Largest root page read while looking for icon links.
    pub max_html_bytes: usize,
    /// Largest icon served.
    pub max_icon_bytes: usize,
    /// `User-Agent` sent upstream.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_BIND),
            fetch_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            max_html_bytes: 2 * 1024 * 1024,
            max_icon_bytes: 1024 * 1024,
            user_agent: concat!("maillogo/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Creates a configuration builder starting from the defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Loads the configuration from `MAILLOGO_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = ConfigBuilder::new();

        if let Some(addr) = parse_var(&lookup, "MAILLOGO_BIND")? {
            builder = builder.bind_addr(addr);
        }
        if let Some(secs) = parse_var(&lookup, "MAILLOGO_FETCH_TIMEOUT_SECS")? {
            builder = builder.fetch_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = parse_var(&lookup, "MAILLOGO_CONNECT_TIMEOUT_SECS")? {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(bytes) = parse_var(&lookup, "MAILLOGO_MAX_HTML_BYTES")? {
            builder = builder.max_html_bytes(bytes);
        }
        if let Some(bytes) = parse_var(&lookup, "MAILLOGO_MAX_ICON_BYTES")? {
            builder = builder.max_icon_bytes(bytes);
        }
        if let Some(agent) = lookup("MAILLOGO_USER_AGENT").filter(|a| !a.trim().is_empty()) {
            builder = builder.user_agent(agent);
        }

        Ok(builder.build())
    }
}

fn parse_var<T>(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}")))
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a builder holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the listen address.
    #[must_use]
    pub const fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.config.bind_addr = addr;
        self
    }

    /// Sets the per-fetch timeout.
    #[must_use]
    pub const fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Sets the root page size limit.
    #[must_use]
    pub const fn max_html_bytes(mut self, bytes: usize) -> Self {
        self.config.max_html_bytes = bytes;
        self
    }

    /// Sets the icon size limit.
    #[must_use]
    pub const fn max_icon_bytes(mut self, bytes: usize) -> Self {
        self.config.max_icon_bytes = bytes;
        self
    }

    /// Sets the upstream `User-Agent`.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}

/// Serde helpers for durations written as whole seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.max_html_bytes, 2 * 1024 * 1024);
        assert!(config.user_agent.starts_with("maillogo/"));
    }

    #[test]
    fn test_builder() {
        let config = Config::builder()
            .fetch_timeout(Duration::from_secs(3))
            .max_icon_bytes(512)
            .user_agent("test-agent")
            .build();
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.max_icon_bytes, 512);
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MAILLOGO_BIND", "0.0.0.0:8080"),
            ("MAILLOGO_FETCH_TIMEOUT_SECS", " 7 "),
            ("MAILLOGO_MAX_HTML_BYTES", "1024"),
            ("MAILLOGO_USER_AGENT", "custom/1.0"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.fetch_timeout, Duration::from_secs(7));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.max_html_bytes, 1024);
        assert_eq!(config.user_agent, "custom/1.0");
    }

    #[test]
    fn test_env_invalid_value() {
        let err = Config::from_lookup(lookup_from(&[("MAILLOGO_MAX_ICON_BYTES", "lots")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("MAILLOGO_MAX_ICON_BYTES")));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config =
            serde_json::from_str(r#"{"fetch_timeout": 2, "max_icon_bytes": 4096}"#).unwrap();
        assert_eq!(config.fetch_timeout, Duration::from_secs(2));
        assert_eq!(config.max_icon_bytes, 4096);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }
}
