//! Runtime configuration.
//!
//! Settings come from the environment (see [`DashboardConfig::from_env`])
//! and can be overridden by command-line flags through the `with_*`
//! builders.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::view_mode::ViewMode;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_PROXY_ADDR: &str = "127.0.0.1:3001";

pub const ENV_BACKEND_URL: &str = "FLEETDASH_BACKEND_URL";
/// Fallback honoured for compatibility with existing deployments.
pub const ENV_BACKEND_URL_FALLBACK: &str = "BACKEND_URL";
pub const ENV_POLL_INTERVAL_MS: &str = "FLEETDASH_POLL_INTERVAL_MS";
pub const ENV_CLICK_THROUGH: &str = "FLEETDASH_CLICK_THROUGH";
pub const ENV_PROXY_ADDR: &str = "FLEETDASH_PROXY_ADDR";
pub const ENV_VIEW: &str = "FLEETDASH_VIEW";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Base URL of the inventory/twin backend, without trailing slash
    pub backend_url: String,
    /// Interval between polls for both directory and detail
    pub poll_interval: Duration,
    /// Whether Enter on a directory row opens the detail view
    pub click_through: bool,
    /// Listen address for `--proxy`
    pub proxy_addr: SocketAddr,
    /// View mode on startup
    pub initial_view: ViewMode,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            click_through: true,
            proxy_addr: DEFAULT_PROXY_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3001))),
            initial_view: ViewMode::List,
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = normalize_base_url(&url.into());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_click_through(mut self, enabled: bool) -> Self {
        self.click_through = enabled;
        self
    }

    pub fn with_proxy_addr(mut self, addr: SocketAddr) -> Self {
        self.proxy_addr = addr;
        self
    }

    pub fn with_initial_view(mut self, mode: ViewMode) -> Self {
        self.initial_view = mode;
        self
    }

    /// Build from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_BACKEND_URL).or_else(|| get(ENV_BACKEND_URL_FALLBACK)) {
            config = config.with_backend_url(url);
        }

        if let Some(raw) = get(ENV_POLL_INTERVAL_MS) {
            config.poll_interval = parse_interval_ms(ENV_POLL_INTERVAL_MS, &raw)?;
        }

        if let Some(raw) = get(ENV_CLICK_THROUGH) {
            config.click_through = parse_flag(ENV_CLICK_THROUGH, &raw)?;
        }

        if let Some(raw) = get(ENV_PROXY_ADDR) {
            config.proxy_addr = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(ENV_PROXY_ADDR, &raw, "expected host:port"))?;
        }

        if let Some(raw) = get(ENV_VIEW) {
            config.initial_view = raw
                .parse()
                .map_err(|e: String| ConfigError::invalid(ENV_VIEW, &raw, e))?;
        }

        Ok(config)
    }
}

/// Strip whitespace and trailing slashes so paths can be appended with `/`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Parse a poll interval in milliseconds. Zero is rejected.
pub fn parse_interval_ms(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let ms: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, raw, "expected milliseconds"))?;
    if ms == 0 {
        return Err(ConfigError::invalid(key, raw, "must be greater than zero"));
    }
    Ok(Duration::from_millis(ms))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::invalid(key, raw, "expected true/false")),
    }
}
