//! `--version` and `--help` output.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: fleetdash [OPTIONS]

Terminal dashboard for fleet IoT devices.

Options:
  --backend <URL>      Backend base URL (default: http://localhost:3000)
  --interval <MS>      Poll interval in milliseconds (default: 5000)
  --device <ID>        Open the detail view for a device
  --card               Start in card view
  --list               Start in list view
  --no-click-through   Disable opening details from the list
  --proxy [ADDR]       Run the HTTP proxy instead of the TUI (default: 127.0.0.1:3001)
  -V, --version        Print version
  -h, --help           Print this help

Environment:
  FLEETDASH_BACKEND_URL, FLEETDASH_POLL_INTERVAL_MS, FLEETDASH_CLICK_THROUGH,
  FLEETDASH_PROXY_ADDR, FLEETDASH_VIEW, FLEETDASH_LOG";

pub fn version_line() -> String {
    format!("fleetdash {}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        assert!(version_line().starts_with("fleetdash "));
    }

    #[test]
    fn test_usage_lists_proxy() {
        assert!(USAGE.contains("--proxy"));
    }
}
