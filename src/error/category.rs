//! High-level error categories.

use std::fmt;

/// Coarse classification used for logging and for picking a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The request never produced a response (connect, timeout).
    Network,
    /// The backend answered with a structured error payload or a 5xx.
    Upstream,
    /// The backend answered 404.
    NotFound,
    /// The backend answered with a body we could not decode.
    Decode,
    /// The caller supplied bad input (e.g. a malformed identifier).
    Client,
    /// Missing or invalid settings.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if polling again later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Upstream)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Upstream => "upstream",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Client => "client",
            ErrorCategory::Configuration => "configuration",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_categories() {
        assert!(ErrorCategory::Network.is_transient());
        assert!(ErrorCategory::Upstream.is_transient());
        assert!(!ErrorCategory::NotFound.is_transient());
        assert!(!ErrorCategory::Client.is_transient());
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(ErrorCategory::NotFound.to_string(), "not_found");
    }
}
