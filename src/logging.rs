//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so in that mode logs go to a file under the
//! user cache directory. Proxy mode logs to stderr.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "FLEETDASH_LOG";
const ENV_LOG_FALLBACK: &str = "RUST_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// `<cache dir>/fleetdash/fleetdash.log`, or `None` without a cache dir.
    pub fn default_file() -> Option<Self> {
        dirs::cache_dir().map(|dir| LogTarget::File(dir.join("fleetdash").join("fleetdash.log")))
    }
}

/// Build the filter from `FLEETDASH_LOG`, then `RUST_LOG`, then `info`.
pub fn build_filter(lookup: impl Fn(&str) -> Option<String>) -> EnvFilter {
    let directive = lookup(ENV_LOG)
        .or_else(|| lookup(ENV_LOG_FALLBACK))
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string());

    EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter '{}': {}", directive, e);
        EnvFilter::new(DEFAULT_DIRECTIVE)
    })
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(target: LogTarget) -> std::io::Result<()> {
    let filter = build_filter(|key| std::env::var(key).ok());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
    Ok(())
}

/// Like [`init`], but a log file that cannot be opened only costs the
/// logs. Returns false if logging was not set up.
pub fn init_or_warn(target: LogTarget) -> bool {
    let description = match &target {
        LogTarget::Stderr => "stderr".to_string(),
        LogTarget::File(path) => path.display().to_string(),
    };
    match init(target) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Logging disabled: cannot open {}: {}", description, e);
            false
        }
    }
}
