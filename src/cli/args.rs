//! Command-line argument parsing.
//!
//! Flags override the environment; see [`CliOptions::apply`].

use std::iter::Peekable;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::config::{parse_interval_ms, DashboardConfig};
use crate::view_mode::ViewMode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("invalid value for {flag}: {reason}")]
    InvalidValue { flag: &'static str, reason: String },
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Overrides collected from flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub backend_url: Option<String>,
    pub poll_interval: Option<Duration>,
    pub device: Option<String>,
    pub view: Option<ViewMode>,
    pub click_through: Option<bool>,
    pub proxy_addr: Option<SocketAddr>,
}

impl CliOptions {
    /// Layer these overrides on top of `config`.
    pub fn apply(&self, mut config: DashboardConfig) -> DashboardConfig {
        if let Some(url) = &self.backend_url {
            config = config.with_backend_url(url.as_str());
        }
        if let Some(interval) = self.poll_interval {
            config = config.with_poll_interval(interval);
        }
        if let Some(view) = self.view {
            config = config.with_initial_view(view);
        }
        if let Some(enabled) = self.click_through {
            config = config.with_click_through(enabled);
        }
        if let Some(addr) = self.proxy_addr {
            config = config.with_proxy_addr(addr);
        }
        config
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Version,
    Help,
    /// Serve the HTTP proxy
    Proxy(CliOptions),
    /// Run the TUI application (default)
    RunTui(CliOptions),
}

fn value<I: Iterator<Item = String>>(
    args: &mut Peekable<I>,
    flag: &'static str,
) -> Result<String, CliError> {
    match args.next() {
        Some(v) if !v.starts_with('-') => Ok(v),
        _ => Err(CliError::MissingValue(flag)),
    }
}

/// Take the next argument as-is, even if it starts with `-`.
fn raw_value<I: Iterator<Item = String>>(
    args: &mut Peekable<I>,
    flag: &'static str,
) -> Result<String, CliError> {
    args.next()
        .filter(|v| !v.is_empty())
        .ok_or(CliError::MissingValue(flag))
}

fn socket_addr(flag: &'static str, raw: &str) -> Result<SocketAddr, CliError> {
    raw.parse().map_err(|e: std::net::AddrParseError| CliError::InvalidValue {
        flag,
        reason: e.to_string(),
    })
}

/// Parse command-line arguments, program name included.
///
/// ```
/// use fleetdash::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["fleetdash".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, CliError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1).peekable();
    let mut options = CliOptions::default();
    let mut proxy = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--backend" => options.backend_url = Some(value(&mut args, "--backend")?),
            "--interval" => {
                let raw = value(&mut args, "--interval")?;
                let interval = parse_interval_ms("--interval", &raw).map_err(|e| {
                    CliError::InvalidValue {
                        flag: "--interval",
                        reason: e.to_string(),
                    }
                })?;
                options.poll_interval = Some(interval);
            }
            "--device" => options.device = Some(raw_value(&mut args, "--device")?),
            "--card" => options.view = Some(ViewMode::Card),
            "--list" => options.view = Some(ViewMode::List),
            "--no-click-through" => options.click_through = Some(false),
            "--proxy" => {
                proxy = true;
                if let Some(next) = args.next_if(|next| !next.starts_with('-')) {
                    options.proxy_addr = Some(socket_addr("--proxy", &next)?);
                }
            }
            other => return Err(CliError::UnknownArgument(other.to_string())),
        }
    }

    Ok(if proxy {
        CliCommand::Proxy(options)
    } else {
        CliCommand::RunTui(options)
    })
}
