//! Command-line interface.
//!
//! Parse early in `main()`; informational commands are handled here and
//! everything else is dispatched by the binary.
//!
//! ```ignore
//! use fleetdash::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! if run_cli_command(&command) {
//!     return Ok(());
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, CliError, CliOptions};
pub use version::{version_line, USAGE, VERSION};

/// Print output for informational commands.
///
/// Returns true if the command was handled and the process should exit.
pub fn run_cli_command(command: &CliCommand) -> bool {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            true
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            true
        }
        CliCommand::Proxy(_) | CliCommand::RunTui(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_tui_is_not_handled() {
        assert!(!run_cli_command(&CliCommand::RunTui(CliOptions::default())));
        assert!(!run_cli_command(&CliCommand::Proxy(CliOptions::default())));
    }
}
