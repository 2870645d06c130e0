//! Terminal ownership for the TUI.
//!
//! [`TerminalManager`] puts the terminal into raw mode on the alternate
//! screen and puts it back exactly once, either through
//! [`TerminalManager::restore`] or on drop. Install [`setup_panic_hook`]
//! before creating it so a panic restores the terminal too.

mod panic;
mod setup;

pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

pub type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

pub struct TerminalManager {
    terminal: DashboardTerminal,
    restored: bool,
}

impl TerminalManager {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(e) = enter_tui_mode(&mut stdout) {
            leave_tui_mode(&mut stdout);
            return Err(e.into());
        }

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        tracing::debug!("Entered alternate screen");

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal(&mut self) -> &mut DashboardTerminal {
        &mut self.terminal
    }

    /// Restore the terminal now instead of on drop.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        leave_tui_mode(&mut io::stdout());
        self.terminal.show_cursor()?;
        tracing::debug!("Terminal restored");
        Ok(())
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        if !self.restored {
            self.restored = true;
            leave_tui_mode(&mut io::stdout());
        }
    }
}
