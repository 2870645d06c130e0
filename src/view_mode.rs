//! View selection for the device directory.
//!
//! The selector only decides which renderer reads the directory snapshot.
//! It owns no data and never triggers a fetch.

use std::fmt;
use std::str::FromStr;

/// How the device directory is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// One row per device in a table
    #[default]
    List,
    /// One card per device in a grid
    Card,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::List, ViewMode::Card];

    /// The other mode.
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Card,
            ViewMode::Card => ViewMode::List,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Card => "card",
        }
    }

    /// Label shown in the mode picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            ViewMode::List => "List View",
            ViewMode::Card => "Card View",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(ViewMode::List),
            "card" | "cards" => Ok(ViewMode::Card),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

/// Current view mode plus the operations a user can perform on it.
///
/// There are no transition guards: every mode is reachable from every
/// other at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSelector {
    mode: ViewMode,
}

impl ViewSelector {
    pub fn new(initial: ViewMode) -> Self {
        Self { mode: initial }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Select `mode`. Returns true if the mode changed.
    pub fn select(&mut self, mode: ViewMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn toggle(&mut self) -> ViewMode {
        self.mode = self.mode.toggle();
        self.mode
    }
}
