//! Type definitions for the application state.

/// Which screen is currently displayed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// Directory snapshot, as list or cards
    #[default]
    Devices,
    /// One device's twin
    Detail(String),
}

impl Screen {
    pub fn device_id(&self) -> Option<&str> {
        match self {
            Screen::Devices => None,
            Screen::Detail(id) => Some(id),
        }
    }
}
