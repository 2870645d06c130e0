//! Snapshot of everything a frame needs.
//!
//! Built once per draw from [`App`] so renderers work on plain data and can
//! be driven directly in tests and benches.

use crate::app::{App, Screen};
use crate::health::HealthStatus;
use crate::sync::{DetailState, DirectoryState};
use crate::view_mode::ViewMode;

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub screen: Screen,
    pub mode: ViewMode,
    pub directory: DirectoryState,
    pub detail: DetailState,
    pub health: HealthStatus,
    pub selected: usize,
    pub click_through: bool,
    pub backend_url: String,
}

impl RenderContext {
    pub fn from_app(app: &App) -> Self {
        Self {
            screen: app.screen.clone(),
            mode: app.view.mode(),
            directory: app.directory.state(),
            detail: app.detail.state(),
            health: app.health.clone(),
            selected: app.selected,
            click_through: app.click_through,
            backend_url: app.backend_url.clone(),
        }
    }

    /// Context for the devices screen with a settled snapshot.
    pub fn for_devices(directory: DirectoryState, mode: ViewMode) -> Self {
        Self {
            screen: Screen::Devices,
            mode,
            directory,
            detail: DetailState::default(),
            health: HealthStatus::pending(),
            selected: 0,
            click_through: true,
            backend_url: String::new(),
        }
    }
}
