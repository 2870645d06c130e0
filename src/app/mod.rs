//! Application state for the TUI.
//!
//! [`App`] owns both sync components and the view selector. It never
//! fetches on its own; each tick it checks whether a sync published new
//! state and marks itself dirty so the main loop redraws.

mod handlers;
mod messages;
mod navigation;
mod types;

pub use messages::AppMessage;
pub use types::Screen;

use tokio::sync::mpsc;

use crate::client::FleetClient;
use crate::config::DashboardConfig;
use crate::health::HealthStatus;
use crate::sync::{DetailSync, DirectorySync};
use crate::view_mode::ViewSelector;

pub struct App {
    pub screen: Screen,
    pub view: ViewSelector,
    pub directory: DirectorySync,
    pub detail: DetailSync,
    pub health: HealthStatus,
    /// Highlighted row/card in the directory
    pub selected: usize,
    /// Whether Enter opens the detail screen
    pub click_through: bool,
    pub backend_url: String,
    pub should_quit: bool,
    /// Set when the next loop iteration must redraw
    pub needs_redraw: bool,
    pub tick_count: u64,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl App {
    /// Create the app and start directory polling.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &DashboardConfig, client: FleetClient) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let directory = DirectorySync::start(client.clone(), config.poll_interval);
        let detail = DetailSync::new(client, config.poll_interval);

        Self {
            screen: Screen::Devices,
            view: ViewSelector::new(config.initial_view),
            directory,
            detail,
            health: HealthStatus::pending(),
            selected: 0,
            click_through: config.click_through,
            backend_url: config.backend_url.clone(),
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Pick up state published by the sync tasks since the last tick.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);

        if self.directory.has_changed() {
            self.directory.mark_seen();
            self.clamp_selection();
            self.mark_dirty();
        }
        if self.detail.has_changed() {
            self.detail.mark_seen();
            self.mark_dirty();
        }
    }

    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::HealthChecked(status) => {
                self.health = status;
            }
        }
        self.mark_dirty();
    }

    /// Stop all polling. Called on exit.
    pub fn shutdown(&mut self) {
        self.directory.stop();
        self.detail.stop();
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::adapters::mock::MockHttpClient;

    #[tokio::test(start_paused = true)]
    async fn test_tick_marks_dirty_on_new_snapshot() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock, DashboardConfig::default());
        app.needs_redraw = false;

        settle(&mut app).await;

        assert!(app.needs_redraw);
        assert_eq!(app.directory.state().devices.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_tick_stays_clean() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock, DashboardConfig::default());
        settle(&mut app).await;
        app.needs_redraw = false;

        app.tick();
        assert!(!app.needs_redraw);
    }

    #[tokio::test(start_paused = true)]
    async fn test_health_message_updates_header() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock, DashboardConfig::default());
        app.needs_redraw = false;

        app.handle_message(AppMessage::HealthChecked(HealthStatus {
            healthy: true,
            message: "ok".to_string(),
            response_time_ms: Some(3),
        }));

        assert!(app.health.healthy);
        assert!(app.needs_redraw);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_polling() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock, DashboardConfig::default());
        app.open_device("d1");
        app.shutdown();

        assert!(!app.directory.is_running());
        assert!(!app.detail.is_running());
    }
}
