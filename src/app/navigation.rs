//! Screen and selection changes.

use super::{App, Screen};
use crate::view_mode::ViewMode;

impl App {
    fn device_count(&self) -> usize {
        self.directory.with_state(|s| s.devices.len())
    }

    /// Keep the selection inside the current snapshot.
    pub fn clamp_selection(&mut self) {
        let count = self.device_count();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }

    pub fn select_next(&mut self) {
        let count = self.device_count();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_device_id(&self) -> Option<String> {
        self.directory
            .with_state(|s| s.devices.get(self.selected).map(|d| d.device_id.clone()))
    }

    /// Open the highlighted device, if click-through is enabled.
    pub fn open_selected(&mut self) -> bool {
        if !self.click_through {
            return false;
        }
        match self.selected_device_id() {
            Some(id) => {
                self.open_device(&id);
                true
            }
            None => false,
        }
    }

    /// Switch to the detail screen for `device_id` and poll it.
    pub fn open_device(&mut self, device_id: &str) {
        tracing::info!("Opening device {}", device_id);
        self.detail.select(Some(device_id));
        self.screen = Screen::Detail(device_id.to_string());
    }

    /// Return to the directory, stopping detail polling.
    pub fn back_to_devices(&mut self) {
        if self.screen == Screen::Devices {
            return;
        }
        self.detail.select(None);
        self.screen = Screen::Devices;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view.select(mode) {
            tracing::debug!("View mode set to {}", mode);
        }
    }

    pub fn toggle_view_mode(&mut self) {
        let mode = self.view.toggle();
        tracing::debug!("View mode toggled to {}", mode);
    }
}
