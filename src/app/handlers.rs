//! Keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Screen};
use crate::view_mode::ViewMode;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc | KeyCode::Backspace => self.back_to_devices(),
            _ if matches!(self.screen, Screen::Devices) => self.handle_devices_key(key.code),
            _ => {}
        }
    }

    fn handle_devices_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('v') => self.toggle_view_mode(),
            KeyCode::Char('l') => self.set_view_mode(ViewMode::List),
            KeyCode::Char('c') => self.set_view_mode(ViewMode::Card),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Enter => {
                self.open_selected();
            }
            _ => {}
        }
    }
}
