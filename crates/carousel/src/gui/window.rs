use crate::config::WindowConfig;
use glam::Vec2;
use gtk::prelude::*;
use gtk4 as gtk;

pub fn init_window(window: &gtk::ApplicationWindow, config: &WindowConfig) {
    window.set_default_size(config.width.max(1), config.height.max(1));
}

pub fn viewport(area: &gtk::DrawingArea) -> Vec2 {
    Vec2::new(area.width() as f32, area.height() as f32)
}
