use crate::config::Config;
use crate::gui::stage::MAX_FRAME_DELTA;
use crate::sys::assets::{self, AssetError};
use gdk_pixbuf::Pixbuf;
use glam::Vec2;
use orbit::camera::normalize_pointer;
use orbit::{FocusOverlay, FrameInput, PointerPicker, ResourceRef, Scene, Scroll};
use std::collections::HashMap;

/// Seconds between two frame-clock timestamps (microseconds).
pub fn frame_delta(previous: Option<i64>, now: i64) -> f32 {
    previous
        .map(|prev| ((now - prev) as f32 / 1_000_000.0).clamp(0.0, MAX_FRAME_DELTA))
        .unwrap_or(0.0)
}

/// Everything the window draws, plus the input collaborators feeding the
/// engine.
pub struct Stage {
    pub scene: Scene,
    pub scroll: Scroll,
    pub picker: PointerPicker,
    pub textures: HashMap<ResourceRef, Pixbuf>,
    pub viewport: Vec2,
    pointer: Vec2,
    scroll_step: f32,
    last_frame: Option<i64>,
}

impl Stage {
    pub fn new(config: &Config) -> Self {
        let overlay = config
            .seed
            .map_or_else(FocusOverlay::new, FocusOverlay::with_seed);
        let mut stage = Self {
            scene: Scene::new(overlay),
            scroll: Scroll::default(),
            picker: PointerPicker::default(),
            textures: HashMap::new(),
            viewport: Vec2::ZERO,
            pointer: Vec2::ZERO,
            scroll_step: config.scroll_step,
            last_frame: None,
        };
        stage.reconfigure(config);
        if let Some(start) = config.start {
            stage.scroll.facing(start);
        }
        stage
    }

    pub fn reconfigure(&mut self, config: &Config) {
        let offset = self.scroll.offset();
        self.scroll = Scroll::new(config.pages, config.infinite);
        self.scroll.set_offset(offset);
        self.scroll_step = config.scroll_step;
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.picker.set_viewport(viewport);
    }

    pub fn pointer_moved(&mut self, px: Vec2) {
        self.pointer = normalize_pointer(px, self.viewport);
        self.picker.set_pointer(Some(px));
    }

    pub fn pointer_left(&mut self) {
        self.picker.set_pointer(None);
    }

    pub fn scrolled(&mut self, steps: f32) {
        self.scroll.scroll_by(steps * self.scroll_step);
    }

    /// Runs one engine frame at frame-clock time `now` (microseconds).
    pub fn advance(&mut self, now: i64) {
        let dt = frame_delta(self.last_frame, now);
        self.last_frame = Some(now);

        let input = FrameInput {
            scroll_offset: self.scroll.offset(),
            pointer: self.pointer,
            dt,
        };
        self.scene.frame(input, &mut self.picker);
    }

    pub fn take_requests(&mut self) -> Vec<ResourceRef> {
        self.scene.assets_mut().drain_requests()
    }

    pub fn asset_loaded(&mut self, resource: &ResourceRef, result: Result<Vec<u8>, AssetError>) {
        match result.and_then(|bytes| assets::decode(&bytes)) {
            Ok(pixbuf) => {
                self.textures.insert(resource.clone(), pixbuf);
                self.scene.assets_mut().resolve(resource, true);
            }
            Err(e) => {
                log::error!("Failed to load '{}': {}", resource, e);
                self.scene.assets_mut().resolve(resource, false);
            }
        }
    }

    pub fn asset_failed(&mut self, resource: &ResourceRef) {
        self.scene.assets_mut().resolve(resource, false);
    }

    pub fn texture(&self, resource: &ResourceRef) -> Option<&Pixbuf> {
        self.textures.get(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit::{CardVisual, ResourceStatus};

    #[test]
    fn test_frame_delta() {
        assert_eq!(frame_delta(None, 5_000_000), 0.0);
        assert!((frame_delta(Some(0), 16_000) - 0.016).abs() < 1e-6);
        assert_eq!(frame_delta(Some(0), 5_000_000), MAX_FRAME_DELTA);
        assert_eq!(frame_delta(Some(10), 0), 0.0);
    }

    #[test]
    fn test_requests_every_image_once() {
        let mut stage = Stage::new(&Config::default());
        assert_eq!(stage.take_requests().len(), orbit::resource::IMAGE_COUNT);
        assert!(stage.take_requests().is_empty());
    }

    #[test]
    fn test_load_failure_falls_back_per_card() {
        let mut stage = Stage::new(&Config::default());
        let broken = ResourceRef::for_index(0);
        stage.asset_loaded(
            &broken,
            Err(AssetError::Io(std::io::Error::from(
                std::io::ErrorKind::NotFound,
            ))),
        );
        stage.advance(0);
        stage.advance(16_000);

        assert_eq!(stage.scene.assets().status(&broken), ResourceStatus::Failed);
        for card in stage.scene.sectors().iter().flat_map(|s| s.cards()) {
            let expected = if card.resource() == &broken {
                CardVisual::Error
            } else {
                CardVisual::Loading
            };
            assert_eq!(card.visual(), expected);
        }
        assert!(stage.texture(&broken).is_none());
    }

    #[test]
    fn test_scroll_drives_rotation() {
        let mut stage = Stage::new(&Config::default());
        stage.scrolled(2.0);
        stage.advance(0);
        assert!((stage.scene.scroll_offset() - 0.125).abs() < 1e-6);
        assert!((stage.scene.rotation_y() + std::f32::consts::TAU * 0.125).abs() < 1e-5);
    }

    #[test]
    fn test_start_category_faces_camera() {
        let config = Config {
            start: Some(orbit::Category::Autumn),
            ..Config::default()
        };
        let stage = Stage::new(&config);
        assert!((stage.scroll.offset() - 0.5).abs() < 1e-6);
    }
}
