//! Enlarged, camera-facing preview of the hovered card.

use crate::card::CARD_ASPECT;
use crate::hover::HoverTarget;
use crate::resource::{Assets, ResourceRef, ResourceStatus};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const VOCABULARY: [&str; 6] = ["Spring", "Summer", "Autumn", "Winter", "Nature", "Season"];
pub const LABEL_WORDS: usize = 2;
pub const ZOOM: f32 = 0.8;
pub const IMAGE_SCALE: Vec3 = Vec3::new(3.5, CARD_ASPECT * 3.5, 0.2);
pub const IMAGE_OFFSET: Vec3 = Vec3::new(0.0, 1.5, 0.0);
pub const LABEL_OFFSET: Vec3 = Vec3::new(2.15, 3.85, 0.0);
pub const LABEL_FONT_SIZE: f32 = 0.5;

/// What the renderer draws for the overlay this frame. Offsets are in
/// billboard space.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub target: HoverTarget,
    pub label: String,
    pub image: ResourceRef,
    pub image_visible: bool,
    pub zoom: f32,
}

#[derive(Debug)]
pub struct FocusOverlay {
    rng: StdRng,
    shown: Option<OverlayFrame>,
}

impl Default for FocusOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusOverlay {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
            shown: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            shown: None,
        }
    }

    pub fn current(&self) -> Option<&OverlayFrame> {
        self.shown.as_ref()
    }

    /// Tracks the hovered card. A new label is drawn on every change of
    /// target, so leaving and re-entering the same card picks a fresh one.
    pub fn render(
        &mut self,
        hovered: Option<HoverTarget>,
        assets: &mut Assets,
    ) -> Option<&OverlayFrame> {
        let Some(target) = hovered else {
            self.shown = None;
            return None;
        };

        if self.shown.as_ref().is_none_or(|s| s.target != target) {
            let image = ResourceRef::for_index(target.index);
            assets.request(&image);
            self.shown = Some(OverlayFrame {
                target,
                label: self.sample_label(),
                image,
                image_visible: false,
                zoom: 1.0,
            });
        }

        if let Some(shown) = self.shown.as_mut()
            && !shown.image_visible
            && assets.status(&shown.image) == ResourceStatus::Ready
        {
            shown.zoom = ZOOM;
            shown.image_visible = true;
        }

        self.shown.as_ref()
    }

    fn sample_label(&mut self) -> String {
        (0..LABEL_WORDS)
            .map(|_| VOCABULARY[self.rng.random_range(0..VOCABULARY.len())])
            .collect::<Vec<_>>()
            .join(" ")
    }
}
