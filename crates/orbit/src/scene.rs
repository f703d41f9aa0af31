//! The ring as a whole: four sectors under one rotating root, the
//! pointer-following camera, the single hovered card and the focus overlay.

use crate::camera::{Camera, Projector};
use crate::card::{Card, CardHover};
use crate::hover::{HoverEvent, HoverState, HoverTarget};
use crate::layout::{Category, DENSITY, SectorSpec};
use crate::overlay::{FocusOverlay, OverlayFrame};
use crate::resource::Assets;
use crate::scroll;
use crate::sector::Sector;
use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::TAU;

pub const ROOT_POSITION: Vec3 = Vec3::new(0.0, 1.5, 0.0);

/// Unit quad corners of a card, clockwise from top-left.
const CARD_CORNERS: [Vec3; 4] = [
    Vec3::new(-0.5, 0.5, 0.0),
    Vec3::new(0.5, 0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(-0.5, -0.5, 0.0),
];

pub fn rotation_for(scroll_offset: f32) -> f32 {
    -scroll_offset * TAU
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub scroll_offset: f32,
    /// Normalized pointer, `[-1, 1]` with +Y up.
    pub pointer: Vec2,
    pub dt: f32,
}

/// Hit testing against the scene, run once per frame after the transforms
/// have been updated.
pub trait EventTargets {
    fn update(&mut self, scene: &Scene) -> Vec<HoverEvent>;
}

impl EventTargets for () {
    fn update(&mut self, _scene: &Scene) -> Vec<HoverEvent> {
        Vec::new()
    }
}

#[derive(Debug)]
pub struct Scene {
    sectors: Vec<Sector>,
    scroll_offset: f32,
    camera: Camera,
    hover: HoverState,
    assets: Assets,
    overlay: FocusOverlay,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(FocusOverlay::new())
    }
}

impl Scene {
    pub fn new(overlay: FocusOverlay) -> Self {
        Self::with_sectors(SectorSpec::ring(), DENSITY, overlay)
    }

    pub fn with_sectors(
        specs: impl IntoIterator<Item = SectorSpec>,
        density: f32,
        overlay: FocusOverlay,
    ) -> Self {
        let sectors: Vec<Sector> = specs
            .into_iter()
            .map(|spec| Sector::new(spec, density))
            .collect();
        let mut assets = Assets::new();
        for sector in &sectors {
            sector.request_resources(&mut assets);
        }

        Self {
            sectors,
            scroll_offset: 0.0,
            camera: Camera::default(),
            hover: HoverState::default(),
            assets,
            overlay,
        }
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sector(&self, category: Category) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.category() == category)
    }

    pub fn card(&self, target: HoverTarget) -> Option<&Card> {
        self.sector(target.category)?.card(target.index)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut Assets {
        &mut self.assets
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn rotation_y(&self) -> f32 {
        rotation_for(self.scroll_offset)
    }

    pub fn hovered(&self) -> Option<HoverTarget> {
        self.hover.current()
    }

    pub fn is_hovered(&self, target: HoverTarget) -> bool {
        self.hover.is_hovered(target)
    }

    /// The overlay to draw, present only while a card is hovered.
    pub fn overlay(&self) -> Option<&OverlayFrame> {
        self.overlay.current()
    }

    pub fn root_matrix(&self) -> Mat4 {
        Mat4::from_translation(ROOT_POSITION) * Mat4::from_rotation_y(self.rotation_y())
    }

    pub fn card_matrix(&self, sector: &Sector, card: &Card) -> Mat4 {
        self.root_matrix() * sector.matrix() * card.matrix()
    }

    pub fn card_corners(&self, sector: &Sector, card: &Card) -> [Vec3; 4] {
        let m = self.card_matrix(sector, card);
        CARD_CORNERS.map(|c| m.transform_point3(c))
    }

    pub fn label_position(&self, sector: &Sector) -> Vec3 {
        (self.root_matrix() * sector.matrix()).transform_point3(sector.label_anchor())
    }

    /// Front-most card whose projected quad contains `pointer` (pixels).
    pub fn pick(&self, projector: &Projector, pointer: Vec2) -> Option<HoverTarget> {
        self.sectors
            .iter()
            .flat_map(|sector| sector.cards().iter().map(move |card| (sector, card)))
            .filter_map(|(sector, card)| {
                let corners = self.card_corners(sector, card);
                let projected = corners
                    .iter()
                    .map(|&c| projector.project(c))
                    .collect::<Option<Vec<_>>>()?;
                let quad: Vec<Vec2> = projected.iter().map(|p| p.truncate()).collect();
                let depth = projected.iter().map(|p| p.z).sum::<f32>() / projected.len() as f32;
                quad_contains(&quad, pointer)
                    .then(|| (depth, HoverTarget::new(sector.category(), card.index())))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, target)| target)
    }

    pub fn handle_hover(&mut self, event: HoverEvent) {
        if let CardHover::Over(_) = event.hover
            && self.card(event.target()).is_none()
        {
            log::debug!("Ignoring hover on unknown card {:?}", event.target());
            return;
        }
        if self.hover.apply(event) {
            self.sync_hover();
        }
        self.refresh_overlay();
    }

    /// Runs one frame: rotation from scroll, camera follow, hit testing, card
    /// damping, then the hit test's hover changes. Those changes therefore
    /// start animating on the next frame.
    pub fn frame<T: EventTargets>(&mut self, input: FrameInput, targets: &mut T) {
        let dt = if input.dt.is_finite() { input.dt.max(0.0) } else { 0.0 };

        if input.scroll_offset.is_finite() {
            self.scroll_offset = scroll::wrap(input.scroll_offset);
        }
        self.camera.follow(input.pointer, dt);

        let events = targets.update(self);

        for sector in &mut self.sectors {
            sector.tick(dt, &self.assets);
        }

        for event in events {
            self.handle_hover(event);
        }
        self.refresh_overlay();
    }

    fn sync_hover(&mut self) {
        let current = self.hover.current();
        for sector in &mut self.sectors {
            sector.sync_hover(current);
        }
    }

    fn refresh_overlay(&mut self) {
        self.overlay.render(self.hover.current(), &mut self.assets);
    }
}

/// Convex polygon containment, either winding.
pub fn quad_contains(quad: &[Vec2], p: Vec2) -> bool {
    if quad.len() < 3 {
        return false;
    }
    let mut sign = 0.0_f32;
    for (i, a) in quad.iter().enumerate() {
        let b = quad[(i + 1) % quad.len()];
        let cross = (b - *a).perp_dot(p - *a);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

/// Hit tester that projects every card and reports the one under the
/// pointer.
#[derive(Debug, Clone, Default)]
pub struct PointerPicker {
    viewport: Vec2,
    pointer: Option<Vec2>,
    current: Option<HoverTarget>,
}

impl PointerPicker {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    /// Pointer in pixels, `None` once it leaves the surface.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    pub fn current(&self) -> Option<HoverTarget> {
        self.current
    }
}

impl EventTargets for PointerPicker {
    fn update(&mut self, scene: &Scene) -> Vec<HoverEvent> {
        let projector = Projector::new(scene.camera(), self.viewport);
        let hit = self.pointer.and_then(|p| scene.pick(&projector, p));
        if hit == self.current {
            return Vec::new();
        }

        let report = |target: HoverTarget, hover: fn(&Card) -> CardHover| -> Option<HoverEvent> {
            let sector = scene.sector(target.category)?;
            Some(sector.report_hover(hover(sector.card(target.index)?)))
        };
        let events: Vec<HoverEvent> = [
            self.current.and_then(|t| report(t, Card::hover_exit)),
            hit.and_then(|t| report(t, Card::hover_enter)),
        ]
        .into_iter()
        .flatten()
        .collect();

        self.current = hit;
        events
    }
}
