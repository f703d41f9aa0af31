use crate::damp::damp3;
use crate::layout::Slot;
use crate::resource::{Assets, ResourceRef, ResourceStatus};
use glam::{Mat4, Quat, Vec3};
use strum::Display as StrumDisplay;

/// Width-to-height ratio of a card at rest.
pub const CARD_ASPECT: f32 = 1.618;
pub const POSITION_HALF_LIFE: f32 = 0.1;
pub const SCALE_HALF_LIFE: f32 = 0.15;
pub const ERROR_TEXT: &str = "Image Error";
pub const ERROR_FONT_SIZE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum CardState {
    Idle,
    SectorActive,
    Hovered,
}

impl CardState {
    /// Hover wins over sector activity.
    pub fn resolve(hovered: bool, sector_active: bool) -> Self {
        if hovered {
            Self::Hovered
        } else if sector_active {
            Self::SectorActive
        } else {
            Self::Idle
        }
    }

    pub fn scale_factor(&self) -> f32 {
        match self {
            Self::Idle => 1.0,
            Self::SectorActive => 1.25,
            Self::Hovered => 1.4,
        }
    }

    pub fn lift(&self) -> f32 {
        match self {
            Self::Hovered => 0.25,
            Self::Idle | Self::SectorActive => 0.0,
        }
    }

    pub fn target(&self) -> AnimatedTransform {
        let f = self.scale_factor();
        AnimatedTransform {
            position: Vec3::new(0.0, self.lift(), 0.0),
            scale: Vec3::new(CARD_ASPECT * f, f, 1.0),
        }
    }
}

/// The transform actually drawn, trailing the state's target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedTransform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for AnimatedTransform {
    fn default() -> Self {
        CardState::Idle.target()
    }
}

impl AnimatedTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position)
    }
}

/// Card-level pointer transition, before the sector tags it with a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardHover {
    Over(usize),
    Out(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVisual {
    Loading,
    Image,
    Error,
}

#[derive(Debug, Clone)]
pub struct Card {
    index: usize,
    base_position: Vec3,
    base_rotation_y: f32,
    resource: ResourceRef,
    hovered: bool,
    sector_active: bool,
    status: ResourceStatus,
    transform: AnimatedTransform,
}

impl Card {
    pub fn new(slot: &Slot) -> Self {
        Self {
            index: slot.index,
            base_position: slot.position,
            base_rotation_y: slot.rotation_y,
            resource: ResourceRef::for_index(slot.index),
            hovered: false,
            sector_active: false,
            status: ResourceStatus::Pending,
            transform: AnimatedTransform::default(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn resource(&self) -> &ResourceRef {
        &self.resource
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn state(&self) -> CardState {
        CardState::resolve(self.hovered, self.sector_active)
    }

    pub fn transform(&self) -> &AnimatedTransform {
        &self.transform
    }

    pub fn hover_enter(&self) -> CardHover {
        CardHover::Over(self.index)
    }

    pub fn hover_exit(&self) -> CardHover {
        CardHover::Out(self.index)
    }

    /// Some card of this sector, `index`, is now the hovered one.
    pub fn on_hover_enter(&mut self, index: usize) {
        self.hovered = index == self.index;
        self.sector_active = true;
    }

    pub fn on_hover_exit(&mut self) {
        self.hovered = false;
        self.sector_active = false;
    }

    pub fn tick(&mut self, dt: f32, assets: &Assets) {
        if !self.status.is_settled() {
            self.status = assets.status(&self.resource);
        }

        let target = self.state().target();
        damp3(&mut self.transform.position, target.position, POSITION_HALF_LIFE, dt);
        damp3(&mut self.transform.scale, target.scale, SCALE_HALF_LIFE, dt);
    }

    pub fn visual(&self) -> CardVisual {
        match self.status {
            ResourceStatus::Pending => CardVisual::Loading,
            ResourceStatus::Ready => CardVisual::Image,
            ResourceStatus::Failed => CardVisual::Error,
        }
    }

    /// Placement on the ring, in sector space.
    pub fn base_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.base_position) * Mat4::from_rotation_y(self.base_rotation_y)
    }

    /// Full card transform in sector space, animation included.
    pub fn matrix(&self) -> Mat4 {
        self.base_matrix() * self.transform.matrix()
    }
}
