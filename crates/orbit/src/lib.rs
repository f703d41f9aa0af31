//! Layout, state and animation engine for a rotating ring of image cards.
//!
//! Everything here is renderer-agnostic: the engine produces transforms,
//! hover state and overlay descriptions, and consumes scroll progress,
//! pointer position and image load outcomes.

pub mod camera;
pub mod card;
pub mod damp;
pub mod hover;
pub mod layout;
pub mod macros;
pub mod overlay;
pub mod resource;
pub mod scene;
pub mod scroll;
pub mod sector;

pub use camera::{Camera, Projector};
pub use card::{AnimatedTransform, Card, CardHover, CardState, CardVisual};
pub use hover::{HoverEvent, HoverState, HoverTarget};
pub use layout::{Category, Layout, LayoutError, SectorSpec, Slot};
pub use overlay::{FocusOverlay, OverlayFrame};
pub use resource::{Assets, ResourceRef, ResourceStatus};
pub use scene::{EventTargets, FrameInput, PointerPicker, Scene};
pub use scroll::Scroll;
pub use sector::Sector;
