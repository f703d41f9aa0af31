pub mod model;
pub mod view;

pub use model::Stage;
pub use view::draw;

/// Longest frame step fed to the engine, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.1;
pub const FONT_FACE: &str = "Sans";
/// Below this projected area (px²) a card is edge-on and skipped.
pub const MIN_QUAD_AREA: f64 = 1.0;
