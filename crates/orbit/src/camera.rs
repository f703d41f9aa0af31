//! Pointer-following camera and the perspective projection used for both
//! drawing and picking.

use crate::damp::damp3;
use glam::{Mat4, Vec2, Vec3};

pub const CAMERA_HALF_LIFE: f32 = 0.3;
pub const FOV_Y_DEGREES: f32 = 75.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Self::target_for(Vec2::ZERO),
        }
    }
}

impl Camera {
    /// Where the camera wants to be for a normalized pointer in `[-1, 1]`.
    pub fn target_for(pointer: Vec2) -> Vec3 {
        Vec3::new(-pointer.x * 2.0, pointer.y * 2.0 + 4.5, 9.0)
    }

    pub fn follow(&mut self, pointer: Vec2, dt: f32) {
        damp3(&mut self.position, Self::target_for(pointer), CAMERA_HALF_LIFE, dt);
    }

    /// Always aimed at the world origin; derived from the position on every
    /// call.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    /// Camera right and up axes in world space, for billboards.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let view = self.view();
        (view.row(0).truncate(), view.row(1).truncate())
    }
}

/// Maps a pixel position to `[-1, 1]` with +Y up.
pub fn normalize_pointer(px: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(px.x / viewport.x * 2.0 - 1.0, 1.0 - px.y / viewport.y * 2.0)
}

#[derive(Debug, Clone, Copy)]
pub struct Projector {
    view_proj: Mat4,
    viewport: Vec2,
}

impl Projector {
    pub fn new(camera: &Camera, viewport: Vec2) -> Self {
        let aspect = if viewport.y > 0.0 {
            viewport.x / viewport.y
        } else {
            1.0
        };
        let proj = Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, NEAR, FAR);
        Self {
            view_proj: proj * camera.view(),
            viewport,
        }
    }

    /// Screen position in pixels (origin top-left) plus view depth, or `None`
    /// for points at or behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_proj * world.extend(1.0);
        if clip.w <= NEAR {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec3::new(
            (ndc.x + 1.0) / 2.0 * self.viewport.x,
            (1.0 - ndc.y) / 2.0 * self.viewport.y,
            clip.w,
        ))
    }

    /// Pixels covered by one world unit at view depth `depth`.
    pub fn pixels_per_unit(&self, depth: f32) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        self.viewport.y / (2.0 * (FOV_Y_DEGREES.to_radians() / 2.0).tan() * depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_follows_pointer() {
        assert_eq!(Camera::target_for(Vec2::ZERO), Vec3::new(0.0, 4.5, 9.0));
        assert_eq!(
            Camera::target_for(Vec2::new(1.0, -1.0)),
            Vec3::new(-2.0, 2.5, 9.0)
        );
    }

    #[test]
    fn test_follow_converges() {
        let mut camera = Camera::default();
        let pointer = Vec2::new(0.5, 0.5);
        for _ in 0..600 {
            camera.follow(pointer, 1.0 / 60.0);
        }
        assert!((camera.position - Camera::target_for(pointer)).length() < 1e-3);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(-1.3, 2.0, 8.0);
        let projector = Projector::new(&camera, Vec2::new(800.0, 600.0));
        let p = projector.project(Vec3::ZERO).unwrap();
        assert!((p.x - 400.0).abs() < 1e-2);
        assert!((p.y - 300.0).abs() < 1e-2);
        assert!((p.z - camera.position.length()).abs() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_culled() {
        let camera = Camera::default();
        let projector = Projector::new(&camera, Vec2::new(800.0, 600.0));
        assert!(projector.project(camera.position * 2.0).is_none());
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let (right, up) = Camera::default().basis();
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(up).abs() < 1e-5);
        assert!(right.x > 0.99);
    }

    #[test]
    fn test_normalize_pointer() {
        let viewport = Vec2::new(200.0, 100.0);
        assert_eq!(normalize_pointer(Vec2::new(100.0, 50.0), viewport), Vec2::ZERO);
        assert_eq!(
            normalize_pointer(Vec2::new(0.0, 0.0), viewport),
            Vec2::new(-1.0, 1.0)
        );
        assert_eq!(normalize_pointer(Vec2::ONE, Vec2::ZERO), Vec2::ZERO);
    }
}
