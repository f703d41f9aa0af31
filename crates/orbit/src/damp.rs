//! Frame-rate independent exponential damping.
//!
//! Every call moves `current` toward `target` by the fraction
//! `1 - exp(-dt / half_life)`, so two ticks of `dt / 2` land on exactly the
//! same value as one tick of `dt`.

use glam::Vec3;

/// Fraction of the remaining distance covered in `dt` seconds.
pub fn fraction(half_life: f32, dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    if half_life <= 0.0 {
        return 1.0;
    }
    1.0 - (-dt / half_life).exp()
}

pub fn damp(current: f32, target: f32, half_life: f32, dt: f32) -> f32 {
    current + (target - current) * fraction(half_life, dt)
}

pub fn damp3(current: &mut Vec3, target: Vec3, half_life: f32, dt: f32) {
    *current += (target - *current) * fraction(half_life, dt);
}
