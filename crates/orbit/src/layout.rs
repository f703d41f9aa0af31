//! Radial layout: the four fixed sectors of the ring and the angular slots
//! cards are placed on.

use glam::Vec3;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

/// Slots per radian of sector length, before the edge margin.
pub const DENSITY: f32 = 22.0;
/// Slots left empty at the end of every sector so neighbours don't touch.
pub const EDGE_MARGIN: usize = 3;
pub const RADIUS: f32 = 5.25;
pub const RING_LIFT: f32 = 0.4;
pub const LABEL_RADIUS_FACTOR: f32 = 1.4;
pub const LABEL_HEIGHT: f32 = 0.5;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[strum(to_string = "spring", serialize = "sp", serialize = "0")]
    Spring,
    #[strum(to_string = "summer", serialize = "su", serialize = "1")]
    Summer,
    #[strum(to_string = "autumn", serialize = "au", serialize = "2")]
    Autumn,
    #[strum(to_string = "winter", serialize = "wi", serialize = "3")]
    Winter,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Sector '{category}' has degenerate angular length {length}")]
    DegenerateSector { category: Category, length: f32 },
    #[error("Sector '{category}' has invalid start angle {angle}")]
    InvalidStart { category: Category, angle: f32 },
    #[error("Sector '{category}' has invalid radius {radius}")]
    InvalidRadius { category: Category, radius: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorSpec {
    pub category: Category,
    pub start_angle: f32,
    pub angular_length: f32,
    pub radius: f32,
    pub ring_offset: Vec3,
}

impl SectorSpec {
    pub fn new(category: Category, start_angle: f32, angular_length: f32) -> Self {
        Self {
            category,
            start_angle,
            angular_length,
            radius: RADIUS,
            ring_offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, ring_offset: Vec3) -> Self {
        self.ring_offset = ring_offset;
        self
    }

    /// The four sectors of the ring, in ring order. Their ranges tile
    /// `[0, 2π)` exactly once.
    pub fn ring() -> [SectorSpec; 4] {
        let summer_start = FRAC_PI_4;
        let autumn_start = summer_start + FRAC_PI_2;
        let winter_start = PI * 1.25;
        [
            SectorSpec::new(Category::Spring, 0.0, FRAC_PI_4),
            SectorSpec::new(Category::Summer, summer_start, FRAC_PI_2)
                .with_offset(Vec3::new(0.0, RING_LIFT, 0.0)),
            SectorSpec::new(Category::Autumn, autumn_start, FRAC_PI_2),
            SectorSpec::new(Category::Winter, winter_start, TAU - winter_start)
                .with_offset(Vec3::new(0.0, -RING_LIFT, 0.0)),
        ]
    }

    pub fn end_angle(&self) -> f32 {
        self.start_angle + self.angular_length
    }

    pub fn midpoint(&self) -> f32 {
        self.start_angle + self.angular_length / 2.0
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.angular_length.is_finite() || self.angular_length <= 0.0 {
            return Err(LayoutError::DegenerateSector {
                category: self.category,
                length: self.angular_length,
            });
        }
        if !self.start_angle.is_finite() {
            return Err(LayoutError::InvalidStart {
                category: self.category,
                angle: self.start_angle,
            });
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(LayoutError::InvalidRadius {
                category: self.category,
                radius: self.radius,
            });
        }
        Ok(())
    }
}

/// Number of slots the sector is divided into, before the edge margin.
pub fn slot_count(angular_length: f32, density: f32) -> usize {
    let count = (angular_length * density).round();
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        0
    }
}

/// Number of cards actually placed in the sector.
pub fn placeable_count(angular_length: f32, density: f32) -> usize {
    slot_count(angular_length, density).saturating_sub(EDGE_MARGIN)
}

/// Point on a ring of `radius` at `angle`, measured from +Z toward +X.
pub fn ring_point(angle: f32, radius: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(sin * radius, 0.0, cos * radius)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub index: usize,
    pub angle: f32,
    pub position: Vec3,
    pub rotation_y: f32,
}

impl Slot {
    pub fn at(index: usize, angle: f32, radius: f32) -> Self {
        Self {
            index,
            angle,
            position: ring_point(angle, radius),
            rotation_y: FRAC_PI_2 + angle,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub slots: Vec<Slot>,
    pub label_anchor: Vec3,
}

impl Layout {
    pub fn generate(spec: &SectorSpec, density: f32) -> Self {
        let lift = Vec3::new(0.0, LABEL_HEIGHT, 0.0);

        if let Err(e) = spec.validate() {
            log::warn!("{e}; sector left empty");
            let angle = if spec.start_angle.is_finite() { spec.start_angle } else { 0.0 };
            let radius = if spec.radius.is_finite() && spec.radius > 0.0 {
                spec.radius
            } else {
                RADIUS
            };
            return Self {
                slots: Vec::new(),
                label_anchor: ring_point(angle, radius * LABEL_RADIUS_FACTOR) + lift,
            };
        }

        let label_anchor = ring_point(spec.midpoint(), spec.radius * LABEL_RADIUS_FACTOR) + lift;

        let count = slot_count(spec.angular_length, density);
        let slots = (0..placeable_count(spec.angular_length, density))
            .map(|i| {
                let angle = spec.start_angle + (i as f32 / count as f32) * spec.angular_length;
                Slot::at(i, angle, spec.radius)
            })
            .collect();

        Self {
            slots,
            label_anchor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_ring_partitions_full_circle() {
        let ring = SectorSpec::ring();
        assert_eq!(ring[0].start_angle, 0.0);
        for pair in ring.windows(2) {
            assert!((pair[0].end_angle() - pair[1].start_angle).abs() < EPS);
            assert!(pair[0].start_angle < pair[1].start_angle);
        }
        let total: f32 = ring.iter().map(|s| s.angular_length).sum();
        assert!((total - TAU).abs() < EPS);
        assert!((ring[3].end_angle() - TAU).abs() < EPS);
        for (spec, category) in ring.iter().zip(Category::iter()) {
            assert_eq!(spec.category, category);
            assert!(spec.validate().is_ok());
        }
    }

    #[test]
    fn test_card_counts_per_sector() {
        let counts: Vec<usize> = SectorSpec::ring()
            .iter()
            .map(|s| Layout::generate(s, DENSITY).slots.len())
            .collect();
        assert_eq!(counts, vec![14, 32, 32, 49]);
    }

    #[test]
    fn test_placeable_count_matches_rounding_rule() {
        for step in 0..200 {
            let len = step as f32 * 0.037;
            let expected = ((len * DENSITY).round() as i64 - EDGE_MARGIN as i64).max(0) as usize;
            assert_eq!(placeable_count(len, DENSITY), expected, "len = {len}");
        }
    }

    #[test]
    fn test_degenerate_sector_yields_no_cards() {
        for len in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let spec = SectorSpec::new(Category::Autumn, 1.0, len);
            let layout = Layout::generate(&spec, DENSITY);
            assert!(layout.slots.is_empty());
            assert!(layout.label_anchor.is_finite());
            let fallback = ring_point(1.0, RADIUS * LABEL_RADIUS_FACTOR);
            assert!((layout.label_anchor - fallback - Vec3::Y * LABEL_HEIGHT).length() < EPS);
        }
        let spec = SectorSpec::new(Category::Spring, f32::NAN, 1.0);
        assert!(matches!(spec.validate(), Err(LayoutError::InvalidStart { .. })));
        let layout = Layout::generate(&spec, DENSITY);
        assert!(layout.slots.is_empty());
        assert!(layout.label_anchor.is_finite());
        let mut spec = SectorSpec::new(Category::Spring, 0.5, 1.0);
        spec.radius = f32::INFINITY;
        assert!(Layout::generate(&spec, DENSITY).label_anchor.is_finite());
        let spec = SectorSpec::new(Category::Autumn, 1.0, 0.0);
        assert!(matches!(
            spec.validate(),
            Err(LayoutError::DegenerateSector { category: Category::Autumn, .. })
        ));
    }

    #[test]
    fn test_slot_angles_and_facing() {
        let spec = SectorSpec::new(Category::Summer, FRAC_PI_4, FRAC_PI_2);
        let layout = Layout::generate(&spec, DENSITY);
        let count = slot_count(FRAC_PI_2, DENSITY) as f32;
        for slot in &layout.slots {
            let expected = FRAC_PI_4 + slot.index as f32 / count * FRAC_PI_2;
            assert!((slot.angle - expected).abs() < EPS);
            assert!((slot.rotation_y - (FRAC_PI_2 + slot.angle)).abs() < EPS);
            assert!((slot.position.length() - RADIUS).abs() < 1e-4);
            assert_eq!(slot.position.y, 0.0);
            assert!(slot.angle < spec.end_angle());
        }
    }

    #[test]
    fn test_label_anchor_at_midpoint() {
        let spec = SectorSpec::new(Category::Spring, 0.0, FRAC_PI_2);
        let anchor = Layout::generate(&spec, DENSITY).label_anchor;
        let r = RADIUS * LABEL_RADIUS_FACTOR;
        let m = FRAC_PI_4;
        assert!((anchor - Vec3::new(m.sin() * r, LABEL_HEIGHT, m.cos() * r)).length() < 1e-4);
    }

    #[test]
    fn test_category_deserialization() {
        let cases = vec![
            ("\"spring\"", Category::Spring),
            ("\"Spring\"", Category::Spring),
            ("\"SUMMER\"", Category::Summer),
            ("\"au\"", Category::Autumn),
            ("\"3\"", Category::Winter),
        ];

        for (json, expected) in cases {
            let deserialized: Category = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert_eq!(Category::Winter.to_string(), "winter");
    }
}
