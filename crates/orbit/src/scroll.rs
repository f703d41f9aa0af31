use crate::layout::{Category, SectorSpec};
use std::f32::consts::TAU;

pub const DEFAULT_PAGES: f32 = 4.0;

/// Normalized scroll progress over a number of virtual pages. The offset
/// stays in `[0, 1)` when infinite and in `[0, 1]` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scroll {
    offset: f32,
    pages: f32,
    infinite: bool,
}

impl Default for Scroll {
    fn default() -> Self {
        Self::new(DEFAULT_PAGES, true)
    }
}

impl Scroll {
    pub fn new(pages: f32, infinite: bool) -> Self {
        Self {
            offset: 0.0,
            pages: if pages.is_finite() && pages > 0.0 {
                pages
            } else {
                DEFAULT_PAGES
            },
            infinite,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn pages(&self) -> f32 {
        self.pages
    }

    pub fn set_offset(&mut self, offset: f32) {
        if !offset.is_finite() {
            return;
        }
        self.offset = if self.infinite {
            wrap(offset)
        } else {
            offset.clamp(0.0, 1.0)
        };
    }

    /// Advances by `pages_delta` pages.
    pub fn scroll_by(&mut self, pages_delta: f32) {
        self.set_offset(self.offset + pages_delta / self.pages);
    }

    /// Offset that turns the midpoint of `category` toward the camera.
    pub fn facing(&mut self, category: Category) {
        if let Some(spec) = SectorSpec::ring()
            .iter()
            .find(|s| s.category == category)
        {
            self.set_offset(spec.midpoint() / TAU);
        }
    }
}

pub fn wrap(offset: f32) -> f32 {
    let wrapped = offset.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinite_scroll_wraps() {
        let mut scroll = Scroll::new(4.0, true);
        scroll.scroll_by(5.0);
        assert!((scroll.offset() - 0.25).abs() < 1e-6);
        scroll.scroll_by(-2.0);
        assert!((scroll.offset() - 0.75).abs() < 1e-6);
        scroll.set_offset(-1e-9);
        assert!(scroll.offset() >= 0.0 && scroll.offset() < 1.0);
    }

    #[test]
    fn test_finite_scroll_clamps() {
        let mut scroll = Scroll::new(2.0, false);
        scroll.scroll_by(10.0);
        assert_eq!(scroll.offset(), 1.0);
        scroll.scroll_by(-10.0);
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn test_facing_category_midpoint() {
        let mut scroll = Scroll::default();
        scroll.facing(Category::Autumn);
        assert!((scroll.offset() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_pages_fall_back() {
        assert_eq!(Scroll::new(0.0, true).pages(), DEFAULT_PAGES);
        assert_eq!(Scroll::new(f32::NAN, true).pages(), DEFAULT_PAGES);
    }
}
