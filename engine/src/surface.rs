use serde::{Deserialize, Serialize};

use crate::ui::Rect;

/// Pixel dimensions of the screen the host renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn width_f32(self) -> f32 {
        self.width as f32
    }

    pub fn height_f32(self) -> f32 {
        self.height as f32
    }

    pub fn bounds(self) -> Rect {
        Rect::from_size(self.width_f32(), self.height_f32())
    }

    pub fn is_portrait(self) -> bool {
        self.height >= self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_the_whole_surface() {
        let size = SurfaceSize::new(1080, 1920);
        assert!(!size.is_empty());
        assert!(size.is_portrait());
        assert_eq!(size.bounds(), Rect::new(0.0, 0.0, 1080.0, 1920.0));
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert!(SurfaceSize::new(0, 10).is_empty());
        assert!(SurfaceSize::new(10, 0).is_empty());
    }
}
