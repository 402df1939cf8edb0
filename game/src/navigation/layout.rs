use engine::surface::SurfaceSize;
use engine::ui::{Rect, Size};
use serde::{Deserialize, Serialize};

use crate::settings::LayoutTuning;

/// A catalog entry's on-screen rect in the menu carousel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarouselSlot {
    pub index: usize,
    pub rect: Rect,
}

/// Screen geometry derived once from the surface size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UiLayout {
    pub screen: SurfaceSize,
    pub tap_threshold: f32,
    pub vertical_gap: f32,
    pub level_scale: f32,
    pub x_padding: f32,
    pub y_padding: f32,
    pub level_margin: f32,
    pub level_width: f32,
    pub neighboring_levels: usize,
}

impl UiLayout {
    pub fn new(screen: SurfaceSize, tuning: &LayoutTuning) -> Self {
        let w = screen.width_f32();
        let h = screen.height_f32();
        Self {
            screen,
            tap_threshold: tuning.tap_threshold_frac * w,
            vertical_gap: tuning.vertical_gap_frac * h,
            level_scale: tuning.level_scale,
            x_padding: (1.0 - tuning.level_scale) / 2.0 * w,
            y_padding: tuning.menu_y_padding_frac * h,
            level_margin: tuning.level_margin_frac * w,
            level_width: tuning.level_scale * w,
            neighboring_levels: tuning.neighboring_levels as usize,
        }
    }

    /// Distance between the left edges of neighboring carousel entries.
    pub fn pitch(&self) -> f32 {
        self.level_width + self.level_margin
    }

    pub fn start_button(&self) -> Rect {
        let w = self.screen.width_f32();
        let h = self.screen.height_f32();
        let bw = w / 3.0;
        let bh = ((h - w) / 3.0).max(0.0);
        Rect::new(bw, w + bh, bw, bh)
    }

    /// Square tiles of the start screen's `side x side` decoration.
    pub fn start_tile_size(&self, side: u32) -> Size {
        Size::square(self.screen.width_f32() / side.max(1) as f32)
    }

    /// Tile size of a `width x height` level filling the screen between the two vertical gaps.
    pub fn playing_tile_size(&self, width: usize, height: usize) -> Size {
        Size::new(
            self.screen.width_f32() / width.max(1) as f32,
            (self.screen.height_f32() - 2.0 * self.vertical_gap) / height.max(1) as f32,
        )
    }

    /// Height of a level drawn at carousel scale.
    pub fn carousel_level_height(&self) -> f32 {
        self.level_scale * (self.screen.height_f32() - 2.0 * self.vertical_gap)
    }

    /// Rects of the entries within `neighboring_levels` of `index`, shifted by `offset`.
    pub fn carousel_slots(&self, index: i32, offset: f32, count: usize) -> Vec<CarouselSlot> {
        let reach = self.neighboring_levels as i64;
        let center = index as i64;
        let pitch = self.pitch();
        let height = self.carousel_level_height();

        (center - reach..=center + reach)
            .filter(|&i| i >= 0 && (i as usize) < count)
            .map(|i| CarouselSlot {
                index: i as usize,
                rect: Rect::new(
                    self.x_padding + (i - center) as f32 * pitch + offset,
                    self.y_padding,
                    self.level_width,
                    height,
                ),
            })
            .collect()
    }

    /// Grid cell under a screen point in the playing stage, if any.
    pub fn cell_at(&self, x: f32, y: f32, tile: Size, width: usize, height: usize) -> Option<(usize, usize)> {
        let gx = x;
        let gy = y - self.vertical_gap;
        let outside = !gx.is_finite() || !gy.is_finite() || gx < 0.0 || gy < 0.0;
        if outside || tile.w <= 0.0 || tile.h <= 0.0 {
            return None;
        }
        let cx = (gx / tile.w) as usize;
        let cy = (gy / tile.h) as usize;
        (cx < width && cy < height).then_some((cx, cy))
    }

    pub fn cell_center(&self, x: usize, y: usize, tile: Size) -> (f32, f32) {
        (
            (x as f32 + 0.5) * tile.w,
            self.vertical_gap + (y as f32 + 0.5) * tile.h,
        )
    }

    /// Pointer position relative to the top-left corner of its cell.
    pub fn sub_cell_offset(&self, x: f32, y: f32, tile: Size) -> (f32, f32) {
        (x.rem_euclid(tile.w), (y - self.vertical_gap).rem_euclid(tile.h))
    }
}
