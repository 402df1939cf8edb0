use engine::ui::{Rect, Size};

use super::layout::UiLayout;
use crate::level::Level;

/// Title screen: a nearly solved decoration puzzle above a single begin button.
#[derive(Debug, Clone, PartialEq)]
pub struct StartScreen {
    level: Level,
    button: Rect,
    tile_size: Size,
}

impl StartScreen {
    pub fn new(level: Level, layout: &UiLayout) -> Self {
        let side = level.width().max(level.height()) as u32;
        Self {
            button: layout.start_button(),
            tile_size: layout.start_tile_size(side),
            level,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn button(&self) -> Rect {
        self.button
    }

    pub fn tile_size(&self) -> Size {
        self.tile_size
    }

    pub fn tile_rect(&self, x: usize, y: usize) -> Rect {
        Rect::new(
            x as f32 * self.tile_size.w,
            y as f32 * self.tile_size.h,
            self.tile_size.w,
            self.tile_size.h,
        )
    }

    pub fn hits_button(&self, x: f32, y: f32) -> bool {
        self.button.contains(x, y)
    }
}
