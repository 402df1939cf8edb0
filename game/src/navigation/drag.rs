use engine::input::{PointerAction, PointerEvent};
use engine::ui::Size;
use serde::{Deserialize, Serialize};

use super::layout::UiLayout;
use crate::error::LevelError;
use crate::level::Level;

/// A tile lifted off the grid and following the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileDrag {
    pub origin: (usize, usize),
    /// Where inside the tile it was grabbed.
    pub grab_offset: (f32, f32),
    pub pointer: (f32, f32),
}

impl TileDrag {
    /// Top-left corner of the floating tile.
    pub fn tile_position(&self) -> (f32, f32) {
        (self.pointer.0 - self.grab_offset.0, self.pointer.1 - self.grab_offset.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Ignored,
    Started((usize, usize)),
    Cancelled,
    /// Released over the tile it came from.
    Returned,
    Swapped { from: (usize, usize), to: (usize, usize) },
}

/// Drag-to-swap input for the playing stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileDragger {
    pointer: (f32, f32),
    drag: Option<TileDrag>,
}

impl TileDragger {
    pub fn current(&self) -> Option<TileDrag> {
        self.drag
    }

    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    pub fn cancel(&mut self) {
        self.drag = None;
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        layout: &UiLayout,
        tile: Size,
        level: &mut Level,
    ) -> Result<DragOutcome, LevelError> {
        self.pointer = event.position();
        if let Some(drag) = self.drag.as_mut() {
            drag.pointer = self.pointer;
        }

        let free_cell = layout
            .cell_at(event.x, event.y, tile, level.width(), level.height())
            .filter(|&(x, y)| level.is_locked(x, y) == Some(false));

        match event.action {
            PointerAction::Move => Ok(DragOutcome::Ignored),
            PointerAction::Down => match free_cell {
                Some(cell) => {
                    self.drag = Some(TileDrag {
                        origin: cell,
                        grab_offset: layout.sub_cell_offset(event.x, event.y, tile),
                        pointer: self.pointer,
                    });
                    tracing::trace!(?cell, "tile lifted");
                    Ok(DragOutcome::Started(cell))
                }
                None => Ok(self.cancelled()),
            },
            PointerAction::Up => {
                let Some(drag) = self.drag.take() else {
                    return Ok(DragOutcome::Ignored);
                };
                match free_cell {
                    Some(cell) if cell == drag.origin => Ok(DragOutcome::Returned),
                    Some(cell) => {
                        level.swap(drag.origin.0, drag.origin.1, cell.0, cell.1)?;
                        tracing::debug!(from = ?drag.origin, to = ?cell, "tiles swapped");
                        Ok(DragOutcome::Swapped {
                            from: drag.origin,
                            to: cell,
                        })
                    }
                    None => {
                        tracing::trace!(origin = ?drag.origin, "drop outside free cells");
                        Ok(DragOutcome::Cancelled)
                    }
                }
            }
        }
    }

    fn cancelled(&mut self) -> DragOutcome {
        match self.drag.take() {
            Some(_) => DragOutcome::Cancelled,
            None => DragOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::surface::SurfaceSize;

    use super::*;
    use crate::color::{Color, Corners};
    use crate::descriptor::LevelDescriptor;
    use crate::lock::TileLock;
    use crate::settings::LayoutTuning;

    // 1000x2000 screen, 5x6 level: tiles are 200x300 starting 100px down.
    fn setup(lock: TileLock) -> (UiLayout, Size, Level) {
        let layout = UiLayout::new(SurfaceSize::new(1000, 2000), &LayoutTuning::default());
        let d = LevelDescriptor::new(
            5,
            6,
            Corners::new(
                Color::rgb(255, 0, 0),
                Color::rgb(0, 255, 0),
                Color::rgb(0, 0, 255),
                Color::rgb(255, 255, 0),
            ),
            lock,
        )
        .unwrap();
        let level = Level::new_unscrambled(d);
        (layout, layout.playing_tile_size(5, 6), level)
    }

    fn center(x: usize, y: usize) -> (f32, f32) {
        (x as f32 * 200.0 + 100.0, y as f32 * 300.0 + 250.0)
    }

    #[test]
    fn drag_between_free_cells_swaps() {
        let (layout, tile, mut level) = setup(TileLock::Borders);
        let mut d = TileDragger::default();
        let (ax, ay) = center(1, 1);
        let (bx, by) = center(3, 4);
        let before = (level.get(1, 1), level.get(3, 4));

        assert_eq!(
            d.handle(PointerEvent::down(ax + 10.0, ay), &layout, tile, &mut level),
            Ok(DragOutcome::Started((1, 1)))
        );
        assert_eq!(d.current().map(|t| t.grab_offset), Some((110.0, 150.0)));

        d.handle(PointerEvent::moved(bx, by), &layout, tile, &mut level).unwrap();
        assert_eq!(d.current().map(|t| t.pointer), Some((bx, by)));

        assert_eq!(
            d.handle(PointerEvent::up(bx, by), &layout, tile, &mut level),
            Ok(DragOutcome::Swapped {
                from: (1, 1),
                to: (3, 4)
            })
        );
        assert_eq!((level.get(3, 4), level.get(1, 1)), before);
        assert!(d.current().is_none());
    }

    #[test]
    fn release_on_origin_is_a_no_op() {
        let (layout, tile, mut level) = setup(TileLock::None);
        let mut d = TileDragger::default();
        let (x, y) = center(2, 2);
        d.handle(PointerEvent::down(x, y), &layout, tile, &mut level).unwrap();
        assert_eq!(
            d.handle(PointerEvent::up(x + 5.0, y), &layout, tile, &mut level),
            Ok(DragOutcome::Returned)
        );
        assert!(level.is_solved());
    }

    #[test]
    fn drop_on_locked_or_outside_cancels() {
        let (layout, tile, mut level) = setup(TileLock::Borders);
        let mut d = TileDragger::default();
        let (x, y) = center(2, 2);
        let (lx, ly) = center(0, 0);

        d.handle(PointerEvent::down(x, y), &layout, tile, &mut level).unwrap();
        assert_eq!(
            d.handle(PointerEvent::up(lx, ly), &layout, tile, &mut level),
            Ok(DragOutcome::Cancelled)
        );

        d.handle(PointerEvent::down(x, y), &layout, tile, &mut level).unwrap();
        assert_eq!(
            d.handle(PointerEvent::up(x, 20.0), &layout, tile, &mut level),
            Ok(DragOutcome::Cancelled)
        );
        assert!(level.is_solved());
    }

    #[test]
    fn press_on_locked_tile_does_not_start() {
        let (layout, tile, mut level) = setup(TileLock::Borders);
        let mut d = TileDragger::default();
        let (lx, ly) = center(0, 3);
        assert_eq!(
            d.handle(PointerEvent::down(lx, ly), &layout, tile, &mut level),
            Ok(DragOutcome::Ignored)
        );
        let (x, y) = center(2, 2);
        assert_eq!(
            d.handle(PointerEvent::up(x, y), &layout, tile, &mut level),
            Ok(DragOutcome::Ignored)
        );
        assert!(level.is_solved());
    }

    #[test]
    fn tile_follows_grab_point() {
        let drag = TileDrag {
            origin: (0, 0),
            grab_offset: (20.0, 30.0),
            pointer: (500.0, 600.0),
        };
        assert_eq!(drag.tile_position(), (480.0, 570.0));
    }
}
