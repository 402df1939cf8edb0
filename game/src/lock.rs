use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;
use crate::grid::Grid;

/// Which cells of a level can never be moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileLock {
    #[default]
    None,
    Borders,
    Checkered,
}

impl TileLock {
    pub const ALL: [TileLock; 3] = [TileLock::None, TileLock::Borders, TileLock::Checkered];

    pub fn ordinal(self) -> i32 {
        match self {
            TileLock::None => 0,
            TileLock::Borders => 1,
            TileLock::Checkered => 2,
        }
    }

    /// Whether cell `(x, y)` of a `width x height` grid is locked.
    ///
    /// Coordinates are folded onto the top-left quadrant first, so every pattern is symmetric
    /// about both axes.
    pub fn is_locked(self, x: usize, y: usize, width: usize, height: usize) -> bool {
        let ax = mirror(x, width);
        let ay = mirror(y, height);
        match self {
            TileLock::None => false,
            TileLock::Borders => ax == 0 || ay == 0,
            TileLock::Checkered => (ax + ay) % 2 == 0,
        }
    }

    pub fn mask(self, width: usize, height: usize) -> Grid<bool> {
        Grid::from_fn(width, height, |x, y| self.is_locked(x, y, width, height))
    }
}

impl TryFrom<i32> for TileLock {
    type Error = DescriptorError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        TileLock::ALL
            .into_iter()
            .find(|lock| lock.ordinal() == value)
            .ok_or(DescriptorError::UnknownLock(value))
    }
}

fn mirror(i: usize, len: usize) -> usize {
    i.min(len.saturating_sub(1).saturating_sub(i))
}
