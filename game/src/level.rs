use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::color::Color;
use crate::descriptor::LevelDescriptor;
use crate::error::LevelError;
use crate::grid::Grid;

/// Rejected shuffles before [`Level::randomize`] switches to a constructed derangement.
pub const MAX_SHUFFLE_ATTEMPTS: u32 = 1_000;

/// One playable puzzle: the solved gradient, the tiles as the player currently sees them, and
/// which tiles are pinned in place.
///
/// Locked tiles always show their solution color; only [`Level::swap`] and
/// [`Level::randomize`] change `tiles`, and both skip locked cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    descriptor: LevelDescriptor,
    solution: Grid<Color>,
    tiles: Grid<Color>,
    locked: Grid<bool>,
}

impl Level {
    pub fn new_unscrambled(descriptor: LevelDescriptor) -> Self {
        let solution = descriptor.gradient();
        Self {
            descriptor,
            tiles: solution.clone(),
            solution,
            locked: descriptor.lock_mask(),
        }
    }

    pub fn new_scrambled<R: Rng + ?Sized>(descriptor: LevelDescriptor, rng: &mut R) -> Result<Self, LevelError> {
        let mut level = Self::new_unscrambled(descriptor);
        level.randomize(rng)?;
        Ok(level)
    }

    /// Start-screen decoration: solved except for one swapped pair near opposite corners.
    pub fn new_ambient(descriptor: LevelDescriptor) -> Self {
        let mut level = Self::new_unscrambled(descriptor);
        let (w, h) = (level.width(), level.height());
        if w >= 2 && h >= 2 {
            let a = (1, 1);
            let b = (w - 2, h - 2);
            if a != b && level.swap(a.0, a.1, b.0, b.1).is_err() {
                tracing::trace!(?a, ?b, "ambient swap touches a locked tile; leaving level solved");
            }
        }
        level
    }

    pub fn descriptor(&self) -> &LevelDescriptor {
        &self.descriptor
    }

    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        self.tiles.in_bounds(x, y)
    }

    /// Current color at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        self.tiles.get(x, y).copied()
    }

    pub fn solution(&self, x: usize, y: usize) -> Option<Color> {
        self.solution.get(x, y).copied()
    }

    pub fn is_locked(&self, x: usize, y: usize) -> Option<bool> {
        self.locked.get(x, y).copied()
    }

    pub fn tiles(&self) -> &Grid<Color> {
        &self.tiles
    }

    pub fn free_tile_count(&self) -> usize {
        self.locked.iter().filter(|(_, l)| !**l).count()
    }

    pub fn is_solved(&self) -> bool {
        self.tiles
            .iter()
            .zip(self.solution.iter())
            .all(|((_, current), (_, solved))| current.same_rgb(*solved))
    }

    /// Exchanges the current colors of two free tiles.
    pub fn swap(&mut self, x1: usize, y1: usize, x2: usize, y2: usize) -> Result<(), LevelError> {
        for (x, y) in [(x1, y1), (x2, y2)] {
            match self.locked.get(x, y) {
                None => {
                    return Err(LevelError::OutOfBounds {
                        x,
                        y,
                        width: self.width(),
                        height: self.height(),
                    });
                }
                Some(true) => return Err(LevelError::LockedTile { x, y }),
                Some(false) => {}
            }
        }
        self.tiles.swap((x1, y1), (x2, y2));
        Ok(())
    }

    /// Whether [`Level::randomize`] can succeed: no free tiles, or at least two free tiles with
    /// no color filling more than half of them.
    pub fn check_scramble(&self) -> Result<(), LevelError> {
        let targets: Vec<Color> = self
            .free_spots()
            .into_iter()
            .map(|(x, y)| self.solution_at(x, y))
            .collect();
        check_derangement(&targets).map(|_| ())
    }

    /// Scrambles the free tiles so that none of them shows its own solution color.
    ///
    /// Colors are compared by value, so free tiles that happen to share a color are
    /// interchangeable. Locked tiles are untouched.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), LevelError> {
        self.randomize_with_budget(rng, MAX_SHUFFLE_ATTEMPTS)
    }

    fn randomize_with_budget<R: Rng + ?Sized>(&mut self, rng: &mut R, budget: u32) -> Result<(), LevelError> {
        let spots = self.free_spots();
        if spots.is_empty() {
            return Ok(());
        }

        let targets: Vec<Color> = spots.iter().map(|&(x, y)| self.solution_at(x, y)).collect();
        let repeated = check_derangement(&targets)?;

        let mut colors = targets.clone();
        let mut attempts = 0;
        let mut deranged = false;
        while attempts < budget {
            colors.shuffle(rng);
            attempts += 1;
            if colors.iter().zip(&targets).all(|(c, t)| !c.same_rgb(*t)) {
                deranged = true;
                break;
            }
        }
        if !deranged {
            tracing::warn!(
                attempts,
                free = targets.len(),
                repeated,
                "shuffle kept fixing tiles in place; using a rotated derangement"
            );
            colors = rotated_derangement(&targets, repeated);
        }

        for (&(x, y), color) in spots.iter().zip(colors) {
            if let Some(tile) = self.tiles.get_mut(x, y) {
                *tile = color;
            }
        }
        tracing::debug!(
            width = self.width(),
            height = self.height(),
            free = spots.len(),
            attempts,
            "level scrambled"
        );
        Ok(())
    }

    /// A swap of two free tiles that puts at least one of them in its solved place.
    ///
    /// Misplaced free tiles hold exactly the colors their cells are missing, so one always exists
    /// until the level is solved.
    pub fn hint(&self) -> Option<((usize, usize), (usize, usize))> {
        let misplaced: Vec<(usize, usize)> = self
            .locked
            .iter()
            .filter(|&((x, y), l)| !*l && !self.get(x, y).is_some_and(|c| c.same_rgb(self.solution_at(x, y))))
            .map(|(pos, _)| pos)
            .collect();

        let &target = misplaced.first()?;
        let wanted = self.solution_at(target.0, target.1);
        misplaced
            .iter()
            .copied()
            .find(|&(x, y)| (x, y) != target && self.get(x, y).is_some_and(|c| c.same_rgb(wanted)))
            .map(|source| (source, target))
    }

    fn free_spots(&self) -> Vec<(usize, usize)> {
        self.locked
            .iter()
            .filter(|(_, l)| !**l)
            .map(|(pos, _)| pos)
            .collect()
    }

    fn solution_at(&self, x: usize, y: usize) -> Color {
        self.solution.get(x, y).copied().unwrap_or(Color::BLACK)
    }
}

/// Returns the largest color multiplicity among `targets` if they admit a derangement.
fn check_derangement(targets: &[Color]) -> Result<usize, LevelError> {
    if targets.len() == 1 {
        return Err(LevelError::SingletonFreeTile);
    }
    // A multiset has a derangement iff no value fills more than half the slots.
    let repeated = max_multiplicity(targets);
    if repeated * 2 > targets.len() {
        return Err(LevelError::NoDerangement {
            free: targets.len(),
            repeated,
        });
    }
    Ok(repeated)
}

fn max_multiplicity(colors: &[Color]) -> usize {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for c in colors {
        *counts.entry(c.rgb_key()).or_default() += 1;
    }
    counts.into_values().max().unwrap_or(0)
}

/// Orders slots by color and hands each slot the color `repeated` places further along.
///
/// Equal colors form contiguous runs no longer than `repeated <= len / 2`, so every slot lands
/// outside its own run.
fn rotated_derangement(targets: &[Color], repeated: usize) -> Vec<Color> {
    let mut order: Vec<usize> = (0..targets.len()).collect();
    order.sort_by_key(|&i| targets[i].rgb_key());

    let n = order.len();
    let mut out = targets.to_vec();
    for (k, &slot) in order.iter().enumerate() {
        out[slot] = targets[order[(k + repeated) % n]];
    }
    out
}
