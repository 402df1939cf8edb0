use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::catalog::LevelCatalog;
use crate::descriptor::{ColorSource, LevelDescriptor};
use crate::error::{DescriptorError, SessionError};
use crate::level::Level;
use crate::lock::TileLock;

/// Owns the level set, which entry is active, the active [`Level`], and the one random source
/// every shuffle draws from.
#[derive(Debug, Clone)]
pub struct GameSession<R = SmallRng> {
    catalog: LevelCatalog,
    level_index: usize,
    level: Option<Level>,
    rng: R,
}

impl GameSession<SmallRng> {
    pub fn new(catalog: LevelCatalog) -> Self {
        Self::with_rng(catalog, SmallRng::from_os_rng())
    }

    pub fn seeded(catalog: LevelCatalog, seed: u64) -> Self {
        Self::with_rng(catalog, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(catalog: LevelCatalog, rng: R) -> Self {
        Self {
            catalog,
            level_index: 0,
            level: None,
            rng,
        }
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// The materialized level, if any entry has been opened yet.
    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut Level> {
        self.level.as_mut()
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Makes catalog entry `index` the active level, scrambled and ready to play.
    pub fn advance(&mut self, index: usize) -> Result<&Level, SessionError> {
        let descriptor = self.descriptor(index)?;
        let level = Level::new_scrambled(descriptor, &mut self.rng)?;
        Ok(self.install(index, level, true))
    }

    /// Makes catalog entry `index` the active level in its solved layout.
    pub fn advance_unscrambled(&mut self, index: usize) -> Result<&Level, SessionError> {
        let descriptor = self.descriptor(index)?;
        Ok(self.install(index, Level::new_unscrambled(descriptor), false))
    }

    /// A random, lock-free decoration level for the start screen. Never part of the catalog.
    pub fn ambient_level(&mut self, width: u32, height: u32) -> Result<Level, DescriptorError> {
        let descriptor = LevelDescriptor::random(&mut self.rng, ColorSource::Palette, width, height, TileLock::None)?;
        Ok(Level::new_ambient(descriptor))
    }

    fn descriptor(&self, index: usize) -> Result<LevelDescriptor, SessionError> {
        self.catalog
            .get(index)
            .copied()
            .ok_or(SessionError::IndexOutOfRange {
                index,
                len: self.catalog.len(),
            })
    }

    fn install(&mut self, index: usize, level: Level, scrambled: bool) -> &Level {
        tracing::debug!(
            index,
            width = level.width(),
            height = level.height(),
            scrambled,
            "level activated"
        );
        self.level_index = index;
        self.level.insert(level)
    }
}
