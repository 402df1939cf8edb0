use std::fmt;
use std::str::FromStr;

use crate::descriptor::LevelDescriptor;
use crate::error::CatalogError;
use crate::level::Level;

pub const RECORD_SEPARATOR: char = ' ';

/// The level set shipped with the game.
pub const DEFAULT_LEVEL_SET: &str = "-14774017;-10496;-2354116;-13726889;5;6;1 \
-32944;-7114533;-16724271;-1331;6;7;1 \
-16777216;-1;-1;-16777216;7;7;2 \
-40121;-12490271;-6632142;-1146130;8;9;1 \
-12042869;-360334;-989556;-14634326;9;10;1 \
-60269;-16728065;-8388864;-29696;9;10;2 \
-15132304;-6987;-5103070;-6751336;10;12;1";

/// Ordered, non-empty, immutable list of level blueprints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<LevelDescriptor>,
}

impl LevelCatalog {
    /// Parses space-separated level records.
    ///
    /// Leading and trailing whitespace is ignored; records are separated by exactly one space,
    /// so a doubled space yields an empty record and fails the whole parse. Every record must
    /// describe a level that can be scrambled.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::Empty);
        }

        let levels = trimmed
            .split(RECORD_SEPARATOR)
            .enumerate()
            .map(|(index, record)| {
                if record.is_empty() {
                    return Err(CatalogError::EmptyRecord { index });
                }
                record
                    .parse::<LevelDescriptor>()
                    .map_err(|source| CatalogError::Record { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Self::from_levels(levels)?;
        tracing::debug!(levels = catalog.len(), "level catalog parsed");
        Ok(catalog)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(DEFAULT_LEVEL_SET)
    }

    pub fn from_levels(levels: Vec<LevelDescriptor>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, descriptor) in levels.iter().enumerate() {
            Level::new_unscrambled(*descriptor)
                .check_scramble()
                .map_err(|source| CatalogError::Unplayable { index, source })?;
        }
        Ok(Self { levels })
    }

    #[cfg(test)]
    pub(crate) fn from_levels_unchecked(levels: Vec<LevelDescriptor>) -> Self {
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelDescriptor> {
        self.levels.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LevelDescriptor> {
        self.levels.iter()
    }
}

impl FromStr for LevelCatalog {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LevelCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.levels.iter().enumerate() {
            if i > 0 {
                write!(f, "{RECORD_SEPARATOR}")?;
            }
            write!(f, "{level}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a LevelCatalog {
    type Item = &'a LevelDescriptor;
    type IntoIter = std::slice::Iter<'a, LevelDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}
