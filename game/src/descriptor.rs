use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::color::{Color, Corners, NAMED_COLORS};
use crate::error::DescriptorError;
use crate::grid::Grid;
use crate::lock::TileLock;

pub const FIELD_DELIMITER: char = ';';
pub const FIELD_COUNT: usize = 7;
pub const MIN_LEVEL_DIMENSION: u32 = 2;
pub const MAX_LEVEL_DIMENSION: u32 = 64;

pub const DEFAULT_RANDOM_WIDTH: u32 = 9;
pub const DEFAULT_RANDOM_HEIGHT: u32 = 10;
pub const DEFAULT_RANDOM_LOCK: TileLock = TileLock::Borders;

const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "top_left",
    "top_right",
    "bottom_right",
    "bottom_left",
    "width",
    "height",
    "lock",
];

/// Where randomly generated levels take their corner colors from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSource {
    /// Four distinct entries of [`NAMED_COLORS`].
    Palette,
    /// Four uniformly random opaque RGB colors.
    Rgb,
}

/// Immutable blueprint of a level: grid size, gradient corners and lock pattern.
///
/// Serializes as `top_left;top_right;bottom_right;bottom_left;width;height;lock`, with colors as
/// packed signed ARGB integers and the lock as its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelDescriptor {
    width: u32,
    height: u32,
    corners: Corners,
    lock: TileLock,
}

impl LevelDescriptor {
    pub fn new(width: u32, height: u32, corners: Corners, lock: TileLock) -> Result<Self, DescriptorError> {
        check_dimensions(width as i64, height as i64)?;
        Ok(Self {
            width,
            height,
            corners,
            lock,
        })
    }

    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        source: ColorSource,
        width: u32,
        height: u32,
        lock: TileLock,
    ) -> Result<Self, DescriptorError> {
        let [top_left, top_right, bottom_right, bottom_left] = random_colors(rng, source);
        Self::new(
            width,
            height,
            Corners::new(top_left, top_right, bottom_right, bottom_left),
            lock,
        )
    }

    /// A random 9x10 level with locked borders.
    pub fn random_default<R: Rng + ?Sized>(rng: &mut R, source: ColorSource) -> Self {
        let [top_left, top_right, bottom_right, bottom_left] = random_colors(rng, source);
        Self {
            width: DEFAULT_RANDOM_WIDTH,
            height: DEFAULT_RANDOM_HEIGHT,
            corners: Corners::new(top_left, top_right, bottom_right, bottom_left),
            lock: DEFAULT_RANDOM_LOCK,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn corners(&self) -> Corners {
        self.corners
    }

    pub fn lock(&self) -> TileLock {
        self.lock
    }

    /// The solved color layout this descriptor describes.
    pub fn gradient(&self) -> Grid<Color> {
        let (w, h) = (self.width as usize, self.height as usize);
        Grid::from_fn(w, h, |x, y| self.corners.cell(x, y, w, h))
    }

    pub fn lock_mask(&self) -> Grid<bool> {
        self.lock.mask(self.width as usize, self.height as usize)
    }
}

impl fmt::Display for LevelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = FIELD_DELIMITER;
        write!(
            f,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            self.corners.top_left.to_argb(),
            self.corners.top_right.to_argb(),
            self.corners.bottom_right.to_argb(),
            self.corners.bottom_left.to_argb(),
            self.width,
            self.height,
            self.lock.ordinal(),
        )
    }
}

impl FromStr for LevelDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(FIELD_DELIMITER).collect();
        if fields.len() != FIELD_COUNT {
            return Err(DescriptorError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }

        let mut values = [0i32; FIELD_COUNT];
        for (i, raw) in fields.iter().enumerate() {
            values[i] = raw.parse().map_err(|source| DescriptorError::InvalidInteger {
                field: FIELD_NAMES[i],
                value: (*raw).to_string(),
                source,
            })?;
        }
        let [tl, tr, br, bl, width, height, lock] = values;

        check_dimensions(width as i64, height as i64)?;
        Ok(Self {
            width: width as u32,
            height: height as u32,
            corners: Corners::new(
                Color::from_argb(tl),
                Color::from_argb(tr),
                Color::from_argb(br),
                Color::from_argb(bl),
            ),
            lock: TileLock::try_from(lock)?,
        })
    }
}

fn check_dimensions(width: i64, height: i64) -> Result<(), DescriptorError> {
    let range = MIN_LEVEL_DIMENSION as i64..=MAX_LEVEL_DIMENSION as i64;
    if range.contains(&width) && range.contains(&height) {
        Ok(())
    } else {
        Err(DescriptorError::Dimensions {
            width,
            height,
            min: MIN_LEVEL_DIMENSION,
            max: MAX_LEVEL_DIMENSION,
        })
    }
}

fn random_colors<R: Rng + ?Sized>(rng: &mut R, source: ColorSource) -> [Color; 4] {
    match source {
        ColorSource::Palette => {
            let picks = index::sample(rng, NAMED_COLORS.len(), 4);
            let mut out = [Color::BLACK; 4];
            for (slot, i) in out.iter_mut().zip(picks.iter()) {
                *slot = NAMED_COLORS[i].1;
            }
            out
        }
        ColorSource::Rgb => std::array::from_fn(|_| Color::rgb(rng.random(), rng.random(), rng.random())),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn sample() -> LevelDescriptor {
        LevelDescriptor::new(
            9,
            10,
            Corners::new(
                Color::rgb(30, 144, 255),
                Color::rgb(255, 215, 0),
                Color::rgb(220, 20, 60),
                Color::rgb(46, 139, 87),
            ),
            TileLock::Borders,
        )
        .unwrap()
    }

    #[test]
    fn serializes_seven_fields_in_corner_order() {
        assert_eq!(
            sample().to_string(),
            "-14774017;-10496;-2354116;-13726889;9;10;1"
        );
    }

    #[test]
    fn parses_what_it_prints() {
        let d = sample();
        assert_eq!(d.to_string().parse::<LevelDescriptor>(), Ok(d));
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            "1;2;3;4;5;6".parse::<LevelDescriptor>(),
            Err(DescriptorError::FieldCount {
                expected: 7,
                found: 6
            })
        );
        assert!(matches!(
            "1;2;3;4;5;6;0;0".parse::<LevelDescriptor>(),
            Err(DescriptorError::FieldCount { found: 8, .. })
        ));
    }

    #[test]
    fn names_the_non_numeric_field() {
        let err = "1;2;3;4;five;6;0".parse::<LevelDescriptor>().unwrap_err();
        assert!(matches!(
            err,
            DescriptorError::InvalidInteger { field: "width", ref value, .. } if value == "five"
        ));
    }

    #[test]
    fn rejects_bad_lock_and_dimensions() {
        assert_eq!(
            "1;2;3;4;5;6;7".parse::<LevelDescriptor>(),
            Err(DescriptorError::UnknownLock(7))
        );
        assert!(matches!(
            "1;2;3;4;1;6;0".parse::<LevelDescriptor>(),
            Err(DescriptorError::Dimensions { width: 1, .. })
        ));
        assert!(matches!(
            "1;2;3;4;5;-6;0".parse::<LevelDescriptor>(),
            Err(DescriptorError::Dimensions { height: -6, .. })
        ));
        assert!(LevelDescriptor::new(65, 2, sample().corners(), TileLock::None).is_err());
    }

    #[test]
    fn palette_levels_use_four_distinct_named_colors() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let d = LevelDescriptor::random(&mut rng, ColorSource::Palette, 4, 5, TileLock::None).unwrap();
            let colors = d.corners().to_array();
            for (i, c) in colors.iter().enumerate() {
                assert!(NAMED_COLORS.iter().any(|(_, n)| n == c));
                assert!(colors[i + 1..].iter().all(|o| o != c));
            }
        }
    }

    #[test]
    fn default_random_level_is_nine_by_ten_with_borders() {
        let mut rng = SmallRng::seed_from_u64(1);
        let d = LevelDescriptor::random_default(&mut rng, ColorSource::Rgb);
        assert_eq!((d.width(), d.height(), d.lock()), (9, 10, TileLock::Borders));
        assert!(d.corners().to_array().iter().all(|c| c.a == 255));
    }

    #[test]
    fn gradient_corners_match_descriptor() {
        let d = sample();
        let g = d.gradient();
        let c = d.corners();
        assert_eq!(g.get(0, 0), Some(&c.top_left));
        assert_eq!(g.get(8, 0), Some(&c.top_right));
        assert_eq!(g.get(8, 9), Some(&c.bottom_right));
        assert_eq!(g.get(0, 9), Some(&c.bottom_left));
    }
}
