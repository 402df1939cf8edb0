use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::descriptor::{MAX_LEVEL_DIMENSION, MIN_LEVEL_DIMENSION};

pub const SETTINGS_PATH_ENV: &str = "PAFLAMY_SETTINGS_PATH";

/// Screen-relative proportions. Fractions of width are `*_w`-based, fractions of height `*_h`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutTuning {
    /// Pointer travel (fraction of screen width) that turns a tap into a drag.
    pub tap_threshold_frac: f32,
    /// Space above and below the playing grid, as a fraction of screen height.
    pub vertical_gap_frac: f32,
    /// Carousel level width as a fraction of screen width.
    pub level_scale: f32,
    pub menu_y_padding_frac: f32,
    pub level_margin_frac: f32,
    /// Carousel entries drawn on each side of the centered one.
    pub neighboring_levels: u32,
    /// Side length of the start screen's decoration level.
    pub start_level_size: u32,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            tap_threshold_frac: 0.05,
            vertical_gap_frac: 0.05,
            level_scale: 0.6,
            menu_y_padding_frac: 0.15,
            level_margin_frac: 0.09,
            neighboring_levels: 2,
            start_level_size: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CarouselTuning {
    /// Settle animation after a drag is released.
    #[serde(with = "crate::serde_duration")]
    pub scroll_time: Duration,
    /// Catch-up animation when a press turns into a drag.
    #[serde(with = "crate::serde_duration")]
    pub snap_time: Duration,
    /// Short drags that stay within the current slot still move one entry in the drag direction.
    pub flick_to_neighbor: bool,
}

impl Default for CarouselTuning {
    fn default() -> Self {
        Self {
            scroll_time: Duration::from_millis(500),
            snap_time: Duration::from_millis(100),
            flick_to_neighbor: false,
        }
    }
}

/// Menu-to-playing zoom. The cover fade must finish no later than the zoom.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransitionTuning {
    #[serde(with = "crate::serde_duration")]
    pub fadeout_time: Duration,
    #[serde(with = "crate::serde_duration")]
    pub zoomin_delay: Duration,
    #[serde(with = "crate::serde_duration")]
    pub zoomin_time: Duration,
}

impl Default for TransitionTuning {
    fn default() -> Self {
        Self {
            fadeout_time: Duration::from_millis(800),
            zoomin_delay: Duration::from_millis(200),
            zoomin_time: Duration::from_millis(1200),
        }
    }
}

impl TransitionTuning {
    pub fn total(&self) -> Duration {
        self.zoomin_delay + self.zoomin_time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaflamySettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub layout: LayoutTuning,
    #[serde(default)]
    pub carousel: CarouselTuning,
    #[serde(default)]
    pub transition: TransitionTuning,
}

impl Default for PaflamySettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            layout: LayoutTuning::default(),
            carousel: CarouselTuning::default(),
            transition: TransitionTuning::default(),
        }
    }
}

impl PaflamySettings {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(text).map(Self::sanitized)
    }

    pub fn sanitized(mut self) -> Self {
        let defaults = LayoutTuning::default();
        let layout = &mut self.layout;
        layout.tap_threshold_frac = clamp_frac(layout.tap_threshold_frac, 0.0, 0.5, defaults.tap_threshold_frac);
        layout.vertical_gap_frac = clamp_frac(layout.vertical_gap_frac, 0.0, 0.45, defaults.vertical_gap_frac);
        layout.level_scale = clamp_frac(layout.level_scale, 0.1, 1.0, defaults.level_scale);
        layout.menu_y_padding_frac = clamp_frac(layout.menu_y_padding_frac, 0.0, 0.45, defaults.menu_y_padding_frac);
        layout.level_margin_frac = clamp_frac(layout.level_margin_frac, 0.0, 1.0, defaults.level_margin_frac);
        layout.neighboring_levels = layout.neighboring_levels.min(8);
        layout.start_level_size = layout
            .start_level_size
            .clamp(MIN_LEVEL_DIMENSION, MAX_LEVEL_DIMENSION);

        let transition = &mut self.transition;
        if transition.fadeout_time > transition.total() {
            tracing::warn!(
                fadeout_ms = transition.fadeout_time.as_millis() as u64,
                total_ms = transition.total().as_millis() as u64,
                "cover fade outlasts the zoom; shortening it"
            );
            transition.fadeout_time = transition.total();
        }

        self.version = default_version();
        self
    }
}

fn default_version() -> u32 {
    1
}

fn clamp_frac(v: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if v.is_finite() { v.clamp(min, max) } else { fallback }
}

/// Locates the optional tuning file. Settings are read-only; nothing is ever written back.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os(SETTINGS_PATH_ENV) {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("paflamy");
        path.push("settings.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> io::Result<PaflamySettings> {
        let text = fs::read_to_string(&self.path)?;
        PaflamySettings::from_json(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Loads the tuning file, falling back to defaults when it is missing or malformed.
    pub fn load(&self) -> PaflamySettings {
        match self.try_load() {
            Ok(settings) => {
                tracing::info!(path = %self.path.display(), "settings loaded");
                settings
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no settings file; using defaults");
                PaflamySettings::default()
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring unreadable settings");
                PaflamySettings::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_satisfy_the_transition_invariant() {
        let t = TransitionTuning::default();
        assert!(t.fadeout_time <= t.total());
        assert_eq!(t.total(), Duration::from_millis(1400));
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let parsed = PaflamySettings::from_json(r#"{"carousel":{"scroll_time":250}}"#)
            .expect("settings JSON should parse");
        assert_eq!(parsed.carousel.scroll_time, Duration::from_millis(250));
        assert_eq!(parsed.carousel.snap_time, Duration::from_millis(100));
        assert_eq!(parsed.layout, LayoutTuning::default());
        assert_eq!(parsed.transition, TransitionTuning::default());
    }

    #[test]
    fn durations_serialize_as_milliseconds() {
        let json = serde_json::to_value(PaflamySettings::default()).unwrap();
        assert_eq!(json["transition"]["zoomin_time"], 1200);
        assert_eq!(json["carousel"]["flick_to_neighbor"], false);
    }

    #[test]
    fn absurd_durations_are_rejected() {
        assert!(PaflamySettings::from_json(r#"{"transition":{"zoomin_time":3600000}}"#).is_err());
    }

    #[test]
    fn sanitized_clamps_layout_and_repairs_fade() {
        let settings = PaflamySettings {
            version: 42,
            layout: LayoutTuning {
                tap_threshold_frac: 3.0,
                level_scale: f32::NAN,
                neighboring_levels: 100,
                start_level_size: 1,
                ..LayoutTuning::default()
            },
            transition: TransitionTuning {
                fadeout_time: Duration::from_secs(5),
                ..TransitionTuning::default()
            },
            ..PaflamySettings::default()
        }
        .sanitized();

        assert_eq!(settings.version, 1);
        assert_eq!(settings.layout.tap_threshold_frac, 0.5);
        assert_eq!(settings.layout.level_scale, 0.6);
        assert_eq!(settings.layout.neighboring_levels, 8);
        assert_eq!(settings.layout.start_level_size, 2);
        assert_eq!(settings.transition.fadeout_time, Duration::from_millis(1400));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let store = SettingsStore::new("/nonexistent/paflamy/settings.json");
        assert!(store.try_load().is_err());
        assert_eq!(store.load(), PaflamySettings::default());
    }
}
