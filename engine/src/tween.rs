use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sinusoidal ease-out: fast start, gentle landing. `t` is clamped to `[0, 1]`.
pub fn ease_out_sine(t: f32) -> f32 {
    (FRAC_PI_2 * t.clamp(0.0, 1.0)).sin()
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// A fixed-length animation phase driven by accumulated frame deltas.
///
/// Elapsed time never runs past `duration`, so progress saturates at exactly 1.0 no matter how
/// large the last frame delta was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress in `[0, 1]`. A zero-length tween is always complete.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn eased(&self) -> f32 {
        ease_out_sine(self.progress())
    }

    /// Adds `dt` and returns the new linear progress.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_hits_endpoints() {
        assert_eq!(ease_out_sine(0.0), 0.0);
        assert!((ease_out_sine(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_out_sine(0.5) - (FRAC_PI_2 * 0.5).sin()).abs() < 1e-6);
    }

    #[test]
    fn ease_clamps_out_of_range_input() {
        assert_eq!(ease_out_sine(-3.0), 0.0);
        assert!((ease_out_sine(7.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn tween_accumulates_and_saturates() {
        let mut t = Tween::new(Duration::from_millis(500));
        assert_eq!(t.progress(), 0.0);

        let p = t.advance(Duration::from_millis(250));
        assert!((p - 0.5).abs() < 1e-6);
        assert!(!t.is_finished());

        // Overshooting the phase clamps rather than running past 1.0.
        let p = t.advance(Duration::from_secs(3));
        assert_eq!(p, 1.0);
        assert!(t.is_finished());
        assert_eq!(t.elapsed(), Duration::from_millis(500));
    }

    #[test]
    fn zero_length_tween_is_complete() {
        let t = Tween::new(Duration::ZERO);
        assert!(t.is_finished());
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn reset_rewinds_to_start() {
        let mut t = Tween::new(Duration::from_millis(100));
        t.advance(Duration::from_millis(100));
        t.reset();
        assert_eq!(t.elapsed(), Duration::ZERO);
        assert!(!t.is_finished());
    }
}
