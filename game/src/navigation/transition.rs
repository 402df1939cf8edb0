use std::time::Duration;

use engine::tween::{Tween, ease_out_sine};
use serde::{Deserialize, Serialize};

use super::layout::UiLayout;
use crate::settings::TransitionTuning;

/// Interpolated menu-to-playing values for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MtpFrame {
    /// Opacity of the playing background drawn over the menu.
    pub cover_alpha: f32,
    pub level_scale: f32,
    pub offset: f32,
    pub x_padding: f32,
    pub y_padding: f32,
}

/// The zoom from a carousel entry into the full-screen level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MtpTransition {
    index: usize,
    menu_offset: f32,
    tuning: TransitionTuning,
    clock: Tween,
}

impl MtpTransition {
    pub fn new(index: usize, menu_offset: f32, tuning: TransitionTuning) -> Self {
        Self {
            index,
            menu_offset,
            tuning,
            clock: Tween::new(tuning.total()),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    /// Returns `true` once the zoom has fully completed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.clock.advance(dt);
        self.clock.is_finished()
    }

    pub fn fade(&self) -> f32 {
        ease_out_sine(ratio(self.elapsed(), self.tuning.fadeout_time))
    }

    pub fn zoom(&self) -> f32 {
        let since = self.elapsed().saturating_sub(self.tuning.zoomin_delay);
        ease_out_sine(ratio(since, self.tuning.zoomin_time))
    }

    pub fn frame(&self, layout: &UiLayout) -> MtpFrame {
        let zoom = self.zoom();
        MtpFrame {
            cover_alpha: self.fade(),
            level_scale: layout.level_scale + zoom * (1.0 - layout.level_scale),
            offset: self.menu_offset * (1.0 - zoom),
            x_padding: layout.x_padding * (1.0 - zoom),
            y_padding: layout.y_padding + zoom * (layout.vertical_gap - layout.y_padding),
        }
    }
}

fn ratio(t: Duration, span: Duration) -> f32 {
    if span.is_zero() {
        1.0
    } else {
        (t.as_secs_f32() / span.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use engine::surface::SurfaceSize;

    use super::*;
    use crate::settings::LayoutTuning;

    fn layout() -> UiLayout {
        UiLayout::new(SurfaceSize::new(1000, 2000), &LayoutTuning::default())
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn first_frame_matches_the_menu() {
        let l = layout();
        let t = MtpTransition::new(2, 35.0, TransitionTuning::default());
        let f = t.frame(&l);
        assert_eq!(f.cover_alpha, 0.0);
        assert!(approx(f.level_scale, 0.6));
        assert!(approx(f.offset, 35.0));
        assert!(approx(f.x_padding, l.x_padding));
        assert!(approx(f.y_padding, l.y_padding));
    }

    #[test]
    fn zoom_waits_for_its_delay() {
        let mut t = MtpTransition::new(0, 0.0, TransitionTuning::default());
        assert!(!t.advance(Duration::from_millis(200)));
        assert_eq!(t.zoom(), 0.0);
        assert!(t.fade() > 0.0);
    }

    #[test]
    fn fade_completes_before_zoom() {
        let mut t = MtpTransition::new(0, 0.0, TransitionTuning::default());
        t.advance(Duration::from_millis(800));
        assert!(approx(t.fade(), 1.0));
        assert!(t.zoom() < 1.0);
    }

    #[test]
    fn overshoot_clamps_to_the_final_frame() {
        let l = layout();
        let mut t = MtpTransition::new(1, -80.0, TransitionTuning::default());
        assert!(t.advance(Duration::from_secs(10)));
        assert_eq!(t.elapsed(), Duration::from_millis(1400));

        let f = t.frame(&l);
        assert!(approx(f.cover_alpha, 1.0));
        assert!(approx(f.level_scale, 1.0));
        assert!(approx(f.offset, 0.0));
        assert!(approx(f.x_padding, 0.0));
        assert!(approx(f.y_padding, l.vertical_gap));
    }
}
