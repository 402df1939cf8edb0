//! Horizontal level picker: press-to-select, drag-to-scroll, settle-on-release.
//!
//! Scroll state is an `(index, offset)` pair. A positive offset shifts the content right, which
//! reveals entries with lower indices. The pair is kept normalized so that the residual offset
//! stays within half a pitch of the centered entry.

use std::time::Duration;

use engine::input::{PointerAction, PointerEvent};
use engine::tween::{Tween, ease_out_sine, lerp};

use crate::settings::CarouselTuning;

/// Folds whole pitches of `offset` into `index`, leaving a residual in `(-pitch/2, pitch/2]`.
pub fn normalize(index: i32, offset: f32, pitch: f32) -> (i32, f32) {
    if pitch <= 0.0 || !offset.is_finite() {
        return (index, offset);
    }
    let half = pitch / 2.0;
    let adj = half - offset;
    let mut k = (adj / pitch).floor() as i32;
    let mut r = adj.rem_euclid(pitch);
    // rem_euclid rounds up to `pitch` for tiny negative `adj`.
    if r >= pitch {
        r -= pitch;
        k += 1;
    }
    (index + k, half - r)
}

/// Scroll position measured from entry 0.
pub fn global_offset(index: i32, offset: f32, pitch: f32) -> f32 {
    -(index as f32) * pitch + offset
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    /// Pointer is down but has not travelled past the tap threshold.
    Pressed { start_x: f32, start_y: f32, start_offset: f32 },
    Dragging {
        start_offset: f32,
        start_x: f32,
        delta: f32,
        catch_up: Option<Tween>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Settle {
    from: f32,
    to: f32,
    target: i32,
    tween: Tween,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    index: i32,
    offset: f32,
    len: usize,
    gesture: Gesture,
    settle: Option<Settle>,
    tuning: CarouselTuning,
}

impl Carousel {
    pub fn new(len: usize, tuning: CarouselTuning) -> Self {
        Self {
            index: 0,
            offset: 0.0,
            len,
            gesture: Gesture::Idle,
            settle: None,
            tuning,
        }
    }

    /// Entry nearest the center, which may lie past either end while scrolling.
    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Back to the first-open state for the current index: no offset, no gesture, no animation.
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.gesture = Gesture::Idle;
        self.settle = None;
    }

    /// Feeds one pointer event. Returns the selected entry when the gesture was a tap.
    pub fn pointer(&mut self, event: PointerEvent, tap_threshold: f32, pitch: f32) -> Option<usize> {
        match event.action {
            PointerAction::Down => {
                if self.settle.take().is_some() {
                    tracing::trace!(index = self.index, offset = self.offset, "settle interrupted");
                }
                self.gesture = Gesture::Pressed {
                    start_x: event.x,
                    start_y: event.y,
                    start_offset: self.offset,
                };
                None
            }
            PointerAction::Move => {
                self.moved(event, tap_threshold);
                None
            }
            PointerAction::Up => match std::mem::replace(&mut self.gesture, Gesture::Idle) {
                Gesture::Idle => {
                    tracing::trace!("pointer up without a press");
                    None
                }
                Gesture::Pressed { .. } => Some(self.select_centered(pitch)),
                Gesture::Dragging { delta, .. } => {
                    self.begin_settle(delta, pitch);
                    None
                }
            },
        }
    }

    fn moved(&mut self, event: PointerEvent, tap_threshold: f32) {
        match &mut self.gesture {
            Gesture::Idle => tracing::trace!("pointer move without a press"),
            Gesture::Pressed {
                start_x,
                start_y,
                start_offset,
            } => {
                let (start_x, start_offset) = (*start_x, *start_offset);
                let dx = event.x - start_x;
                let dy = event.y - *start_y;
                if dx * dx + dy * dy <= tap_threshold * tap_threshold {
                    return;
                }
                let snap_time = self.tuning.snap_time;
                let catch_up = (!snap_time.is_zero()).then(|| Tween::new(snap_time));
                self.offset = if catch_up.is_some() { start_offset } else { start_offset + dx };
                self.gesture = Gesture::Dragging {
                    start_offset,
                    start_x,
                    delta: dx,
                    catch_up,
                };
                tracing::trace!(delta = dx, "press became a drag");
            }
            Gesture::Dragging {
                start_offset,
                start_x,
                delta,
                catch_up,
            } => {
                *delta = event.x - *start_x;
                self.offset = match catch_up {
                    Some(t) => *start_offset + t.eased() * *delta,
                    None => *start_offset + *delta,
                };
            }
        }
    }

    /// Advances the catch-up or settle animation.
    pub fn update(&mut self, dt: Duration, pitch: f32) {
        if let Gesture::Dragging {
            start_offset,
            delta,
            catch_up,
            ..
        } = &mut self.gesture
        {
            if let Some(tween) = catch_up {
                tween.advance(dt);
                if tween.is_finished() {
                    *catch_up = None;
                    self.offset = *start_offset + *delta;
                } else {
                    self.offset = *start_offset + tween.eased() * *delta;
                }
            }
            return;
        }

        let Some(settle) = self.settle.as_mut() else {
            return;
        };
        settle.tween.advance(dt);
        if settle.tween.is_finished() {
            self.index = settle.target;
            self.offset = 0.0;
            tracing::debug!(index = self.index, "carousel settled");
            self.settle = None;
            return;
        }
        let global = lerp(settle.from, settle.to, ease_out_sine(settle.tween.progress()));
        let (index, offset) = normalize(0, global, pitch);
        self.index = index;
        self.offset = offset;
    }

    fn clamp_index(&self, index: i32) -> i32 {
        let last = self.len.saturating_sub(1).min(i32::MAX as usize) as i32;
        index.clamp(0, last)
    }

    fn select_centered(&mut self, pitch: f32) -> usize {
        let (index, offset) = normalize(self.index, self.offset, pitch);
        let selected = self.clamp_index(index);
        self.index = selected;
        self.offset = if selected == index { offset } else { 0.0 };
        tracing::debug!(index = selected, "carousel entry tapped");
        selected as usize
    }

    fn begin_settle(&mut self, delta: f32, pitch: f32) {
        let (start_index, start_offset) = normalize(self.index, self.offset, pitch);
        let mut target = start_index;
        if self.tuning.flick_to_neighbor && start_index == self.index && delta != 0.0 {
            target -= delta.signum() as i32;
        }
        let target = self.clamp_index(target);

        self.index = start_index;
        self.offset = start_offset;
        self.settle = Some(Settle {
            from: global_offset(start_index, start_offset, pitch),
            to: global_offset(target, 0.0, pitch),
            target,
            tween: Tween::new(self.tuning.scroll_time),
        });
        tracing::trace!(from = start_index, to = target, "carousel settling");
        if self.tuning.scroll_time.is_zero() {
            self.update(Duration::ZERO, pitch);
        }
    }
}
