pub mod input;
pub mod surface;
pub mod tween;
pub mod ui;

use std::time::Duration;

use crate::input::PointerEvent;

/// Everything a platform host feeds into an app, on one logical thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Pointer(PointerEvent),
    Frame(Duration),
    Back,
}

pub trait TouchApp {
    type Effect;
    type Error;

    fn handle(&mut self, event: HostEvent) -> Result<Vec<Self::Effect>, Self::Error>;
}

/// Drives a [`TouchApp`] without a window: scripted events in, effects out.
#[derive(Debug)]
pub struct HeadlessHost<A: TouchApp> {
    app: A,
    frame: usize,
    effects: Vec<A::Effect>,
}

impl<A: TouchApp> HeadlessHost<A> {
    pub fn new(app: A) -> Self {
        Self {
            app,
            frame: 0,
            effects: Vec::new(),
        }
    }

    /// Number of `HostEvent::Frame` events delivered so far.
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn effects(&self) -> &[A::Effect] {
        &self.effects
    }

    pub fn take_effects(&mut self) -> Vec<A::Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn into_app(self) -> A {
        self.app
    }

    pub fn step(&mut self, event: HostEvent) -> Result<usize, A::Error> {
        if matches!(event, HostEvent::Frame(_)) {
            self.frame += 1;
        }
        tracing::trace!(frame = self.frame, ?event, "host event");
        let produced = self.app.handle(event)?;
        let count = produced.len();
        self.effects.extend(produced);
        Ok(count)
    }

    pub fn run<I>(&mut self, events: I) -> Result<usize, A::Error>
    where
        I: IntoIterator<Item = HostEvent>,
    {
        let mut produced = 0;
        for event in events {
            produced += self.step(event)?;
        }
        Ok(produced)
    }

    /// Delivers `frames` frame events of `dt` each.
    pub fn advance(&mut self, frames: usize, dt: Duration) -> Result<usize, A::Error> {
        self.run(std::iter::repeat_n(HostEvent::Frame(dt), frames))
    }

    pub fn tap(&mut self, x: f32, y: f32) -> Result<usize, A::Error> {
        self.run([
            HostEvent::Pointer(PointerEvent::down(x, y)),
            HostEvent::Pointer(PointerEvent::up(x, y)),
        ])
    }

    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32)) -> Result<usize, A::Error> {
        self.run([
            HostEvent::Pointer(PointerEvent::down(from.0, from.1)),
            HostEvent::Pointer(PointerEvent::moved(to.0, to.1)),
            HostEvent::Pointer(PointerEvent::up(to.0, to.1)),
        ])
    }
}
