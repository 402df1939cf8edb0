//! Start / menu / playing navigation.
//!
//! [`NavigationController`] owns all UI state. The [`GameSession`] is passed in by `&mut` on
//! every call, and anything the host should react to comes back as [`NavEffect`] values.

pub mod carousel;
pub mod drag;
pub mod layout;
pub mod stage;
pub mod start;
pub mod transition;

use std::time::Duration;

use engine::input::{PointerAction, PointerEvent};
use engine::surface::SurfaceSize;
use engine::ui::Size;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::SessionError;
use crate::session::GameSession;
use crate::settings::PaflamySettings;

pub use carousel::{Carousel, global_offset, normalize};
pub use drag::{DragOutcome, TileDrag, TileDragger};
pub use layout::{CarouselSlot, UiLayout};
pub use stage::{Stage, StageEffect, StageEvent};
pub use start::StartScreen;
pub use transition::{MtpFrame, MtpTransition};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NavEffect {
    StageChanged { stage: Stage, background: Color },
    LevelChanged { index: usize, tile_size: Size },
    TransitionStarted { index: usize },
    LevelSolved { index: usize },
}

/// What the renderer needs to draw the menu carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    pub index: i32,
    pub offset: f32,
    pub settling: bool,
    pub slots: Vec<CarouselSlot>,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    settings: PaflamySettings,
    layout: UiLayout,
    stage: Stage,
    start: StartScreen,
    carousel: Carousel,
    transition: Option<MtpTransition>,
    dragger: TileDragger,
    tile_sizes: Vec<Size>,
}

impl NavigationController {
    pub fn new<R: Rng>(
        settings: &PaflamySettings,
        screen: SurfaceSize,
        session: &mut GameSession<R>,
    ) -> Result<Self, SessionError> {
        let layout = UiLayout::new(screen, &settings.layout);
        let side = settings.layout.start_level_size;
        let ambient = session.ambient_level(side, side)?;
        let tile_sizes = session
            .catalog()
            .iter()
            .map(|d| layout.playing_tile_size(d.width() as usize, d.height() as usize))
            .collect();

        tracing::debug!(
            width = screen.width,
            height = screen.height,
            levels = session.catalog().len(),
            "navigation ready"
        );

        Ok(Self {
            settings: settings.clone(),
            start: StartScreen::new(ambient, &layout),
            carousel: Carousel::new(session.catalog().len(), settings.carousel),
            layout,
            stage: Stage::default(),
            transition: None,
            dragger: TileDragger::default(),
            tile_sizes,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn layout(&self) -> &UiLayout {
        &self.layout
    }

    pub fn settings(&self) -> &PaflamySettings {
        &self.settings
    }

    pub fn start_screen(&self) -> &StartScreen {
        &self.start
    }

    pub fn carousel(&self) -> CarouselView {
        CarouselView {
            index: self.carousel.index(),
            offset: self.carousel.offset(),
            settling: self.carousel.is_settling(),
            slots: self.layout.carousel_slots(
                self.carousel.index(),
                self.carousel.offset(),
                self.carousel.len(),
            ),
        }
    }

    pub fn transition_frame(&self) -> Option<MtpFrame> {
        self.transition.map(|t| t.frame(&self.layout))
    }

    pub fn drag(&self) -> Option<TileDrag> {
        self.dragger.current()
    }

    /// Tile size of catalog entry `index` in the playing stage.
    pub fn tile_size(&self, index: usize) -> Size {
        self.tile_sizes.get(index).copied().unwrap_or_default()
    }

    pub fn handle_pointer<R: Rng>(
        &mut self,
        event: PointerEvent,
        session: &mut GameSession<R>,
    ) -> Result<Vec<NavEffect>, SessionError> {
        match self.stage {
            Stage::Start => Ok(self.start_pointer(event)),
            Stage::Menu => self.menu_pointer(event, session),
            Stage::Playing => self.playing_pointer(event, session),
        }
    }

    pub fn update<R: Rng>(
        &mut self,
        dt: Duration,
        session: &mut GameSession<R>,
    ) -> Result<Vec<NavEffect>, SessionError> {
        if self.stage != Stage::Menu {
            return Ok(Vec::new());
        }

        let Some(transition) = self.transition.as_mut() else {
            self.carousel.update(dt, self.layout.pitch());
            return Ok(Vec::new());
        };
        if !transition.advance(dt) {
            return Ok(Vec::new());
        }

        let index = transition.index();
        self.transition = None;
        self.dragger.cancel();
        let (stage, effect) = self.stage.handle(StageEvent::TransitionFinished);
        let mut effects = Vec::new();
        if effect == StageEffect::ScrambleLevel {
            let level = match session.advance(index) {
                Ok(level) => level,
                Err(err) => {
                    tracing::error!(index, %err, "level failed to open; staying in the menu");
                    self.carousel.reset();
                    return Err(err);
                }
            };
            effects.push(NavEffect::LevelChanged {
                index,
                tile_size: self.layout.playing_tile_size(level.width(), level.height()),
            });
        }
        effects.push(self.enter(stage));
        Ok(effects)
    }

    /// Host back request. Only leaves the playing stage.
    pub fn back(&mut self) -> Vec<NavEffect> {
        let (stage, effect) = self.stage.handle(StageEvent::Back);
        if stage == self.stage {
            tracing::trace!(stage = ?self.stage, "back ignored");
            return Vec::new();
        }
        if effect == StageEffect::ResetMenu {
            self.carousel.reset();
            self.transition = None;
            self.dragger.cancel();
        }
        vec![self.enter(stage)]
    }

    fn enter(&mut self, stage: Stage) -> NavEffect {
        tracing::info!(from = ?self.stage, to = ?stage, "stage changed");
        self.stage = stage;
        NavEffect::StageChanged {
            stage,
            background: stage.background(),
        }
    }

    fn start_pointer(&mut self, event: PointerEvent) -> Vec<NavEffect> {
        if event.action != PointerAction::Down || !self.start.hits_button(event.x, event.y) {
            return Vec::new();
        }
        let (stage, _) = self.stage.handle(StageEvent::BeginPressed);
        vec![self.enter(stage)]
    }

    fn menu_pointer<R: Rng>(
        &mut self,
        event: PointerEvent,
        session: &mut GameSession<R>,
    ) -> Result<Vec<NavEffect>, SessionError> {
        if self.transition.is_some() {
            tracing::trace!(action = ?event.action, "input ignored during transition");
            return Ok(Vec::new());
        }

        let Some(index) = self
            .carousel
            .pointer(event, self.layout.tap_threshold, self.layout.pitch())
        else {
            return Ok(Vec::new());
        };

        let level = session.advance_unscrambled(index)?;
        let tile_size = self.layout.playing_tile_size(level.width(), level.height());
        self.transition = Some(MtpTransition::new(
            index,
            self.carousel.offset(),
            self.settings.transition,
        ));
        tracing::info!(index, "opening level");
        Ok(vec![
            NavEffect::LevelChanged { index, tile_size },
            NavEffect::TransitionStarted { index },
        ])
    }

    fn playing_pointer<R: Rng>(
        &mut self,
        event: PointerEvent,
        session: &mut GameSession<R>,
    ) -> Result<Vec<NavEffect>, SessionError> {
        let index = session.level_index();
        let Some(level) = session.level_mut() else {
            tracing::trace!("no active level");
            return Ok(Vec::new());
        };
        let tile = self.layout.playing_tile_size(level.width(), level.height());

        match self.dragger.handle(event, &self.layout, tile, level)? {
            DragOutcome::Swapped { .. } if level.is_solved() => {
                tracing::info!(index, "level solved");
                Ok(vec![NavEffect::LevelSolved { index }])
            }
            _ => Ok(Vec::new()),
        }
    }
}
