use engine::surface::SurfaceSize;
use engine::{HostEvent, TouchApp};
use rand::Rng;
use rand::rngs::SmallRng;

use crate::catalog::LevelCatalog;
use crate::error::SessionError;
use crate::navigation::{NavEffect, NavigationController};
use crate::session::GameSession;
use crate::settings::PaflamySettings;

/// The whole game behind the host seam: puzzle session plus navigation.
#[derive(Debug, Clone)]
pub struct PaflamyApp<R = SmallRng> {
    session: GameSession<R>,
    nav: NavigationController,
}

impl PaflamyApp<SmallRng> {
    pub fn new(catalog: LevelCatalog, settings: &PaflamySettings, screen: SurfaceSize) -> Result<Self, SessionError> {
        Self::with_session(GameSession::new(catalog), settings, screen)
    }

    pub fn seeded(
        catalog: LevelCatalog,
        seed: u64,
        settings: &PaflamySettings,
        screen: SurfaceSize,
    ) -> Result<Self, SessionError> {
        Self::with_session(GameSession::seeded(catalog, seed), settings, screen)
    }
}

impl<R: Rng> PaflamyApp<R> {
    pub fn with_session(
        mut session: GameSession<R>,
        settings: &PaflamySettings,
        screen: SurfaceSize,
    ) -> Result<Self, SessionError> {
        let nav = NavigationController::new(settings, screen, &mut session)?;
        Ok(Self { session, nav })
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn nav(&self) -> &NavigationController {
        &self.nav
    }
}

impl<R: Rng> TouchApp for PaflamyApp<R> {
    type Effect = NavEffect;
    type Error = SessionError;

    fn handle(&mut self, event: HostEvent) -> Result<Vec<NavEffect>, SessionError> {
        match event {
            HostEvent::Pointer(p) => self.nav.handle_pointer(p, &mut self.session),
            HostEvent::Frame(dt) => self.nav.update(dt, &mut self.session),
            HostEvent::Back => Ok(self.nav.back()),
        }
    }
}
