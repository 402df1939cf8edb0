use serde::{Deserialize, Serialize};

use crate::color::Color;

pub const MENU_BACKGROUND: Color = Color::rgb(247, 239, 210);
pub const PLAYING_BACKGROUND: Color = Color::BLACK;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    Start,
    Menu,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageEvent {
    BeginPressed,
    TransitionFinished,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageEffect {
    None,
    ScrambleLevel,
    ResetMenu,
}

impl Stage {
    /// Pure transition function for the navigation state machine.
    ///
    /// Work that touches the session or the carousel is reported via `StageEffect` so the
    /// controller stays the only place with side effects.
    pub fn handle(self, event: StageEvent) -> (Stage, StageEffect) {
        match (self, event) {
            (Stage::Start, StageEvent::BeginPressed) => (Stage::Menu, StageEffect::None),
            (Stage::Menu, StageEvent::TransitionFinished) => (Stage::Playing, StageEffect::ScrambleLevel),
            (Stage::Playing, StageEvent::Back) => (Stage::Menu, StageEffect::ResetMenu),

            // Ignore irrelevant events in the current stage.
            (stage, _) => (stage, StageEffect::None),
        }
    }

    pub fn background(self) -> Color {
        match self {
            Stage::Start | Stage::Menu => MENU_BACKGROUND,
            Stage::Playing => PLAYING_BACKGROUND,
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, Stage::Playing)
    }
}
