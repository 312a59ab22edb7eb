//! End-of-game overlay: a monotone fade-in driven by wall-clock ticks.

use serde::Serialize;
use tracing::debug;

use super::player::Player;

/// Fade units per second.
pub const DEFAULT_FADE_RATE: f32 = 600.0;
/// Fully opaque.
pub const MAX_FADE: f32 = 255.0;

pub const DRAW_MESSAGE: &str = "It's a DRAW!";

/// What the renderer reads each frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupState {
    pub active: bool,
    /// `None` on a draw.
    pub winner: Option<Player>,
    pub fade: f32,
    pub message: String,
}

impl PopupState {
    fn inactive() -> Self {
        PopupState {
            active: false,
            winner: None,
            fade: 0.0,
            message: String::new(),
        }
    }

    /// Fade as an 8-bit alpha value
    pub fn alpha(&self) -> u8 {
        self.fade.clamp(0.0, MAX_FADE) as u8
    }

    /// Alpha for the pulsing restart prompt.
    pub fn restart_prompt_alpha(&self) -> u8 {
        let alpha = f32::from(self.alpha());
        let pulse = (0.7 + 0.3 * (self.fade / 40.0).sin()).min(1.0);
        (alpha * pulse).clamp(0.0, MAX_FADE) as u8
    }
}

impl Default for PopupState {
    fn default() -> Self {
        Self::inactive()
    }
}

pub fn win_message(player: Player) -> String {
    format!("{} WINS!", player.label())
}

#[derive(Debug, Clone)]
pub struct PopupController {
    state: PopupState,
    fade_rate: f32,
}

impl PopupController {
    pub fn new(fade_rate: f32) -> Self {
        PopupController {
            state: PopupState::inactive(),
            fade_rate,
        }
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Show the overlay from fully transparent.
    pub fn activate(&mut self, winner: Option<Player>) {
        let message = match winner {
            Some(player) => win_message(player),
            None => DRAW_MESSAGE.to_string(),
        };
        debug!(?winner, %message, "popup activated");
        self.state = PopupState {
            active: true,
            winner,
            fade: 0.0,
            message,
        };
    }

    /// Saturating fade step; does nothing while inactive.
    pub fn advance(&mut self, delta_secs: f32) {
        if !self.state.active || self.state.fade >= MAX_FADE {
            return;
        }
        let step = self.fade_rate * delta_secs.max(0.0);
        self.state.fade = (self.state.fade + step).min(MAX_FADE);
    }

    pub fn deactivate(&mut self) {
        self.state = PopupState::inactive();
    }
}

impl Default for PopupController {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_RATE)
    }
}
