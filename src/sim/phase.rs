//! Intro / Playing / GameOver state machine
//!
//! Only `Playing` runs the simulation. The other two phases show a static
//! screen and only look at the input that can move them on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tick::{Key, TickInput};
use crate::Playfield;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title/instructions screen
    Intro,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for retry
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Intro => "intro",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// What leaves the intro screen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartConfig {
    /// Any key press starts the game
    #[serde(default)]
    pub any_key: bool,
    /// Specific keys that start the game
    #[serde(default)]
    pub keys: Vec<Key>,
    /// A pointer click starts the game
    #[serde(default)]
    pub click: bool,
    /// Start automatically after this many intro ticks
    #[serde(default)]
    pub intro_ticks: Option<i64>,
}

/// Button rectangle, offset from the playfield center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonRect {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ButtonRect {
    pub fn contains(&self, field: &Playfield, point: Vec2) -> bool {
        let origin = field.center() + Vec2::new(self.offset_x, self.offset_y);
        point.x > origin.x
            && point.x < origin.x + self.width
            && point.y > origin.y
            && point.y < origin.y + self.height
    }
}

/// What leaves the game-over screen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default)]
    pub keys: Vec<Key>,
    /// Clicking inside this button retries
    #[serde(default)]
    pub button: Option<ButtonRect>,
}

/// Drives phase transitions
#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: GamePhase,
    intro_remaining: Option<u32>,
    start: StartConfig,
    retry: RetryConfig,
}

impl PhaseMachine {
    pub fn new(start: StartConfig, retry: RetryConfig) -> Self {
        let mut machine = Self {
            phase: GamePhase::Intro,
            intro_remaining: None,
            start,
            retry,
        };
        machine.reset();
        machine
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Ticks left before the intro ends on its own
    pub fn intro_remaining(&self) -> Option<u32> {
        self.intro_remaining
    }

    /// Process one intro tick. Returns true when the game should start.
    pub fn update_intro(&mut self, input: &TickInput) -> bool {
        if self.phase != GamePhase::Intro {
            return false;
        }

        let triggered = (self.start.any_key && !input.keys_pressed.is_empty())
            || self.start.keys.iter().any(|k| input.pressed(*k))
            || (self.start.click && input.pointer_pressed);

        let timed_out = match &mut self.intro_remaining {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            None => false,
        };

        if triggered || timed_out {
            self.phase = GamePhase::Playing;
            true
        } else {
            false
        }
    }

    /// Whether this game-over tick's input asks for a retry
    pub fn retry_requested(&self, input: &TickInput, field: &Playfield) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        let key = self.retry.keys.iter().any(|k| input.pressed(*k));
        let click = match (&self.retry.button, input.pointer) {
            (Some(button), Some(pointer)) => {
                input.pointer_pressed && button.contains(field, pointer)
            }
            _ => false,
        };
        key || click
    }

    /// Skip the intro
    pub fn force_start(&mut self) {
        if self.phase == GamePhase::Intro {
            self.phase = GamePhase::Playing;
        }
    }

    /// Playing -> GameOver. Returns false if not playing.
    pub fn end_game(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
            true
        } else {
            false
        }
    }

    /// Back to the intro with a fresh intro timer
    pub fn reset(&mut self) {
        self.phase = GamePhase::Intro;
        self.intro_remaining = self
            .start
            .intro_ticks
            .map(|t| t.clamp(0, i64::from(u32::MAX)) as u32);
    }
}
