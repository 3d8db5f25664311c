//! Arcade Sim - frame-driven simulation core for canvas arcade shooters
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, effects, game state)
//! - `settings`: Data-driven tuning with one preset per game variant
//! - `renderer`: Interface the host implements to draw a frame
//! - `platform`: Browser binding for the canvas host

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{SimConfig, Variant};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Simulation constants
pub mod consts {
    /// Nominal frame rate the tick-based tuning assumes
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default playfield dimensions (pixels)
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;

    /// Hard ceiling on live particles
    pub const MAX_PARTICLES: usize = 2048;

    /// Longest projectile trail a config may ask for
    pub const MAX_TRAIL_CAPACITY: usize = 256;

    /// Most particles one explosion may emit
    pub const MAX_BURST_COUNT: u32 = 512;

    /// Most entities a single spawn event or level-up batch may create
    pub const MAX_SPAWN_BATCH: u32 = 64;
}

/// Axis-aligned playfield rectangle anchored at the origin (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: consts::DEFAULT_WIDTH,
            height: consts::DEFAULT_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if the point lies inside the playfield (edges inclusive)
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Clamp a point into the playfield
    #[inline]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Unit vector at `angle` scaled by `speed`
#[inline]
pub fn from_angle(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

/// Angle of the vector pointing from `from` to `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
