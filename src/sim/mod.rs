//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod effects;
pub mod entity;
pub mod phase;
pub mod spawn;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorConfig, Aim, ControlScheme, FireTrigger, WeaponConfig};
pub use collision::{
    all_hits, circles_overlap, find_collisions, find_collisions_where, find_overlaps, first_hit,
};
pub use effects::{EffectKind, EffectTimerSet, EffectsConfig};
pub use entity::{
    Behavior, Entity, EntityKind, HostileShot, Owner, PowerUpKind, Trail, WingFlap, Wobble,
};
pub use phase::{ButtonRect, GamePhase, PhaseMachine, RetryConfig, StartConfig};
pub use spawn::{
    BatchSize, HostileTemplate, PowerUpTemplate, SpawnOrder, SpawnOrigin, SpawnRule,
    SpawnScheduler, SpawnTarget, UniformRange,
};
pub use state::{ActorView, EntityView, GameEvent, GameState, Snapshot};
pub use tick::{Key, TickInput, tick};
