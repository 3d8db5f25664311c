//! Spawn scheduling and randomized entity templates
//!
//! Rules fire on `frame % interval == 0`. Intervals shrink with level (down to
//! a floor) and, for boost-scaled rules, divide by the active speed multiplier
//! so a boost speeds entities and spawn rate by the same factor.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Behavior, Entity, HostileShot, PowerUpKind, WingFlap, Wobble};
use crate::Playfield;
use crate::consts::MAX_SPAWN_BATCH;
use crate::error::ConfigError;

/// Uniform `[min, max]` range for a randomized attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub min: f32,
    pub max: f32,
}

impl UniformRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate range that always yields `value`
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.random_range(self.min..=self.max)
        }
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFinite { field });
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Where new entities appear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnOrigin {
    /// Random x across the width, just above the top edge
    AboveTop,
    /// Random x across the width, fixed distance above the bottom edge
    Row { y_from_bottom: f32 },
    /// Random point in a region given as fractions of the playfield
    Region { x: UniformRange, y: UniformRange },
}

impl SpawnOrigin {
    pub fn position(&self, radius: f32, field: &Playfield, rng: &mut impl Rng) -> Vec2 {
        let across = UniformRange::new(0.0, field.width);
        match *self {
            SpawnOrigin::AboveTop => Vec2::new(across.sample(rng), -radius),
            SpawnOrigin::Row { y_from_bottom } => {
                Vec2::new(across.sample(rng), field.height - y_from_bottom)
            }
            SpawnOrigin::Region { x, y } => {
                Vec2::new(x.sample(rng) * field.width, y.sample(rng) * field.height)
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            SpawnOrigin::Region { x, y } => {
                x.validate("spawn.region.x")?;
                y.validate("spawn.region.y")
            }
            _ => Ok(()),
        }
    }
}

/// Randomized hostile attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileTemplate {
    pub origin: SpawnOrigin,
    pub radius: UniformRange,
    pub fall_speed: UniformRange,
    /// Horizontal drift speed
    pub drift_speed: UniformRange,
    /// Flip the drift sign with probability 1/2
    pub random_direction: bool,
    /// Wing-flap angular speed per tick
    pub flap_speed: Option<f32>,
    pub wobble: Option<Wobble>,
    pub shot: Option<HostileShot>,
    /// Number of visual categories to pick from
    pub categories: u32,
}

impl Default for HostileTemplate {
    fn default() -> Self {
        Self {
            origin: SpawnOrigin::AboveTop,
            radius: UniformRange::new(15.0, 30.0),
            fall_speed: UniformRange::new(2.0, 4.0),
            drift_speed: UniformRange::fixed(0.0),
            random_direction: false,
            flap_speed: None,
            wobble: None,
            shot: None,
            categories: 1,
        }
    }
}

impl HostileTemplate {
    pub fn instantiate(
        &self,
        id: u32,
        spawn_tick: u64,
        field: &Playfield,
        rng: &mut impl Rng,
    ) -> Entity {
        let radius = self.radius.sample(rng);
        let pos = self.origin.position(radius, field, rng);
        let mut drift = self.drift_speed.sample(rng);
        if self.random_direction && rng.random_bool(0.5) {
            drift = -drift;
        }
        let vel = Vec2::new(drift, self.fall_speed.sample(rng));
        let category = if self.categories > 1 {
            rng.random_range(0..self.categories)
        } else {
            0
        };

        let mut hostile = Entity::hostile(id, pos, vel, radius, spawn_tick);
        hostile.behavior = Behavior::Hostile {
            flap: self.flap_speed.map(|speed| WingFlap { angle: 0.0, speed }),
            wobble: self.wobble,
            fire: self.shot,
            category,
        };
        hostile
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.origin.validate()?;
        self.radius.validate("hostile.radius")?;
        self.fall_speed.validate("hostile.fall_speed")?;
        self.drift_speed.validate("hostile.drift_speed")?;
        if self.radius.min <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "hostile.radius",
                value: self.radius.min,
            });
        }
        if let Some(shot) = &self.shot {
            if !(shot.speed.is_finite() && shot.speed > 0.0) {
                return Err(ConfigError::NonPositive {
                    field: "hostile.shot.speed",
                    value: shot.speed,
                });
            }
        }
        Ok(())
    }
}

/// Randomized power-up attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpTemplate {
    pub origin: SpawnOrigin,
    pub radius: UniformRange,
    pub fall_speed: UniformRange,
    /// Picked uniformly
    pub kinds: Vec<PowerUpKind>,
}

impl Default for PowerUpTemplate {
    fn default() -> Self {
        Self {
            origin: SpawnOrigin::AboveTop,
            radius: UniformRange::fixed(15.0),
            fall_speed: UniformRange::fixed(3.0),
            kinds: vec![PowerUpKind::SpeedBoost, PowerUpKind::Shield],
        }
    }
}

impl PowerUpTemplate {
    pub fn instantiate(
        &self,
        id: u32,
        spawn_tick: u64,
        field: &Playfield,
        rng: &mut impl Rng,
    ) -> Option<Entity> {
        if self.kinds.is_empty() {
            return None;
        }
        let kind = self.kinds[rng.random_range(0..self.kinds.len())];
        let radius = self.radius.sample(rng);
        let pos = self.origin.position(radius, field, rng);
        let vel = Vec2::new(0.0, self.fall_speed.sample(rng));
        Some(Entity::power_up(id, kind, pos, vel, radius, spawn_tick))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.origin.validate()?;
        self.radius.validate("power_up.radius")?;
        self.fall_speed.validate("power_up.fall_speed")
    }
}

/// What a spawn rule creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnTarget {
    Hostile,
    PowerUp,
}

/// Entities per spawn event: `base + floor(per_level * (level - 1))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchSize {
    pub base: u32,
    pub per_level: f32,
}

impl Default for BatchSize {
    fn default() -> Self {
        Self {
            base: 1,
            per_level: 0.0,
        }
    }
}

impl BatchSize {
    /// Capped at `MAX_SPAWN_BATCH` however high the level climbs
    pub fn count(&self, level: u32) -> u32 {
        let extra = (self.per_level * level.saturating_sub(1) as f32).floor().max(0.0);
        self.base
            .saturating_add(extra as u32)
            .min(MAX_SPAWN_BATCH)
    }
}

/// A periodic spawn trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnRule {
    pub target: SpawnTarget,
    pub interval_ticks: i64,
    /// Floor for level-based interval reduction
    pub min_interval_ticks: i64,
    /// Interval reduction per level-up (0 keeps it fixed)
    #[serde(default)]
    pub level_step: u32,
    /// Divide the interval by the active speed multiplier
    #[serde(default)]
    pub boost_scaled: bool,
    #[serde(default)]
    pub batch: BatchSize,
}

/// `frame_index % interval_ticks == 0`, with the interval clamped to at least 1
#[inline]
pub fn should_spawn(frame_index: u64, interval_ticks: u32) -> bool {
    frame_index % u64::from(interval_ticks.max(1)) == 0
}

/// Clamp a configured interval into `1..=u32::MAX`
pub fn clamp_interval(ticks: i64) -> u32 {
    ticks.clamp(1, i64::from(u32::MAX)) as u32
}

#[derive(Debug, Clone)]
struct ScheduledRule {
    rule: SpawnRule,
    interval: u32,
    min_interval: u32,
}

impl ScheduledRule {
    fn new(rule: &SpawnRule) -> Self {
        let interval = clamp_interval(rule.interval_ticks);
        let min_interval = clamp_interval(rule.min_interval_ticks).min(interval);
        Self {
            rule: rule.clone(),
            interval,
            min_interval,
        }
    }

    fn effective_interval(&self, multiplier: f32) -> u32 {
        if self.rule.boost_scaled && multiplier > 1.0 {
            (self.interval as f32 / multiplier).round().max(1.0) as u32
        } else {
            self.interval
        }
    }
}

/// Spawn events due on a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnOrder {
    pub target: SpawnTarget,
    pub count: u32,
}

/// Tracks current intervals for every spawn rule
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    rules: Vec<ScheduledRule>,
}

impl SpawnScheduler {
    pub fn new(rules: &[SpawnRule]) -> Self {
        Self {
            rules: rules.iter().map(ScheduledRule::new).collect(),
        }
    }

    /// Spawn events due on `frame_index`
    pub fn due(&self, frame_index: u64, multiplier: f32, level: u32) -> Vec<SpawnOrder> {
        self.rules
            .iter()
            .filter(|r| should_spawn(frame_index, r.effective_interval(multiplier)))
            .map(|r| SpawnOrder {
                target: r.rule.target,
                count: r.rule.batch.count(level),
            })
            .collect()
    }

    /// Current (unboosted) interval of the first rule for `target`
    pub fn interval(&self, target: SpawnTarget) -> Option<u32> {
        self.rules
            .iter()
            .find(|r| r.rule.target == target)
            .map(|r| r.interval)
    }

    /// Interval the first rule for `target` uses under `multiplier`
    pub fn effective_interval(&self, target: SpawnTarget, multiplier: f32) -> Option<u32> {
        self.rules
            .iter()
            .find(|r| r.rule.target == target)
            .map(|r| r.effective_interval(multiplier))
    }

    /// Shorten every ramping rule by its step, never below its floor
    pub fn level_up(&mut self) {
        for r in &mut self.rules {
            if r.rule.level_step > 0 {
                r.interval = r
                    .interval
                    .saturating_sub(r.rule.level_step)
                    .max(r.min_interval);
            }
        }
    }

    /// Restore configured intervals
    pub fn reset(&mut self) {
        for r in &mut self.rules {
            *r = ScheduledRule::new(&r.rule);
        }
    }
}
