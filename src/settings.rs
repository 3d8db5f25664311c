//! Simulation configuration
//!
//! Every tunable number lives here. Each arcade variant is a preset; hosts can
//! also load a full config from JSON. Configs are sanitized (soft problems
//! clamped with a warning) and then validated (hard problems rejected) before a
//! simulation is built from them.

use std::f32::consts::FRAC_PI_2;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Playfield;
use crate::consts::{MAX_BURST_COUNT, MAX_PARTICLES, MAX_SPAWN_BATCH, MAX_TRAIL_CAPACITY};
use crate::error::ConfigError;
use crate::sim::actor::{ActorConfig, Aim, ControlScheme, FireTrigger, WeaponConfig};
use crate::sim::effects::EffectsConfig;
use crate::sim::entity::{HostileShot, PowerUpKind};
use crate::sim::phase::{ButtonRect, RetryConfig, StartConfig};
use crate::sim::spawn::{
    BatchSize, HostileTemplate, PowerUpTemplate, SpawnOrigin, SpawnRule, SpawnTarget,
    UniformRange,
};
use crate::sim::tick::Key;

/// Game variant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Turret at the bottom shooting winged creatures
    #[default]
    AlienDefence,
    /// UFO bombing patrolling turrets that shoot back
    AttackOnTurrets,
    /// Ship dodging asteroids
    SpaceDodge,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::AlienDefence,
        Variant::AttackOnTurrets,
        Variant::SpaceDodge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::AlienDefence => "alien_defence",
            Variant::AttackOnTurrets => "attack_on_turrets",
            Variant::SpaceDodge => "space_dodge",
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "alien_defence" | "aliendefence" | "alien" => Ok(Variant::AlienDefence),
            "attack_on_turrets" | "attackonturrets" | "turrets" => Ok(Variant::AttackOnTurrets),
            "space_dodge" | "spacedodge" | "dodge" => Ok(Variant::SpaceDodge),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Explosion burst tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub count: u32,
    pub speed: UniformRange,
    pub radius: UniformRange,
    pub life: f32,
    pub decay: f32,
    #[serde(default)]
    pub gravity: f32,
}

impl Default for ParticleBurst {
    fn default() -> Self {
        Self {
            count: 100,
            speed: UniformRange::new(1.0, 10.0),
            radius: UniformRange::new(2.5, 7.5),
            life: 255.0,
            decay: 5.0,
            gravity: 0.0,
        }
    }
}

/// Score sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub per_kill: u64,
    /// Survival score per tick (scaled by the speed multiplier)
    pub per_tick: u64,
    pub nuke_bonus: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            per_kill: 1,
            per_tick: 0,
            nuke_bonus: 10,
        }
    }
}

/// Level progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level up when `score >= level * score_threshold` (0 disables levels)
    pub score_threshold: u64,
    /// Fall speed added to every live hostile on level-up
    pub hostile_speed_bump: f32,
    /// Level-up batch size is `ceil(level * batch_per_level)`
    pub batch_per_level: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            score_threshold: 0,
            hostile_speed_bump: 0.0,
            batch_per_level: 0.0,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub variant: Variant,
    pub playfield: Playfield,
    pub start: StartConfig,
    pub retry: RetryConfig,
    pub actor: ActorConfig,
    pub lives: u32,
    pub hostile: HostileTemplate,
    pub power_up: PowerUpTemplate,
    pub spawns: Vec<SpawnRule>,
    /// Hostiles placed when play starts
    pub initial_hostiles: u32,
    /// Replace every destroyed hostile with a fresh one
    pub respawn_on_kill: bool,
    /// End the game when no hostiles remain
    pub game_over_when_cleared: bool,
    pub explosion: ParticleBurst,
    pub effects: EffectsConfig,
    pub scoring: ScoringConfig,
    pub level: LevelConfig,
    pub max_particles: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_preset(Variant::default())
    }
}

impl SimConfig {
    /// Build the preset for a variant on the default playfield
    pub fn from_preset(variant: Variant) -> Self {
        match variant {
            Variant::AlienDefence => Self::alien_defence(),
            Variant::AttackOnTurrets => Self::attack_on_turrets(),
            Variant::SpaceDodge => Self::space_dodge(),
        }
    }

    /// Same preset, different playfield
    pub fn with_playfield(mut self, width: f32, height: f32) -> Self {
        self.playfield = Playfield::new(width, height);
        self
    }

    fn alien_defence() -> Self {
        Self {
            variant: Variant::AlienDefence,
            playfield: Playfield::default(),
            start: StartConfig {
                any_key: true,
                ..Default::default()
            },
            retry: RetryConfig {
                keys: vec![Key::Enter],
                button: None,
            },
            actor: ActorConfig {
                control: ControlScheme::TrackPointerX { speed: 5.0 },
                start_x: 0.5,
                start_y_from_bottom: 30.0,
                radius: 30.0,
                boost_speed: 1.0,
                contact_damage: false,
                weapon: Some(WeaponConfig {
                    trigger: FireTrigger::Click,
                    aim: Aim::AtPointer,
                    projectile_speed: 12.0,
                    projectile_radius: 4.0,
                    cooldown_ticks: 6,
                    max_live: 10,
                    spread_angle: 0.1,
                    spread_offset: 10.0,
                    auto_fire_toggle: Some(Key::Space),
                    trail_capacity: 10,
                }),
            },
            lives: 3,
            hostile: HostileTemplate {
                origin: SpawnOrigin::AboveTop,
                radius: UniformRange::new(10.0, 30.0),
                fall_speed: UniformRange::new(2.0, 5.0),
                drift_speed: UniformRange::fixed(2.0),
                random_direction: true,
                flap_speed: Some(0.1),
                wobble: None,
                shot: None,
                categories: 1,
            },
            power_up: PowerUpTemplate {
                origin: SpawnOrigin::Region {
                    x: UniformRange::new(0.0, 1.0),
                    y: UniformRange::new(0.0, 0.5),
                },
                radius: UniformRange::fixed(12.5),
                fall_speed: UniformRange::fixed(2.0),
                kinds: vec![PowerUpKind::TripleShot, PowerUpKind::Nuke],
            },
            spawns: vec![
                SpawnRule {
                    target: SpawnTarget::Hostile,
                    interval_ticks: 20,
                    min_interval_ticks: 20,
                    level_step: 0,
                    boost_scaled: false,
                    batch: BatchSize::default(),
                },
                SpawnRule {
                    target: SpawnTarget::PowerUp,
                    interval_ticks: 120,
                    min_interval_ticks: 120,
                    level_step: 0,
                    boost_scaled: false,
                    batch: BatchSize::default(),
                },
            ],
            initial_hostiles: 0,
            respawn_on_kill: false,
            game_over_when_cleared: false,
            explosion: ParticleBurst::default(),
            effects: EffectsConfig {
                triple_shot_ticks: 300,
                ..Default::default()
            },
            scoring: ScoringConfig {
                per_kill: 1,
                per_tick: 0,
                nuke_bonus: 10,
            },
            level: LevelConfig::default(),
            max_particles: MAX_PARTICLES,
        }
    }

    fn attack_on_turrets() -> Self {
        Self {
            variant: Variant::AttackOnTurrets,
            playfield: Playfield::default(),
            start: StartConfig {
                click: true,
                ..Default::default()
            },
            retry: RetryConfig {
                keys: vec![],
                button: Some(ButtonRect {
                    offset_x: -100.0,
                    offset_y: 50.0,
                    width: 200.0,
                    height: 50.0,
                }),
            },
            actor: ActorConfig {
                control: ControlScheme::FollowPointer,
                start_x: 0.5,
                start_y_from_bottom: Playfield::default().height / 2.0,
                radius: 60.0,
                boost_speed: 1.0,
                contact_damage: false,
                weapon: Some(WeaponConfig {
                    trigger: FireTrigger::Key(Key::Space),
                    aim: Aim::Fixed { angle: FRAC_PI_2 },
                    projectile_speed: 10.0,
                    projectile_radius: 3.0,
                    cooldown_ticks: 0,
                    max_live: 0,
                    spread_angle: 0.1,
                    spread_offset: 10.0,
                    auto_fire_toggle: None,
                    trail_capacity: 20,
                }),
            },
            lives: 3,
            hostile: HostileTemplate {
                origin: SpawnOrigin::Row {
                    y_from_bottom: 50.0,
                },
                radius: UniformRange::fixed(30.0),
                fall_speed: UniformRange::fixed(0.0),
                drift_speed: UniformRange::new(-2.0, 2.0),
                random_direction: false,
                flap_speed: None,
                wobble: None,
                shot: Some(HostileShot {
                    interval_ticks: 60,
                    speed: 10.0,
                    radius: 3.0,
                    trail_capacity: 20,
                }),
                categories: 1,
            },
            power_up: PowerUpTemplate {
                kinds: vec![],
                ..Default::default()
            },
            spawns: vec![],
            initial_hostiles: 15,
            respawn_on_kill: true,
            game_over_when_cleared: true,
            explosion: ParticleBurst {
                count: 100,
                speed: UniformRange::new(0.0, 2.0),
                radius: UniformRange::new(2.5, 5.0),
                life: 255.0,
                decay: 5.0,
                gravity: 0.0,
            },
            effects: EffectsConfig {
                hit_flash_ticks: 12,
                ..Default::default()
            },
            scoring: ScoringConfig {
                per_kill: 1,
                per_tick: 0,
                nuke_bonus: 0,
            },
            level: LevelConfig::default(),
            max_particles: MAX_PARTICLES,
        }
    }

    fn space_dodge() -> Self {
        Self {
            variant: Variant::SpaceDodge,
            playfield: Playfield::default(),
            start: StartConfig {
                keys: vec![Key::Enter],
                intro_ticks: Some(300),
                ..Default::default()
            },
            retry: RetryConfig {
                keys: vec![Key::Enter],
                button: None,
            },
            actor: ActorConfig {
                control: ControlScheme::Keys { speed: 5.0 },
                start_x: 0.5,
                start_y_from_bottom: 50.0,
                radius: 15.0,
                boost_speed: 2.0,
                contact_damage: true,
                weapon: None,
            },
            lives: 1,
            hostile: HostileTemplate::default(),
            power_up: PowerUpTemplate::default(),
            spawns: vec![
                SpawnRule {
                    target: SpawnTarget::Hostile,
                    interval_ticks: 30,
                    min_interval_ticks: 10,
                    level_step: 3,
                    boost_scaled: true,
                    batch: BatchSize::default(),
                },
                SpawnRule {
                    target: SpawnTarget::PowerUp,
                    interval_ticks: 200,
                    min_interval_ticks: 200,
                    level_step: 0,
                    boost_scaled: false,
                    batch: BatchSize::default(),
                },
            ],
            initial_hostiles: 0,
            respawn_on_kill: false,
            game_over_when_cleared: false,
            explosion: ParticleBurst {
                count: 40,
                ..Default::default()
            },
            effects: EffectsConfig {
                shield_ticks: 500,
                speed_boost_ticks: 100,
                boost_multiplier: 10.0,
                boost_grants_invulnerable: true,
                ..Default::default()
            },
            scoring: ScoringConfig {
                per_kill: 0,
                per_tick: 1,
                nuke_bonus: 0,
            },
            level: LevelConfig {
                score_threshold: 1000,
                hostile_speed_bump: 0.5,
                batch_per_level: 0.5,
            },
            max_particles: MAX_PARTICLES,
        }
    }

    /// Parse, sanitize and validate a JSON config.
    ///
    /// Top-level fields left out of the JSON come from the preset named by
    /// `variant` (AlienDefence when absent). A section that is present
    /// replaces the preset's section as a whole.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let variant = match overrides.get("variant") {
            Some(name) => Variant::deserialize(name)?,
            None => Variant::default(),
        };
        let mut merged = match serde_json::to_value(Self::from_preset(variant))? {
            serde_json::Value::Object(fields) => fields,
            _ => serde_json::Map::new(),
        };
        merged.extend(overrides);
        let config: SimConfig = serde_json::from_value(serde_json::Value::Object(merged))?;
        config.validated()
    }

    /// Read a JSON config file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sanitize then validate
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.sanitize();
        self.validate()?;
        Ok(self)
    }

    /// Clamp soft out-of-range values, logging each change
    pub fn sanitize(&mut self) {
        for rule in &mut self.spawns {
            if rule.interval_ticks < 1 {
                log::warn!(
                    "{:?} spawn interval {} clamped to 1",
                    rule.target,
                    rule.interval_ticks
                );
                rule.interval_ticks = 1;
            }
            if rule.min_interval_ticks < 1 {
                rule.min_interval_ticks = 1;
            }
            if rule.min_interval_ticks > rule.interval_ticks {
                log::warn!(
                    "{:?} minimum interval {} above base {}, lowered",
                    rule.target,
                    rule.min_interval_ticks,
                    rule.interval_ticks
                );
                rule.min_interval_ticks = rule.interval_ticks;
            }
        }

        let fx = &mut self.effects;
        for (name, ticks) in [
            ("triple_shot_ticks", &mut fx.triple_shot_ticks),
            ("shield_ticks", &mut fx.shield_ticks),
            ("speed_boost_ticks", &mut fx.speed_boost_ticks),
            ("invulnerable_ticks", &mut fx.invulnerable_ticks),
            ("hit_flash_ticks", &mut fx.hit_flash_ticks),
        ] {
            if *ticks < 0 {
                log::warn!("effects.{} = {} clamped to 0", name, ticks);
                *ticks = 0;
            }
        }

        if let Some(t) = self.start.intro_ticks.filter(|t| *t < 0) {
            log::warn!("start.intro_ticks = {} clamped to 0", t);
            self.start.intro_ticks = Some(0);
        }

        if self.max_particles > MAX_PARTICLES {
            log::warn!("max_particles {} clamped to {}", self.max_particles, MAX_PARTICLES);
            self.max_particles = MAX_PARTICLES;
        }
    }

    /// Reject configs the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("playfield.width", self.playfield.width)?;
        positive("playfield.height", self.playfield.height)?;
        positive("actor.radius", self.actor.radius)?;
        positive("actor.boost_speed", self.actor.boost_speed)?;
        positive("effects.boost_multiplier", self.effects.boost_multiplier)?;

        if self.lives == 0 {
            return Err(ConfigError::NonPositive {
                field: "lives",
                value: 0.0,
            });
        }

        match self.actor.control {
            ControlScheme::Keys { speed } | ControlScheme::TrackPointerX { speed } => {
                positive("actor.control.speed", speed)?;
            }
            ControlScheme::FollowPointer => {}
        }

        if let Some(weapon) = &self.actor.weapon {
            positive("actor.weapon.projectile_speed", weapon.projectile_speed)?;
            positive("actor.weapon.projectile_radius", weapon.projectile_radius)?;
            finite("actor.weapon.spread_angle", weapon.spread_angle)?;
            finite("actor.weapon.spread_offset", weapon.spread_offset)?;
            at_most(
                "actor.weapon.trail_capacity",
                weapon.trail_capacity as f64,
                MAX_TRAIL_CAPACITY as f64,
            )?;
        }
        if let Some(shot) = &self.hostile.shot {
            at_most(
                "hostile.shot.trail_capacity",
                shot.trail_capacity as f64,
                MAX_TRAIL_CAPACITY as f64,
            )?;
        }

        self.hostile.validate()?;
        self.power_up.validate()?;

        let spawns_power_ups = self.spawns.iter().any(|r| r.target == SpawnTarget::PowerUp);
        if spawns_power_ups && self.power_up.kinds.is_empty() {
            return Err(ConfigError::EmptyChoice {
                field: "power_up.kinds",
            });
        }

        for rule in &self.spawns {
            at_most("spawns.batch.base", f64::from(rule.batch.base), f64::from(MAX_SPAWN_BATCH))?;
            at_most(
                "spawns.batch.per_level",
                f64::from(rule.batch.per_level),
                f64::from(MAX_SPAWN_BATCH),
            )?;
        }

        if self.game_over_when_cleared && self.initial_hostiles == 0 {
            return Err(ConfigError::NonPositive {
                field: "initial_hostiles",
                value: 0.0,
            });
        }

        self.explosion.speed.validate("explosion.speed")?;
        self.explosion.radius.validate("explosion.radius")?;
        finite("explosion.life", self.explosion.life)?;
        finite("explosion.decay", self.explosion.decay)?;
        finite("explosion.gravity", self.explosion.gravity)?;
        finite("level.hostile_speed_bump", self.level.hostile_speed_bump)?;
        at_most("explosion.count", f64::from(self.explosion.count), f64::from(MAX_BURST_COUNT))?;
        at_most(
            "level.batch_per_level",
            f64::from(self.level.batch_per_level),
            f64::from(MAX_SPAWN_BATCH),
        )?;

        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

/// Finite and within `[0, max]`
fn at_most(field: &'static str, value: f64, max: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if !(0.0..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min: 0.0,
            max,
        });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for variant in Variant::ALL {
            let config = SimConfig::from_preset(variant);
            assert_eq!(config.variant, variant);
            assert!(config.validate().is_ok(), "{} preset invalid", variant.as_str());
        }
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("space-dodge".parse::<Variant>().unwrap(), Variant::SpaceDodge);
        assert_eq!("AlienDefence".parse::<Variant>().unwrap(), Variant::AlienDefence);
        for variant in Variant::ALL {
            assert_eq!(variant.as_str().parse::<Variant>().unwrap(), variant);
        }
        assert!(matches!(
            "pong".parse::<Variant>(),
            Err(ConfigError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_sanitize_clamps_soft_values() {
        let mut config = SimConfig::from_preset(Variant::SpaceDodge);
        config.spawns[0].interval_ticks = -5;
        config.effects.shield_ticks = -100;
        config.start.intro_ticks = Some(-3);

        let config = config.validated().unwrap();
        assert_eq!(config.spawns[0].interval_ticks, 1);
        assert_eq!(config.spawns[0].min_interval_ticks, 1);
        assert_eq!(config.effects.shield_ticks, 0);
        assert_eq!(config.start.intro_ticks, Some(0));
    }

    #[test]
    fn test_inverted_range_fails_fast() {
        let mut config = SimConfig::from_preset(Variant::AlienDefence);
        config.hostile.radius = UniformRange::new(30.0, 10.0);
        let err = config.validated().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange { field: "hostile.radius", .. }));
        assert!(err.to_string().contains("hostile.radius"));
    }

    #[test]
    fn test_zero_playfield_rejected() {
        let config = SimConfig::from_preset(Variant::SpaceDodge).with_playfield(0.0, 600.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "playfield.width", .. })
        ));
    }

    #[test]
    fn test_runaway_batch_per_level_rejected() {
        let mut config = SimConfig::from_preset(Variant::SpaceDodge);
        config.spawns[0].batch = BatchSize {
            base: 1,
            per_level: 1e10,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "spawns.batch.per_level", .. })
        ));

        config.spawns[0].batch.per_level = -1.0;
        assert!(config.validate().is_err());
        config.spawns[0].batch.per_level = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::NonFinite { .. })));
    }

    #[test]
    fn test_oversized_trails_rejected() {
        let mut config = SimConfig::from_preset(Variant::AlienDefence);
        if let Some(weapon) = config.actor.weapon.as_mut() {
            weapon.trail_capacity = usize::MAX;
        }
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange { field: "actor.weapon.trail_capacity", .. }
        ));

        let mut config = SimConfig::from_preset(Variant::AttackOnTurrets);
        if let Some(shot) = config.hostile.shot.as_mut() {
            shot.trail_capacity = MAX_TRAIL_CAPACITY + 1;
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "hostile.shot.trail_capacity", .. })
        ));
    }

    #[test]
    fn test_oversized_bursts_rejected() {
        let mut config = SimConfig::from_preset(Variant::AlienDefence);
        config.explosion.count = MAX_BURST_COUNT + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "explosion.count", .. })
        ));

        let mut config = SimConfig::from_preset(Variant::SpaceDodge);
        config.level.batch_per_level = 1e9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "level.batch_per_level", .. })
        ));
    }

    #[test]
    fn test_power_up_rule_needs_kinds() {
        let mut config = SimConfig::from_preset(Variant::SpaceDodge);
        config.power_up.kinds.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyChoice { .. })));
    }

    #[test]
    fn test_json_round_trip_keeps_preset() {
        let config = SimConfig::from_preset(Variant::AttackOnTurrets);
        let json = config.to_json().unwrap();
        let loaded = SimConfig::from_json(&json).unwrap();
        assert_eq!(loaded.variant, Variant::AttackOnTurrets);
        assert_eq!(loaded.initial_hostiles, 15);
        assert!(loaded.respawn_on_kill);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let loaded = SimConfig::from_json(r#"{ "lives": 5 }"#).unwrap();
        assert_eq!(loaded.lives, 5);
        assert_eq!(loaded.variant, Variant::AlienDefence);
    }

    #[test]
    fn test_partial_json_defaults_follow_variant() {
        let loaded = SimConfig::from_json(r#"{ "variant": "space_dodge" }"#).unwrap();
        let preset = SimConfig::from_preset(Variant::SpaceDodge);
        assert_eq!(loaded.variant, Variant::SpaceDodge);
        assert_eq!(loaded.lives, 1);
        assert!(loaded.actor.contact_damage);
        assert_eq!(loaded.spawns.len(), preset.spawns.len());
        assert_eq!(loaded.spawns[0].interval_ticks, 30);
        assert_eq!(loaded.start.intro_ticks, Some(300));

        let loaded =
            SimConfig::from_json(r#"{ "variant": "attack_on_turrets", "lives": 7 }"#).unwrap();
        assert_eq!(loaded.lives, 7);
        assert_eq!(loaded.initial_hostiles, 15);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            SimConfig::from_json("{ lives: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
