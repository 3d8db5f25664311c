//! Game state and core simulation types
//!
//! One `GameState` is one independent simulation: its collections, timers,
//! RNG and counters are all owned here, so any number can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::actor::Actor;
use super::effects::{EffectKind, EffectTimerSet};
use super::entity::{Behavior, Entity, EntityKind, Owner, PowerUpKind};
use super::phase::{GamePhase, PhaseMachine};
use super::spawn::{SpawnScheduler, SpawnTarget};
use crate::error::ConfigError;
use crate::settings::SimConfig;
use crate::{Playfield, from_angle};

/// Visual feedback for the host, queued during a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    HostileDestroyed { id: u32, pos: Vec2 },
    Explosion { pos: Vec2, particles: u32 },
    PowerUpCollected { kind: PowerUpKind, pos: Vec2 },
    EffectExpired { kind: EffectKind },
    ActorHit { lives_left: u32 },
    Nuke { cleared: usize },
    LevelUp { level: u32, spawn_interval: Option<u32> },
}

/// Read-only entity data for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub radius: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_up: Option<PowerUpKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u32>,
    /// Particle lifespan left
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life: Option<f32>,
    /// Projectile trail, oldest first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trail: Vec<Vec2>,
    /// Current wing angle of a flapping hostile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flap_angle: Option<f32>,
}

impl From<&Entity> for EntityView {
    fn from(e: &Entity) -> Self {
        let mut view = Self {
            id: e.id,
            kind: e.kind(),
            pos: e.pos,
            radius: e.radius,
            owner: None,
            power_up: None,
            category: None,
            life: None,
            trail: Vec::new(),
            flap_angle: None,
        };
        match &e.behavior {
            Behavior::Projectile { owner, trail } => {
                view.owner = Some(*owner);
                view.trail = trail.points().collect();
            }
            Behavior::Hostile { category, flap, .. } => {
                view.category = Some(*category);
                view.flap_angle = flap.as_ref().map(|f| f.angle);
            }
            Behavior::Particle { life, .. } => view.life = Some(*life),
            Behavior::PowerUp { effect } => view.power_up = Some(*effect),
        }
        view
    }
}

/// Read-only actor data for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub pos: Vec2,
    pub radius: f32,
    pub aim_angle: f32,
    pub auto_fire: bool,
}

/// Frame snapshot handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub tick: u64,
    pub actor: ActorView,
    pub effects: Vec<(EffectKind, u32)>,
    pub entities: Vec<EntityView>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated configuration
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub machine: PhaseMachine,
    pub actor: Actor,
    /// Actor and hostile shots (in spawn order)
    pub projectiles: Vec<Entity>,
    pub hostiles: Vec<Entity>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Entity>,
    pub power_ups: Vec<Entity>,
    pub effects: EffectTimerSet,
    pub scheduler: SpawnScheduler,
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    /// Playing ticks since the round started
    pub time_ticks: u64,
    /// Events queued for the host
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a simulation. Fails fast on an invalid config.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        log::info!(
            "New {} simulation (seed {}, {}x{})",
            config.variant.as_str(),
            seed,
            config.playfield.width,
            config.playfield.height
        );
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            machine: PhaseMachine::new(config.start.clone(), config.retry.clone()),
            actor: Actor::new(&config.actor, &config.playfield),
            projectiles: Vec::new(),
            hostiles: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            effects: EffectTimerSet::new(&config.effects),
            scheduler: SpawnScheduler::new(&config.spawns),
            score: 0,
            level: 1,
            lives: config.lives,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            config,
        })
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    #[inline]
    pub fn playfield(&self) -> Playfield {
        self.config.playfield
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Back to the intro: zeroed counters, empty collections, inactive effects
    pub fn reset(&mut self) {
        let from = self.phase();
        self.machine.reset();
        self.actor = Actor::new(&self.config.actor, &self.config.playfield);
        self.projectiles.clear();
        self.hostiles.clear();
        self.particles.clear();
        self.power_ups.clear();
        self.effects.reset();
        self.scheduler.reset();
        self.score = 0;
        self.level = 1;
        self.lives = self.config.lives;
        self.time_ticks = 0;
        self.push_phase_change(from);
        log::info!("Simulation reset");
    }

    /// Intro -> Playing, skipping the intro trigger
    pub fn start(&mut self) {
        if self.phase() == GamePhase::Intro {
            self.machine.force_start();
            self.begin_round();
        }
    }

    /// Place the opening hostiles once play begins
    pub(crate) fn begin_round(&mut self) {
        for _ in 0..self.config.initial_hostiles {
            self.spawn_hostile();
        }
        self.push_phase_change(GamePhase::Intro);
        log::info!(
            "Round started with {} hostiles",
            self.config.initial_hostiles
        );
    }

    /// Playing -> GameOver
    pub(crate) fn end_game(&mut self) {
        if self.machine.end_game() {
            self.push_phase_change(GamePhase::Playing);
            log::info!(
                "Game over: score {}, level {}, tick {}",
                self.score,
                self.level,
                self.time_ticks
            );
        }
    }

    fn push_phase_change(&mut self, from: GamePhase) {
        let to = self.phase();
        if from != to {
            self.events.push(GameEvent::PhaseChanged { from, to });
        }
    }

    /// Spawn one hostile from the template
    pub fn spawn_hostile(&mut self) {
        let id = self.next_entity_id();
        let field = self.config.playfield;
        let hostile = self
            .config
            .hostile
            .instantiate(id, self.time_ticks, &field, &mut self.rng);
        log::debug!("Spawned hostile {} at {:?}", id, hostile.pos);
        self.hostiles.push(hostile);
    }

    /// Spawn one power-up from the template
    pub fn spawn_power_up(&mut self) {
        let id = self.next_entity_id();
        let field = self.config.playfield;
        if let Some(power_up) =
            self.config
                .power_up
                .instantiate(id, self.time_ticks, &field, &mut self.rng)
        {
            log::debug!("Spawned power-up {} ({:?})", id, power_up.behavior);
            self.power_ups.push(power_up);
        }
    }

    pub(crate) fn spawn(&mut self, target: SpawnTarget, count: u32) {
        for _ in 0..count {
            match target {
                SpawnTarget::Hostile => self.spawn_hostile(),
                SpawnTarget::PowerUp => self.spawn_power_up(),
            }
        }
    }

    /// Particle burst at `pos`, evicting the oldest particles past the cap
    pub fn spawn_explosion(&mut self, pos: Vec2) {
        let burst = self.config.explosion.clone();
        for _ in 0..burst.count {
            let id = self.next_entity_id();
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let vel = from_angle(angle, burst.speed.sample(&mut self.rng));
            let radius = burst.radius.sample(&mut self.rng);
            self.particles.push(Entity::particle(
                id,
                pos,
                vel,
                radius,
                burst.life,
                burst.decay,
                burst.gravity,
                self.time_ticks,
            ));
        }
        let max = self.config.max_particles;
        if self.particles.len() > max {
            let excess = self.particles.len() - max;
            self.particles.drain(..excess);
        }
        self.events.push(GameEvent::Explosion {
            pos,
            particles: burst.count,
        });
    }

    /// All live entities in draw order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.particles
            .iter()
            .chain(self.power_ups.iter())
            .chain(self.hostiles.iter())
            .chain(self.projectiles.iter())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase(),
            score: self.score,
            level: self.level,
            lives: self.lives,
            tick: self.time_ticks,
            actor: ActorView {
                pos: self.actor.pos,
                radius: self.actor.radius,
                aim_angle: self.actor.aim_angle,
                auto_fire: self.actor.auto_fire,
            },
            effects: self.effects.active().collect(),
            entities: self.entities().map(EntityView::from).collect(),
        }
    }

    /// Take queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
