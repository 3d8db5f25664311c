//! Transient entities: projectiles, hostiles, particles and power-ups
//!
//! Every entity shares position, velocity and a collision radius. What differs
//! per kind lives in [`Behavior`]. Entities never draw themselves; the host keys
//! its draw code off [`EntityKind`].

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Playfield;

/// Kind tag used for draw dispatch and collection routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Projectile,
    Hostile,
    Particle,
    PowerUp,
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Actor,
    Hostile,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    TripleShot,
    /// Clears every hostile on the field
    Nuke,
    Shield,
    SpeedBoost,
}

/// Bounded position history for projectile rendering (oldest evicted first)
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, pos: Vec2) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(pos);
    }

    /// Oldest point first
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Wing oscillation that reverses direction when leaving [0, 2π]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WingFlap {
    pub angle: f32,
    pub speed: f32,
}

impl WingFlap {
    fn advance(&mut self, dt: f32) {
        self.angle += self.speed * dt;
        if self.angle > TAU || self.angle < 0.0 {
            self.speed = -self.speed;
        }
    }
}

/// Sinusoidal horizontal sway layered on top of drift
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wobble {
    /// Peak horizontal displacement per tick
    pub amplitude: f32,
    /// Phase advance per tick (radians)
    pub frequency: f32,
    #[serde(default)]
    pub phase: f32,
}

impl Wobble {
    fn advance(&mut self, dt: f32) -> f32 {
        self.phase += self.frequency * dt;
        self.amplitude * self.phase.sin() * dt
    }
}

/// Aimed fire from an armed hostile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostileShot {
    /// Fires when `tick % interval_ticks == 0`
    pub interval_ticks: u32,
    pub speed: f32,
    pub radius: f32,
    #[serde(default)]
    pub trail_capacity: usize,
}

/// Kind-specific state
#[derive(Debug, Clone)]
pub enum Behavior {
    Projectile {
        owner: Owner,
        trail: Trail,
    },
    Hostile {
        flap: Option<WingFlap>,
        wobble: Option<Wobble>,
        fire: Option<HostileShot>,
        /// Visual sub-type, picked at spawn
        category: u32,
    },
    Particle {
        /// Remaining lifespan; the particle dies at or below zero
        life: f32,
        decay: f32,
        gravity: f32,
    },
    PowerUp {
        effect: PowerUpKind,
    },
}

/// A simulated entity
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius
    pub radius: f32,
    /// Playing tick the entity was created on
    pub spawn_tick: u64,
    /// Set by collision resolution; purged at end of tick
    pub consumed: bool,
    pub behavior: Behavior,
}

impl Entity {
    pub fn projectile(
        id: u32,
        owner: Owner,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        trail_capacity: usize,
        spawn_tick: u64,
    ) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            spawn_tick,
            consumed: false,
            behavior: Behavior::Projectile {
                owner,
                trail: Trail::new(trail_capacity),
            },
        }
    }

    pub fn hostile(id: u32, pos: Vec2, vel: Vec2, radius: f32, spawn_tick: u64) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            spawn_tick,
            consumed: false,
            behavior: Behavior::Hostile {
                flap: None,
                wobble: None,
                fire: None,
                category: 0,
            },
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn particle(
        id: u32,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        life: f32,
        decay: f32,
        gravity: f32,
        spawn_tick: u64,
    ) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            spawn_tick,
            consumed: false,
            behavior: Behavior::Particle {
                life,
                decay,
                gravity,
            },
        }
    }

    pub fn power_up(
        id: u32,
        effect: PowerUpKind,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        spawn_tick: u64,
    ) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            spawn_tick,
            consumed: false,
            behavior: Behavior::PowerUp { effect },
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self.behavior {
            Behavior::Projectile { .. } => EntityKind::Projectile,
            Behavior::Hostile { .. } => EntityKind::Hostile,
            Behavior::Particle { .. } => EntityKind::Particle,
            Behavior::PowerUp { .. } => EntityKind::PowerUp,
        }
    }

    /// Projectile owner, if this is a projectile
    pub fn owner(&self) -> Option<Owner> {
        match self.behavior {
            Behavior::Projectile { owner, .. } => Some(owner),
            _ => None,
        }
    }

    pub fn is_owned_by(&self, owner: Owner) -> bool {
        self.owner() == Some(owner)
    }

    /// Mark for removal at the end of the tick
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Advance by `dt` ticks (1.0 is one nominal frame, a speed boost scales it up)
    pub fn advance(&mut self, dt: f32, field: &Playfield) {
        match &mut self.behavior {
            Behavior::Projectile { trail, .. } => {
                trail.push(self.pos);
                self.pos += self.vel * dt;
            }
            Behavior::Hostile { flap, wobble, .. } => {
                self.pos += self.vel * dt;
                if let Some(wobble) = wobble {
                    self.pos.x += wobble.advance(dt);
                }
                if let Some(flap) = flap {
                    flap.advance(dt);
                }
                // Reflect drift at the side walls
                if self.pos.x < 0.0 {
                    self.pos.x = 0.0;
                    self.vel.x = self.vel.x.abs();
                } else if self.pos.x > field.width {
                    self.pos.x = field.width;
                    self.vel.x = -self.vel.x.abs();
                }
            }
            Behavior::Particle {
                life,
                decay,
                gravity,
            } => {
                self.pos += self.vel * dt;
                self.vel.y += *gravity * dt;
                *life -= *decay * dt;
            }
            Behavior::PowerUp { .. } => {
                self.pos += self.vel * dt;
            }
        }
    }

    /// Liveness predicate, checked once per tick during the purge
    pub fn is_alive(&self, field: &Playfield) -> bool {
        if self.consumed {
            return false;
        }
        match &self.behavior {
            Behavior::Projectile { .. } => field.contains(self.pos),
            Behavior::Hostile { .. } | Behavior::PowerUp { .. } => {
                self.pos.y <= field.height + self.radius
            }
            Behavior::Particle { life, .. } => *life > 0.0,
        }
    }

    /// Bump fall speed (level-up difficulty ramp)
    pub fn increase_speed(&mut self, amount: f32) {
        if matches!(self.behavior, Behavior::Hostile { .. }) {
            self.vel.y += amount;
        }
    }

    /// Whether an armed hostile fires on this tick
    pub fn fires_on(&self, tick: u64) -> Option<HostileShot> {
        match self.behavior {
            Behavior::Hostile {
                fire: Some(shot), ..
            } if shot.interval_ticks > 0 && tick % u64::from(shot.interval_ticks) == 0 => {
                Some(shot)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Playfield {
        Playfield::new(200.0, 100.0)
    }

    #[test]
    fn test_trail_evicts_oldest() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.push(Vec2::new(i as f32, 0.0));
        }
        let xs: Vec<f32> = trail.points().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(trail.len(), trail.capacity());
    }

    #[test]
    fn test_projectile_records_trail_and_leaves_field() {
        let mut shot = Entity::projectile(
            1,
            Owner::Actor,
            Vec2::new(100.0, 5.0),
            Vec2::new(0.0, -4.0),
            2.0,
            10,
            0,
        );
        shot.advance(1.0, &field());
        assert!(shot.is_alive(&field()));
        shot.advance(1.0, &field());
        assert!(!shot.is_alive(&field()));
        if let Behavior::Projectile { trail, .. } = &shot.behavior {
            assert_eq!(trail.len(), 2);
        } else {
            panic!("expected projectile");
        }
    }

    #[test]
    fn test_hostile_reflects_at_edges() {
        let mut hostile = Entity::hostile(1, Vec2::new(199.0, 10.0), Vec2::new(3.0, 0.0), 5.0, 0);
        hostile.advance(1.0, &field());
        assert_eq!(hostile.pos.x, 200.0);
        assert!(hostile.vel.x < 0.0);

        let mut hostile = Entity::hostile(2, Vec2::new(1.0, 10.0), Vec2::new(-3.0, 0.0), 5.0, 0);
        hostile.advance(1.0, &field());
        assert_eq!(hostile.pos.x, 0.0);
        assert!(hostile.vel.x > 0.0);
    }

    #[test]
    fn test_wing_flap_reverses() {
        let mut flap = WingFlap {
            angle: TAU - 0.05,
            speed: 0.1,
        };
        flap.advance(1.0);
        assert!(flap.speed < 0.0);
    }

    #[test]
    fn test_hostile_dies_below_field() {
        let mut hostile = Entity::hostile(1, Vec2::new(50.0, 100.0), Vec2::new(0.0, 4.0), 5.0, 0);
        assert!(hostile.is_alive(&field()));
        hostile.advance(1.0, &field());
        hostile.advance(1.0, &field());
        assert!(!hostile.is_alive(&field()));
    }

    #[test]
    fn test_particle_lifespan() {
        let mut p = Entity::particle(1, Vec2::ZERO, Vec2::ZERO, 2.0, 10.0, 5.0, 0.0, 0);
        p.advance(1.0, &field());
        assert!(p.is_alive(&field()));
        p.advance(1.0, &field());
        assert!(!p.is_alive(&field()));
    }

    #[test]
    fn test_particle_gravity_accelerates_fall() {
        let mut p = Entity::particle(1, Vec2::new(50.0, 10.0), Vec2::ZERO, 2.0, 100.0, 1.0, 0.5, 0);
        p.advance(1.0, &field());
        assert_eq!(p.vel.y, 0.5);
        assert_eq!(p.pos.y, 10.0);
        p.advance(1.0, &field());
        assert_eq!(p.vel.y, 1.0);
        assert_eq!(p.pos.y, 10.5);
        // Boosted dt scales the pull
        p.advance(2.0, &field());
        assert_eq!(p.vel.y, 2.0);
        assert_eq!(p.pos.y, 12.5);
        if let Behavior::Particle { life, .. } = p.behavior {
            assert_eq!(life, 96.0);
        }
    }

    #[test]
    fn test_hostile_wobble_sways_on_top_of_drift() {
        let wobble = Wobble {
            amplitude: 2.0,
            frequency: 0.5,
            phase: 0.0,
        };
        let mut hostile = Entity::hostile(1, Vec2::new(50.0, 20.0), Vec2::new(1.0, 0.0), 5.0, 0);
        hostile.behavior = Behavior::Hostile {
            flap: None,
            wobble: Some(wobble),
            fire: None,
            category: 0,
        };

        let mut expected = 50.0f32;
        let mut phase = 0.0f32;
        for _ in 0..4 {
            hostile.advance(1.0, &field());
            phase += wobble.frequency;
            expected += 1.0 + wobble.amplitude * phase.sin();
            assert!((hostile.pos.x - expected).abs() < 1e-4);
        }
        // Drift is untouched, only position sways
        assert_eq!(hostile.vel.x, 1.0);
        assert_eq!(hostile.pos.y, 20.0);
    }

    #[test]
    fn test_consumed_is_dead() {
        let mut p =
            Entity::power_up(1, PowerUpKind::Shield, Vec2::new(5.0, 5.0), Vec2::ZERO, 5.0, 0);
        assert!(p.is_alive(&field()));
        p.consume();
        assert!(!p.is_alive(&field()));
    }

    #[test]
    fn test_armed_hostile_fire_interval() {
        let mut hostile = Entity::hostile(1, Vec2::ZERO, Vec2::ZERO, 5.0, 0);
        hostile.behavior = Behavior::Hostile {
            flap: None,
            wobble: None,
            fire: Some(HostileShot {
                interval_ticks: 60,
                speed: 10.0,
                radius: 3.0,
                trail_capacity: 0,
            }),
            category: 0,
        };
        assert!(hostile.fires_on(59).is_none());
        assert!(hostile.fires_on(60).is_some());
        assert!(hostile.fires_on(120).is_some());
    }
}
