//! The player-controlled body (turret, UFO, spaceship)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tick::{Key, TickInput};
use crate::{Playfield, angle_to, from_angle};

/// How the actor moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Snap to the pointer every tick
    FollowPointer,
    /// Slide horizontally toward the pointer at a fixed speed
    TrackPointerX { speed: f32 },
    /// Move with held WASD/arrow keys
    Keys { speed: f32 },
}

/// What fires the weapon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FireTrigger {
    Click,
    Key(Key),
}

/// Where shots go
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Aim {
    AtPointer,
    /// Fixed heading in radians (y grows downward, so π/2 is straight down)
    Fixed { angle: f32 },
}

/// Actor weapon tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub trigger: FireTrigger,
    pub aim: Aim,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    /// Ticks between volleys
    pub cooldown_ticks: u32,
    /// Cap on live actor projectiles (0 = unlimited)
    pub max_live: usize,
    /// Triple-shot side angle (radians)
    pub spread_angle: f32,
    /// Triple-shot side muzzle offset along x
    pub spread_offset: f32,
    /// Key that toggles hold-to-fire mode
    pub auto_fire_toggle: Option<Key>,
    pub trail_capacity: usize,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            trigger: FireTrigger::Click,
            aim: Aim::AtPointer,
            projectile_speed: 12.0,
            projectile_radius: 4.0,
            cooldown_ticks: 6,
            max_live: 10,
            spread_angle: 0.1,
            spread_offset: 10.0,
            auto_fire_toggle: None,
            trail_capacity: 10,
        }
    }
}

/// Actor tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorConfig {
    pub control: ControlScheme,
    /// Start x as a fraction of the playfield width
    pub start_x: f32,
    /// Start y measured up from the bottom edge
    pub start_y_from_bottom: f32,
    pub radius: f32,
    /// Movement factor while speed boost is active
    pub boost_speed: f32,
    /// Hostile bodies (not just their shots) hurt on contact
    pub contact_damage: bool,
    pub weapon: Option<WeaponConfig>,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            control: ControlScheme::Keys { speed: 5.0 },
            start_x: 0.5,
            start_y_from_bottom: 50.0,
            radius: 15.0,
            boost_speed: 1.0,
            contact_damage: true,
            weapon: None,
        }
    }
}

/// Player actor state
#[derive(Debug, Clone)]
pub struct Actor {
    pub pos: Vec2,
    pub radius: f32,
    /// Current weapon heading
    pub aim_angle: f32,
    /// Hold-to-fire mode
    pub auto_fire: bool,
    /// Ticks until the weapon can fire again
    pub cooldown: u32,
}

impl Actor {
    pub fn new(config: &ActorConfig, field: &Playfield) -> Self {
        let aim_angle = match config.weapon.as_ref().map(|w| w.aim) {
            Some(Aim::Fixed { angle }) => angle,
            // Straight up
            _ => -std::f32::consts::FRAC_PI_2,
        };
        Self {
            pos: field.clamp(Vec2::new(
                config.start_x * field.width,
                field.height - config.start_y_from_bottom,
            )),
            radius: config.radius,
            aim_angle,
            auto_fire: false,
            cooldown: 0,
        }
    }

    /// Move according to the control scheme. `factor` scales key/track speed.
    pub fn steer(
        &mut self,
        control: ControlScheme,
        input: &TickInput,
        field: &Playfield,
        factor: f32,
    ) {
        match control {
            ControlScheme::FollowPointer => {
                if let Some(pointer) = input.pointer {
                    self.pos = pointer;
                }
            }
            ControlScheme::TrackPointerX { speed } => {
                if let Some(pointer) = input.pointer {
                    let step = speed * factor;
                    let dx = pointer.x - self.pos.x;
                    self.pos.x += dx.clamp(-step, step);
                }
            }
            ControlScheme::Keys { speed } => {
                let mut dir = Vec2::ZERO;
                if input.held(Key::Left) || input.held(Key::Char('a')) {
                    dir.x -= 1.0;
                }
                if input.held(Key::Right) || input.held(Key::Char('d')) {
                    dir.x += 1.0;
                }
                if input.held(Key::Up) || input.held(Key::Char('w')) {
                    dir.y -= 1.0;
                }
                if input.held(Key::Down) || input.held(Key::Char('s')) {
                    dir.y += 1.0;
                }
                self.pos += dir * speed * factor;
            }
        }
        self.pos = field.clamp(self.pos);
    }

    /// Update heading and decide whether the weapon fires this tick.
    /// Handles the auto-fire toggle and counts the cooldown down. `has_room`
    /// is false while the live-projectile cap is reached; a blocked shot
    /// leaves the cooldown unarmed.
    pub fn trigger(&mut self, weapon: &WeaponConfig, input: &TickInput, has_room: bool) -> bool {
        if let Some(pointer) = input.pointer {
            if weapon.aim == Aim::AtPointer {
                self.aim_angle = angle_to(self.pos, pointer);
            }
        }
        if let Some(toggle) = weapon.auto_fire_toggle {
            if input.pressed(toggle) {
                self.auto_fire = !self.auto_fire;
                log::debug!("Auto-fire: {}", self.auto_fire);
            }
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return false;
        }

        let wants = if self.auto_fire {
            input.pointer_down
        } else {
            match weapon.trigger {
                FireTrigger::Click => input.pointer_pressed,
                FireTrigger::Key(key) => input.pressed(key),
            }
        };
        let fires = wants && has_room;
        if fires {
            self.cooldown = weapon.cooldown_ticks;
        }
        fires
    }

    /// Muzzle positions and velocities for one volley
    pub fn volley(&self, weapon: &WeaponConfig, triple: bool) -> Vec<(Vec2, Vec2)> {
        let shot = |offset: f32, angle: f32| {
            (
                self.pos + Vec2::new(offset, 0.0),
                from_angle(angle, weapon.projectile_speed),
            )
        };
        if triple {
            vec![
                shot(-weapon.spread_offset, self.aim_angle - weapon.spread_angle),
                shot(0.0, self.aim_angle),
                shot(weapon.spread_offset, self.aim_angle + weapon.spread_angle),
            ]
        } else {
            vec![shot(0.0, self.aim_angle)]
        }
    }
}
