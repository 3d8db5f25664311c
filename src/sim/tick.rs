//! Per-frame simulation tick
//!
//! Order within a playing tick is fixed, reordering changes outcomes:
//! timers, movement, spawning, collisions (shots, pickups, lethal contact),
//! purge, then score and level bookkeeping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision;
use super::effects::EffectKind;
use super::entity::{Behavior, Entity, Owner, PowerUpKind};
use super::phase::GamePhase;
use super::spawn::SpawnTarget;
use super::state::{GameEvent, GameState};
use crate::consts::MAX_SPAWN_BATCH;
use crate::{Playfield, angle_to, from_angle};

/// Keyboard keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Space,
    Enter,
    Up,
    Down,
    Left,
    Right,
    /// Printable key, lowercased
    Char(char),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(name: &str) -> Option<Key> {
        match name {
            " " | "Spacebar" => Some(Key::Space),
            "Enter" => Some(Key::Enter),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c.to_ascii_lowercase())),
                    _ => None,
                }
            }
        }
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in playfield coordinates
    pub pointer: Option<Vec2>,
    /// Pointer button held
    pub pointer_down: bool,
    /// Pointer button went down this frame
    pub pointer_pressed: bool,
    /// Keys that went down this frame
    pub keys_pressed: Vec<Key>,
    /// Keys currently held
    pub keys_held: Vec<Key>,
}

impl TickInput {
    #[inline]
    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    #[inline]
    pub fn held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    let field = state.playfield();

    // Non-playing phases only watch for their exit input
    match state.phase() {
        GamePhase::Intro => {
            if state.machine.update_intro(input) {
                state.begin_round();
            }
            return;
        }
        GamePhase::GameOver => {
            if state.machine.retry_requested(input, &field) {
                state.reset();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    let frame = state.time_ticks;

    for kind in state.effects.tick() {
        log::debug!("{:?} expired at tick {}", kind, frame);
        state.events.push(GameEvent::EffectExpired { kind });
    }
    let speed = state.effects.speed_multiplier();

    update_actor(state, input);
    advance_entities(state, speed, frame);

    for order in state.scheduler.due(frame, speed, state.level) {
        state.spawn(order.target, order.count);
    }

    resolve_projectile_hits(state);
    resolve_pickups(state);
    resolve_actor_hits(state);

    if state.config.game_over_when_cleared
        && state.phase() == GamePhase::Playing
        && !state.hostiles.iter().any(|h| h.is_alive(&field))
    {
        log::info!("Hostile population exhausted");
        state.end_game();
    }

    purge(state, &field);

    if state.phase() == GamePhase::Playing {
        advance_score(state, speed);
    }
}

/// Move the actor and fire its weapon
fn update_actor(state: &mut GameState, input: &TickInput) {
    let field = state.playfield();
    let factor = if state.effects.is_active(EffectKind::SpeedBoost) {
        state.config.actor.boost_speed
    } else {
        1.0
    };
    state
        .actor
        .steer(state.config.actor.control, input, &field, factor);

    let Some(weapon) = state.config.actor.weapon.clone() else {
        return;
    };
    let live = state
        .projectiles
        .iter()
        .filter(|p| !p.consumed && p.is_owned_by(Owner::Actor))
        .count();
    let has_room = weapon.max_live == 0 || live < weapon.max_live;
    if !state.actor.trigger(&weapon, input, has_room) {
        return;
    }

    let triple = state.effects.is_active(EffectKind::TripleShot);
    for (pos, vel) in state.actor.volley(&weapon, triple) {
        let id = state.next_entity_id();
        state.projectiles.push(Entity::projectile(
            id,
            Owner::Actor,
            pos,
            vel,
            weapon.projectile_radius,
            weapon.trail_capacity,
            state.time_ticks,
        ));
    }
}

/// Advance every entity, then let armed hostiles fire at the actor
fn advance_entities(state: &mut GameState, speed: f32, frame: u64) {
    let field = state.playfield();
    for entity in state
        .projectiles
        .iter_mut()
        .chain(state.hostiles.iter_mut())
        .chain(state.particles.iter_mut())
        .chain(state.power_ups.iter_mut())
    {
        entity.advance(speed, &field);
    }

    let target = state.actor.pos;
    let volleys: Vec<_> = state
        .hostiles
        .iter()
        .filter_map(|h| h.fires_on(frame).map(|shot| (h.pos, shot)))
        .collect();
    for (origin, shot) in volleys {
        let id = state.next_entity_id();
        let vel = from_angle(angle_to(origin, target), shot.speed);
        state.projectiles.push(Entity::projectile(
            id,
            Owner::Hostile,
            origin,
            vel,
            shot.radius,
            shot.trail_capacity,
            frame,
        ));
    }
}

/// Actor shots against hostiles: one kill per shot, first match wins
fn resolve_projectile_hits(state: &mut GameState) {
    let pairs = collision::find_collisions_where(&state.projectiles, &state.hostiles, |p| {
        p.is_owned_by(Owner::Actor)
    });
    if pairs.is_empty() {
        return;
    }

    let mut kills = Vec::with_capacity(pairs.len());
    for (p, h) in pairs {
        state.projectiles[p].consume();
        let hostile = &mut state.hostiles[h];
        hostile.consume();
        kills.push((hostile.id, hostile.pos));
    }

    for (id, pos) in kills {
        state.score += state.config.scoring.per_kill;
        state.events.push(GameEvent::HostileDestroyed { id, pos });
        state.spawn_explosion(pos);
        if state.config.respawn_on_kill {
            state.spawn_hostile();
        }
    }
}

/// Actor against power-ups: only the power-up is removed
fn resolve_pickups(state: &mut GameState) {
    let hits = collision::all_hits(state.actor.pos, state.actor.radius, &state.power_ups, |_| true);
    for i in hits {
        let pickup = &mut state.power_ups[i];
        pickup.consume();
        let pos = pickup.pos;
        if let Behavior::PowerUp { effect } = pickup.behavior {
            apply_power_up(state, effect, pos);
        }
    }
}

fn apply_power_up(state: &mut GameState, kind: PowerUpKind, pos: Vec2) {
    log::debug!("Collected {:?}", kind);
    state.events.push(GameEvent::PowerUpCollected { kind, pos });

    let effect = match kind {
        PowerUpKind::TripleShot => EffectKind::TripleShot,
        PowerUpKind::Shield => EffectKind::Shield,
        PowerUpKind::SpeedBoost => EffectKind::SpeedBoost,
        PowerUpKind::Nuke => {
            let mut cleared = 0;
            for hostile in state.hostiles.iter_mut().filter(|h| !h.consumed) {
                hostile.consume();
                cleared += 1;
            }
            state.score += state.config.scoring.nuke_bonus;
            state.events.push(GameEvent::Nuke { cleared });
            return;
        }
    };
    let ticks = state.config.effects.duration(effect);
    state.effects.activate(effect, ticks);
}

/// Lethal check: hostile shots and (optionally) hostile bodies against the actor
fn resolve_actor_hits(state: &mut GameState) {
    let (pos, radius) = (state.actor.pos, state.actor.radius);

    // Shots are spent on contact even when the actor is protected
    let shots = collision::all_hits(pos, radius, &state.projectiles, |p| {
        p.is_owned_by(Owner::Hostile)
    });
    for &i in &shots {
        state.projectiles[i].consume();
    }

    let body = if state.config.actor.contact_damage {
        collision::first_hit(pos, radius, &state.hostiles, |_| true)
    } else {
        None
    };

    if (shots.is_empty() && body.is_none()) || state.effects.is_protected() {
        return;
    }

    if let Some(i) = body {
        let hostile = &mut state.hostiles[i];
        hostile.consume();
        let at = hostile.pos;
        state.spawn_explosion(at);
    }

    state.lives = state.lives.saturating_sub(1);
    state
        .effects
        .activate(EffectKind::HitFlash, state.config.effects.hit_flash_ticks);
    state.events.push(GameEvent::ActorHit {
        lives_left: state.lives,
    });
    log::info!("Actor hit, {} lives left", state.lives);

    if state.lives == 0 {
        state.end_game();
    }
}

/// Drop every entity whose liveness predicate failed
fn purge(state: &mut GameState, field: &Playfield) {
    state.projectiles.retain(|e| e.is_alive(field));
    state.hostiles.retain(|e| e.is_alive(field));
    state.particles.retain(|e| e.is_alive(field));
    state.power_ups.retain(|e| e.is_alive(field));
}

/// Survival score and level progression
fn advance_score(state: &mut GameState, speed: f32) {
    let per_tick = state.config.scoring.per_tick;
    if per_tick > 0 {
        state.score += (per_tick as f32 * speed).round() as u64;
    }

    let threshold = state.config.level.score_threshold;
    if threshold > 0 && state.score >= u64::from(state.level) * threshold {
        level_up(state);
    }
}

fn level_up(state: &mut GameState) {
    state.level += 1;
    state.scheduler.level_up();

    let bump = state.config.level.hostile_speed_bump;
    for hostile in &mut state.hostiles {
        hostile.increase_speed(bump);
    }

    let batch = ((state.level as f32 * state.config.level.batch_per_level).ceil() as u32)
        .min(MAX_SPAWN_BATCH);
    state.spawn(SpawnTarget::Hostile, batch);

    let spawn_interval = state.scheduler.interval(SpawnTarget::Hostile);
    log::info!(
        "Level {} (spawn interval {:?}, batch {})",
        state.level,
        spawn_interval,
        batch
    );
    state.events.push(GameEvent::LevelUp {
        level: state.level,
        spawn_interval,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SimConfig, Variant};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn playing(config: SimConfig, seed: u64) -> GameState {
        let mut state = GameState::new(config, seed).unwrap();
        state.start();
        state.drain_events();
        state
    }

    fn still_hostile(state: &mut GameState, pos: Vec2, radius: f32) -> u32 {
        let id = state.next_entity_id();
        state
            .hostiles
            .push(Entity::hostile(id, pos, Vec2::ZERO, radius, 0));
        id
    }

    fn still_power_up(state: &mut GameState, kind: PowerUpKind, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state
            .power_ups
            .push(Entity::power_up(id, kind, pos, Vec2::ZERO, 15.0, 0));
        id
    }

    /// AlienDefence with automatic spawning turned off
    fn quiet_defence() -> SimConfig {
        let mut config = SimConfig::from_preset(Variant::AlienDefence);
        config.spawns.clear();
        config
    }

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom(" "), Some(Key::Space));
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom("W"), Some(Key::Char('w')));
        assert_eq!(Key::from_dom("Shift"), None);
    }

    #[test]
    fn test_intro_timer_starts_play() {
        let mut config = SimConfig::from_preset(Variant::SpaceDodge);
        config.start.intro_ticks = Some(3);
        let mut state = GameState::new(config, 1).unwrap();
        let idle = TickInput::default();

        tick(&mut state, &idle);
        tick(&mut state, &idle);
        assert_eq!(state.phase(), GamePhase::Intro);
        tick(&mut state, &idle);
        assert_eq!(state.phase(), GamePhase::Playing);
        // Intro ticks don't advance the simulation clock
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_lethal_hit_ends_game_same_tick() {
        let mut state = playing(SimConfig::from_preset(Variant::SpaceDodge), 1);
        let actor = state.actor.pos;
        still_hostile(&mut state, actor, 20.0);
        let id = state.next_entity_id();
        state.power_ups.push(Entity::power_up(
            id,
            PowerUpKind::Shield,
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 3.0),
            15.0,
            0,
        ));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.score, 0);

        // Frozen until reset
        let frozen = state.power_ups[0].pos;
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.power_ups[0].pos, frozen);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_shield_blocks_lethal_hit() {
        let mut state = playing(SimConfig::from_preset(Variant::SpaceDodge), 1);
        state.effects.activate(EffectKind::Shield, 500);
        let actor = state.actor.pos;
        still_hostile(&mut state, actor, 20.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.lives, 1);
        // Shielded contact leaves the hostile alone
        assert_eq!(state.hostiles.len(), 1);
    }

    #[test]
    fn test_same_frame_pickup_protects_before_lethal_check() {
        let mut state = playing(SimConfig::from_preset(Variant::SpaceDodge), 1);
        let actor = state.actor.pos;
        still_power_up(&mut state, PowerUpKind::SpeedBoost, actor);
        still_hostile(&mut state, actor, 20.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(state.effects.is_active(EffectKind::Invulnerable));
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_boosted_spawn_interval() {
        let mut config = SimConfig::from_preset(Variant::SpaceDodge);
        config.spawns.retain(|r| r.target == SpawnTarget::Hostile);
        config.spawns[0].interval_ticks = 20;
        config.effects.boost_multiplier = 10.0;

        let mut state = playing(config.clone(), 4);
        state.effects.activate(EffectKind::SpeedBoost, 100);
        tick(&mut state, &TickInput::default());
        assert!(state.hostiles.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.hostiles.len(), 1);

        // Without the boost the first spawn lands on tick 20
        let mut state = playing(config, 4);
        for _ in 0..19 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.hostiles.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.hostiles.len(), 1);
    }

    #[test]
    fn test_one_kill_per_projectile() {
        let mut state = playing(quiet_defence(), 1);
        let at = Vec2::new(300.0, 300.0);
        let id = state.next_entity_id();
        state.projectiles.push(Entity::projectile(
            id,
            Owner::Actor,
            at,
            Vec2::ZERO,
            4.0,
            0,
            0,
        ));
        let first = still_hostile(&mut state, at + Vec2::new(3.0, 0.0), 20.0);
        let second = still_hostile(&mut state, at - Vec2::new(3.0, 0.0), 20.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);
        assert_eq!(state.hostiles.len(), 1);
        assert_eq!(state.hostiles[0].id, second);
        assert!(state.projectiles.is_empty());
        assert!(!state.particles.is_empty());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::HostileDestroyed { id: first, pos: at + Vec2::new(3.0, 0.0) })
        );
    }

    #[test]
    fn test_click_fires_triple_shot() {
        let mut state = playing(quiet_defence(), 1);
        state.effects.activate(EffectKind::TripleShot, 300);
        let click = TickInput {
            pointer: Some(Vec2::new(640.0, 100.0)),
            pointer_down: true,
            pointer_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &click);
        assert_eq!(state.projectiles.len(), 3);
        assert!(state.projectiles.iter().all(|p| p.is_owned_by(Owner::Actor)));
    }

    #[test]
    fn test_capped_shot_does_not_arm_cooldown() {
        let mut state = playing(quiet_defence(), 1);
        for i in 0..10 {
            let id = state.next_entity_id();
            let at = Vec2::new(100.0 + 20.0 * i as f32, 100.0);
            state.projectiles.push(Entity::projectile(
                id,
                Owner::Actor,
                at,
                Vec2::ZERO,
                4.0,
                0,
                0,
            ));
        }
        let click = TickInput {
            pointer: Some(Vec2::new(640.0, 100.0)),
            pointer_down: true,
            pointer_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &click);
        assert_eq!(state.projectiles.len(), 10);
        assert_eq!(state.actor.cooldown, 0);

        // Room frees up and the very next click fires
        state.projectiles.clear();
        tick(&mut state, &click);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.actor.cooldown, 6);
    }

    #[test]
    fn test_shield_pickup() {
        let mut state = playing(SimConfig::from_preset(Variant::SpaceDodge), 1);
        let actor = state.actor.pos;
        still_power_up(&mut state, PowerUpKind::Shield, actor);
        tick(&mut state, &TickInput::default());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.effects.remaining(EffectKind::Shield), 500);
    }

    #[test]
    fn test_nuke_clears_hostiles() {
        let mut state = playing(quiet_defence(), 1);
        for x in [100.0, 200.0, 300.0] {
            still_hostile(&mut state, Vec2::new(x, 100.0), 20.0);
        }
        let actor = state.actor.pos;
        still_power_up(&mut state, PowerUpKind::Nuke, actor);

        tick(&mut state, &TickInput::default());
        assert!(state.hostiles.is_empty());
        assert_eq!(state.score, 10);
        assert!(state.drain_events().contains(&GameEvent::Nuke { cleared: 3 }));
    }

    #[test]
    fn test_level_up_ramps_difficulty() {
        let mut state = playing(SimConfig::from_preset(Variant::SpaceDodge), 2);
        still_hostile(&mut state, Vec2::new(100.0, 100.0), 20.0);
        state.score = 999;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.level, 2);
        assert_eq!(state.scheduler.interval(SpawnTarget::Hostile), Some(27));
        // Existing hostile sped up, one extra spawned
        assert_eq!(state.hostiles[0].vel.y, 0.5);
        assert_eq!(state.hostiles.len(), 2);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::LevelUp { level: 2, .. }))
        );
    }

    #[test]
    fn test_boost_scales_survival_score() {
        let mut state = playing(SimConfig::from_preset(Variant::SpaceDodge), 2);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);
        state.effects.activate(EffectKind::SpeedBoost, 50);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 11);
    }

    #[test]
    fn test_turrets_fire_and_retry_resets() {
        let mut config = SimConfig::from_preset(Variant::AttackOnTurrets);
        config.lives = 1;
        let mut state = playing(config, 8);
        let away = TickInput {
            pointer: Some(Vec2::new(640.0, 100.0)),
            ..Default::default()
        };
        for _ in 0..59 {
            tick(&mut state, &away);
        }
        assert!(!state.projectiles.iter().any(|p| p.is_owned_by(Owner::Hostile)));
        tick(&mut state, &away);
        let shots = state
            .projectiles
            .iter()
            .filter(|p| p.is_owned_by(Owner::Hostile))
            .count();
        assert_eq!(shots, 15);

        // Park the UFO on a shot
        let target = state
            .projectiles
            .iter()
            .find(|p| p.is_owned_by(Owner::Hostile))
            .map(|p| p.pos)
            .unwrap();
        let onto_shot = TickInput {
            pointer: Some(target),
            ..Default::default()
        };
        while state.phase() == GamePhase::Playing {
            tick(&mut state, &onto_shot);
        }
        assert_eq!(state.phase(), GamePhase::GameOver);

        let retry = TickInput {
            pointer: Some(Vec2::new(640.0, 360.0 + 75.0)),
            pointer_pressed: true,
            pointer_down: true,
            ..Default::default()
        };
        tick(&mut state, &retry);
        assert_eq!(state.phase(), GamePhase::Intro);
        assert_eq!(state.score, 0);
        assert!(state.hostiles.is_empty() && state.projectiles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let inputs: Vec<TickInput> = (0..300)
            .map(|i| TickInput {
                pointer: Some(Vec2::new((i * 7 % 1280) as f32, 200.0)),
                pointer_down: i % 3 == 0,
                pointer_pressed: i % 10 == 0,
                keys_pressed: if i == 0 { vec![Key::Enter] } else { vec![] },
                keys_held: vec![],
            })
            .collect();

        for variant in Variant::ALL {
            let mut a = GameState::new(SimConfig::from_preset(variant), 99).unwrap();
            let mut b = GameState::new(SimConfig::from_preset(variant), 99).unwrap();
            a.start();
            b.start();
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (
            prop::option::of((0.0f32..1280.0, 0.0f32..720.0)),
            any::<bool>(),
            any::<bool>(),
            prop::sample::subsequence(
                vec![Key::Space, Key::Enter, Key::Left, Key::Right, Key::Up, Key::Down],
                0..3,
            ),
        )
            .prop_map(|(pointer, down, pressed, keys)| TickInput {
                pointer: pointer.map(|(x, y)| Vec2::new(x, y)),
                pointer_down: down,
                pointer_pressed: pressed,
                keys_pressed: keys.clone(),
                keys_held: keys,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_score_monotonic_and_purged_stay_gone(
            variant_idx in 0usize..3,
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..240),
        ) {
            let config = SimConfig::from_preset(Variant::ALL[variant_idx]);
            let mut state = GameState::new(config, seed).unwrap();
            state.start();
            let field = state.playfield();
            let mut seen: HashSet<u32> = HashSet::new();
            let mut gone: HashSet<u32> = HashSet::new();

            for input in &inputs {
                let was_playing = state.phase() == GamePhase::Playing;
                let before = state.score;
                tick(&mut state, input);
                if was_playing && state.phase() != GamePhase::Intro {
                    prop_assert!(state.score >= before);
                }

                let live: HashSet<u32> = state.entities().map(|e| e.id).collect();
                for e in state.entities() {
                    prop_assert!(e.is_alive(&field) || state.phase() != GamePhase::Playing);
                    prop_assert!(!gone.contains(&e.id));
                }
                for id in seen.difference(&live) {
                    gone.insert(*id);
                }
                seen = live;
            }
        }
    }
}
