//! Rendering interface
//!
//! The simulation never draws. Each frame the host takes a [`Snapshot`] and
//! hands it to [`present`] with its own [`Renderer`] (canvas 2D, a terminal,
//! a test double). Draw order is fixed: screen, entities back to front, actor,
//! HUD, then per-event feedback.

use crate::sim::{ActorView, EntityKind, EntityView, GameEvent, GamePhase, Snapshot};

/// Host-side drawing surface
pub trait Renderer {
    /// Clear and draw the backdrop (intro/game-over screens draw their text here)
    fn draw_screen(&mut self, phase: GamePhase, snapshot: &Snapshot);

    fn draw_actor(&mut self, actor: &ActorView);

    fn draw_projectile(&mut self, entity: &EntityView);

    fn draw_hostile(&mut self, entity: &EntityView);

    fn draw_particle(&mut self, entity: &EntityView);

    fn draw_power_up(&mut self, entity: &EntityView);

    /// Score, level, lives and active effects
    fn draw_hud(&mut self, snapshot: &Snapshot);

    /// Sound or screen-shake hook
    fn feedback(&mut self, _event: &GameEvent) {}

    /// Dispatch on entity kind
    fn draw_entity(&mut self, entity: &EntityView) {
        match entity.kind {
            EntityKind::Projectile => self.draw_projectile(entity),
            EntityKind::Hostile => self.draw_hostile(entity),
            EntityKind::Particle => self.draw_particle(entity),
            EntityKind::PowerUp => self.draw_power_up(entity),
        }
    }
}

/// Draw one frame
pub fn present<R: Renderer + ?Sized>(snapshot: &Snapshot, events: &[GameEvent], renderer: &mut R) {
    renderer.draw_screen(snapshot.phase, snapshot);
    if snapshot.phase == GamePhase::Playing {
        for entity in &snapshot.entities {
            renderer.draw_entity(entity);
        }
        renderer.draw_actor(&snapshot.actor);
    }
    renderer.draw_hud(snapshot);
    for event in events {
        renderer.feedback(event);
    }
}
