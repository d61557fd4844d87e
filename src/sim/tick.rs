//! Fixed timestep simulation tick
//!
//! Core update that advances the simulation deterministically. Rendering
//! happens before this, in the driver.

use super::collision::{any_meteor_landed, prune_overflow, resolve_collisions};
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one tick of `dt_ms` simulated milliseconds.
///
/// Order: due timers, overflow pruning, ship (input, firing, lasers),
/// meteors, collisions, landing check. Does nothing once the game is over.
pub fn tick(state: &mut GameState, dt_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;
    state.clock_ms += dt_ms;

    // Timers that came due since the last tick
    state.ship.advance_reload(dt_ms);
    for meteor in state.spawner.advance(dt_ms) {
        events.push(GameEvent::MeteorSpawned {
            meteor_id: meteor.id,
            x: meteor.body.pos.x,
        });
        state.meteors.push(meteor);
    }

    let field_height = state.config.field_height;
    let (meteors_gone, lasers_gone) =
        prune_overflow(&mut state.meteors, &mut state.ship.projectiles, field_height);
    if meteors_gone + lasers_gone > 0 {
        log::trace!("Pruned {} meteors, {} lasers", meteors_gone, lasers_gone);
    }

    if let Some(projectile_id) = state.ship.tick() {
        log::debug!("Laser {} fired", projectile_id);
        events.push(GameEvent::ShotFired { projectile_id });
    }

    for meteor in &mut state.meteors {
        meteor.advance();
    }

    let hits = resolve_collisions(
        &mut state.meteors,
        &mut state.ship.projectiles,
        state.config.hit_padding,
    );
    state.score += hits.len() as u64;
    for hit in hits {
        log::debug!("Meteor {} destroyed by laser {}", hit.meteor_id, hit.projectile_id);
        events.push(GameEvent::MeteorDestroyed {
            meteor_id: hit.meteor_id,
            projectile_id: hit.projectile_id,
        });
    }

    if any_meteor_landed(&state.meteors, field_height) {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
        events.push(GameEvent::GameOver { score: state.score });
    }

    events
}
