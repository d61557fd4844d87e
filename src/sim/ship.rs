//! The player's ship
//!
//! Input sets level-triggered intent flags; the tick applies them. Holding
//! fire shoots once per reload period, not once per key press.

use glam::Vec2;

use super::entity::{Body, Direction, EntitySpec, Rect};
use super::input::{InputAction, KeyEvent};
use super::state::Projectile;
use super::timer::Delay;
use crate::config::GameConfig;

/// What the player is currently asking for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub moving_left: bool,
    pub moving_right: bool,
    pub wants_fire: bool,
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub body: Body,
    pub intent: Intent,
    /// Live lasers, oldest first
    pub projectiles: Vec<Projectile>,
    laser: EntitySpec,
    reload_ms: f64,
    /// Pending reload; at most one outstanding
    reload: Option<Delay>,
    next_projectile_id: u32,
}

impl Ship {
    /// Ship centered on the bottom edge of the field
    pub fn new(config: &GameConfig) -> Self {
        let spec = &config.ship;
        let pos = Vec2::new(
            config.field_width / 2.0 - spec.width / 2.0,
            config.field_height - spec.height,
        );
        Self {
            body: Body::new(pos, spec),
            intent: Intent::default(),
            projectiles: Vec::new(),
            laser: config.laser,
            reload_ms: config.reload_ms,
            reload: None,
            next_projectile_id: 1,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    /// Apply a key-down/key-up to the matching intent flag
    pub fn handle_input(&mut self, event: KeyEvent) {
        let flag = match event.action {
            InputAction::MoveLeft => &mut self.intent.moving_left,
            InputAction::MoveRight => &mut self.intent.moving_right,
            InputAction::Fire => &mut self.intent.wants_fire,
        };
        *flag = event.pressed;
    }

    pub fn is_reloading(&self) -> bool {
        self.reload.is_some()
    }

    /// Let simulated time pass for the pending reload, if any
    pub fn advance_reload(&mut self, dt_ms: f64) {
        if let Some(reload) = &mut self.reload {
            if reload.advance(dt_ms) {
                self.reload = None;
            }
        }
    }

    /// Apply intent, fire if allowed, then advance every laser.
    ///
    /// Returns the id of the laser fired this tick, if any.
    pub fn tick(&mut self) -> Option<u32> {
        // Both flags may be set; they cancel out
        if self.intent.moving_left {
            self.body.step(Direction::Left);
        }
        if self.intent.moving_right {
            self.body.step(Direction::Right);
        }

        let fired = if self.intent.wants_fire && !self.is_reloading() {
            self.reload = Some(Delay::new(self.reload_ms));
            Some(self.fire())
        } else {
            None
        };

        for projectile in &mut self.projectiles {
            projectile.advance();
        }

        fired
    }

    /// Spawn a laser with its left edge at the ship's center, on the ship's top edge
    fn fire(&mut self) -> u32 {
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        let bounds = self.bounds();
        self.projectiles
            .push(Projectile::new(id, bounds.center_x(), bounds.y, &self.laser));
        id
    }
}
