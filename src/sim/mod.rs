//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (oldest entity first)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod input;
pub mod ship;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Hit, any_meteor_landed, laser_hits_meteor, prune_overflow, resolve_collisions};
pub use entity::{Body, Direction, EntitySpec, Rect};
pub use input::{InputAction, KeyEvent};
pub use ship::{Intent, Ship};
pub use spawner::MeteorSpawner;
pub use state::{GameEvent, GamePhase, GameState, Meteor, Projectile};
pub use tick::tick;
