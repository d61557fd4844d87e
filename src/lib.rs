//! Meteor Defense - hold the line against falling meteors
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `game_loop`: Fixed-rate driver that renders then updates each tick
//! - `renderer`: Drawing surface abstraction and the WebGPU quad pipeline
//! - `audio`: Fire-and-forget sound effects
//! - `config`: Startup configuration and validation

pub mod audio;
pub mod config;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use game_loop::{GameLoop, LoopHandle};

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate of the game loop (ticks per second)
    pub const TICK_RATE_HZ: u32 = 400;

    /// Default play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_WIDTH: f32 = 120.0;
    pub const SHIP_HEIGHT: f32 = 120.0;
    pub const SHIP_SPEED: f32 = 2.0;
    /// Minimum time between two shots (ms)
    pub const RELOAD_MS: f64 = 300.0;

    /// Laser defaults
    pub const LASER_WIDTH: f32 = 20.0;
    pub const LASER_HEIGHT: f32 = 40.0;
    pub const LASER_SPEED: f32 = 4.0;

    /// Meteor defaults
    pub const METEOR_WIDTH: f32 = 60.0;
    pub const METEOR_HEIGHT: f32 = 60.0;
    pub const METEOR_SPEED: f32 = 1.0;
    /// Time between meteor spawns (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 600.0;

    /// Horizontal slack on each side of a meteor when testing laser hits
    pub const HIT_PADDING: f32 = 10.0;
}
