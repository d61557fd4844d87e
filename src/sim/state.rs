//! Game state and core simulation types

use glam::Vec2;

use super::entity::{Body, Direction, EntitySpec, Rect};
use super::ship::Ship;
use super::spawner::MeteorSpawner;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A meteor reached the bottom; terminal
    GameOver,
}

/// Things that happened during a tick, for the driver to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The ship fired a laser
    ShotFired { projectile_id: u32 },
    /// A meteor entered at the top of the field
    MeteorSpawned { meteor_id: u32, x: f32 },
    /// A laser destroyed a meteor
    MeteorDestroyed { meteor_id: u32, projectile_id: u32 },
    /// The run ended with this score
    GameOver { score: u64 },
}

/// A laser shot travelling up the field
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub body: Body,
}

impl Projectile {
    pub fn new(id: u32, x: f32, y: f32, spec: &EntitySpec) -> Self {
        Self {
            id,
            body: Body::new(Vec2::new(x, y), spec),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    pub fn advance(&mut self) {
        self.body.step(Direction::Up);
    }

    /// Fully past the top edge
    pub fn is_overflowed(&self) -> bool {
        self.bounds().bottom() <= 0.0
    }
}

/// A meteor falling toward the bottom of the field
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    pub id: u32,
    pub body: Body,
}

impl Meteor {
    pub fn new(id: u32, x: f32, y: f32, spec: &EntitySpec) -> Self {
        Self {
            id,
            body: Body::new(Vec2::new(x, y), spec),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    pub fn advance(&mut self) {
        self.body.step(Direction::Down);
    }

    /// Fully past the bottom edge
    pub fn is_overflowed(&self, field_height: f32) -> bool {
        self.body.pos.y >= field_height
    }

    /// Bottom edge touching or past the bottom of the field
    pub fn has_landed(&self, field_height: f32) -> bool {
        self.bounds().bottom() >= field_height
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated configuration for this run
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Player ship (owns the live lasers)
    pub ship: Ship,
    /// Live meteors, oldest first
    pub meteors: Vec<Meteor>,
    /// Meteors destroyed so far
    pub score: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated time (ms)
    pub clock_ms: f64,
    /// Meteor spawn timer and RNG
    pub spawner: MeteorSpawner,
}

impl GameState {
    /// Create a new game state; `config` must already be validated
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            ship: Ship::new(&config),
            spawner: MeteorSpawner::new(&config, seed),
            meteors: Vec::new(),
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            clock_ms: 0.0,
            seed,
            config,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
