//! Shared positional model for the ship, lasers and meteors
//!
//! Every entity is an axis-aligned box that only ever moves along one axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Direction of a single motion step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// -1 toward the origin, +1 away from it (y grows downward)
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up | Direction::Left => -1.0,
            Direction::Down | Direction::Right => 1.0,
        }
    }

    #[inline]
    fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Axis-aligned rectangle, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Size and speed of one kind of entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub width: f32,
    pub height: f32,
    /// Distance covered per motion step
    pub speed: f32,
}

impl EntitySpec {
    pub const fn new(width: f32, height: f32, speed: f32) -> Self {
        Self {
            width,
            height,
            speed,
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.width, self.height, self.speed]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Position plus fixed size and speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Body {
    pub fn new(pos: Vec2, spec: &EntitySpec) -> Self {
        Self {
            pos,
            size: Vec2::new(spec.width, spec.height),
            speed: spec.speed,
        }
    }

    /// Bounding box at the current position
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Move one step of `speed` along the direction's axis
    pub fn step(&mut self, dir: Direction) {
        let delta = dir.sign() * self.speed;
        if dir.is_horizontal() {
            self.pos.x += delta;
        } else {
            self.pos.y += delta;
        }
    }
}
