//! Rendering
//!
//! The game draws through the [`Surface`] trait once per tick. The browser
//! build backs it with the WebGPU [`QuadRenderer`] plus a DOM score readout;
//! headless runs and tests use [`RecordingSurface`].

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::QuadRenderer;

use crate::sim::{GameState, Rect};
use vertex::{Vertex, colors};

/// What to draw in a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    Laser,
    Meteor,
}

impl Sprite {
    /// Triangles standing in for the sprite image, filling `rect`
    pub fn vertices(self, rect: &Rect) -> Vec<Vertex> {
        match self {
            Sprite::Ship => shapes::ship(rect),
            Sprite::Laser => shapes::quad(rect, colors::LASER).to_vec(),
            Sprite::Meteor => shapes::meteor(rect),
        }
    }
}

/// A drawable target
pub trait Surface {
    /// Wipe the field
    fn clear(&mut self, width: f32, height: f32);
    /// Draw a sprite stretched over `rect`
    fn blit(&mut self, sprite: Sprite, rect: Rect);
    /// Show the current score
    fn draw_score(&mut self, score: u64);
    /// Frame complete
    fn present(&mut self) {}
}

/// Draw one frame: clear, score, ship, lasers, meteors
pub fn render_frame<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.clear(state.config.field_width, state.config.field_height);
    surface.draw_score(state.score);
    surface.blit(Sprite::Ship, state.ship.bounds());
    for projectile in &state.ship.projectiles {
        surface.blit(Sprite::Laser, projectile.bounds());
    }
    for meteor in &state.meteors {
        surface.blit(Sprite::Meteor, meteor.bounds());
    }
    surface.present();
}

/// A single draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Clear { width: f32, height: f32 },
    Blit { sprite: Sprite, rect: Rect },
    Score(u64),
}

/// Keeps the draw calls of the last frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Calls since the last clear
    pub calls: Vec<DrawCall>,
    /// Frames presented so far
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangles blitted for one sprite kind in the last frame
    pub fn blits(&self, sprite: Sprite) -> impl Iterator<Item = &Rect> + '_ {
        self.calls.iter().filter_map(move |call| match call {
            DrawCall::Blit { sprite: s, rect } if *s == sprite => Some(rect),
            _ => None,
        })
    }

    /// Score shown in the last frame
    pub fn score(&self) -> Option<u64> {
        self.calls.iter().find_map(|call| match call {
            DrawCall::Score(score) => Some(*score),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear { width, height });
    }

    fn blit(&mut self, sprite: Sprite, rect: Rect) {
        self.calls.push(DrawCall::Blit { sprite, rect });
    }

    fn draw_score(&mut self, score: u64) {
        self.calls.push(DrawCall::Score(score));
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}
