//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SHIP_HULL: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const SHIP_COCKPIT: [f32; 4] = [0.6, 1.0, 0.9, 1.0];
    pub const LASER: [f32; 4] = [1.0, 0.2, 0.3, 1.0];
    pub const METEOR: [f32; 4] = [0.55, 0.4, 0.3, 1.0];
    pub const METEOR_CORE: [f32; 4] = [0.75, 0.5, 0.25, 1.0];
    pub const BACKGROUND: wgpu::Color = wgpu::Color {
        r: 0.02,
        g: 0.02,
        b: 0.05,
        a: 1.0,
    };
}
