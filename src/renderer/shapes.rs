//! Shape generation for sprite stand-ins
//!
//! Everything is emitted as a triangle list in field coordinates; the
//! pipeline maps to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::Rect;

/// Two triangles covering the rectangle
pub fn quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Arrowhead hull pointing up, with a cockpit, filling the ship's box
pub fn ship(rect: &Rect) -> Vec<Vertex> {
    let nose = Vec2::new(rect.center_x(), rect.y);
    let left = Vec2::new(rect.x, rect.bottom());
    let right = Vec2::new(rect.right(), rect.bottom());
    let tail = Vec2::new(rect.center_x(), rect.bottom() - rect.height * 0.25);

    let mut vertices = vec![
        Vertex::new(nose.x, nose.y, colors::SHIP_HULL),
        Vertex::new(left.x, left.y, colors::SHIP_HULL),
        Vertex::new(tail.x, tail.y, colors::SHIP_HULL),
        Vertex::new(nose.x, nose.y, colors::SHIP_HULL),
        Vertex::new(tail.x, tail.y, colors::SHIP_HULL),
        Vertex::new(right.x, right.y, colors::SHIP_HULL),
    ];
    let cockpit = Vec2::new(rect.center_x(), rect.y + rect.height * 0.45);
    vertices.extend(circle(cockpit, rect.width * 0.08, colors::SHIP_COCKPIT, 12));
    vertices
}

/// Round rock with a lighter core, inscribed in the meteor's box
pub fn meteor(rect: &Rect) -> Vec<Vertex> {
    let center = Vec2::new(rect.center_x(), rect.y + rect.height / 2.0);
    let radius = rect.width.min(rect.height) / 2.0;
    let mut vertices = circle(center, radius, colors::METEOR, 16);
    vertices.extend(circle(center, radius * 0.55, colors::METEOR_CORE, 10));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_rect() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let verts = quad(&rect, colors::LASER);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_meteor_stays_inside_box() {
        let rect = Rect::new(100.0, 100.0, 60.0, 60.0);
        for v in meteor(&rect) {
            assert!(v.position[0] >= rect.x - 0.01 && v.position[0] <= rect.right() + 0.01);
            assert!(v.position[1] >= rect.y - 0.01 && v.position[1] <= rect.bottom() + 0.01);
        }
    }

    #[test]
    fn test_ship_is_triangle_list() {
        let verts = ship(&Rect::new(0.0, 0.0, 120.0, 120.0));
        assert_eq!(verts.len() % 3, 0);
    }
}
