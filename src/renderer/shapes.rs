//! Triangle generation for 2D primitives

use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::consts::colors::Rgba;

/// Segments used for the ball outline
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Append a filled axis-aligned rectangle (two triangles)
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
    let (x2, y2) = (x + width, y + height);

    out.push(Vertex::new(x, y, color));
    out.push(Vertex::new(x2, y, color));
    out.push(Vertex::new(x, y2, color));

    out.push(Vertex::new(x, y2, color));
    out.push(Vertex::new(x2, y, color));
    out.push(Vertex::new(x2, y2, color));
}

/// Append a filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, cx: f32, cy: f32, radius: f32, color: Rgba, segments: u32) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(cx, cy, color));
        out.push(Vertex::new(
            cx + radius * theta1.cos(),
            cy + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            cx + radius * theta2.cos(),
            cy + radius * theta2.sin(),
            color,
        ));
    }
}
