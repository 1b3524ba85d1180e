//! Canvas that collects triangles for one GPU submission

use super::Canvas;
use super::glyphs::{self, GLYPH_ADVANCE, GLYPH_ROWS};
use super::shapes::{self, CIRCLE_SEGMENTS};
use super::vertex::Vertex;
use crate::consts::colors::Rgba;

/// Vertices for the current frame, in field units
#[derive(Debug, Default)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl Canvas for VertexBatch {
    // The render pass clears the target; dropping last frame's geometry is enough
    fn clear(&mut self, _width: f32, _height: f32) {
        self.vertices.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        shapes::rect(&mut self.vertices, x, y, width, height, color);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        shapes::circle(&mut self.vertices, x, y, radius, color, CIRCLE_SEGMENTS);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size_px: f32, color: Rgba) {
        // A glyph is 7 font pixels tall with one pixel of leading
        let scale = size_px / (GLYPH_ROWS + 1) as f32;
        let top = y - GLYPH_ROWS as f32 * scale;

        for (i, c) in text.chars().enumerate() {
            let Some(glyph) = glyphs::glyph(c) else {
                continue;
            };
            let left = x + (i as u32 * GLYPH_ADVANCE) as f32 * scale;
            for (column, row) in glyphs::lit_cells(&glyph) {
                shapes::rect(
                    &mut self.vertices,
                    left + column as f32 * scale,
                    top + row as f32 * scale,
                    scale,
                    scale,
                    color,
                );
            }
        }
    }
}
