//! Rendering
//!
//! The scene is expressed as 2D canvas-style draw calls against [`Canvas`].
//! [`DrawList`] records them; [`VertexBatch`] turns them into triangles for
//! the WebGPU pipeline.

pub mod batch;
pub mod draw_list;
pub mod glyphs;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use batch::VertexBatch;
pub use draw_list::{DrawCommand, DrawList};
pub use pipeline::RenderState;

use crate::consts::colors::{Rgba, SCORE_TEXT};
use crate::consts::{SCORE_FONT_PX, SCORE_TEXT_X, SCORE_TEXT_Y};
use crate::sim::GameState;

/// A 2D drawing surface in field units (origin top-left, y down)
pub trait Canvas {
    /// Clear the whole surface
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);
    /// Text with its baseline at `y`
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size_px: f32, color: Rgba);
}

/// Draw one frame: bricks, paddle, ball, score
///
/// Reads the state only.
pub fn draw_scene(state: &GameState, canvas: &mut dyn Canvas) {
    canvas.clear(state.field.x, state.field.y);

    for (column, row, brick) in state.bricks.iter_active() {
        let rect = state.brick_rect(column, row);
        canvas.fill_rect(rect.pos.x, rect.pos.y, rect.size.x, rect.size.y, brick.color);
    }

    let paddle = &state.paddle;
    canvas.fill_rect(
        paddle.pos.x,
        paddle.pos.y,
        paddle.width,
        paddle.height,
        paddle.color,
    );

    let ball = &state.ball;
    canvas.fill_circle(ball.pos.x, ball.pos.y, ball.radius, ball.color);

    canvas.fill_text(
        &score_text(state.score),
        SCORE_TEXT_X,
        SCORE_TEXT_Y,
        SCORE_FONT_PX,
        SCORE_TEXT,
    );
}

pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::sim::BrickStatus;

    #[test]
    fn test_draw_order_and_contents() {
        let mut state = GameState::new(GameConfig::default());
        state.score = 3;
        if let Some(brick) = state.bricks.get_mut(0, 0) {
            brick.status = BrickStatus::Destroyed;
        }

        let mut list = DrawList::default();
        draw_scene(&state, &mut list);
        let commands = list.commands();

        assert_eq!(
            commands.first(),
            Some(&DrawCommand::Clear {
                width: 730.0,
                height: 480.0
            })
        );
        // 39 bricks + paddle rects
        let rects = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count();
        assert_eq!(rects, 40);
        // Destroyed brick at (30, 30) is skipped
        assert!(!commands.iter().any(|c| matches!(
            c,
            DrawCommand::Rect { x, y, .. } if *x == 30.0 && *y == 30.0
        )));
        assert!(matches!(
            commands[commands.len() - 2],
            DrawCommand::Circle { x, y, radius, .. } if x == 365.0 && y == 450.0 && radius == 10.0
        ));
        assert_eq!(
            commands.last(),
            Some(&DrawCommand::Text {
                text: "Score: 3".to_string(),
                x: 8.0,
                y: 20.0,
                size_px: 16.0,
                color: SCORE_TEXT,
            })
        );
    }
}
