//! Collision tests for a round ball against walls and axis-aligned rectangles
//!
//! Paddle and brick hits treat the ball as its bounding square, with strict
//! inequalities: touching edges do not count as overlap.

use glam::Vec2;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test between two rectangles
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}

/// Bounding square of a ball
#[inline]
pub fn ball_bounds(center: Vec2, radius: f32) -> Rect {
    Rect {
        pos: center - Vec2::splat(radius),
        size: Vec2::splat(radius * 2.0),
    }
}

/// Check a ball's bounding square against a rectangle
#[inline]
pub fn ball_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    ball_bounds(center, radius).overlaps(rect)
}

/// Side wall contact: returns the corrected x if the ball crossed either wall
pub fn side_wall_contact(center: Vec2, radius: f32, field_width: f32) -> Option<f32> {
    if center.x + radius > field_width {
        Some(field_width - radius)
    } else if center.x - radius < 0.0 {
        Some(radius)
    } else {
        None
    }
}

/// Top wall contact: returns the corrected y if the ball crossed the top edge
pub fn top_wall_contact(center: Vec2, radius: f32) -> Option<f32> {
    (center.y - radius < 0.0).then_some(radius)
}

/// True once the ball's lowest point is past the bottom edge
pub fn below_field(center: Vec2, radius: f32, field_height: f32) -> bool {
    center.y + radius > field_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_rect_overlap() {
        let brick = Rect::new(30.0, 30.0, 75.0, 20.0);

        assert!(ball_rect_overlap(Vec2::new(62.0, 48.0), 10.0, &brick));
        // Bounding square clips the corner even though the circle would not
        assert!(ball_rect_overlap(Vec2::new(22.0, 22.0), 10.0, &brick));
        assert!(!ball_rect_overlap(Vec2::new(62.0, 100.0), 10.0, &brick));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let brick = Rect::new(30.0, 30.0, 75.0, 20.0);
        // Ball top exactly on brick bottom
        assert!(!ball_rect_overlap(Vec2::new(62.0, 60.0), 10.0, &brick));
        // Ball right exactly on brick left
        assert!(!ball_rect_overlap(Vec2::new(20.0, 40.0), 10.0, &brick));
    }

    #[test]
    fn test_side_walls() {
        assert_eq!(side_wall_contact(Vec2::new(635.0, 100.0), 10.0, 640.0), Some(630.0));
        assert_eq!(side_wall_contact(Vec2::new(4.0, 100.0), 10.0, 640.0), Some(10.0));
        assert_eq!(side_wall_contact(Vec2::new(630.0, 100.0), 10.0, 640.0), None);
        assert_eq!(side_wall_contact(Vec2::new(10.0, 100.0), 10.0, 640.0), None);
    }

    #[test]
    fn test_top_and_bottom() {
        assert_eq!(top_wall_contact(Vec2::new(50.0, 8.0), 10.0), Some(10.0));
        assert_eq!(top_wall_contact(Vec2::new(50.0, 10.0), 10.0), None);

        assert!(below_field(Vec2::new(50.0, 471.0), 10.0, 480.0));
        assert!(!below_field(Vec2::new(50.0, 470.0), 10.0, 480.0));
    }
}
