//! Field geometry and tuning
//!
//! Read-only input: loaded once (defaults, or JSON on native) and never written back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Upper bound on `brick_rows * brick_columns`
pub const MAX_BRICKS: u32 = 4096;

/// Every constant the simulation and renderer depend on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Brick grid ===
    pub brick_rows: u32,
    pub brick_columns: u32,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_offset_left: f32,

    // === Field ===
    /// Explicit width; derived from the brick grid when absent
    pub field_width: Option<f32>,
    pub field_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_bottom_margin: f32,
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_start_velocity: Vec2,
    pub ball_start_lift: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            brick_rows: BRICK_ROWS,
            brick_columns: BRICK_COLUMNS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_offset_top: BRICK_OFFSET_TOP,
            brick_offset_left: BRICK_OFFSET_LEFT,

            field_width: None,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_start_velocity: Vec2::new(BALL_START_DX, BALL_START_DY),
            ball_start_lift: BALL_START_LIFT,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Field width: the override if set, else margin + grid + margin
    pub fn field_width(&self) -> f32 {
        self.field_width.unwrap_or_else(|| {
            let grid = self.brick_columns as f32 * (self.brick_width + self.brick_padding)
                - self.brick_padding;
            self.brick_offset_left + grid + self.brick_offset_left
        })
    }

    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.field_width(), self.field_height)
    }

    /// Saturates for grids `validate` would reject
    pub fn brick_count(&self) -> u32 {
        self.brick_rows.saturating_mul(self.brick_columns)
    }

    /// Top of the paddle, which never moves vertically
    pub fn paddle_top(&self) -> f32 {
        self.field_height - self.paddle_height - self.paddle_bottom_margin
    }

    /// Bottom edge of the lowest brick row
    pub fn grid_bottom(&self) -> f32 {
        self.brick_offset_top + self.brick_rows as f32 * (self.brick_height + self.brick_padding)
            - self.brick_padding
    }

    /// Reject geometry the simulation cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.brick_rows == 0 || self.brick_columns == 0 {
            return invalid("brick grid needs at least one row and one column");
        }
        match self.brick_rows.checked_mul(self.brick_columns) {
            Some(count) if count <= MAX_BRICKS => {}
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "brick grid of {}x{} exceeds {MAX_BRICKS} bricks",
                    self.brick_columns, self.brick_rows
                )));
            }
        }
        let positive = [
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("field_height", self.field_height),
            ("field_width", self.field_width()),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.brick_padding < 0.0 || self.paddle_bottom_margin < 0.0 {
            return invalid("padding and margins must not be negative");
        }
        if self.paddle_width > self.field_width() {
            return invalid("paddle is wider than the field");
        }
        if self.ball_radius * 2.0 > self.field_width().min(self.field_height) {
            return invalid("ball does not fit in the field");
        }
        if !self.ball_start_velocity.is_finite() {
            return invalid("ball_start_velocity must be finite");
        }

        // Every column must start inside the field or the grid cannot be cleared
        let last_column_x = self.brick_offset_left
            + (self.brick_columns - 1) as f32 * (self.brick_width + self.brick_padding);
        if self.brick_offset_left < 0.0 || last_column_x >= self.field_width() {
            return invalid("brick grid extends past the right edge of the field");
        }
        if self.brick_offset_top < 0.0 || self.grid_bottom() > self.paddle_top() {
            return invalid("brick grid reaches the paddle");
        }

        // The ball is served fully inside the field and clear of the paddle
        let serve_y = self.field_height - self.ball_start_lift;
        if serve_y - self.ball_radius < 0.0 {
            return invalid("ball_start_lift puts the ball above the field");
        }
        if serve_y + self.ball_radius > self.paddle_top() {
            return invalid("ball_start_lift must keep the ball above the paddle");
        }
        Ok(())
    }
}
