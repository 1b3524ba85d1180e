//! Brick Breaker - a single-screen paddle and brick-grid arcade game
//!
//! Core modules:
//! - `sim`: Per-tick simulation (input, integration, collisions, game state)
//! - `game_loop`: Session lifecycle driven by a host frame scheduler
//! - `renderer`: 2D draw calls, recorded or batched into WebGPU triangles
//! - `platform`: Host abstraction (frames, input, drawing surface)
//! - `config`: Data-driven field geometry and tuning
//! - `gate`: Password gate in front of the game view

pub mod config;
pub mod error;
pub mod game_loop;
pub mod gate;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, SetupError};
pub use game_loop::{GameLoop, SessionOutcome, SessionReport};

/// Default game constants (field units, per-tick velocities)
pub mod consts {
    /// Brick grid
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_COLUMNS: u32 = 8;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;

    /// Playfield height; the width is derived from the brick grid
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Gap between the paddle and the bottom edge
    pub const PADDLE_BOTTOM_MARGIN: f32 = 5.0;
    /// Units per tick while a direction is held
    pub const PADDLE_SPEED: f32 = 7.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_DX: f32 = 2.0;
    pub const BALL_START_DY: f32 = -2.0;
    /// Ball spawns this far above the bottom edge
    pub const BALL_START_LIFT: f32 = 30.0;

    /// Score text
    pub const SCORE_TEXT_X: f32 = 8.0;
    pub const SCORE_TEXT_Y: f32 = 20.0;
    pub const SCORE_FONT_PX: f32 = 16.0;

    /// RGBA colours, 0-1 per channel
    pub mod colors {
        pub type Rgba = [f32; 4];

        pub const BALL: Rgba = [1.0, 0.5, 0.31, 1.0]; // coral
        pub const BRICK: Rgba = [1.0, 1.0, 1.0, 1.0];
        pub const PADDLE: Rgba = [0.0, 0.584, 0.867, 1.0]; // #0095DD
        pub const SCORE_TEXT: Rgba = PADDLE;
        pub const BACKGROUND: Rgba = [0.0, 0.0, 0.0, 1.0];
    }
}
