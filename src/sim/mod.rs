//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! one `tick` per frame, driven by whatever scheduler the host provides.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, ball_bounds, ball_rect_overlap};
pub use state::{
    Ball, Brick, BrickGrid, BrickStatus, GamePhase, GameState, Paddle, PhaseTrigger,
};
pub use tick::{TickOutcome, tick};
