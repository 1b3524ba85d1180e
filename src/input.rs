//! Held-direction input
//!
//! The host owns the live flags (toggled by key events) and hands the
//! simulation a copy once per tick.

use crate::sim::GameState;

/// Horizontal paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value to a direction
    ///
    /// Accepts both the legacy (`Left`) and standard (`ArrowLeft`) names.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "d" | "D" | "Right" | "ArrowRight" => Some(Direction::Right),
            "a" | "A" | "Left" | "ArrowLeft" => Some(Direction::Left),
            _ => None,
        }
    }
}

/// Snapshot of the two movement flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
}

impl InputState {
    pub fn press(&mut self, direction: Direction) {
        self.set(direction, true);
    }

    pub fn release(&mut self, direction: Direction) {
        self.set(direction, false);
    }

    fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.move_left = held,
            Direction::Right => self.move_right = held,
        }
    }

    /// Apply a key-down event; returns false if the key is unbound
    pub fn key_down(&mut self, key: &str) -> bool {
        match Direction::from_key_name(key) {
            Some(direction) => {
                self.press(direction);
                true
            }
            None => false,
        }
    }

    /// Apply a key-up event; returns false if the key is unbound
    pub fn key_up(&mut self, key: &str) -> bool {
        match Direction::from_key_name(key) {
            Some(direction) => {
                self.release(direction);
                true
            }
            None => false,
        }
    }
}

/// Demo driver: hold the direction that brings the paddle centre under the ball
pub fn autopilot(state: &GameState) -> InputState {
    let paddle_center = state.paddle.pos.x + state.paddle.width / 2.0;
    let offset = state.ball.pos.x - paddle_center;
    // Dead zone stops the paddle from jittering around the ball
    let dead_zone = state.config.paddle_speed / 2.0;

    InputState {
        move_left: offset < -dead_zone,
        move_right: offset > dead_zone,
    }
}
