//! Game state and core simulation types
//!
//! One owned aggregate per session. Resetting rebuilds it from the config.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::GameConfig;
use crate::consts::colors::{self, Rgba};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// Every brick destroyed
    Won,
    /// Ball dropped past the paddle
    Lost,
}

/// Inputs to the phase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTrigger {
    AllBricksCleared,
    BallLost,
    Reset,
}

impl GamePhase {
    /// The single transition function for session phases
    ///
    /// Won and Lost only leave through `Reset`.
    pub fn next(self, trigger: PhaseTrigger) -> GamePhase {
        match (self, trigger) {
            (_, PhaseTrigger::Reset) => GamePhase::Running,
            (GamePhase::Running, PhaseTrigger::AllBricksCleared) => GamePhase::Won,
            (GamePhase::Running, PhaseTrigger::BallLost) => GamePhase::Lost,
            (terminal, _) => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Centre
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

impl Ball {
    /// Ball at its serve position: horizontally centred, just above the paddle
    pub fn serve(config: &GameConfig) -> Self {
        let field = config.field_size();
        Self {
            pos: Vec2::new(field.x / 2.0, field.y - config.ball_start_lift),
            vel: config.ball_start_velocity,
            radius: config.ball_radius,
            color: colors::BALL,
        }
    }
}

/// The player's paddle; only `pos.x` changes during play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Rgba,
}

impl Paddle {
    /// Paddle centred at the bottom of the field
    pub fn centered(config: &GameConfig) -> Self {
        let field = config.field_size();
        Self {
            pos: Vec2::new(
                (field.x - config.paddle_width) / 2.0,
                field.y - config.paddle_height - config.paddle_bottom_margin,
            ),
            width: config.paddle_width,
            height: config.paddle_height,
            color: colors::PADDLE,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::new(self.width, self.height),
        }
    }

    /// Largest x that keeps the paddle inside the field
    #[inline]
    pub fn max_x(&self, field_width: f32) -> f32 {
        field_width - self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    /// Terminal: a destroyed brick never comes back within a session
    Destroyed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub status: BrickStatus,
    pub color: Rgba,
}

impl Brick {
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }
}

/// Fixed columns x rows grid, stored column-major
///
/// Positions are not stored; they are computed from the grid indices and the
/// config whenever collision or drawing needs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: u32,
    rows: u32,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// A full grid, every brick active
    pub fn new(columns: u32, rows: u32) -> Self {
        let bricks = (0..columns.saturating_mul(rows))
            .map(|_| Brick {
                status: BrickStatus::Active,
                color: colors::BRICK,
            })
            .collect();
        Self {
            columns,
            rows,
            bricks,
        }
    }

    fn index(&self, column: u32, row: u32) -> Option<usize> {
        (column < self.columns && row < self.rows).then(|| (column * self.rows + row) as usize)
    }

    pub fn get(&self, column: u32, row: u32) -> Option<&Brick> {
        self.index(column, row).map(|i| &self.bricks[i])
    }

    pub fn get_mut(&mut self, column: u32, row: u32) -> Option<&mut Brick> {
        self.index(column, row).map(|i| &mut self.bricks[i])
    }

    /// All bricks with their grid indices, columns outer, rows inner
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &Brick)> {
        let rows = self.rows;
        self.bricks
            .iter()
            .enumerate()
            .map(move |(i, brick)| (i as u32 / rows, i as u32 % rows, brick))
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (u32, u32, &Brick)> {
        self.iter().filter(|(_, _, brick)| brick.is_active())
    }

    pub fn active_count(&self) -> u32 {
        self.bricks.iter().filter(|b| b.is_active()).count() as u32
    }

    /// Rectangle of the brick at (column, row)
    pub fn brick_rect(config: &GameConfig, column: u32, row: u32) -> Rect {
        Rect::new(
            column as f32 * (config.brick_width + config.brick_padding) + config.brick_offset_left,
            row as f32 * (config.brick_height + config.brick_padding) + config.brick_offset_top,
            config.brick_width,
            config.brick_height,
        )
    }
}

/// Complete state of one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Field width and height
    pub field: Vec2,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    /// Bricks destroyed this session
    pub score: u32,
    /// Active bricks left; zero means the session is won
    pub remaining_bricks: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh session from a config
    pub fn new(config: GameConfig) -> Self {
        let bricks = BrickGrid::new(config.brick_columns, config.brick_rows);
        Self {
            field: config.field_size(),
            ball: Ball::serve(&config),
            paddle: Paddle::centered(&config),
            remaining_bricks: config.brick_count(),
            bricks,
            score: 0,
            phase: GamePhase::Running,
            time_ticks: 0,
            config,
        }
    }

    /// Rebuild everything back to the canonical start
    pub fn reset(&mut self) {
        let phase = self.phase.next(PhaseTrigger::Reset);
        let config = std::mem::take(&mut self.config);
        *self = Self::new(config);
        self.phase = phase;
    }

    pub fn brick_rect(&self, column: u32, row: u32) -> Rect {
        BrickGrid::brick_rect(&self.config, column, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::new(GameConfig::default());
        assert_eq!(state.field, Vec2::new(730.0, 480.0));
        assert_eq!(state.ball.pos, Vec2::new(365.0, 450.0));
        assert_eq!(state.ball.vel, Vec2::new(2.0, -2.0));
        assert_eq!(state.paddle.pos, Vec2::new(315.0, 465.0));
        assert_eq!(state.score, 0);
        assert_eq!(state.remaining_bricks, 40);
        assert_eq!(state.bricks.active_count(), 40);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_grid_order_is_column_major() {
        let grid = BrickGrid::new(3, 2);
        let order: Vec<(u32, u32)> = grid.iter().map(|(c, r, _)| (c, r)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 2).is_none());
    }

    #[test]
    fn test_brick_rect_from_indices() {
        let config = GameConfig::default();
        assert_eq!(BrickGrid::brick_rect(&config, 0, 0), Rect::new(30.0, 30.0, 75.0, 20.0));
        assert_eq!(BrickGrid::brick_rect(&config, 2, 3), Rect::new(200.0, 120.0, 75.0, 20.0));
        // Last column ends one margin short of the derived field width
        let last = BrickGrid::brick_rect(&config, 7, 0);
        assert_eq!(last.right() + config.brick_offset_left, config.field_width());
    }

    #[test]
    fn test_phase_transitions() {
        use GamePhase::*;
        use PhaseTrigger::*;

        assert_eq!(Running.next(AllBricksCleared), Won);
        assert_eq!(Running.next(BallLost), Lost);
        assert_eq!(Won.next(BallLost), Won);
        assert_eq!(Lost.next(AllBricksCleared), Lost);
        assert_eq!(Won.next(Reset), Running);
        assert_eq!(Lost.next(Reset), Running);
        assert!(Won.is_terminal() && Lost.is_terminal() && !Running.is_terminal());
    }

    #[test]
    fn test_reset_restores_start() {
        let config = GameConfig::default();
        let mut state = GameState::new(config.clone());
        state.ball.pos = Vec2::new(12.0, 300.0);
        state.paddle.pos.x = 0.0;
        state.score = 7;
        state.remaining_bricks = 33;
        if let Some(brick) = state.bricks.get_mut(1, 1) {
            brick.status = BrickStatus::Destroyed;
        }
        state.phase = GamePhase::Lost;

        state.reset();

        let fresh = GameState::new(config);
        assert_eq!(state.ball.pos, fresh.ball.pos);
        assert_eq!(state.paddle.pos, fresh.paddle.pos);
        assert_eq!(state.score, 0);
        assert_eq!(state.remaining_bricks, 40);
        assert_eq!(state.bricks.active_count(), 40);
        assert_eq!(state.phase, GamePhase::Running);
    }
}
