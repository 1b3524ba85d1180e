//! Per-tick simulation
//!
//! One call advances the session by one frame: input, integration, then
//! collision resolution in a fixed order (side walls, top wall, paddle,
//! bottom edge, bricks). Velocities are in field units per tick.

use super::collision::{ball_rect_overlap, below_field, side_wall_contact, top_wall_contact};
use super::state::{BrickGrid, BrickStatus, GamePhase, GameState, PhaseTrigger};
use crate::input::InputState;

/// What the caller must do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep running: draw this tick and schedule the next
    Continue,
    /// Session reached Won or Lost; `score` is the final score
    Ended { phase: GamePhase, score: u32 },
}

/// Advance the game state by one tick
///
/// Once the phase is terminal the state is left untouched and the same
/// `Ended` outcome is returned until the state is reset.
pub fn tick(state: &mut GameState, input: &InputState) -> TickOutcome {
    if state.phase.is_terminal() {
        return ended(state);
    }

    state.time_ticks += 1;

    apply_input(state, input);

    // Integration
    state.ball.pos += state.ball.vel;

    resolve_walls(state);

    let paddle_hit = resolve_paddle(state);
    if !paddle_hit && below_field(state.ball.pos, state.ball.radius, state.field.y) {
        state.phase = state.phase.next(PhaseTrigger::BallLost);
        log::info!("Ball lost at tick {}, score {}", state.time_ticks, state.score);
        return ended(state);
    }

    if resolve_bricks(state) && state.remaining_bricks == 0 {
        state.phase = state.phase.next(PhaseTrigger::AllBricksCleared);
        log::info!("All bricks cleared at tick {}, score {}", state.time_ticks, state.score);
        return ended(state);
    }

    TickOutcome::Continue
}

fn ended(state: &GameState) -> TickOutcome {
    TickOutcome::Ended {
        phase: state.phase,
        score: state.score,
    }
}

/// Move the paddle one step; right is checked first, so holding both moves right
fn apply_input(state: &mut GameState, input: &InputState) {
    let speed = state.config.paddle_speed;
    let paddle = &mut state.paddle;
    let max_x = paddle.max_x(state.field.x);

    if input.move_right && paddle.pos.x < max_x {
        paddle.pos.x = (paddle.pos.x + speed).min(max_x);
    } else if input.move_left && paddle.pos.x > 0.0 {
        paddle.pos.x = (paddle.pos.x - speed).max(0.0);
    }
}

/// Side and top walls: reflect and pin the ball to the wall it crossed
fn resolve_walls(state: &mut GameState) {
    let ball = &mut state.ball;

    if let Some(x) = side_wall_contact(ball.pos, ball.radius, state.field.x) {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = x;
    }

    if let Some(y) = top_wall_contact(ball.pos, ball.radius) {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = y;
    }
}

/// Flat bounce off the paddle top; only a descending ball can hit it
fn resolve_paddle(state: &mut GameState) -> bool {
    let ball = &mut state.ball;
    if ball.vel.y <= 0.0 || !ball_rect_overlap(ball.pos, ball.radius, &state.paddle.rect()) {
        return false;
    }

    ball.vel.y = -ball.vel.y;
    // Sit the ball on the paddle so the overlap cannot retrigger next tick
    ball.pos.y = state.paddle.pos.y - ball.radius;
    log::debug!("Paddle bounce at x={:.1}", ball.pos.x);
    true
}

/// Destroy the first overlapping active brick, columns outer, rows inner
///
/// At most one brick per tick. A fast ball overlapping two bricks at once
/// only breaks the first in scan order.
fn resolve_bricks(state: &mut GameState) -> bool {
    let ball = &state.ball;
    let hit = state
        .bricks
        .iter_active()
        .find(|(column, row, _)| {
            let rect = BrickGrid::brick_rect(&state.config, *column, *row);
            ball_rect_overlap(ball.pos, ball.radius, &rect)
        })
        .map(|(column, row, _)| (column, row));

    let Some((column, row)) = hit else {
        return false;
    };

    if let Some(brick) = state.bricks.get_mut(column, row) {
        brick.status = BrickStatus::Destroyed;
    }
    state.ball.vel.y = -state.ball.vel.y;
    state.score += 1;
    state.remaining_bricks = state.remaining_bricks.saturating_sub(1);

    log::debug!(
        "Brick ({}, {}) destroyed, {} remaining",
        column,
        row,
        state.remaining_bricks
    );
    true
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::GameConfig;
    use glam::Vec2;
    use proptest::prelude::*;

    fn input_strategy() -> impl Strategy<Value = InputState> {
        (any::<bool>(), any::<bool>()).prop_map(|(move_left, move_right)| InputState {
            move_left,
            move_right,
        })
    }

    proptest! {
        #[test]
        fn paddle_stays_in_field(inputs in prop::collection::vec(input_strategy(), 1..300)) {
            let mut state = GameState::new(GameConfig::default());
            let max_x = state.field.x - state.paddle.width;
            for input in &inputs {
                if tick(&mut state, input) != TickOutcome::Continue {
                    state.reset();
                }
                prop_assert!(state.paddle.pos.x >= 0.0);
                prop_assert!(state.paddle.pos.x <= max_x);
            }
        }

        #[test]
        fn ball_stays_between_side_walls(
            x in 10.0f32..720.0,
            y in 200.0f32..400.0,
            dx in -9.0f32..9.0,
            dy in -9.0f32..9.0,
            inputs in prop::collection::vec(input_strategy(), 1..300),
        ) {
            let mut state = GameState::new(GameConfig::default());
            state.ball.pos = Vec2::new(x, y);
            state.ball.vel = Vec2::new(dx, dy);
            let radius = state.ball.radius;
            for input in &inputs {
                let outcome = tick(&mut state, input);
                prop_assert!(state.ball.pos.x >= radius);
                prop_assert!(state.ball.pos.x <= state.field.x - radius);
                prop_assert!(state.ball.pos.y >= radius);
                if outcome != TickOutcome::Continue {
                    break;
                }
            }
        }

        #[test]
        fn brick_destruction_is_monotonic(
            x in 10.0f32..720.0,
            dx in -6.0f32..6.0,
            inputs in prop::collection::vec(input_strategy(), 1..600),
        ) {
            let mut state = GameState::new(GameConfig::default());
            state.ball.pos = Vec2::new(x, 250.0);
            state.ball.vel = Vec2::new(dx, -4.0);
            let mut destroyed: Vec<(u32, u32)> = Vec::new();

            for input in &inputs {
                let before = state.remaining_bricks;
                let outcome = tick(&mut state, input);

                for (column, row) in &destroyed {
                    prop_assert!(!state.bricks.get(*column, *row).unwrap().is_active());
                }
                let newly: Vec<(u32, u32)> = state
                    .bricks
                    .iter()
                    .filter(|(c, r, b)| !b.is_active() && !destroyed.contains(&(*c, *r)))
                    .map(|(c, r, _)| (c, r))
                    .collect();
                prop_assert!(newly.len() <= 1);
                prop_assert_eq!(before - state.remaining_bricks, newly.len() as u32);
                prop_assert_eq!(state.remaining_bricks, state.bricks.active_count());
                prop_assert_eq!(state.score + state.remaining_bricks, 40);
                destroyed.extend(newly);

                if outcome != TickOutcome::Continue {
                    break;
                }
            }
        }
    }
}
