//! Per-frame simulation step
//!
//! Advances the game by one variable-length frame. The sub-steps run in a
//! fixed order and later ones see what earlier ones changed in the same frame.

use super::collision::{paddle_catches, touches_floor, wall_contact};
use super::state::GameState;
use crate::consts::*;

/// Controls sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    pub move_left: bool,
    pub move_right: bool,
}

impl StepInput {
    pub const IDLE: Self = Self {
        move_left: false,
        move_right: false,
    };
}

/// What happened during a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// vx was reflected off a side wall
    pub side_bounce: bool,
    /// vy was reflected off the ceiling
    pub top_bounce: bool,
    /// Ball reached the floor this step
    pub game_over: bool,
    /// Paddle deflected the ball
    pub paddle_hit: bool,
    /// The paddle hit also multiplied the ball speed
    pub sped_up: bool,
    /// Index into `GameState::bricks` of the brick destroyed this step
    pub brick_destroyed: Option<usize>,
}

/// Advance the game state by `dt` seconds
///
/// Negative or NaN `dt` is treated as zero. There is no upper clamp: a huge
/// `dt` can carry the ball through a brick or past the paddle.
pub fn step(state: &mut GameState, input: &StepInput, dt: f32) -> StepOutcome {
    let dt = dt.max(0.0);
    let mut outcome = StepOutcome::default();

    // Paddle moves in every phase. Both moves apply before a single clamp,
    // so both controls held cancel out even against a wall.
    let mut dx = 0.0;
    if input.move_left {
        dx -= PADDLE_SPEED * dt;
    }
    if input.move_right {
        dx += PADDLE_SPEED * dt;
    }
    state.paddle.shift(dx);

    if state.is_over() {
        return outcome;
    }

    let ball = &mut state.ball;
    ball.pos += ball.vel * dt;

    // Walls: reflect only, no position correction
    let walls = wall_contact(ball.pos);
    if walls.side {
        ball.vel.x = -ball.vel.x;
        outcome.side_bounce = true;
    }
    if walls.top {
        ball.vel.y = -ball.vel.y;
        outcome.top_bounce = true;
    }

    if touches_floor(ball) {
        state.end();
        outcome.game_over = true;
        return outcome;
    }

    if paddle_catches(&state.ball, &state.paddle) {
        deflect_off_paddle(state);
        outcome.paddle_hit = true;
        outcome.sped_up = state.hit_count <= MAX_SPEED_UPS;
    }

    outcome.brick_destroyed = break_first_brick(state);

    outcome
}

/// Send the ball back up, aimed by where it struck the paddle
fn deflect_off_paddle(state: &mut GameState) {
    let ball = &mut state.ball;
    let offset = ball.pos.x - state.paddle.x();

    // abs() rather than negate: a ball caught while still sinking goes up too
    ball.vel.y = ball.vel.y.abs();
    ball.vel.x = offset * PADDLE_DEFLECT_GAIN;

    state.hit_count = state.hit_count.saturating_add(1);
    if state.hit_count <= MAX_SPEED_UPS {
        ball.vel *= SPEED_INCREASE_FACTOR;
    }
}

/// Destroy the first live brick containing the ball center, in grid order.
/// At most one brick per step.
fn break_first_brick(state: &mut GameState) -> Option<usize> {
    let ball_pos = state.ball.pos;
    let index = state
        .bricks
        .iter()
        .position(|brick| brick.is_alive() && brick.bounds().contains(ball_pos))?;

    state.bricks[index].destroy();
    state.ball.vel.y = -state.ball.vel.y;
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    use crate::sim::state::{Ball, Brick, GamePhase, Paddle};

    const DT: f32 = 1.0 / 60.0;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-5 * b.abs().max(1.0)
    }

    #[test]
    fn test_ball_integrates_velocity() {
        let mut state = GameState::new();
        let vel = state.ball.vel;
        let outcome = step(&mut state, &StepInput::IDLE, 0.1);
        assert_eq!(state.ball.pos, Vec2::ZERO + vel * 0.1);
        assert_eq!(state.ball.vel, vel);
        assert_eq!(outcome, StepOutcome::default());
    }

    #[test]
    fn test_non_positive_dt_does_not_move() {
        let mut state = GameState::new();
        let before = state.clone();
        step(&mut state, &StepInput { move_left: true, move_right: false }, -0.5);
        step(&mut state, &StepInput::IDLE, 0.0);
        step(&mut state, &StepInput::IDLE, f32::NAN);
        assert_eq!(state, before);
    }

    #[test]
    fn test_side_wall_reflects_vx() {
        let mut state = GameState::new();
        state.ball = Ball::new(Vec2::new(0.96, 0.0), Vec2::new(0.5, 0.1));
        let outcome = step(&mut state, &StepInput::IDLE, DT);
        assert!(outcome.side_bounce);
        assert_eq!(state.ball.vel, Vec2::new(-0.5, 0.1));

        state.ball = Ball::new(Vec2::new(-0.96, 0.0), Vec2::new(-0.5, 0.1));
        step(&mut state, &StepInput::IDLE, DT);
        assert_eq!(state.ball.vel.x, 0.5);
    }

    #[test]
    fn test_ceiling_reflects_vy() {
        let mut state = GameState::with_bricks(Vec::new());
        state.ball = Ball::new(Vec2::new(0.0, 0.96), Vec2::new(0.1, 0.4));
        let outcome = step(&mut state, &StepInput::IDLE, DT);
        assert!(outcome.top_bounce);
        assert!(!outcome.side_bounce);
        assert_eq!(state.ball.vel, Vec2::new(0.1, -0.4));
    }

    #[test]
    fn test_floor_ends_game_and_freezes_ball() {
        let mut state = GameState::new();
        // Directly above the paddle: the floor wins, no paddle hit this frame
        state.ball = Ball::new(Vec2::new(0.0, -0.94), Vec2::new(0.0, -1.0));
        let outcome = step(&mut state, &StepInput::IDLE, 0.02);
        assert!(outcome.game_over);
        assert!(!outcome.paddle_hit);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.hit_count, 0);

        let frozen = state.ball.clone();
        for _ in 0..10 {
            let outcome = step(&mut state, &StepInput::IDLE, DT);
            assert!(!outcome.game_over);
            assert_eq!(state.ball, frozen);
            assert_eq!(state.phase, GamePhase::GameOver);
        }
    }

    #[test]
    fn test_paddle_still_moves_after_game_over() {
        let mut state = GameState::new();
        state.end();
        step(&mut state, &StepInput { move_left: false, move_right: true }, 0.5);
        assert!(approx(state.paddle.x(), 0.6));
    }

    #[test]
    fn test_paddle_hit_scenario() {
        let mut state = GameState::new();
        state.ball = Ball::new(Vec2::new(0.0, -0.79), Vec2::new(0.0, -0.3));
        let outcome = step(&mut state, &StepInput::IDLE, 0.05);
        assert!(outcome.paddle_hit);
        assert!(outcome.sped_up);
        assert_eq!(state.hit_count, 1);
        assert!(state.ball.vel.y > 0.0);
        assert!(approx(state.ball.vel.y, 0.3 * SPEED_INCREASE_FACTOR));
        assert!(state.ball.vel.x.abs() < 1e-6);
    }

    #[test]
    fn test_paddle_hit_aims_by_offset() {
        let mut state = GameState::new();
        state.paddle = Paddle::at(0.1);
        state.ball = Ball::new(Vec2::new(0.2, -0.85), Vec2::new(-0.7, -0.5));
        step(&mut state, &StepInput::IDLE, 0.0);
        // vx replaced by offset * 2.0, then scaled
        assert!(approx(state.ball.vel.x, 0.1 * 2.0 * SPEED_INCREASE_FACTOR));
        assert!(approx(state.ball.vel.y, 0.5 * SPEED_INCREASE_FACTOR));
    }

    #[test]
    fn test_upward_ball_in_catch_zone_keeps_rising() {
        let mut state = GameState::new();
        state.ball = Ball::new(Vec2::new(0.0, -0.85), Vec2::new(0.0, 0.2));
        step(&mut state, &StepInput::IDLE, 0.0);
        assert!(approx(state.ball.vel.y, 0.2 * SPEED_INCREASE_FACTOR));
    }

    #[test]
    fn test_speed_escalation_caps_after_ten_hits() {
        let mut state = GameState::new();
        state.ball = Ball::new(Vec2::new(0.0, -0.85), Vec2::new(0.0, -0.1));
        let mut expected = 0.1_f32;

        for k in 1..=12u32 {
            state.ball.pos = Vec2::new(0.0, -0.85);
            state.ball.vel.y = -state.ball.vel.y.abs();
            let outcome = step(&mut state, &StepInput::IDLE, 0.0);

            assert!(outcome.paddle_hit);
            assert_eq!(state.hit_count, k);
            assert_eq!(outcome.sped_up, k <= 10);
            if k <= 10 {
                expected *= SPEED_INCREASE_FACTOR;
            }
            assert!(approx(state.ball.vel.y, expected), "hit {k}");
            assert_eq!(state.ball.vel.x, 0.0);
        }
    }

    #[test]
    fn test_brick_hit_reflects_vy_only() {
        let mut state = GameState::with_bricks(vec![Brick::new(Vec2::new(0.0, 0.5), [1.0; 3])]);
        state.ball = Ball::new(Vec2::new(0.01, 0.49), Vec2::new(0.3, 0.4));
        let outcome = step(&mut state, &StepInput::IDLE, 0.0);
        assert_eq!(outcome.brick_destroyed, Some(0));
        assert!(!state.bricks[0].is_alive());
        assert_eq!(state.ball.vel, Vec2::new(0.3, -0.4));
    }

    #[test]
    fn test_one_brick_per_step() {
        let mut state = GameState::with_bricks(vec![
            Brick::new(Vec2::new(0.0, 0.5), [1.0; 3]),
            Brick::new(Vec2::new(0.05, 0.5), [1.0; 3]),
        ]);
        state.ball = Ball::new(Vec2::new(0.02, 0.5), Vec2::new(0.0, 0.4));

        let outcome = step(&mut state, &StepInput::IDLE, 0.0);
        assert_eq!(outcome.brick_destroyed, Some(0));
        assert!(!state.bricks[0].is_alive());
        assert!(state.bricks[1].is_alive());
        assert_eq!(state.bricks_remaining(), 1);

        // Still overlapping: the second one goes next frame
        let outcome = step(&mut state, &StepInput::IDLE, 0.0);
        assert_eq!(outcome.brick_destroyed, Some(1));
        assert_eq!(state.bricks_remaining(), 0);
        assert_eq!(state.ball.vel.y, 0.4);
    }

    #[test]
    fn test_dead_brick_is_ignored() {
        let mut state = GameState::with_bricks(vec![Brick::new(Vec2::new(0.0, 0.5), [1.0; 3])]);
        state.bricks[0].destroy();
        state.ball = Ball::new(Vec2::new(0.0, 0.5), Vec2::new(0.0, 0.4));
        let outcome = step(&mut state, &StepInput::IDLE, 0.0);
        assert_eq!(outcome.brick_destroyed, None);
        assert_eq!(state.ball.vel.y, 0.4);
    }

    #[test]
    fn test_horizontal_ball_never_touches_bricks() {
        let mut state = GameState::new();
        state.ball = Ball::new(Vec2::ZERO, Vec2::new(0.3, 0.0));
        for _ in 0..2000 {
            let outcome = step(&mut state, &StepInput::IDLE, DT);
            assert_eq!(outcome.brick_destroyed, None);
        }
        assert_eq!(state.bricks_remaining(), 20);
        assert_eq!(state.hit_count, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.pos.y, 0.0);
    }

    #[test]
    fn test_both_controls_cancel() {
        let mut state = GameState::new();
        step(&mut state, &StepInput { move_left: true, move_right: true }, 0.1);
        assert!(state.paddle.x().abs() < 1e-6);
    }

    #[test]
    fn test_both_controls_hold_paddle_at_walls() {
        let both = StepInput { move_left: true, move_right: true };

        let mut state = GameState::new();
        state.paddle = Paddle::at(-5.0);
        assert_eq!(state.paddle.x(), Paddle::MIN_X);
        for _ in 0..5 {
            step(&mut state, &both, 0.1);
            assert_eq!(state.paddle.x(), Paddle::MIN_X);
        }

        state.paddle = Paddle::at(5.0);
        step(&mut state, &both, 0.1);
        assert_eq!(state.paddle.x(), Paddle::MAX_X);
    }

    #[test]
    fn test_paddle_moves_and_clamps() {
        let mut state = GameState::new();
        let left = StepInput { move_left: true, move_right: false };
        step(&mut state, &left, 0.25);
        assert!(approx(state.paddle.x(), -0.3));
        step(&mut state, &left, 10.0);
        assert_eq!(state.paddle.x(), Paddle::MIN_X);
    }
}
