//! Idle/demo player
//!
//! Keeps the paddle under the ball. The aim point wanders a little with the
//! hit count so rebounds don't settle into a vertical loop.

use super::InputSource;
use crate::consts::PADDLE_HALF_WIDTH;
use crate::sim::{GameState, StepInput};

/// Computer player driving the paddle from the current state
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// No movement while the paddle is this close to its target
    pub dead_zone: f32,
    /// Largest aim offset from the paddle center, as a fraction of half-width
    pub aim_spread: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            dead_zone: 0.02,
            aim_spread: 0.5,
        }
    }
}

impl Autopilot {
    /// Paddle x the autopilot wants for this state
    pub fn target_x(&self, state: &GameState) -> f32 {
        let wander = (state.hit_count as f32 * 0.7).sin() + (state.hit_count as f32 * 0.3).sin() * 0.5;
        let offset = (wander / 1.5) * self.aim_spread * PADDLE_HALF_WIDTH;
        state.ball.pos.x - offset
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> StepInput {
        if state.is_over() {
            return StepInput::IDLE;
        }
        let error = self.target_x(state) - state.paddle.x();
        StepInput {
            move_left: error < -self.dead_zone,
            move_right: error > self.dead_zone,
        }
    }
}
