//! Turns a game state into a triangle list
//!
//! Draw order is paddle, ball, then live bricks. Coordinates stay in arena
//! space; the pipeline maps them to the viewport.

use glam::Vec2;

use super::shapes::{self, CIRCLE_SEGMENTS};
use super::vertex::{Vertex, colors};
use crate::consts::PADDLE_HEIGHT;
use crate::sim::{Brick, GameState};

/// Build the frame's vertices into `out` (cleared first)
pub fn build_into(state: &GameState, out: &mut Vec<Vertex>) {
    out.clear();

    let paddle = &state.paddle;
    shapes::rect(
        out,
        Vec2::new(paddle.x(), paddle.y()),
        Vec2::new(paddle.half_width(), PADDLE_HEIGHT / 2.0),
        colors::PADDLE,
    );

    shapes::circle(
        out,
        state.ball.pos,
        state.ball.radius(),
        colors::BALL,
        CIRCLE_SEGMENTS,
    );

    for brick in state.live_bricks() {
        shapes::rect(
            out,
            brick.pos,
            Brick::HALF_EXTENTS,
            colors::opaque(brick.color),
        );
    }
}

pub fn build(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::new();
    build_into(state, &mut out);
    out
}
