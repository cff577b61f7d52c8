//! Game state and core simulation types
//!
//! Everything the step engine mutates lives in [`GameState`]. The renderer
//! only ever reads it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in flight
    #[default]
    Playing,
    /// Ball reached the floor. Terminal: only a fresh `GameState` plays again.
    GameOver,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::new(BALL_START_VEL_X, BALL_START_VEL_Y),
        }
    }
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Fixed for every ball
    #[inline]
    pub const fn radius(&self) -> f32 {
        BALL_RADIUS
    }

    /// Lowest point of the ball
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.radius()
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle. Only `x` moves; width and height are fixed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paddle {
    x: f32,
}

impl Paddle {
    /// Leftmost center position that keeps the paddle inside the arena
    pub const MIN_X: f32 = -ARENA_EXTENT + PADDLE_HALF_WIDTH;
    /// Rightmost center position that keeps the paddle inside the arena
    pub const MAX_X: f32 = ARENA_EXTENT - PADDLE_HALF_WIDTH;

    /// Paddle centered at `x`, clamped into the arena
    pub fn at(x: f32) -> Self {
        let mut paddle = Self::default();
        paddle.set_x(x);
        paddle
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub const fn y(&self) -> f32 {
        PADDLE_Y
    }

    #[inline]
    pub const fn half_width(&self) -> f32 {
        PADDLE_HALF_WIDTH
    }

    /// Set the center, clamped to [`Paddle::MIN_X`, `Paddle::MAX_X`].
    /// NaN leaves the paddle where it was.
    pub fn set_x(&mut self, x: f32) {
        if x.is_nan() {
            return;
        }
        self.x = x.clamp(Self::MIN_X, Self::MAX_X);
    }

    /// Move by `dx` and clamp
    pub fn shift(&mut self, dx: f32) {
        self.set_x(self.x + dx);
    }

    /// Horizontal span that catches the ball: (left, right)
    pub fn catch_span(&self) -> (f32, f32) {
        (self.x - PADDLE_HALF_WIDTH, self.x + PADDLE_HALF_WIDTH)
    }
}

/// A destructible brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub pos: Vec2,
    alive: bool,
    pub color: [f32; 3],
}

impl Brick {
    /// Shared by every brick
    pub const HALF_EXTENTS: Vec2 = Vec2::new(BRICK_HALF_WIDTH, BRICK_HALF_HEIGHT);

    pub fn new(pos: Vec2, color: [f32; 3]) -> Self {
        Self {
            pos,
            alive: true,
            color,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark the brick dead. There is no way back.
    pub fn destroy(&mut self) {
        self.alive = false;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Self::HALF_EXTENTS)
    }
}

/// Row colors, top row first
pub const BRICK_ROW_COLORS: [[f32; 3]; BRICK_ROWS] = [
    [0.2, 0.6, 1.0], // Blue
    [0.2, 1.0, 0.6], // Green
];

/// Build the starting brick grid in row-major order
pub fn brick_grid() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLS);
    for (row, color) in BRICK_ROW_COLORS.iter().enumerate() {
        for col in 0..BRICK_COLS {
            let pos = Vec2::new(
                BRICK_ORIGIN_X + col as f32 * BRICK_SPACING_X,
                BRICK_ORIGIN_Y - row as f32 * BRICK_SPACING_Y,
            );
            bricks.push(Brick::new(pos, *color));
        }
    }
    bricks
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    pub paddle: Paddle,
    /// Grid order; dead bricks stay in place
    pub bricks: Vec<Brick>,
    /// Successful paddle contacts
    pub hit_count: u32,
    pub phase: GamePhase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh session: ball at the center, paddle centered, full brick grid
    pub fn new() -> Self {
        Self::with_bricks(brick_grid())
    }

    /// Fresh session with a custom brick set
    pub fn with_bricks(bricks: Vec<Brick>) -> Self {
        Self {
            ball: Ball::default(),
            paddle: Paddle::default(),
            bricks,
            hit_count: 0,
            phase: GamePhase::Playing,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Enter the terminal phase and freeze the ball
    pub(crate) fn end(&mut self) {
        self.phase = GamePhase::GameOver;
        self.ball.vel = Vec2::ZERO;
    }

    pub fn live_bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_alive())
    }

    pub fn bricks_remaining(&self) -> usize {
        self.live_bricks().count()
    }
}
