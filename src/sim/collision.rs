//! Collision tests against the arena walls, the paddle and bricks
//!
//! All tests are point-in-region checks on the ball center, with the one
//! exception of the floor, which uses the ball's bottom edge. Bounds are
//! strict: a ball exactly on an edge does not count as inside.

use glam::Vec2;

use super::state::{Ball, Paddle};
use crate::consts::*;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Strict containment (points on the edge are outside)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}

/// Which walls the ball is past this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Left or right wall
    pub side: bool,
    /// Ceiling
    pub top: bool,
}

/// Check the ball center against the side walls and the ceiling
pub fn wall_contact(pos: Vec2) -> WallContact {
    WallContact {
        side: pos.x < -WALL_BOUND || pos.x > WALL_BOUND,
        top: pos.y > WALL_BOUND,
    }
}

/// Ball bottom edge has reached the floor
#[inline]
pub fn touches_floor(ball: &Ball) -> bool {
    ball.bottom() <= FLOOR_Y
}

/// Ball center is low enough and horizontally inside the paddle span
pub fn paddle_catches(ball: &Ball, paddle: &Paddle) -> bool {
    let (left, right) = paddle.catch_span();
    ball.pos.y < PADDLE_CATCH_Y && ball.pos.x > left && ball.pos.x < right
}
