//! Brick Breaker - a minimal arcade game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (ball motion, collisions, hit-count speed ramp)
//! - `driver`: Frame loop tying input, simulation and rendering together
//! - `platform`: Input sources (held controls, autopilot)
//! - `renderer`: Scene building and the WebGPU pipeline
//! - `settings`: Runtime configuration

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::Driver;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// Everything lives in the fixed normalized arena, x and y in [-1, 1].
pub mod consts {
    /// Arena half-size (the arena spans [-ARENA_EXTENT, ARENA_EXTENT] on both axes)
    pub const ARENA_EXTENT: f32 = 1.0;
    /// Ball center past this |x| reflects vx, past this y reflects vy
    pub const WALL_BOUND: f32 = 0.95;
    /// Ball bottom edge at or below this ends the game
    pub const FLOOR_Y: f32 = -1.0;

    /// Paddle
    pub const PADDLE_WIDTH: f32 = 0.25;
    pub const PADDLE_HALF_WIDTH: f32 = PADDLE_WIDTH / 2.0;
    pub const PADDLE_HEIGHT: f32 = 0.1;
    pub const PADDLE_Y: f32 = -0.9;
    /// Arena units per second while a move control is held
    pub const PADDLE_SPEED: f32 = 1.2;
    /// Ball center must be below this for the paddle to catch it
    pub const PADDLE_CATCH_Y: f32 = -0.8;
    /// Rebound vx = impact offset from paddle center * this
    pub const PADDLE_DEFLECT_GAIN: f32 = 2.0;

    /// Ball
    pub const BALL_RADIUS: f32 = 0.05;
    pub const BALL_START_VEL_X: f32 = 0.18 * 1.6;
    pub const BALL_START_VEL_Y: f32 = 0.22 * 1.6;

    /// Speed multiplier applied on each of the first `MAX_SPEED_UPS` paddle hits
    pub const SPEED_INCREASE_FACTOR: f32 = 1.40;
    pub const MAX_SPEED_UPS: u32 = 10;

    /// Bricks
    pub const BRICK_ROWS: usize = 2;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_HALF_WIDTH: f32 = 0.08;
    pub const BRICK_HALF_HEIGHT: f32 = 0.05;
    pub const BRICK_ORIGIN_X: f32 = -0.9;
    pub const BRICK_ORIGIN_Y: f32 = 0.8;
    pub const BRICK_SPACING_X: f32 = 0.18;
    pub const BRICK_SPACING_Y: f32 = 0.15;
}
