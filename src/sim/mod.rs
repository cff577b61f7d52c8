//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Explicit `GameState` passed into `step`, no globals
//! - Variable timestep, one `step` per rendered frame
//! - Stable iteration order (bricks in grid order)

pub mod collision;
pub mod state;
pub mod step;

pub use collision::{Aabb, WallContact, paddle_catches, touches_floor, wall_contact};
pub use state::{Ball, Brick, GamePhase, GameState, Paddle, brick_grid};
pub use step::{StepInput, StepOutcome, step};
