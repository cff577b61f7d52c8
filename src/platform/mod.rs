//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input sources (held buttons/keys, autopilot)
//! - Frame timing

pub mod autopilot;
pub mod input;
pub mod time;

pub use autopilot::Autopilot;
pub use input::{Control, HeldControls};
pub use time::FrameClock;

use crate::sim::{GameState, StepInput};

/// Supplies the paddle controls, polled once per frame before the step
///
/// Hardware-backed sources ignore `state`; it is there for computer players.
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> StepInput;
}

impl InputSource for StepInput {
    fn poll(&mut self, _state: &GameState) -> StepInput {
        *self
    }
}
