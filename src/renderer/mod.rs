//! Rendering
//!
//! The renderer only reads `GameState`; nothing here feeds back into the
//! simulation.

pub mod headless;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use headless::HeadlessRenderer;
pub use pipeline::{RenderSetupError, RenderState};
pub use vertex::Vertex;

use crate::sim::GameState;

/// Draws a frame from the current state
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}
