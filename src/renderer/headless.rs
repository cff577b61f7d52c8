//! Renderer for runs without a window
//!
//! Builds the same triangle list the GPU path would, then just counts it.

use super::Renderer;
use super::scene;
use super::vertex::Vertex;
use crate::sim::GameState;

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    last_vertex_count: usize,
    scratch: Vec<Vertex>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_vertex_count(&self) -> usize {
        self.last_vertex_count
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, state: &GameState) {
        scene::build_into(state, &mut self.scratch);
        self.frames += 1;
        self.last_vertex_count = self.scratch.len();
        log::trace!(
            "frame {}: {} vertices, ball ({:.3}, {:.3})",
            self.frames,
            self.last_vertex_count,
            state.ball.pos.x,
            state.ball.pos.y
        );
    }
}
