//! Frame driver
//!
//! Owns the session's `GameState` and runs the per-frame sequence:
//! poll input, step the simulation, render.

use crate::consts::MAX_SPEED_UPS;
use crate::platform::{FrameClock, InputSource};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{GameState, StepOutcome, step};

pub struct Driver {
    state: GameState,
    settings: Settings,
    clock: FrameClock,
    frames: u64,
}

impl Driver {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: GameState::new(),
            settings,
            clock: FrameClock::new(),
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Frames advanced since the session started
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame stamped `now_secs` (any monotonic clock, in seconds)
    pub fn frame<I, R>(&mut self, now_secs: f64, input: &mut I, renderer: &mut R) -> StepOutcome
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let dt = self.clock.tick(now_secs);
        self.advance(dt, input, renderer)
    }

    /// Run one frame with an explicit delta
    pub fn advance<I, R>(&mut self, dt: f32, input: &mut I, renderer: &mut R) -> StepOutcome
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let dt = self.settings.frame_dt(dt);
        let controls = input.poll(&self.state);
        let outcome = step(&mut self.state, &controls, dt);
        self.frames += 1;
        self.report(&outcome);
        renderer.render(&self.state);
        outcome
    }

    /// Keep running frames until `quit` says stop. Returns the frame count.
    pub fn run<I, R>(
        &mut self,
        mut now_secs: impl FnMut() -> f64,
        input: &mut I,
        renderer: &mut R,
        mut quit: impl FnMut(&GameState, u64) -> bool,
    ) -> u64
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        while !quit(&self.state, self.frames) {
            let now = now_secs();
            self.frame(now, input, renderer);
        }
        self.frames
    }

    /// Throw the session away and start a new one
    pub fn restart(&mut self) {
        self.state = GameState::new();
        self.clock.reset();
        self.frames = 0;
        log::info!("New game started");
    }

    fn report(&self, outcome: &StepOutcome) {
        let state = &self.state;

        if let Some(index) = outcome.brick_destroyed {
            log::debug!(
                "Brick {} destroyed, {} remaining",
                index,
                state.bricks_remaining()
            );
            if state.bricks_remaining() == 0 {
                log::info!("All bricks cleared after {} frames", self.frames);
            }
        }

        if outcome.paddle_hit {
            log::debug!(
                "Paddle hit #{} (ball speed {:.3})",
                state.hit_count,
                state.ball.speed()
            );
            if outcome.sped_up && state.hit_count == MAX_SPEED_UPS {
                log::info!("Ball reached top speed ({:.3})", state.ball.speed());
            }
        }

        if outcome.game_over {
            log::info!(
                "Game over: {} paddle hits, {} bricks left, {} frames",
                state.hit_count,
                state.bricks_remaining(),
                self.frames
            );
        }

        let every = u64::from(self.settings.log_every_frames);
        if every > 0 && self.frames % every == 0 {
            log::debug!(
                "frame {}: ball ({:.3}, {:.3}) paddle {:.3} phase {:?}",
                self.frames,
                state.ball.pos.x,
                state.ball.pos.y,
                state.paddle.x(),
                state.phase
            );
        }
    }
}
