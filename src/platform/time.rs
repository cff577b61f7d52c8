//! Frame timing

/// Turns per-frame timestamps into elapsed seconds
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. The first call returns 0, and a
    /// timestamp that goes backwards yields 0 rather than a negative delta.
    pub fn tick(&mut self, now_secs: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now_secs - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last = Some(now_secs);
        dt
    }

    /// Forget the previous timestamp (after a restart or a long suspend)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(12.5), 0.0);
        assert!((clock.tick(12.75) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_time_clamps_to_zero() {
        let mut clock = FrameClock::new();
        clock.tick(5.0);
        assert_eq!(clock.tick(4.0), 0.0);
        assert!((clock.tick(4.5) - 0.5).abs() < 1e-6);
        clock.reset();
        assert_eq!(clock.tick(100.0), 0.0);
    }
}
