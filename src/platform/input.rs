//! Held-control input
//!
//! Platform event handlers press and release controls as events arrive; the
//! frame loop reads the latched state once per frame.

use super::InputSource;
use crate::sim::{GameState, StepInput};

/// A physical control that moves the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    MouseLeft,
    MouseRight,
    KeyLeft,
    KeyRight,
}

impl Control {
    /// Map a `MouseEvent.button()` value
    pub fn from_mouse_button(button: i16) -> Option<Self> {
        match button {
            0 => Some(Control::MouseLeft),
            2 => Some(Control::MouseRight),
            _ => None,
        }
    }

    /// Map a `KeyboardEvent.key()` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Control::KeyLeft),
            "ArrowRight" | "d" | "D" => Some(Control::KeyRight),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Control::MouseLeft => 1 << 0,
            Control::MouseRight => 1 << 1,
            Control::KeyLeft => 1 << 2,
            Control::KeyRight => 1 << 3,
        }
    }
}

const LEFT_MASK: u8 = (1 << 0) | (1 << 2);
const RIGHT_MASK: u8 = (1 << 1) | (1 << 3);

/// Latched state of every paddle control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldControls {
    held: u8,
}

impl HeldControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, control: Control) {
        self.held |= control.bit();
    }

    pub fn release(&mut self, control: Control) {
        self.held &= !control.bit();
    }

    /// Drop everything (focus lost, pointer left the canvas)
    pub fn clear(&mut self) {
        self.held = 0;
    }

    pub fn to_input(&self) -> StepInput {
        StepInput {
            move_left: self.held & LEFT_MASK != 0,
            move_right: self.held & RIGHT_MASK != 0,
        }
    }
}

impl InputSource for HeldControls {
    fn poll(&mut self, _state: &GameState) -> StepInput {
        self.to_input()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_and_keys_merge() {
        let mut controls = HeldControls::new();
        assert_eq!(controls.to_input(), StepInput::IDLE);

        controls.press(Control::MouseLeft);
        controls.press(Control::KeyLeft);
        controls.release(Control::MouseLeft);
        // Key still held
        assert!(controls.to_input().move_left);

        controls.press(Control::MouseRight);
        let input = controls.to_input();
        assert!(input.move_left && input.move_right);

        controls.clear();
        assert_eq!(controls.to_input(), StepInput::IDLE);
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(Control::from_mouse_button(0), Some(Control::MouseLeft));
        assert_eq!(Control::from_mouse_button(1), None);
        assert_eq!(Control::from_mouse_button(2), Some(Control::MouseRight));
        assert_eq!(Control::from_key("ArrowLeft"), Some(Control::KeyLeft));
        assert_eq!(Control::from_key("D"), Some(Control::KeyRight));
        assert_eq!(Control::from_key("Escape"), None);
    }

    #[test]
    fn test_poll_reads_latched_state() {
        let mut controls = HeldControls::new();
        controls.press(Control::KeyRight);
        let input = controls.poll(&GameState::new());
        assert!(input.move_right && !input.move_left);
    }
}
