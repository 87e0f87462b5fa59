use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, MouseWheelDelta};

/// Current input state for the window.
///
/// Holds "is down" information. Wheel movement is recorded into an
/// `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(focused) => {
                if !focused {
                    // Release notifications are not delivered to unfocused windows.
                    // Dropping the held set avoids keys that stay "down" forever.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(key);
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },

            InputEvent::MouseWheel(delta) => match delta {
                MouseWheelDelta::Line { y, .. } => frame.wheel_lines += y,
                MouseWheelDelta::Pixel { y, .. } => frame.wheel_pixels += y,
            },
        }
    }
}
