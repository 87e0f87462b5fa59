/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys). `InputFrame` collects
/// what happened since the previous frame and is cleared after each frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Vertical wheel movement in lines (positive = away from the user).
    pub wheel_lines: f32,

    /// Vertical wheel movement in logical pixels from high-precision devices.
    pub wheel_pixels: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.wheel_lines = 0.0;
        self.wheel_pixels = 0.0;
    }
}
