//! Keyboard and mouse bindings.
//!
//! Input is level-triggered: every frame the set of held keys is turned into a
//! [`PoseDelta`], so holding a combination keeps changing the pose until the
//! keys are released or a clamp is hit.
//!
//! | keys            | effect                        |
//! |-----------------|-------------------------------|
//! | U/I/O/P/Y + S   | flex index/middle/ring/little/thumb |
//! | U/I/O/P/Y + W   | extend the same digit         |
//! | arrows          | orbit the camera              |
//! | mouse wheel     | zoom                          |

use std::collections::HashSet;

use mano_engine::input::{InputFrame, Key};

use crate::config::ControlConfig;
use crate::pose::{Digit, PoseDelta};

/// Key that selects each digit.
pub const DIGIT_KEYS: [(Digit, Key); 5] = [
    (Digit::Index, Key::U),
    (Digit::Middle, Key::I),
    (Digit::Ring, Key::O),
    (Digit::Little, Key::P),
    (Digit::Thumb, Key::Y),
];

pub const FLEX_KEY: Key = Key::S;
pub const EXTEND_KEY: Key = Key::W;

/// Computes this frame's pose change from the held keys and scrolled lines.
pub fn pose_delta(held: &HashSet<Key>, scroll_lines: f32, cfg: &ControlConfig) -> PoseDelta {
    let axis = |neg: Key, pos: Key| -> f32 {
        let mut v = 0.0;
        if held.contains(&pos) {
            v += 1.0;
        }
        if held.contains(&neg) {
            v -= 1.0;
        }
        v
    };

    let mut delta = PoseDelta {
        yaw: axis(Key::ArrowLeft, Key::ArrowRight) * cfg.rotation_step,
        pitch: axis(Key::ArrowDown, Key::ArrowUp) * cfg.rotation_step,
        zoom: scroll_lines * cfg.zoom_sensitivity,
        ..PoseDelta::default()
    };

    let flexing = held.contains(&FLEX_KEY);
    let extending = held.contains(&EXTEND_KEY);
    for (digit, key) in DIGIT_KEYS {
        if !held.contains(&key) {
            continue;
        }
        if flexing {
            delta.flex[digit.index()] = cfg.flex_step;
        }
        if extending {
            delta.extend[digit.index()] = cfg.flex_step;
        }
    }

    delta
}

/// Vertical scroll of this frame in lines. Touchpad pixels are converted with
/// `pixels_per_line`.
pub fn scroll_lines(frame: &InputFrame, cfg: &ControlConfig) -> f32 {
    let pixels = if cfg.pixels_per_line > 0.0 {
        frame.wheel_pixels / cfg.pixels_per_line
    } else {
        0.0
    };
    frame.wheel_lines + pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::HandPose;

    fn held(keys: &[Key]) -> HashSet<Key> {
        keys.iter().copied().collect()
    }

    fn run_frames(pose: &mut HandPose, keys: &[Key], frames: usize, cfg: &ControlConfig) {
        let keys = held(keys);
        for _ in 0..frames {
            pose.apply(&pose_delta(&keys, 0.0, cfg), cfg);
        }
    }

    #[test]
    fn each_combo_drives_its_own_digit() {
        let cfg = ControlConfig::default();
        for (digit, key) in DIGIT_KEYS {
            let d = pose_delta(&held(&[key, FLEX_KEY]), 0.0, &cfg);
            for other in Digit::ALL {
                let expected = if other == digit { 0.1 } else { 0.0 };
                assert_eq!(d.flex[other.index()], expected, "{key} -> {other:?}");
                assert_eq!(d.extend[other.index()], 0.0);
            }

            let d = pose_delta(&held(&[key, EXTEND_KEY]), 0.0, &cfg);
            assert_eq!(d.extend[digit.index()], 0.1, "{key}");
        }
    }

    #[test]
    fn selector_or_direction_alone_does_nothing() {
        let cfg = ControlConfig::default();
        assert!(pose_delta(&held(&[Key::I]), 0.0, &cfg).is_zero());
        assert!(pose_delta(&held(&[Key::S]), 0.0, &cfg).is_zero());
        assert!(pose_delta(&held(&[Key::W]), 0.0, &cfg).is_zero());
    }

    #[test]
    fn several_combos_apply_in_one_frame() {
        let cfg = ControlConfig::default();
        let d = pose_delta(&held(&[Key::U, Key::Y, Key::S, Key::ArrowLeft]), 0.0, &cfg);
        assert_eq!(d.flex[Digit::Index.index()], 0.1);
        assert_eq!(d.flex[Digit::Thumb.index()], 0.1);
        assert_eq!(d.yaw, -0.1);
    }

    #[test]
    fn arrows_orbit_the_camera() {
        let cfg = ControlConfig::default();
        assert_eq!(pose_delta(&held(&[Key::ArrowRight]), 0.0, &cfg).yaw, 0.1);
        assert_eq!(pose_delta(&held(&[Key::ArrowUp]), 0.0, &cfg).pitch, 0.1);
        assert_eq!(pose_delta(&held(&[Key::ArrowDown]), 0.0, &cfg).pitch, -0.1);
    }

    #[test]
    fn flex_and_extend_together_cancel_inside_range() {
        let cfg = ControlConfig::default();
        let mut pose = HandPose::new(&cfg);
        run_frames(&mut pose, &[Key::O, Key::S], 200, &cfg);
        let before = pose;

        run_frames(&mut pose, &[Key::O, Key::S, Key::W], 50, &cfg);
        assert_eq!(pose, before);
    }

    #[test]
    fn flex_and_extend_together_back_off_from_full_flex() {
        let cfg = ControlConfig::default();
        let mut pose = HandPose::new(&cfg);
        *pose.joints.get_mut(Digit::Middle) = 90.0;

        // Flex saturates at 90 before extend applies, so each frame ends at 89.9.
        for _ in 0..10 {
            run_frames(&mut pose, &[Key::I, Key::S, Key::W], 1, &cfg);
            let middle = pose.joints.get(Digit::Middle);
            assert!((middle - 89.9).abs() < 1e-4, "{middle}");
        }
    }

    #[test]
    fn flex_and_extend_together_stay_at_zero() {
        let cfg = ControlConfig::default();
        let mut pose = HandPose::new(&cfg);
        run_frames(&mut pose, &[Key::Y, Key::S, Key::W], 10, &cfg);
        assert_eq!(pose.joints.get(Digit::Thumb), 0.0);
    }

    #[test]
    fn holding_flex_clamps_at_ninety() {
        let cfg = ControlConfig::default();
        let mut pose = HandPose::new(&cfg);

        run_frames(&mut pose, &[Key::I, Key::S], 900, &cfg);
        let middle = pose.joints.get(Digit::Middle);
        assert!((middle - 90.0).abs() < 1e-2, "{middle}");

        run_frames(&mut pose, &[Key::I, Key::S], 100, &cfg);
        assert_eq!(pose.joints.get(Digit::Middle), 90.0);

        run_frames(&mut pose, &[Key::I, Key::S], 500, &cfg);
        assert_eq!(pose.joints.get(Digit::Middle), 90.0);
    }

    #[test]
    fn angles_stay_in_range_for_mixed_input() {
        let cfg = ControlConfig::default();
        let mut pose = HandPose::new(&cfg);
        let sequences: [&[Key]; 4] = [
            &[Key::Y, Key::W],
            &[Key::Y, Key::S, Key::P],
            &[Key::P, Key::W, Key::U],
            &[Key::U, Key::I, Key::O, Key::P, Key::Y, Key::S],
        ];

        for (i, keys) in sequences.iter().cycle().take(40).enumerate() {
            run_frames(&mut pose, keys, 37 * (i % 7) + 1, &cfg);
            for digit in Digit::ALL {
                let a = pose.joints.get(digit);
                assert!((0.0..=90.0).contains(&a), "{digit:?} = {a}");
            }
        }
    }

    #[test]
    fn no_input_leaves_pose_unchanged() {
        let cfg = ControlConfig::default();
        let mut pose = HandPose::new(&cfg);
        run_frames(&mut pose, &[Key::U, Key::S, Key::ArrowUp], 30, &cfg);
        let before = pose;

        run_frames(&mut pose, &[], 1000, &cfg);
        assert_eq!(pose, before);
    }

    #[test]
    fn scrolling_zooms_within_bounds() {
        let cfg = ControlConfig::default();

        let mut pose = HandPose::new(&cfg);
        pose.apply(&pose_delta(&HashSet::new(), -50.0, &cfg), &cfg);
        assert!((pose.camera.zoom - -6.9).abs() < 1e-5, "{}", pose.camera.zoom);

        let mut pose = HandPose::new(&cfg);
        pose.apply(&pose_delta(&HashSet::new(), -500.0, &cfg), &cfg);
        assert_eq!(pose.camera.zoom, -10.0);

        pose.apply(&pose_delta(&HashSet::new(), 500.0, &cfg), &cfg);
        assert_eq!(pose.camera.zoom, -1.0);
    }

    #[test]
    fn pixel_scroll_is_converted_to_lines() {
        let cfg = ControlConfig::default();
        let frame = InputFrame {
            wheel_lines: 1.0,
            wheel_pixels: -60.0,
            ..InputFrame::default()
        };
        assert_eq!(scroll_lines(&frame, &cfg), -2.0);
    }
}
