//! Hand scene graph.
//!
//! Transforms are values: every call receives its parent frame and derives
//! children from it, so nothing has to be restored after a subtree is drawn.

use glam::Vec3;

use mano_engine::math::Transform;
use mano_engine::scene::DrawList;

use crate::config::{
    FingerDescriptor, FINGERS, FINGER_ROOT_Y, FLESH, HAND_OFFSET, PALM_SHELL_SIZE, PALM_SIZE,
    SEGMENT_WIDTH, SHELL, SHELL_DEPTH, SHELL_OFFSET, SHELL_OVERHANG, SHELL_WIDTH, THUMB,
};
use crate::pose::JointAngles;

/// Records one digit: a chain of flesh segments, each with a textured shell
/// behind it.
///
/// The chain is rotated by `base_angle` at the root and by `joint_angle` at
/// every segment boundary, so segment *k* ends up rotated by
/// `base_angle + k * joint_angle`. The hand passes the same angle for both,
/// which bends the whole digit as a rigid fan.
pub fn draw_finger(
    list: &mut DrawList,
    parent: Transform,
    finger: &FingerDescriptor,
    base_angle: f32,
    joint_angle: f32,
) {
    let mut frame = parent;
    if let Some(socket) = finger.socket {
        frame = frame.translated_by(socket.offset).rotated_z_deg(socket.twist_deg);
    }

    let length = finger.segment_length;
    let flesh_size = Vec3::new(SEGMENT_WIDTH, length, SEGMENT_WIDTH);
    let shell_size = Vec3::new(SHELL_WIDTH, length + SHELL_OVERHANG, SHELL_DEPTH);

    let mut segment = frame
        .translated(finger.x_offset, FINGER_ROOT_Y, 0.0)
        .rotated_x_deg(base_angle);

    for _ in 0..finger.segments {
        list.push_unlit_cube(segment, FLESH, flesh_size);
        list.push_lit_cube(segment.translated_by(SHELL_OFFSET), SHELL, shell_size, true);

        segment = segment.translated(0.0, length, 0.0).rotated_x_deg(joint_angle);
    }
}

/// Records the palm, its shell, four fingers and the thumb under `view`.
pub fn draw_hand(list: &mut DrawList, view: Transform, angles: &JointAngles) {
    let hand = view.translated_by(HAND_OFFSET);

    list.push_unlit_cube(hand, FLESH, PALM_SIZE);
    list.push_lit_cube(hand.translated_by(SHELL_OFFSET), SHELL, PALM_SHELL_SIZE, true);

    for (finger, &angle) in FINGERS.iter().zip(angles.fingers.iter()) {
        draw_finger(list, hand, finger, angle, angle);
    }

    draw_finger(list, hand, &THUMB, angles.thumb, angles.thumb);
}
