use crate::config::ControlConfig;

/// One independently controlled digit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Digit {
    Index,
    Middle,
    Ring,
    Little,
    Thumb,
}

impl Digit {
    pub const ALL: [Digit; 5] = [
        Digit::Index,
        Digit::Middle,
        Digit::Ring,
        Digit::Little,
        Digit::Thumb,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Joint angles in degrees, each kept inside the configured joint range.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct JointAngles {
    /// Index, middle, ring, little.
    pub fingers: [f32; 4],
    pub thumb: f32,
}

impl JointAngles {
    pub fn get(&self, digit: Digit) -> f32 {
        match digit {
            Digit::Thumb => self.thumb,
            d => self.fingers[d.index()],
        }
    }

    pub fn get_mut(&mut self, digit: Digit) -> &mut f32 {
        match digit {
            Digit::Thumb => &mut self.thumb,
            d => &mut self.fingers[d.index()],
        }
    }
}

/// Orbit camera. Zoom is the (negative) distance along the view axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    pub zoom: f32,
    /// Degrees about X; unbounded.
    pub pitch: f32,
    /// Degrees about Y; unbounded.
    pub yaw: f32,
}

/// Change requested by one frame of input.
///
/// Built by [`crate::controls::pose_delta`]. Flex and extend are kept apart:
/// each is applied and clamped on its own, flex first, so holding both at a
/// bound does not cancel.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PoseDelta {
    /// Flex amount per digit (degrees, >= 0), indexed by [`Digit::index`].
    pub flex: [f32; 5],
    /// Extend amount per digit (degrees, >= 0).
    pub extend: [f32; 5],
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
}

impl PoseDelta {
    pub fn is_zero(&self) -> bool {
        *self == PoseDelta::default()
    }
}

/// Everything the viewer mutates in response to input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandPose {
    pub joints: JointAngles,
    pub camera: CameraState,
}

impl HandPose {
    /// Open hand, camera at the configured initial zoom.
    pub fn new(cfg: &ControlConfig) -> Self {
        Self {
            joints: JointAngles::default(),
            camera: CameraState {
                zoom: cfg.initial_zoom,
                pitch: 0.0,
                yaw: 0.0,
            },
        }
    }

    pub fn apply(&mut self, delta: &PoseDelta, cfg: &ControlConfig) {
        for digit in Digit::ALL {
            let i = digit.index();
            let angle = self.joints.get_mut(digit);
            if delta.flex[i] != 0.0 {
                *angle = (*angle + delta.flex[i]).clamp(cfg.joint_min, cfg.joint_max);
            }
            if delta.extend[i] != 0.0 {
                *angle = (*angle - delta.extend[i]).clamp(cfg.joint_min, cfg.joint_max);
            }
        }

        self.camera.yaw += delta.yaw;
        self.camera.pitch += delta.pitch;

        if delta.zoom != 0.0 {
            self.camera.zoom = (self.camera.zoom + delta.zoom).clamp(cfg.zoom_min, cfg.zoom_max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flex(digit: Digit, amount: f32) -> PoseDelta {
        let mut d = PoseDelta::default();
        d.flex[digit.index()] = amount;
        d
    }

    fn extend(digit: Digit, amount: f32) -> PoseDelta {
        let mut d = PoseDelta::default();
        d.extend[digit.index()] = amount;
        d
    }

    #[test]
    fn new_pose_is_open_hand() {
        let cfg = ControlConfig::default();
        let pose = HandPose::new(&cfg);
        assert_eq!(pose.joints, JointAngles::default());
        assert_eq!(pose.camera.zoom, -1.9);
    }

    #[test]
    fn digit_accessors_address_the_right_joint() {
        let mut j = JointAngles::default();
        *j.get_mut(Digit::Ring) = 12.0;
        *j.get_mut(Digit::Thumb) = 34.0;
        assert_eq!(j.fingers, [0.0, 0.0, 12.0, 0.0]);
        assert_eq!(j.get(Digit::Thumb), 34.0);
        assert_eq!(j.get(Digit::Ring), 12.0);
    }

    #[test]
    fn joints_are_clamped_both_ways() {
        let cfg = ControlConfig::default();
        let mut pose = HandPose::new(&cfg);

        pose.apply(&flex(Digit::Middle, 500.0), &cfg);
        assert_eq!(pose.joints.get(Digit::Middle), 90.0);

        pose.apply(&extend(Digit::Middle, 500.0), &cfg);
        assert_eq!(pose.joints.get(Digit::Middle), 0.0);
    }

    #[test]
    fn flex_is_clamped_before_extend() {
        let cfg = ControlConfig::default();
        let mut pose = HandPose::new(&cfg);
        *pose.joints.get_mut(Digit::Little) = 90.0;

        let mut both = flex(Digit::Little, 5.0);
        both.extend[Digit::Little.index()] = 5.0;
        pose.apply(&both, &cfg);
        assert_eq!(pose.joints.get(Digit::Little), 85.0);
    }

    #[test]
    fn camera_rotation_is_unbounded() {
        let cfg = ControlConfig::default();
        let mut pose = HandPose::new(&cfg);
        let delta = PoseDelta { yaw: 400.0, pitch: -400.0, ..PoseDelta::default() };
        pose.apply(&delta, &cfg);
        assert_eq!((pose.camera.yaw, pose.camera.pitch), (400.0, -400.0));
    }

    #[test]
    fn zero_delta_is_detected() {
        assert!(PoseDelta::default().is_zero());
        assert!(!flex(Digit::Index, 0.1).is_zero());
    }
}
