use std::path::PathBuf;

use glam::Vec3;
use winit::dpi::LogicalSize;

use mano_engine::device::GpuInit;
use mano_engine::paint::Color;
use mano_engine::render::Material;
use mano_engine::window::RuntimeConfig;

// ── hand geometry ─────────────────────────────────────────────────────────

/// Skin-toned fill of the finger segments and the palm.
pub const FLESH: Color = Color::rgb(0.9, 0.7, 0.5);

/// Tint applied to the textured exoskeleton shells.
pub const SHELL: Color = Color::WHITE;

/// Offset of the whole hand from the view origin.
pub const HAND_OFFSET: Vec3 = Vec3::new(0.0, -0.2, 0.0);

pub const PALM_SIZE: Vec3 = Vec3::new(0.9, 0.8, 0.2);
pub const PALM_SHELL_SIZE: Vec3 = Vec3::new(0.95, 0.8, 0.1);

/// Shells sit behind the part they cover (towards -Z).
pub const SHELL_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -0.1);

/// Height above the palm center where finger roots attach.
pub const FINGER_ROOT_Y: f32 = 0.6;

/// Finger segment cross-section (X and Z extents).
pub const SEGMENT_WIDTH: f32 = 0.1;

/// Shell cross-section; its length is the segment length plus `SHELL_OVERHANG`.
pub const SHELL_WIDTH: f32 = 0.12;
pub const SHELL_DEPTH: f32 = 0.1;
pub const SHELL_OVERHANG: f32 = 0.05;

/// Extra placement applied before a digit's root, used by the thumb.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Socket {
    pub offset: Vec3,
    /// Rotation about Z, degrees.
    pub twist_deg: f32,
}

/// Static description of one digit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FingerDescriptor {
    /// Horizontal offset of the root on the palm.
    pub x_offset: f32,
    pub segments: usize,
    pub segment_length: f32,
    pub socket: Option<Socket>,
}

const FINGER_SPACING: f32 = 0.3;

const fn finger(i: usize, segment_length: f32) -> FingerDescriptor {
    FingerDescriptor {
        x_offset: (i as f32 - 1.5) * FINGER_SPACING,
        segments: 3,
        segment_length,
        socket: None,
    }
}

/// Index, middle, ring and little finger, left to right.
pub const FINGERS: [FingerDescriptor; 4] = [
    finger(0, 0.30),
    finger(1, 0.35),
    finger(2, 0.32),
    finger(3, 0.28),
];

pub const THUMB: FingerDescriptor = FingerDescriptor {
    x_offset: 0.0,
    segments: 2,
    segment_length: 0.25,
    socket: Some(Socket {
        offset: Vec3::new(-0.4, 0.0, 0.1),
        twist_deg: 20.0,
    }),
};

// ── runtime configuration ─────────────────────────────────────────────────

/// Keyboard and mouse response.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlConfig {
    /// Camera yaw/pitch change per frame while an arrow key is held, degrees.
    pub rotation_step: f32,
    /// Joint angle change per frame while a flex/extend combination is held, degrees.
    pub flex_step: f32,
    pub joint_min: f32,
    pub joint_max: f32,
    /// Zoom change per scrolled line.
    pub zoom_sensitivity: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub initial_zoom: f32,
    /// Touchpad pixels that count as one scrolled line.
    pub pixels_per_line: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            rotation_step: 0.1,
            flex_step: 0.1,
            joint_min: 0.0,
            joint_max: 90.0,
            zoom_sensitivity: 0.1,
            zoom_min: -10.0,
            zoom_max: -1.0,
            initial_zoom: -1.9,
            pixels_per_line: 20.0,
        }
    }
}

/// Perspective parameters and the fixed camera offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Vertical field of view, degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Camera offset applied before zoom and orbit; only X and Y are used.
    pub view_offset: (f32, f32),
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 90.0,
            near: 1.0,
            far: 10.0,
            view_offset: (0.0, -0.4),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct HandConfig {
    pub window: RuntimeConfig,
    pub gpu: GpuInit,
    /// Exoskeleton texture, relative to the working directory.
    pub texture_path: PathBuf,
    pub clear_color: Color,
    pub material: Material,
    pub controls: ControlConfig,
    pub projection: ProjectionConfig,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            window: RuntimeConfig {
                title: "Simulación de ManoRobótica para Rehabilitación".to_string(),
                initial_size: LogicalSize::new(1200.0, 800.0),
            },
            // Colors are authored as plain 0..1 RGB.
            gpu: GpuInit {
                prefer_srgb: false,
                ..GpuInit::default()
            },
            texture_path: PathBuf::from("texturaCromo.jpg"),
            clear_color: Color::rgb(0.96, 0.96, 0.86),
            material: Material::default(),
            controls: ControlConfig::default(),
            projection: ProjectionConfig::default(),
        }
    }
}
