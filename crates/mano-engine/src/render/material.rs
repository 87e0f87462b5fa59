use glam::Vec3;

/// Lighting parameters for lit cubes.
///
/// One directional light plus a global ambient term. The light direction is
/// given in view space, so the light stays fixed relative to the camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    /// Direction *towards* the light, view space. Need not be normalized.
    pub light_dir: Vec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [0.3, 0.3, 0.3],
            diffuse: [0.6, 0.6, 0.6],
            light_dir: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}
