use glam::Mat4;

use mano_engine::math::Transform;

use crate::config::ProjectionConfig;
use crate::pose::CameraState;

/// World-to-view transform: fixed offset and zoom, then pitch, then yaw.
pub fn view_transform(camera: &CameraState, cfg: &ProjectionConfig) -> Transform {
    let (ox, oy) = cfg.view_offset;
    Transform::IDENTITY
        .translated(ox, oy, camera.zoom)
        .rotated_x_deg(camera.pitch)
        .rotated_y_deg(camera.yaw)
}

/// Right-handed perspective with a `[0, 1]` depth range.
pub fn projection(cfg: &ProjectionConfig, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(cfg.fov_y_deg.to_radians(), aspect.max(f32::EPSILON), cfg.near, cfg.far)
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;

    #[test]
    fn default_view_offsets_by_zoom() {
        let cam = CameraState { zoom: -1.9, pitch: 0.0, yaw: 0.0 };
        let view = view_transform(&cam, &ProjectionConfig::default());
        assert!((view.origin() - Vec3::new(0.0, -0.4, -1.9)).length() < 1e-6);
    }

    #[test]
    fn yaw_is_applied_after_pitch() {
        let cam = CameraState { zoom: -2.0, pitch: 90.0, yaw: 90.0 };
        let view = view_transform(&cam, &ProjectionConfig::default());
        // Ry(90) takes +X to -Z, then Rx(90) takes -Z to +Y.
        let v = view.transform_vector(Vec3::X);
        assert!((v - Vec3::Y).length() < 1e-5, "{v}");
    }

    #[test]
    fn projection_matches_unit_frustum_at_near_plane() {
        let aspect = 1200.0 / 800.0;
        let p = projection(&ProjectionConfig::default(), aspect);

        // Corner of the near plane of frustum(-aspect, aspect, -1, 1, 1, 10).
        let clip = p * Vec4::new(aspect, 1.0, -1.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!((ndc - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5, "{ndc}");

        let far = p * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }
}
