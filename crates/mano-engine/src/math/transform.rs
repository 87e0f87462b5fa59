use glam::{Mat4, Vec3};

/// Rigid local-to-parent transform (rotation + translation).
///
/// Each builder call post-multiplies, so `t.translated(..).rotated_x_deg(..)`
/// reads in the same order as nested modelling steps: the translation is
/// applied in `t`'s frame, the rotation in the translated frame.
///
/// Scale is deliberately not part of this type. Primitives carry their own
/// extents, so normals can be transformed by the upper 3x3 directly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform(Mat4);

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform(Mat4::IDENTITY);

    #[inline]
    pub fn translated(self, x: f32, y: f32, z: f32) -> Self {
        Self(self.0 * Mat4::from_translation(Vec3::new(x, y, z)))
    }

    #[inline]
    pub fn translated_by(self, v: Vec3) -> Self {
        Self(self.0 * Mat4::from_translation(v))
    }

    #[inline]
    pub fn rotated_x_deg(self, degrees: f32) -> Self {
        Self(self.0 * Mat4::from_rotation_x(degrees.to_radians()))
    }

    #[inline]
    pub fn rotated_y_deg(self, degrees: f32) -> Self {
        Self(self.0 * Mat4::from_rotation_y(degrees.to_radians()))
    }

    #[inline]
    pub fn rotated_z_deg(self, degrees: f32) -> Self {
        Self(self.0 * Mat4::from_rotation_z(degrees.to_radians()))
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.0
    }

    /// Position of the local origin in the parent space.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.0.w_axis.truncate()
    }

    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.0.transform_point3(p)
    }

    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.0.transform_vector3(v)
    }

    #[inline]
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.0.to_cols_array_2d()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn translation_then_rotation_rotates_in_translated_frame() {
        let t = Transform::IDENTITY.translated(1.0, 0.0, 0.0).rotated_z_deg(90.0);
        // Local +X maps to parent +Y, origin stays at (1, 0, 0).
        assert!(approx(t.origin(), Vec3::new(1.0, 0.0, 0.0)));
        assert!(approx(t.transform_point(Vec3::X), Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn rotation_then_translation_moves_along_rotated_axis() {
        let t = Transform::IDENTITY.rotated_x_deg(90.0).translated(0.0, 1.0, 0.0);
        // Positive rotation about X carries +Y onto +Z.
        assert!(approx(t.origin(), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn repeated_rotations_accumulate() {
        let once = Transform::IDENTITY.rotated_x_deg(60.0);
        let split = Transform::IDENTITY.rotated_x_deg(20.0).rotated_x_deg(40.0);
        assert!(approx(once.transform_vector(Vec3::Y), split.transform_vector(Vec3::Y)));
    }

    #[test]
    fn vectors_ignore_translation() {
        let t = Transform::IDENTITY.translated(5.0, 5.0, 5.0);
        assert!(approx(t.transform_vector(Vec3::Z), Vec3::Z));
    }
}
