use glam::Vec3;

use crate::math::Transform;
use crate::paint::Color;

/// Shading model of a cube draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CubeStyle {
    /// Ambient + diffuse lighting. `textured` samples the bound texture,
    /// modulated by the command color; otherwise the color is used as-is.
    Lit { textured: bool },
    /// Flat color, no lighting.
    Unlit,
}

impl CubeStyle {
    #[inline]
    pub fn is_lit(self) -> bool {
        matches!(self, CubeStyle::Lit { .. })
    }

    #[inline]
    pub fn is_textured(self) -> bool {
        matches!(self, CubeStyle::Lit { textured: true })
    }
}

/// One unit cube (extents ±0.5) scaled by `scale` and placed by `transform`.
///
/// `transform` is the full model-view transform of the cube center; the scale
/// is applied in the cube's local frame before it.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeCmd {
    pub transform: Transform,
    pub scale: Vec3,
    pub color: Color,
    pub style: CubeStyle,
}
