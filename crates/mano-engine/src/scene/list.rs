use glam::Vec3;

use crate::math::Transform;
use crate::paint::Color;

use super::{CubeCmd, CubeStyle};

/// Recorded cube draws for a frame, in submission order.
///
/// The renderer depth-tests every cube, so order does not affect the image.
/// `clear()` keeps capacity for reuse across frames.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<CubeCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn items(&self) -> &[CubeCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: CubeCmd) {
        self.items.push(cmd);
    }

    /// Records a lit cube. `textured` selects the bound texture instead of a flat fill.
    pub fn push_lit_cube(
        &mut self,
        transform: Transform,
        color: Color,
        scale: Vec3,
        textured: bool,
    ) {
        self.push(CubeCmd {
            transform,
            scale,
            color,
            style: CubeStyle::Lit { textured },
        });
    }

    /// Records a flat-colored cube that ignores lighting.
    pub fn push_unlit_cube(&mut self, transform: Transform, color: Color, scale: Vec3) {
        self.push(CubeCmd {
            transform,
            scale,
            color,
            style: CubeStyle::Unlit,
        });
    }
}
