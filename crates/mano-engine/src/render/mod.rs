//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - geometry arrives in view space (camera at origin looking down -Z)
//! - projection and lighting parameters are uploaded per pass as a uniform

mod ctx;
pub mod cube;
pub mod material;
pub mod texture;

pub use ctx::{RenderCtx, RenderTarget};
pub use cube::CubeRenderer;
pub use material::Material;
pub use texture::{Texture, TextureError, TextureImage};
