//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) and its depth buffer
//! - acquiring frames and providing encoders/views for rendering

mod depth;
mod gpu;

pub use depth::DepthBuffer;
pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
