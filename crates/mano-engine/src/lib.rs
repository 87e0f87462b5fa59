//! Mano engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the hand viewer: window loop,
//! device/surface management, input tracking, transforms and the cube renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod math;
pub mod paint;
pub mod render;
pub mod scene;
