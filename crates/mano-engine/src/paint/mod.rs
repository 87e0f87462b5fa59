//! Paint model shared between the scene and renderers.
//!
//! The viewer draws opaque geometry only, so a single color type covers it.

pub mod color;

pub use color::Color;
