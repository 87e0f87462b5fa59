//! 3D transform math.
//!
//! Scene code composes immutable [`Transform`] values parent-to-child instead
//! of mutating a shared matrix stack.

mod transform;

pub use transform::Transform;
