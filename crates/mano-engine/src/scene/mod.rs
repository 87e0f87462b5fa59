//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic cube draw commands for one frame
//! - expose the two primitive operations (lit/textured and unlit cube)
//!
//! Nothing here is retained across frames; callers clear and refill the list.

mod cmd;
mod list;

pub use cmd::{CubeCmd, CubeStyle};
pub use list::DrawList;
