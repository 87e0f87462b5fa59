//! Robotic hand exoskeleton viewer.
//!
//! The per-frame pipeline is: held keys → [`controls::pose_delta`] →
//! [`pose::HandPose::apply`] → [`hand::draw_hand`] → cube renderer.
//! Everything except [`app`] is plain data and pure functions.

pub mod app;
pub mod camera;
pub mod config;
pub mod controls;
pub mod hand;
pub mod pose;

pub use app::HandApp;
pub use config::HandConfig;
