//! Perspective camera and the damped orbit controller that owns its GPU
//! uniform.

pub mod controller;
pub mod core;

pub use controller::CameraController;
pub use core::{Camera, CameraUniform};
