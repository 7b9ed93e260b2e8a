use serde::{Deserialize, Serialize};

/// Camera projection and orbit parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Initial eye distance from the scene center.
    pub distance: f32,
    /// Rotation sensitivity multiplier (orbit mode).
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier (orbit mode).
    pub zoom_speed: f32,
    /// Exponential damping rate for orbit smoothing, per second. Higher
    /// values settle faster.
    pub damping: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 27.0,
            znear: 0.1,
            zfar: 100.0,
            distance: 8.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            damping: 8.0,
        }
    }
}
