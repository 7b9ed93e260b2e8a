use serde::{Deserialize, Serialize};

/// Visual treatment for one orbiting body: a texture path and the flat
/// tint used while the texture is loading or if the load fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyOptions {
    /// Display name, used in logs.
    pub name: String,
    /// Relative path to an equirectangular surface texture.
    pub texture: String,
    /// Fallback/base tint (linear RGB).
    pub tint: [f32; 3],
}

impl BodyOptions {
    fn new(name: &str, texture: &str, tint: [f32; 3]) -> Self {
        Self {
            name: name.to_owned(),
            texture: texture.to_owned(),
            tint,
        }
    }
}

/// Ring layout and body treatments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneOptions {
    /// Radius of each body.
    pub body_radius: f32,
    /// Radius of the circle the bodies sit on.
    pub orbit_radius: f32,
    /// Fixed tilt of the ring around X, in radians.
    pub group_tilt_x: f32,
    /// Vertical offset of the ring.
    pub group_offset_y: f32,
    /// Continuous own-axis rotation speed, in radians per second.
    pub spin_speed: f32,
    /// One treatment per body; the ring size follows this list.
    pub bodies: Vec<BodyOptions>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            body_radius: 1.2,
            orbit_radius: 4.0,
            group_tilt_x: 0.18,
            group_offset_y: -0.5,
            spin_speed: 0.02,
            bodies: vec![
                BodyOptions::new(
                    "jupiter",
                    "assets/jupiter/color.png",
                    [0.76, 0.64, 0.51],
                ),
                BodyOptions::new(
                    "earth",
                    "assets/earth/map.jpg",
                    [0.23, 0.41, 0.65],
                ),
                BodyOptions::new(
                    "venus",
                    "assets/venus/map.jpg",
                    [0.80, 0.66, 0.42],
                ),
                BodyOptions::new(
                    "neptune",
                    "assets/neptune/color.png",
                    [0.25, 0.35, 0.80],
                ),
            ],
        }
    }
}
