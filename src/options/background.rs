use serde::{Deserialize, Serialize};

/// Background treatment behind the ring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    /// Large inward-facing textured sphere with partial transparency.
    #[default]
    Starfield,
    /// Flat clear color only.
    Flat,
    /// Show the HDR environment map as the sky once it loads.
    Environment,
}

/// Background treatment and environment map source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackgroundOptions {
    /// Active background treatment.
    pub mode: BackgroundMode,
    /// Relative path to the star sphere texture. When missing, a
    /// procedurally generated star image substitutes.
    pub star_texture: String,
    /// Star sphere opacity over the clear color.
    pub opacity: f32,
    /// Star sphere radius.
    pub radius: f32,
    /// Clear color (linear RGB), also the flat background.
    pub clear_color: [f32; 3],
    /// Remote URL of the equirectangular `.hdr` environment map. An empty
    /// string disables the fetch.
    pub environment_url: String,
}

impl Default for BackgroundOptions {
    fn default() -> Self {
        Self {
            mode: BackgroundMode::Starfield,
            star_texture: "assets/stars.jpg".to_owned(),
            opacity: 0.75,
            radius: 30.0,
            clear_color: [0.004, 0.004, 0.012],
            environment_url:
                "https://dl.polyhaven.org/file/ph-assets/HDRIs/hdr/2k/rogland_clear_night_2k.hdr"
                    .to_owned(),
        }
    }
}
