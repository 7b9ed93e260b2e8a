//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (ring layout, camera, interaction mode,
//! background) are consolidated here. Options serialize to/from TOML for
//! presets; every sub-struct uses `#[serde(default)]` so a partial file
//! that only overrides one section works.

mod background;
mod camera;
mod interaction;
mod scene;

use std::path::Path;

pub use background::{BackgroundMode, BackgroundOptions};
pub use camera::CameraOptions;
pub use interaction::{InteractionMode, InteractionOptions};
pub use scene::{BodyOptions, SceneOptions};
use serde::{Deserialize, Serialize};

use crate::error::OrreryError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Ring layout and body treatments.
    pub scene: SceneOptions,
    /// Camera projection and orbit parameters.
    pub camera: CameraOptions,
    /// Interaction variant and step timing.
    pub interaction: InteractionOptions,
    /// Background treatment and environment map source.
    pub background: BackgroundOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OrreryError> {
        let content = std::fs::read_to_string(path).map_err(OrreryError::Io)?;
        toml::from_str(&content)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), OrreryError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrreryError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrreryError::Io)?;
        }
        std::fs::write(path, content).map_err(OrreryError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[scene]
orbit_radius = 6.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.scene.orbit_radius, 6.0);
        // Everything else should be default
        assert_eq!(opts.scene.body_radius, 1.2);
        assert_eq!(opts.camera.fovy, 27.0);
        assert_eq!(opts.interaction.mode, InteractionMode::ScrollStepper);
        assert_eq!(opts.background.mode, BackgroundMode::Starfield);
    }

    #[test]
    fn defaults_match_the_demo_constants() {
        let opts = Options::default();
        assert_eq!(opts.scene.bodies.len(), 4);
        assert_eq!(opts.scene.orbit_radius, 4.0);
        assert_eq!(opts.scene.group_tilt_x, 0.18);
        assert_eq!(opts.scene.group_offset_y, -0.5);
        assert_eq!(opts.scene.spin_speed, 0.02);
        assert_eq!(opts.interaction.debounce_ms, 1500);
        assert_eq!(opts.interaction.step_duration_ms, 2000);
        assert_eq!(opts.background.opacity, 0.75);
        assert_eq!(opts.background.radius, 30.0);
    }

    #[test]
    fn interaction_mode_parses_snake_case() {
        let toml_str = r#"
[interaction]
mode = "orbit"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.interaction.mode, InteractionMode::Orbit);
    }
}
