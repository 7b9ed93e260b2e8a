use serde::{Deserialize, Serialize};

/// Which interaction variant drives the scene.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Discrete scroll-stepper: each accepted wheel event rotates the
    /// ring a quarter turn and slides the headings.
    #[default]
    ScrollStepper,
    /// Continuous damped orbit/zoom around the ring.
    Orbit,
}

/// Interaction variant and step timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionOptions {
    /// Active interaction variant.
    pub mode: InteractionMode,
    /// Debounce window between accepted wheel events, in milliseconds.
    pub debounce_ms: u64,
    /// Duration of the step rotation/heading tweens, in milliseconds.
    pub step_duration_ms: u64,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            mode: InteractionMode::ScrollStepper,
            debounce_ms: 1500,
            step_duration_ms: 2000,
        }
    }
}
