//! Input handling: platform-agnostic event types and the debounced
//! scroll stepper that drives the ring rotation.

/// Platform-agnostic input events.
pub mod event;
/// Debounced cyclic step counter for wheel events.
pub mod stepper;

pub use event::{InputEvent, MouseButton};
pub use stepper::ScrollStepper;
