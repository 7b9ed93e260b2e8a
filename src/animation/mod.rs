//! Explicit per-property animation: easing curves and sequential tween
//! queues advanced once per frame.

pub mod easing;
pub mod tween;

pub use easing::EasingFunction;
pub use tween::{Tween, TweenQueue};
