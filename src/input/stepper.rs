use std::time::{Duration, Instant};

/// Minimum gap between accepted wheel events.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1500);

/// Number of discrete steps before the counter wraps.
const STEP_COUNT: u8 = 4;

/// Debounced cyclic step counter for wheel events.
///
/// A wheel event is accepted only if at least the debounce window has
/// elapsed since the last accepted event; events inside the window are
/// dropped, not queued. The step counter stays in `[0, 3]` and wraps to 0
/// after 3.
pub struct ScrollStepper {
    last_accepted: Option<Instant>,
    step: u8,
    window: Duration,
}

impl ScrollStepper {
    /// Create a stepper at step 0 with no prior event, using the default
    /// 1500 ms debounce window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW)
    }

    /// Create a stepper with a custom debounce window.
    #[must_use]
    pub fn with_window(window: Duration) -> Self {
        Self {
            last_accepted: None,
            step: 0,
            window,
        }
    }

    /// Process a wheel event observed at `now`.
    ///
    /// Returns the new step if the event was accepted, or `None` if it
    /// fell inside the debounce window. The first event is always
    /// accepted.
    pub fn on_wheel(&mut self, now: Instant) -> Option<u8> {
        if let Some(last) = self.last_accepted {
            if now.saturating_duration_since(last) < self.window {
                return None;
            }
        }
        self.last_accepted = Some(now);
        self.step = (self.step + 1) % STEP_COUNT;
        Some(self.step)
    }

    /// Current step, in `[0, 3]`.
    #[must_use]
    pub fn step(&self) -> u8 {
        self.step
    }
}

impl Default for ScrollStepper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_accepted() {
        let mut stepper = ScrollStepper::new();
        let now = Instant::now();
        assert_eq!(stepper.on_wheel(now), Some(1));
    }

    #[test]
    fn test_events_inside_window_dropped() {
        // Two wheel events 500ms apart produce exactly one transition
        let mut stepper = ScrollStepper::new();
        let now = Instant::now();
        assert_eq!(stepper.on_wheel(now), Some(1));
        assert_eq!(
            stepper.on_wheel(now + Duration::from_millis(500)),
            None
        );
        assert_eq!(stepper.step(), 1);
    }

    #[test]
    fn test_events_outside_window_accepted() {
        // Two wheel events 1600ms apart produce two transitions
        let mut stepper = ScrollStepper::new();
        let now = Instant::now();
        assert_eq!(stepper.on_wheel(now), Some(1));
        assert_eq!(
            stepper.on_wheel(now + Duration::from_millis(1600)),
            Some(2)
        );
    }

    #[test]
    fn test_exact_window_boundary_accepted() {
        let mut stepper = ScrollStepper::new();
        let now = Instant::now();
        assert_eq!(stepper.on_wheel(now), Some(1));
        assert_eq!(
            stepper.on_wheel(now + Duration::from_millis(1500)),
            Some(2)
        );
    }

    #[test]
    fn test_step_counter_wraps_mod_4() {
        // Five accepted events yield 1, 2, 3, 0, 1
        let mut stepper = ScrollStepper::new();
        let mut now = Instant::now();
        let mut steps = Vec::new();
        for _ in 0..5 {
            if let Some(step) = stepper.on_wheel(now) {
                steps.push(step);
            }
            now += Duration::from_millis(1600);
        }
        assert_eq!(steps, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_dropped_events_do_not_reset_window() {
        // A rejected event must not push the window forward
        let mut stepper =
            ScrollStepper::with_window(Duration::from_millis(1000));
        let now = Instant::now();
        assert_eq!(stepper.on_wheel(now), Some(1));
        assert_eq!(
            stepper.on_wheel(now + Duration::from_millis(900)),
            None
        );
        // 1000ms after the *accepted* event, not the rejected one
        assert_eq!(
            stepper.on_wheel(now + Duration::from_millis(1000)),
            Some(2)
        );
    }
}
