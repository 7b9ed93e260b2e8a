//! Caption heading state and scroll-driven transitions.

use std::time::{Duration, Instant};

use crate::animation::{EasingFunction, TweenQueue};

/// Vertical offset of the caption headings, measured in viewport heights.
///
/// At rest the first heading fills the viewport at offset 0. Each
/// accepted step slides the whole track up by one viewport height; when
/// the cycle wraps back to step 0 a reset tween back to offset 0 is
/// queued *behind* the regular move, so the reset supersedes the move
/// instead of racing it.
pub struct HeadingTrack {
    count: usize,
    offset: TweenQueue,
}

impl HeadingTrack {
    /// Create a track of `count` headings resting at offset 0.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            offset: TweenQueue::new(0.0),
        }
    }

    /// Number of headings on the track.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// React to an accepted step transition to `step`.
    ///
    /// Queues the regular one-viewport shift, and on wrap-to-zero chains
    /// the correction tween returning the track to its original position.
    pub fn on_step(
        &mut self,
        step: u8,
        duration: Duration,
        easing: EasingFunction,
    ) {
        self.offset.push_by(-1.0, duration, easing);
        if step == 0 {
            self.offset.push_to(0.0, duration, easing);
        }
    }

    /// Advance the tweens and return the current offset.
    pub fn advance(&mut self, now: Instant) -> f32 {
        self.offset.advance(now)
    }

    /// Current offset without advancing time.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset.current()
    }

    /// The offset the track will rest at once all queued tweens finish.
    #[must_use]
    pub fn net_target(&self) -> f32 {
        self.offset.net_target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(2000);

    #[test]
    fn each_step_shifts_one_viewport() {
        let mut track = HeadingTrack::new(4);
        track.on_step(1, STEP, EasingFunction::DEFAULT);
        assert_eq!(track.net_target(), -1.0);
        track.on_step(2, STEP, EasingFunction::DEFAULT);
        assert_eq!(track.net_target(), -2.0);
        track.on_step(3, STEP, EasingFunction::DEFAULT);
        assert_eq!(track.net_target(), -3.0);
    }

    #[test]
    fn wrap_to_zero_resets_not_accumulates() {
        // After the 4th accepted event the net target must be 0, not -4
        let mut track = HeadingTrack::new(4);
        for step in [1, 2, 3, 0] {
            track.on_step(step, STEP, EasingFunction::DEFAULT);
        }
        assert_eq!(track.net_target(), 0.0);
    }

    #[test]
    fn reset_chains_after_the_regular_move() {
        // The wrap transition runs the regular -1 shift first, then the
        // reset; halfway through the first tween the offset is heading
        // toward -4, not jumping straight to 0.
        let now = Instant::now();
        let mut track = HeadingTrack::new(4);
        for step in [1, 2, 3] {
            track.on_step(step, Duration::ZERO, EasingFunction::Linear);
        }
        let _ = track.advance(now);
        assert_eq!(track.offset(), -3.0);

        track.on_step(0, STEP, EasingFunction::Linear);
        let _ = track.advance(now);
        let mid = track.advance(now + STEP / 2);
        assert!(
            mid < -3.0 && mid > -4.0,
            "expected move toward -4 first, got {mid}"
        );

        // The regular move completes at -4, then the reset takes over
        let at_move_end = track.advance(now + STEP);
        assert_eq!(at_move_end, -4.0);
        let done = track.advance(now + 2 * STEP);
        assert_eq!(done, 0.0);
    }

    #[test]
    fn full_cycle_lands_back_at_rest() {
        let now = Instant::now();
        let mut track = HeadingTrack::new(4);
        for step in [1, 2, 3, 0] {
            track.on_step(step, Duration::ZERO, EasingFunction::Linear);
        }
        assert_eq!(track.advance(now), 0.0);
    }
}