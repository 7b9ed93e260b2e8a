//! Timed interpolation of scalar properties.
//!
//! A [`Tween`] is the explicit state machine `{start, end, start_time,
//! duration, easing}` advanced each frame. A [`TweenQueue`] serializes
//! tweens on one property: a later tween starts from the earlier tween's
//! end value, so two tweens targeting the same property chain instead of
//! racing.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::easing::EasingFunction;

/// A single in-flight interpolation of one scalar property.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    /// Value at `start_time`.
    pub start: f32,
    /// Value once the tween completes.
    pub end: f32,
    /// When the tween began.
    pub start_time: Instant,
    /// Total duration.
    pub duration: Duration,
    /// Easing curve applied to normalized progress.
    pub easing: EasingFunction,
}

impl Tween {
    /// Create a tween starting now.
    #[must_use]
    pub fn new(
        start: f32,
        end: f32,
        start_time: Instant,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            start,
            end,
            start_time,
            duration,
            easing,
        }
    }

    /// Normalized progress in [0, 1] at `now`. Zero-duration tweens are
    /// complete immediately.
    #[inline]
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start_time);
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Interpolated value at `now`.
    #[inline]
    pub fn value(&self, now: Instant) -> f32 {
        let t = self.easing.evaluate(self.progress(now));
        self.start + (self.end - self.start) * t
    }

    /// Whether the tween has reached its end.
    #[inline]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// A tween waiting in a [`TweenQueue`]; its start value is resolved when
/// it is promoted.
#[derive(Debug, Clone, Copy)]
struct PendingTween {
    end: f32,
    duration: Duration,
    easing: EasingFunction,
}

/// Sequential tween queue for one scalar property.
///
/// At most one tween is active; further pushes wait behind it. The queue
/// guarantees every tween runs start-to-end, so a quarter-turn pushed
/// while the previous one is mid-flight is never lost, and a reset pushed
/// behind a move supersedes it rather than racing it.
#[derive(Debug)]
pub struct TweenQueue {
    current: f32,
    active: Option<Tween>,
    pending: VecDeque<PendingTween>,
}

impl TweenQueue {
    /// Create a queue resting at `initial`.
    #[must_use]
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            active: None,
            pending: VecDeque::new(),
        }
    }

    /// Enqueue a tween toward the absolute value `end`.
    pub fn push_to(
        &mut self,
        end: f32,
        duration: Duration,
        easing: EasingFunction,
    ) {
        self.pending.push_back(PendingTween {
            end,
            duration,
            easing,
        });
    }

    /// Enqueue a tween shifting the net target by `delta`.
    pub fn push_by(
        &mut self,
        delta: f32,
        duration: Duration,
        easing: EasingFunction,
    ) {
        let end = self.net_target() + delta;
        self.push_to(end, duration, easing);
    }

    /// The value the property will rest at once every queued tween has
    /// run: the last pending end, else the active end, else the current
    /// value.
    #[must_use]
    pub fn net_target(&self) -> f32 {
        self.pending
            .back()
            .map(|p| p.end)
            .or_else(|| self.active.map(|t| t.end))
            .unwrap_or(self.current)
    }

    /// Advance the queue to `now` and return the property's value.
    ///
    /// Finished tweens commit their end value and the next pending tween
    /// (if any) is promoted starting from it.
    pub fn advance(&mut self, now: Instant) -> f32 {
        loop {
            match self.active {
                Some(tween) if tween.is_finished(now) => {
                    self.current = tween.end;
                    self.active = None;
                }
                Some(tween) => {
                    self.current = tween.value(now);
                    return self.current;
                }
                None => match self.pending.pop_front() {
                    Some(p) => {
                        self.active = Some(Tween::new(
                            self.current,
                            p.end,
                            now,
                            p.duration,
                            p.easing,
                        ));
                    }
                    None => return self.current,
                },
            }
        }
    }

    /// Whether no tween is active or pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.pending.is_empty()
    }

    /// Current value without advancing time.
    #[must_use]
    pub fn current(&self) -> f32 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_tween_endpoints() {
        let start = Instant::now();
        let tween =
            Tween::new(0.0, 2.0, start, 100 * MS, EasingFunction::Linear);
        assert_eq!(tween.value(start), 0.0);
        assert_eq!(tween.value(start + 50 * MS), 1.0);
        assert_eq!(tween.value(start + 100 * MS), 2.0);
        // Past the end clamps to the end value
        assert_eq!(tween.value(start + 500 * MS), 2.0);
        assert!(tween.is_finished(start + 100 * MS));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let start = Instant::now();
        let tween = Tween::new(
            1.0,
            5.0,
            start,
            Duration::ZERO,
            EasingFunction::Linear,
        );
        assert!(tween.is_finished(start));
        assert_eq!(tween.value(start), 5.0);
    }

    #[test]
    fn test_queue_idle_holds_value() {
        let mut q = TweenQueue::new(3.0);
        assert!(q.is_idle());
        assert_eq!(q.advance(Instant::now()), 3.0);
        assert_eq!(q.net_target(), 3.0);
    }

    #[test]
    fn test_queue_runs_single_tween() {
        let now = Instant::now();
        let mut q = TweenQueue::new(0.0);
        q.push_to(1.0, 100 * MS, EasingFunction::Linear);

        assert_eq!(q.advance(now), 0.0);
        let mid = q.advance(now + 50 * MS);
        assert!((mid - 0.5).abs() < 1e-6);
        assert_eq!(q.advance(now + 100 * MS), 1.0);
        assert!(q.is_idle());
    }

    #[test]
    fn test_queue_chains_sequentially() {
        let now = Instant::now();
        let mut q = TweenQueue::new(0.0);
        q.push_by(-1.0, 100 * MS, EasingFunction::Linear);
        q.push_by(-1.0, 100 * MS, EasingFunction::Linear);

        assert_eq!(q.net_target(), -2.0);

        // First tween starts at the first advance
        assert_eq!(q.advance(now), 0.0);
        let v = q.advance(now + 50 * MS);
        assert!((v - -0.5).abs() < 1e-6);

        // First finishes here; the second is promoted from -1
        assert_eq!(q.advance(now + 100 * MS), -1.0);
        let v = q.advance(now + 150 * MS);
        assert!((v - -1.5).abs() < 1e-6);

        assert_eq!(q.advance(now + 200 * MS), -2.0);
        assert!(q.is_idle());
    }

    #[test]
    fn test_push_by_accumulates_against_pending() {
        let mut q = TweenQueue::new(0.0);
        for _ in 0..4 {
            q.push_by(-1.0, 100 * MS, EasingFunction::Linear);
        }
        // Four relative pushes net to -4 even though none has run yet
        assert_eq!(q.net_target(), -4.0);
    }

    #[test]
    fn test_reset_supersedes_pending_move() {
        // A move followed by a queued reset must land on the reset value,
        // not fight over the property.
        let now = Instant::now();
        let mut q = TweenQueue::new(-3.0);
        q.push_by(-1.0, 100 * MS, EasingFunction::Linear);
        q.push_to(0.0, 100 * MS, EasingFunction::Linear);

        assert_eq!(q.net_target(), 0.0);

        assert_eq!(q.advance(now), -3.0);
        // Move completes and hands off to the reset
        assert_eq!(q.advance(now + 100 * MS), -4.0);
        assert_eq!(q.advance(now + 200 * MS), 0.0);
        assert!(q.is_idle());
    }
}
