//! Easing functions for animation interpolation.
//!
//! Provides the easing curves used by the step tweens. All functions are
//! cheap enough to evaluate every frame for every active tween.

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quartic ease-in-out (slow start, fast middle, slow end).
    /// Formula: 8t⁴ for t < ½, 1 − 8(1−t)⁴ otherwise.
    QuarticInOut,
}

impl EasingFunction {
    /// Default easing function: QuarticInOut, the curve the step tweens use.
    pub const DEFAULT: EasingFunction = EasingFunction::QuarticInOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    pub fn evaluate(&self, t: f32) -> f32 {
        // Clamp input to [0, 1]
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::QuarticInOut => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    let omt = 1.0 - t;
                    1.0 - 8.0 * omt * omt * omt * omt
                }
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_quartic_endpoints() {
        let quartic = EasingFunction::QuarticInOut;
        assert_eq!(quartic.evaluate(0.0), 0.0);
        assert_eq!(quartic.evaluate(0.5), 0.5);
        assert!((quartic.evaluate(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_quartic_is_symmetric() {
        // In-out curves satisfy f(t) = 1 - f(1-t)
        let quartic = EasingFunction::QuarticInOut;
        for t in [0.1, 0.25, 0.4, 0.6, 0.9] {
            let a = quartic.evaluate(t);
            let b = 1.0 - quartic.evaluate(1.0 - t);
            assert!(
                (a - b).abs() < 1e-6,
                "asymmetric at t={t}: {a} vs {b}"
            );
        }
    }

    #[test]
    fn test_quartic_slow_start() {
        // Ease-in-out should lag linear early on
        let quartic = EasingFunction::QuarticInOut;
        let result_at_quarter = quartic.evaluate(0.25);
        assert!(
            result_at_quarter < 0.25,
            "Ease-in-out should have value < 0.25 at t=0.25, got {}",
            result_at_quarter
        );
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;

        // Test negative input clamps to 0
        assert_eq!(linear.evaluate(-0.5), 0.0);

        // Test input > 1 clamps to 1
        assert_eq!(linear.evaluate(1.5), 1.0);

        // Also test with the default easing
        let quartic = EasingFunction::QuarticInOut;
        assert_eq!(quartic.evaluate(-0.5), 0.0);
        assert!((quartic.evaluate(1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_quadratic_in() {
        let quad_in = EasingFunction::QuadraticIn;
        assert_eq!(quad_in.evaluate(0.0), 0.0);
        assert_eq!(quad_in.evaluate(0.5), 0.25); // 0.5² = 0.25
        assert_eq!(quad_in.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_quadratic_out() {
        let quad_out = EasingFunction::QuadraticOut;
        assert_eq!(quad_out.evaluate(0.0), 0.0);
        assert_eq!(quad_out.evaluate(0.5), 0.75); // 1 - (1-0.5)² = 0.75
        assert_eq!(quad_out.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_default_is_quartic() {
        let default_easing = EasingFunction::default();
        assert_eq!(default_easing, EasingFunction::DEFAULT);
        assert_eq!(default_easing, EasingFunction::QuarticInOut);
    }
}
