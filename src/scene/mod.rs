//! The scene graph: the ring of orbiting bodies, its animated rotation,
//! and the caption heading track.
//!
//! Built once at engine construction. All animated state (ring yaw,
//! heading offset) lives here as explicit tween queues owned by the
//! scene, advanced by the engine once per frame; the clock and the
//! renderers stay outside.

pub mod body;
pub mod headings;

use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::{Duration, Instant};

pub use body::{ring, OrbitingBody};
use glam::{Mat4, Quat, Vec3};
pub use headings::HeadingTrack;

use crate::animation::{EasingFunction, TweenQueue};
use crate::options::SceneOptions;

/// The ring of orbiting bodies and everything that animates it.
pub struct Scene {
    /// Bodies in ring order.
    pub bodies: Vec<OrbitingBody>,
    /// Fixed tilt of the ring around X, in radians.
    pub group_tilt_x: f32,
    /// Vertical offset of the ring.
    pub group_offset_y: f32,
    /// Continuous own-axis rotation speed, radians per second.
    pub spin_speed: f32,
    /// Animated ring rotation around Y.
    pub group_yaw: TweenQueue,
    /// Caption headings synchronized with the ring rotation.
    pub headings: HeadingTrack,
}

impl Scene {
    /// Build the ring from the configured treatments.
    #[must_use]
    pub fn new(options: &SceneOptions) -> Self {
        let bodies = ring(options);
        let headings = HeadingTrack::new(bodies.len());
        Self {
            bodies,
            group_tilt_x: options.group_tilt_x,
            group_offset_y: options.group_offset_y,
            spin_speed: options.spin_speed,
            group_yaw: TweenQueue::new(0.0),
            headings,
        }
    }

    /// React to an accepted step transition: queue the quarter-turn ring
    /// rotation and the matching heading slide.
    pub fn begin_step(
        &mut self,
        step: u8,
        duration: Duration,
        easing: EasingFunction,
    ) {
        self.group_yaw.push_by(FRAC_PI_2, duration, easing);
        self.headings.on_step(step, duration, easing);
    }

    /// Advance all scene tweens to `now`.
    pub fn advance(&mut self, now: Instant) {
        let _ = self.group_yaw.advance(now);
        let _ = self.headings.advance(now);
    }

    /// Own-axis rotation angle after `elapsed` seconds of wall time.
    #[must_use]
    pub fn spin_angle(&self, elapsed: f32) -> f32 {
        (self.spin_speed * elapsed) % TAU
    }

    /// Ring-to-world transform: vertical offset, fixed X tilt, then the
    /// animated Y rotation.
    #[must_use]
    pub fn group_transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.group_offset_y, 0.0))
            * Mat4::from_rotation_x(self.group_tilt_x)
            * Mat4::from_rotation_y(self.group_yaw.current())
    }

    /// Full model transform for one body: ring transform, ring position,
    /// own-axis spin, and body scale.
    #[must_use]
    pub fn body_transform(&self, body: &OrbitingBody, spin: f32) -> Mat4 {
        self.group_transform()
            * Mat4::from_scale_rotation_translation(
                Vec3::splat(body.radius),
                Quat::from_rotation_y(spin),
                body.position(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SceneOptions;

    #[test]
    fn spin_angle_is_speed_times_elapsed() {
        let scene = Scene::new(&SceneOptions::default());
        assert!((scene.spin_angle(10.0) - 0.2).abs() < 1e-6);
        assert!((scene.spin_angle(100.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn spin_angle_wraps_mod_tau() {
        let scene = Scene::new(&SceneOptions::default());
        // 0.02 rad/s · 1000 s = 20 rad = 3·τ + 1.150…
        let angle = scene.spin_angle(1000.0);
        assert!((0.0..TAU).contains(&angle));
        assert!((angle - (20.0 % TAU)).abs() < 1e-4);
    }

    #[test]
    fn spin_leaves_body_position_unchanged() {
        // Own-axis rotation must be independent of the orbit: the body's
        // world position only depends on the ring transform.
        let scene = Scene::new(&SceneOptions::default());
        let body = &scene.bodies[0];
        let p0 = scene
            .body_transform(body, 0.0)
            .transform_point3(Vec3::ZERO);
        let p1 = scene
            .body_transform(body, 1.3)
            .transform_point3(Vec3::ZERO);
        assert!((p0 - p1).length() < 1e-5);
    }

    #[test]
    fn quarter_turn_moves_body_one_slot() {
        let mut scene = Scene::new(&SceneOptions::default());
        let rest = scene
            .body_transform(&scene.bodies[0], 0.0)
            .transform_point3(Vec3::ZERO);
        // Where body 3 sits before any rotation
        let slot3_at_rest = scene
            .body_transform(&scene.bodies[3], 0.0)
            .transform_point3(Vec3::ZERO);

        // Drive the yaw queue to a finished quarter turn
        let now = Instant::now();
        scene.begin_step(1, Duration::ZERO, EasingFunction::Linear);
        scene.advance(now);

        let turned = scene
            .body_transform(&scene.bodies[0], 0.0)
            .transform_point3(Vec3::ZERO);

        // Body 0 now occupies the slot body 3 held at rest
        assert!((turned - slot3_at_rest).length() < 1e-4);
        assert!((rest - turned).length() > 1.0);
    }

    #[test]
    fn group_transform_applies_tilt_and_offset() {
        let scene = Scene::new(&SceneOptions::default());
        let origin = scene.group_transform().transform_point3(Vec3::ZERO);
        assert!((origin.y - -0.5).abs() < 1e-6);
        assert_eq!(origin.x, 0.0);
    }
}
