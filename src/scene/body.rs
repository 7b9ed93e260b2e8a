//! Orbiting body state and its per-frame transform.

use std::f32::consts::PI;

use glam::Vec3;

use crate::options::{BodyOptions, SceneOptions};

/// One body on the ring. Position is fixed at construction; only the
/// ring's own rotation and the body's own-axis spin animate.
pub struct OrbitingBody {
    /// Index on the ring, counterclockwise from +X.
    pub index: usize,
    /// Angular position in radians (`index · 2π / count`).
    pub angle: f32,
    /// Radius of the circle the body sits on.
    pub orbit_radius: f32,
    /// Body radius.
    pub radius: f32,
    /// Fallback/base tint (linear RGB).
    pub tint: [f32; 3],
    /// Relative path to the surface texture.
    pub texture_path: String,
    /// Display name, used in logs.
    pub name: String,
}

impl OrbitingBody {
    /// Position on the ring in group-local space (the XZ plane).
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.orbit_radius * self.angle.cos(),
            0.0,
            self.orbit_radius * self.angle.sin(),
        )
    }
}

/// Place one body per configured treatment, evenly spaced on the ring.
#[must_use]
pub fn ring(options: &SceneOptions) -> Vec<OrbitingBody> {
    let count = options.bodies.len().max(1);
    options
        .bodies
        .iter()
        .enumerate()
        .map(|(index, body): (usize, &BodyOptions)| OrbitingBody {
            index,
            angle: index as f32 * (2.0 * PI / count as f32),
            orbit_radius: options.orbit_radius,
            radius: options.body_radius,
            tint: body.tint,
            texture_path: body.texture.clone(),
            name: body.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SceneOptions;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert!(
            (a - b).length() < 1e-5,
            "expected {b:?}, got {a:?}"
        );
    }

    #[test]
    fn four_bodies_sit_on_the_axes() {
        let bodies = ring(&SceneOptions::default());
        assert_eq!(bodies.len(), 4);
        assert_vec3_eq(bodies[0].position(), Vec3::new(4.0, 0.0, 0.0));
        assert_vec3_eq(bodies[1].position(), Vec3::new(0.0, 0.0, 4.0));
        assert_vec3_eq(bodies[2].position(), Vec3::new(-4.0, 0.0, 0.0));
        assert_vec3_eq(bodies[3].position(), Vec3::new(0.0, 0.0, -4.0));
    }

    #[test]
    fn angles_step_by_quarter_turn() {
        let bodies = ring(&SceneOptions::default());
        for (i, body) in bodies.iter().enumerate() {
            assert!(
                (body.angle - i as f32 * PI / 2.0).abs() < 1e-6,
                "body {i} angle {}",
                body.angle
            );
        }
    }

    #[test]
    fn ring_radius_follows_options() {
        let options = SceneOptions {
            orbit_radius: 10.0,
            ..SceneOptions::default()
        };
        let bodies = ring(&options);
        for body in &bodies {
            assert!((body.position().length() - 10.0).abs() < 1e-4);
        }
    }
}