//! UV-sphere mesh generation.
//!
//! Bodies and the sky sphere need texture coordinates, so a lat/long grid
//! is used rather than an icosphere: the equirectangular textures map
//! directly onto the UV grid.

use glam::Vec3;

/// Vertex for the unit sphere mesh.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position on the unit sphere.
    pub position: [f32; 3],
    /// Outward normal (equals position on a unit sphere).
    pub normal: [f32; 3],
    /// Equirectangular texture coordinates.
    pub uv: [f32; 2],
}

/// Generate a unit UV sphere with the given longitude and latitude
/// segment counts.
///
/// Produces `(segments + 1) * (rings + 1)` vertices; the seam column is
/// duplicated so UVs wrap cleanly.
#[must_use]
pub fn generate_uv_sphere(
    segments: u32,
    rings: u32,
) -> (Vec<MeshVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(
        ((segments + 1) * (rings + 1)) as usize,
    );
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let phi = v * std::f32::consts::PI;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let theta = u * std::f32::consts::TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let p = Vec3::new(
                cos_theta * sin_phi,
                cos_phi,
                sin_theta * sin_phi,
            );
            vertices.push(MeshVertex {
                position: p.to_array(),
                normal: p.to_array(), // Unit sphere: normal = position
                uv: [u, v],
            });
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            // CCW winding for outward-facing normals
            indices.extend_from_slice(&[a, a + 1, b]);
            indices.extend_from_slice(&[a + 1, b + 1, b]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        let (vertices, indices) = generate_uv_sphere(64, 32);
        assert_eq!(vertices.len(), 65 * 33);
        assert_eq!(indices.len(), 64 * 32 * 6);
        assert_eq!(indices.len() % 3, 0);
    }

    #[test]
    fn vertices_lie_on_the_unit_sphere() {
        let (vertices, _) = generate_uv_sphere(16, 8);
        for v in &vertices {
            let len = Vec3::from_array(v.position).length();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        let (vertices, indices) = generate_uv_sphere(16, 8);
        let max = *indices.iter().max().unwrap_or(&0);
        assert!((max as usize) < vertices.len());
    }

    #[test]
    fn uv_covers_the_full_range() {
        let (vertices, _) = generate_uv_sphere(16, 8);
        assert!(vertices.iter().any(|v| v.uv[0] == 0.0));
        assert!(vertices.iter().any(|v| v.uv[0] == 1.0));
        assert!(vertices.iter().any(|v| v.uv[1] == 0.0));
        assert!(vertices.iter().any(|v| v.uv[1] == 1.0));
    }
}
