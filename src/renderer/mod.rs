//! wgpu pipelines: the textured body ring, the sky sphere, and the
//! screen-space caption headings.

pub mod heading;
pub mod mesh;
pub mod planet;
pub mod sky;

pub use heading::HeadingRenderer;
pub use planet::PlanetRenderer;
pub use sky::SkyRenderer;
use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;

/// Lighting configuration shared by the body shader.
/// NOTE: Must match WGSL struct layout exactly (32 bytes)
///
/// WGSL layout (auto-padded):
///   light_dir: vec3<f32>      (offset 0,  align 16)
///   _pad: f32                 (offset 12)
///   light_intensity: f32      (offset 16)
///   ambient: f32              (offset 20)
///   env_strength: f32         (offset 24)
///   _pad2: f32                (offset 28)
///   Total: 32 bytes
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Directional light direction (normalized, points toward the light).
    pub light_dir: [f32; 3],
    pub(crate) _pad: f32,
    /// Directional light intensity.
    pub light_intensity: f32,
    /// Ambient term.
    pub ambient: f32,
    /// Environment reflection strength; 0 until the HDR map resolves.
    pub env_strength: f32,
    pub(crate) _pad2: f32,
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self {
            // Key light from upper-front-left
            light_dir: normalize([-0.4, 0.6, 0.7]),
            _pad: 0.0,
            light_intensity: 0.9,
            ambient: 0.25,
            env_strength: 0.0,
            _pad2: 0.0,
        }
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Owns the lighting uniform, its buffer, and its bind group.
pub struct Lighting {
    /// CPU copy of the uniform.
    pub uniform: LightingUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for group(1).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over [`Self::buffer`].
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Create the lighting resources with default parameters.
    #[must_use]
    pub fn new(context: &RenderContext) -> Self {
        let uniform = LightingUniform::default();
        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );
        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );
        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Lighting Bind Group"),
                });
        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Set the environment reflection strength and update the GPU copy.
    pub fn set_env_strength(&mut self, queue: &wgpu::Queue, strength: f32) {
        self.uniform.env_strength = strength;
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}

/// Bind group layout for a sampled texture + sampler pair, shared by the
/// body surface and environment groups.
pub(crate) fn texture_bind_group_layout(
    device: &wgpu::Device,
    label: &str,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float {
                        filterable: true,
                    },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(
                    wgpu::SamplerBindingType::Filtering,
                ),
                count: None,
            },
        ],
    })
}

/// Build a bind group pairing a texture view with its sampler.
pub(crate) fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &crate::gpu::texture::SceneTexture,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
        label: Some(label),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighting_uniform_is_32_bytes() {
        assert_eq!(size_of::<LightingUniform>(), 32);
    }

    #[test]
    fn default_light_dir_is_normalized() {
        let uniform = LightingUniform::default();
        let d = uniform.light_dir;
        let len = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }

    #[test]
    fn env_strength_starts_at_zero() {
        // Reflections only switch on once the HDR map resolves
        assert_eq!(LightingUniform::default().env_strength, 0.0);
    }
}
