//! Sky sphere pipeline.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wgpu::util::DeviceExt;

use super::mesh::{generate_uv_sphere, MeshVertex};
use super::{texture_bind_group, texture_bind_group_layout};
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::{DepthTexture, SceneTexture};

/// Sky sphere tessellation (64x64 lat/long grid)
const SEGMENTS: u32 = 64;
const RINGS: u32 = 64;

/// Sky parameters.
/// NOTE: Must match WGSL struct layout exactly (16 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SkyUniform {
    /// Sphere radius in world units.
    radius: f32,
    /// Opacity of the sky texture over the clear color.
    opacity: f32,
    _pad: [f32; 2],
}

/// Draws the enclosing sky sphere: the partially transparent starfield,
/// or the HDR environment once it loads in environment-background mode.
///
/// The sphere is viewed from inside, so front faces are culled and depth
/// writes are disabled; bodies always draw over it.
pub struct SkyRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform: SkyUniform,
    uniform_buffer: wgpu::Buffer,
    params_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    texture_group: wgpu::BindGroup,
    /// Whether a real sky texture has been bound yet.
    textured: bool,
}

impl SkyRenderer {
    /// Build the sky pipeline with a solid placeholder texture.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        radius: f32,
        opacity: f32,
    ) -> Self {
        let (vertices, indices) = generate_uv_sphere(SEGMENTS, RINGS);

        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Sky Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let index_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Sky Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let uniform = SkyUniform {
            radius,
            opacity,
            _pad: [0.0; 2],
        };
        let uniform_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Sky Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let params_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Sky Params Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );
        let params_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &params_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                    label: Some("Sky Params Bind Group"),
                });

        let texture_layout =
            texture_bind_group_layout(&context.device, "Sky Texture Layout");
        let placeholder = SceneTexture::solid(
            &context.device,
            &context.queue,
            [0, 0, 0, 0],
            "Sky Placeholder",
        );
        let texture_group = texture_bind_group(
            &context.device,
            &texture_layout,
            &placeholder,
            "Sky Texture Bind Group",
        );

        let pipeline = Self::create_pipeline(
            context,
            camera_layout,
            &params_layout,
            &texture_layout,
        );

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            uniform,
            uniform_buffer,
            params_group,
            texture_layout,
            texture_group,
            textured: false,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        params_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/sky.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Sky Pipeline Layout"),
                bind_group_layouts: &[
                    camera_layout,
                    params_layout,
                    texture_layout,
                ],
                push_constant_ranges: &[],
            },
        );

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<MeshVertex>()
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0, // position
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1, // normal (unused)
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 24,
                    shader_location: 2, // uv
                },
            ],
        };

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Sky Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    // Viewed from inside: cull the outward faces
                    cull_mode: Some(wgpu::Face::Front),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthTexture::FORMAT,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    /// Bind a loaded sky texture (starfield image or HDR environment).
    pub fn set_texture(
        &mut self,
        device: &wgpu::Device,
        texture: &SceneTexture,
    ) {
        self.texture_group = texture_bind_group(
            device,
            &self.texture_layout,
            texture,
            "Sky Texture Bind Group",
        );
        self.textured = true;
    }

    /// Update the sky opacity (environment mode uses 1.0).
    pub fn set_opacity(&mut self, queue: &wgpu::Queue, opacity: f32) {
        self.uniform.opacity = opacity;
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Draw the sky sphere. A no-op until a texture has been bound, so
    /// the clear color shows through while loads are pending.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if !self.textured {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.params_group, &[]);
        render_pass.set_bind_group(2, &self.texture_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Generate a procedural equirectangular starfield image, used when the
/// configured star texture cannot be loaded.
///
/// Deterministic for a given seed.
#[must_use]
pub fn generate_star_field(
    width: u32,
    height: u32,
    stars: u32,
    seed: u64,
) -> Vec<u8> {
    let mut pixels = vec![0u8; (width * height * 4) as usize];
    // Opaque black sky
    for px in pixels.chunks_exact_mut(4) {
        px[3] = 255;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..stars {
        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);
        let brightness: u8 = rng.random_range(90..=255);
        let idx = ((y * width + x) * 4) as usize;
        pixels[idx] = brightness;
        pixels[idx + 1] = brightness;
        // Slight blue cast on the brightest stars
        pixels[idx + 2] = brightness.saturating_add(12);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_field_has_expected_size() {
        let pixels = generate_star_field(256, 128, 400, 7);
        assert_eq!(pixels.len(), 256 * 128 * 4);
    }

    #[test]
    fn star_field_is_deterministic_per_seed() {
        let a = generate_star_field(64, 32, 100, 42);
        let b = generate_star_field(64, 32, 100, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn star_field_is_opaque_and_contains_stars() {
        let pixels = generate_star_field(64, 32, 100, 42);
        assert!(pixels.chunks_exact(4).all(|px| px[3] == 255));
        assert!(pixels.chunks_exact(4).any(|px| px[0] > 0));
    }
}