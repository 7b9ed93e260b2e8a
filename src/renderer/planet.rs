//! Textured planetary body ring pipeline.

use wgpu::util::DeviceExt;

use super::mesh::{generate_uv_sphere, MeshVertex};
use super::{texture_bind_group, texture_bind_group_layout};
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::{DepthTexture, SceneTexture};

/// Sphere tessellation (64x32 lat/long grid)
const SEGMENTS: u32 = 64;
const RINGS: u32 = 32;

/// Per-instance data for one body.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    /// Model matrix transforming the unit sphere into world space.
    pub model: [[f32; 4]; 4],
    /// Fallback/base tint (linear RGB).
    pub tint: [f32; 3],
    /// 1.0 once the surface texture has loaded, else 0.0.
    pub textured: f32,
}

/// Draws the ring of textured bodies.
///
/// Each body has its own surface bind group so textures can arrive (or
/// fail) independently; until then the shader falls back to the tint.
pub struct PlanetRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    index_count: u32,
    surface_layout: wgpu::BindGroupLayout,
    surface_groups: Vec<wgpu::BindGroup>,
    env_layout: wgpu::BindGroupLayout,
    env_group: wgpu::BindGroup,
    instances: Vec<BodyInstance>,
}

impl PlanetRenderer {
    /// Build the pipeline and per-body placeholder materials.
    ///
    /// `tints` provides one fallback color per body; bodies start
    /// untextured with a 1x1 solid stand-in bound.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        tints: &[[f32; 3]],
    ) -> Self {
        let (vertices, indices) = generate_uv_sphere(SEGMENTS, RINGS);

        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Body Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Body Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        let instances: Vec<BodyInstance> = tints
            .iter()
            .map(|&tint| BodyInstance {
                model: glam::Mat4::IDENTITY.to_cols_array_2d(),
                tint,
                textured: 0.0,
            })
            .collect();

        let instance_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Body Instance Buffer"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let surface_layout =
            texture_bind_group_layout(&context.device, "Body Surface Layout");
        let env_layout = texture_bind_group_layout(
            &context.device,
            "Environment Layout",
        );

        // Solid stand-ins until the real textures arrive
        let surface_groups = tints
            .iter()
            .enumerate()
            .map(|(i, &tint)| {
                let rgba = [
                    (tint[0] * 255.0) as u8,
                    (tint[1] * 255.0) as u8,
                    (tint[2] * 255.0) as u8,
                    255,
                ];
                let placeholder = SceneTexture::solid(
                    &context.device,
                    &context.queue,
                    rgba,
                    &format!("Body {i} Placeholder"),
                );
                texture_bind_group(
                    &context.device,
                    &surface_layout,
                    &placeholder,
                    &format!("Body {i} Surface"),
                )
            })
            .collect();

        let env_placeholder = SceneTexture::solid(
            &context.device,
            &context.queue,
            [0, 0, 0, 255],
            "Environment Placeholder",
        );
        let env_group = texture_bind_group(
            &context.device,
            &env_layout,
            &env_placeholder,
            "Environment Bind Group",
        );

        let pipeline = Self::create_pipeline(
            context,
            camera_layout,
            lighting_layout,
            &surface_layout,
            &env_layout,
        );

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            index_count: indices.len() as u32,
            surface_layout,
            surface_groups,
            env_layout,
            env_group,
            instances,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        surface_layout: &wgpu::BindGroupLayout,
        env_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/planet.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Body Pipeline Layout"),
                bind_group_layouts: &[
                    camera_layout,
                    lighting_layout,
                    surface_layout,
                    env_layout,
                ],
                push_constant_ranges: &[],
            },
        );

        // Vertex buffer layout for the sphere mesh
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
                    shader_location: 1, // normal
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 24,
                    shader_location: 2, // uv
                },
            ],
        };

        // Instance buffer layout (4x4 matrix as 4 vec4s + tint + textured)
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<BodyInstance>()
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 3, // model matrix col 0
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 4, // model matrix col 1
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 5, // model matrix col 2
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 48,
                    shader_location: 6, // model matrix col 3
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 64,
                    shader_location: 7, // tint
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 76,
                    shader_location: 8, // textured
                },
            ],
        };

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Body Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout, instance_layout],
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
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthTexture::FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    /// Replace one body's placeholder with its loaded surface texture.
    pub fn set_body_texture(
        &mut self,
        device: &wgpu::Device,
        index: usize,
        texture: &SceneTexture,
    ) {
        if index >= self.surface_groups.len() {
            return;
        }
        self.surface_groups[index] = texture_bind_group(
            device,
            &self.surface_layout,
            texture,
            &format!("Body {index} Surface"),
        );
        self.instances[index].textured = 1.0;
    }

    /// Replace the environment placeholder with the loaded HDR map.
    pub fn set_environment(
        &mut self,
        device: &wgpu::Device,
        texture: &SceneTexture,
    ) {
        self.env_group = texture_bind_group(
            device,
            &self.env_layout,
            texture,
            "Environment Bind Group",
        );
    }

    /// Upload this frame's model matrices.
    ///
    /// `models` must supply one matrix per body, in ring order.
    pub fn update_instances(
        &mut self,
        queue: &wgpu::Queue,
        models: &[glam::Mat4],
    ) {
        for (instance, model) in self.instances.iter_mut().zip(models) {
            instance.model = model.to_cols_array_2d();
        }
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&self.instances),
        );
    }

    /// Draw every body, one instanced range per surface bind group.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        lighting_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.instances.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, lighting_bind_group, &[]);
        render_pass.set_bind_group(3, &self.env_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );

        for (i, surface) in self.surface_groups.iter().enumerate() {
            render_pass.set_bind_group(2, surface, &[]);
            let i = i as u32;
            render_pass.draw_indexed(0..self.index_count, 0, i..i + 1);
        }
    }
}