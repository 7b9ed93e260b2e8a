//! Screen-space caption heading pipeline.

use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTexture;

/// Track parameters.
/// NOTE: Must match WGSL struct layout exactly (16 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct HeadingUniform {
    /// Track offset in viewport heights (0 = first caption centered).
    offset: f32,
    _pad: [f32; 3],
}

/// Per-caption data.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct HeadingInstance {
    /// Caption bar color (linear RGB).
    color: [f32; 3],
    /// Slot index on the track: slot `s` is centered when the track
    /// offset equals `-s`.
    slot: f32,
}

/// Screen-space caption bars, one per body, stacked one viewport height
/// apart and slid as a unit by the step tweens.
///
/// The geometry is generated from the vertex index, so the only buffers
/// are the per-caption instance data and the track offset uniform.
pub struct HeadingRenderer {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    uniform: HeadingUniform,
    uniform_buffer: wgpu::Buffer,
    params_group: wgpu::BindGroup,
}

impl HeadingRenderer {
    /// Build the overlay pipeline with one caption per color.
    pub fn new(
        context: &RenderContext,
        colors: &[[f32; 3]],
    ) -> Self {
        let instances: Vec<HeadingInstance> = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| HeadingInstance {
                color,
                slot: i as f32,
            })
            .collect();

        let instance_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Heading Instance Buffer"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let uniform = HeadingUniform {
            offset: 0.0,
            _pad: [0.0; 3],
        };
        let uniform_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Heading Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let params_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Heading Params Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
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
                    label: Some("Heading Params Bind Group"),
                });

        let pipeline =
            Self::create_pipeline(context, &params_layout);

        Self {
            pipeline,
            instance_buffer,
            instance_count: instances.len() as u32,
            uniform,
            uniform_buffer,
            params_group,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        params_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/heading.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Heading Pipeline Layout"),
                bind_group_layouts: &[params_layout],
                push_constant_ranges: &[],
            },
        );

        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<HeadingInstance>()
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0, // color
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 12,
                    shader_location: 1, // slot
                },
            ],
        };

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Heading Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[instance_layout],
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
                    cull_mode: None,
                    ..Default::default()
                },
                // Overlay: drawn last, ignores scene depth
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthTexture::FORMAT,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::Always,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    /// Upload the current track offset (in viewport heights).
    pub fn set_offset(&mut self, queue: &wgpu::Queue, offset: f32) {
        self.uniform.offset = offset;
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Draw the caption bars.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.params_group, &[]);
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        render_pass.draw(0..6, 0..self.instance_count);
    }
}