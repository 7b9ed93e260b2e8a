//! Damped orbit controller that drives the camera and owns its GPU uniform.

use glam::{Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::render_context::RenderContext;
use crate::options::CameraOptions;

/// Damped orbit camera around a fixed focus point.
///
/// Input adjusts *target* yaw/pitch/distance; the actual values approach
/// the targets each frame with exponential smoothing, giving the damped
/// feel of a standard orbit controller. In stepper mode the controller
/// receives no input and simply holds the initial pose.
pub struct CameraController {
    yaw: f32,
    pitch: f32,
    distance: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
    focus_point: Vec3,
    damping: f32,
    rotate_speed: f32,
    zoom_speed: f32,

    /// The current camera state derived from the orbit parameters.
    pub camera: Camera,
    /// CPU copy of the camera uniform.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout shared by every pipeline.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over [`Self::buffer`].
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create a controller looking at the origin from `(0, 0, distance)`.
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let focus_point = Vec3::ZERO;
        let distance = options.distance;

        let camera = Camera {
            eye: focus_point + Vec3::new(0.0, 0.0, distance),
            target: focus_point,
            up: Vec3::Y,
            aspect: context.aspect(),
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
            target_yaw: 0.0,
            target_pitch: 0.0,
            target_distance: distance,
            focus_point,
            damping: options.damping,
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    fn update_camera_pos(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let dir = Vec3::new(
            sin_yaw * cos_pitch,
            sin_pitch,
            cos_yaw * cos_pitch,
        );

        self.camera.eye = self.focus_point + dir * self.distance;
        self.camera.target = self.focus_point;
        self.camera.up = Vec3::Y;
    }

    /// Advance the damped values toward their targets and refresh the
    /// camera pose. Call once per frame.
    pub fn update(&mut self, dt: f32) {
        // Exponential approach: the remaining error shrinks by
        // e^(-damping·dt) each frame, independent of frame rate.
        let t = 1.0 - (-self.damping * dt.max(0.0)).exp();
        self.yaw += (self.target_yaw - self.yaw) * t;
        self.pitch += (self.target_pitch - self.pitch) * t;
        self.distance += (self.target_distance - self.distance) * t;
        self.update_camera_pos();
    }

    /// Write the current uniform to the GPU buffer.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Recompute the aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Orbit by a mouse-drag delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.target_yaw -= delta.x * self.rotate_speed;
        self.target_pitch = (self.target_pitch
            - delta.y * self.rotate_speed)
            .clamp(-1.4, 1.4);
    }

    /// Zoom by a wheel delta (positive = closer).
    pub fn zoom(&mut self, delta: f32) {
        self.target_distance *= 1.0 - delta * self.zoom_speed;
        self.target_distance = self.target_distance.clamp(1.0, 60.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_camera(options: &CameraOptions, aspect: f32) -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, options.distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    // The damping math is pure, so test it without a GPU by replicating
    // the controller's scalar update.
    fn approach(current: f32, target: f32, damping: f32, dt: f32) -> f32 {
        let t = 1.0 - (-damping * dt).exp();
        current + (target - current) * t
    }

    #[test]
    fn damped_approach_converges() {
        let mut yaw = 0.0;
        for _ in 0..300 {
            yaw = approach(yaw, 1.0, 8.0, 1.0 / 60.0);
        }
        assert!((yaw - 1.0).abs() < 1e-3);
    }

    #[test]
    fn damped_approach_never_overshoots() {
        let mut d = 8.0;
        for _ in 0..100 {
            let next = approach(d, 4.0, 8.0, 1.0 / 60.0);
            assert!(next >= 4.0 && next <= d);
            d = next;
        }
    }

    #[test]
    fn aspect_follows_resize() {
        let options = CameraOptions::default();
        let mut camera = plain_camera(&options, 800.0 / 600.0);
        // Mirror CameraController::resize
        camera.aspect = 1920.0 / 1080.0;
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }
}