//! The core engine: owns the GPU context, scene, camera, renderers, and
//! all animated state, and advances them once per frame.

pub mod assets;

use std::time::{Duration, Instant};

use glam::{Mat4, Vec2};

use self::assets::{AssetEvent, AssetLoader};
use crate::animation::EasingFunction;
use crate::camera::CameraController;
use crate::error::OrreryError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::{DepthTexture, SceneTexture};
use crate::input::{InputEvent, MouseButton, ScrollStepper};
use crate::options::{BackgroundMode, InteractionMode, Options};
use crate::renderer::{
    HeadingRenderer, Lighting, PlanetRenderer, SkyRenderer,
};
use crate::scene::Scene;
use crate::util::FrameTiming;

/// Reflection strength applied once the environment map resolves.
const ENV_STRENGTH: f32 = 0.35;

/// Frames between FPS debug logs.
const FPS_LOG_INTERVAL: u64 = 600;

/// The scene controller: builds the scene once, then reacts to input and
/// redraw callbacks for the life of the process.
pub struct OrreryEngine {
    context: RenderContext,
    depth: DepthTexture,
    camera: CameraController,
    lighting: Lighting,
    scene: Scene,
    stepper: ScrollStepper,
    assets: AssetLoader,
    planets: PlanetRenderer,
    sky: SkyRenderer,
    headings: HeadingRenderer,
    options: Options,
    started_at: Instant,
    frame_timing: FrameTiming,
    frames: u64,
    mouse_pressed: bool,
}

impl OrreryEngine {
    /// Build the scene graph, renderers, and camera, and kick off every
    /// asset load.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::Gpu`] if GPU initialization fails — the
    /// only fatal path; asset problems degrade visually instead.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, OrreryError> {
        let context = RenderContext::new(window, size).await?;
        let depth = DepthTexture::new(
            &context.device,
            context.config.width,
            context.config.height,
        );

        let camera = CameraController::new(&context, &options.camera);
        let lighting = Lighting::new(&context);
        let scene = Scene::new(&options.scene);

        let tints: Vec<[f32; 3]> =
            scene.bodies.iter().map(|b| b.tint).collect();
        let planets = PlanetRenderer::new(
            &context,
            &camera.layout,
            &lighting.layout,
            &tints,
        );
        let sky_opacity = match options.background.mode {
            BackgroundMode::Environment => 1.0,
            _ => options.background.opacity,
        };
        let sky = SkyRenderer::new(
            &context,
            &camera.layout,
            options.background.radius,
            sky_opacity,
        );
        let headings = HeadingRenderer::new(&context, &tints);

        let stepper = ScrollStepper::with_window(Duration::from_millis(
            options.interaction.debounce_ms,
        ));

        // Kick off every load; results arrive on later frames
        let assets = AssetLoader::new();
        for body in &scene.bodies {
            assets
                .request_body_texture(body.index, body.texture_path.clone());
        }
        if options.background.mode == BackgroundMode::Starfield {
            assets
                .request_star_texture(options.background.star_texture.clone());
        }
        if !options.background.environment_url.is_empty() {
            assets.request_environment(
                options.background.environment_url.clone(),
            );
        }

        log::info!(
            "scene built: {} bodies, {:?} background, {:?} interaction",
            scene.bodies.len(),
            options.background.mode,
            options.interaction.mode,
        );

        Ok(Self {
            context,
            depth,
            camera,
            lighting,
            scene,
            stepper,
            assets,
            planets,
            sky,
            headings,
            options,
            started_at: Instant::now(),
            frame_timing: FrameTiming::new(),
            frames: 0,
            mouse_pressed: false,
        })
    }

    /// The active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current scroll step, in `[0, 3]`.
    #[must_use]
    pub fn step(&self) -> u8 {
        self.stepper.step()
    }

    /// Resize the surface and camera to new pixel dimensions. Must run
    /// before the next redraw so the projection never renders distorted.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.camera.resize(width, height);
        self.depth = DepthTexture::new(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
    }

    /// Feed one platform-agnostic input event to the active interaction
    /// variant.
    pub fn handle_input(&mut self, event: InputEvent) {
        match self.options.interaction.mode {
            InteractionMode::ScrollStepper => {
                self.handle_stepper_input(event);
            }
            InteractionMode::Orbit => self.handle_orbit_input(event),
        }
    }

    fn handle_stepper_input(&mut self, event: InputEvent) {
        // Wheel magnitude is ignored; the event itself is the trigger
        if let InputEvent::Scroll { .. } = event {
            if let Some(step) = self.stepper.on_wheel(Instant::now()) {
                let duration = Duration::from_millis(
                    self.options.interaction.step_duration_ms,
                );
                self.scene.begin_step(
                    step,
                    duration,
                    EasingFunction::DEFAULT,
                );
                log::debug!("step -> {step}");
            }
        }
    }

    fn handle_orbit_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Scroll { delta } => self.camera.zoom(delta),
            InputEvent::MouseButton { button, pressed } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = pressed;
                }
            }
            InputEvent::CursorMoved { dx, dy } => {
                if self.mouse_pressed {
                    self.camera.rotate(Vec2::new(dx, dy));
                }
            }
        }
    }

    /// Advance per-frame state: completed asset loads, scene tweens, the
    /// damped camera, and the GPU copies of everything that changed.
    pub fn update(&mut self, dt: f32) {
        self.drain_assets();

        let now = Instant::now();
        self.scene.advance(now);
        self.camera.update(dt);
        self.camera.update_gpu(&self.context.queue);

        let elapsed = self.started_at.elapsed().as_secs_f32();
        let spin = self.scene.spin_angle(elapsed);
        let models: Vec<Mat4> = self
            .scene
            .bodies
            .iter()
            .map(|body| self.scene.body_transform(body, spin))
            .collect();
        self.planets.update_instances(&self.context.queue, &models);
        self.headings
            .set_offset(&self.context.queue, self.scene.headings.offset());

        self.frames += 1;
        if self.frames % FPS_LOG_INTERVAL == 0 {
            log::debug!("fps {:.0}", self.frame_timing.fps());
        }
    }

    /// Upload any asset loads that completed since the last frame.
    fn drain_assets(&mut self) {
        for event in self.assets.drain() {
            match event {
                AssetEvent::BodyTexture {
                    index,
                    width,
                    height,
                    pixels,
                } => {
                    let name = self
                        .scene
                        .bodies
                        .get(index)
                        .map_or("?", |b| b.name.as_str());
                    log::info!(
                        "surface texture ready for {name} \
                         ({width}x{height})"
                    );
                    let texture = SceneTexture::from_rgba8(
                        &self.context.device,
                        &self.context.queue,
                        width,
                        height,
                        &pixels,
                        &format!("Body {index} Texture"),
                    );
                    self.planets.set_body_texture(
                        &self.context.device,
                        index,
                        &texture,
                    );
                }
                AssetEvent::StarTexture {
                    width,
                    height,
                    pixels,
                } => {
                    let texture = SceneTexture::from_rgba8(
                        &self.context.device,
                        &self.context.queue,
                        width,
                        height,
                        &pixels,
                        "Star Texture",
                    );
                    self.sky.set_texture(&self.context.device, &texture);
                }
                AssetEvent::Environment {
                    width,
                    height,
                    pixels,
                } => {
                    let texture = SceneTexture::equirect_hdr(
                        &self.context.device,
                        &self.context.queue,
                        width,
                        height,
                        &pixels,
                        "Environment Texture",
                    );
                    self.planets
                        .set_environment(&self.context.device, &texture);
                    self.lighting
                        .set_env_strength(&self.context.queue, ENV_STRENGTH);
                    if self.options.background.mode
                        == BackgroundMode::Environment
                    {
                        self.sky.set_texture(&self.context.device, &texture);
                    }
                }
            }
        }
    }

    /// Encode and present one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain needs to be
    /// reconfigured (lost/outdated); the viewer resizes and continues.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let [r, g, b] = self.options.background.clear_color;
        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            if self.options.background.mode != BackgroundMode::Flat {
                self.sky.draw(&mut pass, &self.camera.bind_group);
            }
            self.planets.draw(
                &mut pass,
                &self.camera.bind_group,
                &self.lighting.bind_group,
            );
            if self.options.interaction.mode
                == InteractionMode::ScrollStepper
            {
                self.headings.draw(&mut pass);
            }
        }
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }
}
