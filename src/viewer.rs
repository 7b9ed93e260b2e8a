//! Standalone window backed by winit.
//!
//! ```no_run
//! # use orrery::Viewer;
//! Viewer::builder().run().unwrap();
//! ```

use std::{sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    error::OrreryError, input::InputEvent, options::Options, OrreryEngine,
};

/// The surface never exceeds 2x the logical size; ultra-dense displays
/// render at a capped ratio instead of full native resolution.
const MAX_PIXEL_RATIO: f64 = 2.0;

/// Compute the wgpu surface size for a window's physical size and scale
/// factor, capping the effective device pixel ratio at 2.
fn drawable_size(
    physical: winit::dpi::PhysicalSize<u32>,
    scale_factor: f64,
) -> (u32, u32) {
    let scale = scale_factor.max(f64::EPSILON);
    let capped = scale.min(MAX_PIXEL_RATIO);
    let w = (f64::from(physical.width) * capped / scale).round() as u32;
    let h = (f64::from(physical.height) * capped / scale).round() as u32;
    (w.max(1), h.max(1))
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Orrery", default
    /// options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Orrery".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            title: self.title,
        }
    }

    /// Build the [`Viewer`] and run its event loop. Blocks until the
    /// window is closed.
    pub fn run(self) -> Result<(), OrreryError> {
        self.build().run()
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the orbiting-body scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Option<Options>,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), OrreryError> {
        let event_loop =
            EventLoop::new().map_err(|e| OrreryError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            last_frame_time: Instant::now(),
            last_mouse_pos: (0.0, 0.0),
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| OrreryError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<OrreryEngine>,
    last_frame_time: Instant,
    last_mouse_pos: (f32, f32),
    options: Option<Options>,
    title: String,
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = drawable_size(window.inner_size(), window.scale_factor());
        let options = self.options.take().unwrap_or_default();

        let engine = match pollster::block_on(OrreryEngine::new(
            window.clone(),
            size,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let scale = self
                    .window
                    .as_ref()
                    .map_or(1.0, |w| w.scale_factor());
                let (w, h) = drawable_size(event_size, scale);
                if let Some(engine) = &mut self.engine {
                    engine.resize(w, h);
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let inner = self.window.as_ref().map(|w| w.inner_size());
                if let (Some(engine), Some(inner)) =
                    (&mut self.engine, inner)
                {
                    let (w, h) = drawable_size(inner, scale_factor);
                    engine.resize(w, h);
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame_time).as_secs_f32();
                self.last_frame_time = now;

                if let Some(engine) = &mut self.engine {
                    engine.update(dt);
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let (vw, vh) = drawable_size(
                                    w.inner_size(),
                                    w.scale_factor(),
                                );
                                engine.resize(vw, vh);
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {:?}", e);
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::MouseButton {
                        button: button.into(),
                        pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let dx = position.x as f32 - self.last_mouse_pos.0;
                let dy = position.y as f32 - self.last_mouse_pos.1;
                self.last_mouse_pos = (position.x as f32, position.y as f32);

                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::CursorMoved { dx, dy });
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::Scroll {
                        delta: scroll_delta,
                    });
                }
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalSize;

    use super::*;

    #[test]
    fn identity_below_the_cap() {
        // Physical pixels already include the scale; at or below 2x the
        // surface matches them exactly
        assert_eq!(
            drawable_size(PhysicalSize::new(800, 600), 1.0),
            (800, 600)
        );
        assert_eq!(
            drawable_size(PhysicalSize::new(1920, 1080), 1.0),
            (1920, 1080)
        );
        assert_eq!(
            drawable_size(PhysicalSize::new(1920, 1080), 2.0),
            (1920, 1080)
        );
    }

    #[test]
    fn ratio_above_two_is_capped() {
        // Logical 800x600 at scale 3 -> physical 2400x1800, but the
        // surface only scales by the capped ratio of 2
        assert_eq!(
            drawable_size(PhysicalSize::new(2400, 1800), 3.0),
            (1600, 1200)
        );
    }

    #[test]
    fn zero_size_clamps_to_one() {
        assert_eq!(drawable_size(PhysicalSize::new(0, 0), 1.0), (1, 1));
    }
}
