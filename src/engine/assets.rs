//! Fire-and-forget asset loading.
//!
//! Every load runs on its own worker thread and reports back through one
//! mpsc channel drained at the top of each frame. A failed or stuck load
//! never reaches the render thread as an error; the affected visual
//! simply keeps its fallback appearance.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::renderer::sky::generate_star_field;

/// Dimensions of the procedurally generated starfield substitute.
const PROC_STAR_WIDTH: u32 = 1024;
const PROC_STAR_HEIGHT: u32 = 512;
const PROC_STAR_COUNT: u32 = 1800;
const PROC_STAR_SEED: u64 = 42;

/// A completed asset load, ready for GPU upload.
pub enum AssetEvent {
    /// A body's decoded surface texture.
    BodyTexture {
        /// Ring index of the body.
        index: usize,
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// RGBA8 pixel data.
        pixels: Vec<u8>,
    },
    /// The decoded star sphere texture (or its procedural substitute).
    StarTexture {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// RGBA8 pixel data.
        pixels: Vec<u8>,
    },
    /// The decoded HDR environment map.
    Environment {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// RGB `f32` triples.
        pixels: Vec<f32>,
    },
}

/// Spawns asset workers and collects their results.
pub struct AssetLoader {
    tx: Sender<AssetEvent>,
    rx: Receiver<AssetEvent>,
}

impl AssetLoader {
    /// Create a loader with no pending work.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    /// Drain every load that completed since the last call.
    pub fn drain(&self) -> Vec<AssetEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Load a body's surface texture in the background.
    pub fn request_body_texture(&self, index: usize, path: String) {
        let tx = self.tx.clone();
        spawn_worker(&format!("body-texture-{index}"), move || {
            match decode_rgba(&path) {
                Ok((width, height, pixels)) => {
                    let _ = tx.send(AssetEvent::BodyTexture {
                        index,
                        width,
                        height,
                        pixels,
                    });
                }
                Err(e) => {
                    log::warn!(
                        "body texture {path} failed to load ({e}); \
                         keeping tint fallback"
                    );
                }
            }
        });
    }

    /// Load the star sphere texture in the background. A failed load
    /// substitutes a procedurally generated starfield.
    pub fn request_star_texture(&self, path: String) {
        let tx = self.tx.clone();
        spawn_worker("star-texture", move || {
            let (width, height, pixels) = match decode_rgba(&path) {
                Ok(decoded) => decoded,
                Err(e) => {
                    log::warn!(
                        "star texture {path} failed to load ({e}); \
                         generating procedural stars"
                    );
                    (
                        PROC_STAR_WIDTH,
                        PROC_STAR_HEIGHT,
                        generate_star_field(
                            PROC_STAR_WIDTH,
                            PROC_STAR_HEIGHT,
                            PROC_STAR_COUNT,
                            PROC_STAR_SEED,
                        ),
                    )
                }
            };
            let _ = tx.send(AssetEvent::StarTexture {
                width,
                height,
                pixels,
            });
        });
    }

    /// Fetch and decode the remote HDR environment map in the background.
    pub fn request_environment(&self, url: String) {
        let tx = self.tx.clone();
        spawn_worker("environment", move || match fetch_hdr(&url) {
            Ok((width, height, pixels)) => {
                log::info!("environment map loaded ({width}x{height})");
                let _ = tx.send(AssetEvent::Environment {
                    width,
                    height,
                    pixels,
                });
            }
            Err(e) => {
                log::warn!(
                    "environment map fetch failed ({e}); \
                     continuing without reflections"
                );
            }
        });
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_worker(name: &str, work: impl FnOnce() + Send + 'static) {
    let builder =
        std::thread::Builder::new().name(format!("orrery-{name}"));
    if let Err(e) = builder.spawn(work) {
        log::warn!("failed to spawn asset worker {name}: {e}");
    }
}

fn decode_rgba(
    path: &str,
) -> Result<(u32, u32, Vec<u8>), image::ImageError> {
    let image = image::open(path)?.to_rgba8();
    let (width, height) = image.dimensions();
    Ok((width, height, image.into_raw()))
}

fn fetch_hdr(url: &str) -> Result<(u32, u32, Vec<f32>), String> {
    let bytes = ureq::get(url)
        .call()
        .map_err(|e| e.to_string())?
        .into_body()
        .read_to_vec()
        .map_err(|e| e.to_string())?;

    let image = image::load_from_memory_with_format(
        &bytes,
        image::ImageFormat::Hdr,
    )
    .map_err(|e| e.to_string())?
    .to_rgb32f();
    let (width, height) = image.dimensions();
    Ok((width, height, image.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_is_empty_without_requests() {
        let loader = AssetLoader::new();
        assert!(loader.drain().is_empty());
    }

    #[test]
    fn missing_body_texture_sends_nothing() {
        let loader = AssetLoader::new();
        loader.request_body_texture(
            0,
            "definitely/not/a/real/path.png".to_owned(),
        );
        // Give the worker time to fail
        std::thread::sleep(std::time::Duration::from_millis(200));
        assert!(loader.drain().is_empty());
    }

    #[test]
    fn missing_star_texture_substitutes_procedural() {
        let loader = AssetLoader::new();
        loader
            .request_star_texture("definitely/not/stars.jpg".to_owned());
        // The fallback is generated locally, so it should arrive quickly
        let mut events = Vec::new();
        for _ in 0..50 {
            events = loader.drain();
            if !events.is_empty() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert_eq!(events.len(), 1);
        match &events[0] {
            AssetEvent::StarTexture {
                width,
                height,
                pixels,
            } => {
                assert_eq!(*width, PROC_STAR_WIDTH);
                assert_eq!(*height, PROC_STAR_HEIGHT);
                assert_eq!(
                    pixels.len(),
                    (PROC_STAR_WIDTH * PROC_STAR_HEIGHT * 4) as usize
                );
            }
            _ => panic!("expected a star texture event"),
        }
    }
}
