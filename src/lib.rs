// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-driven orbiting-planet showcase built on wgpu.
//!
//! Orrery renders a ring of four textured planets around a common center
//! inside a star sphere, with an HDR environment map enriching the
//! materials once it loads. A debounced scroll stepper rotates the ring a
//! quarter turn per accepted wheel event and slides the caption headings
//! in sync; an alternative damped orbit controller gives free camera
//! movement instead.
//!
//! # Key entry points
//!
//! - [`Viewer`] - the standalone winit window
//! - [`engine::OrreryEngine`] - the rendering engine behind it
//! - [`options::Options`] - runtime configuration (scene, camera,
//!   interaction, background)
//! - [`animation`] - the explicit tween state machines driving the step
//!   transitions
//!
//! # Architecture
//!
//! Everything runs on one logical thread: the winit redraw callback
//! advances the tween queues and the spin clock, then draws sky →
//! planets → headings in a single pass. Asset loads (surface textures,
//! the remote HDR map) run on worker threads and deliver through an mpsc
//! channel; until a load resolves the affected body renders with its
//! fallback tint, and a failed load simply never upgrades the visual.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
pub mod viewer;

pub use engine::OrreryEngine;
pub use error::OrreryError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
pub use viewer::Viewer;
