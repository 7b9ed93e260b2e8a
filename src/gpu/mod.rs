//! GPU resource plumbing: the wgpu device/surface context and texture
//! upload helpers.

pub mod render_context;
pub mod texture;
