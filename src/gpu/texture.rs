//! Texture upload helpers for body surfaces, the star sphere, and the
//! equirectangular environment map.

use half::f16;

/// A sampled 2D texture with its default view and sampler.
///
/// Equirectangular images wrap in longitude, so the sampler repeats in U
/// and clamps in V (poles).
pub struct SceneTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    /// Linear sampler (repeat U, clamp V).
    pub sampler: wgpu::Sampler,
}

impl SceneTexture {
    /// Upload an RGBA8 image as an sRGB texture.
    #[must_use]
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        pixels: &[u8],
        label: &str,
    ) -> Self {
        Self::upload(
            device,
            queue,
            width,
            height,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            4,
            pixels,
            label,
        )
    }

    /// A 1x1 solid-color texture, used as the stand-in while an asset load
    /// is pending and as the permanent fallback when it fails.
    #[must_use]
    pub fn solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: [u8; 4],
        label: &str,
    ) -> Self {
        Self::from_rgba8(device, queue, 1, 1, &rgba, label)
    }

    /// Upload decoded Radiance HDR data (RGB `f32` triples) as an
    /// `Rgba16Float` equirectangular environment texture.
    #[must_use]
    pub fn equirect_hdr(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        rgb: &[f32],
        label: &str,
    ) -> Self {
        let mut texels =
            Vec::with_capacity(width as usize * height as usize * 8);
        let alpha = f16::from_f32(1.0).to_le_bytes();
        for px in rgb.chunks_exact(3) {
            texels.extend_from_slice(&f16::from_f32(px[0]).to_le_bytes());
            texels.extend_from_slice(&f16::from_f32(px[1]).to_le_bytes());
            texels.extend_from_slice(&f16::from_f32(px[2]).to_le_bytes());
            texels.extend_from_slice(&alpha);
        }
        Self::upload(
            device,
            queue,
            width,
            height,
            wgpu::TextureFormat::Rgba16Float,
            8,
            &texels,
            label,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        bytes_per_pixel: u32,
        pixels: &[u8],
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_pixel * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Repeat U for longitude wrap, clamp V for poles
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// Depth attachment sized to the surface.
pub struct DepthTexture {
    /// A default full-texture view, bound as the depth attachment.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// The depth format used by every pipeline in the crate.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture matching the given surface dimensions.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { view }
    }
}
