use crate::{
    foundation::{
        core::Extent,
        error::{BlendError, BlendResult},
    },
    raster::normalize::NormalizedRaster,
    render::gpu::context::GpuContext,
};

/// How the kernel accesses a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureUsage {
    /// Sampled input, loaded with `textureLoad`.
    ReadOnly,
    /// Storage target the kernel writes.
    ReadWrite,
}

impl TextureUsage {
    fn wgpu_usages(self) -> wgpu::TextureUsages {
        let base = wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::COPY_SRC;
        match self {
            Self::ReadOnly => base,
            Self::ReadWrite => base | wgpu::TextureUsages::STORAGE_BINDING,
        }
    }
}

/// An RGBA8 texture with its view and the pitch used for transfers.
///
/// Row 0 of the texture holds the bottom image row.
#[derive(Debug)]
pub struct TextureResource {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    extent: Extent,
    usage: TextureUsage,
    row_pitch: u32,
}

impl TextureResource {
    /// Allocate a zero-initialized texture.
    pub fn allocate(
        ctx: &GpuContext,
        extent: Extent,
        usage: TextureUsage,
        label: &str,
    ) -> BlendResult<Self> {
        if extent.is_empty() {
            return Err(BlendError::resource(format!("{label}: empty extent {extent}")));
        }
        let max = ctx.device().limits().max_texture_dimension_2d;
        if extent.width > max || extent.height > max {
            return Err(BlendError::resource(format!(
                "{label}: {extent} exceeds device texture limit {max}"
            )));
        }
        let row_pitch = row_pitch(extent.width)?;

        let texture = ctx
            .scoped(|device| {
                device.create_texture(&wgpu::TextureDescriptor {
                    label: Some(label),
                    size: copy_size(extent),
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format: wgpu::TextureFormat::Rgba8Unorm,
                    usage: usage.wgpu_usages(),
                    view_formats: &[],
                })
            })
            .map_err(|e| BlendError::resource(format!("{label}: texture allocation failed: {e}")))?;
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            texture,
            view,
            extent,
            usage,
            row_pitch,
        })
    }

    /// Allocate a texture sized to `raster` and copy its pixels in, bottom row first.
    #[tracing::instrument(level = "debug", skip(ctx, raster), fields(extent = %raster.extent()))]
    pub fn upload(
        ctx: &GpuContext,
        raster: &NormalizedRaster,
        usage: TextureUsage,
        label: &str,
    ) -> BlendResult<Self> {
        let resource = Self::allocate(ctx, raster.extent(), usage, label)?;
        let extent = resource.extent;
        let packed = pack_rows_bottom_up(
            raster.data(),
            extent.width as usize * 4,
            extent.height as usize,
            resource.row_pitch as usize,
        );
        tracing::debug!(row_pitch = resource.row_pitch, bytes = packed.len(), "texture upload");

        ctx.scoped(|_| {
            ctx.queue().write_texture(
                resource.copy_target(),
                &packed,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(resource.row_pitch),
                    rows_per_image: Some(extent.height),
                },
                copy_size(extent),
            );
        })
        .map_err(|e| BlendError::resource(format!("{label}: texture upload failed: {e}")))?;

        Ok(resource)
    }

    /// Underlying texture.
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    /// Default view over the base level.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Width and height.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// How the kernel binds this texture.
    pub fn usage(&self) -> TextureUsage {
        self.usage
    }

    /// Bytes per row in transfer buffers, padded to the copy alignment.
    pub fn row_pitch(&self) -> u32 {
        self.row_pitch
    }

    pub(crate) fn copy_target(&self) -> wgpu::TexelCopyTextureInfo<'_> {
        wgpu::TexelCopyTextureInfo {
            texture: &self.texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        }
    }

    pub(crate) fn copy_size(&self) -> wgpu::Extent3d {
        copy_size(self.extent)
    }
}

fn copy_size(extent: Extent) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: extent.width,
        height: extent.height,
        depth_or_array_layers: 1,
    }
}

/// Padded bytes per row for an RGBA8 row of `width` pixels.
pub fn row_pitch(width: u32) -> BlendResult<u32> {
    let unpadded = width
        .checked_mul(4)
        .ok_or_else(|| BlendError::resource(format!("row of {width} pixels overflows")))?;
    unpadded
        .checked_next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
        .ok_or_else(|| BlendError::resource(format!("row of {width} pixels overflows")))
}

/// Repack tightly packed top-down rows into `pitch`-byte rows in bottom-up order.
pub(crate) fn pack_rows_bottom_up(
    data: &[u8],
    row_bytes: usize,
    rows: usize,
    pitch: usize,
) -> Vec<u8> {
    let mut out = vec![0u8; pitch * rows];
    if row_bytes == 0 {
        return out;
    }
    for (dst, src) in out.chunks_exact_mut(pitch).zip(data.chunks_exact(row_bytes).rev()) {
        dst[..row_bytes].copy_from_slice(src);
    }
    out
}

/// Strip the row padding from `pitch`-byte rows, keeping row order.
pub(crate) fn unpack_rows(padded: &[u8], row_bytes: usize, rows: usize, pitch: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(row_bytes * rows);
    if pitch == 0 {
        return out;
    }
    for row in padded.chunks_exact(pitch).take(rows) {
        out.extend_from_slice(&row[..row_bytes]);
    }
    out
}

#[cfg(test)]
#[path = "../../../tests/unit/render/gpu/texture.rs"]
mod tests;
