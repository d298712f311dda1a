use crate::{
    foundation::error::{BlendError, BlendResult},
    raster::image::{PixelFormat, RasterImage},
    render::gpu::{
        context::GpuContext,
        texture::{TextureResource, unpack_rows},
    },
};

/// Copy `texture` into host memory as a top-down RGBA8 raster.
#[tracing::instrument(level = "debug", skip_all, fields(extent = %texture.extent()))]
pub fn read_back(ctx: &GpuContext, texture: &TextureResource) -> BlendResult<RasterImage> {
    let extent = texture.extent();
    let pitch = texture.row_pitch();
    let size = u64::from(pitch)
        .checked_mul(u64::from(extent.height))
        .ok_or_else(|| BlendError::resource("readback buffer size overflow"))?;

    let buffer = ctx
        .scoped(|device| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("spriteblend_readback"),
                size,
                usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        })
        .map_err(|e| BlendError::resource(format!("readback buffer allocation failed: {e}")))?;

    let mut encoder = ctx
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("spriteblend_readback"),
        });
    encoder.copy_texture_to_buffer(
        texture.copy_target(),
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(pitch),
                rows_per_image: Some(extent.height),
            },
        },
        texture.copy_size(),
    );
    ctx.scoped(|_| {
        ctx.queue().submit(Some(encoder.finish()));
    })
    .map_err(|e| BlendError::resource(format!("readback copy failed: {e}")))?;

    let slice = buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |res| {
        let _ = tx.send(res);
    });
    ctx.wait_idle()?;
    rx.recv()
        .map_err(|_| BlendError::resource("readback channel closed"))?
        .map_err(|e| BlendError::resource(format!("readback map failed: {e:?}")))?;

    let data = {
        let mapped = slice.get_mapped_range();
        unpack_rows(
            &mapped,
            extent.width as usize * 4,
            extent.height as usize,
            pitch as usize,
        )
    };
    buffer.unmap();
    tracing::debug!(bytes = data.len(), row_pitch = pitch, "readback complete");

    let raster = RasterImage::new(extent.width, extent.height, PixelFormat::Rgba8, data)?;
    Ok(raster.flipped_vertically())
}
