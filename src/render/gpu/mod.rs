pub(crate) mod context;
pub(crate) mod kernel;
pub(crate) mod readback;
pub(crate) mod texture;

use crate::{
    blend::params::{BlendParameterBlock, BlendParameters},
    foundation::error::BlendResult,
    raster::{image::RasterImage, normalize::NormalizedRaster},
    render::backend::{BackendKind, BlendBackend},
    settings::EngineSettings,
};

pub use context::GpuContext;
pub use kernel::CompositeKernel;
pub use texture::{TextureResource, TextureUsage};

/// Compute-kernel backend.
///
/// The device and compiled kernel are created once; textures and buffers are created per call
/// and dropped when it returns.
#[derive(Debug)]
pub struct GpuBackend {
    ctx: GpuContext,
    kernel: CompositeKernel,
}

impl GpuBackend {
    /// Request a device per `settings` and compile the kernel.
    pub fn new(settings: &EngineSettings) -> BlendResult<Self> {
        let ctx = GpuContext::request(settings)?;
        Self::with_context(ctx, settings)
    }

    /// Compile the kernel on a caller-provided device.
    pub fn with_context(ctx: GpuContext, settings: &EngineSettings) -> BlendResult<Self> {
        let kernel = CompositeKernel::new(&ctx, settings)?;
        Ok(Self { ctx, kernel })
    }

    /// Device this backend submits to.
    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }
}

impl BlendBackend for GpuBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Gpu
    }

    fn blend(
        &mut self,
        background: &NormalizedRaster,
        sprite: &NormalizedRaster,
        params: &BlendParameters,
    ) -> BlendResult<RasterImage> {
        let block =
            BlendParameterBlock::texture_space(params, background.extent(), sprite.extent());
        let background_tex = TextureResource::upload(
            &self.ctx,
            background,
            TextureUsage::ReadOnly,
            "spriteblend_background",
        )?;
        let sprite_tex = TextureResource::upload(
            &self.ctx,
            sprite,
            TextureUsage::ReadOnly,
            "spriteblend_sprite",
        )?;
        let target = self
            .kernel
            .run(&self.ctx, &background_tex, &sprite_tex, &block)?;
        readback::read_back(&self.ctx, &target)
    }
}
