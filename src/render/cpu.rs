use crate::{
    blend::{params::BlendParameters, placement::map_axis, rules::blend_pixel},
    foundation::error::{BlendError, BlendResult},
    raster::{
        image::{PixelFormat, RasterImage},
        normalize::NormalizedRaster,
    },
    render::backend::{BackendKind, BlendBackend},
};

/// Reference backend that blends on the calling thread.
///
/// Produces the same bytes the compute kernel would, up to float rounding in the source-over
/// case. Used as the fallback when no adapter is available and as the oracle in GPU tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    /// Stateless backend; every call blends from scratch.
    pub fn new() -> Self {
        Self
    }
}

impl BlendBackend for CpuBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Cpu
    }

    #[tracing::instrument(level = "trace", skip_all)]
    fn blend(
        &mut self,
        background: &NormalizedRaster,
        sprite: &NormalizedRaster,
        params: &BlendParameters,
    ) -> BlendResult<RasterImage> {
        let bg = background.raster();
        let sp = sprite.raster();
        let src = bg.data();
        let mut out = src.to_vec();

        for sy in 0..sp.height() {
            let Some(ty) = map_axis(sy, params.y_offset, bg.height(), params.wrap_vertical) else {
                continue;
            };
            let row = sp
                .row(sy)
                .ok_or_else(|| BlendError::format(format!("sprite row {sy} missing")))?;
            for (sx, px) in (0..sp.width()).zip(row.chunks_exact(4)) {
                let Some(tx) = map_axis(sx, params.x_offset, bg.width(), params.wrap_horizontal)
                else {
                    continue;
                };
                let i = (ty as usize * bg.width() as usize + tx as usize) * 4;
                let under = [src[i], src[i + 1], src[i + 2], src[i + 3]];
                let over = [px[0], px[1], px[2], px[3]];
                out[i..i + 4].copy_from_slice(&blend_pixel(
                    under,
                    over,
                    params.force_opaque_result,
                ));
            }
        }

        RasterImage::new(bg.width(), bg.height(), PixelFormat::Rgba8, out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
