use crate::{
    blend::params::BlendParameters,
    foundation::error::BlendResult,
    raster::{image::RasterImage, normalize::NormalizedRaster},
    settings::EngineSettings,
};

/// Executes the per-pixel blend of a sprite onto a background.
///
/// Callers hand over rasters that are already normalized and placements that already passed
/// [`crate::placement::validate`]; backends only move pixels. Implementations are not required
/// to be usable from several threads at once: [`crate::Compositor`] serializes calls.
pub trait BlendBackend: Send {
    /// Which implementation this is.
    fn kind(&self) -> BackendKind;

    /// Return `background` with `sprite` blended in at `params`.
    ///
    /// Output has the background's extent. Pixels outside the sprite footprint are copied
    /// byte-for-byte.
    fn blend(
        &mut self,
        background: &NormalizedRaster,
        sprite: &NormalizedRaster,
        params: &BlendParameters,
    ) -> BlendResult<RasterImage>;
}

/// Available backend kinds.
///
/// - `Cpu` is always available.
/// - `Gpu` requires the `gpu` feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Reference implementation on the calling thread.
    Cpu,
    /// wgpu compute kernel.
    #[cfg(feature = "gpu")]
    Gpu,
}

impl std::str::FromStr for BackendKind {
    type Err = crate::BlendError;

    fn from_str(s: &str) -> BlendResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            #[cfg(feature = "gpu")]
            "gpu" => Ok(Self::Gpu),
            other => Err(crate::BlendError::configuration(format!(
                "unknown backend '{other}'"
            ))),
        }
    }
}

/// Create a backend implementation.
///
/// A GPU backend that cannot be configured is replaced by the CPU backend when
/// `settings.fallback_to_cpu` is set; otherwise its configuration error is returned.
#[cfg_attr(not(feature = "gpu"), allow(unused_variables))]
pub fn create_backend(
    kind: BackendKind,
    settings: &EngineSettings,
) -> BlendResult<Box<dyn BlendBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new())),
        #[cfg(feature = "gpu")]
        BackendKind::Gpu => match crate::render::gpu::GpuBackend::new(settings) {
            Ok(backend) => Ok(Box::new(backend)),
            Err(e) if e.is_fatal() && settings.fallback_to_cpu => {
                tracing::warn!(error = %e, "gpu backend unavailable, using cpu backend");
                Ok(Box::new(crate::render::cpu::CpuBackend::new()))
            }
            Err(e) => Err(e),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
