use std::sync::{Mutex, PoisonError};

use crate::{
    blend::{params::BlendParameters, placement},
    foundation::error::BlendResult,
    raster::{image::RasterImage, normalize::normalize, sprite::SolidSprite},
    render::backend::{BackendKind, BlendBackend, create_backend},
    settings::EngineSettings,
};

/// Sprite compositor.
///
/// Owns one backend. Calls from any number of threads are serialized by an engine-wide lock
/// held for the whole operation, so each composite observes and produces complete images.
/// Errors never leave the compositor unusable.
pub struct Compositor {
    kind: BackendKind,
    backend: Mutex<Box<dyn BlendBackend>>,
}

impl Compositor {
    /// Build the backend named by `settings`.
    ///
    /// Fails with a configuration error when the backend cannot be created.
    pub fn new(settings: &EngineSettings) -> BlendResult<Self> {
        settings.validate()?;
        Ok(Self::with_backend(create_backend(settings.backend, settings)?))
    }

    /// Wrap an existing backend.
    pub fn with_backend(backend: Box<dyn BlendBackend>) -> Self {
        Self {
            kind: backend.kind(),
            backend: Mutex::new(backend),
        }
    }

    /// GPU compositor on a device the caller already owns.
    #[cfg(feature = "gpu")]
    pub fn with_gpu_context(
        ctx: crate::render::gpu::GpuContext,
        settings: &EngineSettings,
    ) -> BlendResult<Self> {
        let backend = crate::render::gpu::GpuBackend::with_context(ctx, settings)?;
        Ok(Self::with_backend(Box::new(backend)))
    }

    /// Backend this compositor runs on.
    pub fn backend_kind(&self) -> BackendKind {
        self.kind
    }

    /// Blend `sprite` onto `background` and return a new image the size of `background`.
    ///
    /// Both inputs are normalized to RGBA8 first. Neither input is modified.
    #[tracing::instrument(
        skip(self, background, sprite),
        fields(
            backend = ?self.kind,
            background = %background.extent(),
            sprite = %sprite.extent(),
        )
    )]
    pub fn composite(
        &self,
        background: &RasterImage,
        sprite: &RasterImage,
        params: BlendParameters,
    ) -> BlendResult<RasterImage> {
        let mut backend = self.backend.lock().unwrap_or_else(PoisonError::into_inner);

        let background = normalize(background, None)?;
        let sprite = normalize(sprite, None)?;
        placement::validate(background.extent(), sprite.extent(), &params)?;

        let out = backend.blend(&background, &sprite, &params)?;
        tracing::debug!(extent = %out.extent(), "composite complete");
        Ok(out)
    }

    /// Build `sprite` and composite it at `(x_offset, y_offset)`.
    ///
    /// `wrap` wraps columns only; rows never wrap.
    #[tracing::instrument(skip(self, background), fields(background = %background.extent()))]
    pub fn composite_solid_sprite(
        &self,
        background: &RasterImage,
        sprite: &SolidSprite,
        x_offset: i32,
        y_offset: i32,
        wrap: bool,
        force_opaque_result: bool,
    ) -> BlendResult<RasterImage> {
        let raster = sprite.build()?;
        let params =
            BlendParameters::at(x_offset, y_offset, force_opaque_result).wrapped(wrap, false);
        self.composite(background, &raster, params)
    }
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("backend", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
