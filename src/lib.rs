//! Sprite-onto-background compositing with deterministic alpha rules.
//!
//! A [`Compositor`] blends an RGBA sprite onto a background image at an integer offset, with
//! optional toroidal wrap per axis, on a wgpu compute kernel (`gpu` feature) or on the CPU.
#![warn(missing_docs)]

mod blend;
mod engine;
mod foundation;
mod raster;
mod render;
mod settings;

pub use blend::{
    params::{BlendParameterBlock, BlendParameters},
    placement, rules,
};
pub use engine::Compositor;
pub use foundation::{
    core::{Extent, Rgba8},
    error::{BlendError, BlendResult},
};
pub use raster::{
    image::{PixelFormat, RasterImage},
    normalize::{NormalizedRaster, fit_within, normalize},
    sprite::{self, SolidSprite, SpriteBorder},
};
pub use render::{
    backend::{BackendKind, BlendBackend, create_backend},
    cpu::CpuBackend,
};
#[cfg(feature = "gpu")]
pub use render::gpu::{
    CompositeKernel, GpuBackend, GpuContext, TextureResource, TextureUsage, readback::read_back,
};
pub use settings::{EngineSettings, PowerPreference};
