//! Solid-color rectangular sprites for simple overlays (markers, highlight boxes).

use crate::{
    foundation::{
        core::Rgba8,
        error::{BlendError, BlendResult},
    },
    raster::image::{PixelFormat, RasterImage},
};

/// Border ring drawn from the outer edge of a sprite inward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SpriteBorder {
    /// Ring thickness in pixels. Zero draws nothing.
    pub thickness: u32,
    /// Ring color. Always drawn opaque.
    pub color: Rgba8,
}

/// Description of a solid sprite. Build the raster explicitly with [`SolidSprite::build`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SolidSprite {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Interior color.
    pub fill: Rgba8,
    /// Optional border ring.
    pub border: Option<SpriteBorder>,
}

impl SolidSprite {
    /// Sprite with no border.
    pub fn new(width: u32, height: u32, fill: Rgba8) -> Self {
        Self {
            width,
            height,
            fill,
            border: None,
        }
    }

    /// Same sprite with a border ring.
    pub fn with_border(self, thickness: u32, color: Rgba8) -> Self {
        Self {
            border: Some(SpriteBorder { thickness, color }),
            ..self
        }
    }

    /// Render the sprite raster.
    pub fn build(&self) -> BlendResult<RasterImage> {
        match self.border {
            Some(b) => fill_with_border(self.width, self.height, self.fill, b.thickness, b.color),
            None => fill(self.width, self.height, self.fill),
        }
    }
}

/// RGBA8 raster of `width x height` filled with `color`.
pub fn fill(width: u32, height: u32, color: Rgba8) -> BlendResult<RasterImage> {
    check_size(width, height)?;
    RasterImage::filled(width, height, color)
}

/// Like [`fill`], with an opaque `border_color` ring `thickness` pixels wide.
///
/// A thickness reaching the sprite's center covers the whole sprite.
pub fn fill_with_border(
    width: u32,
    height: u32,
    color: Rgba8,
    thickness: u32,
    border_color: Rgba8,
) -> BlendResult<RasterImage> {
    check_size(width, height)?;
    if thickness == 0 {
        return fill(width, height, color);
    }
    let inner = color.to_array();
    let ring = border_color.with_alpha(255).to_array();

    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        let edge_y = y < thickness || y >= height.saturating_sub(thickness);
        for x in 0..width {
            let edge = edge_y || x < thickness || x >= width.saturating_sub(thickness);
            data.extend_from_slice(if edge { &ring } else { &inner });
        }
    }
    RasterImage::new(width, height, PixelFormat::Rgba8, data)
}

fn check_size(width: u32, height: u32) -> BlendResult<()> {
    if width == 0 || height == 0 {
        return Err(BlendError::format(format!(
            "sprite size {width}x{height} must be non-zero"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/sprite.rs"]
mod tests;
