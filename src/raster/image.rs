use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::{
    core::{Extent, Rgba8},
    error::{BlendError, BlendResult},
};

/// Channel layout of a [`RasterImage`], 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// Single luminance channel.
    Gray8,
    /// Luminance plus alpha.
    GrayAlpha8,
    /// Red, green, blue.
    Rgb8,
    /// Red, green, blue, straight alpha. The only layout the compositor accepts.
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::GrayAlpha8 => 2,
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// Immutable row-major raster.
///
/// Rows are stored top-down and tightly packed (`width * channels` bytes per row). Pixel data is
/// shared, so clones are cheap; operations produce new rasters instead of mutating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    extent: Extent,
    format: PixelFormat,
    data: Arc<[u8]>,
}

impl RasterImage {
    /// Wrap `data` as a raster, checking that its length matches the extent and format.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> BlendResult<Self> {
        let expected = expected_len(Extent::new(width, height), format)?;
        if data.len() != expected {
            return Err(BlendError::format(format!(
                "{width}x{height} {format:?} raster needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            extent: Extent::new(width, height),
            format,
            data: data.into(),
        })
    }

    /// RGBA8 raster filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> BlendResult<Self> {
        let len = expected_len(Extent::new(width, height), PixelFormat::Rgba8)?;
        let data = color.to_array().repeat(len / 4);
        Self::new(width, height, PixelFormat::Rgba8, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.extent.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.extent.height
    }

    /// Width and height.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Channel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw pixel bytes, top-down rows.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.extent.width as usize * self.format.channels()
    }

    /// Return one row of pixel bytes, or `None` when `y` is out of range.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.extent.height {
            return None;
        }
        let stride = self.stride();
        let start = y as usize * stride;
        self.data.get(start..start + stride)
    }

    /// RGBA8 pixel at `(x, y)`. `None` for non-RGBA8 rasters or out-of-range coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if self.format != PixelFormat::Rgba8 || x >= self.extent.width {
            return None;
        }
        let row = self.row(y)?;
        let i = x as usize * 4;
        Some(Rgba8::new(row[i], row[i + 1], row[i + 2], row[i + 3]))
    }

    /// Copy of this raster with the row order reversed.
    pub fn flipped_vertically(&self) -> Self {
        let mut out = Vec::with_capacity(self.data.len());
        let stride = self.stride();
        if stride > 0 {
            for row in self.data.chunks_exact(stride).rev() {
                out.extend_from_slice(row);
            }
        }
        Self {
            extent: self.extent,
            format: self.format,
            data: out.into(),
        }
    }

    /// Decode an encoded image (PNG, JPEG, ...) held in memory.
    ///
    /// Decoder failures surface as [`BlendError::Other`].
    pub fn decode(bytes: &[u8]) -> BlendResult<Self> {
        let img = image::load_from_memory(bytes).context("decode image")?;
        Self::from_dynamic(&img)
    }

    /// Convert from an `image` crate buffer, keeping 8-bit gray/rgb layouts as-is.
    ///
    /// 16-bit and float images are converted to RGBA8.
    pub fn from_dynamic(img: &image::DynamicImage) -> BlendResult<Self> {
        let (width, height) = (img.width(), img.height());
        let (format, data) = match img {
            image::DynamicImage::ImageLuma8(b) => (PixelFormat::Gray8, b.as_raw().clone()),
            image::DynamicImage::ImageLumaA8(b) => (PixelFormat::GrayAlpha8, b.as_raw().clone()),
            image::DynamicImage::ImageRgb8(b) => (PixelFormat::Rgb8, b.as_raw().clone()),
            image::DynamicImage::ImageRgba8(b) => (PixelFormat::Rgba8, b.as_raw().clone()),
            other => (PixelFormat::Rgba8, other.to_rgba8().into_raw()),
        };
        Self::new(width, height, format, data)
    }

    /// Convert to an `image` crate buffer of the same layout.
    pub fn to_dynamic(&self) -> BlendResult<image::DynamicImage> {
        let (w, h) = (self.width(), self.height());
        let data = self.data.to_vec();
        let img = match self.format {
            PixelFormat::Gray8 => {
                image::GrayImage::from_raw(w, h, data).map(image::DynamicImage::ImageLuma8)
            }
            PixelFormat::GrayAlpha8 => {
                image::GrayAlphaImage::from_raw(w, h, data).map(image::DynamicImage::ImageLumaA8)
            }
            PixelFormat::Rgb8 => {
                image::RgbImage::from_raw(w, h, data).map(image::DynamicImage::ImageRgb8)
            }
            PixelFormat::Rgba8 => {
                image::RgbaImage::from_raw(w, h, data).map(image::DynamicImage::ImageRgba8)
            }
        };
        img.ok_or_else(|| BlendError::format("raster buffer does not match its extent"))
    }
}

impl TryFrom<image::RgbaImage> for RasterImage {
    type Error = BlendError;

    fn try_from(img: image::RgbaImage) -> BlendResult<Self> {
        let (w, h) = img.dimensions();
        Self::new(w, h, PixelFormat::Rgba8, img.into_raw())
    }
}

fn expected_len(extent: Extent, format: PixelFormat) -> BlendResult<usize> {
    (extent.width as usize)
        .checked_mul(extent.height as usize)
        .and_then(|v| v.checked_mul(format.channels()))
        .ok_or_else(|| BlendError::format(format!("raster size {extent} overflows")))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/image.rs"]
mod tests;
