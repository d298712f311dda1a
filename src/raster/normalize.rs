use crate::{
    foundation::{
        core::Extent,
        error::{BlendError, BlendResult},
    },
    raster::image::{PixelFormat, RasterImage},
};

/// A non-empty RGBA8 raster, ready for upload.
///
/// Only [`normalize`] constructs this, so holders can rely on the layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedRaster(RasterImage);

impl NormalizedRaster {
    /// Borrow the underlying raster.
    pub fn raster(&self) -> &RasterImage {
        &self.0
    }

    /// Unwrap into the underlying raster.
    pub fn into_raster(self) -> RasterImage {
        self.0
    }

    /// Width and height.
    pub fn extent(&self) -> Extent {
        self.0.extent()
    }

    /// Tightly packed RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        self.0.data()
    }
}

/// Size that fits `source` inside `target`, preserving aspect ratio.
///
/// The scale factor is `min(target.w / source.w, target.h / source.h)`. Each side is floored, then
/// clamped to at least one pixel, so the result never exceeds `target`.
pub fn fit_within(source: Extent, target: Extent) -> BlendResult<Extent> {
    if source.is_empty() {
        return Err(BlendError::format(format!("cannot scale empty raster {source}")));
    }
    if target.is_empty() {
        return Err(BlendError::format(format!("target size {target} is empty")));
    }
    let sx = f64::from(target.width) / f64::from(source.width);
    let sy = f64::from(target.height) / f64::from(source.height);
    let scale = sx.min(sy);
    let side = |src: u32, max: u32| -> u32 {
        let v = (f64::from(src) * scale).floor() as u32;
        v.clamp(1, max)
    };
    Ok(Extent::new(
        side(source.width, target.width),
        side(source.height, target.height),
    ))
}

/// Bring a raster to the uniform RGBA8 layout, optionally scaled to fit `target`.
///
/// Gray, gray+alpha and RGB inputs are expanded to RGBA8 (missing alpha becomes 255). An RGBA8
/// input with no resize request is passed through untouched.
pub fn normalize(image: &RasterImage, target: Option<Extent>) -> BlendResult<NormalizedRaster> {
    if image.extent().is_empty() {
        return Err(BlendError::format(format!(
            "cannot normalize empty raster {}",
            image.extent()
        )));
    }

    let rgba = match image.format() {
        PixelFormat::Rgba8 => image.clone(),
        PixelFormat::Gray8 => expand(image, |px| [px[0], px[0], px[0], 255])?,
        PixelFormat::GrayAlpha8 => expand(image, |px| [px[0], px[0], px[0], px[1]])?,
        PixelFormat::Rgb8 => expand(image, |px| [px[0], px[1], px[2], 255])?,
    };

    let Some(target) = target else {
        return Ok(NormalizedRaster(rgba));
    };
    let size = fit_within(rgba.extent(), target)?;
    if size == rgba.extent() {
        return Ok(NormalizedRaster(rgba));
    }

    tracing::debug!(from = %rgba.extent(), to = %size, "resizing raster for upload");
    let buf = image::RgbaImage::from_raw(rgba.width(), rgba.height(), rgba.data().to_vec())
        .ok_or_else(|| BlendError::format("raster buffer does not match its extent"))?;
    let resized = image::imageops::resize(
        &buf,
        size.width,
        size.height,
        image::imageops::FilterType::Triangle,
    );
    Ok(NormalizedRaster(RasterImage::try_from(resized)?))
}

fn expand(image: &RasterImage, f: impl Fn(&[u8]) -> [u8; 4]) -> BlendResult<RasterImage> {
    let channels = image.format().channels();
    let mut out = Vec::with_capacity(image.extent().pixel_count() * 4);
    for px in image.data().chunks_exact(channels) {
        out.extend_from_slice(&f(px));
    }
    RasterImage::new(image.width(), image.height(), PixelFormat::Rgba8, out)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/normalize.rs"]
mod tests;
