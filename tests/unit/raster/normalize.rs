use super::*;
use crate::foundation::core::Rgba8;

#[test]
fn gray_expands_to_opaque_rgba() {
    let gray = RasterImage::new(2, 1, PixelFormat::Gray8, vec![0, 180]).unwrap();
    let n = normalize(&gray, None).unwrap();
    assert_eq!(n.raster().format(), PixelFormat::Rgba8);
    assert_eq!(n.data(), &[0, 0, 0, 255, 180, 180, 180, 255]);
}

#[test]
fn gray_alpha_keeps_alpha() {
    let ga = RasterImage::new(1, 1, PixelFormat::GrayAlpha8, vec![90, 12]).unwrap();
    let n = normalize(&ga, None).unwrap();
    assert_eq!(n.raster().pixel(0, 0), Some(Rgba8::new(90, 90, 90, 12)));
}

#[test]
fn rgb_gets_opaque_alpha() {
    let rgb = RasterImage::new(1, 1, PixelFormat::Rgb8, vec![1, 2, 3]).unwrap();
    let n = normalize(&rgb, None).unwrap();
    assert_eq!(n.data(), &[1, 2, 3, 255]);
}

#[test]
fn rgba_without_resize_passes_through() {
    let img = RasterImage::filled(4, 3, Rgba8::new(9, 8, 7, 6)).unwrap();
    let n = normalize(&img, None).unwrap();
    assert_eq!(n.raster(), &img);
    let same_size = normalize(&img, Some(Extent::new(4, 3))).unwrap();
    assert_eq!(same_size.into_raster(), img);
}

#[test]
fn empty_raster_is_a_format_error() {
    let img = RasterImage::new(0, 4, PixelFormat::Rgba8, vec![]).unwrap();
    assert!(matches!(normalize(&img, None), Err(BlendError::Format(_))));
}

#[test]
fn fit_within_preserves_aspect_ratio() {
    assert_eq!(
        fit_within(Extent::new(200, 100), Extent::new(50, 50)).unwrap(),
        Extent::new(50, 25)
    );
    assert_eq!(
        fit_within(Extent::new(100, 200), Extent::new(50, 50)).unwrap(),
        Extent::new(25, 50)
    );
    assert_eq!(
        fit_within(Extent::new(10, 10), Extent::new(40, 30)).unwrap(),
        Extent::new(30, 30)
    );
}

#[test]
fn fit_within_never_exceeds_target_or_hits_zero() {
    let out = fit_within(Extent::new(1000, 1), Extent::new(10, 10)).unwrap();
    assert_eq!(out, Extent::new(10, 1));
    assert!(fit_within(Extent::new(4, 4), Extent::new(0, 4)).is_err());
}

#[test]
fn resize_produces_fitted_rgba() {
    let img = RasterImage::filled(8, 4, Rgba8::opaque(200, 10, 10)).unwrap();
    let n = normalize(&img, Some(Extent::new(4, 4))).unwrap();
    assert_eq!(n.extent(), Extent::new(4, 2));
    assert_eq!(n.raster().pixel(3, 1), Some(Rgba8::opaque(200, 10, 10)));
}
