use super::*;

#[test]
fn new_rejects_mismatched_length() {
    let err = RasterImage::new(2, 2, PixelFormat::Rgba8, vec![0; 15]).unwrap_err();
    assert!(matches!(err, BlendError::Format(_)));
    assert!(RasterImage::new(2, 2, PixelFormat::Gray8, vec![0; 4]).is_ok());
}

#[test]
fn filled_repeats_color() {
    let img = RasterImage::filled(3, 2, Rgba8::opaque(1, 2, 3)).unwrap();
    assert_eq!(img.data().len(), 24);
    assert_eq!(img.pixel(2, 1), Some(Rgba8::opaque(1, 2, 3)));
    assert_eq!(img.pixel(3, 0), None);
    assert_eq!(img.pixel(0, 2), None);
}

#[test]
fn flip_reverses_rows_only() {
    let data = vec![
        1, 1, 1, 1, 2, 2, 2, 2, //
        3, 3, 3, 3, 4, 4, 4, 4, //
        5, 5, 5, 5, 6, 6, 6, 6,
    ];
    let img = RasterImage::new(2, 3, PixelFormat::Rgba8, data).unwrap();
    let flipped = img.flipped_vertically();
    assert_eq!(flipped.row(0).unwrap(), &[5, 5, 5, 5, 6, 6, 6, 6]);
    assert_eq!(flipped.row(2).unwrap(), &[1, 1, 1, 1, 2, 2, 2, 2]);
    assert_eq!(flipped.flipped_vertically(), img);
}

#[test]
fn dynamic_round_trip_keeps_gray_layout() {
    let gray = image::GrayImage::from_raw(2, 1, vec![10, 200]).unwrap();
    let raster = RasterImage::from_dynamic(&image::DynamicImage::ImageLuma8(gray)).unwrap();
    assert_eq!(raster.format(), PixelFormat::Gray8);
    assert_eq!(raster.stride(), 2);

    let back = raster.to_dynamic().unwrap();
    assert_eq!(back.as_luma8().unwrap().as_raw(), &vec![10u8, 200]);
}

#[test]
fn sixteen_bit_input_converts_to_rgba8() {
    let img = image::DynamicImage::new_rgb16(2, 2);
    let raster = RasterImage::from_dynamic(&img).unwrap();
    assert_eq!(raster.format(), PixelFormat::Rgba8);
    assert_eq!(raster.pixel(1, 1), Some(Rgba8::BLACK));
}

#[test]
fn decode_reads_encoded_png() {
    let src = image::RgbaImage::from_raw(2, 1, vec![1, 2, 3, 255, 9, 8, 7, 128]).unwrap();
    let mut buf = Vec::new();
    src.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let raster = RasterImage::decode(&buf).unwrap();
    assert_eq!(raster.format(), PixelFormat::Rgba8);
    assert_eq!(raster.pixel(0, 0), Some(Rgba8::opaque(1, 2, 3)));
    assert_eq!(raster.pixel(1, 0), Some(Rgba8::new(9, 8, 7, 128)));
}

#[test]
fn decode_failure_is_a_foreign_error() {
    let err = RasterImage::decode(b"not an image").unwrap_err();
    assert!(matches!(err, BlendError::Other(_)), "{err:?}");
    assert!(err.to_string().contains("decode image"), "{err}");
}
