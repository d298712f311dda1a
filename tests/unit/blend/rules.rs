use super::*;

#[test]
fn classify_follows_priority_order() {
    assert_eq!(classify(0, 0), BlendRule::BackgroundTransparent);
    assert_eq!(classify(0, 128), BlendRule::BackgroundTransparent);
    assert_eq!(classify(0, 255), BlendRule::BackgroundTransparent);
    assert_eq!(classify(1, 255), BlendRule::SpriteOpaque);
    assert_eq!(classify(255, 0), BlendRule::SpriteTransparent);
    assert_eq!(classify(255, 1), BlendRule::SourceOver);
}

#[test]
fn transparent_background_takes_raw_sprite() {
    let sprite = [255, 0, 0, 128];
    assert_eq!(blend_pixel([0, 0, 0, 0], sprite, false), sprite);
    assert_eq!(blend_pixel([9, 9, 9, 0], sprite, true), [255, 0, 0, 255]);
    // Even a fully transparent sprite pixel is written.
    assert_eq!(blend_pixel([9, 9, 9, 0], [1, 2, 3, 0], false), [1, 2, 3, 0]);
}

#[test]
fn opaque_sprite_overwrites() {
    assert_eq!(
        blend_pixel([255, 0, 0, 255], [0, 0, 255, 255], false),
        [0, 0, 255, 255]
    );
    assert_eq!(
        blend_pixel([255, 0, 0, 7], [0, 0, 255, 255], true),
        [0, 0, 255, 255]
    );
}

#[test]
fn transparent_sprite_keeps_background_even_when_forcing_opaque() {
    let bg = [10, 20, 30, 40];
    assert_eq!(blend_pixel(bg, [255, 255, 255, 0], true), bg);
    assert_eq!(blend_pixel(bg, [255, 255, 255, 0], false), bg);
}

#[test]
fn half_black_over_white_is_mid_gray() {
    let out = blend_pixel([255, 255, 255, 255], [0, 0, 0, 128], true);
    assert_eq!(out, [127, 127, 127, 255]);

    let unforced = blend_pixel([255, 255, 255, 255], [0, 0, 0, 128], false);
    assert_eq!(&unforced[..3], &[127, 127, 127]);
    assert_eq!(unforced[3], 255);
}

#[test]
fn source_over_alpha_accumulates() {
    // 0.5 + 0.5 * 0.5 = 0.75
    let out = blend_pixel([0, 0, 0, 128], [255, 255, 255, 128], false);
    let expected_a = ((128.0f32 / 255.0) + (128.0 / 255.0) * (1.0 - 128.0 / 255.0)) * 255.0;
    assert_eq!(out[3], expected_a.round() as u8);
    assert_eq!(out[0], 128);
}
