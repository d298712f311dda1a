use super::*;

#[test]
fn fill_is_uniform() {
    let img = fill(3, 2, Rgba8::new(10, 20, 30, 40)).unwrap();
    assert_eq!(img.width(), 3);
    assert_eq!(img.height(), 2);
    assert!(
        img.data()
            .chunks_exact(4)
            .all(|px| px == [10, 20, 30, 40])
    );
}

#[test]
fn border_ring_is_opaque_and_interior_keeps_fill() {
    let fill_color = Rgba8::new(0, 0, 255, 100);
    let border = Rgba8::new(255, 0, 0, 10);
    let img = fill_with_border(6, 5, fill_color, 2, border).unwrap();

    for y in 0..5 {
        for x in 0..6 {
            let px = img.pixel(x, y).unwrap();
            let on_ring = x < 2 || x >= 4 || y < 2 || y >= 3;
            if on_ring {
                assert_eq!(px, Rgba8::opaque(255, 0, 0), "({x},{y})");
            } else {
                assert_eq!(px, fill_color, "({x},{y})");
            }
        }
    }
}

#[test]
fn thick_border_covers_everything() {
    let img = fill_with_border(3, 3, Rgba8::WHITE, 5, Rgba8::BLACK).unwrap();
    assert!(img.data().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn zero_thickness_is_plain_fill() {
    let a = fill_with_border(4, 4, Rgba8::WHITE, 0, Rgba8::BLACK).unwrap();
    let b = fill(4, 4, Rgba8::WHITE).unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_size_is_rejected() {
    assert!(matches!(fill(0, 3, Rgba8::WHITE), Err(BlendError::Format(_))));
    assert!(SolidSprite::new(3, 0, Rgba8::WHITE).build().is_err());
}

#[test]
fn solid_sprite_build_matches_factory() {
    let sprite = SolidSprite::new(5, 4, Rgba8::opaque(1, 2, 3)).with_border(1, Rgba8::BLACK);
    assert_eq!(
        sprite.build().unwrap(),
        fill_with_border(5, 4, Rgba8::opaque(1, 2, 3), 1, Rgba8::BLACK).unwrap()
    );
}
