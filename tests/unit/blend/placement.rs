use super::*;

const BG: Extent = Extent::new(10, 10);

#[test]
fn in_bounds_placements_pass() {
    validate(BG, Extent::new(2, 2), &BlendParameters::at(8, 8, true)).unwrap();
    validate(BG, Extent::new(10, 10), &BlendParameters::at(0, 0, true)).unwrap();
}

#[test]
fn overhang_without_wrap_is_a_bounds_error() {
    let err = validate(BG, Extent::new(2, 2), &BlendParameters::at(9, 0, true)).unwrap_err();
    assert!(matches!(err, BlendError::Bounds(_)));
    assert!(err.to_string().contains("horizontal"));

    let err = validate(BG, Extent::new(2, 2), &BlendParameters::at(0, 9, true)).unwrap_err();
    assert!(err.to_string().contains("vertical"));
}

#[test]
fn negative_offset_needs_wrap_on_that_axis() {
    let p = BlendParameters::at(-1, 0, false);
    assert!(validate(BG, Extent::new(2, 2), &p).is_err());
    assert!(validate(BG, Extent::new(2, 2), &p.wrapped(true, false)).is_ok());
    let negative_row = BlendParameters::at(0, -1, false).wrapped(true, false);
    assert!(validate(BG, Extent::new(2, 2), &negative_row).is_err());
}

#[test]
fn wrap_allows_overhang_but_not_oversized_sprites() {
    let p = BlendParameters::at(9, 9, false).wrapped(true, true);
    validate(BG, Extent::new(2, 2), &p).unwrap();

    let err = validate(BG, Extent::new(11, 1), &p).unwrap_err();
    assert!(matches!(err, BlendError::Bounds(_)));
}

#[test]
fn map_axis_wraps_toroidally() {
    assert_eq!(map_axis(0, 9, 10, true), Some(9));
    assert_eq!(map_axis(1, 9, 10, true), Some(0));
    assert_eq!(map_axis(0, -1, 10, true), Some(9));
    assert_eq!(map_axis(0, -21, 10, true), Some(9));
}

#[test]
fn map_axis_drops_out_of_range_without_wrap() {
    assert_eq!(map_axis(1, 9, 10, false), None);
    assert_eq!(map_axis(0, -1, 10, false), None);
    assert_eq!(map_axis(3, 2, 10, false), Some(5));
    assert_eq!(map_axis(0, 0, 0, true), None);
}
