use super::*;

#[test]
fn rgba8_premul_matches_rounding_rule() {
    let c = Rgba8 {
        r: 100,
        g: 50,
        b: 200,
        a: 128,
    };
    assert_eq!(
        c.to_premul(),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
}

#[test]
fn raster_from_straight_premultiplies() {
    let img = RasterImage::from_straight_rgba8(1, 1, vec![200, 100, 50, 0]).unwrap();
    assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));

    let img = RasterImage::from_straight_rgba8(2, 1, vec![10, 20, 30, 255, 1, 2, 3, 255]).unwrap();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.pixel(1, 0), Some([1, 2, 3, 255]));
    assert_eq!(img.pixel(2, 0), None);
}

#[test]
fn raster_rejects_len_mismatch_and_oversize() {
    assert!(matches!(
        RasterImage::from_premul_rgba8(2, 2, vec![0; 4]),
        Err(VinylError::Decode(_))
    ));
    assert!(matches!(
        RasterImage::from_premul_rgba8(70_000, 1, Vec::new()),
        Err(VinylError::Geometry(_))
    ));
}

#[test]
fn raster_allows_degenerate_dimensions() {
    let img = RasterImage::from_premul_rgba8(4, 0, Vec::new()).unwrap();
    assert_eq!(img.dimensions(), (4, 0));
    assert_eq!(img.pixel(0, 0), None);
}

#[test]
fn unpremultiply_inverts_premultiply_for_opaque_and_half_alpha() {
    let mut px = vec![128u8, 64, 32, 255, 64, 32, 16, 128];
    let original = px.clone();
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &original[..4]);
    unpremultiply_rgba8_in_place(&mut px);
    for (a, b) in px.iter().zip(original.iter()) {
        assert!((i16::from(*a) - i16::from(*b)).abs() <= 1);
    }
}

#[test]
fn clone_shares_pixels() {
    let img = RasterImage::from_premul_rgba8(1, 1, vec![9, 9, 9, 255]).unwrap();
    let copy = img.clone();
    assert_eq!(
        img.premul_bytes().as_ptr(),
        copy.premul_bytes().as_ptr()
    );
}
