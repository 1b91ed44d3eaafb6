use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let decoded = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(
        decoded.pixel(0, 0).unwrap(),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_jpeg_is_opaque() {
    let img = image::RgbImage::from_pixel(8, 4, image::Rgb([200, 10, 10]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();
    let decoded = decode_image(&buf).unwrap();
    assert_eq!(decoded.dimensions(), (8, 4));
    assert_eq!(decoded.pixel(3, 2).unwrap()[3], 255);
}

#[test]
fn truncated_bytes_are_decode_errors() {
    let img = image::RgbaImage::from_pixel(16, 16, image::Rgba([1, 2, 3, 255]));
    let bytes = png_bytes(img);
    let err = decode_image(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err, VinylError::Decode(_)), "{err}");

    assert!(matches!(
        decode_image(b"not an image"),
        Err(VinylError::Decode(_))
    ));
    assert!(matches!(decode_image(&[]), Err(VinylError::Decode(_))));
}

#[test]
fn encode_png_preserves_straight_pixels() {
    let src = RasterImage::from_straight_rgba8(
        2,
        1,
        vec![255, 0, 0, 255, 0, 0, 255, 255],
    )
    .unwrap();
    let bytes = encode_png(&src).unwrap();
    let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 1));
    assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(back.get_pixel(1, 0).0, [0, 0, 255, 255]);
}

#[test]
fn load_image_reports_missing_file() {
    let err = load_image(Path::new("does/not/exist.png")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.png"));
}
