use std::path::Path;

use super::*;
use crate::foundation::core::Rgba8;

fn compositor() -> Compositor {
    Compositor::from_paths(&AssetPaths::under(Path::new(env!("CARGO_MANIFEST_DIR")))).unwrap()
}

fn solid(width: u32, height: u32, c: Rgba8) -> RasterImage {
    RasterImage::from_straight_rgba8(
        width,
        height,
        [c.r, c.g, c.b, c.a].repeat((width * height) as usize),
    )
    .unwrap()
}

#[test]
fn output_has_template_dimensions() {
    let comp = compositor();
    let out = comp
        .render_image("Test Video", &solid(1280, 720, Rgba8::opaque(200, 0, 0)))
        .unwrap();
    assert_eq!(out.dimensions(), comp.template().dimensions());
}

#[test]
fn badge_lands_at_fixed_offset() {
    let comp = compositor();
    let out = comp
        .render_image("", &solid(640, 360, Rgba8::opaque(200, 0, 0)))
        .unwrap();
    let (ox, oy) = BADGE_OFFSET;
    let (ox, oy) = (ox as u32, oy as u32);
    // Badge center shows the label hole, r=70 shows the thumbnail.
    assert_eq!(out.pixel(ox + 150, oy + 150).unwrap(), [43, 49, 55, 255]);
    let thumb = out.pixel(ox + 220, oy + 150).unwrap();
    assert!(thumb[0].abs_diff(200) <= 1 && thumb[1] == 0 && thumb[3] == 255, "{thumb:?}");
    // Outside the circle the template shows through.
    assert_eq!(out.pixel(ox + 5, oy + 5), comp.template().pixel(ox + 5, oy + 5));
}

#[test]
fn title_ink_stays_in_fixed_box() {
    let comp = compositor();
    let out = comp
        .render_image("Test Video", &solid(640, 360, Rgba8::opaque(200, 0, 0)))
        .unwrap();
    let style = TitleStyle::VINYL;
    let below_badge = BADGE_OFFSET.1 as u32 + 300;

    let mut changed = 0usize;
    for y in below_badge..out.height() {
        for x in 0..out.width() {
            if out.pixel(x, y) == comp.template().pixel(x, y) {
                continue;
            }
            changed += 1;
            assert!(
                f64::from(x) >= style.origin.x - 1.0
                    && f64::from(x) <= style.origin.x + style.max_width + 1.0,
                "ink at x={x}"
            );
            assert!(f64::from(y) >= style.origin.y - 10.0, "ink at y={y}");
        }
    }
    assert!(changed > 0);
}

#[test]
fn empty_template_is_rejected() {
    let font = compositor().font().clone();
    let empty = RasterImage::from_premul_rgba8(0, 0, Vec::new()).unwrap();
    assert!(matches!(
        Compositor::new(empty, font),
        Err(VinylError::Geometry(_))
    ));
}

#[test]
fn missing_assets_fail_construction() {
    let paths = AssetPaths {
        template: "nope/template.png".into(),
        ..AssetPaths::default()
    };
    assert!(matches!(
        Compositor::from_paths(&paths),
        Err(VinylError::Decode(_))
    ));
}

#[test]
fn bad_thumbnail_bytes_fail_without_panic() {
    let err = compositor().render("Title", b"\x89PNG\r\n\x1a\n\0\0").unwrap_err();
    assert!(matches!(err, VinylError::Decode(_)), "{err}");
}

#[test]
fn compositor_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Compositor>();
}
