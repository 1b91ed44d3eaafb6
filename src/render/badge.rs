use crate::foundation::core::RasterImage;
use crate::foundation::error::{VinylError, VinylResult};
use crate::layout::{BADGE_BORDER_COLOR, BADGE_LABEL_COLOR, BadgeGeometry};
use crate::render::canvas::Canvas;

/// Scale `img` uniformly so that its height equals `target_height`.
///
/// The width keeps the aspect ratio, rounded to the nearest pixel and never below 1.
/// Resampling runs on premultiplied pixels so transparent edges do not bleed color.
pub fn scale_to_height(img: &RasterImage, target_height: u32) -> VinylResult<RasterImage> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(VinylError::geometry(format!(
            "cannot scale a {w}x{h} image"
        )));
    }
    if target_height == 0 {
        return Err(VinylError::geometry("target height must be > 0"));
    }
    let target_width = scaled_width(w, h, target_height);
    if (target_width, target_height) == (w, h) {
        return Ok(img.clone());
    }

    let src = image::RgbaImage::from_raw(w, h, img.premul_bytes().to_vec())
        .ok_or_else(|| VinylError::geometry("raster buffer does not match its dimensions"))?;
    let scaled = image::imageops::resize(
        &src,
        target_width,
        target_height,
        image::imageops::FilterType::Triangle,
    );
    RasterImage::from_premul_rgba8(target_width, target_height, scaled.into_raw())
}

/// Width of a `width x height` image scaled to `target_height`.
pub fn scaled_width(width: u32, height: u32, target_height: u32) -> u32 {
    let w = f64::from(width) * f64::from(target_height) / f64::from(height);
    (w.round() as u32).max(1)
}

/// Build the circular "vinyl record" badge from a thumbnail using the template geometry.
pub fn build_badge(thumbnail: &RasterImage) -> VinylResult<RasterImage> {
    build_badge_with(thumbnail, &BadgeGeometry::VINYL)
}

/// Build a `2r x 2r` badge: the thumbnail scaled to the badge height, centered and clipped
/// to a circle, ringed by a black border and overlaid with a label hole.
///
/// Both strokes are drawn inside the circular clip, so the outer border is half its nominal
/// width.
#[tracing::instrument(level = "debug", skip_all, fields(src_w = thumbnail.width(), src_h = thumbnail.height()))]
pub(crate) fn build_badge_with(thumbnail: &RasterImage, geom: &BadgeGeometry) -> VinylResult<RasterImage> {
    let scaled = scale_to_height(thumbnail, geom.target_height)?;
    let (dx, dy) = geom.image_offset(scaled.width(), scaled.height());
    tracing::debug!(
        scaled_w = scaled.width(),
        scaled_h = scaled.height(),
        dx,
        dy,
        "thumbnail scaled"
    );

    let side = geom.side();
    let center = geom.center();
    let mut canvas = Canvas::new(side, side)?;

    canvas.push_clip_circle(center, geom.radius);
    canvas.draw_image(&scaled, dx, dy);

    canvas.set_color(BADGE_BORDER_COLOR);
    canvas.set_line_width(geom.outer_stroke);
    canvas.stroke_circle(center, geom.radius);

    canvas.set_color(BADGE_LABEL_COLOR);
    canvas.fill_circle(center, geom.label_radius);

    canvas.set_color(BADGE_BORDER_COLOR);
    canvas.set_line_width(geom.label_stroke);
    canvas.stroke_circle(center, geom.label_radius);
    canvas.pop_clip();

    canvas.into_image()
}

#[cfg(test)]
#[path = "../../tests/unit/render/badge.rs"]
mod tests;
