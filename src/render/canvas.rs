use kurbo::Shape;

use crate::foundation::core::{Affine, Circle, Point, RasterImage, Rect, Rgba8, raster_dims};
use crate::foundation::error::{VinylError, VinylResult};
use crate::text::title::TextBrushRgba8;

const PATH_TOLERANCE: f64 = 0.1;

/// Mutable raster surface for one render, backed by a `vello_cpu` render context.
///
/// Draw calls are recorded in order and rasterized when the canvas is consumed by
/// [`Canvas::into_image`]. Drawing state (color, line width, clip stack) persists across
/// calls until changed.
pub struct Canvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    color: Rgba8,
    line_width: f64,
    clip_depth: usize,
}

impl Canvas {
    /// Allocate a transparent canvas.
    pub fn new(width: u32, height: u32) -> VinylResult<Self> {
        let (w, h) = raster_dims(width, height)?;
        if w == 0 || h == 0 {
            return Err(VinylError::geometry(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
            color: Rgba8::BLACK,
            line_width: 1.0,
            clip_depth: 0,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    pub fn set_color(&mut self, color: Rgba8) {
        self.color = color;
    }

    pub fn set_rgb255(&mut self, r: u8, g: u8, b: u8) {
        self.color = Rgba8::opaque(r, g, b);
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Restrict every following draw call to the inside of `shape` until [`Canvas::pop_clip`].
    pub fn push_clip(&mut self, shape: &impl Shape) {
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.push_clip_layer(&shape.to_path(PATH_TOLERANCE));
        self.clip_depth += 1;
    }

    pub fn push_clip_circle(&mut self, center: Point, radius: f64) {
        self.push_clip(&Circle::new(center, radius));
    }

    /// Drop the innermost clip region. No-op when nothing is clipped.
    pub fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            return;
        }
        self.ctx.pop_layer();
        self.clip_depth -= 1;
    }

    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    pub fn fill(&mut self, shape: &impl Shape) {
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_paint(self.color.to_cpu());
        self.ctx.fill_path(&shape.to_path(PATH_TOLERANCE));
    }

    /// Outline `shape` with the current color; the stroke is centered on the outline.
    pub fn stroke(&mut self, shape: &impl Shape) {
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_paint(self.color.to_cpu());
        self.ctx.set_stroke(kurbo::Stroke::new(self.line_width));
        self.ctx.stroke_path(&shape.to_path(PATH_TOLERANCE));
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64) {
        self.fill(&Circle::new(center, radius));
    }

    pub fn stroke_circle(&mut self, center: Point, radius: f64) {
        self.stroke(&Circle::new(center, radius));
    }

    /// Draw `img` with its top-left corner at `(x, y)`, unscaled.
    pub fn draw_image(&mut self, img: &RasterImage, x: i32, y: i32) {
        if img.width() == 0 || img.height() == 0 {
            return;
        }
        self.ctx.set_transform(Affine::translate((f64::from(x), f64::from(y))));
        self.ctx.set_paint_transform(Affine::IDENTITY);
        self.ctx.set_paint(img.paint());
        self.ctx.fill_rect(&Rect::new(
            0.0,
            0.0,
            f64::from(img.width()),
            f64::from(img.height()),
        ));
    }

    /// Draw `img` so that the point `(ax * width, ay * height)` of the image lands on `(x, y)`.
    pub fn draw_image_anchored(&mut self, img: &RasterImage, x: i32, y: i32, ax: f64, ay: f64) {
        let x = f64::from(x) - ax * f64::from(img.width());
        let y = f64::from(y) - ay * f64::from(img.height());
        self.draw_image(img, x.trunc() as i32, y.trunc() as i32);
    }

    /// Fill every glyph run of a shaped `layout` with its brush, translated by `origin`.
    ///
    /// `origin` is where the layout's own `(0, 0)` lands on the canvas.
    pub(crate) fn fill_text_layout(
        &mut self,
        layout: &parley::Layout<TextBrushRgba8>,
        font: &vello_cpu::peniko::FontData,
        origin: Point,
    ) {
        self.ctx.set_transform(Affine::translate(origin.to_vec2()));
        for line in layout.lines() {
            for item in line.items() {
                let parley::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize everything drawn so far. Open clip regions are closed first.
    pub fn into_image(mut self) -> VinylResult<RasterImage> {
        while self.clip_depth > 0 {
            self.pop_clip();
        }
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(RasterImage::from_pixmap(pixmap))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
