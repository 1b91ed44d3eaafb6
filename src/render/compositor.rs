use crate::assets::decode::{decode_image, encode_png, load_image};
use crate::config::AssetPaths;
use crate::foundation::core::RasterImage;
use crate::foundation::error::{VinylError, VinylResult};
use crate::layout::{BADGE_OFFSET, TitleStyle};
use crate::render::badge::build_badge;
use crate::render::canvas::Canvas;
use crate::text::title::{TitleBlock, TitleFont, TitleTypesetter, draw_wrapped_title};

/// Stacks template, wrapped title and circular badge into one image.
///
/// The template and font are loaded once and shared read-only; each render owns its own
/// canvas and text contexts, so one `Compositor` can serve any number of threads.
/// Badge and title placement are the fixed template layout from [`crate::layout`].
#[derive(Clone, Debug)]
pub struct Compositor {
    template: RasterImage,
    font: TitleFont,
}

impl Compositor {
    pub fn new(template: RasterImage, font: TitleFont) -> VinylResult<Self> {
        if template.width() == 0 || template.height() == 0 {
            return Err(VinylError::geometry(format!(
                "template must be non-empty, got {}x{}",
                template.width(),
                template.height()
            )));
        }
        Ok(Self { template, font })
    }

    /// Load template and font from disk.
    #[tracing::instrument(level = "info", skip_all, fields(template = %paths.template.display(), font = %paths.font.display()))]
    pub fn from_paths(paths: &AssetPaths) -> VinylResult<Self> {
        let template = load_image(&paths.template)?;
        let font = TitleFont::load(&paths.font)?;
        tracing::info!(
            width = template.width(),
            height = template.height(),
            family = font.family_name(),
            "assets loaded"
        );
        Self::new(template, font)
    }

    pub fn template(&self) -> &RasterImage {
        &self.template
    }

    pub fn font(&self) -> &TitleFont {
        &self.font
    }

    /// Decode `thumbnail`, composite it with `title` and return PNG bytes.
    ///
    /// Bytes that do not decode are [`VinylError::Decode`]. That includes a PNG declaring a
    /// zero width or height, which the PNG decoder itself rejects. Formats that do accept a
    /// zero dimension (PNM, for one) decode and then fail as [`VinylError::Geometry`] when the
    /// badge is scaled.
    #[tracing::instrument(level = "debug", skip_all, fields(thumbnail_len = thumbnail.len()))]
    pub fn render(&self, title: &str, thumbnail: &[u8]) -> VinylResult<Vec<u8>> {
        let thumb = decode_image(thumbnail)?;
        let out = self.render_image(title, &thumb)?;
        let png = encode_png(&out)?;
        tracing::debug!(bytes = png.len(), "encoded png");
        Ok(png)
    }

    /// Composite an already decoded thumbnail.
    ///
    /// The badge is built before the canvas exists, so a thumbnail that cannot be scaled
    /// fails without drawing anything.
    pub fn render_image(&self, title: &str, thumbnail: &RasterImage) -> VinylResult<RasterImage> {
        let badge = build_badge(thumbnail)?;

        let mut canvas = Canvas::new(self.template.width(), self.template.height())?;
        canvas.draw_image(&self.template, 0, 0);

        let style = TitleStyle::VINYL;
        let mut typesetter = TitleTypesetter::new(&self.font, style.font_size, style.color)?;
        draw_wrapped_title(&mut canvas, &TitleBlock::new(title, style), &mut typesetter);

        canvas.draw_image(&badge, BADGE_OFFSET.0, BADGE_OFFSET.1);
        canvas.into_image()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
