use std::borrow::Cow;
use std::path::Path;

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{VinylError, VinylResult};
use crate::layout::TitleStyle;
use crate::render::canvas::Canvas;
use crate::text::wrap::{TextMeasure, wrap_lines};

/// Parley brush carrying a straight RGBA8 color through layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A parsed TrueType/OpenType face, shareable across threads.
#[derive(Clone, Debug)]
pub struct TitleFont {
    data: parley::fontique::Blob<u8>,
    family: String,
}

impl TitleFont {
    /// Parse font bytes and resolve the first family name they declare.
    pub fn from_bytes(bytes: Vec<u8>) -> VinylResult<Self> {
        let data = parley::fontique::Blob::from(bytes);
        let mut fcx = parley::FontContext::default();
        let families = fcx.collection.register_fonts(data.clone(), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| VinylError::decode("no font families found in font data"))?;
        let family = fcx
            .collection
            .family_name(family_id)
            .ok_or_else(|| VinylError::decode("registered font family has no name"))?
            .to_string();
        Ok(Self { data, family })
    }

    pub fn load(path: &Path) -> VinylResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| VinylError::decode(format!("read font '{}': {e}", path.display())))?;
        Self::from_bytes(bytes)
    }

    pub fn family_name(&self) -> &str {
        &self.family
    }

    pub(crate) fn font_data(&self) -> parley::FontData {
        parley::FontData::new(self.data.clone(), 0)
    }
}

/// Per-render text shaper: owns the Parley contexts for one face, size and color.
///
/// Parley contexts are not `Sync`; build one typesetter per render.
pub struct TitleTypesetter {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    font: parley::FontData,
    size_px: f32,
    brush: TextBrushRgba8,
}

impl TitleTypesetter {
    pub fn new(font: &TitleFont, size_px: f32, color: Rgba8) -> VinylResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(VinylError::validation(
                "font size must be finite and > 0",
            ));
        }
        let mut font_ctx = parley::FontContext::default();
        font_ctx.collection.register_fonts(font.data.clone(), None);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family: font.family.clone(),
            font: font.font_data(),
            size_px,
            brush: color.into(),
        })
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Shape `text` as a single unbroken line.
    pub fn layout_line(&mut self, text: &str) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::StyleProperty::FontFamily(parley::FontFamily::Single(
            parley::FontFamilyName::Named(Cow::Owned(self.family.clone())),
        )));
        builder.push_default(parley::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::StyleProperty::Brush(self.brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasure for TitleTypesetter {
    fn measure(&mut self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        f64::from(self.layout_line(text).width())
    }
}

/// Title text bound to the box it is wrapped into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TitleBlock<'a> {
    pub text: &'a str,
    pub style: TitleStyle,
}

impl<'a> TitleBlock<'a> {
    pub fn new(text: &'a str, style: TitleStyle) -> Self {
        Self { text, style }
    }
}

/// One placed line of a wrapped title.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleLine {
    pub text: String,
    pub width: f64,
    /// Top-left corner of the line box.
    pub origin: Point,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WrappedTitle {
    pub lines: Vec<TitleLine>,
}

impl WrappedTitle {
    pub fn max_line_width(&self) -> f64 {
        self.lines.iter().map(|l| l.width).fold(0.0, f64::max)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Wrap and position `block` without drawing anything.
pub fn layout_title<M: TextMeasure + ?Sized>(block: &TitleBlock<'_>, measure: &mut M) -> WrappedTitle {
    let style = &block.style;
    let lines = wrap_lines(block.text, style.max_width, measure)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let width = measure.measure(&text);
            TitleLine {
                origin: style.line_origin(i, width),
                width,
                text,
            }
        })
        .collect();
    WrappedTitle { lines }
}

/// Wrap `block` and fill every line onto `canvas`.
///
/// Each line's first baseline lands on [`TitleStyle::line_baseline`]. Empty lines only
/// advance the pen.
#[tracing::instrument(level = "debug", skip_all, fields(chars = block.text.chars().count()))]
pub fn draw_wrapped_title(
    canvas: &mut Canvas,
    block: &TitleBlock<'_>,
    typesetter: &mut TitleTypesetter,
) -> WrappedTitle {
    let style = &block.style;
    let wrapped = layout_title(block, typesetter);
    for (i, line) in wrapped.lines.iter().enumerate() {
        if line.text.is_empty() {
            continue;
        }
        let layout = typesetter.layout_line(&line.text);
        let ascent = layout
            .lines()
            .next()
            .map(|l| f64::from(l.metrics().baseline))
            .unwrap_or(0.0);
        let origin = Point::new(line.origin.x, style.line_baseline(i) - ascent);
        canvas.fill_text_layout(&layout, &typesetter.font, origin);
    }
    tracing::debug!(lines = wrapped.line_count(), "title wrapped");
    wrapped
}

#[cfg(test)]
#[path = "../../tests/unit/text/title.rs"]
mod tests;
