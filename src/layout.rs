//! Fixed pixel layout of the vinyl template.
//!
//! The template artwork is drawn around these numbers, so they are constants rather than
//! configuration: moving one without redrawing the template breaks the composition.

use crate::foundation::core::{Point, Rgba8};

/// Outer radius of the circular badge.
pub const BADGE_RADIUS: f64 = 150.0;
/// Height the thumbnail is scaled to before being clipped to the badge circle.
pub const BADGE_TARGET_HEIGHT: u32 = 300;
/// Top-left corner of the badge on the template.
pub const BADGE_OFFSET: (i32, i32) = (75, 40);
/// Width of the outer badge border.
pub const BADGE_OUTER_STROKE: f64 = 10.0;
/// Radius of the inner "label hole" disc as a fraction of [`BADGE_RADIUS`].
pub const BADGE_LABEL_RADIUS_RATIO: f64 = 0.2;
/// Width of the ring around the label hole as a fraction of [`BADGE_RADIUS`].
pub const BADGE_LABEL_STROKE_RATIO: f64 = 0.325;
/// Fill of the label hole (#2B3137, the template background).
pub const BADGE_LABEL_COLOR: Rgba8 = Rgba8::opaque(43, 49, 55);
/// Color of both badge borders.
pub const BADGE_BORDER_COLOR: Rgba8 = Rgba8::BLACK;

/// Left edge and top of the title box.
pub const TITLE_ORIGIN: (f64, f64) = (59.0, 388.0);
/// Maximum measured width of any title line.
pub const TITLE_MAX_WIDTH: f64 = 350.0;
/// Baseline advance as a multiple of the font's line height.
pub const TITLE_LINE_SPACING: f64 = 1.5;
/// Title font size in pixels.
pub const TITLE_FONT_SIZE: f32 = 25.0;
pub const TITLE_COLOR: Rgba8 = Rgba8::WHITE;

/// Geometry of the circular badge, derived from the constants above.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BadgeGeometry {
    pub radius: f64,
    pub target_height: u32,
    pub outer_stroke: f64,
    pub label_radius: f64,
    pub label_stroke: f64,
}

impl BadgeGeometry {
    pub const VINYL: Self = Self {
        radius: BADGE_RADIUS,
        target_height: BADGE_TARGET_HEIGHT,
        outer_stroke: BADGE_OUTER_STROKE,
        label_radius: BADGE_RADIUS * BADGE_LABEL_RADIUS_RATIO,
        label_stroke: BADGE_RADIUS * BADGE_LABEL_STROKE_RATIO,
    };

    /// Side length of the (square) badge raster.
    pub fn side(&self) -> u32 {
        (self.radius * 2.0).round() as u32
    }

    pub fn center(&self) -> Point {
        Point::new(self.radius, self.radius)
    }

    /// Offset that centers a `width x height` image on the badge circle.
    ///
    /// Fractional offsets truncate toward zero, matching integer image placement.
    pub fn image_offset(&self, width: u32, height: u32) -> (i32, i32) {
        let dx = self.radius - f64::from(width) / 2.0;
        let dy = self.radius - f64::from(height) / 2.0;
        (dx.trunc() as i32, dy.trunc() as i32)
    }
}

/// Horizontal alignment of wrapped lines inside the title box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Position and styling of the title block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TitleStyle {
    pub origin: Point,
    pub max_width: f64,
    pub line_spacing: f64,
    pub font_size: f32,
    pub color: Rgba8,
    pub align: TextAlign,
}

impl TitleStyle {
    pub const VINYL: Self = Self {
        origin: Point::new(TITLE_ORIGIN.0, TITLE_ORIGIN.1),
        max_width: TITLE_MAX_WIDTH,
        line_spacing: TITLE_LINE_SPACING,
        font_size: TITLE_FONT_SIZE,
        color: TITLE_COLOR,
        align: TextAlign::Center,
    };

    /// Line height used for stacking: the font size converted from points at 96 DPI.
    pub fn font_height(&self) -> f64 {
        f64::from(self.font_size) * 72.0 / 96.0
    }

    /// Distance between consecutive line tops.
    pub fn line_advance(&self) -> f64 {
        self.font_height() * self.line_spacing
    }

    /// Top-left of line `index` for a line measuring `width`.
    pub fn line_origin(&self, index: usize, width: f64) -> Point {
        let x = match self.align {
            TextAlign::Left => self.origin.x,
            TextAlign::Center => self.origin.x + (self.max_width - width) / 2.0,
            TextAlign::Right => self.origin.x + self.max_width - width,
        };
        let y = self.origin.y + self.line_advance() * index as f64;
        Point::new(x, y)
    }

    /// Baseline of line `index`; the first line's top sits at `origin.y`.
    pub fn line_baseline(&self, index: usize) -> f64 {
        self.line_origin(index, 0.0).y + self.font_height()
    }

    /// Horizontal anchor lines are aligned against.
    pub fn anchor_x(&self) -> f64 {
        match self.align {
            TextAlign::Left => self.origin.x,
            TextAlign::Center => self.origin.x + self.max_width / 2.0,
            TextAlign::Right => self.origin.x + self.max_width,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/layout/vinyl.rs"]
mod tests;
