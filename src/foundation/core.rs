use std::sync::Arc;

use crate::foundation::error::{VinylError, VinylResult};

pub use kurbo::{Affine, Circle, Point, Rect, Vec2};

/// Straight (non-premultiplied) RGBA8 color used for drawing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { (((u16::from(c) * a) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }

    pub(crate) fn to_cpu(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Immutable premultiplied RGBA8 raster.
///
/// Cloning is cheap: pixels live behind an `Arc` so a decoded template can be shared by
/// every render without copying.
#[derive(Clone, Debug)]
pub struct RasterImage {
    pixmap: Arc<vello_cpu::Pixmap>,
}

impl RasterImage {
    /// Build an image from tightly packed, premultiplied RGBA8 bytes (row-major).
    pub fn from_premul_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> VinylResult<Self> {
        let (w, h) = raster_dims(width, height)?;
        if bytes.len()
            != (width as usize)
                .saturating_mul(height as usize)
                .saturating_mul(4)
        {
            return Err(VinylError::decode(format!(
                "raster byte len {} does not match {width}x{height}",
                bytes.len()
            )));
        }
        let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
            (width as usize) * (height as usize),
        );
        let mut opaque = true;
        for px in bytes.chunks_exact(4) {
            opaque &= px[3] == 255;
            pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
                px[0], px[1], px[2], px[3],
            ]));
        }
        Ok(Self::from_pixmap(vello_cpu::Pixmap::from_parts_with_opacity(
            pixels, w, h, !opaque,
        )))
    }

    /// Build an image from straight-alpha RGBA8 bytes, premultiplying on the way in.
    pub fn from_straight_rgba8(width: u32, height: u32, mut bytes: Vec<u8>) -> VinylResult<Self> {
        premultiply_rgba8_in_place(&mut bytes);
        Self::from_premul_rgba8(width, height, bytes)
    }

    pub(crate) fn from_pixmap(pixmap: vello_cpu::Pixmap) -> Self {
        Self {
            pixmap: Arc::new(pixmap),
        }
    }

    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn premul_bytes(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = ((y as usize) * (self.width() as usize) + (x as usize)) * 4;
        let px = &self.premul_bytes()[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy suitable for encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.premul_bytes().to_vec();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// Image paint for unscaled placement: nearest sampling keeps pixels exact.
    pub(crate) fn paint(&self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::clone(&self.pixmap)),
            sampler: vello_cpu::peniko::ImageSampler {
                quality: vello_cpu::peniko::ImageQuality::Low,
                ..vello_cpu::peniko::ImageSampler::default()
            },
        }
    }
}

/// Validate raster dimensions against the rasterizer's `u16` surface limit.
pub(crate) fn raster_dims(width: u32, height: u32) -> VinylResult<(u16, u16)> {
    let w: u16 = width.try_into().map_err(|_| {
        VinylError::geometry(format!("raster width {width} exceeds {}", u16::MAX))
    })?;
    let h: u16 = height.try_into().map_err(|_| {
        VinylError::geometry(format!("raster height {height} exceeds {}", u16::MAX))
    })?;
    Ok((w, h))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        let unpremul = |c: u8| -> u8 { ((u16::from(c) * 255 + a / 2) / a).min(255) as u8 };
        px[0] = unpremul(px[0]);
        px[1] = unpremul(px[1]);
        px[2] = unpremul(px[2]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
