use std::io::Cursor;
use std::path::Path;

use crate::foundation::core::RasterImage;
use crate::foundation::error::{VinylError, VinylResult};

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> VinylResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| VinylError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterImage::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> VinylResult<RasterImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        VinylError::decode(format!("failed to read image '{}': {e}", path.display()))
    })?;
    decode_image(&bytes)
        .map_err(|e| VinylError::decode(format!("image '{}': {e}", path.display())))
}

/// Encode a raster as PNG bytes (straight alpha, RGBA8).
pub fn encode_png(img: &RasterImage) -> VinylResult<Vec<u8>> {
    let (width, height) = img.dimensions();
    let rgba = image::RgbaImage::from_raw(width, height, img.to_straight_rgba8())
        .ok_or_else(|| VinylError::encode("raster buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| VinylError::encode(format!("write png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
