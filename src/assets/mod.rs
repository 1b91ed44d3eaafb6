//! Image decoding and encoding at the crate boundary.

/// Decode thumbnails and templates, encode PNG output.
pub mod decode;
