//! Vinyl-record style thumbnails for videos.
//!
//! A [`Compositor`] holds a background template and a title font loaded once at startup.
//! Each render turns a video thumbnail into a circular "record" badge, wraps the video
//! title into a fixed box, stacks both on the template and encodes the result as PNG.
//!
//! - [`Compositor::render`] for one title + thumbnail
//! - [`render_batch`] / [`run_manifest`] to fan independent requests out over a rayon pool
#![forbid(unsafe_code)]

mod foundation;

/// Image decode/encode.
pub mod assets;
/// Startup asset locations.
pub mod config;
/// Fixed pixel layout of the vinyl template.
pub mod layout;
/// Canvas, badge and compositor.
pub mod render;
/// Request context and batch rendering.
pub mod request;
/// Title wrapping and shaping.
pub mod text;

pub use crate::foundation::core::{Affine, Point, RasterImage, Rect, Rgba8};
pub use crate::foundation::error::{VinylError, VinylResult};

pub use crate::assets::decode::{decode_image, encode_png, load_image};
pub use crate::config::AssetPaths;
pub use crate::layout::{BadgeGeometry, TextAlign, TitleStyle};
pub use crate::render::badge::{build_badge, scale_to_height};
pub use crate::render::canvas::Canvas;
pub use crate::render::compositor::Compositor;
pub use crate::request::{
    BatchSummary, ManifestEntry, RequestContext, parse_manifest, render_batch, run_manifest,
};
pub use crate::text::title::{
    TitleBlock, TitleFont, TitleTypesetter, WrappedTitle, draw_wrapped_title, layout_title,
};
pub use crate::text::wrap::{TextMeasure, wrap_lines};
