//! Shared primitives: colors, rasters and the crate error type.

pub mod core;
pub mod error;
