//! Title wrapping and shaping.

pub mod title;
pub mod wrap;
