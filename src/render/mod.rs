//! Raster composition.
//!
//! [`canvas::Canvas`] is the drawing surface, [`badge`] builds the circular thumbnail and
//! [`compositor::Compositor`] stacks template, title and badge into the final image.

pub mod badge;
pub mod canvas;
pub mod compositor;
