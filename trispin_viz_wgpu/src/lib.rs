//! Renderer for [trispin_viz] using wgpu.
//!
//! This can be used directly or automatically via `trispin_window`.

#![warn(rust_2018_idioms, missing_debug_implementations, missing_docs)]

pub use data::ColorVertex;
pub use renderer::TriangleRenderer;

mod data;
mod pipelines;
mod renderer;
