//! Description of the rotating triangle scene, independent of any GPU API.
//!
//! A [TriangleScene] is built each frame by the application and handed to a
//! renderer such as `trispin_viz_wgpu`.

#![warn(rust_2018_idioms, missing_debug_implementations, missing_docs)]

pub use scene::*;
pub use triangle::*;
pub use ultraviolet::{Mat4, Vec3};

mod scene;
mod triangle;
