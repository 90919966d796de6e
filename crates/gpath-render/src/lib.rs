#![forbid(unsafe_code)]

//! Render kernel: colors, the draw-quad seam, and a software framebuffer.
//!
//! The pattern engine never touches pixels. It emits [`quad::Quad`] commands
//! into any [`quad::QuadSurface`]; this crate provides a recording surface for
//! tests, a counting surface for timing runs, and a [`framebuffer::Framebuffer`]
//! that rasterizes quads so frames can be exported as images.

pub mod color;
pub mod export;
pub mod framebuffer;
pub mod quad;

pub use color::{PackedRgba, Rgbf};
pub use framebuffer::Framebuffer;
pub use quad::{CountingSurface, Quad, QuadFill, QuadRecorder, QuadSurface};
