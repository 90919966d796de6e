#![forbid(unsafe_code)]

//! The draw-quad seam between the pattern engine and whatever paints pixels.
//!
//! A [`Quad`] is an axis-aligned rectangle plus a [`QuadFill`] describing how
//! its corner colors are shaded. Surfaces receive quads between
//! [`QuadSurface::begin_frame`] and [`QuadSurface::end_frame`].

use crate::color::Rgbf;
use gpath_core::geometry::{Rect, Size};

/// How a quad is shaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadFill {
    /// Every corner has the same color.
    Flat(Rgbf),
    /// Three corners use `a`; the bottom-right corner uses `b`.
    ///
    /// Shaded as two triangles split along the top-left/bottom-right
    /// diagonal, so the weight of `b` at normalized `(u, v)` is `min(u, v)`.
    Diagonal { a: Rgbf, b: Rgbf },
    /// Left edge uses `left`, right edge uses `right`.
    Horizontal { left: Rgbf, right: Rgbf },
}

impl QuadFill {
    /// The color at the top-left corner.
    #[inline]
    pub fn primary(&self) -> Rgbf {
        match *self {
            Self::Flat(c) => c,
            Self::Diagonal { a, .. } => a,
            Self::Horizontal { left, .. } => left,
        }
    }

    /// Shaded color at normalized quad coordinates `u, v` in `[0, 1]`.
    #[inline]
    pub fn color_at(&self, u: f32, v: f32) -> Rgbf {
        match *self {
            Self::Flat(c) => c,
            Self::Diagonal { a, b } => a.lerp(b, u.min(v).clamp(0.0, 1.0)),
            Self::Horizontal { left, right } => left.lerp(right, u.clamp(0.0, 1.0)),
        }
    }

    /// Whether every pixel gets the same color.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        match *self {
            Self::Flat(_) => true,
            Self::Diagonal { a, b } => a == b,
            Self::Horizontal { left, right } => left == right,
        }
    }
}

/// A colored rectangle to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub rect: Rect,
    pub fill: QuadFill,
}

impl Quad {
    #[inline]
    pub const fn new(rect: Rect, fill: QuadFill) -> Self {
        Self { rect, fill }
    }

    #[inline]
    pub const fn flat(rect: Rect, color: Rgbf) -> Self {
        Self::new(rect, QuadFill::Flat(color))
    }
}

/// Anything that can receive draw-quad commands.
pub trait QuadSurface {
    /// Called once before the quads of a frame. `viewport` is the engine's
    /// viewport; quads may overhang it.
    fn begin_frame(&mut self, _viewport: Size) {}

    /// Draw one quad.
    fn draw_quad(&mut self, quad: Quad);

    /// Called once after the last quad of a frame.
    fn end_frame(&mut self) {}
}

impl<S: QuadSurface + ?Sized> QuadSurface for &mut S {
    fn begin_frame(&mut self, viewport: Size) {
        (**self).begin_frame(viewport);
    }

    fn draw_quad(&mut self, quad: Quad) {
        (**self).draw_quad(quad);
    }

    fn end_frame(&mut self) {
        (**self).end_frame();
    }
}

/// Records the quads of the most recent frame.
#[derive(Debug, Clone, Default)]
pub struct QuadRecorder {
    quads: Vec<Quad>,
    viewport: Size,
    frames: u64,
}

impl QuadRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quads drawn since the last `begin_frame`.
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Viewport announced by the last `begin_frame`.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Number of frames begun.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Take the recorded quads, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<Quad> {
        std::mem::take(&mut self.quads)
    }
}

impl QuadSurface for QuadRecorder {
    fn begin_frame(&mut self, viewport: Size) {
        self.quads.clear();
        self.viewport = viewport;
        self.frames += 1;
    }

    fn draw_quad(&mut self, quad: Quad) {
        self.quads.push(quad);
    }
}

/// Counts frames and quads without storing them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingSurface {
    pub frames: u64,
    pub quads: u64,
}

impl QuadSurface for CountingSurface {
    fn begin_frame(&mut self, _viewport: Size) {
        self.frames += 1;
    }

    fn draw_quad(&mut self, _quad: Quad) {
        self.quads += 1;
    }
}
