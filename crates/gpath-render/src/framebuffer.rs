#![forbid(unsafe_code)]

//! Software RGBA framebuffer that rasterizes quads.
//!
//! Quads are clipped to the framebuffer, so cells that overhang the viewport
//! edge (a consequence of ceiling-rounded cell sizes) are safe to draw.

use crate::color::PackedRgba;
use crate::quad::{Quad, QuadSurface};
use gpath_core::geometry::{Rect, Size};

/// Row-major pixel buffer implementing [`QuadSurface`].
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<PackedRgba>,
    clear_color: PackedRgba,
}

impl Framebuffer {
    /// Create a framebuffer cleared to black.
    pub fn new(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            pixels: vec![PackedRgba::BLACK; size.area() as usize],
            clear_color: PackedRgba::BLACK,
        }
    }

    /// Color used by [`clear`](Self::clear) and at the start of every frame.
    #[must_use]
    pub fn with_clear_color(mut self, color: PackedRgba) -> Self {
        self.clear_color = color;
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<PackedRgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y as usize) * (self.width as usize) + x as usize])
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(self.clear_color);
    }

    /// Resize, discarding content when the dimensions change.
    pub fn resize(&mut self, size: Size) {
        if size.width == self.width && size.height == self.height {
            return;
        }
        self.width = size.width;
        self.height = size.height;
        self.pixels.clear();
        self.pixels
            .resize(size.area() as usize, self.clear_color);
    }

    /// Packed RGB bytes, row-major, three bytes per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            out.extend_from_slice(&px.to_rgb8());
        }
        out
    }

    /// Fill a rectangle with one color, clipped to the buffer.
    pub fn fill_rect(&mut self, rect: Rect, color: PackedRgba) {
        let Some(clip) = rect.intersection_opt(&self.size().to_rect()) else {
            return;
        };
        let stride = self.width as usize;
        for y in clip.y..clip.bottom() {
            let row = y as usize * stride;
            self.pixels[row + clip.x as usize..row + clip.right() as usize].fill(color);
        }
    }

    fn rasterize(&mut self, quad: Quad) {
        if quad.fill.is_uniform() {
            self.fill_rect(quad.rect, quad.fill.primary().to_packed());
            return;
        }
        let Some(clip) = quad.rect.intersection_opt(&self.size().to_rect()) else {
            return;
        };
        // Sample at pixel centers in the quad's own (unclipped) coordinates.
        let w = quad.rect.width as f32;
        let h = quad.rect.height as f32;
        let stride = self.width as usize;
        for y in clip.y..clip.bottom() {
            let v = ((y - quad.rect.y) as f32 + 0.5) / h;
            let row = y as usize * stride;
            for x in clip.x..clip.right() {
                let u = ((x - quad.rect.x) as f32 + 0.5) / w;
                self.pixels[row + x as usize] = quad.fill.color_at(u, v).to_packed();
            }
        }
    }
}

impl QuadSurface for Framebuffer {
    fn begin_frame(&mut self, viewport: Size) {
        self.resize(viewport);
        self.clear();
    }

    fn draw_quad(&mut self, quad: Quad) {
        self.rasterize(quad);
    }
}
