#![forbid(unsafe_code)]

//! Grid geometry: cell size and the per-row blend increment.

use gpath_core::geometry::{Rect, Size, ceil_div};

/// Square `n x n` grid laid over a viewport.
///
/// Cell sizes are ceiling-rounded, so the last row and column may overhang
/// the viewport by up to `n - 1` pixels. Every viewport pixel is covered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    viewport: Size,
    grid_size: u32,
    cell: Size,
    interpolation_step: f32,
}

impl GridGeometry {
    /// Build the geometry for `grid_size` cells per side. Zero is treated as one.
    pub fn new(viewport: Size, grid_size: u32) -> Self {
        let n = grid_size.max(1);
        Self {
            viewport,
            grid_size: n,
            cell: Size::new(ceil_div(viewport.width, n), ceil_div(viewport.height, n)),
            interpolation_step: 1.0 / (n - 1).max(1) as f32,
        }
    }

    /// Clamp a signed UI value to a valid grid size.
    #[inline]
    pub fn clamp_grid_size(n: i32) -> u32 {
        n.max(1) as u32
    }

    #[inline]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[inline]
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    #[inline]
    pub fn cell_width(&self) -> u32 {
        self.cell.width
    }

    #[inline]
    pub fn cell_height(&self) -> u32 {
        self.cell.height
    }

    /// Blend fraction added per row: `1 / max(n - 1, 1)`.
    #[inline]
    pub fn interpolation_step(&self) -> f32 {
        self.interpolation_step
    }

    /// Number of cells.
    #[inline]
    pub fn cell_count(&self) -> u64 {
        self.grid_size as u64 * self.grid_size as u64
    }

    /// Pixel rectangle of the cell at `(col, row)`.
    #[inline]
    pub fn cell_rect(&self, col: u32, row: u32) -> Rect {
        Rect::new(
            col.saturating_mul(self.cell.width),
            row.saturating_mul(self.cell.height),
            self.cell.width,
            self.cell.height,
        )
    }

    /// Same grid size over a different viewport.
    #[must_use]
    pub fn with_viewport(&self, viewport: Size) -> Self {
        Self::new(viewport, self.grid_size)
    }
}
