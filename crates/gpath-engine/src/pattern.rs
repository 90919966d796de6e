#![forbid(unsafe_code)]

//! The pattern engine.
//!
//! # Checkerboard
//!
//! Column `c` starts in phase `showing_gradient1` when `c` is even and the
//! inverse when odd. Within a column, row `r` blends the column's primary
//! color toward its secondary by `r * step`:
//!
//! ```text
//! phase A: primary = gradient1.start, secondary = gradient1.end
//! phase B: primary = gradient2.end,   secondary = gradient2.start
//!
//! current_a = primary * toward1 + secondary * toward2
//! current_b = secondary * toward1 + primary * toward2
//! ```
//!
//! A one-cell grid is drawn with `current_a` on three corners and
//! `current_b` on the bottom-right one. Larger grids draw flat cells.
//!
//! # Full field
//!
//! One viewport-wide horizontal gradient from the active pair's start color
//! to its end color, with optional stop offsets.
//!
//! # Phase
//!
//! [`PatternEngine::advance_frame`] is the only place the top-level phase
//! changes. [`PatternEngine::render_frame`] reads it and leaves it alone, so
//! rendering twice without advancing emits the same quads.

use crate::grid::GridGeometry;
use crate::palette::{Brightness, ColorSet, FLAT_LEN, GradientPair, Palette};
use gpath_core::geometry::{Rect, Size};
use gpath_render::{Quad, QuadFill, QuadSurface, Rgbf};

/// Which drawing routine [`PatternEngine::render_frame`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternVariant {
    /// Alternating checkerboard of blended cells.
    #[default]
    Checkerboard,
    /// A single left-to-right gradient across the whole viewport.
    FullField,
}

impl PatternVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Checkerboard => "checkerboard",
            Self::FullField => "full-field",
        }
    }

    /// Parse a variant name. Accepts `full-field`, `full_field` and `fullfield`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "checkerboard" | "checker" => Some(Self::Checkerboard),
            "full-field" | "full_field" | "fullfield" => Some(Self::FullField),
            _ => None,
        }
    }
}

/// Lowest accepted gradient offset.
pub const OFFSET_MIN: i32 = -100;
/// Highest accepted gradient offset.
pub const OFFSET_MAX: i32 = 100;

/// Stop offsets for the full-field variant, one per gradient.
///
/// A positive offset pushes the start color's stop right to `offset / 100`.
/// A negative offset pulls the end color's stop left to `1 + offset / 100`.
/// Zero leaves the gradient spanning the full width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GradientOffsets {
    gradient1: i32,
    gradient2: i32,
}

impl GradientOffsets {
    pub fn new(gradient1: i32, gradient2: i32) -> Self {
        Self {
            gradient1: gradient1.clamp(OFFSET_MIN, OFFSET_MAX),
            gradient2: gradient2.clamp(OFFSET_MIN, OFFSET_MAX),
        }
    }

    pub fn gradient1(&self) -> i32 {
        self.gradient1
    }

    pub fn gradient2(&self) -> i32 {
        self.gradient2
    }

    /// Normalized `(start, end)` stop positions for a single offset.
    pub fn stops(offset: i32) -> (f32, f32) {
        let off = offset.clamp(OFFSET_MIN, OFFSET_MAX) as f32 / 100.0;
        if off > 0.0 {
            (off, 1.0)
        } else if off < 0.0 {
            (0.0, 1.0 + off)
        } else {
            (0.0, 1.0)
        }
    }
}

/// Initial engine state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub viewport: Size,
    pub grid_size: u32,
    pub colors: ColorSet,
    pub brightness: Brightness,
    pub brightness_scaling: bool,
    pub variant: PatternVariant,
    pub offsets: GradientOffsets,
}

impl EngineConfig {
    /// Viewport the original window used.
    pub const DEFAULT_VIEWPORT: Size = Size::new(400, 400);
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: Self::DEFAULT_VIEWPORT,
            grid_size: 1,
            colors: ColorSet::RED_GREEN,
            brightness: Brightness::FULL,
            brightness_scaling: false,
            variant: PatternVariant::Checkerboard,
            offsets: GradientOffsets::default(),
        }
    }
}

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    /// Quads emitted.
    pub quads: u32,
    /// Largest `toward2` blend weight used by any cell.
    pub max_blend: f32,
}

/// Computes cell colors and emits them as quads.
#[derive(Debug, Clone)]
pub struct PatternEngine {
    grid: GridGeometry,
    colors: ColorSet,
    brightness: Brightness,
    brightness_scaling: bool,
    palette: Palette,
    showing_gradient1: bool,
    cell_phase: bool,
    variant: PatternVariant,
    offsets: GradientOffsets,
}

impl PatternEngine {
    pub fn new(config: EngineConfig) -> Self {
        let palette = resolve(&config.colors, &config.brightness, config.brightness_scaling);
        Self {
            grid: GridGeometry::new(config.viewport, config.grid_size),
            colors: config.colors,
            brightness: config.brightness,
            brightness_scaling: config.brightness_scaling,
            palette,
            showing_gradient1: false,
            cell_phase: false,
            variant: config.variant,
            offsets: config.offsets,
        }
    }

    // ── Setters ──────────────────────────────────────────────────────────

    /// Assign the four corner colors from 12 channel values.
    ///
    /// Channels are clamped into `0..=255` and normalized by 255, scaled by
    /// brightness first when brightness scaling is on.
    pub fn set_colors(&mut self, rgb: [i32; FLAT_LEN]) {
        self.set_color_set(ColorSet::from_flat(rgb));
    }

    pub fn set_color_set(&mut self, colors: ColorSet) {
        self.colors = colors;
        self.refresh_palette();
        gpath_core::trace!(colors = ?self.colors.to_bytes(), "colors set");
    }

    /// Set per-color brightness percentages, clamped into `1..=100`.
    pub fn set_brightness(&mut self, values: [i32; 4]) {
        self.brightness = Brightness::new(values);
        self.refresh_palette();
        gpath_core::debug!(brightness = ?self.brightness.values(), "brightness set");
    }

    /// Switch between the brightness-scaled palette and the plain one.
    pub fn set_brightness_scaling(&mut self, enabled: bool) {
        self.brightness_scaling = enabled;
        self.refresh_palette();
        gpath_core::debug!(enabled, "brightness scaling toggled");
    }

    /// Set cells per side. Values below one become one.
    pub fn set_grid_size(&mut self, n: i32) {
        self.grid = GridGeometry::new(self.grid.viewport(), GridGeometry::clamp_grid_size(n));
        gpath_core::debug!(
            grid_size = self.grid.grid_size(),
            cell_w = self.grid.cell_width(),
            cell_h = self.grid.cell_height(),
            "grid size set"
        );
    }

    /// Change the viewport; cell size follows.
    pub fn resize(&mut self, viewport: Size) {
        self.grid = self.grid.with_viewport(viewport);
        gpath_core::debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport resized"
        );
    }

    pub fn set_variant(&mut self, variant: PatternVariant) {
        self.variant = variant;
    }

    /// Stop offsets for the full-field variant, clamped into `-100..=100`.
    pub fn set_gradient_offsets(&mut self, gradient1: i32, gradient2: i32) {
        self.offsets = GradientOffsets::new(gradient1, gradient2);
    }

    fn refresh_palette(&mut self) {
        self.palette = resolve(&self.colors, &self.brightness, self.brightness_scaling);
    }

    // ── Frame lifecycle ──────────────────────────────────────────────────

    /// Flip the alternation phase.
    #[inline]
    pub fn advance_frame(&mut self) {
        self.showing_gradient1 = !self.showing_gradient1;
    }

    /// Emit one frame into `surface`.
    pub fn render_frame<S: QuadSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let span = gpath_core::trace_span!(
            "render_frame",
            variant = self.variant.as_str(),
            grid_size = self.grid.grid_size(),
            showing_gradient1 = self.showing_gradient1
        );
        let _guard = span.enter();

        surface.begin_frame(self.grid.viewport());
        let stats = match self.variant {
            PatternVariant::Checkerboard => self.draw_checkerboard(surface),
            PatternVariant::FullField => self.draw_full_field(surface),
        };
        surface.end_frame();
        stats
    }

    fn draw_checkerboard<S: QuadSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let n = self.grid.grid_size();
        let step = self.grid.interpolation_step();
        let g1 = self.palette.gradient1;
        let g2 = self.palette.gradient2;
        let mut stats = FrameStats::default();

        for col in 0..n {
            let phase = if col % 2 == 0 {
                self.showing_gradient1
            } else {
                !self.showing_gradient1
            };
            self.cell_phase = phase;
            let (primary, secondary) = if phase {
                (g1.start, g1.end)
            } else {
                (g2.end, g2.start)
            };

            let mut toward2 = 0.0_f32;
            let mut toward1 = 1.0_f32;
            for row in 0..n {
                let current_a = Rgbf::weighted(primary, toward1, secondary, toward2);
                let fill = if n == 1 {
                    QuadFill::Diagonal {
                        a: current_a,
                        b: Rgbf::weighted(secondary, toward1, primary, toward2),
                    }
                } else {
                    QuadFill::Flat(current_a)
                };
                surface.draw_quad(Quad::new(self.grid.cell_rect(col, row), fill));

                stats.quads += 1;
                stats.max_blend = stats.max_blend.max(toward2);
                toward2 += step;
                toward1 -= step;
                // Bookkeeping only; colors come from the column phase.
                self.cell_phase = !self.cell_phase;
            }
        }
        stats
    }

    fn draw_full_field<S: QuadSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let (pair, offset) = if self.showing_gradient1 {
            (self.palette.gradient1, self.offsets.gradient1)
        } else {
            (self.palette.gradient2, self.offsets.gradient2)
        };
        let viewport = self.grid.viewport();
        let (start, end) = GradientOffsets::stops(offset);
        let w = viewport.width as f32;
        let start_px = ((start * w).round() as u32).min(viewport.width);
        let end_px = ((end * w).round() as u32).clamp(start_px, viewport.width);
        let h = viewport.height;

        let mut stats = FrameStats::default();
        let mut emit = |rect: Rect, fill: QuadFill| {
            if !rect.is_empty() {
                surface.draw_quad(Quad::new(rect, fill));
                stats.quads += 1;
            }
        };
        let (head, rest) = Rect::new(0, 0, viewport.width, h).split_x(start_px);
        let (band, tail) = rest.split_x(end_px - start_px);
        emit(head, QuadFill::Flat(pair.start));
        emit(
            band,
            QuadFill::Horizontal {
                left: pair.start,
                right: pair.end,
            },
        );
        emit(tail, QuadFill::Flat(pair.end));
        stats.max_blend = 1.0;
        stats
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    pub fn grid_size(&self) -> u32 {
        self.grid.grid_size()
    }

    pub fn viewport(&self) -> Size {
        self.grid.viewport()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn gradient1(&self) -> GradientPair {
        self.palette.gradient1
    }

    pub fn gradient2(&self) -> GradientPair {
        self.palette.gradient2
    }

    pub fn colors(&self) -> &ColorSet {
        &self.colors
    }

    pub fn brightness(&self) -> &Brightness {
        &self.brightness
    }

    pub fn brightness_scaling(&self) -> bool {
        self.brightness_scaling
    }

    pub fn showing_gradient1(&self) -> bool {
        self.showing_gradient1
    }

    /// Per-cell phase left over from the last render. Has no effect on output.
    pub fn cell_phase(&self) -> bool {
        self.cell_phase
    }

    pub fn variant(&self) -> PatternVariant {
        self.variant
    }

    pub fn offsets(&self) -> GradientOffsets {
        self.offsets
    }
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn resolve(colors: &ColorSet, brightness: &Brightness, scaling: bool) -> Palette {
    Palette::resolve(colors, scaling.then_some(brightness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpath_render::{CountingSurface, QuadRecorder};

    fn engine(grid: i32) -> PatternEngine {
        let mut e = PatternEngine::default();
        e.set_grid_size(grid);
        e
    }

    fn flat_color(q: &Quad) -> Rgbf {
        match q.fill {
            QuadFill::Flat(c) => c,
            other => panic!("expected flat fill, got {other:?}"),
        }
    }

    #[test]
    fn starts_on_gradient2() {
        assert!(!PatternEngine::default().showing_gradient1());
    }

    #[test]
    fn advance_twice_restores_phase() {
        let mut e = PatternEngine::default();
        let before = e.showing_gradient1();
        e.advance_frame();
        assert_ne!(e.showing_gradient1(), before);
        e.advance_frame();
        assert_eq!(e.showing_gradient1(), before);
    }

    #[test]
    fn render_does_not_toggle_phase() {
        let mut e = PatternEngine::default();
        let mut rec = QuadRecorder::new();
        e.render_frame(&mut rec);
        e.render_frame(&mut rec);
        assert!(!e.showing_gradient1());
    }

    #[test]
    fn single_cell_uses_diagonal_fill() {
        let mut e = engine(1);
        e.advance_frame();
        let mut rec = QuadRecorder::new();
        let stats = e.render_frame(&mut rec);
        assert_eq!(stats.quads, 1);
        let q = rec.quads()[0];
        assert_eq!(q.rect, Rect::new(0, 0, 400, 400));
        let g1 = e.gradient1();
        assert_eq!(
            q.fill,
            QuadFill::Diagonal {
                a: g1.start,
                b: g1.end
            }
        );
    }

    #[test]
    fn single_cell_phase_b_uses_asymmetric_pair() {
        let mut e = engine(1);
        let mut rec = QuadRecorder::new();
        e.render_frame(&mut rec);
        let g2 = e.gradient2();
        assert_eq!(
            rec.quads()[0].fill,
            QuadFill::Diagonal {
                a: g2.end,
                b: g2.start
            }
        );
    }

    #[test]
    fn rows_blend_from_primary_to_secondary() {
        let mut e = engine(3);
        e.advance_frame();
        let mut rec = QuadRecorder::new();
        let stats = e.render_frame(&mut rec);
        assert_eq!(stats.quads, 9);
        assert_eq!(stats.max_blend, 1.0);

        let g1 = e.gradient1();
        // Column 0 is in phase A: rows 0, 1, 2 are emitted in order.
        let col0: Vec<Rgbf> = rec.quads()[..3].iter().map(flat_color).collect();
        assert_eq!(col0[0], g1.start);
        assert!(col0[1].max_abs_diff(g1.start.lerp(g1.end, 0.5)) < 1e-6);
        assert!(col0[2].max_abs_diff(g1.end) < 1e-6);
    }

    #[test]
    fn columns_alternate_phase() {
        let mut e = engine(4);
        e.advance_frame();
        let mut rec = QuadRecorder::new();
        e.render_frame(&mut rec);
        let top: Vec<Rgbf> = (0..4).map(|c| flat_color(&rec.quads()[c * 4])).collect();
        assert_eq!(top[0], e.gradient1().start);
        assert_eq!(top[1], e.gradient2().end);
        assert_eq!(top[0], top[2]);
        assert_eq!(top[1], top[3]);
    }

    #[test]
    fn cell_rects_tile_the_grid() {
        let mut e = engine(3);
        let mut rec = QuadRecorder::new();
        e.render_frame(&mut rec);
        assert_eq!(rec.quads()[0].rect, Rect::new(0, 0, 134, 134));
        assert_eq!(rec.quads()[1].rect, Rect::new(0, 134, 134, 134));
        assert_eq!(rec.quads()[3].rect, Rect::new(134, 0, 134, 134));
        assert_eq!(rec.viewport(), Size::new(400, 400));
    }

    #[test]
    fn cell_phase_does_not_affect_output() {
        let mut e = engine(3);
        let mut first = QuadRecorder::new();
        e.render_frame(&mut first);
        let phase_after = e.cell_phase();
        let mut second = QuadRecorder::new();
        e.render_frame(&mut second);
        assert_eq!(first.quads(), second.quads());
        assert_eq!(e.cell_phase(), phase_after);
    }

    #[test]
    fn set_colors_normalizes_and_clamps() {
        let mut e = PatternEngine::default();
        e.set_colors([300, 0, 0, 0, -1, 0, 0, 0, 255, 0, 0, 0]);
        assert_eq!(e.gradient1().start, Rgbf::new(1.0, 0.0, 0.0));
        assert_eq!(e.gradient1().end, Rgbf::new(0.0, 0.0, 0.0));
        assert_eq!(e.gradient2().start, Rgbf::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn brightness_applies_only_when_scaling_enabled() {
        let mut e = PatternEngine::default();
        e.set_colors([200, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        e.set_brightness([50, 100, 100, 100]);
        assert_eq!(e.gradient1().start, Rgbf::new(200.0 / 255.0, 0.0, 0.0));

        e.set_brightness_scaling(true);
        assert!((e.gradient1().start.r - 100.0 / 255.0).abs() < 1e-6);

        e.set_brightness_scaling(false);
        assert_eq!(e.gradient1().start, Rgbf::new(200.0 / 255.0, 0.0, 0.0));
    }

    #[test]
    fn grid_size_zero_becomes_one() {
        let mut e = PatternEngine::default();
        e.set_grid_size(0);
        assert_eq!(e.grid_size(), 1);
        e.set_grid_size(-7);
        assert_eq!(e.grid_size(), 1);
    }

    #[test]
    fn resize_recomputes_cells() {
        let mut e = engine(4);
        e.resize(Size::new(100, 50));
        assert_eq!(e.grid().cell_width(), 25);
        assert_eq!(e.grid().cell_height(), 13);
        assert_eq!(e.grid_size(), 4);
    }

    #[test]
    fn full_field_uses_active_gradient() {
        let mut e = PatternEngine::default();
        e.set_variant(PatternVariant::FullField);
        let mut rec = QuadRecorder::new();
        let stats = e.render_frame(&mut rec);
        assert_eq!(stats.quads, 1);
        let g2 = e.gradient2();
        assert_eq!(
            rec.quads()[0],
            Quad::new(
                Rect::new(0, 0, 400, 400),
                QuadFill::Horizontal {
                    left: g2.start,
                    right: g2.end
                }
            )
        );

        e.advance_frame();
        e.render_frame(&mut rec);
        let g1 = e.gradient1();
        assert_eq!(
            rec.quads()[0].fill,
            QuadFill::Horizontal {
                left: g1.start,
                right: g1.end
            }
        );
    }

    #[test]
    fn positive_offset_moves_start_stop() {
        let mut e = PatternEngine::default();
        e.set_variant(PatternVariant::FullField);
        e.set_gradient_offsets(0, 25);
        let mut rec = QuadRecorder::new();
        let stats = e.render_frame(&mut rec);
        assert_eq!(stats.quads, 2);
        assert_eq!(rec.quads()[0].rect, Rect::new(0, 0, 100, 400));
        assert_eq!(rec.quads()[0].fill, QuadFill::Flat(e.gradient2().start));
        assert_eq!(rec.quads()[1].rect, Rect::new(100, 0, 300, 400));
    }

    #[test]
    fn negative_offset_moves_end_stop() {
        let mut e = PatternEngine::default();
        e.set_variant(PatternVariant::FullField);
        e.advance_frame();
        e.set_gradient_offsets(-50, 0);
        let mut rec = QuadRecorder::new();
        e.render_frame(&mut rec);
        assert_eq!(rec.quads().len(), 2);
        assert_eq!(rec.quads()[0].rect, Rect::new(0, 0, 200, 400));
        assert_eq!(rec.quads()[1].rect, Rect::new(200, 0, 200, 400));
        assert_eq!(rec.quads()[1].fill, QuadFill::Flat(e.gradient1().end));
    }

    #[test]
    fn offsets_clamp_and_saturate() {
        let o = GradientOffsets::new(250, -300);
        assert_eq!((o.gradient1(), o.gradient2()), (100, -100));
        assert_eq!(GradientOffsets::stops(100), (1.0, 1.0));
        assert_eq!(GradientOffsets::stops(-100), (0.0, 0.0));

        let mut e = PatternEngine::default();
        e.set_variant(PatternVariant::FullField);
        e.set_gradient_offsets(100, 100);
        let mut counter = CountingSurface::default();
        let stats = e.render_frame(&mut counter);
        assert_eq!(stats.quads, 1);
        assert_eq!(counter.quads, 1);
    }

    #[test]
    fn offsets_ignored_by_checkerboard() {
        let mut a = engine(2);
        let mut b = engine(2);
        b.set_gradient_offsets(40, -40);
        let mut ra = QuadRecorder::new();
        let mut rb = QuadRecorder::new();
        a.render_frame(&mut ra);
        b.render_frame(&mut rb);
        assert_eq!(ra.quads(), rb.quads());
    }

    #[test]
    fn variant_names_parse() {
        assert_eq!(PatternVariant::parse("Full-Field"), Some(PatternVariant::FullField));
        assert_eq!(PatternVariant::parse("checkerboard"), Some(PatternVariant::Checkerboard));
        assert_eq!(PatternVariant::parse("spiral"), None);
        assert_eq!(PatternVariant::FullField.as_str(), "full-field");
    }
}
