//! Property-based invariant tests for quad rasterization.
//!
//! 1. A flat quad changes exactly the pixels inside its clipped rectangle.
//! 2. Shaded quads never produce a channel outside the range of their endpoint colors.
//! 3. `begin_frame` leaves every pixel at the clear color.

use gpath_core::geometry::{Rect, Size};
use gpath_render::{Framebuffer, PackedRgba, Quad, QuadFill, QuadSurface, Rgbf};
use proptest::prelude::*;

fn rgb_strategy() -> impl Strategy<Value = Rgbf> {
    (0u8..=255, 0u8..=255, 0u8..=255).prop_map(|(r, g, b)| Rgbf::from_rgb8([r, g, b]))
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0u32..40, 0u32..40, 0u32..40, 0u32..40).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn channel_between(v: u8, a: f32, b: f32) -> bool {
    let lo = (a.min(b) * 255.0).floor() as i32 - 1;
    let hi = (a.max(b) * 255.0).ceil() as i32 + 1;
    (lo..=hi).contains(&(v as i32))
}

proptest! {
    #[test]
    fn flat_quad_touches_only_its_rect(w in 1u32..32, h in 1u32..32, rect in rect_strategy()) {
        let mut fb = Framebuffer::new(Size::new(w, h));
        fb.draw_quad(Quad::flat(rect, Rgbf::new(1.0, 1.0, 1.0)));
        for y in 0..h {
            for x in 0..w {
                let expected = if rect.contains(x, y) { PackedRgba::WHITE } else { PackedRgba::BLACK };
                prop_assert_eq!(fb.pixel(x, y), Some(expected));
            }
        }
    }

    #[test]
    fn shaded_pixels_stay_between_endpoints(
        a in rgb_strategy(),
        b in rgb_strategy(),
        rect in rect_strategy(),
        horizontal in any::<bool>(),
    ) {
        let fill = if horizontal {
            QuadFill::Horizontal { left: a, right: b }
        } else {
            QuadFill::Diagonal { a, b }
        };
        let mut fb = Framebuffer::new(Size::new(32, 32));
        fb.draw_quad(Quad::new(rect, fill));
        let clip = rect.intersection(&Rect::new(0, 0, 32, 32));
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                let px = fb.pixel(x, y).unwrap_or_default();
                prop_assert!(channel_between(px.r(), a.r, b.r));
                prop_assert!(channel_between(px.g(), a.g, b.g));
                prop_assert!(channel_between(px.b(), a.b, b.b));
            }
        }
    }

    #[test]
    fn begin_frame_clears(w in 1u32..32, h in 1u32..32, rect in rect_strategy()) {
        let mut fb = Framebuffer::new(Size::new(8, 8)).with_clear_color(PackedRgba::GREEN);
        fb.draw_quad(Quad::flat(rect, Rgbf::new(1.0, 0.0, 0.0)));
        fb.begin_frame(Size::new(w, h));
        prop_assert_eq!(fb.size(), Size::new(w, h));
        prop_assert!(fb.pixels().iter().all(|p| *p == PackedRgba::GREEN));
    }
}
