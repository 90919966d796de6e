//! End-to-end engine behavior: colors in, pixels out.

use gpath_core::geometry::Size;
use gpath_engine::{
    Brightness, ColorSet, EngineConfig, FrameClock, PatternEngine, PatternVariant, RateSetting,
    TimingController,
};
use gpath_render::{Framebuffer, PackedRgba, QuadRecorder, Rgbf};
use std::time::Duration;

fn small_engine(grid: i32) -> PatternEngine {
    let mut e = PatternEngine::new(EngineConfig {
        viewport: Size::new(40, 40),
        ..EngineConfig::default()
    });
    e.set_grid_size(grid);
    e
}

#[test]
fn red_green_colors_normalize() {
    let mut e = PatternEngine::default();
    e.set_colors([127, 0, 0, 0, 255, 0, 0, 255, 0, 127, 0, 0]);
    let red = Rgbf::new(127.0 / 255.0, 0.0, 0.0);
    let green = Rgbf::new(0.0, 1.0, 0.0);
    assert_eq!(e.gradient1().start, red);
    assert_eq!(e.gradient1().end, green);
    assert_eq!(e.gradient2().start, green);
    assert_eq!(e.gradient2().end, red);
    assert_eq!(*e.colors(), ColorSet::RED_GREEN);
}

#[test]
fn four_by_four_checkerboard_pixels() {
    let mut e = small_engine(4);
    e.set_colors([255, 0, 0, 255, 0, 0, 0, 0, 255, 0, 0, 255]);
    e.advance_frame();

    let mut fb = Framebuffer::new(Size::new(40, 40));
    e.render_frame(&mut fb);

    let red = PackedRgba::rgb(255, 0, 0);
    let blue = PackedRgba::rgb(0, 0, 255);
    for col in 0..4u32 {
        let expected = if col % 2 == 0 { red } else { blue };
        for row in 0..4u32 {
            assert_eq!(fb.pixel(col * 10 + 5, row * 10 + 5), Some(expected), "cell ({col}, {row})");
        }
    }

    // Next frame swaps every column.
    e.advance_frame();
    e.render_frame(&mut fb);
    assert_eq!(fb.pixel(5, 5), Some(blue));
    assert_eq!(fb.pixel(15, 5), Some(red));
}

#[test]
fn rows_fade_down_each_column() {
    let mut e = small_engine(2);
    e.set_colors([255, 0, 0, 0, 0, 255, 0, 0, 0, 0, 0, 0]);
    e.advance_frame();
    let mut fb = Framebuffer::new(Size::new(40, 40));
    e.render_frame(&mut fb);
    assert_eq!(fb.pixel(0, 0), Some(PackedRgba::rgb(255, 0, 0)));
    assert_eq!(fb.pixel(0, 39), Some(PackedRgba::rgb(0, 0, 255)));
}

#[test]
fn single_cell_diagonal_reaches_secondary_in_corner() {
    let mut e = small_engine(1);
    e.set_colors([255, 0, 0, 0, 255, 0, 0, 0, 0, 0, 0, 0]);
    e.advance_frame();
    let mut fb = Framebuffer::new(Size::new(40, 40));
    e.render_frame(&mut fb);
    let tl = fb.pixel(0, 0).unwrap_or_default();
    let br = fb.pixel(39, 39).unwrap_or_default();
    assert!(tl.r() > 240 && tl.g() < 15);
    assert!(br.g() > 240 && br.r() < 15);
}

#[test]
fn brightness_scaling_dims_output() {
    let mut e = small_engine(1);
    e.set_colors([200, 200, 200, 200, 200, 200, 200, 200, 200, 200, 200, 200]);
    e.set_brightness([50, 50, 50, 50]);
    e.set_brightness_scaling(true);
    assert_eq!(*e.brightness(), Brightness::new([50; 4]));
    let mut fb = Framebuffer::new(Size::new(40, 40));
    e.render_frame(&mut fb);
    assert_eq!(fb.pixel(20, 20), Some(PackedRgba::rgb(100, 100, 100)));
}

#[test]
fn full_field_spans_viewport() {
    let mut e = small_engine(8);
    e.set_variant(PatternVariant::FullField);
    e.set_colors([0, 0, 0, 0, 0, 0, 0, 0, 0, 255, 255, 255]);
    let mut fb = Framebuffer::new(Size::new(40, 40));
    let stats = e.render_frame(&mut fb);
    assert_eq!(stats.quads, 1);
    let left = fb.pixel(0, 20).unwrap_or_default();
    let right = fb.pixel(39, 20).unwrap_or_default();
    assert!(left.r() < 10);
    assert!(right.r() > 245);
}

#[test]
fn rate_mapping_examples() {
    assert_eq!(RateSetting::Hz(60).interval_ms(), 0);
    assert_eq!(RateSetting::Hz(30).interval_ms(), 33);
    assert_eq!(RateSetting::Max.interval_ms(), 0);

    let mut timing = TimingController::new(10, false);
    timing.set_max_rate(true);
    assert_eq!(timing.interval_ms(), 0);
}

#[test]
fn clock_drives_engine_at_rate() {
    let timing = TimingController::new(10, false);
    let mut clock = FrameClock::from_timing(&timing);
    let mut e = small_engine(2);
    let mut rec = QuadRecorder::new();

    let mut rendered = 0;
    for _ in 0..100 {
        if clock.drive(&mut e, &mut rec, Duration::from_millis(10)).is_some() {
            rendered += 1;
        }
    }
    // One second at 10 Hz.
    assert_eq!(rendered, 10);
    assert_eq!(clock.ticks(), 10);
    assert!(!e.showing_gradient1());
    assert_eq!(rec.frames(), 10);
}
