#![forbid(unsafe_code)]

//! Flicker pattern engine.
//!
//! # Role
//! Given a viewport, a grid size, two color pairs and an alternation phase,
//! [`PatternEngine`] decides the color of every grid cell for one frame and
//! emits the result as quads into a [`gpath_render::QuadSurface`].
//! [`TimingController`] maps a requested rate to a tick interval and
//! [`FrameClock`] turns elapsed time into frame advances.
//!
//! # Determinism
//! Rendering is pure arithmetic over the engine state. Two engines with the
//! same settings and the same number of `advance_frame` calls emit identical
//! quads.

pub mod clock;
pub mod grid;
pub mod palette;
pub mod pattern;
pub mod timing;

pub use clock::FrameClock;
pub use grid::GridGeometry;
pub use palette::{Brightness, ColorSet, GradientPair, Palette};
pub use pattern::{EngineConfig, FrameStats, GradientOffsets, PatternEngine, PatternVariant};
pub use timing::{RateSetting, TimingController};
