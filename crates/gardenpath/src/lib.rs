#![forbid(unsafe_code)]

//! Garden Path public facade crate.
//!
//! Re-exports the engine, render and preset crates, and adds the pieces a
//! front end needs on top of them: a [`Session`] that binds UI-style inputs
//! to the engine, layered [`Config`], logging setup, and the command-line
//! interface used by the `gardenpath` binary.

use std::fmt;

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod session;

// --- Engine re-exports -----------------------------------------------------

pub use gpath_engine::{
    Brightness, ColorSet, EngineConfig, FrameClock, FrameStats, GradientOffsets, GradientPair,
    GridGeometry, Palette, PatternEngine, PatternVariant, RateSetting, TimingController,
};

// --- Render re-exports -----------------------------------------------------

pub use gpath_core::geometry::{Rect, Size};
pub use gpath_render::export::{ExportError, ExportFormat};
pub use gpath_render::{
    CountingSurface, Framebuffer, PackedRgba, Quad, QuadFill, QuadRecorder, QuadSurface, Rgbf,
};

// --- Preset re-exports -----------------------------------------------------

pub use gpath_preset::{
    DirPresetStore, MemoryPresetStore, Preset, PresetStore, StoreError, StoreResult,
};

pub use config::Config;
pub use session::{PresetSource, Session};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Garden Path front ends.
#[derive(Debug)]
pub enum Error {
    /// I/O failure outside the preset store.
    Io(std::io::Error),
    /// Preset store failure.
    Store(StoreError),
    /// Frame export failure.
    Export(ExportError),
    /// Invalid configuration value or file.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<ExportError> for Error {
    fn from(err: ExportError) -> Self {
        Self::Export(err)
    }
}

/// Standard result type for Garden Path APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Config, Error, Framebuffer, PatternEngine, PatternVariant, Preset, PresetStore,
        QuadSurface, RateSetting, Result, Session, Size, TimingController,
    };

    pub use crate::{core, engine, preset, render};
}

pub use gpath_core as core;
pub use gpath_engine as engine;
pub use gpath_preset as preset;
pub use gpath_render as render;
