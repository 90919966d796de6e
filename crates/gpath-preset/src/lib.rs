#![forbid(unsafe_code)]

//! Named presets for the Garden Path flicker engine.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Preset                               │
//! │   - name, 12 color values, rate, max-rate flag, grid size     │
//! │   - tolerant JSON decode: each bad field falls back alone     │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        PresetStore                            │
//! │   - MemoryPresetStore: in-memory (testing, ephemeral)         │
//! │   - DirPresetStore: one JSON file per preset (dir-store)      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Feature Gates
//!
//! - `dir-store` (default): enables [`DirPresetStore`].

#[cfg(feature = "dir-store")]
pub mod dir_store;
pub mod preset;
pub mod store;

#[cfg(feature = "dir-store")]
pub use dir_store::DirPresetStore;
pub use preset::{Preset, builtin, builtin_presets};
pub use store::{MemoryPresetStore, PresetStore, StoreError, StoreResult, validate_name};
