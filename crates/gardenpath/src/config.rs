#![forbid(unsafe_code)]

//! Layered configuration.
//!
//! Precedence, lowest first:
//!
//! 1. Built-in defaults
//! 2. JSON file passed with `--config`
//! 3. `GARDENPATH_*` environment variables
//! 4. Command-line flags
//!
//! | Variable | Field | Format |
//! |----------|-------|--------|
//! | `GARDENPATH_PRESET_DIR` | `preset_dir` | path |
//! | `GARDENPATH_VIEWPORT` | `viewport_width`, `viewport_height` | `WxH` |
//! | `GARDENPATH_VARIANT` | `variant` | `checkerboard` or `full-field` |

use crate::{Error, Result};
use gpath_core::geometry::Size;
use gpath_engine::{Brightness, ColorSet, EngineConfig, GradientOffsets, PatternVariant};
use gpath_preset::DirPresetStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PRESET_DIR: &str = "GARDENPATH_PRESET_DIR";
pub const ENV_VIEWPORT: &str = "GARDENPATH_VIEWPORT";
pub const ENV_VARIANT: &str = "GARDENPATH_VARIANT";

/// Serialized name of a [`PatternVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantSetting {
    #[default]
    Checkerboard,
    FullField,
}

impl From<VariantSetting> for PatternVariant {
    fn from(v: VariantSetting) -> Self {
        match v {
            VariantSetting::Checkerboard => PatternVariant::Checkerboard,
            VariantSetting::FullField => PatternVariant::FullField,
        }
    }
}

impl From<PatternVariant> for VariantSetting {
    fn from(v: PatternVariant) -> Self {
        match v {
            PatternVariant::Checkerboard => VariantSetting::Checkerboard,
            PatternVariant::FullField => VariantSetting::FullField,
        }
    }
}

/// Front-end configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub preset_dir: PathBuf,
    pub variant: VariantSetting,
    pub brightness_scaling: bool,
    pub brightness: [i32; 4],
    /// Full-field stop offsets for gradient 1 and gradient 2.
    pub gradient_offsets: [i32; 2],
    /// Preset applied when a session starts.
    pub initial_preset: String,
}

impl Default for Config {
    fn default() -> Self {
        let viewport = EngineConfig::DEFAULT_VIEWPORT;
        Self {
            viewport_width: viewport.width,
            viewport_height: viewport.height,
            preset_dir: DirPresetStore::default_dir(),
            variant: VariantSetting::Checkerboard,
            brightness_scaling: false,
            brightness: [100; 4],
            gradient_offsets: [0, 0],
            initial_preset: gpath_preset::preset::BUILTIN_RED_GREEN.to_string(),
        }
    }
}

impl Config {
    /// Defaults, overlaid with `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config = Self::from_json_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Apply `GARDENPATH_*` variables from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `GARDENPATH_*` variables looked up through `get`.
    ///
    /// Empty values are ignored. Unparseable values are errors.
    pub fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get(ENV_PRESET_DIR) {
            self.preset_dir = PathBuf::from(dir);
        }
        if let Some(val) = get(ENV_VIEWPORT) {
            let size = parse_viewport(&val)
                .ok_or_else(|| Error::Config(format!("{ENV_VIEWPORT}: expected WxH, got {val:?}")))?;
            self.set_viewport(size);
        }
        if let Some(val) = get(ENV_VARIANT) {
            let variant = PatternVariant::parse(&val)
                .ok_or_else(|| Error::Config(format!("{ENV_VARIANT}: unknown variant {val:?}")))?;
            self.variant = variant.into();
        }
        Ok(())
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    pub fn set_viewport(&mut self, size: Size) {
        self.viewport_width = size.width;
        self.viewport_height = size.height;
    }

    pub fn variant(&self) -> PatternVariant {
        self.variant.into()
    }

    /// Engine settings derived from this config, before any preset is applied.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            viewport: self.viewport(),
            grid_size: 1,
            colors: ColorSet::default(),
            brightness: Brightness::new(self.brightness),
            brightness_scaling: self.brightness_scaling,
            variant: self.variant(),
            offsets: GradientOffsets::new(self.gradient_offsets[0], self.gradient_offsets[1]),
        }
    }
}

/// Parse `WxH` (also accepts `X` and surrounding whitespace). Zero sides are rejected.
pub fn parse_viewport(text: &str) -> Option<Size> {
    let (w, h) = text.trim().split_once(['x', 'X'])?;
    let w: u32 = w.trim().parse().ok()?;
    let h: u32 = h.trim().parse().ok()?;
    (w > 0 && h > 0).then(|| Size::new(w, h))
}
