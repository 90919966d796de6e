#![forbid(unsafe_code)]

//! The preset record and its tolerant JSON codec.
//!
//! # File format
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "name": "red-green",
//!   "colors": [127, 0, 0, 0, 255, 0, 0, 255, 0, 127, 0, 0],
//!   "rate_hz": 60,
//!   "is_max_rate": false,
//!   "grid_size": 1
//! }
//! ```
//!
//! # Partial load tolerance
//!
//! Every field falls back to its default on its own when missing or
//! malformed, and each fallback is logged at `warn`. Out-of-range numbers are
//! clamped. A short `colors` array keeps the values it has and takes the rest
//! from the defaults. Only a document that is not a JSON object is rejected.

use crate::store::{StoreError, StoreResult};
use serde::Serialize;
use serde_json::Value;

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

/// Number of color channel values in a preset.
pub const COLOR_VALUES: usize = 12;

/// Colors used when a preset omits or garbles them.
pub const DEFAULT_COLORS: [u8; COLOR_VALUES] = RED_GREEN_COLORS;
pub const DEFAULT_RATE_HZ: i32 = 60;
pub const DEFAULT_GRID_SIZE: i32 = 1;

const RED_GREEN_COLORS: [u8; COLOR_VALUES] = [127, 0, 0, 0, 255, 0, 0, 255, 0, 127, 0, 0];
const GREEN_RED_COLORS: [u8; COLOR_VALUES] = [0, 255, 0, 0, 70, 0, 70, 0, 0, 255, 0, 0];

/// A named parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Preset {
    pub name: String,
    /// Four RGB triples: gradient 1 start/end, gradient 2 start/end.
    pub colors: [u8; COLOR_VALUES],
    pub rate_hz: i32,
    pub is_max_rate: bool,
    pub grid_size: i32,
}

#[derive(Serialize)]
struct PresetFile<'a> {
    format_version: u32,
    #[serde(flatten)]
    preset: &'a Preset,
}

impl Preset {
    /// A preset with every field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: DEFAULT_COLORS,
            rate_hz: DEFAULT_RATE_HZ,
            is_max_rate: false,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, colors: [u8; COLOR_VALUES]) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_rate(mut self, rate_hz: i32) -> Self {
        self.rate_hz = rate_hz;
        self
    }

    #[must_use]
    pub fn with_max_rate(mut self, is_max_rate: bool) -> Self {
        self.is_max_rate = is_max_rate;
        self
    }

    /// Set the grid size. Values below one become one.
    #[must_use]
    pub fn with_grid_size(mut self, grid_size: i32) -> Self {
        self.grid_size = grid_size.max(1);
        self
    }

    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Colors widened to the engine's input type.
    pub fn color_values(&self) -> [i32; COLOR_VALUES] {
        self.colors.map(i32::from)
    }

    /// Serialize to the file format.
    pub fn to_json_value(&self) -> StoreResult<Value> {
        serde_json::to_value(PresetFile {
            format_version: FORMAT_VERSION,
            preset: self,
        })
        .map_err(|e| StoreError::Serialization(format!("failed to serialize preset: {e}")))
    }

    /// Serialize to pretty-printed JSON text.
    pub fn to_json_pretty(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(&PresetFile {
            format_version: FORMAT_VERSION,
            preset: self,
        })
        .map_err(|e| StoreError::Serialization(format!("failed to serialize preset: {e}")))
    }

    /// Parse JSON text. Malformed JSON is a serialization error.
    pub fn from_json_str(name: &str, text: &str) -> StoreResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| StoreError::Serialization(format!("failed to parse preset '{name}': {e}")))?;
        Self::from_json_value(name, &value)
    }

    /// Decode a preset stored under `name`, defaulting each bad field.
    ///
    /// The store key wins over any `name` field inside the document.
    pub fn from_json_value(name: &str, value: &Value) -> StoreResult<Self> {
        let Some(obj) = value.as_object() else {
            return Err(StoreError::Corruption(format!(
                "preset '{name}' is not a JSON object"
            )));
        };

        // Defaults are in place before any field is read.
        let mut preset = Preset::new(name);

        if let Some(version) = obj.get("format_version")
            && version.as_u64() != Some(FORMAT_VERSION as u64)
        {
            tracing::warn!(preset = name, stored = %version, expected = FORMAT_VERSION, "preset format version mismatch, reading anyway");
        }

        if let Some(stored) = obj.get("name").and_then(Value::as_str)
            && stored != name
        {
            tracing::debug!(preset = name, stored, "preset name differs from store key");
        }

        match obj.get("colors") {
            Some(Value::Array(items)) => preset.colors = parse_colors(name, items),
            Some(other) => {
                tracing::warn!(preset = name, found = %other, "colors is not an array, using defaults");
            }
            None => tracing::warn!(preset = name, "colors missing, using defaults"),
        }

        match obj.get("rate_hz").map(|v| (v, v.as_i64())) {
            Some((_, Some(hz))) => preset.rate_hz = clamp_i32(name, "rate_hz", hz),
            Some((v, None)) => {
                tracing::warn!(preset = name, found = %v, default = DEFAULT_RATE_HZ, "rate_hz is not an integer, using default");
            }
            None => {
                tracing::warn!(preset = name, default = DEFAULT_RATE_HZ, "rate_hz missing, using default");
            }
        }

        match obj.get("is_max_rate").map(|v| (v, v.as_bool())) {
            Some((_, Some(flag))) => preset.is_max_rate = flag,
            Some((v, None)) => {
                tracing::warn!(preset = name, found = %v, "is_max_rate is not a boolean, using false");
            }
            None => tracing::warn!(preset = name, "is_max_rate missing, using false"),
        }

        match obj.get("grid_size").map(|v| (v, v.as_i64())) {
            Some((_, Some(n))) => {
                let n = clamp_i32(name, "grid_size", n);
                if n < 1 {
                    tracing::warn!(preset = name, grid_size = n, "grid_size below 1, using 1");
                }
                preset.grid_size = n.max(1);
            }
            Some((v, None)) => {
                tracing::warn!(preset = name, found = %v, "grid_size is not an integer, using 1");
            }
            None => tracing::warn!(preset = name, "grid_size missing, using 1"),
        }

        Ok(preset)
    }
}

fn parse_colors(name: &str, items: &[Value]) -> [u8; COLOR_VALUES] {
    let mut colors = DEFAULT_COLORS;
    if items.len() < COLOR_VALUES {
        tracing::warn!(
            preset = name,
            found = items.len(),
            expected = COLOR_VALUES,
            "colors too short, filling the rest from defaults"
        );
    } else if items.len() > COLOR_VALUES {
        tracing::warn!(
            preset = name,
            found = items.len(),
            expected = COLOR_VALUES,
            "colors too long, ignoring extra values"
        );
    }
    for (i, item) in items.iter().take(COLOR_VALUES).enumerate() {
        match item.as_i64() {
            Some(v) => {
                let clamped = v.clamp(0, 255);
                if clamped != v {
                    tracing::warn!(preset = name, index = i, value = v, "color value out of range, clamping");
                }
                colors[i] = clamped as u8;
            }
            None => {
                tracing::warn!(preset = name, index = i, found = %item, "color value is not an integer, using default");
            }
        }
    }
    colors
}

fn clamp_i32(name: &str, field: &str, v: i64) -> i32 {
    let clamped = v.clamp(i32::MIN as i64, i32::MAX as i64);
    if clamped != v {
        tracing::warn!(preset = name, field, value = v, "value out of range, clamping");
    }
    clamped as i32
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in presets
// ─────────────────────────────────────────────────────────────────────────────

pub const BUILTIN_RED_GREEN: &str = "red-green";
pub const BUILTIN_GREEN_RED: &str = "green-red";

/// The presets that ship with the program, in display order.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::new(BUILTIN_RED_GREEN).with_colors(RED_GREEN_COLORS),
        Preset::new(BUILTIN_GREEN_RED).with_colors(GREEN_RED_COLORS),
    ]
}

/// Look up a built-in preset by name.
pub fn builtin(name: &str) -> Option<Preset> {
    builtin_presets().into_iter().find(|p| p.name == name)
}
