#![forbid(unsafe_code)]

//! Preset storage seam.
//!
//! # Design Invariants
//!
//! 1. **Graceful degradation**: store failures never panic; operations return `Result`.
//! 2. **Store key wins**: a loaded preset's `name` is the key it was stored under.
//! 3. **Sorted listing**: `list` returns names in ascending order.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StoreError::Io` | File I/O failure | Returned, nothing written |
//! | `StoreError::Serialization` | Unparseable JSON | Returned for that preset |
//! | `StoreError::Corruption` | Document is not an object, poisoned lock | Returned |
//! | `StoreError::NotFound` | No preset under that name | Returned |
//! | `StoreError::InvalidName` | Empty, hidden, or path-like name | Rejected before any I/O |

use crate::preset::Preset;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::RwLock;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur while listing, loading or saving presets.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// JSON encode/decode error.
    Serialization(String),
    /// Stored data has the wrong shape.
    Corruption(String),
    /// No preset with this name.
    NotFound(String),
    /// The name cannot be used as a preset key.
    InvalidName(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StoreError::Corruption(msg) => write!(f, "preset corruption: {msg}"),
            StoreError::NotFound(name) => write!(f, "preset not found: {name}"),
            StoreError::InvalidName(name) => write!(f, "invalid preset name: {name:?}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Reject names that would escape or hide inside a preset directory.
pub fn validate_name(name: &str) -> StoreResult<()> {
    let bad = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0'])
        || name.trim() != name;
    if bad {
        Err(StoreError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A place presets are listed from, loaded from and saved to.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait PresetStore: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Names of all stored presets, sorted.
    fn list(&self) -> StoreResult<Vec<String>>;

    /// Load the preset stored under `name`.
    fn load(&self, name: &str) -> StoreResult<Preset>;

    /// Store `preset` under `name`, replacing any existing entry.
    fn save(&self, name: &str, preset: &Preset) -> StoreResult<()>;

    /// Whether a preset is stored under `name`.
    fn contains(&self, name: &str) -> StoreResult<bool> {
        Ok(self.list()?.iter().any(|n| n == name))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryPresetStore {
    data: RwLock<BTreeMap<String, Preset>>,
}

impl MemoryPresetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `presets`, keyed by their names.
    #[must_use]
    pub fn with_presets(presets: impl IntoIterator<Item = Preset>) -> Self {
        Self {
            data: RwLock::new(presets.into_iter().map(|p| (p.name.clone(), p)).collect()),
        }
    }

    /// A store holding the built-in presets.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::with_presets(crate::preset::builtin_presets())
    }
}

impl PresetStore for MemoryPresetStore {
    fn name(&self) -> &str {
        "MemoryPresetStore"
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let guard = self
            .data
            .read()
            .map_err(|_| StoreError::Corruption("lock poisoned".into()))?;
        Ok(guard.keys().cloned().collect())
    }

    fn load(&self, name: &str) -> StoreResult<Preset> {
        validate_name(name)?;
        let guard = self
            .data
            .read()
            .map_err(|_| StoreError::Corruption("lock poisoned".into()))?;
        guard
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn save(&self, name: &str, preset: &Preset) -> StoreResult<()> {
        validate_name(name)?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| StoreError::Corruption("lock poisoned".into()))?;
        guard.insert(name.to_string(), preset.clone().renamed(name));
        Ok(())
    }
}

impl fmt::Debug for MemoryPresetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.data.read().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemoryPresetStore")
            .field("presets", &count)
            .finish()
    }
}
