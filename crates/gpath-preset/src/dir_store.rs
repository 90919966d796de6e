#![forbid(unsafe_code)]

//! Directory-backed preset store.

use crate::preset::Preset;
use crate::store::{PresetStore, StoreError, StoreResult, validate_name};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// One `<name>.json` file per preset.
///
/// # Atomic Writes
///
/// Writes use a temporary file + rename pattern:
/// 1. Write to `<name>.json.tmp`
/// 2. Flush and sync
/// 3. Rename `<name>.json.tmp` -> `<name>.json`
///
/// The directory is created on first save. Listing a directory that does not
/// exist yet yields no presets.
pub struct DirPresetStore {
    dir: PathBuf,
}

impl DirPresetStore {
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Store at [`default_dir`](Self::default_dir).
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(Self::default_dir())
    }

    /// `$XDG_CONFIG_HOME/gardenpath/presets`, then
    /// `~/.config/gardenpath/presets`, then `./presets`.
    pub fn default_dir() -> PathBuf {
        if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME")
            && !config_home.is_empty()
        {
            return PathBuf::from(config_home).join("gardenpath").join("presets");
        }
        if let Ok(home) = std::env::var("HOME")
            && !home.is_empty()
        {
            return PathBuf::from(home)
                .join(".config")
                .join("gardenpath")
                .join("presets");
        }
        PathBuf::from("presets")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a preset named `name` lives in.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{EXTENSION}"))
    }

    fn temp_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{EXTENSION}.tmp"))
    }
}

impl PresetStore for DirPresetStore {
    fn name(&self) -> &str {
        "DirPresetStore"
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::debug!(path = %path.display(), "skipping preset file with non UTF-8 name");
                continue;
            };
            if validate_name(stem).is_ok() {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn load(&self, name: &str) -> StoreResult<Preset> {
        validate_name(name)?;
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        let text = fs::read_to_string(&path)?;
        let preset = Preset::from_json_str(name, &text)?;
        tracing::debug!(path = %path.display(), preset = name, "loaded preset");
        Ok(preset)
    }

    fn save(&self, name: &str, preset: &Preset) -> StoreResult<()> {
        validate_name(name)?;
        fs::create_dir_all(&self.dir)?;

        let preset = preset.clone().renamed(name);
        let text = preset.to_json_pretty()?;

        let tmp_path = self.temp_path(name);
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(text.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }

        let path = self.path_for(name);
        fs::rename(&tmp_path, &path)?;
        tracing::debug!(path = %path.display(), preset = name, "saved preset");
        Ok(())
    }
}

impl fmt::Debug for DirPresetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirPresetStore")
            .field("dir", &self.dir)
            .finish()
    }
}
