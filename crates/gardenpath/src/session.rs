#![forbid(unsafe_code)]

//! The adapter between UI-style inputs and the engine.
//!
//! A [`Session`] owns one [`PatternEngine`], the rate state, the frame clock
//! and a preset store. Every input a control panel would produce maps to one
//! method here. Rate changes are pushed straight into the clock so the next
//! poll already runs at the new interval.
//!
//! A preset carries colors, rate and grid size only. Brightness and gradient
//! offsets come from [`Config`] and stay as they are when a preset is applied.

use crate::config::Config;
use crate::Result;
use gpath_engine::{FrameClock, FrameStats, PatternEngine, TimingController};
use gpath_preset::{Preset, PresetStore, StoreError};
use gpath_render::QuadSurface;
use std::fmt;
use std::time::Duration;

/// Where a listed preset comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetSource {
    /// Shipped with the program.
    Builtin,
    /// Found in the preset store. Shadows a built-in of the same name.
    Stored,
}

impl fmt::Display for PresetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("builtin"),
            Self::Stored => f.write_str("stored"),
        }
    }
}

pub struct Session {
    engine: PatternEngine,
    timing: TimingController,
    clock: FrameClock,
    store: Box<dyn PresetStore>,
    preset_name: Option<String>,
}

impl Session {
    /// A session with the engine configured from `config` and no preset applied.
    pub fn new(config: &Config, store: Box<dyn PresetStore>) -> Self {
        let timing = TimingController::default();
        Self {
            engine: PatternEngine::new(config.engine_config()),
            clock: FrameClock::from_timing(&timing),
            timing,
            store,
            preset_name: None,
        }
    }

    /// Like [`new`](Self::new), then apply `config.initial_preset`.
    pub fn open(config: &Config, store: Box<dyn PresetStore>) -> Result<Self> {
        let mut session = Self::new(config, store);
        session.load_preset(&config.initial_preset)?;
        Ok(session)
    }

    // ── Presets ──────────────────────────────────────────────────────────

    /// Built-in and stored preset names, sorted, stored entries shadowing built-ins.
    pub fn list_presets(&self) -> Result<Vec<(String, PresetSource)>> {
        let mut entries: Vec<(String, PresetSource)> = gpath_preset::builtin_presets()
            .into_iter()
            .map(|p| (p.name, PresetSource::Builtin))
            .collect();
        for name in self.store.list()? {
            match entries.iter_mut().find(|(n, _)| *n == name) {
                Some(entry) => entry.1 = PresetSource::Stored,
                None => entries.push((name, PresetSource::Stored)),
            }
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    /// Look a preset up in the store, falling back to the built-ins.
    pub fn resolve_preset(&self, name: &str) -> Result<Preset> {
        match self.store.load(name) {
            Ok(preset) => Ok(preset),
            Err(StoreError::NotFound(_)) => gpath_preset::builtin(name)
                .ok_or_else(|| StoreError::NotFound(name.to_string()).into()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve and apply a preset.
    pub fn load_preset(&mut self, name: &str) -> Result<Preset> {
        let preset = self.resolve_preset(name)?;
        self.apply_preset(&preset);
        Ok(preset)
    }

    /// Push every preset field into the engine and the rate state.
    ///
    /// Brightness and gradient offsets are left untouched.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.engine.set_colors(preset.color_values());
        self.engine.set_grid_size(preset.grid_size);
        self.timing.set_rate(preset.rate_hz);
        self.timing.set_max_rate(preset.is_max_rate);
        self.clock.set_interval(self.timing.interval());
        self.preset_name = Some(preset.name.clone());
        tracing::info!(
            preset = %preset.name,
            grid_size = self.engine.grid_size(),
            interval_ms = self.timing.interval_ms(),
            "preset applied"
        );
    }

    /// Snapshot the current settings as a preset called `name`.
    pub fn current_preset(&self, name: &str) -> Preset {
        Preset::new(name)
            .with_colors(self.engine.colors().to_bytes())
            .with_rate(self.timing.slider_hz())
            .with_max_rate(self.timing.is_max_rate())
            .with_grid_size(self.engine.grid_size() as i32)
    }

    /// Store the current settings under `name`.
    pub fn save_preset(&mut self, name: &str) -> Result<Preset> {
        let preset = self.current_preset(name);
        self.store.save(name, &preset)?;
        self.preset_name = Some(name.to_string());
        tracing::info!(preset = name, store = self.store.name(), "preset saved");
        Ok(preset)
    }

    /// Name of the last preset applied or saved.
    pub fn preset_name(&self) -> Option<&str> {
        self.preset_name.as_deref()
    }

    pub fn store(&self) -> &dyn PresetStore {
        self.store.as_ref()
    }

    // ── Inputs ───────────────────────────────────────────────────────────

    pub fn set_colors(&mut self, rgb: [i32; 12]) {
        self.engine.set_colors(rgb);
    }

    pub fn set_brightness(&mut self, values: [i32; 4]) {
        self.engine.set_brightness(values);
    }

    pub fn set_brightness_scaling(&mut self, enabled: bool) {
        self.engine.set_brightness_scaling(enabled);
    }

    pub fn set_grid_size(&mut self, n: i32) {
        self.engine.set_grid_size(n);
    }

    pub fn set_rate(&mut self, hz: i32) {
        self.timing.set_rate(hz);
        self.clock.set_interval(self.timing.interval());
    }

    pub fn set_max_rate(&mut self, enabled: bool) {
        self.timing.set_max_rate(enabled);
        self.clock.set_interval(self.timing.interval());
    }

    // ── Frames ───────────────────────────────────────────────────────────

    /// Feed elapsed time to the clock; advances and renders when a tick is due.
    pub fn tick<S: QuadSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        elapsed: Duration,
    ) -> Option<FrameStats> {
        self.clock.drive(&mut self.engine, surface, elapsed)
    }

    /// Render the current phase without advancing.
    pub fn render<S: QuadSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        self.engine.render_frame(surface)
    }

    pub fn engine(&self) -> &PatternEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PatternEngine {
        &mut self.engine
    }

    pub fn timing(&self) -> &TimingController {
        &self.timing
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("preset", &self.preset_name)
            .field("grid_size", &self.engine.grid_size())
            .field("rate", &self.timing.rate())
            .field("store", &self.store.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpath_engine::{ColorSet, GradientOffsets, RateSetting};
    use gpath_preset::MemoryPresetStore;
    use gpath_render::CountingSurface;

    fn session() -> Session {
        Session::new(&Config::default(), Box::new(MemoryPresetStore::new()))
    }

    #[test]
    fn open_applies_initial_preset() {
        let s = Session::open(&Config::default(), Box::new(MemoryPresetStore::new())).unwrap();
        assert_eq!(s.preset_name(), Some("red-green"));
        assert_eq!(*s.engine().colors(), ColorSet::RED_GREEN);
        assert_eq!(s.timing().interval_ms(), 0);
    }

    #[test]
    fn apply_preset_sets_engine_and_rate() {
        let mut s = session();
        let p = Preset::new("p")
            .with_colors(ColorSet::GREEN_RED.to_bytes())
            .with_rate(30)
            .with_grid_size(5);
        s.apply_preset(&p);
        assert_eq!(*s.engine().colors(), ColorSet::GREEN_RED);
        assert_eq!(s.engine().grid_size(), 5);
        assert_eq!(s.timing().rate(), RateSetting::Hz(30));
        assert_eq!(s.clock().interval(), Duration::from_millis(33));
    }

    #[test]
    fn apply_preset_keeps_brightness_and_offsets() {
        let config = Config {
            brightness: [40, 50, 60, 70],
            gradient_offsets: [25, -30],
            ..Config::default()
        };
        let mut s = Session::new(&config, Box::new(MemoryPresetStore::new()));
        s.apply_preset(&Preset::new("p").with_colors(ColorSet::GREEN_RED.to_bytes()));
        assert_eq!(s.engine().brightness().values(), [40, 50, 60, 70]);
        assert_eq!(s.engine().offsets(), GradientOffsets::new(25, -30));
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut s = session();
        s.set_colors([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        s.set_grid_size(7);
        s.set_rate(12);
        s.set_max_rate(true);
        let saved = s.save_preset("mine").unwrap();

        let mut other = Session::new(&Config::default(), Box::new(MemoryPresetStore::new()));
        other.store.save("mine", &saved).unwrap();
        let loaded = other.load_preset("mine").unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(other.current_preset("mine"), saved);
    }

    #[test]
    fn unknown_preset_is_not_found() {
        let mut s = session();
        let err = s.load_preset("missing").unwrap_err();
        assert!(matches!(err, crate::Error::Store(StoreError::NotFound(_))));
    }

    #[test]
    fn stored_presets_shadow_builtins() {
        let s = session();
        s.store
            .save("red-green", &Preset::new("red-green").with_grid_size(9))
            .unwrap();
        s.store.save("blue", &Preset::new("blue")).unwrap();
        let listed = s.list_presets().unwrap();
        assert_eq!(
            listed,
            vec![
                ("blue".to_string(), PresetSource::Stored),
                ("green-red".to_string(), PresetSource::Builtin),
                ("red-green".to_string(), PresetSource::Stored),
            ]
        );
        assert_eq!(s.resolve_preset("red-green").unwrap().grid_size, 9);
    }

    #[test]
    fn rate_changes_reach_the_clock() {
        let mut s = session();
        s.set_rate(10);
        assert_eq!(s.clock().interval(), Duration::from_millis(100));
        s.set_max_rate(true);
        assert_eq!(s.clock().interval(), Duration::ZERO);
        s.set_max_rate(false);
        assert_eq!(s.clock().interval(), Duration::from_millis(100));
    }

    #[test]
    fn tick_renders_when_due() {
        let mut s = session();
        s.set_rate(10);
        let mut surface = CountingSurface::default();
        assert!(s.tick(&mut surface, Duration::from_millis(50)).is_none());
        assert!(s.tick(&mut surface, Duration::from_millis(50)).is_some());
        assert_eq!(surface.frames, 1);
        assert!(s.engine().showing_gradient1());
    }
}
