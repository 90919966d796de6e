#![forbid(unsafe_code)]

//! Subcommand implementations.
//!
//! Output goes to the writer passed in, so tests can capture it. Logging goes
//! through `tracing` and never to that writer.

use crate::cli::{Cli, Command, RenderArgs, RunArgs, SaveArgs};
use crate::config::{Config, parse_viewport};
use crate::session::Session;
use crate::{Error, Result};
use gpath_preset::{DirPresetStore, Preset, PresetStore};
use gpath_render::export::ExportFormat;
use gpath_render::{CountingSurface, Framebuffer, PackedRgba};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Shortest sleep between clock polls in `run`.
const MIN_POLL: Duration = Duration::from_millis(1);

/// Defaults, then `--config`, then environment, then `--preset-dir`.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env()?;
    if let Some(dir) = &cli.preset_dir {
        config.preset_dir = dir.clone();
    }
    Ok(config)
}

/// Resolve configuration and run the parsed command.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = resolve_config(cli)?;
    tracing::debug!(preset_dir = %config.preset_dir.display(), "configuration resolved");
    let store = Box::new(DirPresetStore::new(&config.preset_dir));
    execute(&cli.command, &config, store, out)
}

/// Run `command` against an explicit store.
pub fn execute(
    command: &Command,
    config: &Config,
    store: Box<dyn PresetStore>,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::List => list(&Session::new(config, store), out),
        Command::Show { name } => {
            let preset = Session::new(config, store).resolve_preset(name)?;
            writeln!(out, "{}", preset.to_json_pretty()?)?;
            Ok(())
        }
        Command::Save(args) => save(args, &Session::new(config, store), out),
        Command::Render(args) => render(args, config, store, out),
        Command::Run(args) => {
            let mut session = Session::new(config, store);
            session.load_preset(args.preset.as_deref().unwrap_or(&config.initial_preset))?;
            apply_run_overrides(&mut session, args);
            let report = run_for(&mut session, Duration::from_millis(args.duration_ms));
            writeln!(out, "{report}")?;
            Ok(())
        }
    }
}

fn list(session: &Session, out: &mut dyn Write) -> Result<()> {
    for (name, source) in session.list_presets()? {
        writeln!(out, "{name}\t{source}")?;
    }
    Ok(())
}

fn save(args: &SaveArgs, session: &Session, out: &mut dyn Write) -> Result<()> {
    let mut preset = match &args.from {
        Some(from) => session.resolve_preset(from)?.renamed(&args.name),
        None => Preset::new(&args.name),
    };
    if let Some(n) = args.grid {
        preset = preset.with_grid_size(n);
    }
    if let Some(hz) = args.rate {
        preset = preset.with_rate(hz);
    }
    if args.max_rate {
        preset = preset.with_max_rate(true);
    }
    if let Some(values) = &args.colors {
        preset = preset.with_colors(parse_color_values(values)?);
    }
    session.store().save(&args.name, &preset)?;
    writeln!(out, "saved preset {}", args.name)?;
    Ok(())
}

/// Check length and clamp each value into `0..=255`.
pub fn parse_color_values(values: &[i32]) -> Result<[u8; 12]> {
    let values: [i32; 12] = values
        .try_into()
        .map_err(|_| Error::Config(format!("--colors needs 12 values, got {}", values.len())))?;
    Ok(values.map(|v| v.clamp(0, 255) as u8))
}

fn render(
    args: &RenderArgs,
    config: &Config,
    store: Box<dyn PresetStore>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(text) = &args.viewport {
        let size = parse_viewport(text)
            .ok_or_else(|| Error::Config(format!("--viewport: expected WxH, got {text:?}")))?;
        config.set_viewport(size);
    }
    if let Some(variant) = args.variant {
        config.variant = crate::engine::PatternVariant::from(variant).into();
    }

    let mut session = Session::new(&config, store);
    session.load_preset(args.preset.as_deref().unwrap_or(&config.initial_preset))?;
    if let Some(n) = args.grid {
        session.set_grid_size(n);
    }

    let format = ExportFormat::from(args.format);
    std::fs::create_dir_all(&args.out)?;
    let mut fb = Framebuffer::new(config.viewport()).with_clear_color(PackedRgba::GREEN);
    for i in 0..args.frames {
        let stats = session.render(&mut fb);
        let path = frame_path(&args.out, i, format);
        format.save(&fb, &path)?;
        tracing::debug!(frame = i, quads = stats.quads, path = %path.display(), "frame written");
        writeln!(out, "{}", path.display())?;
        session.engine_mut().advance_frame();
    }
    Ok(())
}

/// `<dir>/frame-0000.<ext>`
pub fn frame_path(dir: &std::path::Path, index: u32, format: ExportFormat) -> PathBuf {
    dir.join(format!("frame-{index:04}.{}", format.extension()))
}

fn apply_run_overrides(session: &mut Session, args: &RunArgs) {
    if let Some(hz) = args.rate {
        session.set_rate(hz);
    }
    if args.max_rate {
        session.set_max_rate(true);
    }
}

/// What a timed run drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    pub frames: u64,
    pub quads: u64,
    pub ticks: u64,
    pub interval_ms: u64,
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frames={} quads={} ticks={} interval_ms={}",
            self.frames, self.quads, self.ticks, self.interval_ms
        )
    }
}

/// Drive `session` against a counting surface for `duration` of wall time.
pub fn run_for(session: &mut Session, duration: Duration) -> RunReport {
    let mut surface = CountingSurface::default();
    let start = Instant::now();
    let deadline = start + duration;
    let ticks_before = session.clock().ticks();
    let mut last = start;

    loop {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        session.tick(&mut surface, now - last);
        last = now;

        let remaining = deadline - now;
        let wait = session
            .clock()
            .time_until_next()
            .unwrap_or(remaining)
            .min(remaining)
            .max(MIN_POLL);
        std::thread::sleep(wait);
    }

    let report = RunReport {
        frames: surface.frames,
        quads: surface.quads,
        ticks: session.clock().ticks() - ticks_before,
        interval_ms: session.timing().interval_ms(),
    };
    tracing::info!(%report, "run finished");
    report
}
