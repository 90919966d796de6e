#![forbid(unsafe_code)]

//! Command-line arguments for the `gardenpath` binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use gpath_engine::PatternVariant;
use gpath_render::export::ExportFormat;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gardenpath",
    version,
    about = "Alternating checkerboard afterimage generator"
)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding `<name>.json` presets
    #[arg(long, global = true, value_name = "DIR")]
    pub preset_dir: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List built-in and stored presets
    List,
    /// Print a preset as JSON
    Show {
        name: String,
    },
    /// Write a preset to the preset directory
    Save(SaveArgs),
    /// Rasterize consecutive frames to image files
    Render(RenderArgs),
    /// Drive the engine on a real clock and report what was drawn
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    pub name: String,

    /// Start from this preset instead of the defaults
    #[arg(long, value_name = "PRESET")]
    pub from: Option<String>,

    /// Cells per side
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub grid: Option<i32>,

    /// Alternation rate in Hz
    #[arg(long, value_name = "HZ", allow_negative_numbers = true)]
    pub rate: Option<i32>,

    /// Run unthrottled
    #[arg(long)]
    pub max_rate: bool,

    /// Twelve comma-separated channel values
    #[arg(
        long,
        value_name = "R,G,B,...",
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub colors: Option<Vec<i32>>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Preset to render [default: config initial_preset]
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Number of frames
    #[arg(long, default_value_t = 2)]
    pub frames: u32,

    /// Override the preset's grid size
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub grid: Option<i32>,

    /// Output directory
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = FormatArg::Ppm)]
    pub format: FormatArg,

    /// Override the configured variant
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Override the configured viewport, as WxH
    #[arg(long, value_name = "WxH")]
    pub viewport: Option<String>,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Preset to run [default: config initial_preset]
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// How long to run
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub duration_ms: u64,

    /// Override the preset's rate in Hz
    #[arg(long, value_name = "HZ", allow_negative_numbers = true)]
    pub rate: Option<i32>,

    /// Run unthrottled
    #[arg(long)]
    pub max_rate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Ppm,
    Png,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Ppm => ExportFormat::Ppm,
            FormatArg::Png => ExportFormat::Png,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Checkerboard,
    FullField,
}

impl From<VariantArg> for PatternVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Checkerboard => PatternVariant::Checkerboard,
            VariantArg::FullField => PatternVariant::FullField,
        }
    }
}
