#![forbid(unsafe_code)]

//! Framebuffer export to image files.
//!
//! PPM (binary `P6`) is always available. PNG goes through the `image` crate
//! and requires the `png` feature.

use crate::framebuffer::Framebuffer;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Errors from image export.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error while writing.
    Io(io::Error),
    /// Encoder failure.
    #[cfg(feature = "png")]
    Image(image::ImageError),
    /// The requested format is not compiled in.
    Unsupported(&'static str),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "png")]
            ExportError::Image(e) => write!(f, "image encoding error: {e}"),
            ExportError::Unsupported(format) => {
                write!(f, "export format '{format}' is not enabled in this build")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            #[cfg(feature = "png")]
            ExportError::Image(e) => Some(e),
            ExportError::Unsupported(_) => None,
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        ExportError::Io(e)
    }
}

#[cfg(feature = "png")]
impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Ppm,
    Png,
}

impl ExportFormat {
    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Ppm => "ppm",
            Self::Png => "png",
        }
    }

    /// Write `fb` to `path` in this format.
    pub fn save(self, fb: &Framebuffer, path: &Path) -> Result<(), ExportError> {
        match self {
            Self::Ppm => save_ppm(fb, path),
            Self::Png => save_png(fb, path),
        }
    }
}

/// Write a binary PPM image.
pub fn write_ppm<W: Write>(fb: &Framebuffer, mut out: W) -> io::Result<()> {
    let size = fb.size();
    write!(out, "P6\n{} {}\n255\n", size.width, size.height)?;
    out.write_all(&fb.to_rgb_bytes())?;
    out.flush()
}

/// Write a binary PPM image to `path`.
pub fn save_ppm(fb: &Framebuffer, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_ppm(fb, BufWriter::new(file))?;
    Ok(())
}

/// Write a PNG image to `path`.
#[cfg(feature = "png")]
pub fn save_png(fb: &Framebuffer, path: &Path) -> Result<(), ExportError> {
    let size = fb.size();
    image::save_buffer_with_format(
        path,
        &fb.to_rgb_bytes(),
        size.width,
        size.height,
        image::ExtendedColorType::Rgb8,
        image::ImageFormat::Png,
    )?;
    Ok(())
}

/// PNG export is compiled out; always fails.
#[cfg(not(feature = "png"))]
pub fn save_png(_fb: &Framebuffer, _path: &Path) -> Result<(), ExportError> {
    Err(ExportError::Unsupported("png"))
}
