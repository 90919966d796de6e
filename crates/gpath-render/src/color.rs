#![forbid(unsafe_code)]

//! Color types.
//!
//! Two representations are used:
//!
//! - [`Rgbf`]: linear float RGB with channels nominally in `[0.0, 1.0]`. The
//!   engine does all blending in this space, the same way the values would be
//!   handed to a `glColor3f` call.
//! - [`PackedRgba`]: 4-byte RGBA stored in a single `u32`, used for
//!   framebuffer pixels and export.

use std::ops::{Add, Mul};

/// A 32-bit color packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// RGB channels as a byte triple, dropping alpha.
    #[inline]
    pub const fn to_rgb8(self) -> [u8; 3] {
        [self.r(), self.g(), self.b()]
    }
}

/// Linear float RGB.
///
/// Channels are not clamped on construction; blending two in-range colors
/// with weights that sum to one stays in range. [`Rgbf::to_packed`] clamps.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgbf {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgbf {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Normalize an 8-bit triple by dividing each channel by 255.
    #[inline]
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
        )
    }

    /// Normalize an 8-bit triple after multiplying by `scale`.
    ///
    /// Computes `channel * scale / 255` per channel, so a scale of `1.0`
    /// is bit-identical to [`Rgbf::from_rgb8`].
    #[inline]
    pub fn from_rgb8_scaled(rgb: [u8; 3], scale: f32) -> Self {
        Self::new(
            rgb[0] as f32 * scale / 255.0,
            rgb[1] as f32 * scale / 255.0,
            rgb[2] as f32 * scale / 255.0,
        )
    }

    /// `a * wa + b * wb`, channel by channel.
    #[inline]
    pub fn weighted(a: Self, wa: f32, b: Self, wb: f32) -> Self {
        Self::new(
            a.r * wa + b.r * wb,
            a.g * wa + b.g * wb,
            a.b * wa + b.b * wb,
        )
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1).
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::weighted(self, 1.0 - t, other, t)
    }

    /// Quantize to an opaque packed color, clamping each channel to `[0, 1]`.
    #[inline]
    pub fn to_packed(self) -> PackedRgba {
        #[inline]
        fn q(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        PackedRgba::rgb(q(self.r), q(self.g), q(self.b))
    }

    /// Largest absolute channel difference, for approximate comparisons.
    #[inline]
    pub fn max_abs_diff(self, other: Self) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

impl Add for Rgbf {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Mul<f32> for Rgbf {
    type Output = Self;

    #[inline]
    fn mul(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }
}

impl From<PackedRgba> for Rgbf {
    fn from(c: PackedRgba) -> Self {
        Self::from_rgb8(c.to_rgb8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_channels_round_trip() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
        assert_eq!(c.to_rgb8(), [1, 2, 3]);
    }

    #[test]
    fn from_rgb8_divides_by_255() {
        let c = Rgbf::from_rgb8([127, 0, 255]);
        assert_eq!(c.r, 127.0 / 255.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 1.0);
    }

    #[test]
    fn full_scale_matches_unscaled() {
        let rgb = [127, 70, 3];
        assert_eq!(Rgbf::from_rgb8_scaled(rgb, 1.0), Rgbf::from_rgb8(rgb));
    }

    #[test]
    fn half_scale_halves_channels() {
        let c = Rgbf::from_rgb8_scaled([200, 100, 0], 0.5);
        assert!(c.max_abs_diff(Rgbf::new(100.0 / 255.0, 50.0 / 255.0, 0.0)) < 1e-6);
    }

    #[test]
    fn to_packed_rounds_and_clamps() {
        assert_eq!(Rgbf::new(1.5, -0.2, 0.5).to_packed(), PackedRgba::rgb(255, 0, 128));
        assert_eq!(Rgbf::from_rgb8([127, 0, 0]).to_packed(), PackedRgba::rgb(127, 0, 0));
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgbf::new(1.0, 0.0, 0.0);
        let b = Rgbf::new(0.0, 1.0, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert!(a.lerp(b, 0.5).max_abs_diff(Rgbf::new(0.5, 0.5, 0.0)) < 1e-6);
    }
}
