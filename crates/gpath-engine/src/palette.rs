#![forbid(unsafe_code)]

//! Raw color input, brightness, and the normalized palette the engine draws with.
//!
//! Colors arrive as 12 integers: four RGB triples in the order
//! gradient 1 start, gradient 1 end, gradient 2 start, gradient 2 end.
//! [`Palette::resolve`] turns them into float pairs, optionally scaled by a
//! per-color brightness percentage first.

use gpath_render::Rgbf;

/// Number of values in a flat color array (4 colors x 3 channels).
pub const FLAT_LEN: usize = 12;

/// Lowest brightness percentage accepted.
pub const BRIGHTNESS_MIN: u8 = 1;
/// Highest brightness percentage accepted.
pub const BRIGHTNESS_MAX: u8 = 100;

/// The four corner colors as 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSet {
    colors: [[u8; 3]; 4],
}

impl ColorSet {
    /// Dark red fading to green, then green fading back to dark red.
    pub const RED_GREEN: Self = Self::from_bytes([127, 0, 0, 0, 255, 0, 0, 255, 0, 127, 0, 0]);

    /// Bright to dim green, then dim to bright red.
    pub const GREEN_RED: Self = Self::from_bytes([0, 255, 0, 0, 70, 0, 70, 0, 0, 255, 0, 0]);

    pub const fn new(colors: [[u8; 3]; 4]) -> Self {
        Self { colors }
    }

    /// Build from 12 bytes in input order.
    pub const fn from_bytes(v: [u8; FLAT_LEN]) -> Self {
        Self::new([
            [v[0], v[1], v[2]],
            [v[3], v[4], v[5]],
            [v[6], v[7], v[8]],
            [v[9], v[10], v[11]],
        ])
    }

    /// Build from 12 slider values, clamping each into `0..=255`.
    pub fn from_flat(values: [i32; FLAT_LEN]) -> Self {
        Self::from_bytes(values.map(|v| v.clamp(0, 255) as u8))
    }

    /// The 12 values in input order.
    pub fn to_bytes(&self) -> [u8; FLAT_LEN] {
        let mut out = [0u8; FLAT_LEN];
        for (i, rgb) in self.colors.iter().enumerate() {
            out[i * 3..i * 3 + 3].copy_from_slice(rgb);
        }
        out
    }

    /// Color `index` in `0..4`.
    #[inline]
    pub fn color(&self, index: usize) -> [u8; 3] {
        self.colors[index]
    }

    pub fn colors(&self) -> &[[u8; 3]; 4] {
        &self.colors
    }
}

impl Default for ColorSet {
    fn default() -> Self {
        Self::RED_GREEN
    }
}

/// Per-color brightness percentages, each in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Brightness([u8; 4]);

impl Brightness {
    /// All colors at 100%.
    pub const FULL: Self = Self([BRIGHTNESS_MAX; 4]);

    /// Clamp each value into `1..=100`.
    pub fn new(values: [i32; 4]) -> Self {
        Self(values.map(|v| v.clamp(BRIGHTNESS_MIN as i32, BRIGHTNESS_MAX as i32) as u8))
    }

    pub fn values(&self) -> [u8; 4] {
        self.0
    }

    /// Brightness of color `index` as a fraction in `(0, 1]`.
    #[inline]
    pub fn fraction(&self, index: usize) -> f32 {
        self.0[index] as f32 / 100.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::FULL
    }
}

/// A start/end color pair in normalized float RGB.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradientPair {
    pub start: Rgbf,
    pub end: Rgbf,
}

/// The two gradient pairs the engine alternates between.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Palette {
    pub gradient1: GradientPair,
    pub gradient2: GradientPair,
}

impl Palette {
    /// Normalize `colors` by /255, multiplying each by its brightness
    /// fraction first when `brightness` is given.
    pub fn resolve(colors: &ColorSet, brightness: Option<&Brightness>) -> Self {
        let c = |i: usize| match brightness {
            Some(b) => Rgbf::from_rgb8_scaled(colors.color(i), b.fraction(i)),
            None => Rgbf::from_rgb8(colors.color(i)),
        };
        Self {
            gradient1: GradientPair {
                start: c(0),
                end: c(1),
            },
            gradient2: GradientPair {
                start: c(2),
                end: c(3),
            },
        }
    }
}
