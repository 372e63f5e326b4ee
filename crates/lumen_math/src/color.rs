//! RGB color with unbounded, non-negative channels.
//!
//! Channels are stored on the 8-bit display scale: `255.0` is full
//! intensity. Values above that are kept while light contributions are
//! accumulated and only clamped when converted to bytes.

use std::ops::{Add, AddAssign, Mul};

use glam::DVec3;

use crate::{Double3, Interval};

/// An RGB color.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Color(DVec3);

impl Color {
    pub const BLACK: Color = Color(DVec3::ZERO);
    pub const WHITE: Color = Color(DVec3::splat(255.0));

    /// Create a color. Negative channels are clamped to zero.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self(DVec3::new(r, g, b).max(DVec3::ZERO))
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn g(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.0.z
    }

    /// Scale all channels by a non-negative factor.
    pub fn scale(&self, factor: f64) -> Color {
        Color((self.0 * factor).max(DVec3::ZERO))
    }

    /// Scale each channel by the matching coefficient.
    pub fn scale_by(&self, k: Double3) -> Color {
        Color((self.0 * k.as_dvec3()).max(DVec3::ZERO))
    }

    /// Divide by a sample count, used when averaging.
    pub fn reduce(&self, count: u32) -> Color {
        if count == 0 {
            return *self;
        }
        Color(self.0 / count as f64)
    }

    /// Average of a set of colors; black for an empty set.
    pub fn average<I: IntoIterator<Item = Color>>(colors: I) -> Color {
        let mut sum = Color::BLACK;
        let mut count = 0;
        for color in colors {
            sum += color;
            count += 1;
        }
        sum.reduce(count)
    }

    /// True if no channel differs by more than `tolerance`.
    pub fn is_close(&self, other: Color, tolerance: f64) -> bool {
        (self.0 - other.0).abs().max_element() <= tolerance
    }

    /// Brightness as the sum of channels.
    pub fn luminance_sum(&self) -> f64 {
        self.0.element_sum()
    }

    /// Clamp to bytes for display or encoding.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let display = Interval::new(0.0, 255.0);
        [
            display.clamp(self.0.x) as u8,
            display.clamp(self.0.y) as u8,
            display.clamp(self.0.z) as u8,
        ]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

impl Mul<Double3> for Color {
    type Output = Color;

    fn mul(self, rhs: Double3) -> Color {
        self.scale_by(rhs)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        self.scale(rhs)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::new(r as f64, g as f64, b as f64)
    }
}
