use std::ops::{Add, Mul};

use glam::DVec3;

/// Per-channel coefficient triple (kD, kS, kT, kR, attenuation products).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Double3(DVec3);

impl Double3 {
    pub const ZERO: Double3 = Double3(DVec3::ZERO);
    pub const ONE: Double3 = Double3(DVec3::ONE);

    pub const fn new(d1: f64, d2: f64, d3: f64) -> Self {
        Self(DVec3::new(d1, d2, d3))
    }

    /// Same value in all three channels.
    pub const fn splat(d: f64) -> Self {
        Self(DVec3::splat(d))
    }

    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    /// Component-wise product.
    #[inline]
    pub fn product(&self, other: Double3) -> Double3 {
        Double3(self.0 * other.0)
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Double3 {
        Double3(self.0 * factor)
    }

    /// True if every component is strictly below `threshold`.
    pub fn lower_than(&self, threshold: f64) -> bool {
        self.0.x < threshold && self.0.y < threshold && self.0.z < threshold
    }
}

impl From<f64> for Double3 {
    fn from(d: f64) -> Self {
        Double3::splat(d)
    }
}

impl From<(f64, f64, f64)> for Double3 {
    fn from((d1, d2, d3): (f64, f64, f64)) -> Self {
        Double3::new(d1, d2, d3)
    }
}

impl Add for Double3 {
    type Output = Double3;

    fn add(self, rhs: Double3) -> Double3 {
        Double3(self.0 + rhs.0)
    }
}

impl Mul for Double3 {
    type Output = Double3;

    fn mul(self, rhs: Double3) -> Double3 {
        self.product(rhs)
    }
}
