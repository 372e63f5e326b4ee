//! Lumen math - value types shared by the scene model and the renderer.
//!
//! All types are thin wrappers around [`glam::DVec3`]:
//!
//! - [`Point3`]: a location in space
//! - [`Vector3`]: a direction, never the zero vector
//! - [`Double3`]: per-channel material coefficients
//! - [`Color`]: unbounded, non-negative RGB radiance
//! - [`Ray`]: origin plus unit direction

// Re-export glam for convenience
pub use glam::DVec3;

mod color;
mod double3;
mod interval;
mod ray;
mod vector;

pub use color::Color;
pub use double3::Double3;
pub use interval::Interval;
pub use ray::{Ray, DELTA};
pub use vector::{Point3, Vector3};

use thiserror::Error;

/// Errors raised when a value would break a math invariant.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("vector cannot be the zero vector")]
    ZeroVector,

    #[error("vector components must be finite")]
    NonFinite,
}

pub type MathResult<T> = Result<T, MathError>;

/// Tolerance used for every "is this zero" decision.
pub const EPSILON: f64 = 1e-10;

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snap values within [`EPSILON`] of zero to exactly zero.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}
