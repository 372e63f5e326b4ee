//! Light sources.
//!
//! Directions returned by [`LightSource::direction_at`] point from the light
//! toward the queried point, i.e. the direction light travels when it arrives.

use std::fmt;

use lumen_math::{align_zero, Color, Double3, Point3, Vector3};

use crate::{GeometryError, GeometryResult};

/// A light that illuminates points in the scene.
pub trait LightSource: Send + Sync + fmt::Debug {
    /// Intensity arriving at `point`.
    fn intensity_at(&self, point: Point3) -> Color;

    /// Unit direction from the light toward `point`.
    ///
    /// `None` when the direction is undefined (the point sits on the light).
    fn direction_at(&self, point: Point3) -> Option<Vector3>;

    /// Distance from `point` to the light; infinite for directional lights.
    fn distance_to(&self, point: Point3) -> f64;
}

/// Uniform, position-independent ambient term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient light at all.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::BLACK,
    };

    /// Ambient light of `color` attenuated by the coefficient `ka`.
    pub fn new(color: Color, ka: impl Into<Double3>) -> Self {
        Self {
            intensity: color.scale_by(ka.into()),
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// Light arriving from infinitely far away along a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector3,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector3) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: Point3) -> Color {
        self.intensity
    }

    fn direction_at(&self, _point: Point3) -> Option<Vector3> {
        Some(self.direction)
    }

    fn distance_to(&self, _point: Point3) -> f64 {
        f64::INFINITY
    }
}

/// Omnidirectional light at a position, with distance attenuation
/// `1 / (kc + kl·d + kq·d²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: Point3,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Create an unattenuated point light (`kc = 1`, `kl = kq = 0`).
    pub fn new(intensity: Color, position: Point3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Set the constant, linear and quadratic attenuation factors.
    ///
    /// Factors must be finite and non-negative, and at least one positive,
    /// so the attenuation stays defined at every distance from the light.
    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> GeometryResult<Self> {
        let factors = [kc, kl, kq];
        let valid = factors.iter().all(|k| k.is_finite() && *k >= 0.0)
            && factors.iter().any(|k| *k > 0.0);
        if !valid {
            return Err(GeometryError::InvalidAttenuation { kc, kl, kq });
        }
        self.kc = kc;
        self.kl = kl;
        self.kq = kq;
        Ok(self)
    }

    pub fn position(&self) -> Point3 {
        self.position
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: Point3) -> Color {
        let d = point.distance(self.position);
        self.intensity
            .scale(1.0 / (self.kc + self.kl * d + self.kq * d * d))
    }

    fn direction_at(&self, point: Point3) -> Option<Vector3> {
        point.subtract(self.position).ok().map(|l| l.normalize())
    }

    fn distance_to(&self, point: Point3) -> f64 {
        self.position.distance(point)
    }
}

/// A point light emitting into a beam around `direction`.
///
/// The point-light intensity is scaled by `(beam · l)^narrow_beam`; points
/// at or beyond 90° from the beam axis receive nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    light: PointLight,
    direction: Vector3,
    narrow_beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point3, direction: Vector3) -> Self {
        Self {
            light: PointLight::new(intensity, position),
            direction: direction.normalize(),
            narrow_beam: 1.0,
        }
    }

    /// Beam focus exponent. Larger values give a tighter beam.
    pub fn with_narrow_beam(mut self, narrow_beam: f64) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }

    /// Distance attenuation, as for [`PointLight::with_attenuation`].
    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> GeometryResult<Self> {
        self.light = self.light.with_attenuation(kc, kl, kq)?;
        Ok(self)
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: Point3) -> Color {
        let Some(l) = self.light.direction_at(point) else {
            return Color::BLACK;
        };

        let factor = align_zero(self.direction.dot(l));
        if factor <= 0.0 {
            return Color::BLACK;
        }
        self.light
            .intensity_at(point)
            .scale(factor.powf(self.narrow_beam))
    }

    fn direction_at(&self, point: Point3) -> Option<Vector3> {
        self.light.direction_at(point)
    }

    fn distance_to(&self, point: Point3) -> f64 {
        self.light.distance_to(point)
    }
}
