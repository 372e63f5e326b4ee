//! Phong-style surface material.

use lumen_math::Double3;

/// Reflectance coefficients of a surface.
///
/// The default material is black, opaque and non-reflective.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Material {
    /// Diffuse coefficient
    pub kd: Double3,
    /// Specular coefficient
    pub ks: Double3,
    /// Specular exponent
    pub shininess: u32,
    /// Transmission (transparency) coefficient
    pub kt: Double3,
    /// Reflection coefficient
    pub kr: Double3,
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kd(mut self, kd: impl Into<Double3>) -> Self {
        self.kd = kd.into();
        self
    }

    pub fn with_ks(mut self, ks: impl Into<Double3>) -> Self {
        self.ks = ks.into();
        self
    }

    pub fn with_shininess(mut self, shininess: u32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_kt(mut self, kt: impl Into<Double3>) -> Self {
        self.kt = kt.into();
        self
    }

    pub fn with_kr(mut self, kr: impl Into<Double3>) -> Self {
        self.kr = kr.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_opaque_black() {
        let m = Material::default();
        assert_eq!(m.kd, Double3::ZERO);
        assert_eq!(m.ks, Double3::ZERO);
        assert_eq!(m.kt, Double3::ZERO);
        assert_eq!(m.kr, Double3::ZERO);
        assert_eq!(m.shininess, 0);
    }

    #[test]
    fn test_builders() {
        let m = Material::new()
            .with_kd(0.5)
            .with_ks((0.1, 0.2, 0.3))
            .with_shininess(100)
            .with_kt(0.4)
            .with_kr(Double3::new(1.0, 0.0, 0.0));

        assert_eq!(m.kd, Double3::splat(0.5));
        assert_eq!(m.ks, Double3::new(0.1, 0.2, 0.3));
        assert_eq!(m.shininess, 100);
        assert_eq!(m.kt, Double3::splat(0.4));
        assert_eq!(m.kr, Double3::new(1.0, 0.0, 0.0));
    }
}
