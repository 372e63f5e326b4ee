use std::fmt;
use std::ops::{Add, Neg};

use glam::DVec3;

use crate::{is_zero, MathError, MathResult};

/// A point in 3D space.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point3(DVec3);

impl Point3 {
    /// The origin.
    pub const ZERO: Point3 = Point3(DVec3::ZERO);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn from_dvec3(xyz: DVec3) -> Self {
        Self(xyz)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Raw coordinates.
    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    /// Vector pointing from `other` to `self`.
    ///
    /// Fails if both points coincide.
    pub fn subtract(&self, other: Point3) -> MathResult<Vector3> {
        Vector3::from_dvec3(self.0 - other.0)
    }

    /// Move the point by a raw displacement (which may be zero).
    #[inline]
    pub fn offset(&self, displacement: DVec3) -> Point3 {
        Point3(self.0 + displacement)
    }

    pub fn distance_squared(&self, other: Point3) -> f64 {
        self.0.distance_squared(other.0)
    }

    pub fn distance(&self, other: Point3) -> f64 {
        self.0.distance(other.0)
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    fn add(self, rhs: Vector3) -> Point3 {
        Point3(self.0 + rhs.0)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

/// A non-zero direction vector.
///
/// Every constructor rejects the zero vector, so a `Vector3` always has a
/// well defined direction and [`Vector3::normalize`] cannot fail.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector3(DVec3);

impl Vector3 {
    pub const X: Vector3 = Vector3(DVec3::X);
    pub const Y: Vector3 = Vector3(DVec3::Y);
    pub const Z: Vector3 = Vector3(DVec3::Z);
    pub const NEG_X: Vector3 = Vector3(DVec3::NEG_X);
    pub const NEG_Y: Vector3 = Vector3(DVec3::NEG_Y);
    pub const NEG_Z: Vector3 = Vector3(DVec3::NEG_Z);

    pub fn new(x: f64, y: f64, z: f64) -> MathResult<Self> {
        Self::from_dvec3(DVec3::new(x, y, z))
    }

    pub fn from_dvec3(xyz: DVec3) -> MathResult<Self> {
        if !xyz.is_finite() {
            return Err(MathError::NonFinite);
        }
        if xyz == DVec3::ZERO {
            return Err(MathError::ZeroVector);
        }
        Ok(Self(xyz))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Raw components.
    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    pub fn add(&self, other: Vector3) -> MathResult<Vector3> {
        Self::from_dvec3(self.0 + other.0)
    }

    /// Scale the vector. Scaling by zero fails.
    pub fn scale(&self, factor: f64) -> MathResult<Vector3> {
        Self::from_dvec3(self.0 * factor)
    }

    #[inline]
    pub fn dot(&self, other: Vector3) -> f64 {
        self.0.dot(other.0)
    }

    /// Cross product. Fails for parallel vectors.
    ///
    /// Vectors whose enclosed angle has a squared sine below [`EPSILON`](crate::EPSILON)
    /// count as parallel, so rounding noise never yields a tiny normal.
    pub fn cross(&self, other: Vector3) -> MathResult<Vector3> {
        let c = self.0.cross(other.0);
        let scale = self.0.length_squared() * other.0.length_squared();
        if is_zero(c.length_squared() / scale) {
            return Err(MathError::ZeroVector);
        }
        Self::from_dvec3(c)
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.0.length_squared()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.0.length()
    }

    pub fn normalize(&self) -> Vector3 {
        Vector3(self.0 / self.0.length())
    }

    /// Mirror this vector about the unit normal `n`: `v - 2(v·n)n`.
    ///
    /// The result keeps the length of `self`, so it is never zero.
    pub fn reflect(&self, n: Vector3) -> Vector3 {
        Vector3(self.0 - 2.0 * self.0.dot(n.0) * n.0)
    }

    /// True if the two vectors are orthogonal within tolerance.
    pub fn is_orthogonal_to(&self, other: Vector3) -> bool {
        is_zero(self.dot(other))
    }

    /// A unit vector orthogonal to this one.
    pub fn any_orthonormal(&self) -> Vector3 {
        Vector3(self.0.normalize().any_orthonormal_vector())
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3(-self.0)
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> DVec3 {
        v.0
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_zero_vector_rejected() {
        assert_eq!(Vector3::new(0.0, 0.0, 0.0), Err(MathError::ZeroVector));
        assert!(Vector3::new(1e-300, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_point_subtract() {
        let p1 = Point3::new(1.0, 2.0, 3.0);
        let p2 = Point3::new(2.0, 4.0, 6.0);
        let v = p2.subtract(p1).unwrap();
        assert_eq!(v.as_dvec3(), DVec3::new(1.0, 2.0, 3.0));

        assert_eq!(p1.subtract(p1), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_point_add_vector() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let v = Vector3::new(-1.0, -2.0, -3.0).unwrap();
        assert_eq!(p + v, Point3::ZERO);
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point3::new(1.0, 2.0, 3.0);
        let p2 = Point3::new(1.0, 6.0, 6.0);
        assert_eq!(p1.distance_squared(p2), 25.0);
        assert_eq!(p1.distance(p2), 5.0);
        assert_eq!(p1.distance(p1), 0.0);
    }

    #[test]
    fn test_vector_add_and_scale() {
        let v1 = Vector3::new(1.0, 2.0, 3.0).unwrap();
        let v2 = Vector3::new(-2.0, -4.0, -6.0).unwrap();
        assert_eq!(v1.add(v2).unwrap().as_dvec3(), DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(v1.add(-v1), Err(MathError::ZeroVector));

        assert_eq!(v1.scale(2.0).unwrap().as_dvec3(), DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(v1.scale(0.0), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_dot_product() {
        let v1 = Vector3::new(1.0, 2.0, 3.0).unwrap();
        let v2 = Vector3::new(-2.0, -4.0, -6.0).unwrap();
        let v3 = Vector3::new(0.0, 3.0, -2.0).unwrap();
        assert!(is_zero(v1.dot(v3)));
        assert!((v1.dot(v2) + 28.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_cross_product() {
        let v1 = Vector3::new(1.0, 2.0, 3.0).unwrap();
        let v3 = Vector3::new(0.0, 3.0, -2.0).unwrap();
        let vr = v1.cross(v3).unwrap();

        assert!((vr.length() - v1.length() * v3.length()).abs() < TOLERANCE);
        assert!(is_zero(vr.dot(v1)));
        assert!(is_zero(vr.dot(v3)));
    }

    #[test]
    fn test_cross_of_parallel_vectors_fails() {
        let v1 = Vector3::new(1.0, 2.0, 3.0).unwrap();
        let v2 = Vector3::new(-2.0, -4.0, -6.0).unwrap();
        assert_eq!(v1.cross(v2), Err(MathError::ZeroVector));
        assert_eq!(v1.cross(v1.normalize()), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_length() {
        let v = Vector3::new(0.0, 3.0, 4.0).unwrap();
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
    }

    #[test]
    fn test_normalize() {
        let samples = [
            (1.0, 2.0, 3.0),
            (-0.001, 0.0, 0.0),
            (1e6, -3e5, 42.0),
            (0.0, 0.0, -7.5),
        ];
        for (x, y, z) in samples {
            let v = Vector3::new(x, y, z).unwrap();
            let u = v.normalize();
            assert!((u.length() - 1.0).abs() < TOLERANCE, "{v} normalized to {u}");
            assert!(v.dot(u) >= 0.0);
        }
    }

    #[test]
    fn test_reflect() {
        let v = Vector3::new(1.0, -1.0, 0.0).unwrap();
        let r = v.reflect(Vector3::Y);
        assert_eq!(r.as_dvec3(), DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_any_orthonormal() {
        let v = Vector3::new(3.0, -1.0, 2.0).unwrap();
        let o = v.any_orthonormal();
        assert!(v.is_orthogonal_to(o));
        assert!((o.length() - 1.0).abs() < TOLERANCE);
    }
}
