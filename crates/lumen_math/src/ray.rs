use crate::{Point3, Vector3};

/// Distance a secondary ray's origin is pushed off the surface it leaves.
pub const DELTA: f64 = 0.1;

/// A ray in 3D space: an origin and a unit direction.
///
/// Rays are immutable. Points along the ray are `origin + t * direction`;
/// since the direction is normalized, `t` is also the distance travelled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a secondary ray leaving a surface with the given normal.
    ///
    /// The origin is moved by [`DELTA`] along the normal, toward the side
    /// the ray is heading to, so that the ray cannot hit the surface it
    /// starts on because of rounding.
    pub fn with_bias(origin: Point3, direction: Vector3, normal: Vector3) -> Self {
        let n = normal.as_dvec3();
        let delta = if normal.dot(direction) > 0.0 { DELTA } else { -DELTA };
        Self::new(origin.offset(n * delta), direction)
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Get the ray's unit direction.
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Compute a point along the ray at parameter t.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin.offset(self.direction.as_dvec3() * t)
    }

    /// The item whose point lies closest to the ray origin.
    pub fn find_closest_by<'a, T, F>(&self, items: &'a [T], point: F) -> Option<&'a T>
    where
        F: Fn(&T) -> Point3,
    {
        items.iter().min_by(|a, b| {
            let da = self.origin.distance_squared(point(a));
            let db = self.origin.distance_squared(point(b));
            da.total_cmp(&db)
        })
    }

    /// The point closest to the ray origin.
    pub fn find_closest_point(&self, points: &[Point3]) -> Option<Point3> {
        self.find_closest_by(points, |p| *p).copied()
    }
}
