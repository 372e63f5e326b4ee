//! Infinite plane primitive.

use lumen_math::{align_zero, Color, Interval, Point3, Ray, Vector3};

use crate::{Geometry, GeometryResult, Hit, Intersectable, Material, Surface};

/// A plane through `q0` with a unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    q0: Point3,
    normal: Vector3,
    surface: Surface,
}

impl Plane {
    /// Create a plane from a point and a normal. The normal is normalized.
    pub fn new(q0: Point3, normal: Vector3) -> Self {
        Self {
            q0,
            normal: normal.normalize(),
            surface: Surface::default(),
        }
    }

    /// Create the plane through three points.
    ///
    /// Fails if two points coincide or all three are collinear.
    pub fn from_points(p0: Point3, p1: Point3, p2: Point3) -> GeometryResult<Self> {
        let v1 = p0.subtract(p1)?;
        let v2 = p0.subtract(p2)?;
        let normal = v1.cross(v2)?;
        Ok(Self::new(p0, normal))
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.surface.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.surface.material = material;
        self
    }

    /// Reference point on the plane.
    pub fn q0(&self) -> Point3 {
        self.q0
    }

    /// The plane's unit normal.
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Ray parameter of the crossing point, if it lies in `(0, max_distance)`.
    ///
    /// Rays parallel to the plane and rays starting on it never hit.
    pub(crate) fn hit_distance(&self, ray: &Ray, max_distance: f64) -> Option<f64> {
        let nv = align_zero(self.normal.dot(ray.direction()));
        if nv == 0.0 {
            return None;
        }

        let q_p = self.q0.subtract(ray.origin()).ok()?;
        let nqp = align_zero(self.normal.dot(q_p));
        if nqp == 0.0 {
            return None;
        }

        let t = align_zero(nqp / nv);
        Interval::forward(max_distance).surrounds(t).then_some(t)
    }
}

impl Intersectable for Plane {
    fn find_hits<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Hit<'a>> {
        self.hit_distance(ray, max_distance)
            .map(|t| vec![Hit::new(self, ray.at(t))])
            .unwrap_or_default()
    }
}

impl Geometry for Plane {
    fn normal_at(&self, _point: Point3) -> Vector3 {
        self.normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
