//! Convex polygon and triangle primitives.
//!
//! Intersection first hits the supporting plane, then classifies the point
//! with the edge-normal test: for every edge `(v_i, v_i+1)` the sign of
//! `dir · ((v_i - O) × (v_i+1 - O))` must agree. A zero sign means the
//! point lies on an edge, a vertex or an edge extension, which is a miss.

use lumen_math::{align_zero, is_zero, Color, Point3, Ray, Vector3};

use crate::{Geometry, GeometryError, GeometryResult, Hit, Intersectable, Material, Plane, Surface};

/// A convex, planar polygon.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point3>,
    plane: Plane,
    surface: Surface,
}

impl Polygon {
    /// Create a polygon from its vertices, in edge order.
    ///
    /// Validates once, here: at least three vertices, all in the plane of
    /// the first three, and a consistent winding (convexity).
    pub fn new(vertices: Vec<Point3>) -> GeometryResult<Self> {
        let size = vertices.len();
        if size < 3 {
            return Err(GeometryError::TooFewVertices(size));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if size > 3 {
            Self::check_convex(&vertices, plane.normal())?;
        }

        Ok(Self {
            vertices,
            plane,
            surface: Surface::default(),
        })
    }

    /// Every vertex must be coplanar and every pair of consecutive edges
    /// must turn the same way around the normal.
    fn check_convex(vertices: &[Point3], n: Vector3) -> GeometryResult<()> {
        let size = vertices.len();
        let mut edge1 = vertices[size - 1].subtract(vertices[size - 2])?;
        let mut edge2 = vertices[0].subtract(vertices[size - 1])?;

        let positive = edge1.cross(edge2)?.dot(n) > 0.0;
        for i in 1..size {
            let offset = vertices[i].subtract(vertices[0])?;
            if !is_zero(offset.dot(n)) {
                return Err(GeometryError::NotCoplanar);
            }

            edge1 = edge2;
            edge2 = vertices[i].subtract(vertices[i - 1])?;
            if positive != (edge1.cross(edge2)?.dot(n) > 0.0) {
                return Err(GeometryError::NotConvex);
            }
        }
        Ok(())
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.surface.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.surface.material = material;
        self
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Crossing point of the ray with the polygon interior.
    pub(crate) fn hit_point(&self, ray: &Ray, max_distance: f64) -> Option<Point3> {
        let t = self.plane.hit_distance(ray, max_distance)?;

        let origin = ray.origin().as_dvec3();
        let dir = ray.direction().as_dvec3();
        let size = self.vertices.len();

        let mut sign = 0.0;
        for i in 0..size {
            let v1 = self.vertices[i].as_dvec3() - origin;
            let v2 = self.vertices[(i + 1) % size].as_dvec3() - origin;
            let edge_normal = v1.cross(v2).normalize_or_zero();

            let s = align_zero(dir.dot(edge_normal));
            if s == 0.0 || s * sign < 0.0 {
                return None;
            }
            sign = s;
        }

        Some(ray.at(t))
    }
}

impl Intersectable for Polygon {
    fn find_hits<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Hit<'a>> {
        self.hit_point(ray, max_distance)
            .map(|p| vec![Hit::new(self, p)])
            .unwrap_or_default()
    }
}

impl Geometry for Polygon {
    fn normal_at(&self, _point: Point3) -> Vector3 {
        self.plane.normal()
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

/// A triangle: a three-vertex polygon.
#[derive(Debug, Clone)]
pub struct Triangle(Polygon);

impl Triangle {
    pub fn new(p0: Point3, p1: Point3, p2: Point3) -> GeometryResult<Self> {
        Polygon::new(vec![p0, p1, p2]).map(Triangle)
    }

    pub fn with_emission(self, emission: Color) -> Self {
        Triangle(self.0.with_emission(emission))
    }

    pub fn with_material(self, material: Material) -> Self {
        Triangle(self.0.with_material(material))
    }

    pub fn vertices(&self) -> &[Point3] {
        self.0.vertices()
    }
}

impl Intersectable for Triangle {
    fn find_hits<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Hit<'a>> {
        self.0
            .hit_point(ray, max_distance)
            .map(|p| vec![Hit::new(self, p)])
            .unwrap_or_default()
    }
}

impl Geometry for Triangle {
    fn normal_at(&self, point: Point3) -> Vector3 {
        self.0.normal_at(point)
    }

    fn surface(&self) -> &Surface {
        self.0.surface()
    }
}
