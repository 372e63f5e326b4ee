//! Sphere primitive for ray tracing.

use lumen_math::{Color, Interval, Point3, Ray, Vector3};

use crate::intersectable::quadratic_roots;
use crate::{Geometry, GeometryError, GeometryResult, Hit, Intersectable, Material, Surface};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point3, radius: f64) -> GeometryResult<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            surface: Surface::default(),
        })
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.surface.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.surface.material = material;
        self
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersectable for Sphere {
    /// Solve `|O + tD - C|² = r²` for t. With a unit direction `a = 1`.
    ///
    /// A ray starting at the center yields the single forward exit point.
    fn find_hits<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Hit<'a>> {
        let oc = ray.origin().as_dvec3() - self.center.as_dvec3();
        let h = ray.direction().as_dvec3().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        quadratic_roots(1.0, 2.0 * h, c, Interval::forward(max_distance))
            .into_iter()
            .map(|t| Hit::new(self, ray.at(t)))
            .collect()
    }
}

impl Geometry for Sphere {
    fn normal_at(&self, point: Point3) -> Vector3 {
        point
            .subtract(self.center)
            .map(|v| v.normalize())
            .unwrap_or(Vector3::Z)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn unit_sphere() -> Sphere {
        Sphere::new(Point3::new(1.0, 0.0, 0.0), 1.0).unwrap()
    }

    fn sorted_points(sphere: &Sphere, ray: &Ray) -> Vec<Point3> {
        let mut points = sphere.find_points(ray);
        points.sort_by(|a, b| {
            ray.origin()
                .distance(*a)
                .total_cmp(&ray.origin().distance(*b))
        });
        points
    }

    fn assert_close(a: Point3, b: Point3) {
        assert!(a.distance(b) < TOLERANCE, "{a} != {b}");
    }

    #[test]
    fn test_invalid_radius() {
        assert_eq!(
            Sphere::new(Point3::ZERO, 0.0).unwrap_err(),
            GeometryError::InvalidRadius(0.0)
        );
        assert!(Sphere::new(Point3::ZERO, -1.0).is_err());
        assert!(Sphere::new(Point3::ZERO, f64::NAN).is_err());
    }

    #[test]
    fn test_normal() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, 1.0), 1.0).unwrap();
        assert_eq!(sphere.normal_at(Point3::new(0.0, 0.0, 2.0)), Vector3::Z);
        assert_eq!(
            sphere.normal_at(Point3::new(1.0, 0.0, 1.0)),
            Vector3::X
        );
    }

    #[test]
    fn test_ray_misses() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(-1.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 0.0).unwrap());
        assert!(sphere.find_intersections(&ray).is_empty());
    }

    #[test]
    fn test_ray_crosses_sphere() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(-1.0, 0.0, 0.0), Vector3::new(3.0, 1.0, 0.0).unwrap());
        let points = sorted_points(&sphere, &ray);

        assert_eq!(points.len(), 2);
        assert_close(points[0], Point3::new(0.0651530771650466, 0.355051025721682, 0.0));
        assert_close(points[1], Point3::new(1.53484692283495, 0.844948974278318, 0.0));
    }

    #[test]
    fn test_ray_starts_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.0), Vector3::new(3.0, 1.0, 0.0).unwrap());
        assert_eq!(sphere.find_intersections(&ray).len(), 1);
    }

    #[test]
    fn test_ray_starts_after_sphere() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(2.0, 1.0, 0.0), Vector3::new(3.0, 1.0, 0.0).unwrap());
        assert!(sphere.find_intersections(&ray).is_empty());
    }

    #[test]
    fn test_ray_pointing_away_from_center() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(3.0, 0.0, 0.0), Vector3::X);
        assert!(sphere.find_intersections(&ray).is_empty());
    }

    #[test]
    fn test_ray_through_center_hits_twice_symmetrically() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(1.0, -2.0, 0.0), Vector3::Y);
        let points = sorted_points(&sphere, &ray);

        assert_eq!(points.len(), 2);
        assert_close(points[0], Point3::new(1.0, -1.0, 0.0));
        assert_close(points[1], Point3::new(1.0, 1.0, 0.0));
        let mid = (points[0].as_dvec3() + points[1].as_dvec3()) / 2.0;
        assert!(mid.distance(sphere.center().as_dvec3()) < TOLERANCE);
    }

    #[test]
    fn test_ray_on_surface_pointing_inward() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(1.0, -1.0, 0.0), Vector3::Y);
        let points = sphere.find_points(&ray);
        assert_eq!(points.len(), 1);
        assert_close(points[0], Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_ray_on_surface_pointing_outward() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(2.0, 0.0, 0.0), Vector3::X);
        assert!(sphere.find_intersections(&ray).is_empty());
    }

    #[test]
    fn test_ray_from_center_exits_once() {
        let sphere = unit_sphere();
        let ray = Ray::new(sphere.center(), Vector3::Y);
        let points = sphere.find_points(&ray);
        assert_eq!(points.len(), 1);
        assert_close(points[0], Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_tangent_ray_misses() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(1.0, 1.0, -1.0), Vector3::Z);
        assert!(sphere.find_intersections(&ray).is_empty());
    }

    #[test]
    fn test_max_distance() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::new(1.0, -2.0, 0.0), Vector3::Y);
        assert_eq!(sphere.find_hits(&ray, 2.0).len(), 1);
        assert!(sphere.find_hits(&ray, 0.5).is_empty());
    }

    #[test]
    fn test_hit_references_sphere() {
        let sphere = Sphere::new(Point3::ZERO, 2.0)
            .unwrap()
            .with_emission(Color::new(10.0, 0.0, 0.0));
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vector3::Z);
        let hits = sphere.find_intersections(&ray);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].geometry.emission(), Color::new(10.0, 0.0, 0.0));
    }
}
