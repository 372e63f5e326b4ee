//! Intersectable / Geometry traits, the Hit record and the Geometries aggregate.

use std::fmt;

use lumen_math::{align_zero, is_zero, Color, Interval, Point3, Ray, Vector3};

use crate::Material;

/// A point where a ray meets a surface.
///
/// Hits borrow the geometry they belong to and only live for a single trace.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// The surface that was hit
    pub geometry: &'a dyn Geometry,
    /// Point of intersection
    pub point: Point3,
}

impl<'a> Hit<'a> {
    pub fn new(geometry: &'a dyn Geometry, point: Point3) -> Self {
        Self { geometry, point }
    }
}

/// Anything a ray can be tested against.
pub trait Intersectable: Send + Sync {
    /// Find the hits along `ray` with parameter `0 < t < max_distance`.
    ///
    /// Hits are returned in no particular order. An empty vector means the
    /// ray misses; degenerate configurations (parallel rays, tangents) are
    /// misses, never errors.
    fn find_hits<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Hit<'a>>;

    /// Find all hits in front of the ray origin.
    fn find_intersections<'a>(&'a self, ray: &Ray) -> Vec<Hit<'a>> {
        self.find_hits(ray, f64::INFINITY)
    }

    /// Intersection points only.
    fn find_points(&self, ray: &Ray) -> Vec<Point3> {
        self.find_intersections(ray)
            .into_iter()
            .map(|hit| hit.point)
            .collect()
    }
}

/// Self-emitted light and material of a primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Surface {
    pub emission: Color,
    pub material: Material,
}

/// A shadable primitive.
pub trait Geometry: Intersectable + fmt::Debug {
    /// Unit normal at a point on the surface.
    ///
    /// The result for points off the surface is unspecified (but never panics).
    fn normal_at(&self, point: Point3) -> Vector3;

    fn surface(&self) -> &Surface;

    fn emission(&self) -> Color {
        self.surface().emission
    }

    fn material(&self) -> &Material {
        &self.surface().material
    }
}

/// Positive roots of `a·t² + b·t + c = 0` that fall strictly inside `ray_t`.
///
/// A non-positive discriminant (tangent or miss) yields no roots. A vanishing
/// `a` falls back to the linear equation.
pub(crate) fn quadratic_roots(a: f64, b: f64, c: f64, ray_t: Interval) -> Vec<f64> {
    if is_zero(a) {
        if is_zero(b) {
            return Vec::new();
        }
        let t = align_zero(-c / b);
        return if ray_t.surrounds(t) { vec![t] } else { Vec::new() };
    }

    let discriminant = align_zero(b * b - 4.0 * a * c);
    if discriminant <= 0.0 {
        return Vec::new();
    }

    let sqrtd = discriminant.sqrt();
    [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)]
        .into_iter()
        .map(align_zero)
        .filter(|t| ray_t.surrounds(*t))
        .collect()
}

/// A composite of intersectables, itself intersectable.
///
/// Aggregates may nest, so a scene can contain sub-scenes.
#[derive(Default)]
pub struct Geometries {
    children: Vec<Box<dyn Intersectable>>,
}

impl Geometries {
    /// Create a new empty aggregate.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Add an object to the aggregate.
    pub fn add(&mut self, child: impl Intersectable + 'static) {
        self.children.push(Box::new(child));
    }

    /// Add an already boxed object.
    pub fn add_boxed(&mut self, child: Box<dyn Intersectable>) {
        self.children.push(child);
    }

    /// Get the number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the aggregate is empty.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Debug for Geometries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Geometries")
            .field("children", &self.children.len())
            .finish()
    }
}

impl Intersectable for Geometries {
    fn find_hits<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Hit<'a>> {
        self.children
            .iter()
            .flat_map(|child| child.find_hits(ray, max_distance))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Plane, Sphere, Triangle};

    #[test]
    fn test_quadratic_two_roots() {
        // (t - 1)(t - 3)
        let roots = quadratic_roots(1.0, -4.0, 3.0, Interval::forward(f64::INFINITY));
        assert_eq!(roots, vec![1.0, 3.0]);
    }

    #[test]
    fn test_quadratic_filters_range() {
        // (t + 1)(t - 3)
        let roots = quadratic_roots(1.0, -2.0, -3.0, Interval::forward(f64::INFINITY));
        assert_eq!(roots, vec![3.0]);

        let bounded = quadratic_roots(1.0, -4.0, 3.0, Interval::forward(2.0));
        assert_eq!(bounded, vec![1.0]);
    }

    #[test]
    fn test_quadratic_tangent_and_miss() {
        // (t - 2)^2
        assert!(quadratic_roots(1.0, -4.0, 4.0, Interval::forward(f64::INFINITY)).is_empty());
        assert!(quadratic_roots(1.0, 0.0, 1.0, Interval::forward(f64::INFINITY)).is_empty());
    }

    #[test]
    fn test_quadratic_linear_fallback() {
        assert_eq!(quadratic_roots(0.0, 2.0, -4.0, Interval::forward(10.0)), vec![2.0]);
        assert!(quadratic_roots(0.0, 0.0, 1.0, Interval::forward(f64::INFINITY)).is_empty());
    }

    fn sample_geometries() -> Geometries {
        let mut geometries = Geometries::new();
        geometries.add(Sphere::new(Point3::new(0.0, 0.0, 1.0), 1.0).unwrap());
        geometries.add(
            Triangle::new(
                Point3::new(-4.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 4.0),
                Point3::new(0.0, 4.0, 0.0),
            )
            .unwrap(),
        );
        geometries.add(Plane::new(Point3::new(0.0, 0.0, 5.0), Vector3::Z));
        geometries
    }

    #[test]
    fn test_empty_aggregate() {
        let geometries = Geometries::new();
        let ray = Ray::new(Point3::ZERO, Vector3::Z);
        assert!(geometries.is_empty());
        assert!(geometries.find_intersections(&ray).is_empty());
    }

    #[test]
    fn test_aggregate_no_hits() {
        let geometries = sample_geometries();
        let ray = Ray::new(Point3::new(0.0, 0.0, -3.0), Vector3::NEG_Z);
        assert!(geometries.find_intersections(&ray).is_empty());
    }

    #[test]
    fn test_aggregate_only_one_child_hit() {
        let geometries = sample_geometries();
        // Parallel to the plane, misses sphere and triangle
        let ray = Ray::new(Point3::new(10.0, 10.0, 0.0), Vector3::X);
        assert!(geometries.find_intersections(&ray).is_empty());

        let ray = Ray::new(Point3::new(20.0, 20.0, 0.0), Vector3::Z);
        assert_eq!(geometries.find_intersections(&ray).len(), 1);
    }

    #[test]
    fn test_aggregate_all_children_hit() {
        let geometries = sample_geometries();
        // Through sphere (2), triangle plane region (1) and the plane (1)
        let ray = Ray::new(Point3::new(-0.5, 0.5, -1.0), Vector3::Z);
        assert_eq!(geometries.len(), 3);
        assert_eq!(geometries.find_intersections(&ray).len(), 4);
    }

    #[test]
    fn test_aggregate_max_distance() {
        let geometries = sample_geometries();
        let ray = Ray::new(Point3::new(-0.5, 0.5, -1.0), Vector3::Z);
        // Only the sphere entry lies within 2 units
        assert_eq!(geometries.find_hits(&ray, 2.0).len(), 1);
    }

    #[test]
    fn test_nested_aggregates() {
        let mut outer = Geometries::new();
        outer.add(sample_geometries());
        outer.add(Sphere::new(Point3::new(0.0, 0.0, 20.0), 1.0).unwrap());

        // Sample hits plus both walls of the far sphere
        let ray = Ray::new(Point3::new(-0.5, 0.5, -1.0), Vector3::Z);
        assert_eq!(outer.find_intersections(&ray).len(), 6);

        let axis_ray = Ray::new(Point3::new(0.0, 0.0, -1.0), Vector3::Z);
        let points = outer.find_points(&axis_ray);
        assert!(points.contains(&Point3::new(0.0, 0.0, 21.0)));
    }
}
