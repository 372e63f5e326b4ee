//! Infinite tube and finite cylinder primitives.

use glam::DVec3;
use lumen_math::{align_zero, is_zero, Color, Interval, Point3, Ray, Vector3};

use crate::intersectable::quadratic_roots;
use crate::{Geometry, GeometryError, GeometryResult, Hit, Intersectable, Material, Surface};

/// An infinite tube of given radius around an axis ray.
#[derive(Debug, Clone)]
pub struct Tube {
    axis: Ray,
    radius: f64,
    surface: Surface,
}

impl Tube {
    pub fn new(axis: Ray, radius: f64) -> GeometryResult<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self {
            axis,
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

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed distance along the axis of the projection of `point`.
    fn axial_offset(&self, point: Point3) -> f64 {
        let p0_p = point.as_dvec3() - self.axis.origin().as_dvec3();
        align_zero(p0_p.dot(self.axis.direction().as_dvec3()))
    }

    /// Ray parameters where the ray crosses the tube wall.
    ///
    /// Only the component of the ray perpendicular to the axis matters:
    /// with `Δp = O - P0`, solve
    /// `(1 - (d·v)²)t² + 2(d·Δp - (d·v)(Δp·v))t + |Δp|² - (Δp·v)² - r² = 0`.
    fn wall_distances(&self, ray: &Ray, max_distance: f64) -> Vec<f64> {
        let d = ray.direction().as_dvec3();
        let v = self.axis.direction().as_dvec3();
        let delta_p = ray.origin().as_dvec3() - self.axis.origin().as_dvec3();

        let dv = d.dot(v);
        let dpv = delta_p.dot(v);

        let a = 1.0 - dv * dv;
        let b = 2.0 * (d.dot(delta_p) - dv * dpv);
        let c = delta_p.length_squared() - dpv * dpv - self.radius * self.radius;

        quadratic_roots(a, b, c, Interval::forward(max_distance))
    }
}

impl Intersectable for Tube {
    fn find_hits<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Hit<'a>> {
        self.wall_distances(ray, max_distance)
            .into_iter()
            .map(|t| Hit::new(self, ray.at(t)))
            .collect()
    }
}

impl Geometry for Tube {
    /// Direction from the point's projection on the axis to the point.
    ///
    /// A point on the axis itself gets an arbitrary perpendicular.
    fn normal_at(&self, point: Point3) -> Vector3 {
        let t = self.axial_offset(point);
        let o = self.axis.at(t);
        point
            .subtract(o)
            .map(|v| v.normalize())
            .unwrap_or_else(|_| self.axis.direction().any_orthonormal())
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

/// A tube segment of finite height starting at the axis origin.
///
/// Cylinders are open by default; [`Cylinder::with_caps`] closes both ends.
#[derive(Debug, Clone)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
    capped: bool,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> GeometryResult<Self> {
        let tube = Tube::new(axis, radius)?;
        if !(height > 0.0 && height.is_finite()) {
            return Err(GeometryError::InvalidHeight(height));
        }
        Ok(Self {
            tube,
            height,
            capped: false,
        })
    }

    /// Close both ends with disks.
    pub fn with_caps(mut self) -> Self {
        self.capped = true;
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.tube = self.tube.with_emission(emission);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.tube = self.tube.with_material(material);
        self
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_capped(&self) -> bool {
        self.capped
    }

    /// Ray parameter where the ray meets the cap disk centered at `center`.
    fn cap_distance(&self, ray: &Ray, center: DVec3, max_distance: f64) -> Option<f64> {
        let v = self.tube.axis.direction().as_dvec3();
        let nv = align_zero(ray.direction().as_dvec3().dot(v));
        if nv == 0.0 {
            return None;
        }

        let t = align_zero((center - ray.origin().as_dvec3()).dot(v) / nv);
        if !Interval::forward(max_distance).surrounds(t) {
            return None;
        }

        let r2 = self.tube.radius * self.tube.radius;
        let on_disk = ray.at(t).as_dvec3().distance_squared(center) <= r2;
        on_disk.then_some(t)
    }
}

impl Intersectable for Cylinder {
    fn find_hits<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Hit<'a>> {
        let height = Interval::new(0.0, self.height);
        let mut hits: Vec<Hit<'a>> = self
            .tube
            .wall_distances(ray, max_distance)
            .into_iter()
            .map(|t| ray.at(t))
            .filter(|p| height.surrounds(self.tube.axial_offset(*p)))
            .map(|p| Hit::new(self, p))
            .collect();

        if self.capped {
            let axis = &self.tube.axis;
            let bottom = axis.origin().as_dvec3();
            let top = axis.at(self.height).as_dvec3();
            for center in [bottom, top] {
                if let Some(t) = self.cap_distance(ray, center, max_distance) {
                    hits.push(Hit::new(self, ray.at(t)));
                }
            }
        }

        hits
    }
}

impl Geometry for Cylinder {
    fn normal_at(&self, point: Point3) -> Vector3 {
        if self.capped {
            let t = self.tube.axial_offset(point);
            if t == 0.0 {
                return -self.tube.axis.direction();
            }
            if is_zero(t - self.height) {
                return self.tube.axis.direction();
            }
        }
        self.tube.normal_at(point)
    }

    fn surface(&self) -> &Surface {
        self.tube.surface()
    }
}
