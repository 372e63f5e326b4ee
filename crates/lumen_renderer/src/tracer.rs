//! Recursive Whitted-style shading.
//!
//! The color of a hit is its emission plus the local effects of every light
//! (diffuse and specular, attenuated by whatever transparent objects lie in
//! between) plus, while recursion allows, the global effects of the
//! reflected and refracted rays. Two limits bound the recursion: the
//! remaining level, and the accumulated coefficient product `k` which drops
//! any path whose contribution can no longer be seen.

use lumen_core::{Hit, Intersectable, LightSource, Material, Scene};
use lumen_math::{align_zero, Color, Double3, Ray, Vector3};

use crate::Recursion;

/// Computes the color seen along a ray.
pub trait RayTracer: Send + Sync {
    /// Color seen along `ray`, recursing no further than `recursion` allows.
    fn trace_ray(&self, ray: &Ray, recursion: Recursion) -> Color;
}

/// Whitted ray tracer over a borrowed, read-only scene.
#[derive(Debug, Clone, Copy)]
pub struct WhittedTracer<'s> {
    scene: &'s Scene,
}

impl<'s> WhittedTracer<'s> {
    pub fn new(scene: &'s Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &'s Scene {
        self.scene
    }
}

impl RayTracer for WhittedTracer<'_> {
    fn trace_ray(&self, ray: &Ray, recursion: Recursion) -> Color {
        let shader = Shader {
            scene: self.scene,
            min_k: recursion.min_attenuation,
        };
        match shader.find_closest(ray) {
            Some(hit) => {
                shader.calc_color(&hit, ray, recursion.max_depth, Double3::ONE)
                    + self.scene.ambient_light().intensity()
            }
            None => self.scene.background(),
        }
    }
}

/// Shading of one primary ray and everything it spawns.
struct Shader<'s> {
    scene: &'s Scene,
    min_k: f64,
}

impl<'s> Shader<'s> {
    fn find_closest(&self, ray: &Ray) -> Option<Hit<'s>> {
        let hits = self.scene.geometries().find_intersections(ray);
        ray.find_closest_by(&hits, |hit| hit.point).copied()
    }

    fn calc_color(&self, hit: &Hit<'_>, ray: &Ray, level: u32, k: Double3) -> Color {
        let color = hit.geometry.emission() + self.local_effects(hit, ray, k);
        if level <= 1 {
            color
        } else {
            color + self.global_effects(hit, ray, level, k)
        }
    }

    fn local_effects(&self, hit: &Hit<'_>, ray: &Ray, k: Double3) -> Color {
        let v = ray.direction();
        let n = hit.geometry.normal_at(hit.point);
        let vn = align_zero(v.dot(n));
        if vn == 0.0 {
            return Color::BLACK;
        }

        let material = hit.geometry.material();
        let mut color = Color::BLACK;
        for light in self.scene.lights() {
            let Some(l) = light.direction_at(hit.point) else {
                continue;
            };
            // Light and viewer must be on the same side of the surface
            let nl = align_zero(n.dot(l));
            if align_zero(nl * vn) <= 0.0 {
                continue;
            }

            let ktr = self.transparency(hit, light.as_ref(), l, n, k);
            if ktr.product(k).lower_than(self.min_k) {
                continue;
            }

            let intensity = light.intensity_at(hit.point).scale_by(ktr);
            let factor = diffuse(material, nl) + specular(material, n, l, v);
            color += intensity.scale_by(factor);
        }
        color
    }

    /// Product of the transmission coefficients of everything between the
    /// hit and the light. Returns zero as soon as the light is effectively
    /// blocked for a path already attenuated by `k`.
    fn transparency(
        &self,
        hit: &Hit<'_>,
        light: &dyn LightSource,
        l: Vector3,
        n: Vector3,
        k: Double3,
    ) -> Double3 {
        let shadow_ray = Ray::with_bias(hit.point, -l, n);
        let light_distance = light.distance_to(hit.point);

        let mut ktr = Double3::ONE;
        for blocker in self
            .scene
            .geometries()
            .find_hits(&shadow_ray, light_distance)
        {
            ktr = ktr.product(blocker.geometry.material().kt);
            if ktr.product(k).lower_than(self.min_k) {
                return Double3::ZERO;
            }
        }
        ktr
    }

    fn global_effects(&self, hit: &Hit<'_>, ray: &Ray, level: u32, k: Double3) -> Color {
        let v = ray.direction();
        let n = hit.geometry.normal_at(hit.point);
        let material = hit.geometry.material();

        let reflected = Ray::with_bias(hit.point, v.reflect(n), n);
        let refracted = Ray::with_bias(hit.point, v, n);

        self.global_effect(&reflected, level, material.kr, k)
            + self.global_effect(&refracted, level, material.kt, k)
    }

    fn global_effect(&self, ray: &Ray, level: u32, kx: Double3, k: Double3) -> Color {
        let kkx = kx.product(k);
        if kkx.lower_than(self.min_k) {
            return Color::BLACK;
        }

        let color = match self.find_closest(ray) {
            Some(hit) => self.calc_color(&hit, ray, level - 1, kkx),
            None => self.scene.background(),
        };
        color.scale_by(kx)
    }
}

fn diffuse(material: &Material, nl: f64) -> Double3 {
    material.kd.scale(nl.abs())
}

/// Phong specular term. `l` is the incoming light direction, so its mirror
/// image about `n` must point back toward the viewer.
fn specular(material: &Material, n: Vector3, l: Vector3, v: Vector3) -> Double3 {
    let r = l.reflect(n);
    let minus_vr = -align_zero(r.dot(v));
    if minus_vr <= 0.0 {
        return Double3::ZERO;
    }
    material.ks.scale(minus_vr.powi(material.shininess as i32))
}
