//! The scene a renderer traces against.
//!
//! A [`Scene`] is assembled once through [`SceneBuilder`] and is read-only
//! afterwards, so it can be shared by reference across render threads.

use lumen_math::Color;

use crate::{AmbientLight, Geometries, Intersectable, LightSource};

/// Geometry, lights and background of a render.
#[derive(Debug)]
pub struct Scene {
    name: String,
    background: Color,
    ambient_light: AmbientLight,
    geometries: Geometries,
    lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Start building a scene. Background defaults to black and there is no
    /// ambient light.
    pub fn builder(name: impl Into<String>) -> SceneBuilder {
        SceneBuilder {
            scene: Scene {
                name: name.into(),
                background: Color::BLACK,
                ambient_light: AmbientLight::NONE,
                geometries: Geometries::new(),
                lights: Vec::new(),
            },
        }
    }

    /// Scene name (usually the file or test it came from).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color of rays that hit nothing.
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn ambient_light(&self) -> &AmbientLight {
        &self.ambient_light
    }

    pub fn geometries(&self) -> &Geometries {
        &self.geometries
    }

    pub fn lights(&self) -> &[Box<dyn LightSource>] {
        &self.lights
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

/// Staged construction of a [`Scene`].
#[derive(Debug)]
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    pub fn with_background(mut self, background: Color) -> Self {
        self.scene.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.scene.ambient_light = ambient_light;
        self
    }

    /// Add one object to the scene's geometry.
    pub fn with_geometry(mut self, geometry: impl Intersectable + 'static) -> Self {
        self.scene.geometries.add(geometry);
        self
    }

    /// Replace the scene's geometry with a prepared aggregate.
    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.scene.geometries = geometries;
        self
    }

    pub fn with_light(mut self, light: impl LightSource + 'static) -> Self {
        self.scene.lights.push(Box::new(light));
        self
    }

    pub fn build(self) -> Scene {
        let scene = self.scene;
        log::debug!(
            "Scene '{}': {} geometries, {} lights",
            scene.name,
            scene.geometries.len(),
            scene.lights.len()
        );
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectionalLight, Plane, PointLight, Sphere};
    use lumen_math::{Point3, Ray, Vector3};

    #[test]
    fn test_builder_defaults() {
        let scene = Scene::builder("empty").build();
        assert_eq!(scene.name(), "empty");
        assert_eq!(scene.background(), Color::BLACK);
        assert_eq!(*scene.ambient_light(), AmbientLight::NONE);
        assert!(scene.geometries().is_empty());
        assert_eq!(scene.light_count(), 0);
    }

    #[test]
    fn test_builder_collects_everything() {
        let scene = Scene::builder("test")
            .with_background(Color::new(10.0, 20.0, 30.0))
            .with_ambient_light(AmbientLight::new(Color::WHITE, 0.1))
            .with_geometry(Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0).unwrap())
            .with_geometry(Plane::new(Point3::new(0.0, -1.0, 0.0), Vector3::Y))
            .with_light(DirectionalLight::new(Color::WHITE, Vector3::NEG_Y))
            .with_light(PointLight::new(Color::WHITE, Point3::new(0.0, 5.0, 0.0)))
            .build();

        assert_eq!(scene.background(), Color::new(10.0, 20.0, 30.0));
        assert_eq!(scene.geometries().len(), 2);
        assert_eq!(scene.light_count(), 2);

        let ray = Ray::new(Point3::ZERO, Vector3::NEG_Z);
        assert_eq!(scene.geometries().find_intersections(&ray).len(), 2);
    }

    #[test]
    fn test_with_geometries_replaces_aggregate() {
        let mut geometries = Geometries::new();
        geometries.add(Sphere::new(Point3::ZERO, 1.0).unwrap());

        let scene = Scene::builder("replaced")
            .with_geometry(Plane::new(Point3::ZERO, Vector3::Z))
            .with_geometries(geometries)
            .build();
        assert_eq!(scene.geometries().len(), 1);
    }
}
