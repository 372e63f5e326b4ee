//! Lumen Core - scene model for Whitted-style ray tracing.
//!
//! This crate provides:
//!
//! - **Geometry**: `Sphere`, `Plane`, `Polygon`, `Triangle`, `Tube`, `Cylinder`
//!   and the `Geometries` aggregate, all answering ray intersection queries
//! - **Lighting**: ambient, directional, point and spot lights
//! - **Scene**: the immutable bundle a renderer traces against
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Scene, Sphere, DirectionalLight, Material};
//!
//! let sphere = Sphere::new(Point3::new(0.0, 0.0, -100.0), 50.0)?
//!     .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(30));
//! let scene = Scene::builder("single sphere")
//!     .with_geometry(sphere)
//!     .with_light(DirectionalLight::new(Color::WHITE, light_dir))
//!     .build();
//! ```

mod cylinder;
mod intersectable;
mod light;
mod material;
mod plane;
mod polygon;
mod scene;
mod sphere;

pub use cylinder::{Cylinder, Tube};
pub use intersectable::{Geometries, Geometry, Hit, Intersectable, Surface};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::Material;
pub use plane::Plane;
pub use polygon::{Polygon, Triangle};
pub use scene::{Scene, SceneBuilder};
pub use sphere::Sphere;

/// Re-export the value types from lumen_math
pub use lumen_math::{Color, Double3, Point3, Ray, Vector3};

use lumen_math::MathError;
use thiserror::Error;

/// Errors raised while constructing geometry and lights.
///
/// Every invariant is checked once, at construction. Tracing never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("math error: {0}")]
    Math(#[from] MathError),

    #[error("radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("height must be positive, got {0}")]
    InvalidHeight(f64),

    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("all vertices of a polygon must lie in the same plane")]
    NotCoplanar,

    #[error("polygon vertices must be ordered and the polygon convex")]
    NotConvex,

    #[error("light attenuation factors must be non-negative and not all zero, got kc={kc}, kl={kl}, kq={kq}")]
    InvalidAttenuation { kc: f64, kl: f64, kq: f64 },
}

pub type GeometryResult<T> = Result<T, GeometryError>;
