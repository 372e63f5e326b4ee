//! Lumen Renderer - multithreaded Whitted-style ray tracing.
//!
//! A [`Camera`] turns pixels into rays, a [`Sampler`] decides how many rays
//! each pixel gets, and a [`RayTracer`] (normally [`WhittedTracer`]) computes
//! the color seen along each ray. The [`Renderer`] drives all of them over a
//! worker pool and hands the final colors to a [`PixelSink`].
//!
//! # Example
//!
//! ```ignore
//! let camera = Camera::new(Point3::ZERO, Vector3::NEG_Z, Vector3::Y,
//!     ViewPlane::new(500.0, 500.0, 100.0))?;
//! let tracer = WhittedTracer::new(&scene);
//! let image = render_image(&camera, &tracer, RenderSettings::default(), 200, 200)?;
//! ```

mod camera;
mod renderer;
mod sampler;
mod settings;
mod tracer;

pub use camera::{Camera, ViewPlane};
pub use renderer::{render_image, ImageBuffer, PixelSink, Renderer};
pub use sampler::Sampler;
pub use settings::{AdaptiveSampling, AntiAliasing, Grid, Recursion, RenderSettings, Threads};
pub use tracer::{RayTracer, WhittedTracer};

use lumen_math::MathError;
use thiserror::Error;

/// Errors raised while setting up a camera.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("math error: {0}")]
    Math(#[from] MathError),

    #[error("forward and up vectors must be orthogonal")]
    NotOrthogonal,

    #[error("view plane needs positive size and distance, got {width}x{height} at {distance}")]
    InvalidViewPlane {
        width: f64,
        height: f64,
        distance: f64,
    },
}

pub type CameraResult<T> = Result<T, CameraError>;

/// Errors raised before a render starts. Tracing itself never fails.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("renderer resource not set: {0}")]
    MissingResource(&'static str),

    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;
