//! Pinhole camera and view plane.

use glam::DVec3;
use lumen_math::{Point3, Ray, Vector3};
use serde::{Deserialize, Serialize};

use crate::{CameraError, CameraResult};

/// Size of the view plane and its distance from the eye.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewPlane {
    pub width: f64,
    pub height: f64,
    pub distance: f64,
}

impl ViewPlane {
    pub const fn new(width: f64, height: f64, distance: f64) -> Self {
        Self {
            width,
            height,
            distance,
        }
    }

    fn is_valid(&self) -> bool {
        [self.width, self.height, self.distance]
            .iter()
            .all(|v| *v > 0.0 && v.is_finite())
    }
}

/// Camera for generating rays into the scene.
///
/// The camera sits at `location` looking along `to`, with `up` pointing to
/// the top of the image and `right = to × up` to its right. Rays pass
/// through a rectangular view plane centered on the forward axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    location: Point3,
    to: Vector3,
    up: Vector3,
    right: Vector3,
    view_plane: ViewPlane,
}

impl Camera {
    /// Create a camera. `to` and `up` must be orthogonal.
    pub fn new(
        location: Point3,
        to: Vector3,
        up: Vector3,
        view_plane: ViewPlane,
    ) -> CameraResult<Self> {
        if !to.is_orthogonal_to(up) {
            return Err(CameraError::NotOrthogonal);
        }
        if !view_plane.is_valid() {
            return Err(CameraError::InvalidViewPlane {
                width: view_plane.width,
                height: view_plane.height,
                distance: view_plane.distance,
            });
        }

        let to = to.normalize();
        let up = up.normalize();
        let right = to.cross(up)?.normalize();

        Ok(Self {
            location,
            to,
            up,
            right,
            view_plane,
        })
    }

    pub fn location(&self) -> Point3 {
        self.location
    }

    pub fn to(&self) -> Vector3 {
        self.to
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn view_plane(&self) -> &ViewPlane {
        &self.view_plane
    }

    /// Width and height of one pixel on the view plane.
    pub fn pixel_size(&self, n_x: u32, n_y: u32) -> (f64, f64) {
        (
            self.view_plane.width / n_x as f64,
            self.view_plane.height / n_y as f64,
        )
    }

    /// Point on the view plane inside pixel `(col, row)`.
    ///
    /// `dx` and `dy` are offsets from the pixel center in pixel units,
    /// within `[-0.5, 0.5]`; positive `dy` moves down the image.
    pub fn pixel_point(&self, n_x: u32, n_y: u32, col: u32, row: u32, dx: f64, dy: f64) -> Point3 {
        let (rx, ry) = self.pixel_size(n_x, n_y);
        let xj = (col as f64 - (n_x as f64 - 1.0) / 2.0 + dx) * rx;
        let yi = -(row as f64 - (n_y as f64 - 1.0) / 2.0 + dy) * ry;

        let center: DVec3 = self.location.as_dvec3() + self.to.as_dvec3() * self.view_plane.distance;
        Point3::from_dvec3(center + self.right.as_dvec3() * xj + self.up.as_dvec3() * yi)
    }

    /// Center of pixel `(col, row)` on the view plane.
    pub fn pixel_center(&self, n_x: u32, n_y: u32, col: u32, row: u32) -> Point3 {
        self.pixel_point(n_x, n_y, col, row, 0.0, 0.0)
    }

    /// Ray from the eye through a point on the view plane.
    pub fn ray_through(&self, target: Point3) -> Ray {
        // View plane points are at `distance > 0` along `to`, so never at the eye
        match target.subtract(self.location) {
            Ok(direction) => Ray::new(self.location, direction),
            Err(_) => Ray::new(self.location, self.to),
        }
    }

    /// Ray from the eye through the center of pixel `(col, row)` of an
    /// `n_x` by `n_y` image.
    pub fn construct_ray(&self, n_x: u32, n_y: u32, col: u32, row: u32) -> Ray {
        self.ray_through(self.pixel_center(n_x, n_y, col, row))
    }
}
