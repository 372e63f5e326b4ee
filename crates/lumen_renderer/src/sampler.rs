//! Per-pixel ray sampling strategies.

use lumen_math::Color;
use rand::{Rng, RngCore};

use crate::{Camera, Grid, RayTracer, Recursion, RenderSettings};

/// How a pixel's color is estimated from one or more rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sampler {
    /// A single ray through the pixel center.
    Center,
    /// One randomly placed ray per cell of a grid over the pixel, averaged.
    Jittered(Grid),
    /// Rays at the pixel corners; quadrants whose corners disagree by more
    /// than `tolerance` are split again, at most `max_depth` times.
    Adaptive { max_depth: u32, tolerance: f64 },
}

impl Sampler {
    /// Pick the sampler described by the settings. Adaptive sampling takes
    /// precedence over grid supersampling.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        let adaptive = &settings.adaptive;
        let anti_aliasing = &settings.anti_aliasing;
        if adaptive.enabled {
            Sampler::Adaptive {
                max_depth: adaptive.max_depth,
                tolerance: adaptive.tolerance,
            }
        } else if let (true, Some(grid)) = (anti_aliasing.enabled, anti_aliasing.samples) {
            Sampler::Jittered(grid)
        } else {
            Sampler::Center
        }
    }

    /// Estimate the color of pixel `(col, row)` of an `n_x` by `n_y` image.
    pub fn sample_pixel(
        &self,
        camera: &Camera,
        tracer: &dyn RayTracer,
        recursion: Recursion,
        (n_x, n_y): (u32, u32),
        (col, row): (u32, u32),
        rng: &mut dyn RngCore,
    ) -> Color {
        let pixel = PixelSampler {
            camera,
            tracer,
            recursion,
            n_x,
            n_y,
            col,
            row,
        };

        match *self {
            // A 1x1 grid is exactly the center ray
            Sampler::Center => pixel.trace_center(),
            Sampler::Jittered(grid) if grid.sample_count() == Some(1) => pixel.trace_center(),
            Sampler::Jittered(grid) => pixel.jittered(grid, rng),
            Sampler::Adaptive {
                max_depth,
                tolerance,
            } => {
                let corners = [
                    pixel.trace_at(-0.5, -0.5),
                    pixel.trace_at(0.5, -0.5),
                    pixel.trace_at(-0.5, 0.5),
                    pixel.trace_at(0.5, 0.5),
                ];
                pixel.subdivide(-0.5, -0.5, 1.0, corners, max_depth, tolerance)
            }
        }
    }
}

/// One pixel of one image, as seen by one camera and tracer.
struct PixelSampler<'a> {
    camera: &'a Camera,
    tracer: &'a dyn RayTracer,
    recursion: Recursion,
    n_x: u32,
    n_y: u32,
    col: u32,
    row: u32,
}

impl PixelSampler<'_> {
    fn trace_center(&self) -> Color {
        let ray = self.camera.construct_ray(self.n_x, self.n_y, self.col, self.row);
        self.tracer.trace_ray(&ray, self.recursion)
    }

    /// Trace through the point offset by `(dx, dy)` pixels from the center.
    fn trace_at(&self, dx: f64, dy: f64) -> Color {
        let target = self
            .camera
            .pixel_point(self.n_x, self.n_y, self.col, self.row, dx, dy);
        self.tracer
            .trace_ray(&self.camera.ray_through(target), self.recursion)
    }

    fn jittered(&self, grid: Grid, rng: &mut dyn RngCore) -> Color {
        let (columns, rows) = (grid.columns as f64, grid.rows as f64);
        let mut sum = Color::BLACK;
        let mut count = 0;
        for j in 0..grid.rows {
            for i in 0..grid.columns {
                let dx = (i as f64 + rng.gen::<f64>()) / columns - 0.5;
                let dy = (j as f64 + rng.gen::<f64>()) / rows - 0.5;
                sum += self.trace_at(dx, dy);
                count += 1;
            }
        }
        sum.reduce(count)
    }

    /// Average color of the square at `(x0, y0)` with side `size` (pixel
    /// units), given the colors at its corners in the order top-left,
    /// top-right, bottom-left, bottom-right.
    fn subdivide(
        &self,
        x0: f64,
        y0: f64,
        size: f64,
        corners: [Color; 4],
        depth_left: u32,
        tolerance: f64,
    ) -> Color {
        let [top_left, top_right, bottom_left, bottom_right] = corners;
        let agree = corners[1..]
            .iter()
            .all(|c| c.is_close(top_left, tolerance));
        if depth_left == 0 || agree {
            return Color::average(corners);
        }

        let half = size / 2.0;
        let (xm, ym) = (x0 + half, y0 + half);
        let (x1, y1) = (x0 + size, y0 + size);

        let top = self.trace_at(xm, y0);
        let left = self.trace_at(x0, ym);
        let center = self.trace_at(xm, ym);
        let right = self.trace_at(x1, ym);
        let bottom = self.trace_at(xm, y1);

        let depth = depth_left - 1;
        Color::average([
            self.subdivide(x0, y0, half, [top_left, top, left, center], depth, tolerance),
            self.subdivide(xm, y0, half, [top, top_right, center, right], depth, tolerance),
            self.subdivide(x0, ym, half, [left, center, bottom_left, bottom], depth, tolerance),
            self.subdivide(xm, ym, half, [center, right, bottom, bottom_right], depth, tolerance),
        ])
    }
}
