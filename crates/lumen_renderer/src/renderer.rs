//! Pixel dispatch and output.
//!
//! The [`Renderer`] splits an image across a fixed pool of worker threads.
//! Each worker claims the next unrendered pixel from a shared counter until
//! the image is exhausted, so every pixel is traced by exactly one worker.
//! Colors are collected per worker and handed to the [`PixelSink`] on the
//! calling thread once all workers are done.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use lumen_math::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::ThreadPoolBuilder;

use crate::{Camera, RayTracer, RenderError, RenderResult, RenderSettings, Sampler};

/// Destination for final pixel colors.
pub trait PixelSink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Store the final color of pixel `(col, row)`, row 0 at the top.
    fn write_pixel(&mut self, col: u32, row: u32, color: Color);
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_rgb8());
            bytes.push(255);
        }
        bytes
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl PixelSink for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn write_pixel(&mut self, col: u32, row: u32, color: Color) {
        self.set(col, row, color);
    }
}

/// Drives a camera and a ray tracer over every pixel of a sink.
///
/// Both the tracer and the sink must be set before rendering.
pub struct Renderer<'a> {
    camera: &'a Camera,
    settings: RenderSettings,
    tracer: Option<&'a dyn RayTracer>,
    sink: Option<&'a mut dyn PixelSink>,
}

impl<'a> Renderer<'a> {
    pub fn new(camera: &'a Camera) -> Self {
        Self {
            camera,
            settings: RenderSettings::default(),
            tracer: None,
            sink: None,
        }
    }

    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_tracer(mut self, tracer: &'a dyn RayTracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn with_sink(mut self, sink: &'a mut dyn PixelSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render every pixel of the sink.
    ///
    /// Missing resources and invalid settings are reported before any worker
    /// starts.
    pub fn render(&mut self) -> RenderResult<()> {
        let tracer = self.tracer.ok_or(RenderError::MissingResource("ray tracer"))?;
        let sink = self
            .sink
            .as_deref_mut()
            .ok_or(RenderError::MissingResource("pixel sink"))?;
        self.settings.validate()?;

        let camera = self.camera;
        let (width, height) = (sink.width(), sink.height());
        let total = width as usize * height as usize;
        let sampler = Sampler::from_settings(&self.settings);
        let recursion = self.settings.recursion;
        let workers = self.settings.threads.worker_count;
        let seed = self.settings.seed.unwrap_or_else(rand::random);

        log::info!(
            "Rendering {}x{} with {:?} sampling on {} workers",
            width,
            height,
            sampler,
            workers
        );
        let start = Instant::now();

        let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
        let next = AtomicUsize::new(0);

        let batches = pool.broadcast(|ctx| {
            let mut pixels = Vec::new();
            loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                if index >= total {
                    break;
                }
                let col = (index % width as usize) as u32;
                let row = (index / width as usize) as u32;

                // Seeded per pixel so jitter does not depend on scheduling
                let mut rng = StdRng::seed_from_u64(seed ^ index as u64);
                let color = sampler.sample_pixel(
                    camera,
                    tracer,
                    recursion,
                    (width, height),
                    (col, row),
                    &mut rng,
                );
                pixels.push((col, row, color));
            }
            log::debug!("Worker {} rendered {} pixels", ctx.index(), pixels.len());
            pixels
        });

        for (col, row, color) in batches.into_iter().flatten() {
            sink.write_pixel(col, row, color);
        }

        log::info!(
            "Rendered {} pixels in {:.2}s",
            total,
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Draw grid lines of `color` every `interval` pixels.
    pub fn print_grid(&mut self, interval: u32, color: Color) -> RenderResult<()> {
        let sink = self
            .sink
            .as_deref_mut()
            .ok_or(RenderError::MissingResource("pixel sink"))?;
        if interval == 0 {
            return Err(RenderError::InvalidSettings(
                "grid interval must be at least 1".to_string(),
            ));
        }

        for row in 0..sink.height() {
            for col in 0..sink.width() {
                if row % interval == 0 || col % interval == 0 {
                    sink.write_pixel(col, row, color);
                }
            }
        }
        Ok(())
    }
}

/// Render a `width` by `height` image into a new buffer.
pub fn render_image(
    camera: &Camera,
    tracer: &dyn RayTracer,
    settings: RenderSettings,
    width: u32,
    height: u32,
) -> RenderResult<ImageBuffer> {
    let mut image = ImageBuffer::new(width, height);
    Renderer::new(camera)
        .with_settings(settings)
        .with_tracer(tracer)
        .with_sink(&mut image)
        .render()?;
    Ok(image)
}
