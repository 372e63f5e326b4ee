//! Render a lit sphere and save it as PNG.
//!
//! Usage: `cargo run --example render_sphere -- [settings.json] [output.png]`

use std::time::Instant;

use anyhow::Context;
use lumen_core::{AmbientLight, DirectionalLight, Material, Plane, PointLight, Scene, Sphere};
use lumen_math::{Color, Point3, Vector3};
use lumen_renderer::{render_image, Camera, RenderSettings, ViewPlane, WhittedTracer};

const WIDTH: u32 = 200;
const HEIGHT: u32 = 200;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading settings from {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => RenderSettings::default().with_anti_aliasing(3, 3),
    };
    let output = args.next().unwrap_or_else(|| "sphere.png".to_string());

    let start = Instant::now();
    let scene = build_scene()?;
    log::info!("Scene '{}' built in {:?}", scene.name(), start.elapsed());

    let camera = Camera::new(
        Point3::ZERO,
        Vector3::NEG_Z,
        Vector3::Y,
        ViewPlane::new(500.0, 500.0, 100.0),
    )?;
    let tracer = WhittedTracer::new(&scene);
    let image = render_image(&camera, &tracer, settings, WIDTH, HEIGHT)?;

    image::save_buffer(
        &output,
        &image.to_rgba8(),
        image.width,
        image.height,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("writing {output}"))?;
    log::info!("Saved to {}", output);
    Ok(())
}

fn build_scene() -> anyhow::Result<Scene> {
    let sphere = Sphere::new(Point3::new(0.0, 0.0, -100.0), 50.0)?
        .with_emission(Color::new(20.0, 20.0, 60.0))
        .with_material(
            Material::new()
                .with_kd(0.5)
                .with_ks(0.5)
                .with_shininess(100)
                .with_kr(0.2),
        );
    let floor = Plane::new(Point3::new(0.0, -50.0, 0.0), Vector3::Y)
        .with_emission(Color::new(15.0, 15.0, 15.0))
        .with_material(Material::new().with_kd(0.4).with_kr(0.3));

    Ok(Scene::builder("sphere")
        .with_background(Color::new(10.0, 10.0, 25.0))
        .with_ambient_light(AmbientLight::new(Color::WHITE, 0.1))
        .with_geometry(sphere)
        .with_geometry(floor)
        .with_light(DirectionalLight::new(
            Color::new(200.0, 180.0, 160.0),
            Vector3::new(1.0, -1.0, -0.5)?,
        ))
        .with_light(
            PointLight::new(Color::new(255.0, 200.0, 120.0), Point3::new(-60.0, 40.0, -40.0))
                .with_attenuation(1.0, 0.002, 0.0001)?,
        )
        .build())
}
