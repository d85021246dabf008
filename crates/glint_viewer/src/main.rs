//! Glint Viewer - paced render loop over a sample scene.
//!
//! Usage: `glint_viewer [config.json] [output.png]`
//!
//! Orbits the camera around the scene for a few seconds at the configured
//! frame rate and writes the last frame as a PNG.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use glint_core::{MaterialPreset, ObjectDesc, ObjectKind, ObjectUpdate, Scene, Texture};
use glint_math::{Color, Euler, Vec3};
use glint_renderer::{Camera, FrameBuffer, FrameDriver, FrameStatus, RenderConfig, RenderContext};

/// Frames to render before saving.
const FRAME_COUNT: u64 = 48;
/// Camera distance from the scene center.
const ORBIT_RADIUS: f32 = 400.0;
const ORBIT_HEIGHT: f32 = 80.0;

fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

fn build_scene() -> Scene {
    let mut scene = Scene::new("sample");

    scene.create(ObjectDesc::plane(-50.0).with_color(Color::new(210.0, 210.0, 200.0)));
    scene.create(
        ObjectDesc::sphere(Vec3::new(0.0, 10.0, 0.0), 60.0)
            .with_color(Color::new(240.0, 240.0, 240.0))
            .with_preset(MaterialPreset::Reflective),
    );
    scene.create(
        ObjectDesc::cube(Vec3::new(130.0, -10.0, 40.0), 40.0)
            .with_rotation(Euler::from_degrees(0.0, 30.0, 0.0))
            .with_color(Color::new(70.0, 120.0, 230.0)),
    );
    scene.create(
        ObjectDesc::sphere(Vec3::new(-120.0, -15.0, 60.0), 35.0)
            .with_color(Color::new(230.0, 80.0, 60.0))
            .with_texture(Texture::none())
            .with_preset(MaterialPreset::Metal),
    );

    log::info!("Built scene '{}' with {} objects", scene.name, scene.len());
    scene
}

/// Place the camera on the orbit at `angle`, facing the scene center.
fn orbit(ctx: &mut RenderContext, angle: f32) {
    let x = ORBIT_RADIUS * angle.sin();
    let z = -ORBIT_RADIUS * angle.cos();
    ctx.set_camera(x, ORBIT_HEIGHT, z);

    let to_center = -Vec3::new(x, ORBIT_HEIGHT, z);
    let yaw = to_center.x.atan2(to_center.z);
    let pitch = (to_center.y / to_center.length()).asin();
    ctx.set_rotation(yaw, pitch);
}

fn save_png(buffer: &FrameBuffer, path: &Path) -> Result<()> {
    let image = image::RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec())
        .context("Frame buffer size does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Glint Viewer");

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("glint.png"));

    let config = load_config(config_path.as_deref())?;
    let mut driver = FrameDriver::new(config)?;
    let mut ctx = RenderContext::new(build_scene(), Camera::default());

    // Slowly spin the cube as the camera orbits
    let cube = ctx
        .scene
        .list()
        .iter()
        .find(|o| o.kind() == ObjectKind::Cube)
        .map(|o| o.id());

    let start = Instant::now();
    while driver.frames_rendered() < FRAME_COUNT {
        let step = driver.frames_rendered() as f32 / FRAME_COUNT as f32;
        orbit(&mut ctx, step * std::f32::consts::TAU);
        if let Some(id) = cube {
            let spin = Euler::from_degrees(0.0, 30.0 + 360.0 * step, 0.0);
            ctx.scene_mut().update(id, ObjectUpdate::new().rotation(spin));
        }

        match driver.tick(&ctx, Instant::now()) {
            FrameStatus::Rendered { stats, next_in } => {
                log::debug!(
                    "Frame {}: {} rays, next in {:?}",
                    driver.frames_rendered(),
                    stats.primary_rays + stats.reflection_rays + stats.shadow_rays,
                    next_in
                );
                thread::sleep(next_in);
            }
            FrameStatus::Skipped { wait } => thread::sleep(wait),
        }
    }

    let elapsed = start.elapsed();
    log::info!(
        "Rendered {} frames in {:.2?} ({:.1} fps)",
        driver.frames_rendered(),
        elapsed,
        driver.frames_rendered() as f64 / elapsed.as_secs_f64()
    );

    save_png(driver.buffer(), &output)?;
    log::info!("Saved last frame to {}", output.display());

    Ok(())
}
