//! Simple ray tracer example.
//!
//! Renders a small scene once and saves it in PPM format.

use glint_renderer::{
    Camera, Color, Euler, FrameBuffer, FrameDriver, MaterialPreset, ObjectDesc, RenderConfig,
    RenderContext, Scene, Texture, Vec3,
};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    let scene = build_scene();
    println!("Created {} objects", scene.len());

    let camera = Camera::new(Vec3::new(0.0, 60.0, -320.0), 0.0, -0.15);
    let ctx = RenderContext::new(scene, camera);

    let config = RenderConfig::default().with_resolution(320, 240);
    let mut driver = FrameDriver::new(config)?;

    println!(
        "Rendering {}x{}, max depth {}...",
        driver.config().width,
        driver.config().height,
        driver.config().max_depth
    );

    let start = std::time::Instant::now();
    let stats = driver.render_frame(&ctx);
    println!("Rendered in {:?}", start.elapsed());
    println!(
        "{} primary, {} reflection, {} shadow rays",
        stats.primary_rays, stats.reflection_rays, stats.shadow_rays
    );

    let filename = "output.ppm";
    save_ppm(driver.buffer(), filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new("simple");

    // Ground
    scene.create(ObjectDesc::plane(-50.0).with_color(Color::new(200.0, 200.0, 200.0)));

    // Mirror ball in the middle
    scene.create(
        ObjectDesc::sphere(Vec3::new(0.0, 0.0, 0.0), 50.0)
            .with_color(Color::new(230.0, 230.0, 230.0))
            .with_preset(MaterialPreset::Reflective),
    );

    // Plain red ball
    scene.create(
        ObjectDesc::sphere(Vec3::new(-120.0, -10.0, 40.0), 40.0)
            .with_color(Color::new(220.0, 50.0, 50.0))
            .with_texture(Texture::none()),
    );

    // Tilted metal cube
    scene.create(
        ObjectDesc::cube(Vec3::new(120.0, -10.0, 30.0), 40.0)
            .with_rotation(Euler::from_degrees(15.0, 35.0, 0.0))
            .with_color(Color::new(60.0, 110.0, 220.0))
            .with_preset(MaterialPreset::Metal),
    );

    scene
}

fn save_ppm(image: &FrameBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for y in 0..image.height() {
        for x in 0..image.width() {
            let rgba = image.get(x, y);
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    Ok(())
}
