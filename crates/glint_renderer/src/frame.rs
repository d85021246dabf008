//! Frame pacing and the per-frame render driver.
//!
//! `RenderContext` holds what the caller mutates between frames (scene and
//! camera). `FrameDriver` owns everything the renderer keeps across frames:
//! the configuration, the output buffer and the pacer. Pacing is
//! cooperative; `tick` never sleeps, it reports how long to wait instead.

use std::time::{Duration, Instant};

use glint_core::Scene;
use glint_math::Vec3;
use rayon::prelude::*;

use crate::buffer::{color_to_rgba, FrameBuffer};
use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::tracer::{TraceStats, Tracer};

/// Result of asking the pacer whether a frame is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Ready,
    /// Time left until the next frame is due
    Wait(Duration),
}

/// Fixed-rate frame scheduler.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new(target_fps: f32) -> RenderResult<Self> {
        if !(target_fps.is_finite() && target_fps > 0.0) {
            return Err(RenderError::InvalidFrameRate(target_fps));
        }
        Ok(Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(target_fps)),
            last_frame: None,
        })
    }

    /// Minimum time between two rendered frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a frame is due at `now`.
    ///
    /// The first poll is always ready, so the opening frame draws right away
    /// instead of one interval after the loop starts.
    pub fn poll(&self, now: Instant) -> Pace {
        let Some(last) = self.last_frame else {
            return Pace::Ready;
        };

        let elapsed = now.saturating_duration_since(last);
        if elapsed >= self.interval {
            Pace::Ready
        } else {
            Pace::Wait(self.interval - elapsed)
        }
    }

    /// Record that a frame was rendered at `now`.
    pub fn mark_rendered(&mut self, now: Instant) {
        self.last_frame = Some(now);
    }

    /// Forget the last frame so the next poll is ready.
    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}

/// Scene and camera, mutated by the caller between frames.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub scene: Scene,
    pub camera: Camera,
}

impl RenderContext {
    pub fn new(scene: Scene, camera: Camera) -> Self {
        Self { scene, camera }
    }

    /// Move the camera to (x, y, z).
    pub fn set_camera(&mut self, x: f32, y: f32, z: f32) {
        self.camera.position = Vec3::new(x, y, z);
    }

    /// Point the camera; angles in radians.
    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        self.camera.yaw = yaw;
        self.camera.pitch = pitch;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera.position
    }

    /// Camera (yaw, pitch) in radians.
    pub fn rotation(&self) -> (f32, f32) {
        (self.camera.yaw, self.camera.pitch)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}

/// Outcome of one `FrameDriver::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame was traced into the buffer.
    Rendered {
        stats: TraceStats,
        /// Time until the following frame is due
        next_in: Duration,
    },
    /// Too early; the buffer still holds the previous frame.
    Skipped { wait: Duration },
}

/// Renders frames of a `RenderContext` into an owned buffer.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    config: RenderConfig,
    buffer: FrameBuffer,
    pacer: FramePacer,
    frames_rendered: u64,
}

impl FrameDriver {
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        let buffer = FrameBuffer::new(config.width, config.height)?;
        let pacer = FramePacer::new(config.target_fps)?;

        log::info!(
            "Frame driver ready: {}x{} @ {} fps, max depth {}, {}",
            config.width,
            config.height,
            config.target_fps,
            config.max_depth,
            if config.parallel { "parallel" } else { "sequential" }
        );

        Ok(Self {
            config,
            buffer,
            pacer,
            frames_rendered: 0,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The most recently rendered frame.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Trace every pixel of the frame, ignoring the pacer.
    pub fn render_frame(&mut self, ctx: &RenderContext) -> TraceStats {
        let start = Instant::now();
        let width = self.config.width;
        let view = ctx
            .camera
            .view(width, self.config.height, self.config.fov_scale());
        let tracer = Tracer::new(&ctx.scene, &self.config);

        let render_row = |(y, row): (usize, &mut [[u8; 4]])| {
            let mut stats = TraceStats::default();
            for (x, pixel) in row.iter_mut().enumerate() {
                let ray = view.ray_for_pixel(x as u32, y as u32);
                *pixel = color_to_rgba(tracer.trace_primary(&ray, &mut stats));
            }
            stats
        };

        let pixels = self.buffer.pixels_mut();
        let stats = if self.config.parallel {
            pixels
                .par_chunks_mut(width as usize)
                .enumerate()
                .map(render_row)
                .reduce(TraceStats::default, TraceStats::merge)
        } else {
            pixels
                .chunks_mut(width as usize)
                .enumerate()
                .map(render_row)
                .fold(TraceStats::default(), TraceStats::merge)
        };

        self.frames_rendered += 1;
        log::debug!(
            "Frame {} rendered in {:.2?}: {} primary, {} reflection, {} shadow rays, depth {}",
            self.frames_rendered,
            start.elapsed(),
            stats.primary_rays,
            stats.reflection_rays,
            stats.shadow_rays,
            stats.max_depth_reached
        );

        stats
    }

    /// Render if the pacer says a frame is due at `now`.
    pub fn tick(&mut self, ctx: &RenderContext, now: Instant) -> FrameStatus {
        match self.pacer.poll(now) {
            Pace::Wait(wait) => FrameStatus::Skipped { wait },
            Pace::Ready => {
                let stats = self.render_frame(ctx);
                self.pacer.mark_rendered(now);
                FrameStatus::Rendered {
                    stats,
                    next_in: self.pacer.interval(),
                }
            }
        }
    }
}
