//! RGBA8 frame buffer handed to the presentation layer.

use glint_math::Color;

use crate::error::{RenderError, RenderResult};

/// Convert a 0-255 color to an opaque RGBA pixel, clamping each channel.
///
/// Channels round to nearest with ties to even, so 128.5 becomes 128.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let channel = |c: f32| c.clamp(0.0, 255.0).round_ties_even() as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// Row-major RGBA8 image, overwritten wholesale every rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl FrameBuffer {
    /// Create an opaque black buffer.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|&len| len > 0)
            .ok_or(RenderError::InvalidDimensions { width, height })?;

        Ok(Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y) from an unclamped color.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color_to_rgba(color);
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        &mut self.pixels
    }

    /// Flat RGBA byte view, 4 bytes per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(-20.0, 128.4, 900.0)), [0, 128, 255, 255]);
        assert_eq!(color_to_rgba(Color::splat(180.0)), [180, 180, 180, 255]);
    }

    #[test]
    fn test_color_to_rgba_ties_to_even() {
        assert_eq!(color_to_rgba(Color::new(128.5, 127.5, 0.5)), [128, 128, 0, 255]);
        assert_eq!(color_to_rgba(Color::new(254.5, 1.5, 2.5)), [254, 2, 2, 255]);
        assert_eq!(color_to_rgba(Color::new(128.6, 127.4, 300.5)), [129, 127, 255, 255]);
    }

    #[test]
    fn test_new_buffer_is_opaque_black() {
        let buffer = FrameBuffer::new(4, 3).unwrap();
        assert_eq!(buffer.pixels().len(), 12);
        assert!(buffer.pixels().iter().all(|p| *p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            FrameBuffer::new(0, 128),
            Err(RenderError::InvalidDimensions { width: 0, height: 128 })
        );
        assert!(FrameBuffer::new(128, 0).is_err());
    }

    #[test]
    fn test_set_is_row_major() {
        let mut buffer = FrameBuffer::new(4, 3).unwrap();
        buffer.set(2, 1, Color::new(10.0, 20.0, 30.0));

        assert_eq!(buffer.get(2, 1), [10, 20, 30, 255]);
        let bytes = buffer.as_bytes();
        assert_eq!(bytes.len(), 4 * 3 * 4);
        let offset = (1 * 4 + 2) * 4;
        assert_eq!(&bytes[offset..offset + 4], &[10, 20, 30, 255]);
    }
}
